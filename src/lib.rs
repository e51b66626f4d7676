//! imgfeed: manifest-driven image batch loading for training pipelines.
//!
//! A manifest maps image paths to one or more numeric labels, one entry
//! per line. The loader decodes (and optionally resizes) images on a
//! worker pool and hands out fixed-shape pixel/label batches, walking the
//! manifest through a wrapping, optionally shuffled cursor.

pub mod dataloader;
pub mod thread_pool;

pub use dataloader::batch::DataBatch;
pub use dataloader::config::{DataLoaderConfig, DecodeErrorPolicy};
pub use dataloader::dataloader::ImageDataLoader;
pub use dataloader::decode::{DecodeStage, DecodedImage, ImageCodecDecoder};
pub use dataloader::error::DataLoaderError;
pub use dataloader::info::print_loader_info;
pub use dataloader::manifest::{Manifest, ManifestEntry};
pub use dataloader::prefetch::{PrefetchDataLoaderIterator, PrefetchIterator};
