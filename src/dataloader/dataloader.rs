use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::Rng;

use crate::thread_pool::thread_pool::ThreadPool;
use crate::thread_pool::worker::{WorkResult, WorkType};

use super::batch::DataBatch;
use super::config::{DataLoaderConfig, DecodeErrorPolicy};
use super::decode::{DecodeStage, DecodedImage, ImageCodecDecoder};
use super::error::DataLoaderError;
use super::manifest::{Manifest, ManifestEntry};
use super::shuffle::ShuffleController;

const CHANNELS: usize = 3;

/// Manifest-driven image batch loader.
///
/// Parses the manifest once at construction; after that the only mutable
/// state is the iteration cursor (and the shuffle permutation it wraps
/// through), so each `next_batch` call picks up exactly where the previous
/// one left off. Image decode fans out across the worker pool; cursor
/// advancement stays on the calling thread.
pub struct ImageDataLoader {
    manifest: Manifest,
    shuffle: ShuffleController,
    config: DataLoaderConfig,
    decoder: Arc<dyn DecodeStage>,
    thread_pool: Arc<ThreadPool>,
    batches_produced: usize,
}

impl std::fmt::Debug for ImageDataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageDataLoader")
            .field("config", &self.config)
            .field("batches_produced", &self.batches_produced)
            .finish_non_exhaustive()
    }
}

impl ImageDataLoader {
    pub fn new(
        source: impl AsRef<Path>,
        config: Option<DataLoaderConfig>,
    ) -> Result<Self, DataLoaderError> {
        let source = source.as_ref();
        if !source.exists() {
            return Err(DataLoaderError::ManifestNotFound(
                source.display().to_string(),
            ));
        }

        let mut config = config.unwrap_or_default().build()?;

        let mut manifest = Manifest::from_file(source, config.dim_label)?;
        if let Some(root) = &config.root_folder {
            manifest = manifest.with_root_folder(root);
        }

        let shuffle = if config.shuffle {
            // Record a generated seed so callers can log and replay it
            let seed = *config
                .shuffle_seed
                .get_or_insert_with(|| rand::thread_rng().gen());
            ShuffleController::shuffled(manifest.len(), seed)
        } else {
            ShuffleController::sequential(manifest.len())
        };

        let thread_pool = Arc::new(ThreadPool::new(config.threads));

        Ok(ImageDataLoader {
            manifest,
            shuffle,
            config,
            decoder: Arc::new(ImageCodecDecoder),
            thread_pool,
            batches_produced: 0,
        })
    }

    /// Substitute the decode stage, e.g. a different codec backend.
    pub fn with_decoder(mut self, decoder: Arc<dyn DecodeStage>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Decode and assemble the next `batch_size` images and their labels.
    ///
    /// The pixel tensor shape is fixed by the resize target when one is
    /// configured, otherwise by the first image decoded for the batch;
    /// a later image with different native dimensions fails the batch
    /// with `ShapeMismatch`.
    pub fn next_batch(&mut self) -> Result<DataBatch, DataLoaderError> {
        if self.manifest.is_empty() {
            return Err(DataLoaderError::EmptyManifest);
        }

        let batch_size = self.config.batch_size;
        let dim_label = self.config.dim_label;
        let resize = self.config.resize_target();

        let mut rows: Vec<(PathBuf, DecodedImage)> = Vec::with_capacity(batch_size);
        let mut labels: Vec<f32> = Vec::with_capacity(batch_size * dim_label);
        let mut consecutive_failures = 0usize;

        while rows.len() < batch_size {
            // Cursor advance is the serialized section; decode fans out.
            let entries: Vec<ManifestEntry> = (0..batch_size - rows.len())
                .map(|_| {
                    let index = self.shuffle.next_index();
                    self.manifest.get(index).clone()
                })
                .collect();

            let work_items = entries
                .iter()
                .enumerate()
                .map(|(row, entry)| WorkType::DecodeImage {
                    row,
                    path: entry.path.clone(),
                    resize,
                    decoder: Arc::clone(&self.decoder),
                })
                .collect();

            let results = self.thread_pool.submit_batch(work_items).wait();

            for (row, (entry, result)) in entries.iter().zip(results).enumerate() {
                let WorkResult::DecodeImage {
                    row: result_row,
                    result,
                } = result;
                debug_assert_eq!(result_row, row);
                match result {
                    Ok(image) => {
                        rows.push((entry.path.clone(), image));
                        labels.extend_from_slice(&entry.labels);
                        consecutive_failures = 0;
                    }
                    Err(err) => match self.config.on_decode_error {
                        DecodeErrorPolicy::Abort => return Err(err),
                        DecodeErrorPolicy::Skip => {
                            consecutive_failures += 1;
                            eprintln!("imgfeed: skipping entry: {err}");
                            // A manifest's worth of failures in a row means
                            // nothing left can decode
                            if consecutive_failures >= self.manifest.len() {
                                return Err(err);
                            }
                        }
                    },
                }
            }
        }

        let (height, width) = match resize {
            Some((h, w)) => (h as usize, w as usize),
            None => (rows[0].1.height as usize, rows[0].1.width as usize),
        };

        let image_len = CHANNELS * height * width;
        let mut pixels = vec![0.0f32; batch_size * image_len];
        for (i, (path, image)) in rows.iter().enumerate() {
            if image.height as usize != height || image.width as usize != width {
                return Err(DataLoaderError::ShapeMismatch {
                    path: path.clone(),
                    height,
                    width,
                    got_height: image.height as usize,
                    got_width: image.width as usize,
                });
            }
            image.write_chw(&mut pixels[i * image_len..(i + 1) * image_len]);
        }

        let batch_number = self.batches_produced;
        self.batches_produced += 1;

        Ok(DataBatch {
            pixels,
            labels,
            batch_size,
            channels: CHANNELS,
            height,
            width,
            dim_label,
            batch_number,
        })
    }

    pub fn len(&self) -> usize {
        self.manifest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }

    pub fn batches_per_pass(&self) -> usize {
        self.manifest.len().div_ceil(self.config.batch_size)
    }

    pub fn config(&self) -> &DataLoaderConfig {
        &self.config
    }
}
