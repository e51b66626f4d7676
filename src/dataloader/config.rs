use std::path::PathBuf;

use super::error::DataLoaderError;

/// What to do when an image in the manifest fails to decode.
///
/// `Skip` drops the entry and pulls the next one from the cursor, so the
/// entries a pass visits no longer line up one-to-one with the manifest.
/// The default is `Abort`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorPolicy {
    Abort,
    Skip,
}

#[derive(Debug)]
pub struct DataLoaderConfig {
    pub threads: usize,
    pub batch_size: usize,
    pub prefetch_count: usize,
    pub new_height: Option<u32>,
    pub new_width: Option<u32>,
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
    pub dim_label: usize,
    pub root_folder: Option<PathBuf>,
    pub on_decode_error: DecodeErrorPolicy,
}

impl DataLoaderConfig {
    pub fn build(self) -> Result<Self, DataLoaderError> {
        if self.batch_size == 0 {
            return Err(DataLoaderError::InvalidBatchSize);
        }
        if self.dim_label == 0 {
            return Err(DataLoaderError::InvalidLabelDim);
        }
        if self.new_height.is_some() != self.new_width.is_some() {
            return Err(DataLoaderError::PartialResizeTarget);
        }

        Ok(self)
    }

    /// Target (height, width), or None when images keep their native size.
    pub fn resize_target(&self) -> Option<(u32, u32)> {
        self.new_height.zip(self.new_width)
    }
}

impl Default for DataLoaderConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            batch_size: 32,
            prefetch_count: 4,
            new_height: None,
            new_width: None,
            shuffle: true,
            shuffle_seed: None,
            dim_label: 1,
            root_folder: None,
            on_decode_error: DecodeErrorPolicy::Abort,
        }
    }
}
