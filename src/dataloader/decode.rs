use std::path::Path;

use image::imageops::{self, FilterType};

use super::error::DataLoaderError;

/// A decoded 3-channel image, interleaved RGB8.
#[derive(Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Write the image into `out` as planar [C, H, W] f32, raw 0..=255
    /// values. `out` must hold exactly `3 * height * width` elements.
    pub fn write_chw(&self, out: &mut [f32]) {
        let npix = self.width as usize * self.height as usize;
        debug_assert_eq!(out.len(), 3 * npix);
        for i in 0..npix {
            out[i] = self.pixels[i * 3] as f32;
            out[npix + i] = self.pixels[i * 3 + 1] as f32;
            out[2 * npix + i] = self.pixels[i * 3 + 2] as f32;
        }
    }
}

/// Decode seam for the batch producer. Implementations must be shareable
/// across the worker threads that fan out a batch.
pub trait DecodeStage: Send + Sync {
    /// Decode `path` into 3-channel RGB, resized to exactly
    /// `(height, width)` when a target is given.
    fn decode(
        &self,
        path: &Path,
        resize: Option<(u32, u32)>,
    ) -> Result<DecodedImage, DataLoaderError>;
}

/// Default decode stage backed by the image crate. Grayscale and alpha
/// sources are converted to RGB; resizing is bilinear.
pub struct ImageCodecDecoder;

impl DecodeStage for ImageCodecDecoder {
    fn decode(
        &self,
        path: &Path,
        resize: Option<(u32, u32)>,
    ) -> Result<DecodedImage, DataLoaderError> {
        let img = image::open(path).map_err(|source| DataLoaderError::DecodeError {
            path: path.to_owned(),
            source,
        })?;

        let rgb = match resize {
            Some((height, width)) => imageops::resize(&img.to_rgb8(), width, height, FilterType::Triangle),
            None => img.to_rgb8(),
        };

        Ok(DecodedImage {
            width: rgb.width(),
            height: rgb.height(),
            pixels: rgb.into_raw(),
        })
    }
}
