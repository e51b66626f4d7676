/// One batch of decoded images and their labels.
///
/// `pixels` is row-major [batch_size, channels, height, width]; `labels`
/// is [batch_size, dim_label, 1, 1]. Both are freshly allocated per batch
/// and owned by the caller.
pub struct DataBatch {
    pub pixels: Vec<f32>,
    pub labels: Vec<f32>,
    pub batch_size: usize,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
    pub dim_label: usize,
    pub batch_number: usize,
}

impl DataBatch {
    pub fn pixel_shape(&self) -> [usize; 4] {
        [self.batch_size, self.channels, self.height, self.width]
    }

    pub fn label_shape(&self) -> [usize; 4] {
        [self.batch_size, self.dim_label, 1, 1]
    }

    /// Pixel slice for image `i`, planar [C, H, W].
    pub fn image(&self, i: usize) -> &[f32] {
        let stride = self.channels * self.height * self.width;
        &self.pixels[i * stride..(i + 1) * stride]
    }

    /// Label slice for image `i`.
    pub fn labels_for(&self, i: usize) -> &[f32] {
        &self.labels[i * self.dim_label..(i + 1) * self.dim_label]
    }
}
