use image::RgbImage;
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_SIZE: usize = 64;
pub const RGB_CHANNELS: usize = 3;

/// A dense `[batch, height, width, channels]` tensor of `f32` samples in
/// `0.0..=1.0`, laid out row-major with the channel index varying fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBatch {
    batch: usize,
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<f32>,
}

impl ImageBatch {
    pub fn zeros(batch: usize, height: usize, width: usize, channels: usize) -> Self {
        Self {
            batch,
            height,
            width,
            channels,
            data: vec![0.0; batch * height * width * channels],
        }
    }

    /// The uniform black 1x64x64x3 image returned in place of a failed load.
    pub fn placeholder() -> Self {
        Self::zeros(1, PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, RGB_CHANNELS)
    }

    /// Wraps one 8-bit RGB image as a batch of one, scaling samples to `[0, 1]`.
    pub fn from_rgb(img: &RgbImage) -> Self {
        let data = img
            .as_raw()
            .iter()
            .map(|&sample| sample as f32 / 255.0)
            .collect();

        Self {
            batch: 1,
            height: img.height() as usize,
            width: img.width() as usize,
            channels: RGB_CHANNELS,
            data,
        }
    }

    pub fn shape(&self) -> [usize; 4] {
        [self.batch, self.height, self.width, self.channels]
    }

    pub fn get(&self, b: usize, y: usize, x: usize, c: usize) -> Option<f32> {
        if b >= self.batch || y >= self.height || x >= self.width || c >= self.channels {
            return None;
        }
        let idx = ((b * self.height + y) * self.width + x) * self.channels + c;
        self.data.get(idx).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
