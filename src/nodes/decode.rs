use crate::logger;
use crate::models::ImageBatch;
use image::{DynamicImage, ImageError, ImageReader, Rgb, RgbImage};
use std::path::Path;

/// Decode an image file into a `[1, H, W, 3]` batch.
///
/// The format is sniffed from the file contents, falling back to the
/// extension. Images with an alpha channel (palette transparency is expanded
/// to alpha by the decoders) are composited over opaque white.
pub fn load_image_batch(path: &Path) -> Result<ImageBatch, ImageError> {
    let _timer = logger::timer(&format!("Decoding {}", path.display()));

    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    log::debug!(
        "Decoded {}x{} image with color type {:?}",
        img.width(),
        img.height(),
        img.color()
    );

    Ok(ImageBatch::from_rgb(&flatten_to_rgb(img)))
}

pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.put_pixel(
            x,
            y,
            Rgb([over_white(r, a), over_white(g, a), over_white(b, a)]),
        );
    }
    rgb
}

fn over_white(sample: u8, alpha: u8) -> u8 {
    let (sample, alpha) = (sample as u32, alpha as u32);
    ((sample * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}
