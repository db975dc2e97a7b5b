use std::path::Path;

use image::DynamicImage;

use crate::media::domain::image_reader::ImageReader;
use crate::shared::frame::{Frame, PixelFormat};

/// Decodes image files with the `image` crate.
///
/// Grayscale sources stay single-channel, sources with alpha decode to
/// RGBA, everything else to RGB. Higher bit depths are reduced to 8 bits.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

fn into_frame(img: DynamicImage) -> Result<Frame, Box<dyn std::error::Error>> {
    let (width, height) = (img.width(), img.height());
    let color = img.color();
    let (data, format) = if !color.has_color() && !color.has_alpha() {
        (img.into_luma8().into_raw(), PixelFormat::Luma8)
    } else if color.has_alpha() {
        (img.into_rgba8().into_raw(), PixelFormat::Rgba8)
    } else {
        (img.into_rgb8().into_raw(), PixelFormat::Rgb8)
    };
    Ok(Frame::new(data, width, height, format)?)
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::open(path)?;
        let frame = into_frame(img)?;
        log::debug!(
            "Decoded {} ({}x{} {:?})",
            path.display(),
            frame.width(),
            frame.height(),
            frame.format()
        );
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_rgb_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("test.png");
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_rgb_png_decodes_to_rgb8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_rgb_image(dir.path(), 100, 80);
        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.format(), PixelFormat::Rgb8);
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_gray_png_stays_single_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let gray = image::GrayImage::from_pixel(20, 10, image::Luma([77]));
        gray.save(&path).unwrap();

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.format(), PixelFormat::Luma8);
        assert_eq!(frame.data().len(), 200);
        assert!(frame.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_alpha_png_decodes_to_rgba8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        image::RgbaImage::from_pixel(8, 8, image::Rgba([1, 2, 3, 128]))
            .save(&path)
            .unwrap();

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.format(), PixelFormat::Rgba8);
        assert_eq!(&frame.data()[..4], &[1, 2, 3, 128]);
    }

    #[test]
    fn test_nonexistent_file_returns_error() {
        let reader = ImageFileReader::new();
        assert!(reader.read(Path::new("/nonexistent/test.png")).is_err());
    }

    #[test]
    fn test_garbage_file_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(ImageFileReader::new().read(&path).is_err());
    }
}
