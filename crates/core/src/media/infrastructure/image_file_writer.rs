use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::media::domain::image_writer::ImageWriter;
use crate::shared::frame::{Frame, PixelFormat};

/// Writes a single frame to an image file using the `image` crate.
///
/// BGRA frames are reordered to RGBA first. Alpha is dropped for formats
/// that cannot store it (JPEG).
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_dynamic(frame: &Frame) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let (w, h) = (frame.width(), frame.height());
    let raw = frame.data().to_vec();
    let img = match frame.format() {
        PixelFormat::Luma8 => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
        PixelFormat::Rgb8 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
        PixelFormat::Bgra8 => {
            let mut rgba = raw;
            for px in rgba.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
            RgbaImage::from_raw(w, h, rgba).map(DynamicImage::ImageRgba8)
        }
    };
    img.ok_or_else(|| "Failed to create image from frame data".into())
}

fn supports_alpha(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return true;
    };
    !(ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut img = to_dynamic(frame)?;
        if img.color().has_alpha() && !supports_alpha(path) {
            img = DynamicImage::ImageRgb8(img.into_rgb8());
        }

        img.save(path)?;
        Ok(())
    }
}
