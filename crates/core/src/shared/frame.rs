use ndarray::ArrayView3;

use crate::shared::error::DetectorError;

/// Sample layout of a [`Frame`]. All formats are 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Luma8,
    Rgb8,
    Rgba8,
    /// Native layout of most camera capture buffers.
    Bgra8,
}

impl PixelFormat {
    pub const ALL: &[PixelFormat] = &[
        PixelFormat::Luma8,
        PixelFormat::Rgb8,
        PixelFormat::Rgba8,
        PixelFormat::Bgra8,
    ];

    pub fn channels(self) -> u8 {
        match self {
            PixelFormat::Luma8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => 4,
        }
    }

    pub fn is_color(self) -> bool {
        self != PixelFormat::Luma8
    }

    /// Byte offsets of (R, G, B) within one pixel, or `None` for luma.
    pub fn rgb_offsets(self) -> Option<(usize, usize, usize)> {
        match self {
            PixelFormat::Luma8 => None,
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => Some((0, 1, 2)),
            PixelFormat::Bgra8 => Some((2, 1, 0)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            PixelFormat::Luma8 => 0,
            PixelFormat::Rgb8 => 1,
            PixelFormat::Rgba8 => 2,
            PixelFormat::Bgra8 => 3,
        }
    }
}

impl TryFrom<i32> for PixelFormat {
    type Error = DetectorError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PixelFormat::Luma8),
            1 => Ok(PixelFormat::Rgb8),
            2 => Ok(PixelFormat::Rgba8),
            3 => Ok(PixelFormat::Bgra8),
            other => Err(DetectorError::InvalidImageFormat(format!(
                "unknown pixel format code {other}"
            ))),
        }
    }
}

/// A decoded image: contiguous samples in row-major order.
///
/// Always non-empty, with `data.len() == width * height * channels`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, DetectorError> {
        validate_layout(data.len(), width, height, format)?;
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// A frame with every sample set to `value`.
    pub fn filled(
        width: u32,
        height: u32,
        format: PixelFormat,
        value: u8,
    ) -> Result<Self, DetectorError> {
        let len = (width as usize) * (height as usize) * (format.channels() as usize);
        Self::new(vec![value; len], width, height, format)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channels(&self) -> u8 {
        self.format.channels()
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels() as usize,
        )
    }
}

/// Checks the buffer-size invariant shared by [`Frame::new`] and the
/// preprocessing boundary.
pub fn validate_layout(
    len: usize,
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<(), DetectorError> {
    if width == 0 || height == 0 {
        return Err(DetectorError::InvalidImageFormat(format!(
            "image must not be empty, got {width}x{height}"
        )));
    }
    let expected = (width as usize) * (height as usize) * (format.channels() as usize);
    if len != expected {
        return Err(DetectorError::InvalidImageFormat(format!(
            "{width}x{height} {format:?} needs {expected} bytes, got {len}"
        )));
    }
    Ok(())
}
