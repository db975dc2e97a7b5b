//! Synthetic frames for pipeline tests.

use crate::shared::frame::{Frame, PixelFormat};

pub const BACKGROUND: u8 = 20;
pub const FOREGROUND: u8 = 200;

/// Bright bar standing in for an outstretched hand.
///
/// `lean_deg` tilts the bar's top toward +x (positive) or -x (negative).
/// Dimensions are in source pixels.
#[derive(Clone, Copy, Debug)]
pub struct Bar {
    pub cx: f64,
    pub cy: f64,
    pub length: f64,
    pub thickness: f64,
    pub lean_deg: f64,
}

impl Bar {
    fn contains(&self, x: f64, y: f64) -> bool {
        let phi = self.lean_deg.to_radians();
        // axis points toward the top of the bar, perpendicular toward +x
        let (ax, ay) = (phi.sin(), -phi.cos());
        let (px, py) = (phi.cos(), phi.sin());
        let (dx, dy) = (x - self.cx, y - self.cy);
        (dx * ax + dy * ay).abs() <= self.length / 2.0
            && (dx * px + dy * py).abs() <= self.thickness / 2.0
    }
}

pub fn blank(width: u32, height: u32, format: PixelFormat, value: u8) -> Frame {
    Frame::filled(width, height, format, value).unwrap()
}

/// Dark frame with a bright bar, every channel set to the same level.
pub fn bar_frame(width: u32, height: u32, format: PixelFormat, bar: Bar) -> Frame {
    let channels = format.channels() as usize;
    let mut data = Vec::with_capacity(width as usize * height as usize * channels);
    for y in 0..height {
        for x in 0..width {
            let v = if bar.contains(x as f64 + 0.5, y as f64 + 0.5) {
                FOREGROUND
            } else {
                BACKGROUND
            };
            data.extend(std::iter::repeat(v).take(channels));
        }
    }
    Frame::new(data, width, height, format).unwrap()
}

/// 320x240 hand bar placed right of center and leaning right.
pub fn hand_right(format: PixelFormat) -> Frame {
    bar_frame(320, 240, format, tilted_bar(224.0, 30.0))
}

/// Mirror image of [`hand_right`].
pub fn hand_left(format: PixelFormat) -> Frame {
    bar_frame(320, 240, format, tilted_bar(96.0, -30.0))
}

/// Upright bar in the middle of a 320x240 frame.
pub fn hand_centered(format: PixelFormat) -> Frame {
    bar_frame(320, 240, format, tilted_bar(160.0, 0.0))
}

fn tilted_bar(cx: f64, lean_deg: f64) -> Bar {
    Bar {
        cx,
        cy: 120.0,
        length: 160.0,
        thickness: 40.0,
        lean_deg,
    }
}
