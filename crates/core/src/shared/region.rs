/// Axis-aligned pixel rectangle, half-open on the right and bottom edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest region containing both inclusive corners.
    pub fn from_corners(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    pub fn area(&self) -> i64 {
        self.width.max(0) as i64 * self.height.max(0) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Maps the region into a frame scaled by `(sx, sy)`.
    ///
    /// Edges are rounded outward so the scaled region never loses pixels.
    pub fn scaled(&self, sx: f64, sy: f64) -> Region {
        let x0 = (self.x as f64 * sx).floor() as i32;
        let y0 = (self.y as f64 * sy).floor() as i32;
        let x1 = ((self.x + self.width) as f64 * sx).ceil() as i32;
        let y1 = ((self.y + self.height) as f64 * sy).ceil() as i32;
        Region::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Intersection with a `frame_width` x `frame_height` frame.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Region {
        let x0 = self.x.clamp(0, frame_width as i32);
        let y0 = self.y.clamp(0, frame_height as i32);
        let x1 = (self.x + self.width).clamp(0, frame_width as i32);
        let y1 = (self.y + self.height).clamp(0, frame_height as i32);
        Region::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}
