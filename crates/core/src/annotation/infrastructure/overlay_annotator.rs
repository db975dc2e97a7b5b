use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::classification::domain::gesture_direction::GestureDirection;
use crate::features::domain::feature_descriptor::FeatureDescriptor;
use crate::preprocessing::infrastructure::color::rgb_to_luma;
use crate::shared::error::DetectorError;
use crate::shared::frame::{Frame, PixelFormat};
use crate::shared::region::Region;

pub type Rgb = [u8; 3];

pub const RIGHT_COLOR: Rgb = [0, 220, 0];
pub const LEFT_COLOR: Rgb = [0, 120, 255];
pub const UNDECIDED_COLOR: Rgb = [255, 255, 255];

/// Draws the subject's bounding box and centroid, plus a bar along the top
/// edge on the side of the detected direction. Colors follow the verdict.
pub struct OverlayAnnotator {
    line_width: Option<u32>,
}

impl OverlayAnnotator {
    /// `line_width` of `None` scales strokes with the frame size.
    pub fn new(line_width: Option<u32>) -> Self {
        Self { line_width }
    }

    fn stroke(&self, frame: &Frame) -> i32 {
        let auto = frame.width().min(frame.height()) / 160;
        self.line_width.unwrap_or(auto).max(1) as i32
    }
}

impl Default for OverlayAnnotator {
    fn default() -> Self {
        Self::new(None)
    }
}

pub fn direction_color(direction: GestureDirection) -> Rgb {
    match direction {
        GestureDirection::Right => RIGHT_COLOR,
        GestureDirection::Left => LEFT_COLOR,
        GestureDirection::None => UNDECIDED_COLOR,
    }
}

impl FrameAnnotator for OverlayAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        descriptor: &FeatureDescriptor,
        direction: GestureDirection,
    ) -> Result<(), DetectorError> {
        let (fw, fh) = (frame.width(), frame.height());
        let stroke = self.stroke(frame);
        let color = direction_color(direction);

        if descriptor.has_subject() {
            let (aw, ah) = descriptor.frame_size;
            if aw == 0 || ah == 0 {
                return Err(DetectorError::InvalidImageFormat(
                    "descriptor has an empty analysis frame".into(),
                ));
            }
            let sx = fw as f64 / aw as f64;
            let sy = fh as f64 / ah as f64;

            let bbox = descriptor.bounding_box.scaled(sx, sy);
            draw_outline(frame, bbox, stroke, color);

            let cx = ((descriptor.centroid.0 + 0.5) * sx) as i32;
            let cy = ((descriptor.centroid.1 + 0.5) * sy) as i32;
            let arm = stroke * 4;
            let horizontal = Region::new(cx - arm, cy - stroke / 2, 2 * arm + 1, stroke);
            let vertical = Region::new(cx - stroke / 2, cy - arm, stroke, 2 * arm + 1);
            fill(frame, horizontal, color);
            fill(frame, vertical, color);
        }

        let half = fw as i32 / 2;
        let bar_height = stroke * 3;
        let bar = match direction {
            GestureDirection::Right => Some(Region::new(half, 0, fw as i32 - half, bar_height)),
            GestureDirection::Left => Some(Region::new(0, 0, half, bar_height)),
            GestureDirection::None => None,
        };
        if let Some(bar) = bar {
            fill(frame, bar, color);
        }
        debug_assert_eq!((frame.width(), frame.height()), (fw, fh));
        Ok(())
    }
}

fn draw_outline(frame: &mut Frame, r: Region, stroke: i32, color: Rgb) {
    let t = stroke.min(r.width).min(r.height).max(1);
    let (right, bottom) = (r.x + r.width - t, r.y + r.height - t);
    fill(frame, Region::new(r.x, r.y, r.width, t), color);
    fill(frame, Region::new(r.x, bottom, r.width, t), color);
    fill(frame, Region::new(r.x, r.y, t, r.height), color);
    fill(frame, Region::new(right, r.y, t, r.height), color);
}

/// Paints `region` (clipped to the frame) with `color`.
fn fill(frame: &mut Frame, region: Region, color: Rgb) {
    let r = region.clamped(frame.width(), frame.height());
    if r.is_empty() {
        return;
    }
    let pixel = encode(frame.format(), color);
    let channels = pixel.len();
    let fw = frame.width() as usize;
    let data = frame.data_mut();

    for row in r.y as usize..(r.y + r.height) as usize {
        let start = (row * fw + r.x as usize) * channels;
        let end = start + r.width as usize * channels;
        for dst in data[start..end].chunks_exact_mut(channels) {
            dst.copy_from_slice(&pixel);
        }
    }
}

fn encode(format: PixelFormat, [r, g, b]: Rgb) -> Vec<u8> {
    match format {
        PixelFormat::Luma8 => vec![rgb_to_luma(r, g, b)],
        PixelFormat::Rgb8 => vec![r, g, b],
        PixelFormat::Rgba8 => vec![r, g, b, 255],
        PixelFormat::Bgra8 => vec![b, g, r, 255],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::blank;

    fn subject(bbox: Region, centroid: (f64, f64)) -> FeatureDescriptor {
        FeatureDescriptor {
            subject_found: true,
            centroid,
            bounding_box: bbox,
            confidence: 1.0,
            ..FeatureDescriptor::no_subject((16, 12))
        }
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> &[u8] {
        let c = frame.channels() as usize;
        let i = (y * frame.width() + x) as usize * c;
        &frame.data()[i..i + c]
    }

    #[test]
    fn test_no_subject_no_direction_leaves_frame_unchanged() {
        let mut frame = blank(64, 48, PixelFormat::Rgb8, 10);
        let original = frame.clone();
        OverlayAnnotator::default()
            .annotate(
                &mut frame,
                &FeatureDescriptor::no_subject((16, 12)),
                GestureDirection::None,
            )
            .unwrap();
        assert_eq!(frame, original);
    }

    #[test]
    fn test_right_bar_on_right_half_only() {
        let mut frame = blank(64, 48, PixelFormat::Rgb8, 10);
        OverlayAnnotator::new(Some(1))
            .annotate(
                &mut frame,
                &FeatureDescriptor::no_subject((16, 12)),
                GestureDirection::Right,
            )
            .unwrap();
        assert_eq!(pixel(&frame, 40, 0), &RIGHT_COLOR);
        assert_eq!(pixel(&frame, 10, 0), &[10, 10, 10]);
        assert_eq!(pixel(&frame, 40, 10), &[10, 10, 10]);
    }

    #[test]
    fn test_left_bar_uses_bgra_order() {
        let mut frame = blank(64, 48, PixelFormat::Bgra8, 0);
        OverlayAnnotator::new(Some(1))
            .annotate(
                &mut frame,
                &FeatureDescriptor::no_subject((16, 12)),
                GestureDirection::Left,
            )
            .unwrap();
        let [r, g, b] = LEFT_COLOR;
        assert_eq!(pixel(&frame, 5, 1), &[b, g, r, 255]);
    }

    #[test]
    fn test_box_is_scaled_to_frame() {
        // analysis 16x12 → frame 64x48 (x4)
        let mut frame = blank(64, 48, PixelFormat::Luma8, 0);
        let d = subject(Region::new(2, 2, 4, 4), (3.5, 3.5));
        OverlayAnnotator::new(Some(1))
            .annotate(&mut frame, &d, GestureDirection::None)
            .unwrap();
        let white = rgb_to_luma(255, 255, 255);
        // outline corners at (8, 8) and (23, 23)
        assert_eq!(pixel(&frame, 8, 8), &[white]);
        assert_eq!(pixel(&frame, 23, 23), &[white]);
        assert_eq!(pixel(&frame, 8, 20), &[white]);
        // outside the box
        assert_eq!(pixel(&frame, 30, 30), &[0]);
    }

    #[test]
    fn test_shapes_at_edge_are_clipped() {
        let mut frame = blank(16, 12, PixelFormat::Rgba8, 0);
        let d = subject(Region::new(10, 8, 20, 20), (15.0, 11.0));
        OverlayAnnotator::new(Some(3))
            .annotate(&mut frame, &d, GestureDirection::Right)
            .unwrap();
        assert_eq!(frame.data().len(), 16 * 12 * 4);
    }

    #[test]
    fn test_auto_stroke_scales_with_frame() {
        let annotator = OverlayAnnotator::default();
        assert_eq!(annotator.stroke(&blank(64, 48, PixelFormat::Luma8, 0)), 1);
        let large = blank(1280, 960, PixelFormat::Luma8, 0);
        assert_eq!(annotator.stroke(&large), 6);
    }
}
