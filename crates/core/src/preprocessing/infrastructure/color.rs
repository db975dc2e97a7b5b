//! Integer BT.601 full-range color conversion.

use ndarray::Array2;

use crate::preprocessing::domain::analysis_frame::ChromaPlanes;
use crate::shared::frame::Frame;

#[inline]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32 + 128) >> 8) as u8
}

#[inline]
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let cb = ((-43 * r - 85 * g + 128 * b + 128) >> 8) + 128;
    let cr = ((128 * r - 107 * g - 21 * b + 128) >> 8) + 128;
    (
        rgb_to_luma(r as u8, g as u8, b as u8),
        cb.clamp(0, 255) as u8,
        cr.clamp(0, 255) as u8,
    )
}

/// Splits a frame into source-resolution luma and, for color formats,
/// chroma planes. Alpha is ignored.
pub fn split_planes(frame: &Frame) -> (Array2<u8>, Option<ChromaPlanes>) {
    let pixels = frame.as_ndarray();
    let shape = (frame.height() as usize, frame.width() as usize);

    let Some((ro, go, bo)) = frame.format().rgb_offsets() else {
        return (pixels.index_axis(ndarray::Axis(2), 0).to_owned(), None);
    };

    let mut luma = Array2::zeros(shape);
    let mut cb = Array2::zeros(shape);
    let mut cr = Array2::zeros(shape);
    for ((row, col), y) in luma.indexed_iter_mut() {
        let (yv, cbv, crv) = rgb_to_ycbcr(
            pixels[[row, col, ro]],
            pixels[[row, col, go]],
            pixels[[row, col, bo]],
        );
        *y = yv;
        cb[[row, col]] = cbv;
        cr[[row, col]] = crv;
    }
    (luma, Some(ChromaPlanes { cb, cr }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::PixelFormat;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(17)]
    #[case(128)]
    #[case(255)]
    fn test_gray_is_neutral(#[case] v: u8) {
        assert_eq!(rgb_to_ycbcr(v, v, v), (v, 128, 128));
    }

    #[test]
    fn test_luma_weights_green_most() {
        assert!(rgb_to_luma(0, 255, 0) > rgb_to_luma(255, 0, 0));
        assert!(rgb_to_luma(255, 0, 0) > rgb_to_luma(0, 0, 255));
    }

    #[test]
    fn test_skin_sample_lands_in_skin_box() {
        let (_, cb, cr) = rgb_to_ycbcr(220, 170, 140);
        assert!((77..=127).contains(&cb), "cb={cb}");
        assert!((133..=173).contains(&cr), "cr={cr}");
    }

    #[test]
    fn test_split_luma_frame_has_no_chroma() {
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6], 3, 2, PixelFormat::Luma8).unwrap();
        let (luma, chroma) = split_planes(&frame);
        assert!(chroma.is_none());
        assert_eq!(luma.dim(), (2, 3));
        assert_eq!(luma[[1, 0]], 4);
    }

    #[test]
    fn test_split_bgra_reads_red_from_third_byte() {
        // one pure-red pixel in BGRA
        let bgra = Frame::new(vec![0, 0, 255, 255], 1, 1, PixelFormat::Bgra8).unwrap();
        let rgba = Frame::new(vec![255, 0, 0, 255], 1, 1, PixelFormat::Rgba8).unwrap();
        let (luma_a, chroma_a) = split_planes(&bgra);
        let (luma_b, chroma_b) = split_planes(&rgba);
        assert_eq!(luma_a, luma_b);
        assert_eq!(chroma_a, chroma_b);
        assert_eq!(luma_a[[0, 0]], rgb_to_luma(255, 0, 0));
    }
}
