use ndarray::Array2;

/// Cb/Cr planes at analysis resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChromaPlanes {
    pub cb: Array2<u8>,
    pub cr: Array2<u8>,
}

/// Fixed-size image representation consumed by feature extraction.
///
/// All planes are indexed `[[row, col]]` and share one shape. The source
/// dimensions are kept so results can be mapped back onto the input image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisFrame {
    luma: Array2<u8>,
    chroma: Option<ChromaPlanes>,
    difference: Option<Array2<u8>>,
    source_width: u32,
    source_height: u32,
}

impl AnalysisFrame {
    pub fn new(
        luma: Array2<u8>,
        chroma: Option<ChromaPlanes>,
        difference: Option<Array2<u8>>,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        if let Some(c) = &chroma {
            debug_assert!(c.cb.dim() == luma.dim() && c.cr.dim() == luma.dim());
        }
        if let Some(d) = &difference {
            debug_assert_eq!(d.dim(), luma.dim());
        }
        Self {
            luma,
            chroma,
            difference,
            source_width,
            source_height,
        }
    }

    /// Luma-only frame whose source size equals its own size.
    pub fn from_luma(luma: Array2<u8>) -> Self {
        let (h, w) = luma.dim();
        Self::new(luma, None, None, w as u32, h as u32)
    }

    pub fn width(&self) -> usize {
        self.luma.ncols()
    }

    pub fn height(&self) -> usize {
        self.luma.nrows()
    }

    pub fn area(&self) -> usize {
        self.luma.len()
    }

    pub fn luma(&self) -> &Array2<u8> {
        &self.luma
    }

    pub fn chroma(&self) -> Option<&ChromaPlanes> {
        self.chroma.as_ref()
    }

    /// Absolute luma difference against the background reference, if one is set.
    pub fn difference(&self) -> Option<&Array2<u8>> {
        self.difference.as_ref()
    }

    pub fn source_size(&self) -> (u32, u32) {
        (self.source_width, self.source_height)
    }

    /// Multipliers mapping analysis coordinates onto the source image.
    pub fn scale_to_source(&self) -> (f64, f64) {
        (
            self.source_width as f64 / self.width() as f64,
            self.source_height as f64 / self.height() as f64,
        )
    }
}
