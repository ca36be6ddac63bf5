use crate::error::{Error, Result};
use crate::font::TextFace;

/// Largest canvas, in pixels, a render may allocate.
pub const MAX_PIXELS: u64 = 1 << 28;

/// Canvas geometry for one line of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Blank border on every side, in pixels.
    pub margin: u32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Pen start: left edge of the first glyph and the baseline.
    pub origin: (u32, u32),
}

impl Layout {
    /// Sizes the canvas so `text` fits on one line with a margin of one
    /// em (rounded up) on every side.
    ///
    /// # Errors
    /// [`Error::CanvasSize`] if a side does not fit 32 bits or the canvas
    /// exceeds [`MAX_PIXELS`].
    pub fn compute<F: TextFace + ?Sized>(
        point_size: f64,
        dpi: f64,
        face: &F,
        text: &str,
    ) -> Result<Self> {
        let metrics = face.metrics();
        let margin = (point_size * dpi / 72.0).ceil();

        let width = f64::from(face.measure(text)).ceil() + 2.0 * margin;
        let height = f64::from(metrics.line_height).ceil() + 2.0 * margin;
        let baseline = f64::from(metrics.ascent).ceil() + margin;

        let too_large = || Error::CanvasSize { width, height };
        let layout = Layout {
            margin: pixels(margin).ok_or_else(too_large)?,
            width: pixels(width).ok_or_else(too_large)?,
            height: pixels(height).ok_or_else(too_large)?,
            origin: (
                pixels(margin).ok_or_else(too_large)?,
                pixels(baseline).ok_or_else(too_large)?,
            ),
        };
        if u64::from(layout.width) * u64::from(layout.height) > MAX_PIXELS {
            return Err(too_large());
        }
        log::debug!("layout {layout:?}");
        Ok(layout)
    }
}

fn pixels(v: f64) -> Option<u32> {
    if v.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&v) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(v as u32)
    } else {
        None
    }
}
