use image::{ImageBuffer, Luma};

use crate::font::TextFace;
use crate::layout::Layout;

/// 16-bit grayscale drawing surface.
pub type Canvas = ImageBuffer<Luma<u16>, Vec<u16>>;

/// A white canvas sized by `layout`.
#[must_use]
pub fn blank_canvas(layout: &Layout) -> Canvas {
    Canvas::from_pixel(layout.width, layout.height, Luma([u16::MAX]))
}

/// Composites black with the given coverage over a sample.
#[must_use]
pub fn cover(sample: u16, coverage: f32) -> u16 {
    let keep = 1.0 - coverage.clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let covered = (f32::from(sample) * keep).round() as u16;
    covered
}

/// Draws `text` onto `canvas` starting at the layout's pen origin.
pub fn rasterize<F: TextFace + ?Sized>(canvas: &mut Canvas, face: &F, layout: &Layout, text: &str) {
    log::debug!(
        "drawing {} chars at ({}, {}) on a {}x{} canvas",
        text.chars().count(),
        layout.origin.0,
        layout.origin.1,
        canvas.width(),
        canvas.height(),
    );
    #[allow(clippy::cast_precision_loss)]
    let origin = (layout.origin.0 as f32, layout.origin.1 as f32);
    face.draw(canvas, origin, text);
}
