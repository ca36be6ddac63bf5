use std::path::PathBuf;

use image::GrayImage;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::font::Face;
use crate::layout::Layout;
use crate::raster::{blank_canvas, rasterize};
use crate::tone::tone_map;
use crate::writer::write_png;

/// An image produced by [`render`], with the geometry it was laid out on.
#[derive(Debug)]
pub struct Rendered {
    /// 8-bit tone-mapped output.
    pub image: GrayImage,
    /// Margin, dimensions and pen origin used for drawing.
    pub layout: Layout,
}

/// Loads the font, lays out and draws the text, and tone maps the result.
///
/// # Errors
/// Any configuration, font or face error.
pub fn render(config: &RenderConfig) -> Result<Rendered> {
    config.validate()?;

    let font = config.font.load()?;
    let face = Face::new(font, config.point_size, config.dpi, config.hinting)?;
    let layout = Layout::compute(config.point_size, config.dpi, &face, &config.text)?;

    let mut canvas = blank_canvas(&layout);
    rasterize(&mut canvas, &face, &layout, &config.text);

    let image = tone_map(&canvas, config.tone, config.parallelism);
    Ok(Rendered { image, layout })
}

/// [`render`]s and writes the PNG to [`RenderConfig::output_path`].
///
/// Returns the path that was written.
///
/// # Errors
/// Anything [`render`] or [`write_png`] reports. Nothing is written to disk
/// unless rendering succeeded.
pub fn run(config: &RenderConfig) -> Result<PathBuf> {
    let rendered = render(config)?;
    let path = config.output_path();
    write_png(&path, &rendered.image)?;
    log::info!(
        "wrote {}x{} image to {}",
        rendered.layout.width,
        rendered.layout.height,
        path.display()
    );
    Ok(path)
}
