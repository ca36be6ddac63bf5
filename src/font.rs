//! Font loading and sized faces.
//!
//! Everything downstream of this module talks to fonts through [`TextFace`],
//! which is all the layout calculator and rasterizer need: vertical metrics,
//! string measurement and drawing onto a [`Canvas`].

use std::path::{Path, PathBuf};

use rusttype::{point, Font, GlyphId, Point, PositionedGlyph, Scale};

use crate::error::{Error, Result};
use crate::raster::Canvas;

/// The typeface compiled into the binary, used when no font file is given.
pub const DEFAULT_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Name used in output file names for [`DEFAULT_FONT`].
pub const DEFAULT_FONT_NAME: &str = "dejavusans";

/// Where the font bytes come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// [`DEFAULT_FONT`].
    #[default]
    Embedded,
    /// A TrueType/OpenType file on disk.
    File(PathBuf),
}

impl FontSource {
    /// Reads and parses the font.
    ///
    /// # Errors
    /// [`Error::FontRead`] if the file cannot be read, [`Error::FontParse`]
    /// if its contents are not a font.
    pub fn load(&self) -> Result<Font<'static>> {
        match self {
            FontSource::Embedded => Font::try_from_bytes(DEFAULT_FONT).ok_or_else(|| Error::FontParse {
                origin: DEFAULT_FONT_NAME.to_owned(),
            }),
            FontSource::File(path) => {
                let data = std::fs::read(path).map_err(|source| Error::FontRead {
                    path: path.clone(),
                    source,
                })?;
                log::debug!("read {} bytes of font data from {}", data.len(), path.display());
                Font::try_from_vec(data).ok_or_else(|| Error::FontParse {
                    origin: path.display().to_string(),
                })
            }
        }
    }

    /// File stem of the font path, or [`DEFAULT_FONT_NAME`].
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            FontSource::Embedded => DEFAULT_FONT_NAME.to_owned(),
            FontSource::File(path) => font_name(path),
        }
    }
}

fn font_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// How glyph metrics are snapped to the pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bin", derive(clap::ValueEnum))]
pub enum Hinting {
    /// Keep fractional metrics and pen positions.
    None,
    /// Round vertical metrics up, and advances and kerning to the nearest
    /// whole pixel.
    #[default]
    Full,
}

impl Hinting {
    fn snap_advance(self, v: f32) -> f32 {
        match self {
            Hinting::None => v,
            Hinting::Full => v.round(),
        }
    }
}

/// Vertical metrics of a face in pixels. `descent` is negative below the
/// baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceMetrics {
    /// Distance from the baseline to the top of the tallest glyphs.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyphs.
    pub descent: f32,
    /// Extra spacing between lines.
    pub line_gap: f32,
    /// Recommended distance between two baselines.
    pub line_height: f32,
}

/// The narrow font interface the rest of the pipeline depends on.
pub trait TextFace {
    /// Vertical metrics in pixels.
    fn metrics(&self) -> FaceMetrics;

    /// Pen advance in pixels after drawing `text` on one line.
    fn measure(&self, text: &str) -> f32;

    /// Draws `text` in black onto `canvas`, with the pen starting at
    /// `origin` on the baseline.
    fn draw(&self, canvas: &mut Canvas, origin: (f32, f32), text: &str);
}

/// A font sized for one point size and resolution.
pub struct Face {
    font: Font<'static>,
    scale: Scale,
    hinting: Hinting,
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Face")
            .field("glyphs", &self.font.glyph_count())
            .field("scale", &self.scale)
            .field("hinting", &self.hinting)
            .finish()
    }
}

impl Face {
    /// Sizes `font` so that one em spans `point_size * dpi / 72` pixels.
    ///
    /// # Errors
    /// [`Error::Face`] if the font's metrics are degenerate or the pixel
    /// scale is not a positive finite number.
    pub fn new(font: Font<'static>, point_size: f64, dpi: f64, hinting: Hinting) -> Result<Self> {
        let units_per_em = font.units_per_em();
        if units_per_em == 0 {
            return Err(Error::Face("font reports zero units per em".to_owned()));
        }

        // rusttype scales by the ascent-to-descent extent rather than the em.
        let unscaled = font.v_metrics_unscaled();
        let extent = unscaled.ascent - unscaled.descent;
        if extent <= 0.0 {
            return Err(Error::Face(format!("font has a vertical extent of {extent} units")));
        }

        let ppem = point_size * dpi / 72.0;
        #[allow(clippy::cast_possible_truncation)]
        let height = (ppem * f64::from(extent) / f64::from(units_per_em)) as f32;
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::Face(format!("{point_size}pt at {dpi}dpi gives a pixel height of {height}")));
        }

        log::debug!("face at {ppem:.3} pixels per em, rusttype scale {height:.3}");
        Ok(Face {
            font,
            scale: Scale::uniform(height),
            hinting,
        })
    }

    /// Positions every glyph of `text` from `origin`, returning them along
    /// with the total pen advance.
    fn layout(&self, text: &str, origin: Point<f32>) -> (Vec<PositionedGlyph<'static>>, f32) {
        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = origin.x;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let glyph = self.font.glyph(c).scaled(self.scale);
            if let Some(previous) = previous {
                caret += self.hinting.snap_advance(self.font.pair_kerning(self.scale, previous, glyph.id()));
            }
            previous = Some(glyph.id());

            let advance = self.hinting.snap_advance(glyph.h_metrics().advance_width);
            glyphs.push(glyph.positioned(point(caret, origin.y)));
            caret += advance;
        }

        (glyphs, caret - origin.x)
    }
}

impl TextFace for Face {
    fn metrics(&self) -> FaceMetrics {
        let v = self.font.v_metrics(self.scale);
        let line_height = v.ascent - v.descent + v.line_gap;
        match self.hinting {
            Hinting::None => FaceMetrics {
                ascent: v.ascent,
                descent: v.descent,
                line_gap: v.line_gap,
                line_height,
            },
            // Rounded away from the baseline; line height from the unrounded sum.
            Hinting::Full => FaceMetrics {
                ascent: v.ascent.ceil(),
                descent: v.descent.floor(),
                line_gap: v.line_gap.ceil(),
                line_height: line_height.ceil(),
            },
        }
    }

    fn measure(&self, text: &str) -> f32 {
        self.layout(text, point(0.0, 0.0)).1
    }

    fn draw(&self, canvas: &mut Canvas, origin: (f32, f32), text: &str) {
        let (width, height) = canvas.dimensions();
        let (glyphs, _) = self.layout(text, point(origin.0, origin.1));

        for glyph in &glyphs {
            let Some(bounding_box) = glyph.pixel_bounding_box() else {
                continue;
            };

            glyph.draw(|x, y, v| {
                #[allow(clippy::cast_possible_wrap)]
                let (x, y) = (bounding_box.min.x + x as i32, bounding_box.min.y + y as i32);
                let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                    return;
                };
                if x >= width || y >= height {
                    return;
                }

                let pixel = canvas.get_pixel_mut(x, y);
                pixel.0[0] = crate::raster::cover(pixel.0[0], v);
            });
        }
    }
}
