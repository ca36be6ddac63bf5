use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::font::{FontSource, Hinting};
use crate::tone::ToneMode;

/// Default text when none is given.
pub const DEFAULT_TEXT: &str = "This is a test";

/// Everything one render needs, built once and passed to each stage.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Font size in points.
    pub point_size: f64,
    /// Resolution in pixels per inch.
    pub dpi: f64,
    /// Directory the PNG is written to.
    pub dst: PathBuf,
    /// Font to render with.
    pub font: FontSource,
    /// The line of text.
    pub text: String,
    /// Tone correction applied when reducing to 8 bits.
    pub tone: ToneMode,
    /// Glyph metric rounding.
    pub hinting: Hinting,
    /// Number of chunks the tone mapper splits the image into.
    pub parallelism: NonZeroUsize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            point_size: 16.0,
            dpi: 92.0,
            dst: PathBuf::from("."),
            font: FontSource::Embedded,
            text: DEFAULT_TEXT.to_owned(),
            tone: ToneMode::Identity,
            hinting: Hinting::Full,
            parallelism: available_parallelism(),
        }
    }
}

/// Number of processing units, or one if that cannot be determined.
#[must_use]
pub fn available_parallelism() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

impl RenderConfig {
    /// Rejects parameters that cannot produce an image.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] for a non-positive or non-finite point
    /// size or DPI, [`Error::InvalidGamma`] for a zero gamma.
    pub fn validate(&self) -> Result<()> {
        positive("point size", self.point_size)?;
        positive("dpi", self.dpi)?;
        self.tone.validate()
    }

    /// `output_<pt>pt_<dpi>dpi_<tone>_<font>.png`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "output_{}pt_{}dpi_{}_{}.png",
            format_number(self.point_size),
            format_number(self.dpi),
            self.tone,
            self.font.name()
        )
    }

    /// [`Self::file_name`] inside the destination directory.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.dst.join(self.file_name())
    }
}

/// Shortest round-trip digits, switching to `1e-05` / `1.5e+06` notation
/// below 1e-4 and from 1e6 up.
pub(crate) fn format_number(v: f64) -> String {
    let scientific = format!("{v:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return v.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return v.to_string();
    };

    if v == 0.0 || (-4..6).contains(&exponent) {
        v.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}
