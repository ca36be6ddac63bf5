use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{available_parallelism, RenderConfig, DEFAULT_TEXT};
use crate::error::Result;
use crate::font::{FontSource, Hinting};
use crate::tone::ToneMode;

/// Command line arguments of the `text2png` binary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Pixel per inch resolution
    #[arg(long, default_value_t = 92.0)]
    pub dpi: f64,
    /// Directory where the output png is stored
    #[arg(long, default_value = ".")]
    pub dst: PathBuf,
    /// TrueType/OpenType font file to use [default: embedded DejaVu Sans]
    #[arg(long)]
    pub ttf: Option<String>,
    /// Text to render
    #[arg(long, default_value = DEFAULT_TEXT)]
    pub text: String,
    /// Point size of the font
    #[arg(long, default_value_t = 16.0)]
    pub pt: f64,
    /// Use sRGB gamma correction, ignoring --gamma
    #[arg(long)]
    pub srgb: bool,
    /// Correct for the specified gamma value; 1 disables correction
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub gamma: f64,
    /// Glyph metric rounding
    #[arg(long, value_enum, default_value_t = Hinting::Full)]
    pub hinting: Hinting,
    /// Number of chunks to tone map in parallel [default: available processors]
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,
}

impl Args {
    /// Builds the render configuration.
    ///
    /// # Errors
    /// [`crate::Error::InvalidGamma`] for `--gamma 0` without `--srgb`.
    pub fn into_config(self) -> Result<RenderConfig> {
        let tone = if self.srgb { ToneMode::Srgb } else { ToneMode::gamma(self.gamma)? };
        let font = match self.ttf {
            Some(path) if !path.is_empty() => FontSource::File(PathBuf::from(path)),
            _ => FontSource::Embedded,
        };

        Ok(RenderConfig {
            point_size: self.pt,
            dpi: self.dpi,
            dst: self.dst,
            font,
            text: self.text,
            tone,
            hinting: self.hinting,
            parallelism: self.jobs.unwrap_or_else(available_parallelism),
        })
    }
}
