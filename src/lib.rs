//! Renders a line of text to a tone-corrected grayscale PNG.
//!
//! Text is drawn black on white into a 16-bit canvas, reduced to 8 bits with
//! an optional sRGB or power-law gamma transfer function, and written to a
//! file whose name records the parameters used.
//!
//! # Usage
//! ```
//! # fn test() -> Result<(), text2png::Error> {
//! use text2png::{RenderConfig, ToneMode};
//!
//! let config = RenderConfig {
//!     text: "A".to_owned(),
//!     tone: ToneMode::gamma(2.2)?,
//!     ..RenderConfig::default()
//! };
//! assert_eq!(config.file_name(), "output_16pt_92dpi_gamma_2.2_dejavusans.png");
//!
//! let rendered = text2png::render(&config)?;
//! assert_eq!(rendered.image.width(), rendered.layout.width);
//! # Ok(())
//! # }
//! # test().unwrap();
//! ```

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod font;
mod layout;
mod raster;
mod render;
mod tone;
mod writer;

pub use config::{available_parallelism, RenderConfig, DEFAULT_TEXT};
pub use error::{Error, Result};
pub use font::{Face, FaceMetrics, FontSource, Hinting, TextFace, DEFAULT_FONT, DEFAULT_FONT_NAME};
pub use layout::{Layout, MAX_PIXELS};
pub use raster::{blank_canvas, cover, rasterize, Canvas};
pub use render::{render, run, Rendered};
pub use tone::{tone_map, ToneMode};
pub use writer::write_png;

#[cfg(feature = "bin")]
mod cli;

#[cfg(feature = "bin")]
pub use cli::Args;
