use std::io;
use std::path::PathBuf;

/// Everything that can abort a render.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The font file could not be read.
    #[error("failed to read font file {}", path.display())]
    FontRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The font data is not a font `rusttype` understands.
    #[error("failed to parse font data from {origin}")]
    FontParse {
        /// Where the bytes came from, for the diagnostic.
        origin: String,
    },

    /// The font parsed but no usable face could be built from it.
    #[error("failed to create face: {0}")]
    Face(String),

    /// Gamma must be non-zero.
    #[error("invalid gamma value {0}")]
    InvalidGamma(f64),

    /// Point size and DPI must be positive finite numbers.
    #[error("invalid {name} {value}: expected a positive number")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The computed canvas does not fit in 32-bit image dimensions.
    #[error("canvas of {width}x{height} pixels is too large")]
    CanvasSize {
        /// Requested width in pixels.
        width: f64,
        /// Requested height in pixels.
        height: f64,
    },

    /// The destination directory could not be created.
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("failed to create {}", path.display())]
    CreateFile {
        /// File that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// PNG encoding or the final flush failed.
    #[error("failed to encode png {}", path.display())]
    Encode {
        /// File that was being written.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
