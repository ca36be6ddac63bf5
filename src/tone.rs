//! Conversion of the 16-bit canvas to the 8-bit output image.
//!
//! Every output sample depends on exactly one input sample, so the buffer is
//! cut into disjoint chunks that are encoded in parallel.

use std::fmt;
use std::num::NonZeroUsize;

use image::GrayImage;
use rayon::prelude::*;

use crate::config::format_number;
use crate::error::{Error, Result};
use crate::raster::Canvas;

/// Transfer function applied while reducing to 8 bits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToneMode {
    /// Standard sRGB encoding of linear intensities.
    Srgb,
    /// Plain bit-depth reduction.
    Identity,
    /// `linear ^ (1 / gamma)`.
    Gamma(f64),
}

impl ToneMode {
    /// Power-law mode for `gamma`; exactly 1 is [`ToneMode::Identity`].
    ///
    /// # Errors
    /// [`Error::InvalidGamma`] for zero or NaN.
    #[allow(clippy::float_cmp)]
    pub fn gamma(gamma: f64) -> Result<Self> {
        if gamma == 0.0 || gamma.is_nan() {
            return Err(Error::InvalidGamma(gamma));
        }
        if gamma == 1.0 {
            Ok(ToneMode::Identity)
        } else {
            Ok(ToneMode::Gamma(gamma))
        }
    }

    pub(crate) fn validate(self) -> Result<()> {
        match self {
            ToneMode::Gamma(gamma) => ToneMode::gamma(gamma).map(drop),
            ToneMode::Srgb | ToneMode::Identity => Ok(()),
        }
    }

    /// Maps one 16-bit sample to 8 bits.
    #[must_use]
    pub fn encode(self, sample: u16) -> u8 {
        match self {
            ToneMode::Identity => {
                #[allow(clippy::cast_possible_truncation)]
                let reduced = ((u32::from(sample) + 128) / 257) as u8;
                reduced
            }
            ToneMode::Srgb => quantize(srgb_encode(linear(sample))),
            ToneMode::Gamma(gamma) => quantize(linear(sample).powf(gamma.recip())),
        }
    }
}

impl fmt::Display for ToneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneMode::Srgb => f.write_str("srgb"),
            ToneMode::Identity => f.write_str("gamma_1"),
            ToneMode::Gamma(gamma) => write!(f, "gamma_{}", format_number(*gamma)),
        }
    }
}

fn linear(sample: u16) -> f64 {
    f64::from(sample) / f64::from(u16::MAX)
}

fn srgb_encode(l: f64) -> f64 {
    if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

fn quantize(v: f64) -> u8 {
    // NaN lands on 0 through the saturating cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let q = (v * 255.0).round().clamp(0.0, 255.0) as u8;
    q
}

/// Encodes `canvas` into an 8-bit image using `parallelism` disjoint chunks.
#[must_use]
pub fn tone_map(canvas: &Canvas, mode: ToneMode, parallelism: NonZeroUsize) -> GrayImage {
    let (width, height) = canvas.dimensions();
    let mut out = GrayImage::new(width, height);

    let src: &[u16] = canvas;
    let chunk = src.len().div_ceil(parallelism.get()).max(1);
    log::debug!("tone mapping {} samples as {mode} in chunks of {chunk}", src.len());

    out.par_chunks_mut(chunk)
        .zip(src.par_chunks(chunk))
        .for_each(|(dst, src)| {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = mode.encode(s);
            }
        });

    out
}
