use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder, ImageError};

use crate::error::{Error, Result};

/// Writes `image` as PNG to `path`, creating missing parent directories.
///
/// The file is removed again if encoding fails part way.
///
/// # Errors
/// [`Error::CreateDir`], [`Error::CreateFile`] or [`Error::Encode`].
pub fn write_png(path: &Path, image: &GrayImage) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| Error::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;

    finish(path, BufWriter::new(file), image)
}

/// Encodes into `out`, removing `path` if that fails.
fn finish<W: Write>(path: &Path, out: W, image: &GrayImage) -> Result<()> {
    if let Err(source) = encode(out, image) {
        if let Err(err) = std::fs::remove_file(path) {
            log::warn!("could not remove partial output {}: {err}", path.display());
        }
        return Err(Error::Encode {
            path: path.to_path_buf(),
            source,
        });
    }

    log::debug!("wrote {}x{} png to {}", image.width(), image.height(), path.display());
    Ok(())
}

fn encode<W: Write>(mut out: W, image: &GrayImage) -> std::result::Result<(), ImageError> {
    PngEncoder::new(&mut out).write_image(image.as_raw(), image.width(), image.height(), ColorType::L8)?;
    out.flush()?;
    Ok(())
}
