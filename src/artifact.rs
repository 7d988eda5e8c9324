//! Module for locating and saving rendered image macros on disk.
//!
//! The path of a rendered image is derived solely from the template,
//! the caption text, and the overrides applied to it:
//!
//! ```text
//! {root}/{template}/{fingerprint}[#{digest}].img
//! ```
//!
//! where `digest` is only present if any of the overrides is set.
//! Concurrent writers of the same path are not coordinated
//! (the last one to finish wins).

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use caption::{CaptionError, RenderedImage};
use model::{dimension, Overrides};


/// File extension of saved image macros.
///
/// It doesn't reflect the actual image format, since the path is determined
/// before the image is rendered.
pub const FILE_EXTENSION: &'static str = "img";


/// Compute a digest of the overrides as a hex string.
///
/// Missing values (and zero dimensions) hash the same as empty strings.
pub fn digest(style: Option<&str>, font: Option<&str>,
              width: Option<u32>, height: Option<u32>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(style.unwrap_or("").as_bytes());
    hasher.update(font.unwrap_or("").as_bytes());
    hasher.update(dimension(width).map(|w| w.to_string()).unwrap_or_default().as_bytes());
    hasher.update(dimension(height).map(|h| h.to_string()).unwrap_or_default().as_bytes());
    hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect()
}

/// Determine the path where an image macro should be saved.
pub fn locate<P: AsRef<Path>>(root: P, template: &str, fingerprint: &str,
                              overrides: &Overrides) -> PathBuf {
    let base = root.as_ref().join(template).join(fingerprint);

    let mut path = OsString::from(base);
    if !overrides.is_default() {
        let slug = digest(overrides.style.as_ref().map(|s| s.as_str()),
                          overrides.font.as_ref().map(|f| f.as_str()),
                          overrides.width, overrides.height);
        path.push("#");
        path.push(slug);
    }
    path.push(".");
    path.push(FILE_EXTENSION);
    PathBuf::from(path)
}

/// Save a rendered image macro at given path, creating any missing directories.
///
/// An existing file at the path is overwritten.
pub fn persist<P: AsRef<Path>>(image: &RenderedImage, path: P,
                               jpeg_quality: u8) -> Result<(), CaptionError> {
    let path = path.as_ref();
    let bytes = image.encode(jpeg_quality).map_err(CaptionError::Encode)?;

    if let Some(directory) = path.parent() {
        if !directory.is_dir() {
            trace!("Creating directory {}", directory.display());
            fs::create_dir_all(directory)
                .map_err(|e| CaptionError::Persist(path.to_owned(), e))?;
        }
    }

    info!("Saving image: {}", path.display());
    fs::write(path, &bytes).map_err(|e| {
        error!("Failed to write {} byte(s) to {}: {}", bytes.len(), path.display(), e);
        CaptionError::Persist(path.to_owned(), e)
    })
}
