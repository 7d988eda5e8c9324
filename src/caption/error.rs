//! Captioning error.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use image::ImageError;

use resources::{BackgroundError, FontError};


/// Error that may occur during the captioning.
#[derive(Debug)]
pub enum CaptionError {
    /// Template background couldn't be loaded.
    Template(String, BackgroundError),
    /// Font couldn't be loaded.
    Font(String, FontError),
    /// The final image couldn't be encoded.
    Encode(ImageError),
    /// The final image couldn't be written to its destination.
    Persist(PathBuf, io::Error),
}

impl Error for CaptionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            CaptionError::Template(_, ref e) => Some(e),
            CaptionError::Font(_, ref e) => Some(e),
            CaptionError::Encode(ref e) => Some(e),
            CaptionError::Persist(_, ref e) => Some(e),
        }
    }
}

impl fmt::Display for CaptionError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CaptionError::Template(ref t, ref e) => write!(fmt, "cannot load template `{}`: {}", t, e),
            CaptionError::Font(ref f, ref e) => write!(fmt, "cannot load font `{}`: {}", f, e),
            CaptionError::Encode(ref e) => write!(fmt, "failed to encode the final image: {}", e),
            CaptionError::Persist(ref p, ref e) =>
                write!(fmt, "failed to write the final image to {}: {}", p.display(), e),
        }
    }
}
