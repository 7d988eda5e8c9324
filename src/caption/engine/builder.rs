//! Module implementing the builder for `Engine`.

use std::error;
use std::fmt;
use std::path::{Path, PathBuf};

use resources::{FontLoader, TemplateLoader};
use super::config::Config;
use super::{Engine, Inner};


/// Builder for `Engine`.
#[derive(Debug, Default)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    template_directory: Option<PathBuf>,
    font_directory: Option<PathBuf>,
    output_directory: Option<PathBuf>,

    jpeg_quality: Option<u8>,
    default_font: Option<String>,
}

impl Builder {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}

// Setters.
impl Builder {
    /// Set the directory where the templates will be loaded from.
    #[inline]
    pub fn template_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.template_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the directory where the fonts will be loaded from.
    #[inline]
    pub fn font_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.font_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the root directory where the rendered images will be saved.
    #[inline]
    pub fn output_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.output_directory = Some(directory.as_ref().to_owned()); self
    }

    /// Set the quality percentage of JPEG images generated by the `Engine`.
    #[inline]
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality); self
    }

    /// Set the font used for captions when no other one is requested.
    #[inline]
    pub fn default_font<S: Into<String>>(mut self, font: S) -> Self {
        self.default_font = Some(font.into()); self
    }
}

// Validation & building.
impl Builder {
    /// Build the `Engine`.
    pub fn build(self) -> Result<Engine, Error> {
        let config = self.build_config()?;
        let template_directory = self.template_directory.ok_or(Error::NoDirectory("template"))?;
        let font_directory = self.font_directory.ok_or(Error::NoDirectory("font"))?;
        let output_directory = self.output_directory.ok_or(Error::NoDirectory("output"))?;

        trace!("Building Engine with templates in {}, fonts in {}, output in {}",
            template_directory.display(), font_directory.display(),
            output_directory.display());
        Ok(Engine::from(Inner{
            config,
            template_loader: TemplateLoader::new(template_directory),
            font_loader: FontLoader::new(font_directory),
            output_directory,
        }))
    }

    #[doc(hidden)]
    fn build_config(&self) -> Result<Config, Error> {
        let mut config = Config::default();
        if let Some(quality) = self.jpeg_quality {
            if quality == 0 || quality > 100 {
                return Err(Error::JpegQuality(quality));
            }
            config.jpeg_quality = quality;
        }
        if let Some(ref font) = self.default_font {
            if font.is_empty() {
                return Err(Error::DefaultFont);
            }
            config.default_font = font.clone();
        }
        Ok(config)
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// One of the required directories hasn't been set.
    NoDirectory(&'static str),
    /// JPEG quality outside of the 1-100 range.
    JpegQuality(u8),
    /// Empty default font name.
    DefaultFont,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoDirectory(what) => write!(fmt, "no {} directory configured", what),
            Error::JpegQuality(q) => write!(fmt, "invalid JPEG quality: {}%", q),
            Error::DefaultFont => write!(fmt, "default font name cannot be empty"),
        }
    }
}
