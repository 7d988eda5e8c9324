//! Module handling image macro templates and their backgrounds.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use image::{self, DynamicImage, GenericImageView, ImageError, ImageFormat};
use image::io::Reader;

use model::DEFAULT_STYLE;
use super::Loader;
use super::filesystem::{check_name, PathLoader};


lazy_static! {
    /// Map of background file extensions to supported image formats.
    pub static ref IMAGE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "gif" => ImageFormat::Gif,
        "jpeg" => ImageFormat::Jpeg,
        "jpg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
    };
}


/// Decoded background image of an image macro, along with its source format.
#[derive(Clone)]
pub struct Background {
    image: DynamicImage,
    format: ImageFormat,
}

impl Background {
    #[inline]
    pub fn new(image: DynamicImage, format: ImageFormat) -> Self {
        Background{image, format}
    }

    /// Decode the background from an image file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BackgroundError> {
        let path = path.as_ref();
        trace!("Opening image {}", path.display());
        let reader = Reader::open(path)?.with_guessed_format()?;
        let format = reader.format().ok_or(BackgroundError::UnknownFormat)?;
        let image = reader.decode().map_err(|e| {
            error!("Failed to decode background image {}: {}", path.display(), e); e
        })?;
        Ok(Background::new(image, format))
    }

    /// Decode the background from the content of an image file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BackgroundError> {
        let format = image::guess_format(bytes)
            .map_err(|_| BackgroundError::UnknownFormat)?;
        let image = image::load_from_memory_with_format(bytes, format)?;
        Ok(Background::new(image, format))
    }
}

impl Background {
    #[inline]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Format the background was decoded from.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[inline]
    pub fn into_parts(self) -> (DynamicImage, ImageFormat) {
        (self.image, self.format)
    }
}

impl fmt::Debug for Background {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (width, height) = self.image.dimensions();
        write!(fmt, "Background({}x{}, {:?})", width, height, self.format)
    }
}


/// Error while loading a background image.
#[derive(Debug)]
pub enum BackgroundError {
    /// The image file couldn't be found or read.
    File(io::Error),
    /// Format of the image couldn't be recognized.
    UnknownFormat,
    /// The image couldn't be decoded.
    Decode(ImageError),
}
derive_enum_from!(io::Error => BackgroundError::File);
derive_enum_from!(ImageError => BackgroundError::Decode);

impl Error for BackgroundError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            BackgroundError::File(ref e) => Some(e),
            BackgroundError::UnknownFormat => None,
            BackgroundError::Decode(ref e) => Some(e),
        }
    }
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            BackgroundError::File(ref e) => write!(fmt, "cannot read image file: {}", e),
            BackgroundError::UnknownFormat => write!(fmt, "unrecognized image format"),
            BackgroundError::Decode(ref e) => write!(fmt, "cannot decode image: {}", e),
        }
    }
}


/// Loader of template backgrounds.
///
/// Every template is a directory with one image file per style,
/// e.g. `<directory>/<template>/default.png`.
#[derive(Clone, Debug)]
pub struct TemplateLoader {
    directory: PathBuf,
}

impl TemplateLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        TemplateLoader{directory: directory.as_ref().to_owned()}
    }

    /// Load the background for given style of a template.
    pub fn load_style(&self, template: &str,
                      style: Option<&str>) -> Result<Background, BackgroundError> {
        check_name(template)?;
        let style = style.unwrap_or(DEFAULT_STYLE);

        let styles = PathLoader::for_extensions(
            self.directory.join(template), IMAGE_FORMAT_EXTENSIONS.keys());
        let path = styles.load(style)?;
        debug!("Loading `{}` style of template `{}` from {}",
            style, template, path.display());
        Background::from_path(path)
    }
}

impl Loader for TemplateLoader {
    type Item = Background;
    type Err = BackgroundError;

    /// Load the default background of a template.
    fn load<'n>(&self, name: &'n str) -> Result<Background, Self::Err> {
        self.load_style(name, None)
    }
}
