//! Defines the output of a captioning operation.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, ImageOutputFormat};
use mime::{self, Mime};


/// A rendered image macro, ready to be encoded.
#[derive(Clone, Debug)]
#[must_use = "unused caption output which must be used"]
pub struct RenderedImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl RenderedImage {
    #[inline]
    pub(super) fn new(image: DynamicImage, format: ImageFormat) -> Self {
        RenderedImage{image, format}
    }
}

impl RenderedImage {
    /// Image format that the output should be encoded as.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// The rendered raster.
    #[inline]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The MIME type that matches output's format.
    pub fn mime_type(&self) -> Mime {
        match self.format {
            ImageFormat::Jpeg => mime::IMAGE_JPEG,
            _ => mime::IMAGE_PNG,
        }
    }

    /// Usual file extension for output's format.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "jpg",
            _ => "png",
        }
    }
}

impl RenderedImage {
    /// Encode the image as bytes of its format.
    ///
    /// `jpeg_quality` (in %) is only used for JPEG output.
    pub fn encode(&self, jpeg_quality: u8) -> Result<Vec<u8>, ImageError> {
        debug!("Encoding final image as {:?}...", self.format);

        let mut cursor = Cursor::new(Vec::new());
        match self.format {
            ImageFormat::Jpeg => {
                trace!("Writing JPEG with quality {}", jpeg_quality);
                // JPEG has no alpha channel, so it must go.
                let rgb = match self.image {
                    DynamicImage::ImageRgb8(_) => None,
                    ref img => Some(DynamicImage::ImageRgb8(img.to_rgb8())),
                };
                rgb.as_ref().unwrap_or(&self.image)
                    .write_to(&mut cursor, ImageOutputFormat::Jpeg(jpeg_quality))?;
            }
            _ => {
                trace!("Writing PNG image");
                self.image.write_to(&mut cursor, ImageOutputFormat::Png)?;
            }
        }

        let bytes = cursor.into_inner();
        trace!("Encoded image has {} byte(s)", bytes.len());
        Ok(bytes)
    }
}
