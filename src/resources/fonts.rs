//! Module for loading fonts used in image macros.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

use image::DynamicImage;
use rusttype::{self, point, GlyphId, Scale};

use model::Color;
use text::{blend_pixel, Typeface};
use super::Loader;
use super::filesystem::{BytesLoader, PathLoader};


pub const FILE_EXTENSION: &'static str = "ttf";


macro_attr! {
    /// Font that can be used to caption image macros.
    #[derive(NewtypeDeref!, NewtypeFrom!)]
    pub struct Font(rusttype::Font<'static>);
}

impl Font {
    /// Parse a font from the bytes of a TrueType file.
    ///
    /// Font collections are only accepted if they contain exactly one font.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        if let Some(count) = ttf_parser::fonts_in_collection(&bytes) {
            if count != 1 {
                return Err(FontError::Collection(count as usize));
            }
        }
        rusttype::Font::try_from_vec(bytes).map(Font).ok_or(FontError::Invalid)
    }

    /// Check if the font has all the glyphs for given text.
    ///
    /// Returns the characters that are missing and logs a warning if there are any.
    pub fn check(&self, text: &str) -> BTreeSet<char> {
        let missing: BTreeSet<_> = text.chars()
            .filter(|c| !c.is_whitespace())
            .filter(|&c| self.glyph(c).id() == GlyphId(0))
            .collect();
        if !missing.is_empty() {
            warn!("Missing glyphs for {} codepoint(s): {}", missing.len(),
                missing.iter().map(|&c| format!("{:#x}", c as u32))
                    .collect::<Vec<_>>().join(", "));
        }
        missing
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({} glyph(s))", self.glyph_count())
    }
}

impl Typeface for Font {
    fn line_size(&self, text: &str, size: u32) -> (f32, f32) {
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.v_metrics(scale);

        // Width is the final X position of the "caret"
        // after laying out all the glyphs, starting from X=0.
        let width = self.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let height = v_metrics.ascent - v_metrics.descent;  // descent is negative
        (width, height)
    }

    fn draw_line(&self, img: &mut DynamicImage,
                 text: &str, size: u32, origin: (f32, f32), color: Color) {
        let scale = Scale::uniform(size as f32);
        let v_metrics = self.v_metrics(scale);
        let baseline = point(origin.0, origin.1 + v_metrics.ascent);

        for glyph in self.layout(text, scale, baseline) {
            if let Some(bbox) = glyph.pixel_bounding_box() {
                glyph.draw(|x, y, v| {
                    let x = bbox.min.x + x as i32;
                    let y = bbox.min.y + y as i32;
                    let alpha = (v * 255f32) as u8;
                    blend_pixel(img, x, y, color.to_rgba(alpha));
                });
            }
        }
    }
}


/// Error that may occur while loading a font.
#[derive(Debug)]
pub enum FontError {
    /// The font file couldn't be found or read.
    File(io::Error),
    /// The file doesn't contain a usable TrueType font.
    Invalid,
    /// The file is a font collection with other than exactly one font.
    Collection(usize),
}
derive_enum_from!(io::Error => FontError::File);

impl Error for FontError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            FontError::File(ref e) => Some(e),
            FontError::Invalid | FontError::Collection(_) => None,
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FontError::File(ref e) => write!(fmt, "cannot read font file: {}", e),
            FontError::Invalid => write!(fmt, "not a valid TrueType font"),
            FontError::Collection(0) => write!(fmt, "font collection is empty"),
            FontError::Collection(c) =>
                write!(fmt, "font collection contains {} fonts, expected one", c),
        }
    }
}


/// Loader of fonts from a directory of TrueType files.
#[derive(Clone, Debug)]
pub struct FontLoader {
    inner: BytesLoader,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(
                PathLoader::for_extension(directory, FILE_EXTENSION))
        }
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load<'n>(&self, name: &'n str) -> Result<Font, Self::Err> {
        let bytes = self.inner.load(name)?;
        let font = Font::from_bytes(bytes).map_err(|e| {
            match e {
                FontError::Collection(0) =>
                    error!("No fonts in a file for `{}` font resource", name),
                FontError::Collection(c) =>
                    error!("Font file for `{}` resource contains {} fonts, expected one",
                        name, c),
                _ => error!("File for `{}` font resource is not a valid font", name),
            }
            e
        })?;
        debug!("Font `{}` loaded successfully", name);
        Ok(font)
    }
}
