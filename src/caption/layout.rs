//! Module for fitting captions to the image and placing them on it.

use std::cmp;

use itertools::Itertools;

use model::{Caption, Position};
use text::{self, Typeface};


/// Horizontal space left free on each side of a caption, in pixels.
pub const HORIZONTAL_MARGIN: u32 = 10;


/// Font size limits for captions on an image of particular dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    /// Largest font size a single-line caption can use.
    pub max_font_size: u32,
    /// Smallest font size at which a caption is still kept as a single line.
    pub min_font_size_single_line: u32,
    /// Maximum width of a single line of caption text.
    pub max_line_width: f32,
}

impl Limits {
    /// Compute the limits for an image of given size.
    pub fn for_image(width: u32, height: u32) -> Self {
        Limits{
            max_font_size: height / 5,
            min_font_size_single_line: height / 12,
            max_line_width: width as f32 - (2 * HORIZONTAL_MARGIN) as f32,
        }
    }
}


/// A caption that has been fitted to the image.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedCaption {
    /// Final text, with a line break if the caption was split.
    pub text: String,
    /// Font size to render the text with.
    pub size: u32,
    /// Top-left corner of the caption's text block.
    pub position: (f32, f32),
}


/// Fit a caption onto an image of given dimensions.
pub fn layout<F: Typeface + ?Sized>(face: &F, caption: &Caption,
                                    (width, height): (u32, u32)) -> FittedCaption {
    let limits = Limits::for_image(width, height);
    let (size, text) = fit(face, &caption.text, &limits);
    let position = position(face, &text, size, caption.position, (width, height));
    FittedCaption{text, size, position}
}

/// Choose the font size for caption text, splitting it in two lines
/// if it's too long to fit on one line at the minimum single line font size.
///
/// Returns the font size and the final text.
pub fn fit<F: Typeface + ?Sized>(face: &F, text: &str, limits: &Limits) -> (u32, String) {
    let single_line_size = cmp::max(limits.min_font_size_single_line, 1);
    let (single_line_width, _) = face.line_size(text, single_line_size);
    let phrases = if single_line_width > limits.max_line_width {
        text::split(text)
    } else {
        vec![text]
    };
    trace!("Caption text of length {} laid out in {} line(s)", text.len(), phrases.len());

    // Sizes above the line width in pixels are never considered.
    let width_cap = if limits.max_line_width >= 1.0 { limits.max_line_width as u32 } else { 1 };

    let mut size = limits.max_font_size / phrases.len() as u32;
    for phrase in &phrases {
        let ceiling = cmp::min(size, width_cap);
        size = cmp::min(size, text::maximize(face, phrase, limits.max_line_width, ceiling));
    }
    let size = cmp::max(size, 1);

    (size, phrases.into_iter().join("\n"))
}

/// Compute the top-left corner of caption text block
/// so that it is centered horizontally and anchored at its edge of the image.
pub fn position<F: Typeface + ?Sized>(face: &F, text: &str, size: u32, position: Position,
                                      (width, height): (u32, u32)) -> (f32, f32) {
    let (text_width, text_height) = text::block_size(face, text, size);
    let x = width as f32 / 2.0 - text_width / 2.0;
    let y = match position {
        Position::Top => 0.0,
        // Leave an extra sixth of the text height below the last line.
        Position::Bottom => height as f32 - text_height * 7.0 / 6.0,
    };
    (x, y)
}
