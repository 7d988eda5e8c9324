//! Module for fitting text within a given width.

use std::cmp;

use super::Typeface;


/// Find the largest font size (not exceeding `ceiling`) at which a single line
/// of text is no wider than `max_width` pixels.
///
/// If the text doesn't fit even at size 1, size 1 is returned anyway.
pub fn maximize<F: Typeface + ?Sized>(face: &F, text: &str,
                                      max_width: f32, ceiling: u32) -> u32 {
    let mut size = cmp::max(ceiling, 1);
    let mut width = face.line_size(text, size).0;
    while width > max_width && size > 1 {
        size -= 1;
        width = face.line_size(text, size).0;
    }
    trace!("Text of length {} fits {} pixels at font size {} (width: {})",
        text.len(), max_width, size, width);
    size
}
