//! Module responsible for measuring and rendering caption text.
//!
//! Glyph-level work is delegated to a `Typeface`, while this module
//! handles multi-line blocks of text: their overall size
//! and centered drawing of the individual lines.

mod fit;
mod split;
#[cfg(test)]
pub(crate) mod testing;

pub use self::fit::maximize;
pub use self::split::split;


use image::{DynamicImage, GenericImage, GenericImageView, Pixel, Rgba};

use model::Color;


/// Vertical gap between lines of a multi-line text block, in pixels.
pub const LINE_SPACING: f32 = 4.0;


/// A font which can measure and draw single lines of text.
///
/// Font sizes are in pixels. Measurement must be a pure function
/// of the text & size, and text width must not decrease as the size grows.
pub trait Typeface {
    /// Size (width, height) in pixels of a single line of text.
    fn line_size(&self, text: &str, size: u32) -> (f32, f32);

    /// Draw a single line of text whose bounding box starts at `origin`
    /// (the top-left corner).
    fn draw_line(&self, img: &mut DynamicImage,
                 text: &str, size: u32, origin: (f32, f32), color: Color);
}

impl<'t, T: Typeface + ?Sized> Typeface for &'t T {
    #[inline]
    fn line_size(&self, text: &str, size: u32) -> (f32, f32) {
        (**self).line_size(text, size)
    }

    #[inline]
    fn draw_line(&self, img: &mut DynamicImage,
                 text: &str, size: u32, origin: (f32, f32), color: Color) {
        (**self).draw_line(img, text, size, origin, color)
    }
}


/// Distance between the tops of two consecutive lines of text.
fn line_pitch<F: Typeface + ?Sized>(face: &F, size: u32) -> f32 {
    let (_, height) = face.line_size("A", size);
    height + LINE_SPACING
}

/// Compute the size (width, height) of a possibly multi-line block of text.
pub fn block_size<F: Typeface + ?Sized>(face: &F, text: &str, size: u32) -> (f32, f32) {
    let pitch = line_pitch(face, size);
    let mut line_count = 0;
    let mut width: f32 = 0.0;
    for line in text.split('\n') {
        let (line_width, _) = face.line_size(line, size);
        width = width.max(line_width);
        line_count += 1;
    }
    (width, line_count as f32 * pitch - LINE_SPACING)
}

/// Draw a possibly multi-line block of text, centering each line
/// within the width of the whole block.
pub fn draw_block<F: Typeface + ?Sized>(face: &F, img: &mut DynamicImage,
                                        text: &str, size: u32,
                                        origin: (f32, f32), color: Color) {
    let (block_width, _) = block_size(face, text, size);
    let pitch = line_pitch(face, size);

    let (x, mut y) = origin;
    for line in text.split('\n') {
        let (line_width, _) = face.line_size(line, size);
        let left = x + (block_width - line_width) / 2.0;
        face.draw_line(img, line, size, (left, y), color);
        y += pitch;
    }
}


/// Blend a pixel of given color (with its alpha used as coverage)
/// into the image, ignoring coordinates that fall outside of it.
pub(crate) fn blend_pixel(img: &mut DynamicImage, x: i32, y: i32, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if !img.in_bounds(x, y) {
        return;
    }
    let mut pixel = img.get_pixel(x, y);
    pixel.blend(&color);
    img.put_pixel(x, y, pixel);
}


#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, RgbImage};
    use spectral::prelude::*;
    use model::Color;
    use super::{block_size, blend_pixel, draw_block, LINE_SPACING};
    use super::testing::{Monospace, Recording};

    #[test]
    fn block_size_single_line() {
        let (width, height) = block_size(&Monospace, "abcd", 10);
        assert_eq!(24.0, width);
        assert_eq!(10.0, height);
    }

    #[test]
    fn block_size_two_lines() {
        let (width, height) = block_size(&Monospace, "ab\nabcd", 10);
        assert_eq!(24.0, width);
        assert_eq!(10.0 + LINE_SPACING + 10.0, height);
    }

    #[test]
    fn block_size_empty() {
        let (width, height) = block_size(&Monospace, "", 20);
        assert_eq!(0.0, width);
        assert_eq!(20.0, height);
    }

    #[test]
    fn draw_block_centers_lines() {
        let face = Recording::new();
        let mut img = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
        draw_block(&face, &mut img, "ab\nabcd", 10, (5.0, 7.0), Color::white());

        let draws = face.draws();
        assert_that!(draws).has_length(2);
        // The shorter line is shifted right by half the width difference.
        assert_eq!("ab", draws[0].text);
        assert_eq!((5.0 + 6.0, 7.0), draws[0].origin);
        assert_eq!("abcd", draws[1].text);
        assert_eq!((5.0, 7.0 + 10.0 + LINE_SPACING), draws[1].origin);
    }

    #[test]
    fn blend_pixel_out_of_bounds() {
        let mut img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        blend_pixel(&mut img, -1, 0, Color::white().to_rgba(255));
        blend_pixel(&mut img, 0, 2, Color::white().to_rgba(255));
        assert_that!(img.to_rgb8().pixels().all(|p| p.0 == [0, 0, 0])).is_true();
    }

    #[test]
    fn blend_pixel_opaque() {
        let mut img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        blend_pixel(&mut img, 1, 1, Color::white().to_rgba(255));
        assert_eq!([255, 255, 255, 255], img.get_pixel(1, 1).0);
        assert_eq!([0, 0, 0, 255], img.get_pixel(0, 0).0);
    }
}
