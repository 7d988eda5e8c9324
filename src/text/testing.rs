//! Typefaces with predictable metrics, for use in tests.

use std::cell::RefCell;

use image::DynamicImage;

use model::Color;
use super::{blend_pixel, Typeface};


/// Fake typeface where every character is a solid box
/// 3/5 of the font size wide and exactly as high as the font size.
#[derive(Clone, Copy, Debug, Default)]
pub struct Monospace;

impl Typeface for Monospace {
    fn line_size(&self, text: &str, size: u32) -> (f32, f32) {
        let chars = text.chars().count() as u32;
        ((chars * size * 3) as f32 / 5.0, size as f32)
    }

    fn draw_line(&self, img: &mut DynamicImage,
                 text: &str, size: u32, origin: (f32, f32), color: Color) {
        let (width, height) = self.line_size(text, size);
        let (left, top) = (origin.0.round() as i32, origin.1.round() as i32);
        for y in top..top + height as i32 {
            for x in left..left + width as i32 {
                blend_pixel(img, x, y, color.to_rgba(0xff));
            }
        }
    }
}


/// A single `Typeface::draw_line` call.
#[derive(Clone, Debug, PartialEq)]
pub struct Draw {
    pub text: String,
    pub size: u32,
    pub origin: (f32, f32),
    pub color: Color,
}

/// `Monospace` typeface which remembers all the lines it has drawn.
#[derive(Debug, Default)]
pub struct Recording {
    draws: RefCell<Vec<Draw>>,
}

impl Recording {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> Vec<Draw> {
        self.draws.borrow().clone()
    }
}

impl Typeface for Recording {
    fn line_size(&self, text: &str, size: u32) -> (f32, f32) {
        Monospace.line_size(text, size)
    }

    fn draw_line(&self, img: &mut DynamicImage,
                 text: &str, size: u32, origin: (f32, f32), color: Color) {
        self.draws.borrow_mut().push(Draw{text: text.to_owned(), size, origin, color});
        Monospace.draw_line(img, text, size, origin, color)
    }
}
