//! Module implementing the actual captioning task.
//! Most if not all rendering logic lives here.

use std::cmp;
use std::fmt;

use image::{DynamicImage, GenericImageView, ImageFormat};
use image::imageops::FilterType;

use model::{bounding_box, Text, OUTLINE_COLOR, TEXT_COLOR};
use resources::Background;
use text::{self, Typeface};
use super::layout::{self, FittedCaption};
use super::output::RenderedImage;


/// Font size that corresponds to a single pixel of the text outline's thickness.
const OUTLINE_SIZE_RATIO: u32 = 25;


/// Everything that's needed to render a single image macro.
pub struct RenderRequest<'f, F: Typeface + ?Sized + 'f> {
    /// Image to put the captions on.
    pub background: Background,
    /// Font to render the captions with.
    pub font: &'f F,
    /// Text of the top and bottom captions.
    pub text: Text,
    /// Maximum width of the result (if it is to be different from the default).
    pub width: Option<u32>,
    /// Maximum height of the result (if it is to be different from the default).
    pub height: Option<u32>,
}

impl<'f, F: Typeface + ?Sized + 'f> RenderRequest<'f, F> {
    #[inline]
    pub fn new(background: Background, font: &'f F, text: Text) -> Self {
        RenderRequest{background, font, text, width: None, height: None}
    }

    #[inline]
    pub fn width(mut self, width: Option<u32>) -> Self {
        self.width = width; self
    }

    #[inline]
    pub fn height(mut self, height: Option<u32>) -> Self {
        self.height = height; self
    }
}

impl<'f, F: Typeface + ?Sized + 'f> fmt::Debug for RenderRequest<'f, F> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("RenderRequest")
            .field("background", &self.background)
            .field("text", &self.text)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}


/// Render the image macro described by given request.
#[inline]
pub fn render<'f, F: Typeface + ?Sized + 'f>(request: RenderRequest<'f, F>) -> RenderedImage {
    CaptionTask::new(request).perform()
}


/// Represents a single captioning task and contains all the relevant logic.
///
/// The task owns the background image for its whole duration
/// and hands it over to the resulting `RenderedImage`.
struct CaptionTask<'f, F: Typeface + ?Sized + 'f> {
    request: RenderRequest<'f, F>,
}

impl<'f, F: Typeface + ?Sized + 'f> CaptionTask<'f, F> {
    #[inline]
    fn new(request: RenderRequest<'f, F>) -> Self {
        CaptionTask{request}
    }

    /// Perform the captioning task.
    fn perform(self) -> RenderedImage {
        debug!("Rendering {:?}", self.request);
        let RenderRequest{background, font, text, width, height} = self.request;

        let (img, format) = normalize(background);
        let mut img = resize(img, bounding_box(width, height));
        let dimensions = img.dimensions();
        if text.is_empty() {
            debug!("No caption text, returning the {}x{} background as is",
                dimensions.0, dimensions.1);
            return RenderedImage::new(img, format);
        }

        for caption in text.captions() {
            if caption.text.is_empty() {
                debug!("Empty {:?} caption text, skipping.", caption.position);
                continue;
            }
            let fitted = layout::layout(font, &caption, dimensions);
            debug!("Rendering {:?} caption at {:?} with font size {}: {:?}",
                caption.position, fitted.position, fitted.size, fitted.text);
            draw_outlined(font, &mut img, &fitted);
        }

        RenderedImage::new(img, format)
    }
}


/// Make sure the image is either RGB or RGBA,
/// and pick the output format based on the format it was loaded from.
fn normalize(background: Background) -> (DynamicImage, ImageFormat) {
    let (img, source_format) = background.into_parts();
    let format = match source_format {
        ImageFormat::Jpeg => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => (img, format),
        img => if format == ImageFormat::Jpeg {
            trace!("Converting {:?} image to RGB...", img.color());
            (DynamicImage::ImageRgb8(img.to_rgb8()), ImageFormat::Jpeg)
        } else {
            trace!("Converting {:?} image to RGBA...", img.color());
            (DynamicImage::ImageRgba8(img.to_rgba8()), ImageFormat::Png)
        },
    }
}

/// Shrink the image to fit within given bounding box, preserving its aspect ratio.
/// Images that already fit are left alone.
fn resize(img: DynamicImage, max_size: (u32, u32)) -> DynamicImage {
    let (orig_width, orig_height) = img.dimensions();
    trace!("Original size of the background image: {}x{}", orig_width, orig_height);

    let (width, height) = fit_within((orig_width, orig_height), max_size);
    if (width, height) == (orig_width, orig_height) {
        debug!("Using original background image size of {}x{}", width, height);
        return img;
    }

    debug!("Resizing background image from {}x{} to {}x{}",
        orig_width, orig_height, width, height);
    img.resize_exact(width, height, FilterType::Lanczos3)
}

/// Compute the largest dimensions with the original aspect ratio
/// that fit within the bounding box, without ever enlarging.
fn fit_within((width, height): (u32, u32), (max_width, max_height): (u32, u32)) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let ratio = f64::min(max_width as f64 / width as f64, max_height as f64 / height as f64);
    let scale = |dim: u32, max_dim: u32| {
        let scaled = (dim as f64 * ratio).round() as u32;
        cmp::max(1, cmp::min(scaled, max_dim))
    };
    (scale(width, max_width), scale(height, max_height))
}

/// Draw white caption text with a black outline around it.
fn draw_outlined<F: Typeface + ?Sized>(face: &F, img: &mut DynamicImage, caption: &FittedCaption) {
    let thickness = cmp::max(1, caption.size / OUTLINE_SIZE_RATIO) as i32;
    trace!("Outline thickness of caption at font size {}: {}", caption.size, thickness);

    let (x, y) = caption.position;
    for dx in -thickness..thickness + 1 {
        for dy in -thickness..thickness + 1 {
            let origin = (x + dx as f32, y + dy as f32);
            text::draw_block(face, img, &caption.text, caption.size, origin, OUTLINE_COLOR);
        }
    }
    text::draw_block(face, img, &caption.text, caption.size, caption.position, TEXT_COLOR);
}


#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, LumaA, ImageBuffer,
                RgbImage, RgbaImage};
    use spectral::prelude::*;
    use model::{Color, Text};
    use resources::Background;
    use text::testing::{Monospace, Recording};
    use super::{draw_outlined, fit_within, normalize, render, RenderRequest};
    use super::super::layout::FittedCaption;

    fn background(width: u32, height: u32, format: ImageFormat) -> Background {
        Background::new(DynamicImage::ImageRgb8(RgbImage::new(width, height)), format)
    }

    #[test]
    fn fit_within_small_image() {
        assert_eq!((300, 200), fit_within((300, 200), (400, 400)));
        assert_eq!((400, 400), fit_within((400, 400), (400, 400)));
    }

    #[test]
    fn fit_within_shrinks_preserving_aspect() {
        assert_eq!((400, 300), fit_within((800, 600), (400, 400)));
        assert_eq!((300, 400), fit_within((600, 800), (400, 400)));
        assert_eq!((500, 250), fit_within((1000, 500), (500, 2000)));
        assert_eq!((1, 400), fit_within((2, 2000), (400, 400)));
    }

    #[test]
    fn fit_within_never_exceeds_box() {
        for &(w, h) in [(1000, 333), (333, 1000), (1234, 5678), (7, 3000)].iter() {
            for &(mw, mh) in [(400, 400), (100, 2000), (2000, 50)].iter() {
                let (nw, nh) = fit_within((w, h), (mw, mh));
                assert_that!(nw).is_less_than_or_equal_to(mw);
                assert_that!(nh).is_less_than_or_equal_to(mh);
                if nw > 1 && nh > 1 {
                    let original = w as f64 / h as f64;
                    let resized = nw as f64 / nh as f64;
                    // Within a pixel's worth of rounding on the shorter side.
                    let tolerance = original / nw.min(nh) as f64 + 1.0 / nh as f64;
                    assert_that!((original - resized).abs()).is_less_than_or_equal_to(tolerance);
                }
            }
        }
    }

    #[test]
    fn normalize_keeps_rgb_jpeg() {
        let (img, format) = normalize(background(10, 10, ImageFormat::Jpeg));
        assert_eq!(ImageFormat::Jpeg, format);
        assert_that!(img.as_rgb8()).is_some();
    }

    #[test]
    fn normalize_grayscale_jpeg_to_rgb() {
        let bg = Background::new(DynamicImage::ImageLuma8(GrayImage::new(10, 10)),
                                 ImageFormat::Jpeg);
        let (img, format) = normalize(bg);
        assert_eq!(ImageFormat::Jpeg, format);
        assert_that!(img.as_rgb8()).is_some();
    }

    #[test]
    fn normalize_grayscale_png_to_rgba() {
        let gray: ImageBuffer<LumaA<u8>, Vec<u8>> = ImageBuffer::new(10, 10);
        let bg = Background::new(DynamicImage::ImageLumaA8(gray), ImageFormat::Png);
        let (img, format) = normalize(bg);
        assert_eq!(ImageFormat::Png, format);
        assert_that!(img.as_rgba8()).is_some();
    }

    #[test]
    fn normalize_other_formats_to_png() {
        let bg = Background::new(DynamicImage::ImageRgba8(RgbaImage::new(10, 10)),
                                 ImageFormat::Gif);
        let (img, format) = normalize(bg);
        assert_eq!(ImageFormat::Png, format);
        assert_that!(img.as_rgba8()).is_some();
    }

    #[test]
    fn default_bounding_box() {
        let face = Monospace;
        let request = RenderRequest::new(background(800, 600, ImageFormat::Png), &face,
                                         Text::default());
        let output = render(request);
        assert_eq!((400, 300), output.dimensions());
        assert_eq!(ImageFormat::Png, output.format());
    }

    #[test]
    fn overridden_bounding_box() {
        let face = Monospace;
        let request = RenderRequest::new(background(3000, 1500, ImageFormat::Jpeg), &face,
                                         Text::default())
            .width(Some(1000));
        let output = render(request);
        assert_eq!((1000, 500), output.dimensions());
        assert_eq!(ImageFormat::Jpeg, output.format());
    }

    #[test]
    fn zero_size_override_is_ignored() {
        let face = Monospace;
        let request = RenderRequest::new(background(800, 600, ImageFormat::Png), &face,
                                         Text::default())
            .width(Some(0));
        assert_eq!((400, 300), render(request).dimensions());

        let request = RenderRequest::new(background(3000, 1500, ImageFormat::Png), &face,
                                         Text::default())
            .width(Some(0)).height(Some(500));
        assert_eq!((1000, 500), render(request).dimensions());
    }

    #[test]
    fn no_upscaling() {
        let face = Monospace;
        let request = RenderRequest::new(background(100, 50, ImageFormat::Png), &face,
                                         Text::default())
            .width(Some(1000)).height(Some(1000));
        assert_eq!((100, 50), render(request).dimensions());
    }

    #[test]
    fn empty_text_leaves_background_alone() {
        let face = Recording::new();
        let request = RenderRequest::new(background(50, 50, ImageFormat::Png), &face,
                                         Text::default());
        let output = render(request);
        assert_that!(face.draws()).is_empty();
        assert_that!(output.image().to_rgb8().pixels().all(|p| p.0 == [0, 0, 0])).is_true();
    }

    #[test]
    fn outline_single_pixel() {
        let face = Recording::new();
        let mut img = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
        let caption = FittedCaption{
            text: "Hello there".into(), size: 24, position: (10.0, 20.0)};
        draw_outlined(&face, &mut img, &caption);

        let draws = face.draws();
        assert_that!(draws).has_length(10);
        assert_that!(draws[..9].iter().all(|d| d.color == Color::black())).is_true();
        assert_eq!(Color::white(), draws[9].color);
        assert_eq!((10.0, 20.0), draws[9].origin);
        assert_eq!((9.0, 19.0), draws[0].origin);
        assert_eq!((11.0, 21.0), draws[8].origin);
    }

    #[test]
    fn outline_thicker_for_large_text() {
        let face = Recording::new();
        let mut img = DynamicImage::ImageRgb8(RgbImage::new(300, 300));
        let caption = FittedCaption{text: "Hi".into(), size: 75, position: (0.0, 0.0)};
        draw_outlined(&face, &mut img, &caption);

        // Thickness of 3 means a 7x7 grid of outline passes.
        let draws = face.draws();
        assert_that!(draws).has_length(7 * 7 + 1);
        assert_eq!(Color::white(), draws[49].color);
    }

    #[test]
    fn outline_per_line() {
        let face = Recording::new();
        let mut img = DynamicImage::ImageRgb8(RgbImage::new(300, 300));
        let caption = FittedCaption{text: "two\nlines".into(), size: 10, position: (0.0, 0.0)};
        draw_outlined(&face, &mut img, &caption);
        assert_that!(face.draws()).has_length(2 * (9 + 1));
    }

    #[test]
    fn square_image_end_to_end() {
        let face = Recording::new();
        let request = RenderRequest::new(background(500, 500, ImageFormat::Jpeg), &face,
                                         Text::new("A", "B"))
            .width(Some(500)).height(Some(500));
        let output = render(request);
        assert_eq!((500, 500), output.dimensions());
        assert_eq!(ImageFormat::Jpeg, output.format());

        // Font size 100 means outline thickness of 4, i.e. 81 outline passes.
        let draws = face.draws();
        assert_that!(draws).has_length(2 * (81 + 1));
        assert_that!(draws.iter().all(|d| d.size == 100)).is_true();

        let top = &draws[81];
        assert_eq!("A", top.text);
        assert_eq!(Color::white(), top.color);
        assert_eq!((250.0 - 30.0, 0.0), top.origin);

        let bottom = &draws[2 * 81 + 1];
        assert_eq!("B", bottom.text);
        assert_eq!(Color::white(), bottom.color);
        assert_that!(bottom.origin.1).is_close_to(500.0 - 100.0 * 7.0 / 6.0, 0.001);

        // The white fill is visible in the middle of the top caption
        // (Monospace draws solid boxes).
        assert_eq!([255, 255, 255, 255], output.image().get_pixel(250, 50).0);
    }
}
