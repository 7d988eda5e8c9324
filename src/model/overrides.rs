//! Module implementing the `Overrides` type.

use std::fmt;

use super::constants::{DEFAULT_MAX_SIZE, OVERRIDE_MAX_DIMENSION};


/// Optional deviations from the default rendering of an image macro.
///
/// Any field left as `None` means "use the default".
#[derive(Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Overrides {
    /// Alternate background of the template.
    #[serde(default)]
    pub style: Option<String>,
    /// Font to render the captions with.
    #[serde(default)]
    pub font: Option<String>,
    /// Maximum width of the rendered image.
    #[serde(default)]
    pub width: Option<u32>,
    /// Maximum height of the rendered image.
    #[serde(default)]
    pub height: Option<u32>,
}

impl Overrides {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn style<S: Into<String>>(mut self, style: S) -> Self {
        self.style = Some(style.into()); self
    }

    #[inline]
    pub fn font<S: Into<String>>(mut self, font: S) -> Self {
        self.font = Some(font.into()); self
    }

    #[inline]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width); self
    }

    #[inline]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height); self
    }
}

impl Overrides {
    /// Whether nothing is overridden.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.style.is_none() && self.font.is_none() && !self.has_size()
    }

    /// Whether either of the image dimensions is overridden.
    ///
    /// A dimension of zero counts as not overridden.
    #[inline]
    pub fn has_size(&self) -> bool {
        dimension(self.width).is_some() || dimension(self.height).is_some()
    }

    /// The bounding box that the background image is shrunk to fit in.
    #[inline]
    pub fn max_size(&self) -> (u32, u32) {
        bounding_box(self.width, self.height)
    }
}

/// The bounding box for an image with optionally overridden dimensions.
/// Zero dimensions are treated as missing.
pub fn bounding_box(width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    match (dimension(width), dimension(height)) {
        (None, None) => DEFAULT_MAX_SIZE,
        (width, height) => (width.unwrap_or(OVERRIDE_MAX_DIMENSION),
                            height.unwrap_or(OVERRIDE_MAX_DIMENSION)),
    }
}

/// An image dimension override, unless it's zero.
#[inline]
pub fn dimension(value: Option<u32>) -> Option<u32> {
    value.filter(|&v| v > 0)
}

impl fmt::Debug for Overrides {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("Overrides");

        macro_rules! fmt_opt_field {
            ($name:ident) => (
                if let Some(ref $name) = self.$name {
                    ds.field(stringify!($name), $name);
                }
            );
        }
        fmt_opt_field!(style);
        fmt_opt_field!(font);
        fmt_opt_field!(width);
        fmt_opt_field!(height);

        ds.finish()
    }
}
