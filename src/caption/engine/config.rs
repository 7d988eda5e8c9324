//! Module with captioning engine configuration.

use model::{DEFAULT_FONT, DEFAULT_STYLE};


/// Structure holding configuration for the `Engine`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Quality of the generated JPEG images (in %).
    pub jpeg_quality: u8,
    /// Font used when the request doesn't override it.
    pub default_font: String,
    /// Template style used when the request doesn't override it.
    pub default_style: String,
}

impl Default for Config {
    /// Initialize Config with default values.
    fn default() -> Self {
        Config {
            jpeg_quality: 85,
            default_font: DEFAULT_FONT.into(),
            default_style: DEFAULT_STYLE.into(),
        }
    }
}
