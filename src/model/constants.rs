//! Module defining constants relevant to the data model.

use super::color::Color;


/// Name of the font used when no font override is given.
pub const DEFAULT_FONT: &'static str = "titilliumweb-black";

/// Name of the template style used when no style override is given.
pub const DEFAULT_STYLE: &'static str = "default";

/// Color of the caption fill.
pub const TEXT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Color of the caption outline.
/// This should be the inversion of TEXT_COLOR.
pub const OUTLINE_COLOR: Color = Color(0x0, 0x0, 0x0);


/// Bounding box that images are shrunk into when no size override is given.
pub const DEFAULT_MAX_SIZE: (u32, u32) = (400, 400);

/// Bounding box dimension used for whichever of width/height is not overridden
/// (provided the other one is).
pub const OVERRIDE_MAX_DIMENSION: u32 = 2000;
