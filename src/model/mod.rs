//! Module defining the data model.

mod caption;
mod color;
mod constants;
mod overrides;

pub use self::caption::{Caption, Position, Positions, Text};
pub use self::color::Color;
pub use self::constants::*;
pub use self::overrides::{bounding_box, dimension, Overrides};
