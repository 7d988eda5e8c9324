//!
//! memecap  -- Captions fitted onto image macro templates
//!

#[macro_use] extern crate enum_derive;
             extern crate glob;
             extern crate image;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate macro_attr;
#[macro_use] extern crate maplit;
             extern crate mime;
#[macro_use] extern crate newtype_derive;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
             extern crate sha2;
             extern crate ttf_parser;


#[cfg(test)] #[macro_use] extern crate serde_json;
#[cfg(test)] #[macro_use] extern crate spectral;
#[cfg(test)]              extern crate tempfile;


#[macro_use]
mod util;

pub mod artifact;
mod caption;
mod model;
mod resources;
pub mod text;


pub use caption::*;
pub use model::*;
pub use resources::*;
