//! Module implementing image captioning.

mod engine;
mod error;
mod layout;
mod output;
mod task;


pub use self::engine::{Builder as EngineBuilder,
                       BuildError as EngineBuildError,
                       Config as EngineConfig,
                       Engine};
pub use self::error::CaptionError;
pub use self::layout::{fit, layout, position, FittedCaption, Limits, HORIZONTAL_MARGIN};
pub use self::output::RenderedImage;
pub use self::task::{render, RenderRequest};
