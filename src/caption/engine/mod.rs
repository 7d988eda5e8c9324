//! Module which defines the captioning engine.

mod builder;
mod config;

pub use self::builder::{Builder, Error as BuildError};
pub use self::config::Config;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use artifact;
use model::{Overrides, Text};
use resources::{FontLoader, Loader, TemplateLoader};
use super::error::CaptionError;
use super::output::RenderedImage;
use super::task::{render, RenderRequest};


/// Image captioning engine.
///
/// The engine is thread-safe (`Sync`) so that multiple image macros
/// can be rendered in parallel, each in its own thread.
/// Templates and fonts are loaded anew for every image macro.
///
/// *Note*: `Engine` implements `Clone`
/// by merely cloning a shared reference to the underlying object.
#[derive(Clone, Debug)]
pub struct Engine {
    inner: Arc<Inner>,
}

/// Shared state of the engine.
#[derive(Debug)]
struct Inner {
    config: Config,
    template_loader: TemplateLoader,
    font_loader: FontLoader,
    output_directory: PathBuf,
}

impl From<Inner> for Engine {
    fn from(inner: Inner) -> Self {
        Engine{inner: Arc::new(inner)}
    }
}

// Constructors.
impl Engine {
    /// Create an Engine which loads templates & fonts from given directory paths
    /// and saves the rendered images under the output directory.
    ///
    /// For other ways of creating `Engine`, see the `EngineBuilder`.
    pub fn new<Dt, Df, Do>(template_directory: Dt, font_directory: Df,
                           output_directory: Do) -> Self
        where Dt: AsRef<Path>, Df: AsRef<Path>, Do: AsRef<Path>
    {
        Engine::from(Inner{
            config: Config::default(),
            template_loader: TemplateLoader::new(template_directory),
            font_loader: FontLoader::new(font_directory),
            output_directory: output_directory.as_ref().to_owned(),
        })
    }
}

impl Engine {
    /// Read the `Engine`'s configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Root directory of the rendered images.
    #[inline]
    pub fn output_directory(&self) -> &Path {
        &self.inner.output_directory
    }
}

// Image macro captioning.
impl Engine {
    /// Render an image macro by captioning the template with given text.
    ///
    /// Note that captioning is a CPU-intensive process and can be relatively lengthy.
    /// It is recommended to execute it in a separate thread.
    pub fn caption(&self, template: &str, text: &Text,
                   overrides: &Overrides) -> Result<RenderedImage, CaptionError> {
        let overrides = self.normalize(overrides);

        let background = self.inner.template_loader
            .load_style(template, overrides.style.as_ref().map(|s| s.as_str()))
            .map_err(|e| CaptionError::Template(template.to_owned(), e))?;

        let font_name = overrides.font.as_ref().unwrap_or(&self.inner.config.default_font);
        trace!("Loading font `{}`...", font_name);
        let font = self.inner.font_loader.load(font_name)
            .map_err(|e| CaptionError::Font(font_name.clone(), e))?;
        font.check(&text.top);
        font.check(&text.bottom);

        let request = RenderRequest::new(background, &font, text.clone())
            .width(overrides.width)
            .height(overrides.height);
        Ok(render(request))
    }

    /// Path where the image macro is saved by `generate`.
    ///
    /// The path is the same for the same template, text, and (effective) overrides.
    pub fn path(&self, template: &str, text: &Text, overrides: &Overrides) -> PathBuf {
        artifact::locate(&self.inner.output_directory, template,
                         &text.fingerprint(), &self.normalize(overrides))
    }

    /// Render an image macro and save it under the output directory.
    ///
    /// Any existing file is overwritten. Returns the path of the saved image.
    pub fn generate(&self, template: &str, text: &Text,
                    overrides: &Overrides) -> Result<PathBuf, CaptionError> {
        let path = self.path(template, text, overrides);
        let image = self.caption(template, text, overrides)?;
        artifact::persist(&image, &path, self.inner.config.jpeg_quality)?;
        Ok(path)
    }

    /// Remove the overrides which only restate the defaults,
    /// so that they don't affect the image macro's path.
    fn normalize(&self, overrides: &Overrides) -> Overrides {
        let config = &self.inner.config;
        let mut result = overrides.clone();
        if result.style.as_ref() == Some(&config.default_style) {
            result.style = None;
        }
        if result.font.as_ref() == Some(&config.default_font) {
            result.font = None;
        }
        result
    }
}
