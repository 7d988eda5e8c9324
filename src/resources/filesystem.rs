//! Module defining and implementing file system resource loaders.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::iter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob::{self, Pattern};

use super::Loader;


/// Loader for file paths from given directory.
///
/// The resources here are just file *paths* (std::path::PathBuf),
/// and no substantial "loading" is performed (only path resolution).
///
/// This isn't particularly useful on its own, but can be wrapped around
/// to make more interesting loaders.
#[derive(Clone)]
pub struct PathLoader {
    directory: PathBuf,
    predicate: Arc<dyn Fn(&Path) -> bool + Send + Sync>,
}

impl PathLoader {
    #[inline]
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        Self::with_predicate(directory, |_| true)
    }

    #[inline]
    pub fn for_extension<D: AsRef<Path>, S>(directory: D, extension: S) -> Self
        where S: ToString
    {
        Self::for_extensions(directory, iter::once(extension))
    }

    /// Create a loader which only gives out paths to files
    /// that have one of the extensions given.
    pub fn for_extensions<D: AsRef<Path>, I, S>(directory: D, extensions: I) -> Self
        where I: IntoIterator<Item=S>, S: ToString
    {
        Self::with_predicate(directory, {
            let extensions: Vec<_> = extensions.into_iter()
                .map(|e| e.to_string()).map(|e| e.trim().to_lowercase())
                .collect();
            move |path| {
                let ext = path.extension().and_then(|e| e.to_str())
                    .map(|s| s.trim().to_lowercase());
                extensions.iter().any(|e| Some(e) == ext.as_ref())
            }
        })
    }

    pub fn with_predicate<D, P>(directory: D, predicate: P) -> Self
        where D: AsRef<Path>, P: Fn(&Path) -> bool + Send + Sync + 'static
    {
        PathLoader{
            directory: directory.as_ref().to_owned(),
            predicate: Arc::new(predicate),
        }
    }
}

impl Loader for PathLoader {
    type Item = PathBuf;
    type Err = io::Error;

    /// "Load" a path "resource" from the loader's directory.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        check_name(name)?;
        let directory = Pattern::escape(&format!("{}", self.directory.display()));
        let pattern = format!("{}/{}.*", directory, Pattern::escape(name));
        trace!("Globbing with {}", pattern);

        let glob_iter = glob::glob(&pattern).map_err(|e| {
            error!("Failed to glob over files with {}: {}", pattern, e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;
        let matches: Vec<_> = glob_iter
            .filter_map(|entry| entry.map_err(|e| {
                warn!("Unreadable entry while looking for resource `{}`: {}", name, e);
            }).ok())
            .filter(|f| (self.predicate)(f))
            .collect();

        match matches.len() {
            0 => Err(io::Error::new(io::ErrorKind::NotFound,
                format!("resource `{}` not found in {}", name, self.directory.display()))),
            1 => Ok(matches.into_iter().next().unwrap()),
            c => Err(io::Error::new(io::ErrorKind::InvalidInput,
                format!("ambiguous resource name `{}` matching {} files in {}",
                    name, c, self.directory.display()))),
        }
    }
}

impl fmt::Debug for PathLoader {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("PathLoader")
            .field("directory", &self.directory)
            .finish()
    }
}


/// Make sure a resource name cannot refer to anything outside of its directory.
pub(super) fn check_name(name: &str) -> io::Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(|c: char| c == '/' || c == '\\') {
        return Err(io::Error::new(io::ErrorKind::InvalidInput,
            format!("invalid resource name `{}`", name)));
    }
    Ok(())
}


/// Wrapper around PathLoader that loads the entire content of the files.
#[derive(Clone, Debug)]
pub struct BytesLoader {
    inner: PathLoader,
}

impl BytesLoader {
    #[inline]
    pub fn new(inner: PathLoader) -> Self {
        BytesLoader{inner}
    }
}
impl From<PathLoader> for BytesLoader {
    fn from(input: PathLoader) -> Self {
        Self::new(input)
    }
}

impl Loader for BytesLoader {
    type Item = Vec<u8>;
    type Err = io::Error;

    /// Load a file resource as its byte content.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        let path = self.inner.load(name)?;
        let file = File::open(&path)?;

        let mut bytes = match file.metadata() {
            Ok(stat) => Vec::with_capacity(stat.len() as usize),
            Err(e) => {
                warn!("Failed to stat file of resource `{}` to obtain its size: {}",
                    name, e);
                Vec::new()
            },
        };

        let mut reader = BufReader::new(file);
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}


#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use spectral::prelude::*;
    use tempfile::tempdir;
    use super::{BytesLoader, Loader, PathLoader};

    #[test]
    fn finds_file_with_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("impact.ttf"), b"font").unwrap();
        fs::write(dir.path().join("impact.txt"), b"notes").unwrap();

        let loader = PathLoader::for_extension(dir.path(), "ttf");
        assert_eq!(dir.path().join("impact.ttf"), loader.load("impact").unwrap());
    }

    #[test]
    fn extension_is_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("default.JPG"), b"jpeg").unwrap();

        let loader = PathLoader::for_extensions(dir.path(), &["jpg", "png"]);
        assert_that!(loader.load("default")).is_ok();
    }

    #[test]
    fn missing() {
        let dir = tempdir().unwrap();
        let loader = PathLoader::new(dir.path());
        let err = loader.load("nope").unwrap_err();
        assert_eq!(io::ErrorKind::NotFound, err.kind());
    }

    #[test]
    fn ambiguous() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("default.jpg"), b"jpeg").unwrap();
        fs::write(dir.path().join("default.png"), b"png").unwrap();

        let loader = PathLoader::for_extensions(dir.path(), &["jpg", "png"]);
        let err = loader.load("default").unwrap_err();
        assert_eq!(io::ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn rejects_path_traversal() {
        let dir = tempdir().unwrap();
        let loader = PathLoader::new(dir.path());
        for name in ["", "..", "../etc", "a/b"].iter() {
            let err = loader.load(name).unwrap_err();
            assert_eq!(io::ErrorKind::InvalidInput, err.kind());
        }
    }

    #[test]
    fn glob_characters_are_literal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("abc.ttf"), b"font").unwrap();
        let loader = PathLoader::new(dir.path());
        assert_that!(loader.load("a*")).is_err();
        assert_that!(loader.load("a?c")).is_err();
    }

    #[test]
    fn loads_bytes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("data.bin"), b"\x00\x01\x02").unwrap();
        let loader = BytesLoader::new(PathLoader::new(dir.path()));
        assert_eq!(vec![0u8, 1, 2], loader.load("data").unwrap());
    }
}
