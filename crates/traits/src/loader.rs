//! The `Loader` capability for resolving resource paths.
//!
//! A loader turns a path into a readable stream or a [`Locator`]. A path with
//! no backing resource is reported as `None`, never as an error.

use crate::{Locator, ResourceError};
use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{Cursor, Read};
use std::sync::{Arc, RwLock};

/// A byte stream handed out by a loader.
///
/// Ownership moves to the caller; dropping the stream releases it.
pub type ResourceStream = Box<dyn Read + Send>;

/// Shared resource data type (reference-counted bytes).
pub type SharedResourceData = Arc<Vec<u8>>;

/// Resolves resource paths to streams and locators.
///
/// Loaders take paths exactly as given. Whether a leading `/` is meaningful
/// is up to the implementation; the filesystem and in-memory loaders treat
/// paths as root-relative and never resolve one that starts with `/`.
///
/// # Example
///
/// ```
/// use r4rs_traits::{InMemoryLoader, Loader};
/// use std::io::Read;
///
/// let loader = InMemoryLoader::new();
/// loader.add("fixtures/hello.txt", b"hello".to_vec()).unwrap();
///
/// let mut text = String::new();
/// loader.open("fixtures/hello.txt").unwrap().read_to_string(&mut text).unwrap();
/// assert_eq!(text, "hello");
/// assert!(loader.open("/fixtures/hello.txt").is_none());
/// ```
pub trait Loader: Send + Sync + Debug {
    /// Opens the resource at `path`, or returns `None` if there is none.
    fn open(&self, path: &str) -> Option<ResourceStream>;

    /// Produces a locator for the resource at `path`, or `None` if there is none.
    fn locate(&self, path: &str) -> Option<Locator>;

    /// Returns a human-readable name for this loader (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<L: Loader + ?Sized> Loader for Arc<L> {
    fn open(&self, path: &str) -> Option<ResourceStream> {
        (**self).open(path)
    }

    fn locate(&self, path: &str) -> Option<Locator> {
        (**self).locate(path)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<L: Loader + ?Sized> Loader for Box<L> {
    fn open(&self, path: &str) -> Option<ResourceStream> {
        (**self).open(path)
    }

    fn locate(&self, path: &str) -> Option<Locator> {
        (**self).locate(path)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<L: Loader + ?Sized> Loader for &L {
    fn open(&self, path: &str) -> Option<ResourceStream> {
        (**self).open(path)
    }

    fn locate(&self, path: &str) -> Option<Locator> {
        (**self).locate(path)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// An in-memory loader.
///
/// Resources are stored in memory and must be pre-populated before use.
/// Locators have the form `memory:/<path>`.
#[derive(Debug, Default)]
pub struct InMemoryLoader {
    resources: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Poisoned` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        self.add_shared(path, Arc::new(data))
    }

    /// Add a resource from shared data.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Poisoned` if the internal lock is poisoned.
    pub fn add_shared(
        &self,
        path: impl Into<String>,
        data: SharedResourceData,
    ) -> Result<(), ResourceError> {
        let mut resources = self
            .resources
            .write()
            .map_err(|_| ResourceError::Poisoned)?;
        resources.insert(path.into(), data);
        Ok(())
    }

    fn get(&self, path: &str) -> Option<SharedResourceData> {
        self.resources.read().ok()?.get(path).cloned()
    }
}

/// Cursor over shared bytes so opening a resource does not copy it.
struct SharedCursor(Cursor<SharedResourceData>);

impl Read for SharedCursor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let cursor = &mut self.0;
        let data: &[u8] = cursor.get_ref();
        let start = (cursor.position() as usize).min(data.len());
        let n = (&data[start..]).read(buf)?;
        cursor.set_position((start + n) as u64);
        Ok(n)
    }
}

impl Loader for InMemoryLoader {
    fn open(&self, path: &str) -> Option<ResourceStream> {
        let data = self.get(path)?;
        Some(Box::new(SharedCursor(Cursor::new(data))))
    }

    fn locate(&self, path: &str) -> Option<Locator> {
        self.get(path)?;
        Some(Locator::new(format!("memory:/{}", path)))
    }

    fn name(&self) -> &'static str {
        "InMemoryLoader"
    }
}
