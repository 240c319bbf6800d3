//! Filesystem-based loader for native platforms.
//!
//! This loader resolves resources below a root directory with security
//! measures to prevent path traversal attacks.
//!
//! # Security
//!
//! The loader validates that all resolved paths remain within the root
//! to prevent directory traversal attacks (e.g., `../../../etc/passwd`).

use r4rs_traits::{Loader, Locator, ResourceStream};
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// A loader that resolves resources from a directory on the local filesystem.
///
/// Paths are resolved relative to the root directory. Like a host class
/// loader, a path that starts with `/` is never resolvable; callers that
/// carry absolute-style paths strip the separator first.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
    /// Canonicalized root for security checks
    canonical_root: Option<PathBuf>,
}

impl DirectoryLoader {
    /// Creates a new loader rooted at `root`.
    ///
    /// The root is canonicalized to enable security checks. It does not have
    /// to exist yet.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    /// Returns the root directory of this loader.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a resource path to an existing regular file below the root.
    ///
    /// Returns `None` for absolute paths, paths escaping the root, and
    /// anything that is not a file.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if path.starts_with('/') || relative.is_absolute() {
            log::trace!("{}: rejecting absolute path '{}'", self.name(), path);
            return None;
        }
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            log::debug!("{}: path traversal blocked for '{}'", self.name(), path);
            return None;
        }

        let full_path = self.root.join(relative);
        let canonical = full_path.canonicalize().ok()?;
        if let Some(ref root) = self.canonical_root
            && !canonical.starts_with(root)
        {
            // Escaped through a symlink
            log::debug!("{}: '{}' resolves outside the root", self.name(), path);
            return None;
        }

        canonical.is_file().then_some(canonical)
    }
}

impl Loader for DirectoryLoader {
    fn open(&self, path: &str) -> Option<ResourceStream> {
        let full_path = self.resolve(path)?;
        match File::open(&full_path) {
            Ok(file) => Some(Box::new(BufReader::new(file))),
            Err(e) => {
                log::debug!("{}: cannot open '{}': {}", self.name(), path, e);
                None
            }
        }
    }

    fn locate(&self, path: &str) -> Option<Locator> {
        let full_path = self.resolve(path)?;
        Url::from_file_path(&full_path).ok().map(Locator::from)
    }

    fn name(&self) -> &'static str {
        "DirectoryLoader"
    }
}
