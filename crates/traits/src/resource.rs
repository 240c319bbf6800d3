//! The `Resource` capability: a value that names a resource by path.

use std::borrow::Cow;
use std::fmt;

/// Anything that identifies a loadable resource by path.
///
/// The path is analogous to a relative file path and may or may not start
/// with a `/`. It is not validated; an empty path is simply a path nothing
/// resolves.
pub trait Resource {
    fn path(&self) -> &str;
}

impl Resource for str {
    fn path(&self) -> &str {
        self
    }
}

impl Resource for String {
    fn path(&self) -> &str {
        self
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn path(&self) -> &str {
        (**self).path()
    }
}

/// An owned, immutable resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourcePath {
    path: Cow<'static, str>,
}

impl ResourcePath {
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self { path: path.into() }
    }
}

impl Resource for ResourcePath {
    fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl From<&'static str> for ResourcePath {
    fn from(path: &'static str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ResourcePath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// A resource path known at compile time.
///
/// ```
/// use r4rs_traits::{Resource, StaticResource};
///
/// pub const LOGO: StaticResource = StaticResource::new("/images/logo.png");
/// assert_eq!(LOGO.path(), "/images/logo.png");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticResource(&'static str);

impl StaticResource {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }
}

impl Resource for StaticResource {
    fn path(&self) -> &str {
        self.0
    }
}

impl fmt::Display for StaticResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
