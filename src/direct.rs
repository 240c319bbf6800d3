//! Resolution anchored to the defining unit.
//!
//! The defining unit is the loader this library itself was set up with,
//! plus a home prefix that relative paths resolve against. Resource paths
//! are passed to it verbatim; the unit's own name resolution decides what a
//! leading `/` means:
//!
//! - `/fixtures/hello.txt` resolves to `fixtures/hello.txt` from the root
//! - `hello.txt` resolves to `<home>/hello.txt`
//!
//! Plain lookups report a missing resource as `None`. The `as_string`
//! family also reports an unreadable resource as `None`; use
//! [`read_string`] to tell the two apart.

use crate::config::LoaderConfig;
use crate::encoding;
use crate::read;
use encoding_rs::Encoding;
use r4rs_traits::{Loader, Locator, Resource, ResourceError, ResourceStream};
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};
use url::Url;

static DEFINING_UNIT: OnceLock<DefiningUnit> = OnceLock::new();

/// A loader together with the home prefix of the unit that owns it.
#[derive(Debug, Clone)]
pub struct DefiningUnit {
    loader: Arc<dyn Loader>,
    home: String,
    encoding: Option<&'static Encoding>,
}

impl DefiningUnit {
    /// Creates a unit over `loader` whose relative paths resolve below `home`.
    ///
    /// Surrounding separators on `home` are ignored.
    pub fn new(loader: Arc<dyn Loader>, home: impl Into<String>) -> Self {
        let home = home.into();
        Self {
            loader,
            home: home.trim_matches('/').to_string(),
            encoding: None,
        }
    }

    /// Uses `encoding` instead of the platform default for `as_string`.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// The loader names are resolved against.
    pub fn loader(&self) -> &Arc<dyn Loader> {
        &self.loader
    }

    /// Home prefix, without surrounding separators.
    pub fn home(&self) -> &str {
        &self.home
    }

    /// Encoding used by [`as_string`] when none is given.
    pub fn default_encoding(&self) -> &'static Encoding {
        self.encoding.unwrap_or_else(encoding::platform_default)
    }

    /// Maps a unit-relative name to a loader path.
    pub fn resolve_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if let Some(absolute) = name.strip_prefix('/') {
            Cow::Borrowed(absolute)
        } else if self.home.is_empty() {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(format!("{}/{}", self.home, name))
        }
    }

    /// Opens the resource `name` resolves to.
    pub fn open(&self, name: &str) -> Option<ResourceStream> {
        let path = self.resolve_name(name);
        log::trace!("defining unit: opening '{}' via {}", path, self.loader.name());
        self.loader.open(&path)
    }

    /// Locates the resource `name` resolves to.
    pub fn locate(&self, name: &str) -> Option<Locator> {
        let path = self.resolve_name(name);
        log::trace!("defining unit: locating '{}' via {}", path, self.loader.name());
        self.loader.locate(&path)
    }
}

/// Returns the process-wide defining unit.
///
/// Unless one was installed with [`install_defining_unit`], it is built from
/// [`LoaderConfig::from_env`] on first use.
pub fn defining_unit() -> &'static DefiningUnit {
    DEFINING_UNIT.get_or_init(|| {
        let config = LoaderConfig::from_env();
        log::debug!("defining unit rooted at {}", config.root.display());
        config.into_defining_unit()
    })
}

/// Installs the process-wide defining unit.
///
/// # Errors
///
/// Returns `ResourceError::AlreadyInstalled` once a unit is in place,
/// including one built lazily by [`defining_unit`].
pub fn install_defining_unit(unit: DefiningUnit) -> Result<(), ResourceError> {
    DEFINING_UNIT
        .set(unit)
        .map_err(|_| ResourceError::AlreadyInstalled)
}

/// Opens `resource` from the defining unit. The caller owns the stream.
pub fn as_stream(resource: &(impl Resource + ?Sized)) -> Option<ResourceStream> {
    as_stream_in(defining_unit(), resource)
}

/// Opens `resource` from `unit`. The caller owns the stream.
pub fn as_stream_in(
    unit: &DefiningUnit,
    resource: &(impl Resource + ?Sized),
) -> Option<ResourceStream> {
    unit.open(resource.path())
}

/// Reads `resource` as text in the unit's default encoding.
pub fn as_string(resource: &(impl Resource + ?Sized)) -> Option<String> {
    as_string_in(defining_unit(), resource)
}

/// Reads `resource` as text in `encoding`.
pub fn as_string_with(
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Option<String> {
    as_string_with_in(defining_unit(), resource, encoding)
}

/// Reads `resource` from `unit` in the unit's default encoding.
pub fn as_string_in(unit: &DefiningUnit, resource: &(impl Resource + ?Sized)) -> Option<String> {
    as_string_with_in(unit, resource, unit.default_encoding())
}

/// Reads `resource` from `unit` in `encoding`; `None` if missing or unreadable.
pub fn as_string_with_in(
    unit: &DefiningUnit,
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Option<String> {
    let path = resource.path();
    read::read_string_lossy(as_stream_in(unit, resource), path, encoding)
}

/// Like [`as_string_with`], but says why no text was produced.
pub fn read_string(
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Result<String, ResourceError> {
    read_string_in(defining_unit(), resource, encoding)
}

/// Like [`as_string_with_in`], but says why no text was produced.
pub fn read_string_in(
    unit: &DefiningUnit,
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Result<String, ResourceError> {
    read::read_string(as_stream_in(unit, resource), resource.path(), encoding)
}

/// The defining unit's locator for `resource`.
pub fn as_url(resource: &(impl Resource + ?Sized)) -> Option<Locator> {
    as_url_in(defining_unit(), resource)
}

/// `unit`'s locator for `resource`.
pub fn as_url_in(unit: &DefiningUnit, resource: &(impl Resource + ?Sized)) -> Option<Locator> {
    unit.locate(resource.path())
}

/// The resource's locator as a URI.
///
/// # Errors
///
/// Returns `ResourceError::InvalidUri` when the locator is not valid URI
/// syntax. A missing resource is `Ok(None)`.
pub fn as_uri(resource: &(impl Resource + ?Sized)) -> Result<Option<Url>, ResourceError> {
    as_uri_in(defining_unit(), resource)
}

/// [`as_uri`] against an explicit unit.
pub fn as_uri_in(
    unit: &DefiningUnit,
    resource: &(impl Resource + ?Sized),
) -> Result<Option<Url>, ResourceError> {
    read::to_uri(as_url_in(unit, resource))
}
