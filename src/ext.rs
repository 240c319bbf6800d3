//! Method-call sugar over [`crate::direct`].

use crate::direct;
use encoding_rs::Encoding;
use r4rs_traits::{Locator, Resource, ResourceError, ResourceStream};
use url::Url;

/// Loads any [`Resource`] through the defining unit.
///
/// ```no_run
/// use r4rs::{ResourceExt, StaticResource};
///
/// const BANNER: StaticResource = StaticResource::new("/banner.txt");
///
/// if let Some(text) = BANNER.as_string() {
///     println!("{text}");
/// }
/// ```
pub trait ResourceExt: Resource {
    fn as_stream(&self) -> Option<ResourceStream> {
        direct::as_stream(self)
    }

    /// Opens the resource and hands the stream to `f`.
    ///
    /// The stream is released when `f` returns. `None` if the resource is
    /// missing, in which case `f` is not called.
    fn use_stream<T>(&self, f: impl FnOnce(&mut ResourceStream) -> T) -> Option<T> {
        let mut stream = self.as_stream()?;
        Some(f(&mut stream))
    }

    fn as_string(&self) -> Option<String> {
        direct::as_string(self)
    }

    fn as_string_with(&self, encoding: &'static Encoding) -> Option<String> {
        direct::as_string_with(self, encoding)
    }

    fn as_url(&self) -> Option<Locator> {
        direct::as_url(self)
    }

    fn as_uri(&self) -> Result<Option<Url>, ResourceError> {
        direct::as_uri(self)
    }
}

impl<R: Resource + ?Sized> ResourceExt for R {}
