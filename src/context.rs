//! Resolution through an explicit or thread-ambient loader.
//!
//! Every operation comes in two shapes: an `_in` form that takes the loader
//! to use, and a shorthand that uses the calling thread's context loader as
//! it is at call time. Paths are normalized first: exactly one leading `/`
//! is stripped, since loaders resolve root-relative paths.
//!
//! Unlike [`crate::direct`], text is decoded as UTF-8 unless an encoding is
//! given.
//!
//! ```
//! use r4rs::context;
//! use r4rs::InMemoryLoader;
//! use std::sync::Arc;
//!
//! let loader = Arc::new(InMemoryLoader::new());
//! loader.add("fixtures/hello.txt", b"hello".to_vec()).unwrap();
//!
//! let _guard = context::scoped(loader);
//! assert_eq!(context::as_string("/fixtures/hello.txt").as_deref(), Some("hello"));
//! ```

use crate::direct::defining_unit;
use crate::read::{self, normalize};
use encoding_rs::{Encoding, UTF_8};
use r4rs_traits::{Loader, Locator, Resource, ResourceError, ResourceStream};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;

thread_local! {
    static CONTEXT_LOADER: RefCell<Option<Arc<dyn Loader>>> = const { RefCell::new(None) };
}

/// The calling thread's context loader.
///
/// Falls back to the defining unit's loader when the thread has none set.
/// Threads start without one; nothing is inherited from the spawning thread.
pub fn context_loader() -> Arc<dyn Loader> {
    CONTEXT_LOADER
        .with_borrow(|loader| loader.clone())
        .unwrap_or_else(|| Arc::clone(defining_unit().loader()))
}

/// Replaces the calling thread's context loader and returns the previous one.
pub fn set_context_loader(loader: Option<Arc<dyn Loader>>) -> Option<Arc<dyn Loader>> {
    CONTEXT_LOADER.replace(loader)
}

/// Sets the calling thread's context loader until the guard is dropped.
pub fn scoped(loader: Arc<dyn Loader>) -> ContextLoaderGuard {
    ContextLoaderGuard {
        previous: set_context_loader(Some(loader)),
        _thread_bound: PhantomData,
    }
}

/// Restores the previous context loader on drop.
#[must_use = "the context loader is restored as soon as the guard is dropped"]
pub struct ContextLoaderGuard {
    previous: Option<Arc<dyn Loader>>,
    // Must be dropped on the thread that created it
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for ContextLoaderGuard {
    fn drop(&mut self) {
        // Ignore a destroyed thread-local during thread teardown
        let previous = self.previous.take();
        let _ = CONTEXT_LOADER.try_with(|cell| cell.replace(previous));
    }
}

/// Opens `resource` from the context loader. The caller owns the stream.
pub fn as_stream(resource: &(impl Resource + ?Sized)) -> Option<ResourceStream> {
    as_stream_in(&context_loader(), resource)
}

/// Opens `resource` from `loader`. The caller owns the stream.
pub fn as_stream_in(
    loader: &(impl Loader + ?Sized),
    resource: &(impl Resource + ?Sized),
) -> Option<ResourceStream> {
    let path = normalize(resource.path());
    log::trace!("context: opening '{}' via {}", path, loader.name());
    loader.open(path)
}

/// Reads `resource` as UTF-8 text from the context loader.
pub fn as_string(resource: &(impl Resource + ?Sized)) -> Option<String> {
    as_string_with_in(&context_loader(), resource, UTF_8)
}

/// Reads `resource` from the context loader in `encoding`.
pub fn as_string_with(
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Option<String> {
    as_string_with_in(&context_loader(), resource, encoding)
}

/// Reads `resource` from `loader` as UTF-8 text.
pub fn as_string_in(
    loader: &(impl Loader + ?Sized),
    resource: &(impl Resource + ?Sized),
) -> Option<String> {
    as_string_with_in(loader, resource, UTF_8)
}

/// Reads `resource` from `loader` in `encoding`; `None` if missing or unreadable.
pub fn as_string_with_in(
    loader: &(impl Loader + ?Sized),
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Option<String> {
    let stream = as_stream_in(loader, resource);
    read::read_string_lossy(stream, normalize(resource.path()), encoding)
}

/// Like [`as_string_with`], but says why no text was produced.
pub fn read_string(
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Result<String, ResourceError> {
    read_string_in(&context_loader(), resource, encoding)
}

/// Like [`as_string_with_in`], but says why no text was produced.
pub fn read_string_in(
    loader: &(impl Loader + ?Sized),
    resource: &(impl Resource + ?Sized),
    encoding: &'static Encoding,
) -> Result<String, ResourceError> {
    let stream = as_stream_in(loader, resource);
    read::read_string(stream, normalize(resource.path()), encoding)
}

/// The context loader's locator for `resource`.
pub fn as_url(resource: &(impl Resource + ?Sized)) -> Option<Locator> {
    as_url_in(&context_loader(), resource)
}

/// `loader`'s locator for `resource`.
pub fn as_url_in(
    loader: &(impl Loader + ?Sized),
    resource: &(impl Resource + ?Sized),
) -> Option<Locator> {
    let path = normalize(resource.path());
    log::trace!("context: locating '{}' via {}", path, loader.name());
    loader.locate(path)
}

/// The context loader's locator for `resource` as a URI.
///
/// The context loader's locator for `resource` as a URI.
///
/// # Errors
///
/// Returns `ResourceError::InvalidUri` when the locator is not valid URI
/// syntax. A missing resource is `Ok(None)`.
pub fn as_uri(resource: &(impl Resource + ?Sized)) -> Result<Option<Url>, ResourceError> {
    as_uri_in(&context_loader(), resource)
}

/// [`as_uri`] against an explicit loader.
pub fn as_uri_in(
    loader: &(impl Loader + ?Sized),
    resource: &(impl Resource + ?Sized),
) -> Result<Option<Url>, ResourceError> {
    read::to_uri(as_url_in(loader, resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use r4rs_traits::InMemoryLoader;

    fn loader_with(path: &str, data: &[u8]) -> Arc<InMemoryLoader> {
        let loader = InMemoryLoader::new();
        loader.add(path, data.to_vec()).unwrap();
        Arc::new(loader)
    }

    #[test]
    fn test_explicit_loader_normalizes() {
        let loader = loader_with("fixtures/hello.txt", b"hello");
        assert_eq!(as_string_in(&loader, "/fixtures/hello.txt").as_deref(), Some("hello"));
        assert_eq!(as_string_in(&loader, "fixtures/hello.txt").as_deref(), Some("hello"));
        assert!(as_string_in(&loader, "//fixtures/hello.txt").is_none());
    }

    #[test]
    fn test_scoped_guard_restores_previous() {
        let outer = loader_with("a.txt", b"outer");
        let inner = loader_with("a.txt", b"inner");

        let _outer = scoped(outer);
        {
            let _inner = scoped(inner);
            assert_eq!(as_string("a.txt").as_deref(), Some("inner"));
        }
        assert_eq!(as_string("a.txt").as_deref(), Some("outer"));
    }

    #[test]
    fn test_set_context_loader_returns_previous() {
        let first: Arc<dyn Loader> = loader_with("x", b"1");
        assert!(set_context_loader(Some(first.clone())).is_none());
        let previous = set_context_loader(None).unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
    }

    #[test]
    fn test_context_loader_is_per_thread() {
        let _guard = scoped(loader_with("only-here.txt", b"main"));
        assert!(as_stream("only-here.txt").is_some());

        let seen = std::thread::spawn(|| CONTEXT_LOADER.with_borrow(Option::is_some))
            .join()
            .unwrap();
        assert!(!seen);
    }

    #[test]
    fn test_missing_is_none_not_error() {
        let loader = loader_with("present.txt", b"");
        assert!(as_stream_in(&loader, "/absent.txt").is_none());
        assert!(as_url_in(&loader, "/absent.txt").is_none());
        assert_eq!(as_uri_in(&loader, "/absent.txt").unwrap(), None);
        let err = read_string_in(&loader, "/absent.txt", UTF_8).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(ref p) if p == "absent.txt"));
    }
}
