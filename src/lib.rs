//! Load bundled resources as streams, strings, locators or URIs.
//!
//! Two ways to resolve a [`Resource`]:
//!
//! - [`direct`]: through the defining unit, the loader this library was set
//!   up with. Paths are passed as given; text defaults to the platform
//!   encoding.
//! - [`context`]: through an explicit loader or the calling thread's context
//!   loader. One leading `/` is stripped; text defaults to UTF-8.
//!
//! Missing resources come back as `None`. The `as_string` operations also
//! report unreadable resources as `None`; the `read_string` operations keep
//! the difference. Only URI conversion fails loudly, with
//! [`ResourceError::InvalidUri`].
//!
//! ```
//! use r4rs::{context, InMemoryLoader};
//!
//! let loader = InMemoryLoader::new();
//! loader.add("fixtures/hello.txt", b"hello".to_vec()).unwrap();
//!
//! assert_eq!(context::as_string_in(&loader, "/fixtures/hello.txt").as_deref(), Some("hello"));
//! assert!(context::as_stream_in(&loader, "/missing.bin").is_none());
//! ```

pub mod config;
pub mod context;
pub mod direct;
pub mod encoding;
mod ext;
mod read;

pub use config::LoaderConfig;
pub use direct::{DefiningUnit, defining_unit, install_defining_unit};
pub use ext::ResourceExt;
pub use read::normalize;

pub use encoding_rs::{Encoding, UTF_8};
pub use r4rs_resource::{DelegatingLoader, DirectoryLoader};
pub use r4rs_traits::{
    InMemoryLoader, Loader, Locator, Resource, ResourceError, ResourcePath, ResourceStream,
    StaticResource,
};
pub use url::Url;
