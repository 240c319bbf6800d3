//! Capabilities shared by every r4rs crate.
//!
//! - [`Resource`]: a value naming a loadable blob by path
//! - [`Loader`]: something that can open a path as a stream or locate it
//! - [`Locator`]: the URL-equivalent a loader hands out for a path
//!
//! [`InMemoryLoader`] is always available and works in any environment.

pub mod error;
pub mod loader;
pub mod locator;
pub mod resource;

pub use error::ResourceError;
pub use loader::{InMemoryLoader, Loader, ResourceStream, SharedResourceData};
pub use locator::Locator;
pub use resource::{Resource, ResourcePath, StaticResource};
