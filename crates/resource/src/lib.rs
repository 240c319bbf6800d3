//! Loader implementations for r4rs.
//!
//! ## Available Loaders
//!
//! - [`DirectoryLoader`]: Loads resources from a directory on the local filesystem
//! - [`DelegatingLoader`]: Asks an ordered list of loaders, first hit wins
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory loader from r4rs-traits:
//! - [`InMemoryLoader`]: Pre-populated in-memory storage

mod delegating;
mod filesystem;

pub use delegating::DelegatingLoader;
pub use filesystem::DirectoryLoader;

// Re-export the in-memory loader from r4rs-traits for convenience
pub use r4rs_traits::InMemoryLoader;
