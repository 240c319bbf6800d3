//! Ordered delegation across several loaders.

use r4rs_traits::{Loader, Locator, ResourceStream};
use std::sync::Arc;

/// A loader that asks its delegates in order and returns the first hit.
///
/// Earlier delegates shadow later ones, the way a parent loader shadows its
/// children.
#[derive(Debug, Default, Clone)]
pub struct DelegatingLoader {
    delegates: Vec<Arc<dyn Loader>>,
}

impl DelegatingLoader {
    pub fn new(delegates: Vec<Arc<dyn Loader>>) -> Self {
        Self { delegates }
    }

    /// Appends a delegate with the lowest priority so far.
    pub fn push(&mut self, loader: Arc<dyn Loader>) {
        self.delegates.push(loader);
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl Loader for DelegatingLoader {
    fn open(&self, path: &str) -> Option<ResourceStream> {
        self.delegates.iter().find_map(|loader| {
            let stream = loader.open(path);
            if stream.is_some() {
                log::trace!("{}: '{}' opened by {}", self.name(), path, loader.name());
            }
            stream
        })
    }

    fn locate(&self, path: &str) -> Option<Locator> {
        self.delegates.iter().find_map(|loader| {
            let locator = loader.locate(path);
            if locator.is_some() {
                log::trace!("{}: '{}' located by {}", self.name(), path, loader.name());
            }
            locator
        })
    }

    fn name(&self) -> &'static str {
        "DelegatingLoader"
    }
}
