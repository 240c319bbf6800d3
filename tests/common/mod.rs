#![allow(dead_code)]

pub mod fixtures;

use r4rs::{InMemoryLoader, Loader, Locator, ResourceStream};
use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Installs `env_logger` once so `RUST_LOG=trace` shows resolution logs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A loader that counts how many of its streams were opened and dropped.
#[derive(Debug, Default)]
pub struct TrackingLoader {
    inner: InMemoryLoader,
    opened: AtomicUsize,
    closed: Arc<AtomicUsize>,
    /// Streams error after handing out this many bytes.
    fail_after: Option<usize>,
}

impl TrackingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stream fails with an I/O error after `bytes` bytes.
    pub fn failing_after(bytes: usize) -> Self {
        Self {
            fail_after: Some(bytes),
            ..Self::default()
        }
    }

    pub fn with(self, path: &str, data: &[u8]) -> Self {
        self.inner.add(path, data.to_vec()).unwrap();
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Loader for TrackingLoader {
    fn open(&self, path: &str) -> Option<ResourceStream> {
        let inner = self.inner.open(path)?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(TrackedStream {
            inner,
            remaining: self.fail_after,
            closed: Arc::clone(&self.closed),
        }))
    }

    fn locate(&self, path: &str) -> Option<Locator> {
        self.inner.locate(path)
    }

    fn name(&self) -> &'static str {
        "TrackingLoader"
    }
}

struct TrackedStream {
    inner: ResourceStream,
    remaining: Option<usize>,
    closed: Arc<AtomicUsize>,
}

impl Read for TrackedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.remaining {
            Some(0) => Err(io::Error::other("induced read failure")),
            Some(left) => {
                let limit = left.min(buf.len());
                let n = self.inner.read(&mut buf[..limit])?;
                self.remaining = Some(left - n);
                Ok(n)
            }
            None => self.inner.read(buf),
        }
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// A loader that hands out the same locator for every path.
#[derive(Debug)]
pub struct FixedLocatorLoader(pub &'static str);

impl Loader for FixedLocatorLoader {
    fn open(&self, _path: &str) -> Option<ResourceStream> {
        None
    }

    fn locate(&self, _path: &str) -> Option<Locator> {
        Some(Locator::new(self.0))
    }

    fn name(&self) -> &'static str {
        "FixedLocatorLoader"
    }
}
