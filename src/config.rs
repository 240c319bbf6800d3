//! Configuration for the process-wide defining unit.

use crate::direct::DefiningUnit;
use crate::encoding::ENCODING_ENV;
use encoding_rs::Encoding;
use r4rs_resource::DirectoryLoader;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable naming the resource root directory.
pub const ROOT_ENV: &str = "R4RS_RESOURCE_ROOT";
/// Environment variable naming the defining unit's home prefix.
pub const HOME_ENV: &str = "R4RS_RESOURCE_HOME";

/// Where the defining unit finds its resources.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory resources are resolved from.
    pub root: PathBuf,
    /// Prefix below `root` that relative resource paths resolve against.
    pub home: String,
    /// Encoding used when none is given; `None` means the platform default.
    pub encoding: Option<&'static Encoding>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            home: String::new(),
            encoding: None,
        }
    }
}

impl LoaderConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `R4RS_RESOURCE_ROOT`, `R4RS_RESOURCE_HOME` and
    /// `R4RS_ENCODING`. Unknown encoding labels are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(root) = var(ROOT_ENV).filter(|v| !v.is_empty()) {
            config.root = PathBuf::from(root);
        }
        if let Some(home) = var(HOME_ENV) {
            config.home = home;
        }
        if let Some(label) = var(ENCODING_ENV) {
            config.encoding = Encoding::for_label(label.trim().as_bytes());
            if config.encoding.is_none() {
                log::warn!("ignoring unknown encoding '{}' in {}", label, ENCODING_ENV);
            }
        }
        config
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = home.into();
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Builds a defining unit backed by a [`DirectoryLoader`] on `root`.
    pub fn into_defining_unit(self) -> DefiningUnit {
        let unit = DefiningUnit::new(Arc::new(DirectoryLoader::new(&self.root)), self.home);
        match self.encoding {
            Some(encoding) => unit.with_encoding(encoding),
            None => unit,
        }
    }
}

/// Directory of the running executable, or the working directory.
fn default_root() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
