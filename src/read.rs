//! Helpers shared by the direct and context loaders.

use crate::encoding;
use encoding_rs::Encoding;
use r4rs_traits::{Locator, ResourceError, ResourceStream};
use std::io::Read;
use url::Url;

/// Strips exactly one leading `/` so a path can be handed to a loader.
pub fn normalize(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Reads an opened resource fully and decodes it.
///
/// The stream is consumed and dropped before this returns, whether reading
/// succeeds or fails.
pub(crate) fn read_string(
    stream: Option<ResourceStream>,
    path: &str,
    encoding: &'static Encoding,
) -> Result<String, ResourceError> {
    let mut stream = stream.ok_or_else(|| ResourceError::NotFound(path.to_string()))?;
    let mut bytes = Vec::new();
    let read = stream.read_to_end(&mut bytes);
    drop(stream);
    read.map_err(|source| ResourceError::Read {
        path: path.to_string(),
        source,
    })?;
    Ok(encoding::decode(&bytes, encoding))
}

/// [`read_string`] with every failure reported as `None`.
pub(crate) fn read_string_lossy(
    stream: Option<ResourceStream>,
    path: &str,
    encoding: &'static Encoding,
) -> Option<String> {
    match read_string(stream, path, encoding) {
        Ok(text) => Some(text),
        Err(ResourceError::NotFound(_)) => None,
        Err(e) => {
            log::debug!("treating unreadable resource as missing: {}", e);
            None
        }
    }
}

pub(crate) fn to_uri(locator: Option<Locator>) -> Result<Option<Url>, ResourceError> {
    locator.map(|l| l.to_uri()).transpose()
}
