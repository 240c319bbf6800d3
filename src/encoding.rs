//! Text encoding policy.
//!
//! Rust has no process-wide default charset, so the platform default is
//! derived from the locale environment the way C runtimes do it.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::env;
use std::sync::OnceLock;

/// Environment variable that overrides the detected platform default.
pub const ENCODING_ENV: &str = "R4RS_ENCODING";

static PLATFORM_DEFAULT: OnceLock<&'static Encoding> = OnceLock::new();

/// The platform default encoding, resolved once per process.
///
/// `R4RS_ENCODING` wins if it names a known encoding. Otherwise the first
/// non-empty of `LC_ALL`, `LC_CTYPE` and `LANG` is parsed with
/// [`encoding_for_locale`]. Anything unrecognized falls back to UTF-8.
pub fn platform_default() -> &'static Encoding {
    PLATFORM_DEFAULT.get_or_init(|| {
        let detected = detect(|key| env::var(key).ok());
        log::debug!("platform default encoding is {}", detected.name());
        detected
    })
}

fn detect(var: impl Fn(&str) -> Option<String>) -> &'static Encoding {
    if let Some(label) = var(ENCODING_ENV)
        && let Some(encoding) = Encoding::for_label(label.trim().as_bytes())
    {
        return encoding;
    }

    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| var(key))
        .find(|value| !value.is_empty())
        .and_then(|locale| encoding_for_locale(&locale))
        .unwrap_or(UTF_8)
}

/// Extracts the encoding named by a POSIX locale string.
///
/// `de_DE.ISO-8859-15@euro` names ISO-8859-15. `C` and `POSIX` name ASCII,
/// which WHATWG maps onto windows-1252. A locale without a codeset, or with
/// an unknown one, yields `None`.
pub fn encoding_for_locale(locale: &str) -> Option<&'static Encoding> {
    let locale = locale.trim();
    if locale == "C" || locale == "POSIX" {
        return Some(WINDOWS_1252);
    }
    let (_, rest) = locale.split_once('.')?;
    let codeset = rest.split('@').next().unwrap_or(rest);
    Encoding::for_label(codeset.as_bytes())
}

/// Decodes `bytes` as `encoding`, replacing malformed sequences.
///
/// A byte order mark is kept as content rather than sniffed.
pub(crate) fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        log::trace!("replaced malformed {} sequences while decoding", encoding.name());
    }
    text.into_owned()
}
