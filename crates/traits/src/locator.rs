//! URL-equivalent handles produced by loaders.

use crate::ResourceError;
use std::fmt;
use url::Url;

/// Where a loader resolved a resource to.
///
/// A locator is whatever string the loader produced (`file:///...`,
/// `memory:/...`, ...). It is only checked for URI syntax when converted
/// with [`Locator::to_uri`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses this locator as an absolute URI.
    ///
    /// The locator is checked against RFC 3986 first, so anything a strict
    /// parser refuses is an error here instead of being percent-encoded or
    /// otherwise repaired.
    pub fn to_uri(&self) -> Result<Url, ResourceError> {
        check_syntax(&self.0).map_err(|reason| ResourceError::InvalidUri {
            locator: self.0.clone(),
            reason,
        })?;
        Url::parse(&self.0).map_err(|e| ResourceError::InvalidUri {
            locator: self.0.clone(),
            reason: e.to_string(),
        })
    }
}

/// Strict RFC 3986 checks that `Url::parse` does not make.
fn check_syntax(locator: &str) -> Result<(), String> {
    if let Some((index, c)) = locator.char_indices().find(|(_, c)| is_illegal(*c)) {
        return Err(format!("illegal character {:?} at index {}", c, index));
    }

    let colon = locator.find(':').ok_or("missing scheme")?;
    let scheme = &locator[..colon];
    let valid_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return Err(format!("illegal scheme {:?}", scheme));
    }
    if colon + 1 == locator.len() {
        return Err(format!("expected scheme-specific part at index {}", colon + 1));
    }

    // Brackets are only legal around an IP literal in the authority
    let rest = &locator[colon + 1..];
    let authority_end = match rest.strip_prefix("//") {
        Some(after) => colon + 3 + after.find(['/', '?', '#']).unwrap_or(after.len()),
        None => colon + 1,
    };

    let bytes = locator.as_bytes();
    let mut fragment = false;
    for (index, &b) in bytes.iter().enumerate() {
        match b {
            b'%' => {
                let pair = bytes.get(index + 1..index + 3);
                if !pair.is_some_and(|p| p.iter().all(u8::is_ascii_hexdigit)) {
                    return Err(format!("malformed escape pair at index {}", index));
                }
            }
            b'#' if fragment => {
                return Err(format!("illegal character '#' at index {}", index));
            }
            b'#' => fragment = true,
            b'[' | b']' if index >= authority_end => {
                return Err(format!("illegal character {:?} at index {}", b as char, index));
            }
            _ => {}
        }
    }
    Ok(())
}

fn is_illegal(c: char) -> bool {
    c.is_control() || matches!(c, ' ' | '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}')
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Url> for Locator {
    fn from(url: Url) -> Self {
        Self(url.into())
    }
}
