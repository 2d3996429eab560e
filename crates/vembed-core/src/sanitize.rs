//! Attribute-breaking character removal.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::validate::ValidatedUrl;

/// Characters that could close or open an HTML attribute or tag.
const STRIPPED: [char; 4] = ['<', '>', '"', '\''];

/// A validated URL with every [`STRIPPED`] character deleted.
///
/// This is the only URL form that reaches generated markup. It keeps the
/// parsed path the validator checked, so later stages never re-derive it from
/// the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedUrl {
    text: String,
    path: String,
}

impl SanitizedUrl {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parsed path (percent-encoded, without query or fragment).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Whether the URL uses TLS.
    pub fn is_https(&self) -> bool {
        self.text
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("https://"))
    }
}

impl fmt::Display for SanitizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for SanitizedUrl {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Serialize for SanitizedUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Delete attribute-breaking characters from a validated URL.
pub fn sanitize(url: ValidatedUrl) -> SanitizedUrl {
    let url = url.into_inner();
    SanitizedUrl {
        text: sanitize_str(url.as_str()),
        path: url.path().to_string(),
    }
}

/// Delete attribute-breaking characters from any string.
pub fn sanitize_str(input: &str) -> String {
    input.chars().filter(|c| !STRIPPED.contains(c)).collect()
}
