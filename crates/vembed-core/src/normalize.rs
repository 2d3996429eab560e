//! Input normalization: decoding, protocol repair and URL parsing.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::error::Rejection;

/// Upper bound on decode passes. Input still encoded after this is rejected.
const MAX_DECODE_PASSES: usize = 8;

static PERCENT_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[0-9A-Fa-f]{2}").unwrap());

/// Characters the URL parser drops from anywhere in its input.
const IGNORED: [char; 3] = ['\t', '\n', '\r'];

/// `http:/host` and `https:/host`: a scheme followed by a single slash.
static SINGLE_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?):/([^/])").unwrap());

/// A string that is known to parse as a URL.
///
/// The text is the repaired input itself, not the parser's re-serialization:
/// the parser would percent-encode characters that the sanitizer must still
/// see and remove. Separators and ignored characters are canonicalized the
/// way the parser reads them, so the text and [`NormalizedUrl::path`] name
/// the same resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    text: String,
    parsed: Url,
}

impl NormalizedUrl {
    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lower-case scheme, as reported by the URL parser.
    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Parsed path (percent-encoded, without query or fragment).
    pub fn path(&self) -> &str {
        self.parsed.path()
    }

    /// Consume into the normalized text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of normalizing a raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Nothing entered yet. Not an error.
    Empty,
    /// A parseable URL.
    Url(NormalizedUrl),
}

impl Normalized {
    /// The URL, if any.
    pub fn into_url(self) -> Option<NormalizedUrl> {
        match self {
            Self::Url(url) => Some(url),
            Self::Empty => None,
        }
    }
}

/// Normalize a raw, untrusted input.
///
/// 1. Percent-decode until no escape is left (double encoding included),
///    dropping tab, CR and LF on every pass
/// 2. Trim surrounding whitespace; empty input yields [`Normalized::Empty`]
/// 3. For http(s), turn `\` before the query into `/`
/// 4. Repair `http:/host` into `http://host`
/// 5. Parse as a URL, rejecting with [`Rejection::MalformedUrl`] on failure
///
/// Normalizing an already-normalized URL returns it unchanged.
pub fn normalize(raw: &str) -> Result<Normalized, Rejection> {
    let decoded = decode_fully(raw).ok_or_else(|| {
        tracing::debug!(input = %raw, "rejecting input that is still encoded after decoding");
        Rejection::MalformedUrl
    })?;

    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        return Ok(Normalized::Empty);
    }

    let slashed = canonicalize_backslashes(trimmed);
    let repaired = repair_single_slash(&slashed);

    match Url::parse(&repaired) {
        Ok(parsed) => Ok(Normalized::Url(NormalizedUrl {
            text: repaired.into_owned(),
            parsed,
        })),
        Err(err) => {
            tracing::debug!(input = %repaired, error = %err, "rejecting malformed url");
            Err(Rejection::MalformedUrl)
        }
    }
}

/// Decode percent-escapes repeatedly until the text stops changing.
///
/// Escapes that would decode to invalid UTF-8 are left in place. Returns
/// `None` if the text is still changing after [`MAX_DECODE_PASSES`].
fn decode_fully(raw: &str) -> Option<Cow<'_, str>> {
    let mut current = strip_ignored(Cow::Borrowed(raw));

    for _ in 0..MAX_DECODE_PASSES {
        if !PERCENT_ESCAPE_RE.is_match(&current) {
            return Some(current);
        }
        let next = percent_decode_str(&current)
            .decode_utf8()
            .ok()
            .map(|decoded| strip_ignored(decoded).into_owned());
        match next {
            Some(next) if next != *current => current = Cow::Owned(next),
            _ => return Some(current),
        }
    }

    (!PERCENT_ESCAPE_RE.is_match(&current)).then_some(current)
}

fn strip_ignored(input: Cow<'_, str>) -> Cow<'_, str> {
    if input.contains(IGNORED) {
        Cow::Owned(input.chars().filter(|c| !IGNORED.contains(c)).collect())
    } else {
        input
    }
}

/// The parser reads `\` as `/` in the authority and path of http(s) URLs.
fn canonicalize_backslashes(input: &str) -> Cow<'_, str> {
    let is_http = ["http:", "https:"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    let end = input.find(['?', '#']).unwrap_or(input.len());
    if !is_http || !input[..end].contains('\\') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(format!("{}{}", input[..end].replace('\\', "/"), &input[end..]))
}

fn repair_single_slash(input: &str) -> Cow<'_, str> {
    SINGLE_SLASH_RE.replace(input, "${1}://${2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normalized(raw: &str) -> String {
        normalize(raw)
            .expect("input should normalize")
            .into_url()
            .expect("input should not be empty")
            .into_string()
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert_eq!(normalize(""), Ok(Normalized::Empty));
        assert_eq!(normalize("   \t\n"), Ok(Normalized::Empty));
    }

    #[test]
    fn encoded_whitespace_is_empty() {
        assert_eq!(normalize("%20%20"), Ok(Normalized::Empty));
    }

    #[test]
    fn plain_url_is_unchanged() {
        assert_eq!(
            normalized("https://example.com/movie.mp4"),
            "https://example.com/movie.mp4"
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            normalized("  https://example.com/movie.mp4\n"),
            "https://example.com/movie.mp4"
        );
    }

    #[test]
    fn single_slash_http_is_repaired() {
        assert_eq!(
            normalized("http:/example.com/movie.mp4"),
            "http://example.com/movie.mp4"
        );
    }

    #[test]
    fn single_slash_https_is_repaired() {
        assert_eq!(
            normalized("https:/example.com/movie.mp4"),
            "https://example.com/movie.mp4"
        );
    }

    #[test]
    fn single_slash_repair_ignores_case() {
        assert_eq!(
            normalized("HTTPS:/example.com/movie.mp4"),
            "HTTPS://example.com/movie.mp4"
        );
    }

    #[test]
    fn triple_slash_is_not_repaired() {
        // Only the single-slash artifact is repaired; the parser handles the rest.
        assert_eq!(
            normalized("https:///example.com/a.mp4"),
            "https:///example.com/a.mp4"
        );
    }

    #[test]
    fn percent_encoded_url_is_decoded() {
        assert_eq!(
            normalized("https%3A%2F%2Fexample.com%2Fmy%20movie.mp4"),
            "https://example.com/my movie.mp4"
        );
    }

    #[test]
    fn double_encoded_url_is_fully_decoded() {
        assert_eq!(
            normalized("https%253A%252F%252Fexample.com%252Fa.mp4"),
            "https://example.com/a.mp4"
        );
    }

    #[test]
    fn decoded_then_repaired() {
        assert_eq!(
            normalized("http%3A%2Fexample.com%2Fa.mp4"),
            "http://example.com/a.mp4"
        );
    }

    #[test]
    fn invalid_utf8_escape_is_kept() {
        assert_eq!(
            normalized("https://example.com/%FF.mp4"),
            "https://example.com/%FF.mp4"
        );
    }

    #[test]
    fn excessive_encoding_is_rejected() {
        let mut raw = "https://example.com/a%20b.mp4".to_string();
        for _ in 0..MAX_DECODE_PASSES + 1 {
            raw = raw.replace('%', "%25");
        }
        assert_eq!(normalize(&raw), Err(Rejection::MalformedUrl));
    }

    #[test]
    fn missing_scheme_is_malformed() {
        assert_eq!(
            normalize("example.com/movie.mp4"),
            Err(Rejection::MalformedUrl)
        );
    }

    #[test]
    fn bare_scheme_is_malformed() {
        assert_eq!(normalize("http:/"), Err(Rejection::MalformedUrl));
        assert_eq!(normalize("https://"), Err(Rejection::MalformedUrl));
    }

    #[test]
    fn other_schemes_still_parse() {
        // Protocol policy belongs to the validator.
        let url = normalize("javascript:alert(1)").unwrap().into_url().unwrap();
        assert_eq!(url.scheme(), "javascript");

        let url = normalize("ftp://host/video.mp4").unwrap().into_url().unwrap();
        assert_eq!(url.scheme(), "ftp");
    }

    #[test]
    fn angle_brackets_survive_normalization() {
        let url = normalize("https://host/a<script>.mp4")
            .unwrap()
            .into_url()
            .unwrap();
        assert_eq!(url.as_str(), "https://host/a<script>.mp4");
        assert_eq!(url.path(), "/a%3Cscript%3E.mp4");
    }

    #[test]
    fn backslashes_become_slashes() {
        assert_eq!(normalized("https://host\\clip.mp3"), "https://host/clip.mp3");
        assert_eq!(normalized("https:\\\\host\\clip.mp3"), "https://host/clip.mp3");
        assert_eq!(normalized("HTTP:\\host\\dir\\a.mp4"), "HTTP://host/dir/a.mp4");
    }

    #[test]
    fn backslashes_in_query_are_kept() {
        assert_eq!(
            normalized("https://host\\a.mp4?path=c:\\x"),
            "https://host/a.mp4?path=c:\\x"
        );
    }

    #[test]
    fn inner_tabs_and_newlines_are_dropped() {
        assert_eq!(normalized("https://host/mo\tvie.mp4"), "https://host/movie.mp4");
        assert_eq!(normalized("https://ho\r\nst/a.mp4"), "https://host/a.mp4");
        assert_eq!(normalized("https://host/mo%09vie.mp4"), "https://host/movie.mp4");
    }

    #[test]
    fn text_and_parsed_path_agree() {
        for raw in ["https://host\\clip.mp3", "https://host/cl\tip.mp3", "https:\\host\\clip.mp3"] {
            let url = normalize(raw).unwrap().into_url().unwrap();
            assert_eq!(url.path(), "/clip.mp3", "input: {raw:?}");
            assert!(url.as_str().ends_with("/clip.mp3"), "input: {raw:?}");
        }
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        for raw in [
            "http:/example.com/movie.mp4",
            "https%253A%252F%252Fexample.com%252Fa.mp4",
            "  https://example.com/a.mp4?x=1%26y  ",
            "https://example.com/%FF.mp4",
            "https:\\host\\a.mp4",
            "https://host/%2%090.mp4",
        ] {
            let once = normalized(raw);
            assert_eq!(normalized(&once), once, "input: {raw}");
        }
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in r"[ -~]{0,80}") {
            if let Ok(first) = normalize(&raw) {
                let text = match &first {
                    Normalized::Empty => String::new(),
                    Normalized::Url(url) => url.as_str().to_string(),
                };
                prop_assert_eq!(normalize(&text), Ok(first));
            }
        }

        #[test]
        fn repaired_http_urls_are_accepted(
            host in r"[a-z][a-z0-9]{1,20}\.(com|net|org)",
            path in r"[a-zA-Z0-9_-]{1,30}",
        ) {
            let raw = format!("http:/{host}/{path}.mp4");
            let url = normalize(&raw).unwrap().into_url().unwrap();
            prop_assert_eq!(url.as_str(), format!("http://{host}/{path}.mp4"));
        }
    }
}
