//! Protocol and extension allow-lists.

use crate::error::Rejection;
use crate::normalize::NormalizedUrl;
use crate::table::MediaTable;

/// Validation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Treat the URL as audio regardless of its extension.
    pub force_audio: bool,
}

/// A normalized URL that passed the allow-lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(NormalizedUrl);

impl ValidatedUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub(crate) fn into_inner(self) -> NormalizedUrl {
        self.0
    }
}

/// Check the scheme only.
pub fn validate_protocol(url: NormalizedUrl, table: &MediaTable) -> Result<ValidatedUrl, Rejection> {
    if !table.allows_scheme(url.scheme()) {
        tracing::debug!(scheme = url.scheme(), "rejecting disallowed protocol");
        return Err(Rejection::DisallowedProtocol {
            scheme: url.scheme().to_string(),
        });
    }
    Ok(ValidatedUrl(url))
}

/// Check the scheme, then (unless audio is forced) the media extension.
pub fn validate(
    url: NormalizedUrl,
    opts: ValidateOptions,
    table: &MediaTable,
) -> Result<ValidatedUrl, Rejection> {
    let url = validate_protocol(url, table)?;

    if !opts.force_audio && !table.has_media_extension(url.path()) {
        tracing::debug!(path = url.path(), "rejecting unsupported file type");
        return Err(Rejection::UnsupportedFileType {
            allowed: table.allowed_extensions(),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn url(raw: &str) -> NormalizedUrl {
        normalize(raw).unwrap().into_url().unwrap()
    }

    fn check(raw: &str, force_audio: bool) -> Result<ValidatedUrl, Rejection> {
        validate(
            url(raw),
            ValidateOptions { force_audio },
            &MediaTable::default(),
        )
    }

    #[test]
    fn accepts_http_and_https_media() {
        assert!(check("https://host/video.mp4", false).is_ok());
        assert!(check("http://host/song.mp3", false).is_ok());
        assert!(check("HTTPS://host/VIDEO.WEBM", false).is_ok());
    }

    #[test]
    fn rejects_ftp() {
        let err = check("ftp://host/video.mp4", false).unwrap_err();
        assert_eq!(err.code(), "DISALLOWED_PROTOCOL");
        assert_eq!(
            err,
            Rejection::DisallowedProtocol {
                scheme: "ftp".to_string()
            }
        );
    }

    #[test]
    fn rejects_script_schemes() {
        for raw in ["javascript:alert(1)", "data:text/html,hi.mp4", "file:///etc/a.mp4"] {
            let err = check(raw, true).unwrap_err();
            assert_eq!(err.code(), "DISALLOWED_PROTOCOL", "input: {raw}");
        }
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = check("https://host/video", false).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
        assert!(err.to_string().contains(".mp4"));
        assert!(err.to_string().contains(".flac"));
    }

    #[test]
    fn forced_audio_skips_extension_check() {
        assert!(check("https://host/video", true).is_ok());
        assert!(check("https://host/stream.php?id=1", true).is_ok());
    }

    #[test]
    fn protocol_is_checked_before_extension() {
        let err = check("ftp://host/readme.txt", false).unwrap_err();
        assert_eq!(err.code(), "DISALLOWED_PROTOCOL");
    }

    #[test]
    fn extension_is_read_from_path_not_query() {
        assert!(check("https://host/video.mp4?token=abc", false).is_ok());
        assert!(check("https://host/video.mp4#t=10", false).is_ok());
        let err = check("https://host/watch?file=video.mp4", false).unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FILE_TYPE");
    }

    #[test]
    fn protocol_only_ignores_extension() {
        let table = MediaTable::default();
        assert!(validate_protocol(url("https://img.host/cover"), &table).is_ok());
        assert!(validate_protocol(url("ftp://img.host/cover.png"), &table).is_err());
    }

    #[test]
    fn validation_is_idempotent() {
        let table = MediaTable::default();
        let opts = ValidateOptions::default();
        let once = validate(url("https://host/a.mkv"), opts, &table).unwrap();
        let twice = validate(once.clone().into_inner(), opts, &table).unwrap();
        assert_eq!(once, twice);
    }
}
