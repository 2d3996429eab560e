//! Rejection reasons for the validation pipeline.

use thiserror::Error;

/// Why the pipeline refused an input.
///
/// The `Display` text is the human-readable message shown next to the input
/// field; [`Rejection::code`] is the stable identifier for programmatic
/// consumers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The input does not parse as a URL, even after repair.
    #[error("Invalid URL format.")]
    MalformedUrl,

    /// The URL scheme is not on the allow-list.
    #[error("URL must start with https:// or http://")]
    DisallowedProtocol {
        /// The scheme that was found (lower-cased by the URL parser).
        scheme: String,
    },

    /// The URL path does not end with a supported media extension.
    #[error("Invalid file type. Supported extensions: {allowed}")]
    UnsupportedFileType {
        /// Comma-separated list of accepted extensions.
        allowed: String,
    },
}

impl Rejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedUrl => "MALFORMED_URL",
            Self::DisallowedProtocol { .. } => "DISALLOWED_PROTOCOL",
            Self::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
        }
    }
}

/// A failed inbound resolution: the rejection plus the URL the server saw.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{rejection} (received: {received_url})")]
pub struct ResolutionError {
    /// Why the media URL was refused.
    pub rejection: Rejection,
    /// The media URL as received, after decoding where decoding succeeded.
    pub received_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Rejection::MalformedUrl.code(), "MALFORMED_URL");
        assert_eq!(
            Rejection::DisallowedProtocol {
                scheme: "ftp".to_string()
            }
            .code(),
            "DISALLOWED_PROTOCOL"
        );
        assert_eq!(
            Rejection::UnsupportedFileType {
                allowed: ".mp4".to_string()
            }
            .code(),
            "UNSUPPORTED_FILE_TYPE"
        );
    }

    #[test]
    fn unsupported_file_type_lists_allowed_set() {
        let err = Rejection::UnsupportedFileType {
            allowed: ".mp4, .mp3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid file type. Supported extensions: .mp4, .mp3"
        );
    }

    #[test]
    fn disallowed_protocol_message_hides_scheme() {
        let err = Rejection::DisallowedProtocol {
            scheme: "javascript".to_string(),
        };
        assert_eq!(err.to_string(), "URL must start with https:// or http://");
    }

    #[test]
    fn resolution_error_display_includes_received_url() {
        let err = ResolutionError {
            rejection: Rejection::MalformedUrl,
            received_url: "not a url".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid URL format."));
        assert!(msg.contains("not a url"));
    }
}
