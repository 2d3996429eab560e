//! Media tables: accepted schemes, extensions and their MIME types.
//!
//! A [`MediaTable`] is built once and never mutated. The default table is the
//! production allow-list; tests can construct narrower or wider ones.

/// MIME type used when the extension is not in the table.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME type used when audio is forced and the extension is not in the table.
pub const FORCED_AUDIO_MIME: &str = "audio/mpeg";

/// One supported media container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaType {
    /// Lower-case extension without the dot.
    pub extension: &'static str,
    /// Default MIME type.
    pub mime: &'static str,
    /// MIME type to use when audio is forced, for containers that hold either.
    pub audio_variant: Option<&'static str>,
}

impl MediaType {
    const fn new(extension: &'static str, mime: &'static str) -> Self {
        Self {
            extension,
            mime,
            audio_variant: None,
        }
    }

    const fn ambiguous(extension: &'static str, mime: &'static str, audio: &'static str) -> Self {
        Self {
            extension,
            mime,
            audio_variant: Some(audio),
        }
    }
}

const DEFAULT_SCHEMES: &[&str] = &["http", "https"];

const DEFAULT_MEDIA: &[MediaType] = &[
    MediaType::ambiguous("mp4", "video/mp4", "audio/mp4"),
    MediaType::ambiguous("webm", "video/webm", "audio/webm"),
    MediaType::new("mov", "video/quicktime"),
    MediaType::new("flv", "video/x-flv"),
    MediaType::new("wmv", "video/x-ms-wmv"),
    MediaType::new("avi", "video/x-msvideo"),
    MediaType::new("mkv", "video/x-matroska"),
    MediaType::new("mpeg", "video/mpeg"),
    MediaType::new("mpg", "video/mpeg"),
    MediaType::new("3gp", "video/3gpp"),
    MediaType::new("mp3", "audio/mpeg"),
    MediaType::new("wav", "audio/wav"),
    MediaType::ambiguous("ogg", "audio/ogg", "audio/ogg"),
    MediaType::new("flac", "audio/flac"),
];

const DEFAULT_IMAGES: &[MediaType] = &[
    MediaType::new("png", "image/png"),
    MediaType::new("jpg", "image/jpeg"),
    MediaType::new("jpeg", "image/jpeg"),
    MediaType::new("gif", "image/gif"),
    MediaType::new("webp", "image/webp"),
];

/// Allow-lists and MIME mapping shared by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTable {
    schemes: Vec<&'static str>,
    media: Vec<MediaType>,
    images: Vec<MediaType>,
}

impl Default for MediaTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_SCHEMES.to_vec(),
            DEFAULT_MEDIA.to_vec(),
            DEFAULT_IMAGES.to_vec(),
        )
    }
}

impl MediaTable {
    /// Build a table from explicit lists.
    pub fn new(schemes: Vec<&'static str>, media: Vec<MediaType>, images: Vec<MediaType>) -> Self {
        Self {
            schemes,
            media,
            images,
        }
    }

    /// Supported media containers.
    pub fn media(&self) -> &[MediaType] {
        &self.media
    }

    /// Whether `scheme` is on the allow-list (case-insensitive).
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
    }

    /// Look up a media container by extension (case-insensitive, no dot).
    pub fn lookup(&self, extension: &str) -> Option<&MediaType> {
        self.media
            .iter()
            .find(|m| m.extension.eq_ignore_ascii_case(extension))
    }

    /// Whether the path (or file name) ends with a supported media extension.
    pub fn has_media_extension(&self, path: &str) -> bool {
        ends_with_any(path, &self.media)
    }

    /// Whether the file name ends with a supported image extension.
    pub fn has_image_extension(&self, name: &str) -> bool {
        ends_with_any(name, &self.images)
    }

    /// MIME type for an image file name, if it is a supported image.
    pub fn image_mime(&self, name: &str) -> Option<&'static str> {
        let ext = extension_of(name)?;
        self.images
            .iter()
            .find(|m| m.extension.eq_ignore_ascii_case(ext))
            .map(|m| m.mime)
    }

    /// Pick the MIME type for an extension.
    ///
    /// With `force_audio`, ambiguous containers resolve to their audio variant
    /// and unknown extensions to [`FORCED_AUDIO_MIME`].
    pub fn mime_for(&self, extension: Option<&str>, force_audio: bool) -> &'static str {
        match (extension.and_then(|e| self.lookup(e)), force_audio) {
            (Some(entry), true) => entry.audio_variant.unwrap_or(entry.mime),
            (Some(entry), false) => entry.mime,
            (None, true) => FORCED_AUDIO_MIME,
            (None, false) => FALLBACK_MIME,
        }
    }

    /// Human-readable list of accepted extensions, e.g. `.mp4, .webm, ...`.
    pub fn allowed_extensions(&self) -> String {
        self.media
            .iter()
            .map(|m| format!(".{}", m.extension))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Extension of the last path segment, without the dot.
///
/// Returns `None` when the segment has no dot or nothing follows it.
pub fn extension_of(name: &str) -> Option<&str> {
    let segment = name.rsplit('/').next().unwrap_or(name);
    segment
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn ends_with_any(path: &str, entries: &[MediaType]) -> bool {
    let lower = path.to_ascii_lowercase();
    entries.iter().any(|m| {
        lower
            .strip_suffix(m.extension)
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schemes_are_http_and_https() {
        let table = MediaTable::default();
        assert!(table.allows_scheme("http"));
        assert!(table.allows_scheme("HTTPS"));
        assert!(!table.allows_scheme("ftp"));
        assert!(!table.allows_scheme("javascript"));
    }

    #[test]
    fn media_extension_match_is_case_insensitive() {
        let table = MediaTable::default();
        assert!(table.has_media_extension("/video.MP4"));
        assert!(table.has_media_extension("/a/b/song.Flac"));
        assert!(!table.has_media_extension("/video"));
        assert!(!table.has_media_extension("/video.txt"));
    }

    #[test]
    fn media_extension_requires_dot() {
        let table = MediaTable::default();
        assert!(!table.has_media_extension("/notmp4"));
        assert!(!table.has_media_extension("/clip3gp"));
    }

    #[test]
    fn mime_lookup() {
        let table = MediaTable::default();
        assert_eq!(table.mime_for(Some("mp4"), false), "video/mp4");
        assert_eq!(table.mime_for(Some("MOV"), false), "video/quicktime");
        assert_eq!(table.mime_for(Some("mp3"), false), "audio/mpeg");
        assert_eq!(table.mime_for(Some("xyz"), false), FALLBACK_MIME);
        assert_eq!(table.mime_for(None, false), FALLBACK_MIME);
    }

    #[test]
    fn forced_audio_uses_audio_variant_for_ambiguous_containers() {
        let table = MediaTable::default();
        assert_eq!(table.mime_for(Some("mp4"), true), "audio/mp4");
        assert_eq!(table.mime_for(Some("webm"), true), "audio/webm");
        assert_eq!(table.mime_for(Some("ogg"), true), "audio/ogg");
        // No audio variant: keep the container's own type.
        assert_eq!(table.mime_for(Some("mkv"), true), "video/x-matroska");
        assert_eq!(table.mime_for(None, true), FORCED_AUDIO_MIME);
    }

    #[test]
    fn allowed_extensions_lists_every_entry() {
        let table = MediaTable::default();
        let listed = table.allowed_extensions();
        assert!(listed.starts_with(".mp4, .webm"));
        assert!(listed.ends_with(".flac"));
        assert_eq!(listed.split(", ").count(), table.media().len());
    }

    #[test]
    fn image_lookup() {
        let table = MediaTable::default();
        assert!(table.has_image_extension("cover.JPG"));
        assert!(!table.has_image_extension("cover.mp4"));
        assert_eq!(table.image_mime("cover.jpeg"), Some("image/jpeg"));
        assert_eq!(table.image_mime("cover"), None);
    }

    #[test]
    fn custom_table() {
        let table = MediaTable::new(
            vec!["https"],
            vec![MediaType::new("opus", "audio/opus")],
            vec![],
        );
        assert!(!table.allows_scheme("http"));
        assert!(table.has_media_extension("/a.opus"));
        assert!(!table.has_media_extension("/a.mp4"));
        assert_eq!(table.allowed_extensions(), ".opus");
    }

    #[test]
    fn extension_of_last_segment() {
        assert_eq!(extension_of("movie.mp4"), Some("mp4"));
        assert_eq!(extension_of("/dir.v2/movie"), None);
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of(""), None);
    }
}
