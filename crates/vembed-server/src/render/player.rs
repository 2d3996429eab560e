//! Player page renderer.
//!
//! One page per media URL: an HTML5 player plus the Open Graph and Twitter
//! Card tags that unfurlers read to embed the media inline.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use vembed_core::MediaDescriptor;

use super::components::PLAYER_CSS;

/// Replaces the size meta tags with the real media size once it is known.
const DIMENSION_SCRIPT: &str = r#"
const player=document.getElementById('media-player');
player.addEventListener('loadedmetadata',()=>{
const w=player.videoWidth||player.dataset.width;
const h=player.videoHeight||player.dataset.height;
for(const id of ['og-width','twitter-width'])document.getElementById(id).setAttribute('content',w);
for(const id of ['og-height','twitter-height'])document.getElementById(id).setAttribute('content',h);
});
"#;

/// Render the player page for a resolved descriptor.
pub fn render(media: &MediaDescriptor, site_name: &str) -> Markup {
    let url = media.url.as_str();
    let thumbnail = media.thumbnail_url.as_ref().map(|t| t.as_str());
    let (kind, og_type, card) = if media.is_audio {
        ("Audio", "music.song", "audio")
    } else {
        ("Video", "video.other", "player")
    };
    let title = format!("{kind} Player - {}", media.filename);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }

                // Open Graph
                meta property="og:site_name" content=(site_name);
                meta property="og:title" content=(media.filename);
                meta property="og:type" content=(og_type);
                meta property="og:url" content=(url);
                meta id="og-width" property="og:video:width" content=(media.width);
                meta id="og-height" property="og:video:height" content=(media.height);
                meta property="og:video:url" content=(url);
                @if media.url.is_https() {
                    meta property="og:video:secure_url" content=(url);
                }
                meta property="og:video:type" content=(media.mime_type);
                @if let Some(image) = thumbnail {
                    meta property="og:image" content=(image);
                }

                // Twitter Card
                meta name="twitter:card" content=(card);
                meta name="twitter:title" content=(media.filename);
                meta name="twitter:player" content=(url);
                meta name="twitter:player:stream" content=(url);
                meta name="twitter:player:stream:content_type" content=(media.mime_type);
                meta id="twitter-width" name="twitter:player:width" content=(media.width);
                meta id="twitter-height" name="twitter:player:height" content=(media.height);
                @if let Some(image) = thumbnail {
                    meta name="twitter:image" content=(image);
                }

                style { (PreEscaped(PLAYER_CSS)) }
            }
            body {
                div class="media-container" {
                    @if media.is_audio {
                        @if let Some(image) = thumbnail {
                            img class="cover" src=(image) alt=(media.filename);
                        }
                        audio id="media-player" controls="" autoplay="" preload="metadata"
                            data-width=(media.width) data-height=(media.height) {
                            source src=(url) type=(media.mime_type);
                            "Your browser does not support audio playback."
                        }
                    } @else {
                        video id="media-player" controls="" autoplay="" preload="metadata"
                            poster=[thumbnail]
                            data-width=(media.width) data-height=(media.height) {
                            source src=(url) type=(media.mime_type);
                            "Your browser does not support video playback."
                        }
                    }
                }
                script { (PreEscaped(DIMENSION_SCRIPT)) }
            }
        }
    }
}
