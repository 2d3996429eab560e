//! Builder page: paste a media URL, get an embed link.
//!
//! Works without JavaScript. The form submits to `/` with GET and the page
//! is rendered again with the resulting [`FormState`]. Upload forms post to
//! `/api/upload`; a small inline script turns the reply into a field value.

use maud::{Markup, PreEscaped, html};
use vembed_core::{EmbedForm, FormState, MediaDescriptor, MediaTable};

use super::components::{copy_button, page_shell};

/// Intercepts upload submits and writes the hosted URL into the builder field
/// named by `data-target`. A hosted media file re-submits the builder.
const UPLOAD_SCRIPT: &str = r#"
document.querySelectorAll('.upload-form').forEach(function(f){
  f.addEventListener('submit',function(e){
    e.preventDefault();
    var s=f.querySelector('.upload-status'),b=f.querySelector('button');
    b.disabled=true;s.textContent='Uploading...';
    fetch(f.action,{method:'POST',body:new FormData(f)})
      .then(function(r){return r.json().then(function(j){return{ok:r.ok,j:j}})})
      .then(function(r){
        if(!r.ok){throw new Error(r.j.details||r.j.error||'Upload failed')}
        document.getElementById(f.dataset.target).value=r.j.url;
        s.textContent='Uploaded';
        if(f.dataset.target==='url'){document.querySelector('.builder-form').submit()}
      })
      .catch(function(err){s.textContent=err.message})
      .finally(function(){b.disabled=false});
  });
});
"#;

/// Render the builder page for a settled form, with an inline player when
/// the form produced a link.
pub fn render(
    form: &EmbedForm,
    preview: Option<&MediaDescriptor>,
    table: &MediaTable,
    site_name: &str,
) -> Markup {
    let request = form.request();
    let thumbnail = request.thumbnail_url.as_deref().unwrap_or("");
    let display = form.display_text();

    let body = html! {
        div class="builder" {
            h1 class="builder-title" { (site_name) }
            p class="builder-tagline" {
                "Paste a direct link to a video or audio file and share the embed link instead. "
                "Players that unfurl links will show the media inline, whatever its size."
            }

            form class="builder-form" method="get" action="/" {
                label for="url" { "Media URL" }
                input id="url" name="url" type="url" placeholder="https://example.com/video.mp4"
                    value=(request.media_url) autocomplete="off" autofocus;

                label for="thumbnail" { "Thumbnail URL (optional)" }
                input id="thumbnail" name="thumbnail" type="url" placeholder="https://example.com/cover.png"
                    value=(thumbnail) autocomplete="off";

                label class="builder-check" {
                    input type="checkbox" name="audio" value="1" checked[request.force_audio];
                    " Treat as audio"
                }

                button type="submit" class="builder-submit" { "Create embed link" }
            }

            @match form.state() {
                FormState::Invalid(rejection) => {
                    div class="builder-result builder-error" role="alert" data-code=(rejection.code()) {
                        (display)
                    }
                }
                FormState::Valid(link) => {
                    div class="builder-result" {
                        a id="embed-link" class="builder-link" href=(link) { (display) }
                        (copy_button("embed-link", "Copy embed link"))
                    }
                }
                FormState::Empty | FormState::Validating => {
                    div class="builder-result builder-placeholder" {
                        code { (display) "/" span class="builder-highlight" { "https://..." } }
                    }
                }
            }

            @if let Some(media) = preview {
                (preview_player(media))
            }

            p class="builder-note" {
                "Supported: " (table.allowed_extensions()) ". "
                "With \"Treat as audio\" any http(s) link is accepted."
            }

            div class="uploads" {
                (upload_form("video", "url", "Upload media", "video/*,audio/*"))
                (upload_form("thumbnail", "thumbnail", "Upload thumbnail", "image/*"))
            }

            script { (PreEscaped(UPLOAD_SCRIPT)) }
        }
    };

    page_shell(
        site_name,
        "Turn a direct media link into an embeddable player page.",
        site_name,
        HOME_CSS,
        body,
    )
}

fn preview_player(media: &MediaDescriptor) -> Markup {
    let url = media.url.as_str();
    let thumbnail = media.thumbnail_url.as_ref().map(|t| t.as_str());

    html! {
        div class="builder-preview" data-mime=(media.mime_type) {
            @if media.is_audio {
                @if let Some(cover) = thumbnail {
                    img class="builder-preview-cover" src=(cover) alt="";
                }
                audio id="preview-player" controls="" preload="metadata" {
                    source src=(url) type=(media.mime_type);
                }
            } @else {
                video id="preview-player" controls="" preload="metadata" poster=[thumbnail] {
                    source src=(url) type=(media.mime_type);
                }
            }
            p class="builder-preview-meta" { (media.filename) " (" (media.mime_type) ")" }
        }
    }
}

fn upload_form(kind: &str, target: &str, label: &str, accept: &str) -> Markup {
    html! {
        form class="upload-form" method="post" action="/api/upload"
            enctype="multipart/form-data" data-target=(target) {
            input type="hidden" name="type" value=(kind);
            label { (label) input type="file" name="file" accept=(accept) required; }
            button type="submit" { "Upload" }
            span class="upload-status" role="status" {}
        }
    }
}

/// Additional CSS for the builder page only.
const HOME_CSS: &str = r#"
.builder{display:flex;flex-direction:column;align-items:center;text-align:center;padding:2rem 1rem}
.builder-title{font-size:2.5rem;font-weight:800;letter-spacing:-.04em;color:var(--fg)}
.builder-tagline{font-size:1.05rem;color:var(--fg2);margin-top:.5rem;max-width:460px}
.builder-form{display:flex;flex-direction:column;gap:.5rem;width:100%;max-width:460px;margin-top:2rem;text-align:left}
.builder-form label{font-size:.8rem;font-weight:600;color:var(--fg3);text-transform:uppercase;letter-spacing:.05em}
.builder-form input[type=url]{font:inherit;padding:.6rem .75rem;border-radius:6px;border:1px solid var(--border);background:var(--surface);color:var(--fg)}
.builder-check{display:flex;align-items:center;gap:.4rem;text-transform:none!important;font-size:.95rem!important;color:var(--fg2)!important}
.builder-submit{margin-top:.5rem;font:inherit;font-weight:600;padding:.6rem;border:none;border-radius:6px;background:var(--accent);color:#fff;cursor:pointer}
.builder-submit:hover{background:var(--accent-hover)}
.builder-result{display:flex;align-items:center;justify-content:center;gap:.5rem;width:100%;max-width:460px;margin-top:1.5rem;padding:.6rem .75rem;border-radius:6px;border:1px solid var(--border);word-break:break-all;font-family:var(--mono);font-size:.85rem}
.builder-error{color:var(--error);border-color:var(--error);font-family:inherit}
.builder-placeholder{color:var(--fg3)}
.builder-highlight{color:var(--accent);font-weight:600}
.builder-note{margin-top:1.25rem;font-size:.8rem;color:var(--fg3);max-width:460px}
.builder-preview{width:100%;max-width:460px;margin-top:1rem}
.builder-preview video,.builder-preview audio{width:100%;border-radius:6px;background:#000}
.builder-preview-cover{max-width:100%;border-radius:6px;margin-bottom:.5rem}
.builder-preview-meta{font-size:.8rem;color:var(--fg3);font-family:var(--mono)}
.uploads{display:flex;flex-direction:column;gap:.75rem;width:100%;max-width:460px;margin-top:1.5rem;text-align:left}
.upload-form{display:flex;flex-wrap:wrap;align-items:center;gap:.5rem;font-size:.85rem;color:var(--fg2)}
.upload-form label{display:flex;flex-direction:column;gap:.25rem;flex:1}
.upload-form button{font:inherit;padding:.35rem .75rem;border:1px solid var(--border);border-radius:6px;background:var(--surface);color:var(--accent);cursor:pointer}
.upload-status{font-size:.8rem;color:var(--fg3)}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use vembed_core::Pipeline;

    const BASE: &str = "https://v.example";

    fn page(form: &EmbedForm) -> String {
        let preview = Pipeline::default().preview(form);
        render(form, preview.as_ref(), &MediaTable::default(), "s").into_string()
    }

    fn settled(url: &str, thumbnail: Option<&str>, audio: bool) -> EmbedForm {
        let mut form = EmbedForm::new(BASE);
        form.set_media_url(url);
        form.set_thumbnail_url(thumbnail.map(str::to_string));
        form.set_force_audio(audio);
        form.validate(&MediaTable::default());
        form
    }

    #[test]
    fn empty_form_shows_base() {
        let html = render(&EmbedForm::new(BASE), None, &MediaTable::default(), "Embedded Video").into_string();
        assert!(html.contains("<title>Embedded Video</title>"));
        assert!(html.contains("builder-placeholder"));
        assert!(html.contains(BASE));
        assert!(!html.contains("embed-link"));
    }

    #[test]
    fn valid_form_shows_link_and_copy_button() {
        let form = settled("https://host/a.mp4", Some("https://img/t.png"), true);
        let html = page(&form);
        let link = "https://v.example/https://host/a.mp4?a=audio&amp;i=https://img/t.png";
        assert!(html.contains(&format!(r#"href="{link}""#)));
        assert!(html.contains(r#"id="embed-link""#));
        assert!(html.contains("copy-btn"));
        assert!(html.contains(r#"value="https://host/a.mp4""#));
        assert!(html.contains("checked"));
    }

    #[test]
    fn invalid_form_shows_message() {
        let form = settled("ftp://host/a.mp4", None, false);
        let html = page(&form);
        assert!(html.contains("URL must start with https:// or http://"));
        assert!(html.contains(r#"data-code="DISALLOWED_PROTOCOL""#));
        assert!(!html.contains(r#"id="embed-link""#));
    }

    #[test]
    fn inputs_are_escaped() {
        let form = settled(r#""><script>alert(1)</script>"#, None, false);
        let html = page(&form);
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn unchecked_audio_box() {
        let form = settled("https://host/a.mp4", None, false);
        let html = page(&form);
        assert!(!html.contains("checked"));
    }

    #[test]
    fn valid_video_is_previewed() {
        let form = settled("https://host/a.webm", Some("https://img/t.png"), false);
        let html = page(&form);
        assert!(html.contains(r#"<video id="preview-player" controls="" preload="metadata" poster="https://img/t.png">"#));
        assert!(html.contains(r#"<source src="https://host/a.webm" type="video/webm">"#));
        assert!(html.contains("a.webm (video/webm)"));
    }

    #[test]
    fn forced_audio_is_previewed_as_audio() {
        let form = settled("https://host/a.mp4", Some("https://img/t.png"), true);
        let html = page(&form);
        assert!(html.contains(r#"<audio id="preview-player""#));
        assert!(html.contains(r#"type="audio/mp4""#));
        assert!(html.contains(r#"class="builder-preview-cover" src="https://img/t.png""#));
        assert!(!html.contains("<video"));
    }

    #[test]
    fn invalid_form_has_no_preview() {
        let form = settled("https://host/page.html", None, false);
        let html = page(&form);
        assert!(!html.contains("preview-player"));
        assert!(!html.contains("builder-preview\""));
    }

    #[test]
    fn upload_forms_post_to_relay() {
        let html = page(&EmbedForm::new(BASE));
        assert_eq!(html.matches(r#"action="/api/upload""#).count(), 2);
        assert_eq!(html.matches(r#"enctype="multipart/form-data""#).count(), 2);
        assert!(html.contains(r#"<input type="hidden" name="type" value="video">"#));
        assert!(html.contains(r#"<input type="hidden" name="type" value="thumbnail">"#));
        assert!(html.contains(r#"data-target="url""#));
        assert!(html.contains(r#"data-target="thumbnail""#));
        assert!(html.contains(r#"accept="image/*""#));
        assert!(html.contains("fetch(f.action"));
    }
}
