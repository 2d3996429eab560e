//! Shared styles, headers and fragments used by the HTML pages.

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Inline CSS for the builder page.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fafafa;--fg:#111;--fg2:#555;--fg3:#999;--accent:#9900CC;--accent-hover:#7a00a3;--surface:#fff;--border:rgba(153,0,204,.15);--error:#c0262d;--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:1.5rem 1rem}
main{max-width:680px;width:100%;flex:1}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
svg.icon{width:20px;height:20px;fill:currentColor;stroke:none;vertical-align:-3px;flex-shrink:0}

.copy-btn{background:none;border:none;cursor:pointer;color:var(--fg2);padding:2px;border-radius:4px;flex-shrink:0;display:flex;align-items:center}
.copy-btn:hover{color:var(--accent)}
.copy-btn svg.icon{width:16px;height:16px}

.footer{text-align:center;margin-top:1rem;padding-top:.75rem;font-size:.8rem;color:var(--fg3);letter-spacing:.01em;width:100%;max-width:680px}

@media(prefers-color-scheme:dark){
:root{--bg:#0a0a0f;--fg:#e5e5e5;--fg2:#a0a0a0;--fg3:#666;--accent:#d946ef;--accent-hover:#e879f9;--surface:#111118;--border:rgba(191,0,255,.2);--error:#ff6b6b}
.copy-btn:hover{background:#1a1a2e}
}
"#;

/// Inline CSS for player pages: the media fills a black viewport.
pub const PLAYER_CSS: &str = r#"
body{margin:0;background:#000;display:flex;justify-content:center;align-items:center;min-height:100vh}
.media-container{position:relative;max-width:100%;max-height:100vh;display:flex;flex-direction:column;align-items:center}
video,audio{max-width:100%;max-height:100vh}
.cover{max-width:100%;max-height:80vh;display:block;margin-bottom:1rem}
"#;

/// Content-Security-Policy for player pages.
///
/// Media and images come from arbitrary http(s) hosts. One inline script
/// updates the size meta tags.
pub const PLAYER_CSP: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; media-src http: https:; img-src http: https: data:; form-action 'none'; base-uri 'none'";

/// Content-Security-Policy for the builder page.
pub const HOME_CSP: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; media-src http: https:; img-src 'self' http: https: data:; connect-src 'self'; form-action 'self'; base-uri 'none'; frame-ancestors 'none'";

/// Copy icon (Phosphor copy, fill)
pub const ICON_COPY: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M216,32H88a8,8,0,0,0-8,8V80H40a8,8,0,0,0-8,8V216a8,8,0,0,0,8,8H168a8,8,0,0,0,8-8V176h40a8,8,0,0,0,8-8V40A8,8,0,0,0,216,32Zm-56,176H48V96H160Zm48-48H176V88a8,8,0,0,0-8-8H96V48H208Z"/></svg>"#;

/// Wrap a body into a complete builder-style page.
pub fn page_shell(title: &str, description: &str, site_name: &str, extra_css: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                meta property="og:title" content=(title);
                meta property="og:description" content=(description);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content="website";
                style { (PreEscaped(PAGE_CSS)) }
                style { (PreEscaped(extra_css)) }
            }
            body {
                main { (body) }
                footer class="footer" {
                    "Media stays on its own host; this page only points at it."
                }
            }
        }
    }
}

/// A copy-to-clipboard button that copies the text of element `target_id`.
pub fn copy_button(target_id: &str, label: &str) -> Markup {
    html! {
        button type="button" class="copy-btn" title=(label)
            onclick=(format!(
                "navigator.clipboard.writeText(document.getElementById('{target_id}').textContent).then(()=>{{this.innerHTML='Copied!';setTimeout(()=>this.innerHTML='{}',1500)}})",
                ICON_COPY.replace('"', "&quot;")
            )) {
            (PreEscaped(ICON_COPY))
        }
    }
}
