use std::fmt::Write as _;

use crate::tts::voice;

/// What the page shows besides the form.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub text: &'a str,
    pub voice: Option<&'a str>,
    pub audio: Option<Audio<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct Audio<'a> {
    pub mime: &'a str,
    pub base64: &'a str,
}

pub fn render(view: &PageView<'_>) -> String {
    let selected = view.voice.unwrap_or(voice::DEFAULT_VOICE);

    let mut options = String::new();
    for name in voice::known_voices() {
        let marker = if name == selected { " selected" } else { "" };
        let _ = writeln!(
            options,
            r#"        <option value="{0}"{1}>{0}</option>"#,
            escape(name),
            marker
        );
    }
    // Keep a voice the list does not know so the form round-trips it
    if !voice::known_voices().any(|name| name == selected) {
        let _ = writeln!(
            options,
            r#"        <option value="{0}" selected>{0}</option>"#,
            escape(selected)
        );
    }

    let player = match &view.audio {
        Some(audio) => format!(
            r#"    <section id="player">
      <audio controls autoplay src="data:{};base64,{}"></audio>
    </section>
"#,
            escape(audio.mime),
            escape(audio.base64)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Text to Speech</title>
  </head>
  <body>
    <h1>Text to Speech</h1>
    <form method="post" action="/">
      <textarea name="text" rows="6" cols="60" placeholder="Type something to hear it spoken">{text}</textarea>
      <select name="voice">
{options}      </select>
      <button type="submit">Speak</button>
    </form>
{player}  </body>
</html>
"#,
        text = escape(view.text),
        options = options,
        player = player,
    )
}

/// Escapes text for HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_has_no_audio() {
        let html = render(&PageView::default());
        assert!(html.contains("<form"));
        assert!(!html.contains("<audio"));
        assert!(html.contains(r#"<option value="Joanna" selected>"#));
    }

    #[test]
    fn test_audio_embedded_verbatim() {
        let html = render(&PageView {
            text: "Hello world",
            voice: Some("Joanna"),
            audio: Some(Audio {
                mime: "audio/mpeg",
                base64: "SGVsbG8=",
            }),
        });
        assert!(html.contains(r#"src="data:audio/mpeg;base64,SGVsbG8=""#));
        assert!(html.contains(">Hello world</textarea>"));
    }

    #[test]
    fn test_submitted_text_is_escaped() {
        let html = render(&PageView {
            text: "</textarea><script>alert(1)</script>",
            ..Default::default()
        });
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_voice_kept_selected() {
        let html = render(&PageView {
            voice: Some("en-gb"),
            ..Default::default()
        });
        assert!(html.contains(r#"<option value="en-gb" selected>en-gb</option>"#));
        assert!(!html.contains(r#"<option value="Joanna" selected>"#));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b "c" 'd'"#), "a&amp;b &quot;c&quot; &#39;d&#39;");
        assert_eq!(escape("SGVsbG8+/w=="), "SGVsbG8+/w==");
    }
}
