//! Inline markup used by dialogue responses.
//!
//! Understands `<b>`/`<strong>`, `<i>`/`<em>`, `<br>`, `<span style="color: …">`
//! and `<font color="…">`. Other tags are dropped and their text is kept.
use bevy::prelude::*;

use crate::systems::colors::parse_css_colour;

#[derive(Debug, Clone, PartialEq)]
pub struct RichSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub colour: Option<Color>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SpanStyle {
    bold: bool,
    italic: bool,
    colour: Option<Color>,
}

enum Tag {
    Break,
    Open { name: String, style: SpanStyle },
    Close { name: String },
    Ignored,
}

pub fn parse_markup(source: &str) -> Vec<RichSpan> {
    let mut spans = Vec::new();
    let mut open: Vec<(String, SpanStyle)> = Vec::new();
    let mut style = SpanStyle::default();
    let mut text = String::new();
    let mut rest = source;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let Some(end) = candidate.find('>') else {
            // A lone `<` is text.
            text.push_str(candidate);
            rest = "";
            break;
        };
        rest = &candidate[end + 1..];

        match parse_tag(&candidate[1..end], style) {
            Tag::Break => text.push('\n'),
            Tag::Open {
                name,
                style: opened,
            } => {
                flush(&mut spans, &mut text, style);
                open.push((name, style));
                style = opened;
            }
            Tag::Close { name } => {
                if let Some(position) = open.iter().rposition(|(open_name, _)| *open_name == name) {
                    flush(&mut spans, &mut text, style);
                    style = open[position].1;
                    open.truncate(position);
                }
            }
            Tag::Ignored => {}
        }
    }

    text.push_str(rest);
    flush(&mut spans, &mut text, style);
    spans
}

fn flush(spans: &mut Vec<RichSpan>, text: &mut String, style: SpanStyle) {
    if text.is_empty() {
        return;
    }
    spans.push(RichSpan {
        text: std::mem::take(text),
        bold: style.bold,
        italic: style.italic,
        colour: style.colour,
    });
}

fn parse_tag(raw: &str, current: SpanStyle) -> Tag {
    let raw = raw.trim().trim_end_matches('/').trim();
    let (closing, body) = match raw.strip_prefix('/') {
        Some(body) => (true, body.trim()),
        None => (false, raw),
    };
    let (name, attributes) = body
        .split_once(char::is_whitespace)
        .unwrap_or((body, ""));
    let name = name.to_ascii_lowercase();

    if name == "br" {
        return Tag::Break;
    }
    if !matches!(name.as_str(), "b" | "strong" | "i" | "em" | "span" | "font") {
        return Tag::Ignored;
    }
    if closing {
        return Tag::Close { name };
    }

    let mut style = current;
    match name.as_str() {
        "b" | "strong" => style.bold = true,
        "i" | "em" => style.italic = true,
        "span" => {
            if let Some(colour) = attribute_colour(attributes, "color:") {
                style.colour = Some(colour);
            }
        }
        _ => {
            if let Some(colour) = attribute_colour(attributes, "color=") {
                style.colour = Some(colour);
            }
        }
    }
    Tag::Open { name, style }
}

/// Reads the colour following `key` up to the next quote, `;` or space.
fn attribute_colour(attributes: &str, key: &str) -> Option<Color> {
    let lowered = attributes.to_ascii_lowercase();
    let start = lowered.find(key)? + key.len();
    let value = lowered[start..]
        .trim_start()
        .trim_start_matches(['"', '\''])
        .trim_start();
    let end = value
        .find(|c: char| matches!(c, '"' | '\'' | ';') || c.is_whitespace())
        .unwrap_or(value.len());
    parse_css_colour(&value[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> RichSpan {
        RichSpan {
            text: text.to_string(),
            bold: false,
            italic: false,
            colour: None,
        }
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(parse_markup("Hello, welcome."), vec![plain("Hello, welcome.")]);
        assert!(parse_markup("").is_empty());
    }

    #[test]
    fn bold_and_italic_nest() {
        let spans = parse_markup("a <b>bold <i>both</i></b> c");
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0], plain("a "));
        assert!(spans[1].bold && !spans[1].italic);
        assert!(spans[2].bold && spans[2].italic);
        assert_eq!(spans[2].text, "both");
        assert_eq!(spans[3], plain(" c"));
    }

    #[test]
    fn colours_from_span_and_font() {
        let spans = parse_markup(r#"<span style="color: #ff0000;">red</span><font color='#00ff00'>green</font>"#);
        assert_eq!(spans[0].colour, Some(Color::srgb(1.0, 0.0, 0.0)));
        assert_eq!(spans[1].colour, Some(Color::srgb(0.0, 1.0, 0.0)));
    }

    #[test]
    fn breaks_become_newlines_and_unknown_tags_keep_text() {
        assert_eq!(
            parse_markup("one<br>two<br/><u>three</u>"),
            vec![plain("one\ntwo\nthree")]
        );
    }

    #[test]
    fn stray_brackets_survive() {
        assert_eq!(parse_markup("1 < 2"), vec![plain("1 < 2")]);
        assert_eq!(parse_markup("</b>x"), vec![plain("x")]);
    }
}
