//! Markup and plain-text renderers for `Renderable`.
//!
//! Every leaf string and every mapping key goes through `escape` before it is
//! embedded. API payloads are third-party content.

use crate::render::Renderable;
use std::fmt::Write;

pub const NULL_MARKER: &str = r#"<span class="null">null</span>"#;

/// Escape the five reserved markup characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a value as nested list markup.
///
/// - Null: null marker
/// - Scalar: escaped text in a value span
/// - Sequence: `<ul class="seq">` with one `<li>` per member
/// - Mapping: `<ul class="map">` with one `<li><strong>key</strong>: ...</li>` per entry
pub fn render(value: &Renderable) -> String {
    let mut out = String::new();
    write_markup(value, &mut out);
    out
}

fn write_markup(value: &Renderable, out: &mut String) {
    match value {
        Renderable::Null => out.push_str(NULL_MARKER),
        Renderable::Scalar(s) => {
            out.push_str(r#"<span class="value">"#);
            out.push_str(&escape(&s.to_string()));
            out.push_str("</span>");
        }
        Renderable::Sequence(items) => {
            out.push_str(r#"<ul class="seq">"#);
            for item in items {
                out.push_str("<li>");
                write_markup(item, out);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Renderable::Mapping(entries) => {
            out.push_str(r#"<ul class="map">"#);
            for (key, v) in entries {
                out.push_str("<li><strong>");
                out.push_str(&escape(key));
                out.push_str("</strong>: ");
                write_markup(v, out);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
    }
}

/// Render a value as an indented tree for terminals. Nothing is escaped.
pub fn render_text(value: &Renderable) -> String {
    let mut out = String::new();
    match value {
        Renderable::Sequence(items) if !items.is_empty() => write_text(value, 0, &mut out),
        Renderable::Mapping(entries) if !entries.is_empty() => write_text(value, 0, &mut out),
        _ => {
            out.push_str(&inline_text(value));
            out.push('\n');
        }
    }
    out
}

fn inline_text(value: &Renderable) -> String {
    match value {
        Renderable::Null => "null".to_string(),
        Renderable::Scalar(s) => s.to_string(),
        Renderable::Sequence(_) => "[]".to_string(),
        Renderable::Mapping(_) => "{}".to_string(),
    }
}

fn is_branch(value: &Renderable) -> bool {
    match value {
        Renderable::Sequence(items) => !items.is_empty(),
        Renderable::Mapping(entries) => !entries.is_empty(),
        _ => false,
    }
}

fn write_text(value: &Renderable, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match value {
        Renderable::Sequence(items) => {
            for item in items {
                if is_branch(item) {
                    let _ = writeln!(out, "{}-", pad);
                    write_text(item, depth + 1, out);
                } else {
                    let _ = writeln!(out, "{}- {}", pad, inline_text(item));
                }
            }
        }
        Renderable::Mapping(entries) => {
            for (key, v) in entries {
                if is_branch(v) {
                    let _ = writeln!(out, "{}{}:", pad, key);
                    write_text(v, depth + 1, out);
                } else {
                    let _ = writeln!(out, "{}{}: {}", pad, key, inline_text(v));
                }
            }
        }
        _ => {
            let _ = writeln!(out, "{}{}", pad, inline_text(value));
        }
    }
}
