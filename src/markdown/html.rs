//! HtmlRenderer - full profile used on post detail pages.

use super::{Element, ElementRenderer};

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Escaped link target, or `#` when the scheme is not allowed.
///
/// Relative URLs and fragments pass. Control characters are removed before
/// the scheme is read.
fn safe_url(url: &str) -> String {
    let cleaned: String = url.chars().filter(|c| !c.is_ascii_control()).collect();
    let cleaned = cleaned.trim_matches(' ');

    match url_scheme(cleaned) {
        Some(scheme) if !ALLOWED_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) => {
            "#".to_string()
        }
        _ => escape_html(cleaned),
    }
}

/// The scheme of an absolute URL; `None` for relative references.
fn url_scheme(url: &str) -> Option<&str> {
    let end = url.find([':', '/', '?', '#'])?;
    if url[end..].starts_with(':') {
        Some(&url[..end])
    } else {
        None
    }
}

fn is_external(href: &str) -> bool {
    matches!(
        url_scheme(href),
        Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https")
    )
}

/// Renders block structure as HTML. Raw HTML in the source is escaped.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    /// Depth of open images; text inside goes into the `alt` attribute.
    in_image: usize,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElementRenderer for HtmlRenderer {
    fn start(&mut self, element: &Element, out: &mut String) {
        // Markup inside an image would end up in its alt attribute.
        if self.in_image > 0 {
            if matches!(element, Element::Image { .. }) {
                self.in_image += 1;
            }
            return;
        }
        match element {
            Element::Paragraph => out.push_str("<p>"),
            Element::Heading(level) => out.push_str(&format!("<h{}>", level)),
            Element::BlockQuote => out.push_str("<blockquote>\n"),
            Element::CodeBlock(Some(lang)) => out.push_str(&format!(
                "<pre><code class=\"language-{}\">",
                escape_html(lang)
            )),
            Element::CodeBlock(None) => out.push_str("<pre><code>"),
            Element::List(Some(1)) => out.push_str("<ol>\n"),
            Element::List(Some(start)) => out.push_str(&format!("<ol start=\"{}\">\n", start)),
            Element::List(None) => out.push_str("<ul>\n"),
            Element::Item => out.push_str("<li>"),
            Element::Emphasis => out.push_str("<em>"),
            Element::Strong => out.push_str("<strong>"),
            Element::Link { href, title } => {
                let href = safe_url(href);
                out.push_str("<a href=\"");
                out.push_str(&href);
                out.push('"');
                if !title.is_empty() {
                    out.push_str(" title=\"");
                    out.push_str(&escape_html(title));
                    out.push('"');
                }
                if is_external(&href) {
                    out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
                }
                out.push('>');
            }
            Element::Image { src, .. } => {
                out.push_str("<img src=\"");
                out.push_str(&safe_url(src));
                out.push_str("\" alt=\"");
                self.in_image += 1;
            }
            Element::Other => {}
        }
    }

    fn end(&mut self, element: &Element, out: &mut String) {
        if self.in_image > 0 {
            if !matches!(element, Element::Image { .. }) {
                return;
            }
            self.in_image -= 1;
            if self.in_image > 0 {
                return;
            }
        }
        match element {
            Element::Paragraph => out.push_str("</p>\n"),
            Element::Heading(level) => out.push_str(&format!("</h{}>\n", level)),
            Element::BlockQuote => out.push_str("</blockquote>\n"),
            Element::CodeBlock(_) => out.push_str("</code></pre>\n"),
            Element::List(Some(_)) => out.push_str("</ol>\n"),
            Element::List(None) => out.push_str("</ul>\n"),
            Element::Item => out.push_str("</li>\n"),
            Element::Emphasis => out.push_str("</em>"),
            Element::Strong => out.push_str("</strong>"),
            Element::Link { .. } => out.push_str("</a>"),
            Element::Image { title, .. } => {
                out.push('"');
                if !title.is_empty() {
                    out.push_str(" title=\"");
                    out.push_str(&escape_html(title));
                    out.push('"');
                }
                out.push_str(" />");
            }
            Element::Other => {}
        }
    }

    fn text(&mut self, text: &str, out: &mut String) {
        out.push_str(&escape_html(text));
    }

    fn code(&mut self, code: &str, out: &mut String) {
        if self.in_image > 0 {
            out.push_str(&escape_html(code));
        } else {
            out.push_str("<code>");
            out.push_str(&escape_html(code));
            out.push_str("</code>");
        }
    }

    fn soft_break(&mut self, out: &mut String) {
        out.push(if self.in_image > 0 { ' ' } else { '\n' });
    }

    fn hard_break(&mut self, out: &mut String) {
        if self.in_image > 0 {
            out.push(' ');
        } else {
            out.push_str("<br />\n");
        }
    }

    fn rule(&mut self, out: &mut String) {
        out.push_str("<hr />\n");
    }
}
