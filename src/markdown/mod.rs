//! Markdown rendering for post bodies.
//!
//! Parsing is done by pulldown-cmark (CommonMark, no extensions). Parser
//! events are translated into [`Element`]s and routed through an
//! [`ElementRenderer`], so a rendering profile is just a set of per-element
//! hooks:
//!
//! - [`render_full`] keeps block structure and emits HTML (detail pages).
//! - [`render_excerpt`] flattens everything to inline text and truncates it
//!   (list pages).

mod excerpt;
mod html;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

pub use excerpt::ExcerptRenderer;
pub use html::{escape_html, HtmlRenderer};

/// Characters kept by list-page previews.
pub const EXCERPT_CHARS: usize = 150;

/// A markdown element, as seen by renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Paragraph,
    /// Heading level 1-6.
    Heading(u8),
    BlockQuote,
    /// Fenced or indented code block, with the fence's language if any.
    CodeBlock(Option<String>),
    /// `Some(start)` for ordered lists.
    List(Option<u64>),
    Item,
    Emphasis,
    Strong,
    Link { href: String, title: String },
    Image { src: String, title: String },
    /// Raw HTML blocks and anything else without a dedicated hook.
    Other,
}

impl Element {
    /// Block-level elements separate their content from what follows.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Element::Paragraph
                | Element::Heading(_)
                | Element::BlockQuote
                | Element::CodeBlock(_)
                | Element::List(_)
                | Element::Item
                | Element::Other
        )
    }

    fn from_tag(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Paragraph => Element::Paragraph,
            Tag::Heading { level, .. } => Element::Heading(level as u8),
            Tag::BlockQuote(_) => Element::BlockQuote,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
                let lang = info.split_whitespace().next().map(str::to_string);
                Element::CodeBlock(lang)
            }
            Tag::CodeBlock(CodeBlockKind::Indented) => Element::CodeBlock(None),
            Tag::List(start) => Element::List(start),
            Tag::Item => Element::Item,
            Tag::Emphasis => Element::Emphasis,
            Tag::Strong => Element::Strong,
            Tag::Link {
                dest_url, title, ..
            } => Element::Link {
                href: dest_url.to_string(),
                title: title.to_string(),
            },
            Tag::Image {
                dest_url, title, ..
            } => Element::Image {
                src: dest_url.to_string(),
                title: title.to_string(),
            },
            _ => Element::Other,
        }
    }
}

/// Per-element rendering hooks.
///
/// `start` and `end` are called in properly nested pairs. The leaf hooks
/// default to the obvious plain-text behaviour.
pub trait ElementRenderer {
    fn start(&mut self, element: &Element, out: &mut String);

    fn end(&mut self, element: &Element, out: &mut String);

    fn text(&mut self, text: &str, out: &mut String);

    /// Inline code span.
    fn code(&mut self, code: &str, out: &mut String) {
        self.text(code, out);
    }

    /// Raw HTML found in the source.
    fn html(&mut self, html: &str, out: &mut String) {
        self.text(html, out);
    }

    fn soft_break(&mut self, out: &mut String) {
        out.push('\n');
    }

    fn hard_break(&mut self, out: &mut String) {
        out.push('\n');
    }

    fn rule(&mut self, _out: &mut String) {}
}

/// Drive `renderer` over the events of `markdown`.
pub fn render_with<R: ElementRenderer>(markdown: &str, renderer: &mut R) -> String {
    let mut out = String::with_capacity(markdown.len() + markdown.len() / 4);
    let mut open: Vec<Element> = Vec::new();

    for event in Parser::new_ext(markdown, Options::empty()) {
        match event {
            Event::Start(tag) => {
                let element = Element::from_tag(tag);
                renderer.start(&element, &mut out);
                open.push(element);
            }
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    renderer.end(&element, &mut out);
                }
            }
            Event::Text(text) => renderer.text(&text, &mut out),
            Event::Code(code) => renderer.code(&code, &mut out),
            Event::Html(html) | Event::InlineHtml(html) => renderer.html(&html, &mut out),
            Event::SoftBreak => renderer.soft_break(&mut out),
            Event::HardBreak => renderer.hard_break(&mut out),
            Event::Rule => renderer.rule(&mut out),
            _ => {}
        }
    }

    out
}

/// Full profile: HTML preserving block structure.
pub fn render_full(markdown: &str) -> String {
    render_with(markdown, &mut HtmlRenderer::new())
}

/// Flattened profile: single-line plain text, cut to `max_chars`
/// characters with a trailing `...` when longer.
pub fn render_excerpt(markdown: &str, max_chars: usize) -> String {
    let flat = render_with(markdown, &mut ExcerptRenderer::new());
    let normalized = flat.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&normalized, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
