//! ExcerptRenderer - flattened profile used for list-page previews.

use super::{Element, ElementRenderer};

/// Collapses block structure into inline plain text.
///
/// Blocks end with a space separator, list items start with `• `, raw HTML
/// is dropped and links keep only their text. Output is plain text, not
/// HTML; escape it before embedding in markup.
#[derive(Debug, Default)]
pub struct ExcerptRenderer;

impl ExcerptRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ElementRenderer for ExcerptRenderer {
    fn start(&mut self, element: &Element, out: &mut String) {
        if let Element::Item = element {
            out.push_str("• ");
        }
    }

    fn end(&mut self, element: &Element, out: &mut String) {
        if element.is_block() {
            out.push(' ');
        }
    }

    fn text(&mut self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn html(&mut self, _html: &str, _out: &mut String) {}

    fn soft_break(&mut self, out: &mut String) {
        out.push(' ');
    }

    fn hard_break(&mut self, out: &mut String) {
        out.push(' ');
    }

    fn rule(&mut self, out: &mut String) {
        out.push(' ');
    }
}
