//! HTML serialization of a [`Document`].

use std::fmt::Write;

use crate::document::{Document, ElementId};

impl Document {
    /// Serialize the whole document, root included.
    pub fn to_html(&self) -> String {
        self.to_html_of(self.root())
    }

    /// Serialize one element and its subtree. Stale handles yield an empty string.
    pub fn to_html_of(&self, el: ElementId) -> String {
        let mut out = String::new();
        self.write_element(el, &mut out);
        out
    }

    fn write_element(&self, el: ElementId, out: &mut String) {
        let Some(tag) = self.tag(el) else {
            return;
        };
        out.push('<');
        out.push_str(tag);
        let classes = self.class_list(el);
        if !classes.is_empty() {
            out.push_str(" class=\"");
            escape_into(&classes.join(" "), out);
            out.push('"');
        }
        out.push('>');
        escape_into(self.text(el), out);
        for &child in self.children(el) {
            self.write_element(child, out);
        }
        let _ = write!(out, "</{}>", tag);
    }
}

fn escape_into(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
