use std::fmt::Write;

use super::Element;
use super::Node;

/// Escapes text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
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

impl Element {
    /// Serializes the subtree as HTML.
    ///
    /// Triggers get a `data-action` attribute naming their action; hidden
    /// elements get `style="display:none"`.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let tag = self.tag.name();
        out.push('<');
        out.push_str(tag);
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape_html(id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        if let Some(action) = &self.action {
            let _ = write!(out, " data-action=\"{}\"", escape_html(&action.to_string()));
        }
        if self.hidden {
            out.push_str(" style=\"display:none\"");
        }
        out.push('>');

        for node in &self.children {
            match node {
                Node::Element(child) => child.write_html(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::Html(html) => out.push_str(html),
            }
        }

        let _ = write!(out, "</{tag}>");
    }
}
