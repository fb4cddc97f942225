//! Minimal XML element tree with escaping and indented rendering.
//!
//! VAST documents are small and fully tree-shaped, so a dedicated writer
//! keeps the generator free of parser-oriented machinery.

use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub(crate) struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        let _ = write!(out, "{pad}<{}", self.name);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {k}=\"{}\"", escape(v));
        }

        match (&self.text, self.children.is_empty()) {
            (None, true) => {
                let _ = writeln!(out, "/>");
            }
            (Some(text), true) => {
                let _ = writeln!(out, ">{}</{}>", escape(text), self.name);
            }
            _ => {
                let _ = writeln!(out, ">");
                if let Some(text) = &self.text {
                    let _ = writeln!(out, "{pad}  {}", escape(text));
                }
                for child in &self.children {
                    child.write(out, depth + 1);
                }
                let _ = writeln!(out, "{pad}</{}>", self.name);
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaping() {
        let el = Element::new("Impression").text("https://x.example/p?a=1&cb=[CB]");
        assert!(el.render().contains("a=1&amp;cb=[CB]"));
    }

    #[test]
    fn test_nesting_and_attrs() {
        let el = Element::new("VAST")
            .attr("version", "4.2")
            .child(Element::new("Ad").attr("id", "a-1"));
        let xml = el.render();
        assert!(xml.starts_with("<VAST version=\"4.2\">"));
        assert!(xml.contains("  <Ad id=\"a-1\"/>"));
        assert!(xml.trim_end().ends_with("</VAST>"));
    }
}
