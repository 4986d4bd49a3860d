//! Detached view-tree nodes and their HTML serialization.
//!
//! Constructors never attach anything; callers append nodes to a parent or to the
//! render target themselves.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    H1,
    H2,
    Span,
    P,
    Br,
    Hr,
    Table,
    Tr,
    Td,
    Th,
}

impl Tag {
    fn name(self) -> &'static str {
        match self {
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::Span => "span",
            Tag::P => "p",
            Tag::Br => "br",
            Tag::Hr => "hr",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Th => "th",
        }
    }

    fn is_void(self) -> bool {
        matches!(self, Tag::Br | Tag::Hr)
    }
}

/// Presentation hints; serialized as inline style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    pub width_px: Option<u32>,
    pub monospace: bool,
    pub small_font: bool,
    pub fixed_layout: bool,
    pub colspan: Option<usize>,
}

impl Style {
    fn css(&self) -> String {
        let mut css = String::new();
        if let Some(width) = self.width_px {
            let _ = write!(css, "width: {}px;", width);
        }
        if self.monospace {
            css.push_str("font-family: monospace;");
        }
        if self.small_font {
            css.push_str("font-size: 0.8rem;");
        }
        if self.fixed_layout {
            css.push_str("table-layout: fixed;");
        }
        css
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub tag: Tag,
    pub text: String,
    pub style: Style,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn append(&mut self, child: ViewNode) {
        self.children.push(child);
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let name = self.tag.name();
        out.push('<');
        out.push_str(name);
        let css = self.style.css();
        if !css.is_empty() {
            let _ = write!(out, " style=\"{}\"", css);
        }
        if let Some(span) = self.style.colspan {
            let _ = write!(out, " colspan=\"{}\"", span);
        }
        out.push('>');
        if self.tag.is_void() {
            return;
        }
        escape_into(&self.text, out);
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", name);
    }
}

#[cfg(test)]
impl ViewNode {
    /// Data rows of a table, i.e. every row that is not made of header cells.
    pub fn data_rows(&self) -> impl Iterator<Item = &ViewNode> {
        self.children
            .iter()
            .filter(|row| row.tag == Tag::Tr && !row.children.iter().any(|c| c.tag == Tag::Th))
    }

    /// Cell texts of a row.
    pub fn cell_texts(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.text.as_str()).collect()
    }
}

pub fn render_all(nodes: &[ViewNode]) -> String {
    nodes.iter().map(ViewNode::to_html).collect()
}

fn escape_into(text: &str, out: &mut String) {
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
}

pub fn h1(text: impl Into<String>) -> ViewNode {
    ViewNode::new(Tag::H1, text)
}

pub fn h2(text: impl Into<String>) -> ViewNode {
    ViewNode::new(Tag::H2, text)
}

#[allow(dead_code)]
pub fn span(text: impl Into<String>) -> ViewNode {
    ViewNode::new(Tag::Span, text)
}

pub fn p(text: impl Into<String>) -> ViewNode {
    ViewNode::new(Tag::P, text)
}

#[allow(dead_code)]
pub fn br() -> ViewNode {
    ViewNode::new(Tag::Br, "")
}

#[allow(dead_code)]
pub fn hr() -> ViewNode {
    ViewNode::new(Tag::Hr, "")
}

pub fn table() -> ViewNode {
    ViewNode::new(Tag::Table, "")
}

pub fn tr() -> ViewNode {
    ViewNode::new(Tag::Tr, "")
}

pub fn td(text: impl Into<String>) -> ViewNode {
    ViewNode::new(Tag::Td, text)
}

pub fn th(text: impl Into<String>, width_px: Option<u32>) -> ViewNode {
    ViewNode::new(Tag::Th, text).with_style(Style {
        width_px,
        ..Style::default()
    })
}
