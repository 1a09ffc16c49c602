// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The classic Wadler XML pretty printer, adapted from the teacher's own
//! `xml.rs` demo to the annotation-parametric core: an element either
//! renders entirely on one line or entirely as a block (one child per
//! line), with the choice made by a single [`group`] wrapping the whole
//! body — never a per-child decision — so the output is always one of
//! exactly two strings for any given document and page width.

use crate::combinators::{group, hsep, line, text};
use crate::doc::Doc;
use crate::flatten::flatten;
use crate::layout::{layout_pretty, layout_unbounded, LayoutOptions};
use crate::page_width::PageWidth;
use crate::render::render_s;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XML {
    Element { name: String, attrs: Vec<Attribute>, body: Vec<XML> },
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

impl XML {
    pub fn text<S: Into<String>>(s: S) -> Self {
        XML::Text(s.into())
    }

    pub fn element<N: Into<String>>(name: N, attrs: Vec<Attribute>, body: Vec<XML>) -> Self {
        XML::Element { name: name.into(), attrs, body }
    }

    pub fn elem(name: &str, attrs: Vec<(&str, &str)>, children: Vec<XML>) -> Self {
        let attrs = attrs.into_iter().map(|(n, v)| Attribute::new(n, v)).collect();
        XML::Element { name: name.into(), attrs, body: children }
    }
}

fn attrs_doc(attrs: &[Attribute]) -> Doc<()> {
    if attrs.is_empty() {
        return Doc::empty();
    }
    let parts = attrs.iter().map(|a| {
        text(&a.name).cat(text("=\"")).cat(text(escape_attr(&a.value))).cat(Doc::char('"'))
    });
    Doc::char(' ').cat(hsep(parts))
}

/// `open <> nest(4, line <> body) <> line <> close`, all under one
/// [`group`]: the textbook Wadler XML block shape. Flattening turns every
/// `line` into a single space, so the flat form has one space after the
/// opening tag, one between each child, and one before the closing tag.
pub fn xml_doc_pretty(x: &XML) -> Doc<()> {
    match x {
        XML::Text(s) => text(escape_text(s)),

        XML::Element { name, attrs, body } => {
            let open_head = Doc::char('<').cat(text(name)).cat(attrs_doc(attrs));

            if body.is_empty() {
                return open_head.cat(text(" />"));
            }

            let open = open_head.cat(Doc::char('>'));
            let close = text("</").cat(text(name)).cat(Doc::char('>'));

            if body.iter().any(|child| matches!(child, XML::Text(_))) {
                return open.cat(hsep(body.iter().map(xml_doc_pretty))).cat(close);
            }

            let kids = body
                .iter()
                .map(xml_doc_pretty)
                .reduce(|a, b| a.cat(line()).cat(b))
                .unwrap_or_else(Doc::empty);

            group(open.cat(line().cat(kids).nest(4)).cat(line()).cat(close))
        }
    }
}

pub fn xml_doc_compact(x: &XML) -> Doc<()> {
    flatten(&xml_doc_pretty(x))
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_pretty(d: &Doc<()>, width: usize) -> String {
    render_s(&layout_pretty(d, LayoutOptions::new(PageWidth::available_per_line(width, 1.0))))
}

fn render_compact(d: &Doc<()>) -> String {
    render_s(&layout_unbounded(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn t1_single_text_child_is_always_inline() {
        let xml = XML::elem("p", vec![], vec![XML::text("Hello")]);
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 120), @"<p>Hello</p>");
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 2), @"<p>Hello</p>");
        assert_eq!(render_compact(&xml_doc_compact(&xml)), "<p>Hello</p>");
    }

    #[test]
    fn t2_attrs_and_nested_element_child_can_break() {
        let xml = XML::elem(
            "a",
            vec![("href", "/docs")],
            vec![XML::elem("b", vec![], vec![XML::text("click")])],
        );
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 120), @r###"<a href="/docs"> <b>click</b> </a>"###);
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 12), @r###"
        <a href="/docs">
            <b>click</b>
        </a>
        "###);
    }

    #[test]
    fn t3_self_closing_never_breaks() {
        let xml = XML::element("img".to_string(), vec![Attribute::new("src", "logo.png")], vec![]);
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 120), @r###"<img src="logo.png" />"###);
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 5), @r###"<img src="logo.png" />"###);
    }

    #[test]
    fn t4_escaping_in_text_and_attributes() {
        let xml = XML::elem(
            "msg",
            vec![("title", r#"He said "hi" & left <quickly>"#)],
            vec![XML::text("5 < 7 & 9 > 3")],
        );
        assert_snapshot!(
            render_pretty(&xml_doc_pretty(&xml), 120),
            @r###"<msg title="He said &quot;hi&quot; &amp; left &lt;quickly&gt;">5 &lt; 7 &amp; 9 &gt; 3</msg>"###
        );
    }

    #[test]
    fn t5_mixed_inline_children() {
        let xml = XML::elem(
            "p",
            vec![],
            vec![XML::text("Hello "), XML::elem("em", vec![], vec![XML::text("world")]), XML::text("!")],
        );
        // hsep is a plain space-joiner with no awareness of a text node's
        // own trailing space, so "Hello " followed by a separator space
        // doubles up — a quirk inherited unchanged from the untyped join.
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 120), @"<p>Hello  <em>world</em> !</p>");
    }

    #[test]
    fn t6_three_block_children_fit_or_break() {
        let li = |s: &str| XML::elem("li", vec![], vec![XML::text(s)]);
        let xml = XML::elem("ul", vec![], vec![li("one"), li("two"), li("three")]);

        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 60), @"<ul> <li>one</li> <li>two</li> <li>three</li> </ul>");
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 20), @r###"
        <ul>
            <li>one</li>
            <li>two</li>
            <li>three</li>
        </ul>
        "###);
    }

    #[test]
    fn t7_five_block_children_fit_or_break() {
        let li = |s: &str| XML::elem("li", vec![], vec![XML::text(s)]);
        let xml = XML::elem(
            "ul",
            vec![],
            vec![li("one"), li("two"), li("three"), li("four"), li("five")],
        );

        assert_snapshot!(
            render_pretty(&xml_doc_pretty(&xml), 90),
            @"<ul> <li>one</li> <li>two</li> <li>three</li> <li>four</li> <li>five</li> </ul>"
        );
        assert_snapshot!(render_pretty(&xml_doc_pretty(&xml), 20), @r###"
        <ul>
            <li>one</li>
            <li>two</li>
            <li>three</li>
            <li>four</li>
            <li>five</li>
        </ul>
        "###);
    }
}
