//! HTML serializer
//!
//! Two-space indented output. Form state held in `value` attributes is
//! rendered the way a browser would show it: textarea content, selected
//! option.

use crate::element::Element;
use std::fmt::Write;

const VOID: [&str; 2] = ["input", "img"];

/// Serialize an element tree
#[must_use]
pub fn render(root: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, root, 0, None);
    out
}

fn write_element(out: &mut String, e: &Element, depth: usize, selected: Option<&str>) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", e.tag());
    if !e.class_list().is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_attr(&e.class_list().join(" ")));
    }

    let value_as_content = matches!(e.tag(), "textarea" | "select");
    for (name, value) in e.attrs() {
        if value_as_content && name == "value" {
            continue;
        }
        let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
    }
    if e.tag() == "option" && selected.is_some() && e.get_attr("value") == selected {
        out.push_str(" selected");
    }
    out.push('>');

    if VOID.contains(&e.tag()) {
        out.push('\n');
        return;
    }

    let text = if e.tag() == "textarea" {
        e.get_attr("value")
    } else {
        e.text_content()
    };

    if e.child_nodes().is_empty() {
        if let Some(text) = text {
            out.push_str(&escape_text(text));
        }
        let _ = writeln!(out, "</{}>", e.tag());
        return;
    }

    out.push('\n');
    if let Some(text) = text {
        let _ = writeln!(out, "{indent}  {}", escape_text(text));
    }
    let selected = if e.tag() == "select" {
        e.get_attr("value")
    } else {
        None
    };
    for child in e.child_nodes() {
        write_element(out, child, depth + 1, selected);
    }
    let _ = writeln!(out, "{indent}</{}>", e.tag());
}

/// Escape text content
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape an attribute value (double-quoted)
#[must_use]
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_output() {
        let e = Element::new("ul").class("list").child(
            Element::new("li")
                .class("item")
                .attr("data-id", 3)
                .text("a < b"),
        );
        assert_eq!(
            render(&e),
            "<ul class=\"list\">\n  <li class=\"item\" data-id=\"3\">a &lt; b</li>\n</ul>\n"
        );
    }

    #[test]
    fn void_elements_have_no_close_tag() {
        let e = Element::new("img").attr("src", "x.png").attr("alt", "");
        assert_eq!(render(&e), "<img src=\"x.png\" alt=\"\">\n");
    }

    #[test]
    fn attribute_quotes_escaped() {
        let e = Element::new("input").attr("value", "say \"hi\" & go");
        assert_eq!(
            render(&e),
            "<input value=\"say &quot;hi&quot; &amp; go\">\n"
        );
    }

    #[test]
    fn form_state_rendered_as_content() {
        let area = Element::new("textarea").attr("value", "specs");
        assert_eq!(render(&area), "<textarea>specs</textarea>\n");

        let select = Element::new("select").attr("value", "B").children([
            Element::new("option").attr("value", "A").text("a"),
            Element::new("option").attr("value", "B").text("b"),
        ]);
        let html = render(&select);
        assert!(html.contains("<option value=\"B\" selected>b</option>"));
        assert!(html.contains("<option value=\"A\">a</option>"));
    }
}
