//! Type → element mapping shared by every renderer.
//!
//! The live preview and the code exporter both ask [`element_for`] what a
//! block means (tag, class, attributes, what its body holds) and only differ
//! in how they print the answer.

use crate::{Align, Node, Props};
use std::borrow::Cow;

/// Placeholder for list children without any text-like prop
pub const LIST_ITEM_PLACEHOLDER: &str = "Item";

pub const DEFAULT_HEADING_TEXT: &str = "Heading";
pub const DEFAULT_PARAGRAPH_TEXT: &str = "Lorem ipsum";
pub const DEFAULT_BUTTON_TEXT: &str = "Click me";
pub const DEFAULT_IMAGE_SRC: &str = "/a-placeholder-image.png";
pub const DEFAULT_IMAGE_ALT: &str = "Image";
pub const DEFAULT_INPUT_PLACEHOLDER: &str = "Type here";

/// What an element's body is made of
#[derive(Debug, Clone, PartialEq)]
pub enum Body<'a> {
    /// Render the node's children in order
    Children,
    /// A single text run; children are ignored
    Text(&'a str),
    /// Void element (no body at all)
    Void,
    /// One `<li>` per child, labelled by [`list_item_text`]
    ListItems,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec<'a> {
    pub tag: &'static str,
    pub class_name: Cow<'a, str>,
    /// Attributes other than the class, in output order
    pub attributes: Vec<(&'static str, &'a str)>,
    pub body: Body<'a>,
}

/// Describe how a block renders
pub fn element_for(node: &Node) -> ElementSpec<'_> {
    let props = node.props();

    match props {
        Props::Section(_) => layout("section", props, "py-12", Body::Children),
        Props::Container(_) => layout("div", props, "mx-auto max-w-4xl px-4", Body::Children),
        Props::Form(_) => layout("form", props, "grid gap-4", Body::Children),
        Props::Card(_) => layout("div", props, "rounded-lg border p-6", Body::Children),
        Props::List(_) => layout("ul", props, "list-disc pl-6 space-y-1", Body::ListItems),

        Props::Heading(p) => {
            let base = class_or(props, "text-3xl font-semibold");
            let class_name = match p.align {
                Align::Left => Cow::Borrowed(base),
                align => Cow::Owned(format!("{} text-{}", base, align.as_str())),
            };
            ElementSpec {
                tag: heading_tag(p.level),
                class_name,
                attributes: vec![],
                body: Body::Text(or_default(&p.text, DEFAULT_HEADING_TEXT)),
            }
        }

        Props::Paragraph(p) => ElementSpec {
            tag: "p",
            class_name: Cow::Borrowed(class_or(props, "text-base leading-relaxed text-pretty")),
            attributes: vec![],
            body: Body::Text(or_default(&p.text, DEFAULT_PARAGRAPH_TEXT)),
        },

        Props::Button(p) => ElementSpec {
            tag: "button",
            class_name: Cow::Borrowed(class_or(
                props,
                "inline-flex items-center rounded-md px-4 py-2 font-medium",
            )),
            attributes: vec![("type", p.kind.as_str())],
            body: Body::Text(or_default(&p.text, DEFAULT_BUTTON_TEXT)),
        },

        Props::Image(p) => ElementSpec {
            tag: "img",
            class_name: Cow::Borrowed(class_or(props, "rounded-md")),
            attributes: vec![
                ("src", or_default(&p.src, DEFAULT_IMAGE_SRC)),
                ("alt", or_default(&p.alt, DEFAULT_IMAGE_ALT)),
            ],
            body: Body::Void,
        },

        Props::Input(p) => ElementSpec {
            tag: "input",
            class_name: Cow::Borrowed(class_or(props, "w-full rounded-md px-3 py-2")),
            attributes: vec![
                ("type", p.kind.as_str()),
                ("placeholder", or_default(&p.placeholder, DEFAULT_INPUT_PLACEHOLDER)),
            ],
            body: Body::Void,
        },
    }
}

/// Label of a child rendered as a list item
pub fn list_item_text(child: &Node) -> &str {
    child.props().text_like().unwrap_or(LIST_ITEM_PLACEHOLDER)
}

fn layout<'a>(
    tag: &'static str,
    props: &'a Props,
    default_class: &'static str,
    body: Body<'a>,
) -> ElementSpec<'a> {
    ElementSpec {
        tag,
        class_name: Cow::Borrowed(class_or(props, default_class)),
        attributes: vec![],
        body,
    }
}

fn class_or<'a>(props: &'a Props, default_class: &'static str) -> &'a str {
    props
        .class_name()
        .filter(|c| !c.is_empty())
        .unwrap_or(default_class)
}

fn or_default<'a>(value: &'a str, default: &'static str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        6 => "h6",
        _ => "h2",
    }
}
