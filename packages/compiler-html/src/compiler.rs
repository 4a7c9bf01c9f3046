use studio_editor::Document;

use crate::{render_preview, VNode};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Load the Tailwind CDN script in full pages
    pub tailwind: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            tailwind: true,
        }
    }
}

struct Context<'a> {
    options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a virtual DOM tree to HTML
pub fn to_html(node: &VNode, options: &CompileOptions) -> String {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx);
    ctx.get_output()
}

/// Compile a document's published view to a standalone HTML page
pub fn compile_to_html(document: &Document, options: &CompileOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(document, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    compile_node(&render_preview(document.root()), &mut ctx);
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn compile_head(document: &Document, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(document.name())));

    if ctx.options.tailwind {
        ctx.add_line(&format!("<script src=\"{}\"></script>", TAILWIND_CDN));
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            children,
        } => compile_tag(tag, attributes, children, ctx),
        VNode::Text { content } => ctx.add_line(&escape_html(content)),
    }
}

fn compile_tag(name: &str, attributes: &[(String, String)], children: &[VNode], ctx: &mut Context) {
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", name));

    for (attr_name, value) in attributes {
        ctx.add(&format!(" {}=\"{}\"", attr_name, escape_html(value)));
    }

    if is_self_closing(name) {
        ctx.add(" />");
        ctx.newline();
        return;
    }

    ctx.add(">");

    if has_element_children(children) {
        ctx.newline();
        ctx.indent();
        for child in children {
            compile_node(child, ctx);
        }
        ctx.dedent();
        if ctx.options.pretty {
            ctx.add_indent();
        }
    } else {
        for child in children {
            if let VNode::Text { content } = child {
                ctx.add(&escape_html(content));
            }
        }
    }

    ctx.add(&format!("</{}>", name));
    ctx.newline();
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
