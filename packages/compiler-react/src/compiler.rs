use crate::context::{CompileOptions, CompilerContext};
use studio_model::semantics::{element_for, list_item_text, Body};
use studio_model::Node;

const FALLBACK_NAME: &str = "generated";

/// Compile a block tree into a single TSX module exporting one page component
pub fn compile_page(name: &str, root: &Node, options: CompileOptions) -> String {
    let mut ctx = CompilerContext::new(&options);

    compile_imports(&mut ctx);

    let component = component_name(name);
    let signature = if options.use_typescript {
        format!("export default function {}(): React.JSX.Element {{", component)
    } else {
        format!("export default function {}() {{", component)
    };

    ctx.line(&signature);
    ctx.nested(|ctx| {
        ctx.line("return (");
        ctx.nested(|ctx| compile_node(root, ctx));
        ctx.line(");");
    });
    ctx.line("}");

    ctx.finish()
}

/// File name used when downloading an export
pub fn export_file_name(name: &str) -> String {
    let name = name.trim();
    let stem = if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name.replace(['/', '\\'], "-")
    };
    format!("{}-page.tsx", stem)
}

/// `my shop` → `MyShopPage`
pub fn component_name(name: &str) -> String {
    let mut pascal: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    if pascal.is_empty() {
        pascal.push_str("Generated");
    } else if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        pascal.insert_str(0, "Generated");
    }

    pascal.push_str("Page");
    pascal
}

fn compile_imports(ctx: &mut CompilerContext) {
    let options = ctx.options;
    if let Some(css) = &options.css_import {
        ctx.line(&format!("import {};", string_literal(css)));
    }

    if options.include_react_import {
        ctx.line("import React from \"react\";");
    }

    if options.css_import.is_some() || options.include_react_import {
        ctx.blank_line();
    }
}

fn compile_node(node: &Node, ctx: &mut CompilerContext) {
    let spec = element_for(node);

    let mut open = format!("<{}", spec.tag);
    if !spec.class_name.is_empty() {
        open.push_str(&format!(" className={}", attribute_value(&spec.class_name)));
    }
    for (name, value) in &spec.attributes {
        open.push_str(&format!(" {}={}", name, attribute_value(value)));
    }

    match spec.body {
        Body::Void => ctx.line(&format!("{} />", open)),
        Body::Text(text) => ctx.line(&format!(
            "{}>{{{}}}</{}>",
            open,
            string_literal(text),
            spec.tag
        )),
        Body::Children if node.children().is_empty() => ctx.line(&format!("{} />", open)),
        Body::Children => {
            ctx.line(&format!("{}>", open));
            ctx.nested(|ctx| {
                for child in node.children() {
                    compile_node(child, ctx);
                }
            });
            ctx.line(&format!("</{}>", spec.tag));
        }
        Body::ListItems if node.children().is_empty() => ctx.line(&format!("{} />", open)),
        Body::ListItems => {
            ctx.line(&format!("{}>", open));
            ctx.nested(|ctx| {
                for child in node.children() {
                    ctx.line(&format!("<li>{{{}}}</li>", string_literal(list_item_text(child))));
                }
            });
            ctx.line(&format!("</{}>", spec.tag));
        }
    }
}

/// JSX attribute value: a plain quoted string when JSX can hold it verbatim,
/// otherwise an expression container with a JS string literal. JSX decodes
/// entities inside quoted attributes, so `&` also needs the expression form.
fn attribute_value(value: &str) -> String {
    if value.contains(['"', '\\', '\n', '\r', '&']) {
        format!("{{{}}}", string_literal(value))
    } else {
        format!("\"{}\"", value)
    }
}

fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
