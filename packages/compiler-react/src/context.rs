/// Options for TSX export
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Annotate the page function's return type
    pub use_typescript: bool,
    /// Emit `import React from "react";`
    pub include_react_import: bool,
    /// Optional stylesheet import (e.g. `./globals.css`)
    pub css_import: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            use_typescript: true,
            include_react_import: true,
            css_import: None,
        }
    }
}

/// Line writer for the generated module
pub(crate) struct CompilerContext<'a> {
    pub options: &'a CompileOptions,
    depth: usize,
    output: String,
}

impl<'a> CompilerContext<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            output: String::new(),
        }
    }

    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    /// Run `body` one indentation level deeper
    pub fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    pub fn finish(self) -> String {
        self.output
    }
}
