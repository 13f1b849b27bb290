//! A mustache-semantic template engine used for commit/tag/publish message
//! templates and asset filename patterns. Variables resolve by dotted path
//! against a JSON context; sections iterate arrays, guard on truthiness, or
//! (when the section name matches a fixed lambda) transform their own
//! rendered body.

mod error;
mod lambda;
mod parser;
mod render;

use serde_json::Value;

pub use error::TemplateError;
pub use parser::Node;

/// A parsed template, ready to render against any number of contexts.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Ok(Self { nodes: parser::parse(source)? })
    }

    #[must_use]
    pub fn render(&self, context: &Value) -> String {
        render::render(&self.nodes, context)
    }
}

/// Parses and renders `source` against `context` in one step.
pub fn render(source: &str, context: &Value) -> Result<String, TemplateError> {
    Ok(Template::parse(source)?.render(context))
}
