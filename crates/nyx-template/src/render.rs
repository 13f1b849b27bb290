//! Renders a parsed node tree against a `serde_json::Value` state.

use serde_json::Value;

use crate::lambda;
use crate::parser::Node;

/// Looks up a dotted path (`a.b.c`) in `context`. Missing path segments
/// resolve to `Value::Null` rather than erroring — Nyx templates render
/// filenames and messages, where a missing optional field should render
/// empty, not abort the whole render.
pub fn lookup<'a>(context: &'a Value, path: &str) -> &'a Value {
    let mut current = context;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment).unwrap_or(&Value::Null),
            _ => &Value::Null,
        };
    }
    current
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

pub fn render(nodes: &[Node], context: &Value) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, context, &mut out);
    }
    out
}

fn render_node(node: &Node, context: &Value, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Variable(path) => out.push_str(&to_text(lookup(context, path))),
        Node::Section { name, children } => render_section(name, children, context, out),
    }
}

fn render_section(name: &str, children: &[Node], context: &Value, out: &mut String) {
    if let Some(lambda_name) = lambda_name(name) {
        let body = render(children, context);
        if let Some(replacement) = lambda::apply(lambda_name, &body) {
            out.push_str(&replacement);
            return;
        }
    }

    let value = lookup(context, name);
    match value {
        Value::Array(items) => {
            for item in items {
                out.push_str(&render(children, item));
            }
        }
        other if is_truthy(other) => out.push_str(&render(children, context)),
        _ => {}
    }
}

/// Section names match the fixed lambda list verbatim; this is a thin
/// seam so callers can't accidentally shadow a lambda with a state field
/// of the same name without realizing it.
fn lambda_name(name: &str) -> Option<&str> {
    const LAMBDAS: &[&str] = &[
        "lower",
        "upper",
        "trim",
        "first",
        "firstLower",
        "firstUpper",
        "last",
        "lastLower",
        "lastUpper",
        "sanitize",
        "sanitizeLower",
        "sanitizeUpper",
        "short5",
        "short6",
        "short7",
        "timestampISO8601",
        "timestampYYYYMMDDHHMMSS",
        "environment.user",
        "environment.variable",
        "file.content",
        "file.exists",
    ];
    LAMBDAS.iter().find(|&&l| l == name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use serde_json::json;

    #[test]
    fn renders_dotted_path_variable() {
        let context = json!({"release": {"version": "1.2.3"}});
        let nodes = parse("v{{release.version}}").unwrap();
        assert_eq!(render(&nodes, &context), "v1.2.3");
    }

    #[test]
    fn missing_path_renders_empty() {
        let context = json!({});
        let nodes = parse("[{{missing.field}}]").unwrap();
        assert_eq!(render(&nodes, &context), "[]");
    }

    #[test]
    fn section_over_array_iterates_each_item() {
        let context = json!({"commits": [{"message": "a"}, {"message": "b"}]});
        let nodes = parse("{{#commits}}{{message}};{{/commits}}").unwrap();
        assert_eq!(render(&nodes, &context), "a;b;");
    }

    #[test]
    fn section_over_falsy_scalar_renders_nothing() {
        let context = json!({"newVersion": false});
        let nodes = parse("[{{#newVersion}}yes{{/newVersion}}]").unwrap();
        assert_eq!(render(&nodes, &context), "[]");
    }

    #[test]
    fn lambda_section_transforms_rendered_body() {
        let context = json!({"type": "feat"});
        let nodes = parse("{{#upper}}{{type}}{{/upper}}").unwrap();
        assert_eq!(render(&nodes, &context), "FEAT");
    }

    #[test]
    fn lambda_beats_a_same_named_state_field() {
        let context = json!({"upper": "should not be used", "x": "hi"});
        let nodes = parse("{{#upper}}{{x}}{{/upper}}").unwrap();
        assert_eq!(render(&nodes, &context), "HI");
    }

    #[test]
    fn rendering_twice_is_pure() {
        let context = json!({"a": "x"});
        let nodes = parse("{{a}}-{{a}}").unwrap();
        assert_eq!(render(&nodes, &context), render(&nodes, &context));
    }
}
