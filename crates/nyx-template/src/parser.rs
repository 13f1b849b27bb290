//! Parses mustache-semantic source into a node tree.
//!
//! Supported grammar: `{{name}}` (variable), `{{#name}}...{{/name}}`
//! (section). Whitespace between the delimiter and the name is
//! significant for section tags and must be absent — `{{ #x }}` is not a
//! section opener, it is a literal variable lookup for a field named
//! `" #x "` (which will simply render empty), matching spec §4.5's
//! portability requirement.

use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Variable(String),
    Section { name: String, children: Vec<Node> },
}

pub fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
    let mut pos = 0;
    let (nodes, _) = parse_until(source, &mut pos, None)?;
    Ok(nodes)
}

/// Parses nodes until either the input is exhausted (`until = None`) or a
/// `{{/until}}` closing tag is found (returns the nodes collected so far).
fn parse_until(
    source: &str,
    pos: &mut usize,
    until: Option<&str>,
) -> Result<(Vec<Node>, bool), TemplateError> {
    let mut nodes = Vec::new();

    loop {
        let Some(open) = source[*pos..].find("{{") else {
            nodes.push(Node::Text(source[*pos..].to_string()));
            *pos = source.len();
            if until.is_some() {
                return Err(TemplateError::UnclosedSection(until.unwrap().to_string()));
            }
            return Ok((nodes, false));
        };
        if open > 0 {
            nodes.push(Node::Text(source[*pos..*pos + open].to_string()));
        }
        let tag_start = *pos + open;
        let Some(close_rel) = source[tag_start..].find("}}") else {
            return Err(TemplateError::UnterminatedTag(tag_start));
        };
        let tag_end = tag_start + close_rel + 2;
        let inner = &source[tag_start + 2..tag_end - 2];
        *pos = tag_end;

        if let Some(name) = inner.strip_prefix('/') {
            if let Some(expected) = until {
                if name != expected {
                    return Err(TemplateError::MismatchedSection {
                        name: expected.to_string(),
                        closer: name.to_string(),
                    });
                }
                return Ok((nodes, true));
            }
            return Err(TemplateError::MismatchedSection {
                name: "<none>".to_string(),
                closer: name.to_string(),
            });
        } else if let Some(name) = inner.strip_prefix('#') {
            let (children, closed) = parse_until(source, pos, Some(name))?;
            if !closed {
                return Err(TemplateError::UnclosedSection(name.to_string()));
            }
            nodes.push(Node::Section { name: name.to_string(), children });
        } else {
            nodes.push(Node::Variable(inner.to_string()));
        }
    }
}
