use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unterminated tag starting at byte {0}")]
    UnterminatedTag(usize),

    #[error("section '{name}' closed by mismatched '{{{{/{closer}}}}}'")]
    MismatchedSection { name: String, closer: String },

    #[error("section '{0}' is never closed")]
    UnclosedSection(String),
}
