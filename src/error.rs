use thiserror::Error;

/// Errors surfaced by the crate's fallible construction paths. Everything
/// past configuration loading degrades to per-field validation errors or
/// silent structural no-ops instead of failing.
#[derive(Debug, Error)]
pub enum FormBuilderError {
    #[error("failed to parse field options config: {0}")]
    Config(#[from] serde_json::Error),
}
