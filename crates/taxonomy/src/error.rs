use thiserror::Error;

/// Errors raised while loading a taxonomy document.
///
/// Individual malformed entries never produce an error; they are logged and
/// skipped while the table is built.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse taxonomy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse taxonomy YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported taxonomy file format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("unsupported taxonomy version: {0}")]
    UnsupportedVersion(u32),
}
