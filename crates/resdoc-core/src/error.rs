use std::path::PathBuf;

use thiserror::Error;

/// The document could not be read as OpenAPI 3.x.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("OpenAPI {0} is not supported, expected 3.x")]
    UnsupportedVersion(String),
}

/// A `$ref` pointer could not be expanded.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("reference cycle through {0}")]
    CircularRef(String),

    #[error("malformed reference `{0}`")]
    InvalidRefFormat(String),

    #[error("nothing to resolve at {0}")]
    RefTargetNotFound(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A schema node whose type is missing, unrecognized, or an unexpanded
    /// (circular) reference. Only raised in strict mode.
    #[error("malformed schema node at {context}: {reason}")]
    MalformedSchemaNode { context: String, reason: String },

    /// A custom HTTP method that has no resource mapping. Only raised in strict mode.
    #[error("unsupported operation {method} {path}")]
    UnsupportedOperation { path: String, method: String },
}

/// The project config file exists but is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}
