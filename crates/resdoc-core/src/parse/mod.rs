pub mod components;
pub mod example;
pub mod header;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod spec;

use crate::error::ParseError;
use spec::OpenApiSpec;

/// Read an OpenAPI 3.x document written in YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    checked(serde_yaml_ng::from_str(input)?)
}

/// Read an OpenAPI 3.x document written in JSON.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    checked(serde_json::from_str(input)?)
}

/// Only the 3.x line (3.0, 3.1, 3.2) shares the object model read here.
fn checked(spec: OpenApiSpec) -> Result<OpenApiSpec, ParseError> {
    if spec.openapi.split('.').next() != Some("3") {
        return Err(ParseError::UnsupportedVersion(spec.openapi));
    }
    log::debug!(
        "read OpenAPI {} document `{}` ({} paths)",
        spec.openapi,
        spec.info.title,
        spec.paths.len()
    );
    Ok(spec)
}
