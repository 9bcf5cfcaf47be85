//! Flatten OpenAPI 3.x documents into resource designs: one resource per
//! path and method, each carrying flat, parent-linked parameter records
//! instead of nested schemas.

pub mod config;
pub mod design;
pub mod error;
pub mod parse;
pub mod transform;

pub use design::Design;
pub use error::TransformError;

/// Parse a YAML or JSON document and transform it in one step.
pub fn design_from_str(
    input: &str,
    format: config::InputFormat,
    options: &transform::TransformOptions,
) -> Result<Design, TransformError> {
    let spec = match format {
        config::InputFormat::Json => parse::from_json(input)?,
        config::InputFormat::Yaml => parse::from_yaml(input)?,
    };
    transform::transform_with_options(&spec, options)
}
