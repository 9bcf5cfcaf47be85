use indexmap::IndexMap;
use serde::Deserialize;

use super::components::Components;
use super::operation::PathItem;
use super::security::SecurityScheme;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    pub title: String,

    pub description: Option<String>,

    pub version: String,
}

/// Top-level OpenAPI 3.x document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,

    pub info: Info,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    pub components: Option<Components>,
}

impl OpenApiSpec {
    /// Security schemes declared under `components`, in declaration order.
    pub fn security_schemes(&self) -> impl Iterator<Item = (&String, &SecurityScheme)> {
        self.components
            .iter()
            .flat_map(|c| c.security_schemes.iter())
    }
}
