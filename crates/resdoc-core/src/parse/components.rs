use indexmap::IndexMap;
use serde::Deserialize;

use super::example::ExampleOrRef;
use super::header::HeaderOrRef;
use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::response::ResponseOrRef;
use super::schema::SchemaOrRef;
use super::security::SecurityScheme;

/// Reusable definitions a document can point into with `$ref`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Components {
    pub schemas: IndexMap<String, SchemaOrRef>,
    pub responses: IndexMap<String, ResponseOrRef>,
    pub parameters: IndexMap<String, ParameterOrRef>,
    pub examples: IndexMap<String, ExampleOrRef>,
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,
    pub headers: IndexMap<String, HeaderOrRef>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
}
