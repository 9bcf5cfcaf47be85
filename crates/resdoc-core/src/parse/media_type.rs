use indexmap::IndexMap;
use serde::Deserialize;

use super::example::ExampleOrRef;
use super::schema::SchemaOrRef;

/// A media type object: the body schema plus its literal examples.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaOrRef>,

    #[serde(default)]
    pub examples: IndexMap<String, ExampleOrRef>,
}
