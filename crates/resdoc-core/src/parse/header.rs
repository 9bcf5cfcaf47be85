use serde::Deserialize;

use super::schema::SchemaOrRef;

/// A response header definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Header {
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    pub schema: Option<SchemaOrRef>,
}

/// A reference or inline header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HeaderOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Header(Header),
}
