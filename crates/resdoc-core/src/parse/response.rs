use indexmap::IndexMap;
use serde::Deserialize;

use super::header::HeaderOrRef;
use super::media_type::MediaType;

/// A response definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub headers: IndexMap<String, HeaderOrRef>,
}

/// A reference or inline response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}

impl ResponseOrRef {
    pub fn as_response(&self) -> Option<&Response> {
        match self {
            ResponseOrRef::Response(r) => Some(r),
            ResponseOrRef::Ref { .. } => None,
        }
    }
}

/// The `200` response, which supplies response headers and body records.
/// Other statuses only contribute examples.
pub fn find_success_response(responses: &IndexMap<String, ResponseOrRef>) -> Option<&Response> {
    responses.get("200").and_then(ResponseOrRef::as_response)
}
