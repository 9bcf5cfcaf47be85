use indexmap::IndexMap;
use serde::Serialize;

use super::parameter::ParameterRecord;

/// Records keyed by media type.
pub type BodyRecords = IndexMap<String, Vec<ParameterRecord>>;

/// Serialized examples keyed by group (media type or status code), then example name.
pub type ExampleGroups = IndexMap<String, IndexMap<String, String>>;

/// Transport recorded on every resource.
pub const TRANSPORT_PROTOCOL: &str = "HTTPS";

/// Everything flattened out of one operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResourceContent {
    pub request_header: Vec<ParameterRecord>,
    pub request_path: Vec<ParameterRecord>,
    pub request_query: Vec<ParameterRecord>,
    pub request_body: BodyRecords,
    pub request_body_example: ExampleGroups,
    pub response_header: Vec<ParameterRecord>,
    pub response_body: BodyRecords,
    pub response_body_example: ExampleGroups,
}

impl ResourceContent {
    pub fn is_empty(&self) -> bool {
        self.request_header.is_empty()
            && self.request_path.is_empty()
            && self.request_query.is_empty()
            && self.request_body.is_empty()
            && self.request_body_example.is_empty()
            && self.response_header.is_empty()
            && self.response_body.is_empty()
            && self.response_body_example.is_empty()
    }

    /// Parameter records across all sections, body trees included.
    pub fn record_count(&self) -> usize {
        let bodies = |b: &BodyRecords| b.values().map(Vec::len).sum::<usize>();
        self.request_header.len()
            + self.request_path.len()
            + self.request_query.len()
            + self.response_header.len()
            + bodies(&self.request_body)
            + bodies(&self.response_body)
    }
}

/// One (endpoint, verb) operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub resource_definition: String,
    pub description: String,
    pub endpoint: String,
    pub transport_protocol: String,
    pub request_verb: String,
    pub resource_content: ResourceContent,
}
