pub mod parameter;
pub mod resource;

use serde::Serialize;

pub use parameter::{Location, ParameterRecord, ROOT_PARENT};
pub use resource::{
    BodyRecords, ExampleGroups, Resource, ResourceContent, TRANSPORT_PROTOCOL,
};

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// The flattened resource design of a whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Design {
    pub info: Info,
    pub resources: Vec<Resource>,
}

impl Design {
    /// Look up a resource by endpoint and lowercase verb.
    pub fn resource(&self, endpoint: &str, verb: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.endpoint == endpoint && r.request_verb == verb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_serializes_every_field() {
        let value = serde_json::to_value(ResourceContent::default()).unwrap();
        let obj = value.as_object().unwrap();
        let keys: Vec<_> = obj.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "request_header",
                "request_path",
                "request_query",
                "request_body",
                "request_body_example",
                "response_header",
                "response_body",
                "response_body_example",
            ]
        );
        assert_eq!(obj["request_header"], serde_json::json!([]));
        assert_eq!(obj["request_body"], serde_json::json!({}));
    }

    #[test]
    fn test_record_wire_names() {
        let record = ParameterRecord::new(ROOT_PARENT, "id", Location::Body, "integer", true, "");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "parent": "root",
                "name": "id",
                "location": "body",
                "data_type": "integer",
                "required": true,
                "description": "",
            })
        );
    }
}
