use serde::Deserialize;

/// A named example attached to a media type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Example {
    /// The literal example payload. `null` in the document is kept as `Some(Null)`.
    #[serde(default, deserialize_with = "present")]
    pub value: Option<serde_json::Value>,

    #[serde(rename = "externalValue")]
    pub external_value: Option<String>,
}

/// A reference or inline example.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExampleOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Example(Example),
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_null_value_is_present() {
        let ex: Example = serde_yaml_ng::from_str("value: null\n").unwrap();
        assert_eq!(ex.value, Some(serde_json::Value::Null));
    }

    #[test]
    fn test_external_only_has_no_value() {
        let ex: Example =
            serde_yaml_ng::from_str("externalValue: https://example.com/pet.json\n").unwrap();
        assert!(ex.value.is_none());
        assert!(ex.external_value.is_some());
    }
}
