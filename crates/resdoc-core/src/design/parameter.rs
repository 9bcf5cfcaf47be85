use std::fmt;

use serde::Serialize;

/// Parent marker for the top-level node of a body tree.
pub const ROOT_PARENT: &str = "root";

/// The part of an HTTP message a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Header,
    Path,
    Query,
    Body,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Header => "header",
            Location::Path => "path",
            Location::Query => "query",
            Location::Body => "body",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flattened field description.
///
/// Body records form a tree through `parent`, which names the enclosing
/// node; declared parameters have an empty parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRecord {
    pub parent: String,
    pub name: String,
    pub location: Location,
    pub data_type: String,
    pub required: bool,
    pub description: String,
}

impl ParameterRecord {
    pub fn new(
        parent: impl Into<String>,
        name: impl Into<String>,
        location: Location,
        data_type: impl Into<String>,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            parent: parent.into(),
            name: name.into(),
            location,
            data_type: data_type.into(),
            required,
            description: description.into(),
        }
    }
}
