use indexmap::IndexMap;
use serde::Deserialize;

/// A recognized JSON Schema type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    /// Match a type tag case-insensitively. `null` and unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "string" => Some(SchemaType::String),
            "number" => Some(SchemaType::Number),
            "integer" => Some(SchemaType::Integer),
            "boolean" => Some(SchemaType::Boolean),
            "array" => Some(SchemaType::Array),
            "object" => Some(SchemaType::Object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    /// Objects and arrays nest; everything else is a leaf.
    pub fn is_composite(&self) -> bool {
        matches!(self, SchemaType::Object | SchemaType::Array)
    }
}

/// The `type` field can be a single tag or (OpenAPI 3.1) a list of tags.
/// Tags are kept as written so unknown values survive parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

impl TypeSet {
    /// The first tag that is not `null`, as written.
    pub fn primary(&self) -> Option<&str> {
        match self {
            TypeSet::Single(tag) => Some(tag.as_str()),
            TypeSet::Multiple(tags) => tags
                .iter()
                .map(String::as_str)
                .find(|t| !t.eq_ignore_ascii_case("null")),
        }
    }

    fn includes_null(&self) -> bool {
        match self {
            TypeSet::Single(tag) => tag.eq_ignore_ascii_case("null"),
            TypeSet::Multiple(tags) => tags.iter().any(|t| t.eq_ignore_ascii_case("null")),
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// The subset of a JSON Schema object the flattener reads.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,

    pub title: Option<String>,

    pub description: Option<String>,

    pub nullable: Option<bool>,

    #[serde(default)]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default)]
    pub required: Vec<String>,

    pub items: Option<Box<SchemaOrRef>>,
}

impl Schema {
    /// The primary type tag as written, if any.
    pub fn type_tag(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }

    /// The primary type, if it is one the flattener understands.
    pub fn kind(&self) -> Option<SchemaType> {
        self.type_tag().and_then(SchemaType::from_tag)
    }

    /// `nullable: true` (3.0) or a `null` entry in the type list (3.1).
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
            || self
                .schema_type
                .as_ref()
                .is_some_and(TypeSet::includes_null)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

impl SchemaOrRef {
    /// The inline schema, or `None` for a reference left unexpanded.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrRef::Schema(schema) => Some(schema),
            SchemaOrRef::Ref { .. } => None,
        }
    }

    /// The lowercase primary type tag, or an empty string.
    pub fn type_label(&self) -> String {
        self.as_schema()
            .and_then(Schema::type_tag)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}
