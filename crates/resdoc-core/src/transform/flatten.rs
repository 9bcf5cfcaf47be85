use crate::design::ParameterRecord;
use crate::error::TransformError;
use crate::parse::schema::{Schema, SchemaOrRef, SchemaType};

use super::field_tree::FieldTree;

/// Flatten a schema into body records, skipping nodes it cannot type.
///
/// The root record takes the schema's `title` as its name and `parent` as
/// its parent; every descendant points at its enclosing node by name.
pub fn flatten(schema: &SchemaOrRef, parent: &str) -> Vec<ParameterRecord> {
    Flattener::new(false)
        .flatten(schema, parent, "schema")
        .unwrap_or_default()
}

/// Name and required-ness of the node being visited. Threaded through the
/// walk so the input schema is never written to.
struct NodeLabel<'s> {
    name: &'s str,
    required: bool,
}

/// Depth-first schema walker.
///
/// Objects emit their own record, then their properties with scalars ahead
/// of objects and arrays (declaration order otherwise). Arrays emit one
/// `array[<item>]` record and, for object items, the item's properties
/// directly beneath it. Scalars emit a single record.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flattener {
    strict: bool,
}

impl Flattener {
    /// A strict flattener fails on untyped, unknown, or unexpanded nodes
    /// instead of skipping them.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Flatten `schema`, naming `context` in diagnostics.
    pub fn flatten(
        &self,
        schema: &SchemaOrRef,
        parent: &str,
        context: &str,
    ) -> Result<Vec<ParameterRecord>, TransformError> {
        let mut tree = FieldTree::new();
        let label = match schema.as_schema() {
            Some(s) => NodeLabel {
                name: s.title.as_deref().unwrap_or_default(),
                required: !s.is_nullable(),
            },
            None => NodeLabel {
                name: "",
                required: true,
            },
        };
        self.visit(&mut tree, None, schema, label, context)?;
        Ok(tree.to_records(parent))
    }

    fn visit(
        &self,
        tree: &mut FieldTree,
        parent: Option<usize>,
        node: &SchemaOrRef,
        label: NodeLabel<'_>,
        context: &str,
    ) -> Result<(), TransformError> {
        let schema = match node {
            SchemaOrRef::Schema(schema) => schema.as_ref(),
            SchemaOrRef::Ref { ref_path } => {
                return self.malformed(
                    tree,
                    parent,
                    label.name,
                    context,
                    format!("unexpanded reference {ref_path}"),
                );
            }
        };
        let description = schema.description.as_deref().unwrap_or_default();

        match schema.kind() {
            Some(SchemaType::Object) => {
                let idx = tree.push(
                    parent,
                    label.name,
                    SchemaType::Object.as_str().to_string(),
                    label.required,
                    description,
                );
                self.visit_properties(tree, idx, schema, context)
            }
            Some(SchemaType::Array) => {
                let items = schema.items.as_deref();
                if let Some(reason) = malformed_items(items).filter(|_| self.strict) {
                    return self.malformed(tree, parent, label.name, context, reason);
                }
                let item_type = items.map(SchemaOrRef::type_label).unwrap_or_default();
                let idx = tree.push(
                    parent,
                    label.name,
                    format!("array[{item_type}]"),
                    label.required,
                    description,
                );
                match items.and_then(SchemaOrRef::as_schema) {
                    Some(item) if item.kind() == Some(SchemaType::Object) => {
                        self.visit_properties(tree, idx, item, context)
                    }
                    _ => Ok(()),
                }
            }
            Some(kind) => {
                tree.push(
                    parent,
                    label.name,
                    kind.as_str().to_string(),
                    label.required,
                    description,
                );
                Ok(())
            }
            None => {
                let reason = match schema.type_tag() {
                    Some(tag) => format!("unrecognized type `{tag}`"),
                    None => "missing type".to_string(),
                };
                self.malformed(tree, parent, label.name, context, reason)
            }
        }
    }

    /// Visit the properties of `owner` as children of node `idx`.
    fn visit_properties(
        &self,
        tree: &mut FieldTree,
        idx: usize,
        owner: &Schema,
        context: &str,
    ) -> Result<(), TransformError> {
        let (scalars, composites): (Vec<_>, Vec<_>) =
            owner.properties.iter().partition(|(_, prop)| {
                !prop
                    .as_schema()
                    .and_then(Schema::kind)
                    .is_some_and(|k| k.is_composite())
            });

        for (name, prop) in scalars.into_iter().chain(composites) {
            let label = NodeLabel {
                name,
                required: owner.is_required(name),
            };
            self.visit(tree, Some(idx), prop, label, context)?;
        }
        Ok(())
    }

    fn malformed(
        &self,
        tree: &FieldTree,
        parent: Option<usize>,
        name: &str,
        context: &str,
        reason: String,
    ) -> Result<(), TransformError> {
        let mut segments: Vec<&str> = parent
            .map(|p| tree.path_to(p))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|i| tree.node(i).map(|n| n.name.as_str()))
            .collect();
        segments.push(name);
        let context = format!("{context} `{}`", segments.join("."));

        if self.strict {
            return Err(TransformError::MalformedSchemaNode { context, reason });
        }
        log::warn!("skipping schema node at {context}: {reason}");
        Ok(())
    }
}

/// Why an array's `items` cannot be typed, if it cannot.
fn malformed_items(items: Option<&SchemaOrRef>) -> Option<String> {
    let schema = match items {
        Some(SchemaOrRef::Schema(schema)) => schema,
        Some(SchemaOrRef::Ref { ref_path }) => {
            return Some(format!("array items are an unexpanded reference {ref_path}"));
        }
        None => return Some("array without items".to_string()),
    };
    if schema.kind().is_some() {
        return None;
    }
    Some(match schema.type_tag() {
        Some(tag) => format!("array items have unrecognized type `{tag}`"),
        None => "array items have no type".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{Location, ROOT_PARENT};

    fn schema(yaml: &str) -> SchemaOrRef {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn summary(records: &[ParameterRecord]) -> Vec<(&str, &str, &str, bool)> {
        records
            .iter()
            .map(|r| {
                (
                    r.parent.as_str(),
                    r.name.as_str(),
                    r.data_type.as_str(),
                    r.required,
                )
            })
            .collect()
    }

    #[test]
    fn test_scalars_before_composites() {
        let s = schema(
            r#"
title: a
type: object
required: [b]
properties:
  c:
    type: object
    properties:
      d: { type: number }
  b: { type: string }
"#,
        );
        let records = flatten(&s, ROOT_PARENT);
        assert_eq!(
            summary(&records),
            vec![
                ("root", "a", "object", true),
                ("a", "b", "string", true),
                ("a", "c", "object", false),
                ("c", "d", "number", false),
            ]
        );
    }

    #[test]
    fn test_partition_keeps_declaration_order() {
        let s = schema(
            r#"
type: object
properties:
  z_list: { type: array, items: { type: string } }
  y: { type: integer }
  x_obj: { type: object }
  w: { type: boolean }
"#,
        );
        let names: Vec<_> = flatten(&s, ROOT_PARENT)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["", "y", "w", "z_list", "x_obj"]);
    }

    #[test]
    fn test_array_of_primitives() {
        let s = schema("title: tags\ntype: array\nitems: { type: string }\n");
        let records = flatten(&s, ROOT_PARENT);
        assert_eq!(summary(&records), vec![("root", "tags", "array[string]", true)]);
    }

    #[test]
    fn test_array_of_objects_has_no_item_node() {
        let s = schema(
            r#"
title: items
type: array
items:
  type: object
  required: [id]
  properties:
    id: { type: integer }
"#,
        );
        let records = flatten(&s, ROOT_PARENT);
        assert_eq!(
            summary(&records),
            vec![
                ("root", "items", "array[object]", true),
                ("items", "id", "integer", true),
            ]
        );
    }

    #[test]
    fn test_item_type_is_lowercased() {
        let s = schema("title: ids\ntype: array\nitems: { type: Integer }\n");
        assert_eq!(flatten(&s, ROOT_PARENT)[0].data_type, "array[integer]");
    }

    #[test]
    fn test_required_comes_from_enclosing_schema() {
        let s = schema(
            r#"
type: object
required: [id]
properties:
  id: { type: integer, nullable: true }
  name: { type: string }
"#,
        );
        let records = flatten(&s, ROOT_PARENT);
        let id = records.iter().find(|r| r.name == "id").unwrap();
        let name = records.iter().find(|r| r.name == "name").unwrap();
        assert!(id.required);
        assert!(!name.required);
    }

    #[test]
    fn test_nullable_root_is_optional() {
        let s = schema("title: note\ntype: string\nnullable: true\ndescription: free text\n");
        let records = flatten(&s, "parent");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].parent, "parent");
        assert!(!records[0].required);
        assert_eq!(records[0].description, "free text");
        assert_eq!(records[0].location, Location::Body);
    }

    #[test]
    fn test_unknown_types_skipped() {
        let s = schema(
            r#"
type: object
properties:
  blob: { type: file }
  untyped: { description: anything }
  ok: { type: boolean }
"#,
        );
        let names: Vec<_> = flatten(&s, ROOT_PARENT)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["", "ok"]);
    }

    #[test]
    fn test_strict_reports_path() {
        let s = schema(
            r#"
title: order
type: object
properties:
  customer:
    type: object
    properties:
      avatar: { type: file }
"#,
        );
        let err = Flattener::new(true)
            .flatten(&s, ROOT_PARENT, "POST /orders request body")
            .unwrap_err();
        match err {
            TransformError::MalformedSchemaNode { context, reason } => {
                assert_eq!(context, "POST /orders request body `order.customer.avatar`");
                assert_eq!(reason, "unrecognized type `file`");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_rejects_unexpanded_ref() {
        let s = schema(
            r##"
type: object
properties:
  next: { $ref: "#/components/schemas/Node" }
"##,
        );
        assert!(Flattener::new(true).flatten(&s, ROOT_PARENT, "body").is_err());
        assert_eq!(flatten(&s, ROOT_PARENT).len(), 1);
    }

    #[test]
    fn test_strict_rejects_untyped_array_items() {
        let s = schema(
            r#"
type: object
properties:
  files:
    type: array
    items: { type: file }
"#,
        );
        let err = Flattener::new(true)
            .flatten(&s, ROOT_PARENT, "PUT /files request body")
            .unwrap_err();
        match err {
            TransformError::MalformedSchemaNode { context, reason } => {
                assert_eq!(context, "PUT /files request body `.files`");
                assert_eq!(reason, "array items have unrecognized type `file`");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Lenient mode keeps the array with the tag as written
        let records = flatten(&s, ROOT_PARENT);
        assert_eq!(records[1].data_type, "array[file]");
    }

    #[test]
    fn test_strict_rejects_array_items_without_type_or_as_ref() {
        let untyped = schema("title: blobs\ntype: array\nitems: { description: anything }\n");
        let recursive = schema(
            r##"
title: children
type: array
items: { $ref: "#/components/schemas/Node" }
"##,
        );
        let missing = schema("title: bare\ntype: array\n");

        let strict = Flattener::new(true);
        for (s, expected) in [
            (&untyped, "array items have no type"),
            (
                &recursive,
                "array items are an unexpanded reference #/components/schemas/Node",
            ),
            (&missing, "array without items"),
        ] {
            match strict.flatten(s, ROOT_PARENT, "body") {
                Err(TransformError::MalformedSchemaNode { reason, .. }) => {
                    assert_eq!(reason, expected)
                }
                other => panic!("expected malformed node, got {other:?}"),
            }
            assert_eq!(flatten(s, ROOT_PARENT).len(), 1);
        }
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let s = schema(
            r#"
type: object
properties:
  a: { type: object, properties: { b: { type: string }, c: { type: array, items: { type: object, properties: { d: { type: number } } } } } }
  e: { type: integer }
"#,
        );
        assert_eq!(flatten(&s, ROOT_PARENT), flatten(&s, ROOT_PARENT));
    }
}
