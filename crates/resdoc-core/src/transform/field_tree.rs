use crate::design::{Location, ParameterRecord};

/// A node of a flattened body tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub name: String,
    pub data_type: String,
    pub required: bool,
    pub description: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Arena of body nodes with explicit parent/child indices.
///
/// Records only link to their parent by name, which is ambiguous when two
/// subtrees reuse a field name. The arena keeps the real structure while the
/// schema is walked and is turned into records at the end.
#[derive(Debug, Clone, Default)]
pub struct FieldTree {
    nodes: Vec<FieldNode>,
    roots: Vec<usize>,
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node under `parent` (or as a root) and return its index.
    pub fn push(
        &mut self,
        parent: Option<usize>,
        name: &str,
        data_type: String,
        required: bool,
        description: &str,
    ) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(FieldNode {
            name: name.to_string(),
            data_type,
            required,
            description: description.to_string(),
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(idx),
            None => self.roots.push(idx),
        }
        idx
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> Option<&FieldNode> {
        self.nodes.get(idx)
    }

    /// Indices from the root down to `idx`, inclusive.
    pub fn path_to(&self, idx: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            path.push(i);
            cursor = self.nodes.get(i).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }

    /// Pre-order walk: every node precedes its descendants, siblings keep
    /// insertion order. Roots get `root_parent` as their parent name.
    pub fn to_records(&self, root_parent: &str) -> Vec<ParameterRecord> {
        let mut records = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            let parent = match node.parent {
                Some(p) => self.nodes[p].name.as_str(),
                None => root_parent,
            };
            records.push(ParameterRecord::new(
                parent,
                node.name.as_str(),
                Location::Body,
                node.data_type.as_str(),
                node.required,
                node.description.as_str(),
            ));
            stack.extend(node.children.iter().rev().copied());
        }

        records
    }
}
