//! Declarative seed plans.
//!
//! A [`SeedPlan`] is a flattened tree: nodes are stored in traversal order
//! and a child refers to its parent by index, so every parent precedes its
//! children.

use super::kind::ResourceKind;
use serde_json::{json, Map, Value};

/// One resource the run must make sure exists
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    pub name: String,
    pub description: String,
    /// Index of the parent node in the owning plan
    pub parent: Option<usize>,
    pub extra: Map<String, Value>,
}

impl ResourceSpec {
    pub fn new(
        kind: ResourceKind,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            parent: None,
            extra: Map::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// JSON body for the create call, given the parent's remote id
    pub fn payload(&self, parent_id: Option<u64>) -> Value {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(self.name));
        if self.kind.has_description() {
            body.insert("description".to_string(), json!(self.description));
        }
        if let (Some(field), Some(id)) = (self.kind.parent_field(), parent_id) {
            body.insert(field.to_string(), json!(id));
        }
        for (key, value) in &self.extra {
            body.insert(key.clone(), value.clone());
        }
        Value::Object(body)
    }
}

/// Ordered set of resources for one seeder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedPlan {
    nodes: Vec<ResourceSpec>,
}

impl SeedPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level node, returning its index
    pub fn add_root(&mut self, spec: ResourceSpec) -> usize {
        self.push(spec, None)
    }

    /// Append a node under `parent`, returning its index
    ///
    /// Panics if `parent` is not already in the plan.
    pub fn add_child(&mut self, parent: usize, spec: ResourceSpec) -> usize {
        assert!(parent < self.nodes.len(), "parent {parent} not in plan");
        self.push(spec, Some(parent))
    }

    fn push(&mut self, mut spec: ResourceSpec, parent: Option<usize>) -> usize {
        spec.parent = parent;
        self.nodes.push(spec);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[ResourceSpec] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count_of(&self, kind: ResourceKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Append another plan, re-basing its parent indices
    pub fn extend(&mut self, other: SeedPlan) {
        let offset = self.nodes.len();
        for mut node in other.nodes {
            node.parent = node.parent.map(|p| p + offset);
            self.nodes.push(node);
        }
    }

    /// Slash-separated path of names from the root down to `index`
    pub fn path_of(&self, index: usize) -> String {
        let mut names = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            names.push(self.nodes[i].name.as_str());
            current = self.nodes[i].parent;
        }
        names.reverse();
        names.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_includes_parent_field_and_extras() {
        let spec = ResourceSpec::new(ResourceKind::Part, "RTX 4090", "24GB")
            .with_attr("minimum_stock", json!(2))
            .with_attr("active", json!(true));
        let body = spec.payload(Some(7));
        assert_eq!(
            body,
            json!({
                "name": "RTX 4090",
                "description": "24GB",
                "category": 7,
                "minimum_stock": 2,
                "active": true
            })
        );
    }

    #[test]
    fn group_payload_is_name_only() {
        let spec = ResourceSpec::new(ResourceKind::Group, "tenant_demo", "ignored");
        assert_eq!(spec.payload(Some(3)), json!({"name": "tenant_demo"}));
    }

    #[test]
    fn extend_rebases_parents() {
        let mut a = SeedPlan::new();
        a.add_root(ResourceSpec::new(ResourceKind::Category, "GPU", ""));

        let mut b = SeedPlan::new();
        let root = b.add_root(ResourceSpec::new(ResourceKind::Location, "Warehouse", ""));
        b.add_child(root, ResourceSpec::new(ResourceKind::Location, "Zone-A", ""));

        a.extend(b);
        assert_eq!(a.nodes()[2].parent, Some(1));
        assert_eq!(a.path_of(2), "Warehouse/Zone-A");
    }

    #[test]
    #[should_panic(expected = "not in plan")]
    fn child_needs_existing_parent() {
        let mut plan = SeedPlan::new();
        plan.add_child(0, ResourceSpec::new(ResourceKind::Location, "orphan", ""));
    }
}
