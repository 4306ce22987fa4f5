//! Site nodes and the flat node registry.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::models::SiteId;

/// One site in the hierarchy.
///
/// `parent` and `children` are ids into the owning [`NodeRegistry`], not
/// references; a node never owns its parent. `children` is kept in
/// discovery order, `hints` in declared order with duplicates dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteNode {
    pub id: SiteId,
    pub parent: Option<SiteId>,
    pub children: Vec<SiteId>,
    pub hints: Vec<SiteId>,
}

impl SiteNode {
    pub fn new(id: SiteId, hints: Vec<SiteId>) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            hints: dedup_preserving_order(hints),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn hints_contain(&self, id: &SiteId) -> bool {
        self.hints.iter().any(|h| h == id)
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
pub(crate) fn dedup_preserving_order(ids: Vec<SiteId>) -> Vec<SiteId> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Flat store mapping a site id to its node record.
///
/// The single source of truth for "does this id exist", and the only place
/// that allocates node storage. Registration order is preserved so that
/// hint-matching scans are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRegistry {
    nodes: HashMap<SiteId, SiteNode>,
    order: Vec<SiteId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `id`, creating a fresh parentless node with the
    /// given hints if none exists. Idempotent on the stored node: an
    /// existing record is returned unchanged and `hints` is ignored.
    pub fn register(&mut self, id: SiteId, hints: Vec<SiteId>) -> &mut SiteNode {
        match self.nodes.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                let node = SiteNode::new(entry.key().clone(), hints);
                entry.insert(node)
            }
        }
    }

    pub fn get(&self, id: &SiteId) -> Option<&SiteNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &SiteId) -> Option<&mut SiteNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &SiteId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &SiteId> {
        self.order.iter()
    }

    /// Nodes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SiteNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Drop a node from the store and the registration order.
    pub(crate) fn remove(&mut self, id: &SiteId) -> Option<SiteNode> {
        let node = self.nodes.remove(id)?;
        self.order.retain(|o| o != id);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SiteId {
        SiteId::from(s)
    }

    #[test]
    fn register_is_idempotent_on_node_identity() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), vec![id("b")]);

        // Second registration must return the original record, hints ignored.
        let node = registry.register(id("a"), vec![id("c")]);
        assert_eq!(node.hints, vec![id("b")]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn fresh_nodes_are_parentless_with_deduped_hints() {
        let mut registry = NodeRegistry::new();
        let node = registry.register(id("a"), vec![id("b"), id("c"), id("b")]);

        assert!(node.is_root());
        assert!(node.children.is_empty());
        assert_eq!(node.hints, vec![id("b"), id("c")]);
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = NodeRegistry::new();
        for name in ["m", "a", "z", "k"] {
            registry.register(id(name), Vec::new());
        }

        let order: Vec<&str> = registry.ids().map(|i| i.as_str()).collect();
        assert_eq!(order, vec!["m", "a", "z", "k"]);
    }

    #[test]
    fn get_has_no_side_effects() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), Vec::new());

        assert!(registry.get(&id("missing")).is_none());
        assert!(!registry.contains(&id("missing")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_drops_node_and_order_entry() {
        let mut registry = NodeRegistry::new();
        registry.register(id("a"), Vec::new());
        registry.register(id("b"), Vec::new());

        let removed = registry.remove(&id("a")).unwrap();
        assert_eq!(removed.id, id("a"));
        assert!(!registry.contains(&id("a")));
        let order: Vec<&str> = registry.ids().map(|i| i.as_str()).collect();
        assert_eq!(order, vec!["b"]);
    }
}
