//! The hierarchy index: insertion resolver, forest, path resolver, lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::{HierarchyError, HierarchyResult};
use super::node::{dedup_preserving_order, NodeRegistry, SiteNode};
use crate::models::SiteId;

/// Where a newly inserted site attaches, decided before any mutation.
enum Attachment {
    /// An existing node hinted the new id; the new site becomes its child.
    UnderExisting(SiteId),
    /// The new site hinted an existing root; that root becomes its child.
    AdoptRoot(SiteId),
    NewRoot,
}

/// Forest of observing sites assembled incrementally from hint sets.
///
/// Invariants, which hold after every successful operation:
/// - a node has at most one parent;
/// - parent and children links are mutually consistent, no dangling ids;
/// - parent chains are acyclic and end at a root;
/// - `roots` is exactly the set of parentless registered nodes.
///
/// Failed operations leave the index untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyIndex {
    registry: NodeRegistry,
    roots: Vec<SiteId>,
}

impl HierarchyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a site with its declared hint set and resolve its place in
    /// the forest.
    ///
    /// Registered nodes are scanned in registration order and the first of
    /// two rules that matches wins, after which scanning stops:
    ///
    /// - an existing node whose hints contain the new id adopts the new
    ///   site as its child;
    /// - otherwise, if the new site's hints contain an existing node's id,
    ///   that node becomes the new site's child. The claimed node must
    ///   currently be a root; claiming an attached node fails with
    ///   [`HierarchyError::AlreadyHasParent`].
    ///
    /// The first-match policy is a deliberate, deterministic tie-break:
    /// when several nodes could match, only the earliest-registered
    /// relationship is established. With no match the site becomes a new
    /// root. Hints naming ids that were never registered are legal and
    /// simply never match.
    ///
    /// Re-inserting an existing id fails with
    /// [`HierarchyError::DuplicateInsert`]; hints are write-once. A hint
    /// set containing the site's own id fails with
    /// [`HierarchyError::CycleWouldForm`]. All checks run before any state
    /// changes, so insertion is all-or-nothing.
    pub fn insert(&mut self, id: SiteId, hints: Vec<SiteId>) -> HierarchyResult<()> {
        if self.registry.contains(&id) {
            return Err(HierarchyError::DuplicateInsert(id));
        }
        let hints = dedup_preserving_order(hints);
        if hints.contains(&id) {
            return Err(HierarchyError::CycleWouldForm { id });
        }

        let mut attachment = Attachment::NewRoot;
        for existing in self.registry.iter() {
            if existing.hints_contain(&id) {
                attachment = Attachment::UnderExisting(existing.id.clone());
                break;
            }
            if hints.contains(&existing.id) {
                if let Some(parent) = &existing.parent {
                    return Err(HierarchyError::AlreadyHasParent {
                        id: existing.id.clone(),
                        parent: parent.clone(),
                    });
                }
                attachment = Attachment::AdoptRoot(existing.id.clone());
                break;
            }
        }

        // Cycle guard, still before any mutation. A freshly inserted id has
        // no ancestors or descendants, so neither walk can currently find a
        // cycle beyond the self-hint rejected above; the guard keeps the
        // invariant checkable if reparenting operations are added.
        match &attachment {
            Attachment::UnderExisting(parent_id) => {
                if *parent_id == id || self.is_ancestor(&id, parent_id) {
                    return Err(HierarchyError::CycleWouldForm { id });
                }
            }
            Attachment::AdoptRoot(child_id) => {
                if self.is_ancestor(child_id, &id) {
                    return Err(HierarchyError::CycleWouldForm { id });
                }
            }
            Attachment::NewRoot => {}
        }

        match attachment {
            Attachment::UnderExisting(parent_id) => {
                let node = self.registry.register(id.clone(), hints);
                node.parent = Some(parent_id.clone());
                if let Some(parent) = self.registry.get_mut(&parent_id) {
                    parent.children.push(id);
                }
            }
            Attachment::AdoptRoot(child_id) => {
                let node = self.registry.register(id.clone(), hints);
                node.children.push(child_id.clone());
                if let Some(child) = self.registry.get_mut(&child_id) {
                    child.parent = Some(id.clone());
                }
                self.roots.retain(|r| r != &child_id);
                self.roots.push(id);
            }
            Attachment::NewRoot => {
                self.registry.register(id.clone(), hints);
                self.roots.push(id);
            }
        }
        Ok(())
    }

    /// Registry-backed O(1) lookup; the production path.
    pub fn find(&self, id: &SiteId) -> Option<&SiteNode> {
        self.registry.get(id)
    }

    pub fn contains(&self, id: &SiteId) -> bool {
        self.registry.contains(id)
    }

    /// Current root ids, in the order they became roots.
    pub fn roots(&self) -> &[SiteId] {
        &self.roots
    }

    pub fn parent(&self, id: &SiteId) -> Option<&SiteId> {
        self.registry.get(id).and_then(|n| n.parent.as_ref())
    }

    pub fn children(&self, id: &SiteId) -> Option<&[SiteId]> {
        self.registry.get(id).map(|n| n.children.as_slice())
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Nodes in registration order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = &SiteNode> {
        self.registry.iter()
    }

    /// The root-to-node id chain, root first, the node itself last. Its
    /// length equals the node's depth plus one.
    ///
    /// A parent link naming an unregistered id yields
    /// [`HierarchyError::BrokenLink`] carrying the partial path collected
    /// up to the break.
    pub fn id_path(&self, id: &SiteId) -> HierarchyResult<Vec<SiteId>> {
        let node = self
            .registry
            .get(id)
            .ok_or_else(|| HierarchyError::UnknownNode(id.clone()))?;

        let mut path = vec![node.id.clone()];
        let mut current = node.parent.clone();
        while let Some(parent_id) = current {
            match self.registry.get(&parent_id) {
                Some(parent) => {
                    path.push(parent.id.clone());
                    current = parent.parent.clone();
                }
                None => {
                    path.reverse();
                    return Err(HierarchyError::BrokenLink {
                        missing: parent_id,
                        path,
                    });
                }
            }
        }
        path.reverse();
        Ok(path)
    }

    /// Slash-joined rendering of [`id_path`](Self::id_path), for human and
    /// debug addressing.
    pub fn path_string(&self, id: &SiteId) -> HierarchyResult<String> {
        let path = self.id_path(id)?;
        Ok(path
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join("/"))
    }

    /// Remove a site. Its children are promoted to roots, in child order;
    /// its own root or child slot is released.
    pub fn remove(&mut self, id: &SiteId) -> HierarchyResult<()> {
        let node = self
            .registry
            .remove(id)
            .ok_or_else(|| HierarchyError::UnknownNode(id.clone()))?;

        match &node.parent {
            Some(parent_id) => {
                if let Some(parent) = self.registry.get_mut(parent_id) {
                    parent.children.retain(|c| c != id);
                }
            }
            None => self.roots.retain(|r| r != id),
        }

        for child_id in &node.children {
            if let Some(child) = self.registry.get_mut(child_id) {
                child.parent = None;
                self.roots.push(child_id.clone());
            }
        }
        Ok(())
    }

    /// Structural consistency check: a DFS over `roots` and `children` must
    /// reach every registered node exactly once, with mutually consistent
    /// links. Diagnostic path; production lookups go through
    /// [`find`](Self::find).
    pub fn verify_forest_matches_registry(&self) -> HierarchyResult<()> {
        let mut visited: HashSet<SiteId> = HashSet::new();
        let mut stack: Vec<SiteId> = self.roots.iter().rev().cloned().collect();

        while let Some(current_id) = stack.pop() {
            let node = self.registry.get(&current_id).ok_or_else(|| {
                HierarchyError::Inconsistent(format!(
                    "forest references unregistered site {current_id}"
                ))
            })?;
            if !visited.insert(current_id.clone()) {
                return Err(HierarchyError::Inconsistent(format!(
                    "site {current_id} is reachable more than once"
                )));
            }
            for child_id in &node.children {
                let child = self.registry.get(child_id).ok_or_else(|| {
                    HierarchyError::Inconsistent(format!(
                        "child link {current_id} -> {child_id} dangles"
                    ))
                })?;
                if child.parent.as_ref() != Some(&current_id) {
                    return Err(HierarchyError::Inconsistent(format!(
                        "{child_id} is listed under {current_id} but points elsewhere"
                    )));
                }
                stack.push(child_id.clone());
            }
        }

        if visited.len() != self.registry.len() {
            return Err(HierarchyError::Inconsistent(format!(
                "{} registered sites, {} reachable from roots",
                self.registry.len(),
                visited.len()
            )));
        }

        for node in self.registry.iter() {
            let in_roots = self.roots.contains(&node.id);
            if node.is_root() != in_roots {
                return Err(HierarchyError::Inconsistent(format!(
                    "root set drifted for site {}",
                    node.id
                )));
            }
            if let Some(parent_id) = &node.parent {
                let parent = self.registry.get(parent_id).ok_or_else(|| {
                    HierarchyError::Inconsistent(format!(
                        "parent link {} -> {parent_id} dangles",
                        node.id
                    ))
                })?;
                if !parent.children.contains(&node.id) {
                    return Err(HierarchyError::Inconsistent(format!(
                        "{} claims parent {parent_id} which does not list it",
                        node.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Does a parent-link walk from `of` pass through `candidate`?
    fn is_ancestor(&self, candidate: &SiteId, of: &SiteId) -> bool {
        let mut current = self.registry.get(of).and_then(|n| n.parent.clone());
        while let Some(current_id) = current {
            if &current_id == candidate {
                return true;
            }
            current = self.registry.get(&current_id).and_then(|n| n.parent.clone());
        }
        false
    }
}
