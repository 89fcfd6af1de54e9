//! Taxonomy storage, construction and ancestry queries
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::taxonomy::ncbi::TaxdumpRecord;
use crate::taxonomy::{Lineage, LineageOrder, Node};
use crate::types::TaxId;

/// A set of taxonomy nodes keyed by [`TaxId`].
///
/// The taxonomy is the sole owner of its nodes (arena pattern); nodes refer
/// to each other by identifier only. Every `parent` assignment made through
/// the taxonomy updates the parent's `children`, and a reassignment removes
/// the node from its previous parent, so `children` always lists exactly the
/// registered nodes pointing back.
///
/// Nodes may be added in any order: a node whose parent is not registered yet
/// is attached as soon as the parent arrives.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    pub(crate) nodes: IndexMap<TaxId, Node>,
    /// Children waiting for their declared parent to be registered
    pub(crate) pending: HashMap<TaxId, Vec<TaxId>>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a taxonomy from a list of nodes.
    ///
    /// Later nodes replace earlier ones with the same identifier.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut taxonomy = Self::new();
        for node in nodes {
            taxonomy.nodes.insert(node.taxid().clone(), node);
        }
        taxonomy.rebuild_children();
        taxonomy
    }

    /// Wire flat `(taxid, parent, rank, name)` records into a tree.
    ///
    /// A record naming itself as parent (the NCBI root convention) becomes a
    /// root.
    pub fn from_records(records: impl IntoIterator<Item = TaxdumpRecord>) -> Self {
        Self::from_nodes(records.into_iter().map(TaxdumpRecord::into_node))
    }

    /// Register a node under its identifier, replacing any node already
    /// stored under that identifier.
    ///
    /// The `children` carried by `node` are ignored: they are derived from
    /// the parent links of the registered nodes.
    pub fn add_node(&mut self, mut node: Node) {
        node.clear_children();
        let taxid = node.taxid().clone();

        let previous = self
            .nodes
            .get(&taxid)
            .map(|old| (old.children().to_vec(), old.parent().cloned()));
        if let Some((children, old_parent)) = previous {
            debug!("Replacing node {}", taxid);
            for child in children {
                node.push_child(child);
            }
            if node.parent() != old_parent.as_ref() {
                self.detach(&taxid);
            }
        }

        if let Some(waiting) = self.pending.remove(&taxid) {
            for child in waiting {
                let still_points_here = self
                    .nodes
                    .get(&child)
                    .and_then(Node::parent)
                    .is_some_and(|p| *p == taxid);
                if still_points_here {
                    node.push_child(child);
                }
            }
        }

        if let Some(parent_id) = node.parent().cloned() {
            self.attach(&taxid, &parent_id);
        }

        self.nodes.insert(taxid, node);
    }

    /// Point `child` at `parent`, or make it a root with `None`.
    ///
    /// The child is unlinked from its previous parent. Assigning a node as its
    /// own parent clears the link instead.
    pub fn set_parent(
        &mut self,
        child: impl Into<TaxId>,
        parent: Option<TaxId>,
    ) -> TaxonomyResult<()> {
        let child = child.into();
        if !self.nodes.contains_key(&child) {
            return Err(TaxonomyError::NotFound(child));
        }
        if let Some(parent_id) = &parent {
            if !self.nodes.contains_key(parent_id) {
                return Err(TaxonomyError::NotFound(parent_id.clone()));
            }
        }

        self.detach(&child);

        let node = self.get_mut(&child)?;
        let assigned = node.assign_parent(parent).cloned();
        if let Some(parent_id) = assigned {
            self.attach(&child, &parent_id);
        }

        Ok(())
    }

    /// Move the node registered as `old` to the identifier `new`.
    ///
    /// The node keeps its position, its parent's `children` and the `parent`
    /// of each child are rewritten to the new identifier.
    pub fn set_taxid(
        &mut self,
        old: impl Into<TaxId>,
        new: impl Into<TaxId>,
    ) -> TaxonomyResult<()> {
        let old = old.into();
        let new = new.into();
        let Some(index) = self.nodes.get_index_of(&old) else {
            return Err(TaxonomyError::NotFound(old));
        };
        if old == new {
            return Ok(());
        }
        if self.nodes.contains_key(&new) {
            return Err(TaxonomyError::InvalidArgument(format!(
                "cannot rename {} to {}: identifier already in use",
                old, new
            )));
        }

        self.detach(&old);
        let Some(mut node) = self.nodes.shift_remove(&old) else {
            return Err(TaxonomyError::NotFound(old));
        };
        node.set_taxid(new.clone());

        for child in node.children() {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.assign_parent(Some(new.clone()));
            }
        }
        if let Some(waiting) = self.pending.remove(&new) {
            for child in waiting {
                node.push_child(child);
            }
        }
        if let Some(parent_id) = node.parent().cloned() {
            self.attach(&new, &parent_id);
        }

        self.nodes.insert(new.clone(), node);
        let last = self.nodes.len() - 1;
        self.nodes.move_index(last, index);

        debug!("Renamed node {} to {}", old, new);
        Ok(())
    }

    pub fn get(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<&Node> {
        let taxid = taxid.into();
        self.nodes.get(&taxid).ok_or(TaxonomyError::NotFound(taxid))
    }

    /// Mutable access for name and rank edits
    pub fn get_mut(&mut self, taxid: impl Into<TaxId>) -> TaxonomyResult<&mut Node> {
        let taxid = taxid.into();
        match self.nodes.get_mut(&taxid) {
            Some(node) => Ok(node),
            None => Err(TaxonomyError::NotFound(taxid)),
        }
    }

    pub(crate) fn try_node(&self, taxid: &TaxId) -> Option<&Node> {
        self.nodes.get(taxid)
    }

    pub fn contains(&self, taxid: impl Into<TaxId>) -> bool {
        self.nodes.contains_key(&taxid.into())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaxId, &Node)> {
        self.nodes.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TaxId> {
        self.nodes.keys()
    }

    /// Nodes without a parent
    pub fn roots(&self) -> Vec<&Node> {
        self.nodes.values().filter(|node| node.is_root()).collect()
    }

    pub fn get_name(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<Option<&str>> {
        Ok(self.get(taxid)?.name())
    }

    pub fn get_rank(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<Option<&str>> {
        Ok(self.get(taxid)?.rank())
    }

    pub fn get_parent(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<Option<&Node>> {
        match self.get(taxid)?.parent() {
            Some(parent) => self.get(parent).map(Some),
            None => Ok(None),
        }
    }

    pub fn get_children(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<Vec<&Node>> {
        self.get(taxid)?
            .children()
            .iter()
            .map(|child| self.get(child))
            .collect()
    }

    /// All identifiers whose node carries exactly `name` (case-sensitive)
    pub fn get_taxid(&self, name: &str) -> Vec<&TaxId> {
        let mut found: Vec<&TaxId> = self
            .nodes
            .values()
            .filter(|node| node.name() == Some(name))
            .map(Node::taxid)
            .collect();
        found.sort();
        found
    }

    /// Ancestry of `taxid`, from the node itself up to its root
    pub fn get_ancestry(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<Lineage<'_>> {
        let taxid = taxid.into();
        self.get(&taxid)?;
        Lineage::new(self, taxid, LineageOrder::Ascending)
    }

    /// Number of edges between `taxid` and its root
    pub fn depth(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<usize> {
        Ok(self.get_ancestry(taxid)?.len() - 1)
    }

    /// Test if `taxid` is a strict ancestor of `child`
    pub fn is_ancestor_of(
        &self,
        taxid: impl Into<TaxId>,
        child: impl Into<TaxId>,
    ) -> TaxonomyResult<bool> {
        let taxid = taxid.into();
        let child = child.into();
        if taxid == child {
            return Ok(false);
        }
        Ok(self.get_ancestry(child)?.contains(&taxid))
    }

    /// Test if `taxid` is a strict descendant of `parent`
    pub fn is_descendant_of(
        &self,
        taxid: impl Into<TaxId>,
        parent: impl Into<TaxId>,
    ) -> TaxonomyResult<bool> {
        self.is_ancestor_of(parent, taxid)
    }

    /// Nearest node on the ancestry of `taxid` (itself included) with `rank`
    pub fn ancestor_at_rank(
        &self,
        taxid: impl Into<TaxId>,
        rank: &str,
    ) -> TaxonomyResult<Option<&Node>> {
        Ok(self
            .get_ancestry(taxid)?
            .into_iter()
            .find(|node| node.rank() == Some(rank)))
    }

    /// Keep the identifiers whose rank is one of `ranks`, in input order
    pub fn filter_by_ranks<I, T, S>(&self, taxids: I, ranks: &[S]) -> TaxonomyResult<Vec<TaxId>>
    where
        I: IntoIterator<Item = T>,
        T: Into<TaxId>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        for taxid in taxids {
            let node = self.get(taxid)?;
            if node.has_rank_in(ranks) {
                kept.push(node.taxid().clone());
            }
        }
        Ok(kept)
    }

    /// All nodes below `taxid`, level by level, starting with its children
    pub fn list_descendants(&self, taxid: impl Into<TaxId>) -> TaxonomyResult<Vec<&Node>> {
        let start = self.get(taxid)?;
        let mut found = Vec::new();
        let mut queue: VecDeque<&TaxId> = start.children().iter().collect();

        while let Some(current) = queue.pop_front() {
            if found.len() >= self.nodes.len() {
                return Err(TaxonomyError::Cycle(start.taxid().clone()));
            }
            let node = self.get(current)?;
            queue.extend(node.children());
            found.push(node);
        }

        Ok(found)
    }

    /// Recompute every `children` list from the parent links
    pub(crate) fn rebuild_children(&mut self) {
        self.pending.clear();
        for node in self.nodes.values_mut() {
            node.clear_children();
        }

        let links: Vec<(TaxId, TaxId)> = self
            .nodes
            .values()
            .filter_map(|node| node.parent().map(|p| (node.taxid().clone(), p.clone())))
            .collect();

        for (child, parent) in links {
            self.attach(&child, &parent);
        }
    }

    /// Record `child` in the children of `parent`, or park it until the
    /// parent is registered
    fn attach(&mut self, child: &TaxId, parent: &TaxId) {
        match self.nodes.get_mut(parent) {
            Some(parent_node) => parent_node.push_child(child.clone()),
            None => self
                .pending
                .entry(parent.clone())
                .or_default()
                .push(child.clone()),
        }
    }

    /// Remove `child` from the children of its current parent
    fn detach(&mut self, child: &TaxId) {
        let Some(old_parent) = self.nodes.get(child).and_then(Node::parent).cloned() else {
            return;
        };
        match self.nodes.get_mut(&old_parent) {
            Some(parent_node) => parent_node.remove_child(child),
            None => {
                if let Some(waiting) = self.pending.get_mut(&old_parent) {
                    waiting.retain(|c| c != child);
                }
            }
        }
    }
}

impl FromIterator<Node> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}
