//! A single taxonomic unit and its tree linkage
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::TaxId;

/// A node of the taxonomy tree.
///
/// Links to the parent and children are stored as [`TaxId`]s; the owning
/// [`Taxonomy`](crate::taxonomy::Taxonomy) resolves them and keeps the
/// back-links in `children` consistent with every `parent` assignment.
///
/// A node never points to itself: declaring a node as its own parent
/// leaves it without a parent (a root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    taxid: TaxId,
    name: Option<String>,
    rank: Option<String>,
    parent: Option<TaxId>,
    children: Vec<TaxId>,
    dummy: bool,
}

impl Node {
    /// Create a root node without name or rank
    pub fn new(taxid: impl Into<TaxId>) -> Self {
        Self {
            taxid: taxid.into(),
            name: None,
            rank: None,
            parent: None,
            children: Vec::new(),
            dummy: false,
        }
    }

    /// Create a placeholder node with a fresh identifier and no name or rank
    pub fn dummy() -> Self {
        Self {
            dummy: true,
            ..Self::new(TaxId::dummy())
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = Some(rank.into());
        self
    }

    /// Declare the parent of this node by identifier.
    ///
    /// The parent's `children` are updated when the node is registered in a
    /// taxonomy.
    pub fn with_parent(mut self, parent: impl Into<TaxId>) -> Self {
        self.assign_parent(Some(parent.into()));
        self
    }

    pub fn taxid(&self) -> &TaxId {
        &self.taxid
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rank(&self) -> Option<&str> {
        self.rank.as_deref()
    }

    pub fn parent(&self) -> Option<&TaxId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[TaxId] {
        &self.children
    }

    /// A root has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy
    }

    /// Check whether the rank of this node is one of `ranks`
    pub fn has_rank_in<S: AsRef<str>>(&self, ranks: &[S]) -> bool {
        match self.rank() {
            Some(rank) => ranks.iter().any(|r| r.as_ref() == rank),
            None => false,
        }
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn set_rank(&mut self, rank: Option<String>) {
        self.rank = rank;
    }

    /// Renaming a registered node goes through `Taxonomy::set_taxid`
    pub(crate) fn set_taxid(&mut self, taxid: impl Into<TaxId>) {
        self.taxid = taxid.into();
        if self.parent.as_ref() == Some(&self.taxid) {
            self.parent = None;
        }
    }

    /// Store the parent link, dropping self-references.
    ///
    /// Returns the parent actually stored.
    pub(crate) fn assign_parent(&mut self, parent: Option<TaxId>) -> Option<&TaxId> {
        self.parent = parent.filter(|p| *p != self.taxid);
        self.parent.as_ref()
    }

    pub(crate) fn push_child(&mut self, child: TaxId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub(crate) fn remove_child(&mut self, child: &TaxId) {
        self.children.retain(|c| c != child);
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Node(taxid: {}, name: {}, rank: {}, parent: {})",
            self.taxid,
            self.name.as_deref().unwrap_or("-"),
            self.rank.as_deref().unwrap_or("-"),
            self.parent.as_ref().map(TaxId::as_str).unwrap_or("-"),
        )
    }
}
