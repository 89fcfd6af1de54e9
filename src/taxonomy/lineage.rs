//! Ancestry paths from a node up to its root
use std::fmt;
use std::ops::Index;

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::taxonomy::{Node, Taxonomy};
use crate::types::TaxId;

/// Direction in which a [`Lineage`] is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineageOrder {
    /// Base node first, root last
    #[default]
    Ascending,
    /// Root first, base node last
    Descending,
}

/// The path from a base node to the root of its tree, both ends included.
///
/// Elements borrow the nodes owned by the [`Taxonomy`] the lineage was built
/// from; a lineage never mutates them.
#[derive(Debug, Clone)]
pub struct Lineage<'a> {
    nodes: Vec<&'a Node>,
    order: LineageOrder,
}

impl<'a> Lineage<'a> {
    /// Walk parent links from `base` up to a node without parent.
    ///
    /// Fails with `InvalidArgument` if `base` is not a node of `taxonomy`,
    /// with `NotFound` if a parent link points outside the taxonomy and with
    /// `Cycle` if the walk revisits more nodes than the taxonomy holds.
    pub fn new(
        taxonomy: &'a Taxonomy,
        base: impl Into<TaxId>,
        order: LineageOrder,
    ) -> TaxonomyResult<Self> {
        let base = base.into();
        let base_node = taxonomy.try_node(&base).ok_or_else(|| {
            TaxonomyError::InvalidArgument(format!("{} is not a node of this taxonomy", base))
        })?;

        let mut nodes = vec![base_node];
        let mut current = base_node;
        while let Some(parent_id) = current.parent() {
            current = taxonomy.get(parent_id)?;
            if nodes.len() >= taxonomy.len() {
                return Err(TaxonomyError::Cycle(base));
            }
            nodes.push(current);
        }

        if order == LineageOrder::Descending {
            nodes.reverse();
        }

        Ok(Self { nodes, order })
    }

    /// Lineage in base-to-root order
    pub fn ascending(taxonomy: &'a Taxonomy, base: impl Into<TaxId>) -> TaxonomyResult<Self> {
        Self::new(taxonomy, base, LineageOrder::Ascending)
    }

    /// Lineage in root-to-base order
    pub fn descending(taxonomy: &'a Taxonomy, base: impl Into<TaxId>) -> TaxonomyResult<Self> {
        Self::new(taxonomy, base, LineageOrder::Descending)
    }

    pub fn order(&self) -> LineageOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Node> {
        self.nodes.get(index).copied()
    }

    pub fn first(&self) -> Option<&'a Node> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<&'a Node> {
        self.nodes.last().copied()
    }

    /// The node the lineage was built from, whatever the order
    pub fn base(&self) -> Option<&'a Node> {
        match self.order {
            LineageOrder::Ascending => self.first(),
            LineageOrder::Descending => self.last(),
        }
    }

    /// The root at the far end of the lineage, whatever the order
    pub fn root(&self) -> Option<&'a Node> {
        match self.order {
            LineageOrder::Ascending => self.last(),
            LineageOrder::Descending => self.first(),
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a Node> + ExactSizeIterator + '_ {
        self.nodes.iter().copied()
    }

    pub fn ids(&self) -> Vec<&'a TaxId> {
        self.nodes.iter().map(|node| node.taxid()).collect()
    }

    pub fn contains(&self, taxid: &TaxId) -> bool {
        self.nodes.iter().any(|node| node.taxid() == taxid)
    }

    /// Same nodes, opposite order
    pub fn reversed(&self) -> Self {
        let order = match self.order {
            LineageOrder::Ascending => LineageOrder::Descending,
            LineageOrder::Descending => LineageOrder::Ascending,
        };
        Self {
            nodes: self.nodes.iter().rev().copied().collect(),
            order,
        }
    }

    /// Keep only the nodes whose rank is in `ranks`.
    ///
    /// Relative order is preserved and then laid out in `order`; ranks absent
    /// from the path are simply skipped.
    pub fn filter<S: AsRef<str>>(&self, ranks: &[S], order: LineageOrder) -> Self {
        let kept = Self {
            nodes: self
                .nodes
                .iter()
                .copied()
                .filter(|node| node.has_rank_in(ranks))
                .collect(),
            order: self.order,
        };

        if kept.order == order {
            kept
        } else {
            kept.reversed()
        }
    }
}

impl<'a> Index<usize> for Lineage<'a> {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        self.nodes[index]
    }
}

impl<'a> IntoIterator for Lineage<'a> {
    type Item = &'a Node;
    type IntoIter = std::vec::IntoIter<&'a Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl fmt::Display for Lineage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self
            .nodes
            .iter()
            .map(|node| format!("'{}'", node.taxid()))
            .collect();
        write!(f, "Lineage([{}])", ids.join(", "))
    }
}
