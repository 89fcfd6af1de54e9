//! Structural operations: subtree extraction, pruning and rank collapsing
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::FilterConfig;
use crate::error::TaxonomyResult;
use crate::taxonomy::{Node, Taxonomy};
use crate::types::TaxId;

/// Where a retained node gets reattached after a rank collapse
struct Relink {
    child: TaxId,
    anchor: TaxId,
    /// Requested levels missing between the anchor and the child
    missing_levels: Vec<usize>,
}

impl Taxonomy {
    /// Copy `new_root` and all its descendants into a new taxonomy.
    ///
    /// The copy owns clones of the nodes; in it, `new_root` is a root. Edits
    /// made to the copy do not reach this taxonomy, and the reverse holds too.
    pub fn subtree_copy(&self, new_root: impl Into<TaxId>) -> TaxonomyResult<Taxonomy> {
        let root = self.get(new_root)?;
        let mut nodes = IndexMap::new();

        let mut root_copy = root.clone();
        root_copy.assign_parent(None);
        nodes.insert(root.taxid().clone(), root_copy);

        for node in self.list_descendants(root.taxid())? {
            nodes.insert(node.taxid().clone(), node.clone());
        }

        debug!("Copied subtree of {} ({} nodes)", root.taxid(), nodes.len());
        Ok(Taxonomy {
            nodes,
            pending: HashMap::new(),
        })
    }

    /// Reduce this taxonomy to `new_root` and its descendants, in place.
    ///
    /// `new_root` loses its parent link and becomes the only root.
    pub fn prune(&mut self, new_root: impl Into<TaxId>) -> TaxonomyResult<()> {
        let new_root = new_root.into();
        let keep: IndexSet<TaxId> = std::iter::once(new_root.clone())
            .chain(
                self.list_descendants(&new_root)?
                    .into_iter()
                    .map(|node| node.taxid().clone()),
            )
            .collect();

        let before = self.nodes.len();
        self.nodes.retain(|taxid, _| keep.contains(taxid));
        self.pending.clear();
        self.get_mut(&new_root)?.assign_parent(None);

        info!(
            "Pruned taxonomy to {}: kept {} of {} nodes",
            new_root,
            self.nodes.len(),
            before
        );
        Ok(())
    }

    /// Collapse the taxonomy onto the given ranks, in place.
    ///
    /// `ranks` is read from the highest level to the lowest. Nodes whose rank
    /// is not listed are removed, roots excepted. Each remaining node is
    /// relinked to its nearest remaining ancestor; when requested levels are
    /// missing in between, the node is hung under one dummy placeholder per
    /// missing level. Placeholders are shared by nodes with the same anchor.
    pub fn filter_ranks<S: AsRef<str>>(&mut self, ranks: &[S]) -> TaxonomyResult<()> {
        let level_of = |node: &Node| -> Option<usize> {
            let rank = node.rank()?;
            ranks.iter().position(|r| r.as_ref() == rank)
        };
        let keeps = |node: &Node| node.is_root() || level_of(node).is_some();

        let mut relinks = Vec::new();
        for node in self.nodes.values() {
            if node.is_root() || !keeps(node) {
                continue;
            }

            let ancestry = self.get_ancestry(node.taxid())?;
            let anchor = ancestry
                .iter()
                .skip(1)
                .find(|&ancestor| keeps(ancestor))
                .unwrap_or_else(|| ancestry.root().unwrap_or(node));

            let first_missing = level_of(anchor).map_or(0, |level| level + 1);
            let own_level = level_of(node).unwrap_or(first_missing);

            relinks.push(Relink {
                child: node.taxid().clone(),
                anchor: anchor.taxid().clone(),
                missing_levels: (first_missing..own_level).collect(),
            });
        }

        let before = self.nodes.len();
        self.nodes.retain(|_, node| keeps(node));
        let removed = before - self.nodes.len();

        let mut placeholders: HashMap<(TaxId, usize), TaxId> = HashMap::new();
        for relink in relinks {
            let mut parent = relink.anchor;
            for level in relink.missing_levels {
                parent = match placeholders.get(&(parent.clone(), level)) {
                    Some(existing) => existing.clone(),
                    None => {
                        let dummy = Node::dummy().with_parent(parent.clone());
                        let dummy_id = dummy.taxid().clone();
                        debug!(
                            "Inserting placeholder {} for missing rank {} under {}",
                            dummy_id,
                            ranks[level].as_ref(),
                            parent
                        );
                        self.nodes.insert(dummy_id.clone(), dummy);
                        placeholders.insert((parent, level), dummy_id.clone());
                        dummy_id
                    }
                };
            }

            let node = self.get_mut(&relink.child)?;
            if node.parent() != Some(&parent) {
                debug!("Relinking {} under {}", relink.child, parent);
                node.assign_parent(Some(parent));
            }
        }

        self.rebuild_children();

        info!(
            "Filtered taxonomy to {} ranks: removed {} nodes, inserted {} placeholders, {} nodes left",
            ranks.len(),
            removed,
            placeholders.len(),
            self.nodes.len()
        );
        Ok(())
    }

    /// Collapse onto the ranks listed in the `[filter]` section
    pub fn filter_ranks_with(&mut self, config: &FilterConfig) -> TaxonomyResult<()> {
        self.filter_ranks(config.ranks.as_slice())
    }
}
