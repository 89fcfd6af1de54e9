//! Consensus, lowest common ancestor and tree distance
use indexmap::IndexMap;
use tracing::debug;

use crate::config::ConsensusConfig;
use crate::error::{TaxonomyError, TaxonomyResult};
use crate::taxonomy::{Lineage, LineageOrder, Node, Taxonomy};
use crate::types::TaxId;

impl Taxonomy {
    /// Deepest node shared by at least `min_consensus` of the given taxids.
    ///
    /// Root-first lineages are compared level by level. At each level the
    /// most frequent node is kept as long as its share of the inputs reaches
    /// `min_consensus`; the last node that passed is returned. Duplicated
    /// taxids count once per occurrence. Among equally frequent nodes the one
    /// met first in input order wins.
    ///
    /// `min_consensus` must lie in `(0.5, 1]`: lower values make the majority
    /// ambiguous. A value of 1 gives the lowest common ancestor.
    ///
    /// # Errors
    /// * `InvalidArgument` for an out-of-range threshold or an empty list
    /// * `NotFound` for an unknown taxid
    /// * `NoConsensus` if even the roots do not reach the threshold, e.g.
    ///   when the taxids live in unconnected trees
    pub fn consensus<I, T>(&self, taxids: I, min_consensus: f64) -> TaxonomyResult<&Node>
    where
        I: IntoIterator<Item = T>,
        T: Into<TaxId>,
    {
        if !(min_consensus > 0.5 && min_consensus <= 1.0) {
            return Err(TaxonomyError::InvalidArgument(format!(
                "minimal consensus should be above 0.5 and at most 1, got {}",
                min_consensus
            )));
        }

        let lineages = taxids
            .into_iter()
            .map(|taxid| {
                let taxid = taxid.into();
                self.get(&taxid)?;
                Lineage::new(self, taxid, LineageOrder::Descending)
            })
            .collect::<TaxonomyResult<Vec<_>>>()?;

        if lineages.is_empty() {
            return Err(TaxonomyError::InvalidArgument(
                "consensus needs at least one taxid".to_string(),
            ));
        }

        let total = lineages.len() as f64;
        let max_depth = lineages.iter().map(Lineage::len).min().unwrap_or(0);
        let mut last: Option<&Node> = None;

        for level in 0..max_depth {
            let mut counts: IndexMap<&TaxId, (usize, &Node)> = IndexMap::new();
            for node in lineages.iter().filter_map(|lineage| lineage.get(level)) {
                counts.entry(node.taxid()).or_insert((0, node)).0 += 1;
            }

            let mut best: Option<(usize, &Node)> = None;
            for &(count, node) in counts.values() {
                if best.map_or(true, |(best_count, _)| count > best_count) {
                    best = Some((count, node));
                }
            }

            match best {
                Some((count, node)) if count as f64 / total >= min_consensus => {
                    last = Some(node);
                }
                _ => break,
            }
        }

        match last {
            Some(node) => {
                debug!("Consensus at {} for {} taxids", node.taxid(), lineages.len());
                Ok(node)
            }
            None => Err(TaxonomyError::NoConsensus(format!(
                "no node reaches {} agreement among {} taxids",
                min_consensus,
                lineages.len()
            ))),
        }
    }

    /// Consensus at the threshold set in the `[consensus]` section
    pub fn consensus_with<I, T>(
        &self,
        taxids: I,
        config: &ConsensusConfig,
    ) -> TaxonomyResult<&Node>
    where
        I: IntoIterator<Item = T>,
        T: Into<TaxId>,
    {
        self.consensus(taxids, config.min_consensus)
    }

    /// Lowest common ancestor: consensus at full agreement
    pub fn lca<I, T>(&self, taxids: I) -> TaxonomyResult<&Node>
    where
        I: IntoIterator<Item = T>,
        T: Into<TaxId>,
    {
        self.consensus(taxids, 1.0)
    }

    /// Number of edges on the path between two nodes
    pub fn distance(
        &self,
        taxid1: impl Into<TaxId>,
        taxid2: impl Into<TaxId>,
    ) -> TaxonomyResult<usize> {
        let taxid1 = taxid1.into();
        let taxid2 = taxid2.into();

        let lca = self.lca([taxid1.clone(), taxid2.clone()])?;
        let d1 = self.depth(taxid1)?;
        let d2 = self.depth(taxid2)?;
        let dlca = self.depth(lca.taxid())?;

        Ok(d1 + d2 - 2 * dlca)
    }
}
