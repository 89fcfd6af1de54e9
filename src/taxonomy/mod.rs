//! Taxonomy trees: nodes, lineages, consensus and rank filtering

pub mod consensus;
pub mod core;
pub mod lineage;
pub mod mutate;
pub mod ncbi;
pub mod node;

pub use self::core::Taxonomy;
pub use lineage::{Lineage, LineageOrder};
pub use ncbi::{parse_dump_line, read_record_files, read_records, TaxdumpRecord};
pub use node::Node;

/// The main Linnaean ranks, from the highest level to the lowest
pub fn linnaean_ranks() -> &'static [&'static str] {
    &[
        "superkingdom",
        "kingdom",
        "phylum",
        "class",
        "order",
        "family",
        "genus",
        "species",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linnaean_ranks_order() {
        let ranks = linnaean_ranks();
        assert_eq!(ranks.len(), 8);
        assert_eq!(ranks[0], "superkingdom");
        assert_eq!(ranks[7], "species");
    }
}
