//! Shared taxonomy fixtures for integration tests
use taxtree::{Node, Taxonomy};

/// 0
/// |- 1
/// |  |- 11
/// |  |- 12
/// |      |- 121
/// |      |- 122
/// |- 2
///    |- 21
///    |- 22
///    |- 23
pub fn complex_tree() -> Taxonomy {
    Taxonomy::from_nodes(vec![
        Node::new(0).with_name("root").with_rank("root"),
        Node::new(1).with_name("node1").with_rank("rank1").with_parent(0),
        Node::new(2).with_name("node2").with_rank("rank1").with_parent(0),
        Node::new(11).with_name("node11").with_rank("rank2").with_parent(1),
        Node::new(12).with_name("node12").with_rank("rank2").with_parent(1),
        Node::new(21).with_name("node21").with_rank("rank2").with_parent(2),
        Node::new(22).with_name("node22").with_rank("rank2").with_parent(2),
        Node::new(23).with_name("node23").with_rank("rank2").with_parent(2),
        Node::new(121).with_name("node121").with_rank("rank3").with_parent(12),
        Node::new(122).with_name("node122").with_rank("rank3").with_parent(12),
    ])
}

/// Identifiers of the taxonomy, sorted for order-insensitive comparison
#[allow(dead_code)]
pub fn sorted_ids(taxonomy: &Taxonomy) -> Vec<String> {
    let mut ids: Vec<String> = taxonomy.ids().map(|id| id.to_string()).collect();
    ids.sort();
    ids
}

#[allow(dead_code)]
pub fn sorted_node_ids(nodes: &[&Node]) -> Vec<String> {
    let mut ids: Vec<String> = nodes.iter().map(|node| node.taxid().to_string()).collect();
    ids.sort();
    ids
}
