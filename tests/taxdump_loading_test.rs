use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;
use taxtree::config::LoaderConfig;
use taxtree::{linnaean_ranks, Taxonomy, TaxonomyError};
use tempfile::TempDir;

const NODES: &str = "\
1\t|\t1\t|\tno rank\t|\t\t|
131567\t|\t1\t|\tno rank\t|\t\t|
2759\t|\t131567\t|\tsuperkingdom\t|\t\t|
33208\t|\t2759\t|\tkingdom\t|\t\t|
7711\t|\t33208\t|\tphylum\t|\t\t|
40674\t|\t7711\t|\tclass\t|\t\t|
91561\t|\t40674\t|\torder\t|\t\t|
9895\t|\t91561\t|\tfamily\t|\t\t|
27592\t|\t9895\t|\tsubfamily\t|\t\t|
9903\t|\t27592\t|\tgenus\t|\t\t|
9913\t|\t9903\t|\tspecies\t|\t\t|
9915\t|\t9903\t|\tspecies\t|\t\t|
";

const RANKEDLINEAGE: &str = "\
1\t|\troot\t|\t\t|
131567\t|\tcellular organisms\t|\t\t|
2759\t|\tEukaryota\t|\t\t|
33208\t|\tMetazoa\t|\tEukaryota\t|
7711\t|\tChordata\t|\tMetazoa\t|
40674\t|\tMammalia\t|\tChordata\t|
91561\t|\tArtiodactyla\t|\tMammalia\t|
9895\t|\tBovidae\t|\tArtiodactyla\t|
27592\t|\tBovinae\t|\tBovidae\t|
9903\t|\tBos\t|\tBovinae\t|
9913\t|\tBos taurus\t|\tBos\t|
9915\t|\tBos indicus\t|\tBos\t|
";

fn write_dump(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn load() -> Taxonomy {
    let dir = TempDir::new().unwrap();
    let nodes = write_dump(&dir, "nodes.dmp", NODES);
    let rankedlineage = write_dump(&dir, "rankedlineage.dmp", RANKEDLINEAGE);
    Taxonomy::from_taxdump(&nodes, &rankedlineage).unwrap()
}

#[test]
fn test_loading() {
    let tax = load();

    assert_eq!(tax.len(), 12);
    assert_eq!(tax.get(9913).unwrap().parent().map(|p| p.as_str()), Some("9903"));
    assert_eq!(tax.get_name(9913).unwrap(), Some("Bos taurus"));
    assert_eq!(tax.get_rank(9913).unwrap(), Some("species"));

    let ancestry = tax.get_ancestry(9903).unwrap();
    assert_eq!(ancestry.len(), 10);
    assert!(ancestry.last().unwrap().taxid().is_root());
    assert_eq!(tax.roots().len(), 1);
}

#[test]
fn test_name_lookup_and_lineage_filter() {
    let tax = load();

    assert_eq!(tax.get_taxid("Bos").len(), 1);
    let lineage = tax.get_ancestry(9913).unwrap();
    let ranked = lineage.filter(linnaean_ranks(), taxtree::LineageOrder::Descending);
    assert_eq!(
        ranked.to_string(),
        "Lineage(['2759', '33208', '7711', '40674', '91561', '9895', '9903', '9913'])"
    );
}

#[test]
fn test_filter_to_linnaean_ranks() {
    let mut tax = load();
    tax.filter_ranks(linnaean_ranks()).unwrap();

    assert!(!tax.contains(27592));
    assert!(!tax.contains(131567));
    assert_eq!(tax.get(9903).unwrap().parent().map(|p| p.as_str()), Some("9895"));
    assert_eq!(tax.get(2759).unwrap().parent().map(|p| p.as_str()), Some("1"));
    assert_eq!(tax.nodes().filter(|n| n.is_dummy()).count(), 0);
    assert_eq!(tax.lca([9913, 9915]).unwrap().name(), Some("Bos"));
}

#[test]
fn test_custom_delimiter() {
    let dir = TempDir::new().unwrap();
    let nodes = write_dump(&dir, "nodes.csv", "1;1;no rank\n2;1;superkingdom\n");
    let names = write_dump(&dir, "names.csv", "1;root\n2;Bacteria\n");
    let config = LoaderConfig {
        field_delimiter: ";".to_string(),
        root_id: "1".to_string(),
    };

    let tax = Taxonomy::from_taxdump_with(&nodes, &names, &config).unwrap();
    assert_eq!(tax.get_name(2).unwrap(), Some("Bacteria"));
    assert!(tax.get(1).unwrap().is_root());
}

#[test]
fn test_malformed_nodes_file() {
    let dir = TempDir::new().unwrap();
    let nodes = write_dump(&dir, "nodes.dmp", "1\t|\t1\t|\tno rank\t|\n2\t|\n");
    let rankedlineage = write_dump(&dir, "rankedlineage.dmp", RANKEDLINEAGE);

    match Taxonomy::from_taxdump(&nodes, &rankedlineage) {
        Err(TaxonomyError::Parse(msg)) => assert!(msg.contains("line 2"), "{}", msg),
        other => panic!("Expected Parse error, got {:?}", other.map(|t| t.len())),
    }
}
