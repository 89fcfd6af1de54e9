//! Loading of NCBI taxdump files (`nodes.dmp` and `rankedlineage.dmp`)
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

use crate::config::LoaderConfig;
use crate::error::{TaxonomyError, TaxonomyResult};
use crate::taxonomy::{Node, Taxonomy};
use crate::types::TaxId;

/// One taxonomic unit as produced by a dump parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxdumpRecord {
    pub taxid: TaxId,
    pub parent_taxid: Option<TaxId>,
    pub rank: Option<String>,
    pub name: Option<String>,
}

impl TaxdumpRecord {
    pub fn new(
        taxid: impl Into<TaxId>,
        parent_taxid: impl Into<TaxId>,
        rank: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            taxid: taxid.into(),
            parent_taxid: Some(parent_taxid.into()),
            rank: Some(rank.into()),
            name: Some(name.into()),
        }
    }

    /// Build the node; a record pointing at itself yields a root
    pub fn into_node(self) -> Node {
        let mut node = Node::new(self.taxid);
        if let Some(parent) = self.parent_taxid {
            node = node.with_parent(parent);
        }
        node.set_rank(self.rank.filter(|r| !r.is_empty()));
        node.set_name(self.name.filter(|n| !n.is_empty()));
        node
    }
}

/// Split a dump line into trimmed fields.
///
/// NCBI lines end with a delimiter, so the trailing empty field is dropped.
pub fn parse_dump_line(line: &str, delimiter: &str) -> Vec<String> {
    let mut fields: Vec<String> = line
        .split(delimiter)
        .map(|field| field.trim().to_string())
        .collect();
    if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Read `(taxid, parent taxid, rank)` triples from a `nodes.dmp` stream
pub fn load_nodes<R: BufRead>(
    reader: R,
    config: &LoaderConfig,
) -> TaxonomyResult<Vec<(TaxId, TaxId, String)>> {
    let mut nodes = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_dump_line(&line, &config.field_delimiter);
        if fields.len() < 3 {
            return Err(TaxonomyError::Parse(format!(
                "nodes line {}: expected at least 3 fields, found {}",
                index + 1,
                fields.len()
            )));
        }
        if fields[0].is_empty() {
            return Err(TaxonomyError::Parse(format!(
                "nodes line {}: empty taxid",
                index + 1
            )));
        }

        nodes.push((
            TaxId::from(fields[0].as_str()),
            TaxId::from(fields[1].as_str()),
            fields[2].clone(),
        ));
    }

    Ok(nodes)
}

/// Read taxid to name pairs from a `rankedlineage.dmp` stream
pub fn load_names<R: BufRead>(
    reader: R,
    config: &LoaderConfig,
) -> TaxonomyResult<HashMap<TaxId, String>> {
    let mut names = HashMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_dump_line(&line, &config.field_delimiter);
        if fields.len() < 2 {
            return Err(TaxonomyError::Parse(format!(
                "rankedlineage line {}: expected at least 2 fields, found {}",
                index + 1,
                fields.len()
            )));
        }

        names.insert(TaxId::from(fields[0].as_str()), fields[1].clone());
    }

    Ok(names)
}

/// Join node and name streams into records
pub fn read_records<N: BufRead, L: BufRead>(
    nodes: N,
    rankedlineage: L,
    config: &LoaderConfig,
) -> TaxonomyResult<Vec<TaxdumpRecord>> {
    let triples = load_nodes(nodes, config)?;
    let mut names = load_names(rankedlineage, config)?;
    let root = TaxId::from(config.root_id.as_str());

    let records: Vec<TaxdumpRecord> = triples
        .into_iter()
        .map(|(taxid, parent, rank)| TaxdumpRecord {
            name: names.remove(&taxid),
            parent_taxid: if taxid == root { None } else { Some(parent) },
            taxid,
            rank: Some(rank),
        })
        .collect();

    if !names.is_empty() {
        warn!(
            "{} names in rankedlineage have no matching node and were skipped",
            names.len()
        );
    }

    Ok(records)
}

/// Open both dump files and join them into records
pub fn read_record_files<P: AsRef<Path>>(
    nodes_path: P,
    rankedlineage_path: P,
    config: &LoaderConfig,
) -> TaxonomyResult<Vec<TaxdumpRecord>> {
    let nodes = BufReader::new(File::open(nodes_path)?);
    let rankedlineage = BufReader::new(File::open(rankedlineage_path)?);
    read_records(nodes, rankedlineage, config)
}

impl Taxonomy {
    /// Load a taxonomy from the NCBI `nodes.dmp` and `rankedlineage.dmp` files
    pub fn from_taxdump<P: AsRef<Path>>(nodes: P, rankedlineage: P) -> TaxonomyResult<Self> {
        Self::from_taxdump_with(nodes, rankedlineage, &LoaderConfig::default())
    }

    pub fn from_taxdump_with<P: AsRef<Path>>(
        nodes: P,
        rankedlineage: P,
        config: &LoaderConfig,
    ) -> TaxonomyResult<Self> {
        let nodes = nodes.as_ref();
        let records = read_record_files(nodes, rankedlineage.as_ref(), config)?;
        let taxonomy = Self::from_records(records);
        info!("Loaded {} taxa from {}", taxonomy.len(), nodes.display());
        Ok(taxonomy)
    }
}
