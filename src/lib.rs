//! Taxonomy trees built from NCBI taxdump files, with lineage, consensus and
//! rank filtering queries

pub mod config;
pub mod error;
pub mod logging;
pub mod taxonomy;
pub mod types;

pub use config::{default_config, load_config, save_config, Config};
pub use error::{TaxonomyError, TaxonomyResult};
pub use taxonomy::{linnaean_ranks, Lineage, LineageOrder, Node, TaxdumpRecord, Taxonomy};
pub use types::TaxId;

/// Version information for taxtree
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
