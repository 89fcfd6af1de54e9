//! Identifier types shared across the crate

pub mod taxid;

pub use taxid::{TaxId, ROOT_TAXID};
