//! Taxonomic identifier - newtype over the canonical string form
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of the NCBI global root
pub const ROOT_TAXID: &str = "1";

/// Taxonomy ID type
///
/// Numeric identifiers are stored in their decimal string form, so `9606`
/// and `"9606"` name the same taxon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Create a new TaxId, trimming surrounding whitespace
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    /// The NCBI root taxid (1)
    pub fn root() -> Self {
        Self(ROOT_TAXID.to_string())
    }

    /// Fresh identifier for a placeholder node
    pub fn dummy() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is the NCBI root taxon (1)
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_TAXID
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TaxId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaxId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaxId {
    fn from(id: String) -> Self {
        if id.trim().len() == id.len() {
            Self(id)
        } else {
            Self::new(id)
        }
    }
}

impl From<&String> for TaxId {
    fn from(id: &String) -> Self {
        Self::new(id)
    }
}

impl From<&TaxId> for TaxId {
    fn from(id: &TaxId) -> Self {
        id.clone()
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> Self {
        id.0
    }
}

macro_rules! taxid_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for TaxId {
                fn from(id: $t) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

taxid_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl PartialEq<str> for TaxId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaxId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
