//! Configuration types for taxtree

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::taxonomy::linnaean_ranks;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub consensus: ConsensusConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    /// Separator between fields of a dump line
    #[serde(default = "default_field_delimiter")]
    pub field_delimiter: String,
    /// Taxid that never gets a parent
    #[serde(default = "default_root_id")]
    pub root_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsensusConfig {
    #[serde(default = "default_min_consensus")]
    pub min_consensus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Ranks kept by a rank collapse, highest level first
    #[serde(default = "default_ranks")]
    pub ranks: Vec<String>,
}

// Default value functions
fn default_field_delimiter() -> String { "|".to_string() }
fn default_root_id() -> String { "1".to_string() }
fn default_min_consensus() -> f64 { 0.51 }
fn default_ranks() -> Vec<String> { linnaean_ranks().iter().map(|r| r.to_string()).collect() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            field_delimiter: default_field_delimiter(),
            root_id: default_root_id(),
        }
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            min_consensus: default_min_consensus(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ranks: default_ranks(),
        }
    }
}

impl Config {
    /// Check values that serde alone cannot constrain
    pub fn validate(&self) -> TaxonomyResult<()> {
        if self.loader.field_delimiter.is_empty() {
            return Err(TaxonomyError::Configuration(
                "loader.field_delimiter must not be empty".to_string(),
            ));
        }
        if self.loader.root_id.trim().is_empty() {
            return Err(TaxonomyError::Configuration(
                "loader.root_id must not be empty".to_string(),
            ));
        }
        let min = self.consensus.min_consensus;
        if !(min > 0.5 && min <= 1.0) {
            return Err(TaxonomyError::Configuration(format!(
                "consensus.min_consensus must be above 0.5 and at most 1, got {}",
                min
            )));
        }
        if self.filter.ranks.is_empty() {
            return Err(TaxonomyError::Configuration(
                "filter.ranks must list at least one rank".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config() -> Config {
    Config::default()
}

/// Read and validate a TOML configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> TaxonomyResult<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> TaxonomyResult<()> {
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.loader.field_delimiter, "|");
        assert_eq!(config.loader.root_id, "1");
        assert_eq!(config.consensus.min_consensus, 0.51);
        assert_eq!(config.filter.ranks.first().map(String::as_str), Some("superkingdom"));
        assert_eq!(config.filter.ranks.last().map(String::as_str), Some("species"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[consensus]
min_consensus = 0.8

[filter]
ranks = ["genus", "species"]
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.consensus.min_consensus, 0.8);
        assert_eq!(config.filter.ranks, vec!["genus", "species"]);
        assert_eq!(config.loader, LoaderConfig::default());
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[consensus]\nmin_consensus = 0.5").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, TaxonomyError::Configuration(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[consensus\nmin_consensus = ").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, TaxonomyError::Configuration(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.loader.field_delimiter = "\t|\t".to_string();
        config.consensus.min_consensus = 1.0;

        save_config(file.path(), &config).unwrap();
        let loaded = load_config(file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
