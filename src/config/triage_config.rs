use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::env_vars::expand_env_vars;
use crate::constants::{
    DEFAULT_CACHE_NAME, DEFAULT_EXCLUDED_KEYWORDS, DEFAULT_EXTRACTION_KEYWORDS, DEFAULT_LOG_NAME,
    DEFAULT_RESULTS_NAME, DEFAULT_SCAN_ROOT, DEFAULT_SUMMARY_NAME,
};
use crate::discovery::DiscoveryRules;

/// Run configuration, loaded from YAML.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TriageConfig {
    /// Tree walked when no root is given on the command line
    #[serde(default = "default_root")]
    pub default_root: PathBuf,

    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,

    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Where the run summary is written; no summary file when unset
    #[serde(default = "default_summary_path")]
    pub summary_path: Option<PathBuf>,

    /// Worker threads; one per CPU when unset
    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default = "default_excluded_keywords")]
    pub excluded_keywords: Vec<String>,

    #[serde(default = "default_extraction_keywords")]
    pub extraction_keywords: Vec<String>,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_SCAN_ROOT)
}

fn default_results_path() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_NAME)
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_NAME)
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_NAME)
}

fn default_summary_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_SUMMARY_NAME))
}

fn default_excluded_keywords() -> Vec<String> {
    DEFAULT_EXCLUDED_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

fn default_extraction_keywords() -> Vec<String> {
    DEFAULT_EXTRACTION_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

impl Default for TriageConfig {
    fn default() -> Self {
        TriageConfig {
            default_root: default_root(),
            results_path: default_results_path(),
            cache_path: default_cache_path(),
            log_path: default_log_path(),
            summary_path: default_summary_path(),
            workers: None,
            excluded_keywords: default_excluded_keywords(),
            extraction_keywords: default_extraction_keywords(),
        }
    }
}

impl TriageConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: TriageConfig =
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?;
        config.process_environment_variables();

        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Expand `%VAR%` / `$VAR` references in every configured path.
    pub fn process_environment_variables(&mut self) {
        fn expand(path: &mut PathBuf) {
            *path = PathBuf::from(expand_env_vars(&path.to_string_lossy()));
        }

        expand(&mut self.default_root);
        expand(&mut self.results_path);
        expand(&mut self.cache_path);
        expand(&mut self.log_path);
        if let Some(summary) = self.summary_path.as_mut() {
            expand(summary);
        }
    }

    /// Worker count to use, never zero.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn discovery_rules(&self) -> DiscoveryRules {
        DiscoveryRules::new(&self.excluded_keywords, &self.extraction_keywords)
    }
}

/// Load the configuration at `config_path`, writing a default file there if it
/// does not exist yet. Without a path the built-in defaults are used.
pub fn load_or_create_config(config_path: Option<&Path>) -> Result<TriageConfig> {
    match config_path {
        Some(path) if path.exists() => TriageConfig::from_yaml_file(path),
        Some(path) => {
            info!("Creating default config at {}", path.display());
            let config = TriageConfig::default();
            config.save_to_yaml_file(path)?;
            Ok(config)
        }
        None => {
            info!("No config path provided, using default configuration");
            Ok(TriageConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = TriageConfig::default();
        assert_eq!(config.results_path, PathBuf::from("results.json"));
        assert_eq!(config.cache_path, PathBuf::from("zip.sqlite"));
        assert_eq!(config.log_path, PathBuf::from("app.log"));
        assert_eq!(config.summary_path, Some(PathBuf::from("scan_summary.json")));
        assert_eq!(config.excluded_keywords, vec!["takeout", "icloud", "onedrive", "leapp", "axiom"]);
        assert_eq!(config.extraction_keywords, vec!["logical", "wiko"]);
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: TriageConfig = serde_yaml::from_str("workers: 3\nresults_path: out.json\n").unwrap();
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.results_path, PathBuf::from("out.json"));
        assert_eq!(config.cache_path, PathBuf::from("zip.sqlite"));
        assert_eq!(config.extraction_keywords, vec!["logical", "wiko"]);
    }

    #[test]
    fn test_zero_workers_clamped() {
        let config = TriageConfig {
            workers: Some(0),
            ..Default::default()
        };
        assert_eq!(config.worker_count(), 1);
    }

    #[test]
    fn test_save_and_load_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("triage.yaml");

        let config = TriageConfig {
            workers: Some(4),
            summary_path: None,
            ..Default::default()
        };
        config.save_to_yaml_file(&path).unwrap();

        let loaded = TriageConfig::from_yaml_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_create_config_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.yaml");

        let config = load_or_create_config(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config, TriageConfig::default());
    }

    #[test]
    fn test_load_or_create_config_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("existing.yaml");
        fs::write(&path, "excluded_keywords: [backup]\n").unwrap();

        let config = load_or_create_config(Some(&path)).unwrap();
        assert_eq!(config.excluded_keywords, vec!["backup"]);
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "workers: [not, a, number]\n").unwrap();
        assert!(TriageConfig::from_yaml_file(&path).is_err());
    }

    #[test]
    fn test_environment_variables_expanded() {
        std::env::set_var("MT_CONFIG_TEST_DIR", "/srv/triage");
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("env.yaml");
        fs::write(&path, "results_path: $MT_CONFIG_TEST_DIR/results.json\n").unwrap();

        let config = TriageConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.results_path, PathBuf::from("/srv/triage/results.json"));
    }
}
