use std::path::PathBuf;
use std::sync::Arc;

use easy_config_store::ConfigStore;
use eyre::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::parser::ruler::{EntityLabel, EntityPattern};

pub type Config = Arc<ConfigInner>;

pub fn config(path: PathBuf) -> Result<Config> {
    let config_store = ConfigStore::<ConfigInner>::read(path, "config".to_string())?;
    let inner = (*config_store).clone();

    info!("config parsing successful");
    debug!("loaded configuration:\n{}", toml::to_string_pretty(&inner)?);

    Ok(Arc::new(inner))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ConfigInner {
    #[serde(default)]
    pub ruler: RulerConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RulerConfig {
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
    #[serde(default = "default_patterns")]
    pub patterns: Vec<EntityPattern>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub json: bool,
    #[serde(default = "default_true")]
    pub csv: bool,
    #[serde(default = "default_true")]
    pub dashboard: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_case_sensitive() -> bool {
    true
}

fn default_true() -> bool {
    true
}

/// Patterns the analyzer ships with when `[ruler]` lists none.
pub fn default_patterns() -> Vec<EntityPattern> {
    [
        (EntityLabel::Degree, "BS"),
        (EntityLabel::Degree, "B.Sc"),
        (EntityLabel::Degree, "Bachelors"),
        (EntityLabel::Degree, "Masters"),
        (EntityLabel::Degree, "PhD"),
        (EntityLabel::Skill, "Python"),
        (EntityLabel::Skill, "Machine Learning"),
        (EntityLabel::Skill, "SQL"),
    ]
    .into_iter()
    .map(|(label, pattern)| EntityPattern {
        label,
        pattern: pattern.to_string(),
    })
    .collect()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("analysis")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".resume-cache")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            case_sensitive: default_case_sensitive(),
            patterns: default_patterns(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            json: true,
            csv: true,
            dashboard: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_cache_dir(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ConfigInner {
    fn default() -> Self {
        let cfg = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.default.toml"));

        toml::from_str(cfg).expect("bundled config.default.toml must parse")
    }
}
