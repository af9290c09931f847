//! Layered planner configuration
//!
//! Defaults, then an optional YAML file, then `.env` and the process
//! environment, then CLI flags (applied by the binary).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Runtime settings for the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Gemini API key; empty means every completion is absent
    #[serde(skip_serializing)]
    pub api_key: String,

    pub model: String,

    pub api_base: String,

    /// SQLite cache location
    pub cache_path: PathBuf,

    pub cache_enabled: bool,

    /// Maximum concurrent oracle calls in multi-module plans
    pub concurrency: usize,

    pub debug: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            cache_path: default_cache_path(),
            cache_enabled: true,
            concurrency: DEFAULT_CONCURRENCY,
            debug: false,
        }
    }
}

/// `~/.project-planner/cache.db`, or `./.project-planner/cache.db` without a home
pub fn default_cache_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".project-planner")
        .join("cache.db")
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl PlannerConfig {
    /// Load defaults, the optional YAML file and the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                Self::from_yaml_str(&text)
                    .with_context(|| format!("Invalid config file: {}", path.display()))?
            }
            None => Self::default(),
        };

        dotenv::dotenv().ok();
        config.apply_env(|name| std::env::var(name).ok())?;

        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("Failed to parse config YAML")
    }

    /// Override fields from environment variables read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.api_key = key.trim().to_string();
        }
        if let Some(model) = lookup("GEMINI_MODEL").filter(|v| !v.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        if let Some(base) = lookup("GEMINI_API_BASE").filter(|v| !v.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        if let Some(path) = lookup("PLANNER_CACHE_PATH").filter(|v| !v.trim().is_empty()) {
            self.cache_path = PathBuf::from(path.trim());
        }
        if let Some(value) = lookup("PLANNER_CACHE") {
            self.cache_enabled = parse_flag(&value)
                .with_context(|| format!("PLANNER_CACHE must be a boolean, got '{}'", value))?;
        }
        if let Some(value) = lookup("PLANNER_CONCURRENCY") {
            self.concurrency = value.trim().parse().with_context(|| {
                format!("PLANNER_CONCURRENCY must be a number, got '{}'", value)
            })?;
        }
        if let Some(value) = lookup("PLANNER_DEBUG") {
            self.debug = parse_flag(&value).unwrap_or(false);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("model must not be empty");
        }
        Ok(())
    }
}
