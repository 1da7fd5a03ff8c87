use anyhow::{Context, Result};
use evolve_finance::CategorizerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_evolve_home, evolve_home};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub categorizer: CategorizerConfig,
    pub cache: CacheSection,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSection {
    pub backend: CacheBackend,
    pub redis: RedisSection,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            redis: RedisSection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RedisSection {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl Default for RedisSection {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            password: String::new(),
        }
    }
}

impl RedisSection {
    /// `redis://[:password@]host:port`
    pub fn url(&self) -> String {
        if self.password.is_empty() {
            format!("redis://{}:{}", self.host, self.port)
        } else {
            format!("redis://:{}@{}:{}", self.password, self.host, self.port)
        }
    }
}

impl Config {
    /// Apply REDIS_HOST / REDIS_PORT / REDIS_PASSWORD on top of the file values
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("REDIS_HOST") {
            self.cache.redis.host = host;
        }
        if let Some(port) = lookup("REDIS_PORT").and_then(|p| p.trim().parse().ok()) {
            self.cache.redis.port = port;
        }
        if let Some(password) = lookup("REDIS_PASSWORD") {
            self.cache.redis.password = password;
        }
    }
}

/// Config file location, creating the evolve home if needed
pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_evolve_home()?.join("config.toml"))
}

/// Effective configuration. Reading never creates the evolve home; without
/// one, defaults plus environment overrides are used.
pub fn load_config() -> Result<Config> {
    load_config_from(evolve_home(), |k| std::env::var(k).ok())
}

fn load_config_from(
    home: Result<PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let mut cfg = match home {
        Ok(dir) => read_config(&dir.join("config.toml"))?,
        Err(e) => {
            warn!(error = %e, "no evolve home; using default config");
            Config::default()
        }
    };
    cfg.apply_env_overrides(lookup);
    Ok(cfg)
}

pub fn read_config(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
