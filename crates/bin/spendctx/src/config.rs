//! config file loading
//!
//! ```toml
//! [binding]
//! domain = "zerocoin.spend-context.v1"
//! hash = "sha256"   # sha256 | blake2b | merlin
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use spend_context::{BindingConfig, ChallengeHash};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub binding: BindingConfig,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::parse(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }
}

/// file config (or defaults) with command line overrides applied
pub fn resolve(
    path: Option<&Path>,
    domain: Option<String>,
    hash: Option<ChallengeHash>,
) -> Result<BindingConfig> {
    let mut binding = match path {
        Some(p) => FileConfig::load(p)?.binding,
        None => BindingConfig::default(),
    };
    if let Some(domain) = domain {
        binding.domain = domain;
    }
    if let Some(hash) = hash {
        binding.hash = hash;
    }
    binding.validate()?;
    Ok(binding)
}
