use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub premium_pool: Option<f64>,
    pub podcast_skip_secs: Option<u32>,
    pub search_result_cap: Option<usize>,
    pub top_list_limit: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    #[test]
    fn empty_config_keeps_defaults() {
        let file: FileConfig = toml::from_str("").unwrap();
        let config = SimConfig::with_overrides(&file);
        assert_eq!(config.premium_pool, 1_000_000.0);
        assert_eq!(config.podcast_skip_secs, 90);
        assert_eq!(config.search_result_cap, 5);
        assert_eq!(config.top_list_limit, 5);
    }

    #[test]
    fn overrides_replace_only_the_given_fields() {
        let file: FileConfig = toml::from_str("podcast_skip_secs = 30\n").unwrap();
        let config = SimConfig::with_overrides(&file);
        assert_eq!(config.podcast_skip_secs, 30);
        assert_eq!(config.search_result_cap, 5);
    }
}
