mod file_config;

pub use file_config::FileConfig;

/// Tunables of the simulation. Defaults match the reference scenario suite;
/// a TOML [`FileConfig`] can override any of them.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Pool split over a premium listener's pending plays on cancellation.
    pub premium_pool: f64,
    /// Seconds moved by the podcast forward/backward commands.
    pub podcast_skip_secs: u32,
    /// Maximum number of results a search returns.
    pub search_result_cap: usize,
    /// Length of the top lists in the wrapped statistics.
    pub top_list_limit: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            premium_pool: 1_000_000.0,
            podcast_skip_secs: 90,
            search_result_cap: 5,
            top_list_limit: 5,
        }
    }
}

impl SimConfig {
    pub fn with_overrides(file: &FileConfig) -> Self {
        let mut config = SimConfig::default();
        if let Some(pool) = file.premium_pool {
            config.premium_pool = pool;
        }
        if let Some(secs) = file.podcast_skip_secs {
            config.podcast_skip_secs = secs;
        }
        if let Some(cap) = file.search_result_cap {
            config.search_result_cap = cap;
        }
        if let Some(limit) = file.top_list_limit {
            config.top_list_limit = limit;
        }
        config
    }
}
