use crate::domain::ProtocolTuning;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider.
///
/// Useful for tests and demos. For file-based setups, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    bootstrap_peers: Vec<String>,
    tuning: ProtocolTuning,
}

impl StaticConfigProvider {
    /// Create with default tuning and no bootstrap peers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_bootstrap_peers<I, S>(mut self, peers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bootstrap_peers = peers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: ProtocolTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get_bootstrap_peers(&self) -> Vec<String> {
        self.bootstrap_peers.clone()
    }

    fn get_protocol_tuning(&self) -> ProtocolTuning {
        self.tuning.clone()
    }
}

// ============================================================================
// TomlConfigProvider - File-based config (requires "toml-config" feature)
// ============================================================================

#[cfg(feature = "toml-config")]
mod toml_config {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use thiserror::Error;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ConfigFile {
        #[serde(default)]
        bootstrap: BootstrapSection,
        #[serde(default)]
        gossip: GossipSection,
    }

    #[derive(Debug, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    struct BootstrapSection {
        #[serde(default)]
        peers: Vec<String>,
    }

    #[derive(Debug, Deserialize, Default)]
    #[serde(deny_unknown_fields)]
    struct GossipSection {
        max_message_count_to_store: Option<usize>,
        max_propagation_burst_latency_ms: Option<u64>,
        max_propagation_burst_size: Option<usize>,
        propagate_iterations: Option<usize>,
        propagate_peer_num: Option<usize>,
        pull_interval_ms: Option<u64>,
        pull_peer_num: Option<usize>,
    }

    /// TOML-based configuration provider.
    ///
    /// Every key is optional; missing keys fall back to
    /// `ProtocolTuning::default()`.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [bootstrap]
    /// peers = ["10.0.0.2:7051", "10.0.0.3:7051"]
    ///
    /// [gossip]
    /// max_message_count_to_store = 100
    /// max_propagation_burst_latency_ms = 50
    /// max_propagation_burst_size = 3
    /// propagate_iterations = 1
    /// propagate_peer_num = 3
    /// pull_interval_ms = 5000
    /// pull_peer_num = 3
    /// ```
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        bootstrap_peers: Vec<String>,
        tuning: ProtocolTuning,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read or parsed.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let defaults = ProtocolTuning::default();
            let g = file.gossip;
            let tuning = ProtocolTuning {
                max_message_count_to_store: g
                    .max_message_count_to_store
                    .unwrap_or(defaults.max_message_count_to_store),
                max_propagation_burst_latency: g
                    .max_propagation_burst_latency_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.max_propagation_burst_latency),
                max_propagation_burst_size: g
                    .max_propagation_burst_size
                    .unwrap_or(defaults.max_propagation_burst_size),
                propagate_iterations: g
                    .propagate_iterations
                    .unwrap_or(defaults.propagate_iterations),
                propagate_peer_num: g.propagate_peer_num.unwrap_or(defaults.propagate_peer_num),
                pull_interval: g
                    .pull_interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.pull_interval),
                pull_peer_num: g.pull_peer_num.unwrap_or(defaults.pull_peer_num),
            };

            Ok(Self {
                bootstrap_peers: file.bootstrap.peers,
                tuning,
            })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn get_bootstrap_peers(&self) -> Vec<String> {
            self.bootstrap_peers.clone()
        }

        fn get_protocol_tuning(&self) -> ProtocolTuning {
            self.tuning.clone()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ConfigError {
        #[error("Failed to read {path}: {error}")]
        Io {
            /// Path of the file that failed to load.
            path: String,
            /// Error message from the I/O operation.
            error: String,
        },
        #[error("Failed to parse config: {0}")]
        Parse(String),
    }
}

#[cfg(feature = "toml-config")]
pub use toml_config::{ConfigError, TomlConfigProvider};
