//! Node configuration and protocol tuning.
//!
//! The tuning knobs are consumed by the gossip engine; nothing in this crate
//! enforces the latencies or intervals.

use std::time::Duration;

use super::errors::ConfigParseError;

/// Default maximum number of messages kept in the message store.
pub const DEFAULT_MAX_MESSAGE_COUNT_TO_STORE: usize = 100;
/// Default maximum time a propagation burst may be delayed.
pub const DEFAULT_MAX_PROPAGATION_BURST_LATENCY: Duration = Duration::from_millis(50);
/// Default maximum number of messages in one propagation burst.
pub const DEFAULT_MAX_PROPAGATION_BURST_SIZE: usize = 3;
/// Default number of times a message is pushed to peers.
pub const DEFAULT_PROPAGATE_ITERATIONS: usize = 1;
/// Default number of peers a message is pushed to per iteration.
pub const DEFAULT_PROPAGATE_PEER_NUM: usize = 3;
/// Default interval between pull rounds.
pub const DEFAULT_PULL_INTERVAL: Duration = Duration::from_secs(5);
/// Default number of peers contacted per pull round.
pub const DEFAULT_PULL_PEER_NUM: usize = 3;

/// Timing and sizing knobs of the dissemination engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolTuning {
    /// Maximum stored message count (default: 100)
    pub max_message_count_to_store: usize,
    /// Maximum propagation burst latency (default: 50ms)
    pub max_propagation_burst_latency: Duration,
    /// Maximum propagation burst size (default: 3)
    pub max_propagation_burst_size: usize,
    /// Push fan-out iterations (default: 1)
    pub propagate_iterations: usize,
    /// Push fan-out peer count (default: 3)
    pub propagate_peer_num: usize,
    /// Pull protocol interval (default: 5s)
    pub pull_interval: Duration,
    /// Pull protocol peer count (default: 3)
    pub pull_peer_num: usize,
}

impl Default for ProtocolTuning {
    fn default() -> Self {
        Self {
            max_message_count_to_store: DEFAULT_MAX_MESSAGE_COUNT_TO_STORE,
            max_propagation_burst_latency: DEFAULT_MAX_PROPAGATION_BURST_LATENCY,
            max_propagation_burst_size: DEFAULT_MAX_PROPAGATION_BURST_SIZE,
            propagate_iterations: DEFAULT_PROPAGATE_ITERATIONS,
            propagate_peer_num: DEFAULT_PROPAGATE_PEER_NUM,
            pull_interval: DEFAULT_PULL_INTERVAL,
            pull_peer_num: DEFAULT_PULL_PEER_NUM,
        }
    }
}

/// Operating parameters of one gossip node.
///
/// Built once per bootstrap and immutable afterwards. The gossip service
/// owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Node identifier (equal to `self_endpoint`)
    pub id: String,
    /// This node's endpoint as advertised to peers (host:port)
    pub self_endpoint: String,
    /// Port parsed from `self_endpoint`
    pub bind_port: u16,
    /// Well-known peers contacted to join the membership view.
    /// Not validated here.
    pub bootstrap_peers: Vec<String>,
    pub tuning: ProtocolTuning,
}

impl NodeConfig {
    /// Build a configuration with the default tuning.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` if the port segment of `self_endpoint`
    /// is missing or not a valid port number.
    pub fn new<I, S>(self_endpoint: &str, bootstrap_peers: I) -> Result<Self, ConfigParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_tuning(self_endpoint, bootstrap_peers, ProtocolTuning::default())
    }

    /// Build a configuration with explicit tuning.
    pub fn with_tuning<I, S>(
        self_endpoint: &str,
        bootstrap_peers: I,
        tuning: ProtocolTuning,
    ) -> Result<Self, ConfigParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bind_port = parse_bind_port(self_endpoint)?;
        Ok(Self {
            id: self_endpoint.to_string(),
            self_endpoint: self_endpoint.to_string(),
            bind_port,
            bootstrap_peers: bootstrap_peers.into_iter().map(Into::into).collect(),
            tuning,
        })
    }

    /// Whether this node starts without any bootstrap peer.
    pub fn is_seed(&self) -> bool {
        self.bootstrap_peers.is_empty()
    }
}

/// Extract the port from a `host:port` endpoint.
///
/// The port is the text after the last `:`, so bracketed IPv6 endpoints
/// such as `[::1]:7051` parse as well.
pub fn parse_bind_port(endpoint: &str) -> Result<u16, ConfigParseError> {
    let (_, port) = endpoint
        .rsplit_once(':')
        .ok_or_else(|| ConfigParseError::MissingPort {
            endpoint: endpoint.to_string(),
        })?;

    if port.is_empty() {
        return Err(ConfigParseError::MissingPort {
            endpoint: endpoint.to_string(),
        });
    }

    port.parse::<u16>()
        .map_err(|e| ConfigParseError::InvalidPort {
            endpoint: endpoint.to_string(),
            port: port.to_string(),
            reason: e.to_string(),
        })
}
