//! Error types for the gossip node.
//!
//! Bootstrap-time errors (`ConfigParseError`, `CommError`, wrapped in
//! `BootstrapError`) are fatal for the bootstrap call: no partially wired
//! node is ever returned. Per-message errors (`SecurityError`,
//! `GossipError`) are recoverable; the caller drops the offending message.

use thiserror::Error;

use super::types::PkiId;

/// Self endpoint could not be turned into a bind port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigParseError {
    /// Endpoint has no `:port` segment
    #[error("endpoint `{endpoint}` has no port segment")]
    MissingPort {
        /// The endpoint as supplied
        endpoint: String,
    },

    /// Port segment is not a base-10 integer in 0..=65535
    #[error("invalid port `{port}` in endpoint `{endpoint}`: {reason}")]
    InvalidPort {
        /// The endpoint as supplied
        endpoint: String,
        /// The offending port segment
        port: String,
        /// Parser message
        reason: String,
    },
}

/// Signing and verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    /// Signature does not authenticate the message
    #[error("wrong signature: {signature:?}, {message:?}")]
    SignatureMismatch {
        /// Signature bytes as received
        signature: Vec<u8>,
        /// Message bytes the signature was checked against
        message: Vec<u8>,
    },

    /// Local signing key unavailable or signing failed
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Peer identity did not pass validation
    #[error("peer identity rejected: {0}")]
    IdentityRejected(String),

    /// Block signature did not pass validation
    #[error("block rejected: {0}")]
    BlockRejected(String),
}

/// Failures constructing a communication handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommError {
    /// Self identity must not be empty; it is the node's PKI-ID source
    #[error("self identity is empty")]
    EmptyIdentity,

    /// Server listener is unusable
    #[error("server listener unavailable: {0}")]
    Listener(String),
}

/// Bootstrap aborted; nothing was constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("invalid node configuration: {0}")]
    Config(#[from] ConfigParseError),

    #[error("failed to create comm instance: {0}")]
    Comm(#[from] CommError),

    /// Comm handle and gossip service derived different self PKI-IDs
    #[error("comm PKI-ID {comm} does not match gossip PKI-ID {gossip}")]
    IdentityMismatch { comm: PkiId, gossip: PkiId },
}

/// Errors raised by the gossip service when handling membership messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GossipError {
    /// Service has been stopped
    #[error("gossip service is stopped")]
    Stopped,

    /// Message announces this node itself
    #[error("alive message originates from self")]
    SelfMessage,

    /// Message failed authentication
    #[error("alive message from {0} failed validation")]
    InvalidAliveMessage(PkiId),

    #[error(transparent)]
    Security(#[from] SecurityError),
}
