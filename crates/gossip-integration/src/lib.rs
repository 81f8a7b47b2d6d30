//! # Gossip Node Integration
//!
//! Composition root for a gossip-protocol node: it turns a self endpoint, a
//! bootstrap peer list and the default protocol tuning into a running gossip
//! service bound to an existing TCP listener, with a pluggable
//! identity/authentication provider injected into both the communication
//! layer and the gossip service.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** identity types, alive messages, `NodeConfig`, errors
//! - **Ports Layer:** `SecurityProvider`, `IdentityCryptoService`, `Comm`,
//!   `Gossip` and their factories
//! - **Adapters Layer:** naive security providers, TCP comm handle,
//!   static/TOML config providers
//! - **Service / Bootstrap:** `GossipService` and `GossipBootstrapper`
//!
//! ## Security
//!
//! The shipped providers (`DisabledCryptoService`,
//! `AlwaysValidCryptoService`) are non-cryptographic stand-ins for
//! integration and demo setups ONLY. Real deployments inject their own
//! `IdentityCryptoService` through `GossipBootstrapper::with_identity_service`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gossip_integration::{new_gossip_component, Gossip};
//! use tokio::net::TcpListener;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let listener = Arc::new(TcpListener::bind("0.0.0.0:7051").await?);
//! let (gossip, comm) = new_gossip_component("10.0.0.1:7051", listener, ["10.0.0.2:7051"])?;
//!
//! assert_eq!(gossip.config().bind_port, 7051);
//! gossip.stop();
//! # drop(comm);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod bootstrap;
pub mod domain;
pub mod ports;
pub mod service;

// Domain
pub use domain::{
    parse_bind_port, AliveMessage, BootstrapError, CommError, ConfigParseError, GossipError,
    Membership, NodeConfig, PeerIdentity, PeerTime, PkiId, ProtocolTuning, SecurityError,
    SignedBlock,
};

// Ports
pub use ports::{
    Comm, CommFactory, ConfigProvider, ConnectionHandshake, DialOptions, Gossip, GossipFactory,
    IdentityCryptoService, SecurityProvider,
};

// Adapters
pub use adapters::{
    AlwaysValidCryptoService, DisabledCryptoService, StaticConfigProvider, TcpComm,
    TcpCommFactory,
};
#[cfg(feature = "toml-config")]
pub use adapters::{ConfigError, TomlConfigProvider};

// Service & bootstrap
pub use bootstrap::{new_gossip_component, GossipBootstrapper};
pub use service::{GossipService, GossipServiceFactory};
