//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the gossip-service API handed back to the
//!   caller after bootstrap
//! - **Driven Ports (Outbound):** security providers, the communication layer
//!   and configuration sources the node is assembled from
//!
//! ## Security
//!
//! `SecurityProvider` and `IdentityCryptoService` are the pluggable trust
//! model. The shipped adapters are non-cryptographic stand-ins; real
//! deployments substitute their own implementation without touching the
//! bootstrap code.

pub mod inbound;
pub mod outbound;

pub use inbound::{Gossip, GossipFactory};
pub use outbound::{
    Comm, CommFactory, ConfigProvider, ConnectionHandshake, DialOptions, IdentityCryptoService,
    SecurityProvider,
};
