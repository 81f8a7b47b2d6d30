//! Domain Layer - Pure gossip node types with no I/O
//!
//! This module contains:
//! - Identity value types (`PkiId`, `PeerIdentity`)
//! - Membership announcements (`AliveMessage`, `Membership`, `PeerTime`)
//! - Node configuration and protocol tuning knobs
//! - Error types shared by every layer

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
