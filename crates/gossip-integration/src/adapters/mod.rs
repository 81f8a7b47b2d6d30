//! # Adapters
//!
//! Concrete implementations of the driven ports:
//! - `crypto`: naive security providers (demo/integration only)
//! - `comm`: TCP-listener-bound communication handle
//! - `config`: static and TOML configuration providers

pub mod comm;
pub mod config;
pub mod crypto;

pub use comm::{TcpComm, TcpCommFactory};
pub use config::StaticConfigProvider;
#[cfg(feature = "toml-config")]
pub use config::{ConfigError, TomlConfigProvider};
pub use crypto::{AlwaysValidCryptoService, DisabledCryptoService};
