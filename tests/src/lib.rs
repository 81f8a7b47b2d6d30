//! # Gossip Node Test Suite
//!
//! Unified test crate for flows that span bootstrap, comm and gossip
//! service.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── bootstrap_flows.rs    # Node assembly end to end
//!     └── membership_flows.rs   # Two nodes exchanging handshakes and alive messages
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gossip-tests
//! cargo test -p gossip-tests integration::membership_flows::
//! ```

#![allow(dead_code)]

pub mod integration;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honours `RUST_LOG`; repeated calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
