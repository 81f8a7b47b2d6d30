//! # Integration Flows
//!
//! Cross-module flows exercised through the public API only.

pub mod bootstrap_flows;
pub mod membership_flows;
