//! # Naive Security Providers
//!
//! Non-cryptographic stand-ins for the security ports, for integration and
//! demo setups ONLY.
//!
//! | Provider | `is_enabled` | Ports |
//! |----------|--------------|-------|
//! | `DisabledCryptoService` | `false` | `SecurityProvider` |
//! | `AlwaysValidCryptoService` | `true` | `SecurityProvider`, `IdentityCryptoService` |
//!
//! Both sign by echoing the message and verify by byte equality, so a
//! signature is valid iff it equals the message it claims to cover.

use tracing::debug;

use crate::domain::{AliveMessage, PeerIdentity, PkiId, SecurityError, SignedBlock};
use crate::ports::{IdentityCryptoService, SecurityProvider};

fn verify_echo(signature: &[u8], message: &[u8]) -> Result<(), SecurityError> {
    if signature != message {
        debug!(
            signature_len = signature.len(),
            message_len = message.len(),
            "Signature mismatch"
        );
        return Err(SecurityError::SignatureMismatch {
            signature: signature.to_vec(),
            message: message.to_vec(),
        });
    }
    Ok(())
}

// =============================================================================
// DISABLED PROVIDER
// =============================================================================

/// Security provider with authentication switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCryptoService;

impl DisabledCryptoService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SecurityProvider for DisabledCryptoService {
    fn is_enabled(&self) -> bool {
        false
    }

    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, SecurityError> {
        Ok(msg.to_vec())
    }

    fn verify(
        &self,
        _identity: Option<&PeerIdentity>,
        signature: &[u8],
        message: &[u8],
    ) -> Result<(), SecurityError> {
        verify_echo(signature, message)
    }

    fn validate_alive_msg(&self, _msg: &AliveMessage) -> bool {
        true
    }

    fn sign_message(&self, msg: AliveMessage) -> AliveMessage {
        msg
    }
}

// =============================================================================
// ALWAYS-VALID PROVIDER
// =============================================================================

/// Security provider that reports authentication as enabled but accepts
/// every identity, alive message and block.
///
/// # Security
///
/// Placeholder for bootstrapping demos. It reports `is_enabled()` while
/// validating nothing, and must not be read as a trust model. The only
/// real check is `verify`, which still requires the echo signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValidCryptoService;

impl AlwaysValidCryptoService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SecurityProvider for AlwaysValidCryptoService {
    fn is_enabled(&self) -> bool {
        true
    }

    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, SecurityError> {
        Ok(msg.to_vec())
    }

    fn verify(
        &self,
        _identity: Option<&PeerIdentity>,
        signature: &[u8],
        message: &[u8],
    ) -> Result<(), SecurityError> {
        verify_echo(signature, message)
    }

    fn validate_alive_msg(&self, _msg: &AliveMessage) -> bool {
        true
    }

    fn sign_message(&self, msg: AliveMessage) -> AliveMessage {
        msg
    }
}

impl IdentityCryptoService for AlwaysValidCryptoService {
    fn validate_identity(&self, _identity: &PeerIdentity) -> Result<(), SecurityError> {
        Ok(())
    }

    fn get_pki_id_of_cert(&self, identity: &PeerIdentity) -> PkiId {
        PkiId::from(identity)
    }

    fn verify_block(&self, _block: &SignedBlock) -> Result<(), SecurityError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
