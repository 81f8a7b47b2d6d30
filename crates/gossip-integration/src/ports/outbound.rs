//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the bootstrap code assembles a node from.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::domain::{
    AliveMessage, CommError, PeerIdentity, PkiId, ProtocolTuning, SecurityError, SignedBlock,
};

/// Message-level security capability.
///
/// This is everything the communication layer needs: signing outgoing
/// payloads, verifying inbound ones, and authenticating alive messages.
///
/// # Thread Safety
///
/// Implementations must be stateless or internally synchronized. The comm
/// layer and the membership layer call `sign`/`verify` concurrently from
/// independent message-handling paths.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct Ed25519Provider {
///     signing_key: ed25519_dalek::SigningKey,
///     keys: HashMap<Vec<u8>, ed25519_dalek::VerifyingKey>,
/// }
///
/// impl SecurityProvider for Ed25519Provider {
///     fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, SecurityError> {
///         Ok(self.signing_key.sign(msg).to_bytes().to_vec())
///     }
///     // ...
/// }
/// ```
pub trait SecurityProvider: Send + Sync {
    /// Whether authentication is enforced on this node.
    fn is_enabled(&self) -> bool;

    /// Sign `msg` with this peer's signing key.
    ///
    /// # Errors
    ///
    /// `SecurityError::SigningFailed` if the signing key is unavailable.
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>, SecurityError>;

    /// Check that `signature` is a valid signature of `message` under the
    /// verification key of `identity`.
    ///
    /// `None` verifies against this node's own key.
    ///
    /// # Errors
    ///
    /// `SecurityError::SignatureMismatch` carrying both operands.
    fn verify(
        &self,
        identity: Option<&PeerIdentity>,
        signature: &[u8],
        message: &[u8],
    ) -> Result<(), SecurityError>;

    /// Authenticate an alive message before it enters the membership view.
    fn validate_alive_msg(&self, msg: &AliveMessage) -> bool;

    /// Sign an alive message, updating its signature field.
    fn sign_message(&self, msg: AliveMessage) -> AliveMessage;
}

/// Identity/PKI-level capability, needed by the gossip service on top of
/// the message-level operations.
pub trait IdentityCryptoService: SecurityProvider {
    /// Check that a peer identity is acceptable.
    fn validate_identity(&self, identity: &PeerIdentity) -> Result<(), SecurityError>;

    /// Derive the PKI-ID of a peer identity.
    fn get_pki_id_of_cert(&self, identity: &PeerIdentity) -> PkiId;

    /// Check that a block is properly signed.
    fn verify_block(&self, block: &SignedBlock) -> Result<(), SecurityError>;
}

/// Options used when dialing remote peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialOptions {
    /// Dial without transport security
    pub insecure: bool,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Default for DialOptions {
    fn default() -> Self {
        Self {
            insecure: true,
            connect_timeout: Duration::from_secs(3),
        }
    }
}

/// Connection-establishment proof exchanged by two comm handles.
///
/// `signature` covers `pki_id` and is checked against `identity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHandshake {
    pub pki_id: PkiId,
    pub identity: PeerIdentity,
    pub signature: Vec<u8>,
}

/// Communication layer bound to a server listener.
pub trait Comm: Send + Sync {
    /// PKI-ID of this node.
    fn pki_id(&self) -> &PkiId;

    /// Address the underlying listener is bound to.
    fn local_addr(&self) -> SocketAddr;

    /// Build a signed handshake announcing this node.
    fn create_handshake(&self) -> Result<ConnectionHandshake, SecurityError>;

    /// Verify a remote handshake and return the remote PKI-ID.
    ///
    /// The claimed PKI-ID must be the one the provider maps the claimed
    /// identity to.
    fn verify_handshake(&self, handshake: &ConnectionHandshake) -> Result<PkiId, SecurityError>;

    /// Stop the communication layer. Idempotent.
    fn stop(&self);

    fn is_stopped(&self) -> bool;
}

/// Constructs communication handles.
pub trait CommFactory: Send + Sync {
    type Comm: Comm + 'static;

    /// Bind a comm handle to an existing listener.
    ///
    /// The listener stays shared with the caller; the comm handle does not
    /// take exclusive ownership of it. PKI-IDs, both its own and those in
    /// remote handshakes, are derived through `security`.
    fn new_comm_instance(
        &self,
        server: Arc<TcpListener>,
        security: Arc<dyn IdentityCryptoService>,
        self_identity: Vec<u8>,
        options: DialOptions,
    ) -> Result<Self::Comm, CommError>;
}

/// Source of protocol tuning and bootstrap peers.
pub trait ConfigProvider: Send + Sync {
    /// Bootstrap peer endpoints, in configured order.
    fn get_bootstrap_peers(&self) -> Vec<String>;

    fn get_protocol_tuning(&self) -> ProtocolTuning;
}
