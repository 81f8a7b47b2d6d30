//! # Driving Ports (Inbound API)
//!
//! The gossip-service handle returned to the caller, which owns the node's
//! lifecycle from then on.

use std::sync::Arc;

use crate::domain::{Membership, NodeConfig, PeerIdentity, PkiId};
use crate::ports::outbound::{Comm, IdentityCryptoService, SecurityProvider};

/// Running gossip membership instance.
pub trait Gossip: Send + Sync {
    /// PKI-ID this node announces itself with.
    fn self_pki_id(&self) -> &PkiId;

    /// Current membership view, excluding this node.
    fn peers(&self) -> Vec<Membership>;

    /// Stop the service and its communication layer. Idempotent.
    fn stop(&self);

    fn is_stopped(&self) -> bool;
}

/// Constructs gossip services.
pub trait GossipFactory: Send + Sync {
    type Gossip: Gossip;

    /// Wire a gossip service to its configuration, comm handle and
    /// security providers.
    ///
    /// # Arguments
    ///
    /// * `message_security` - signs and validates alive messages
    /// * `identity_service` - validates peer identities and maps them to PKI-IDs
    /// * `self_identity` - this node's own identity
    fn new_gossip_service(
        &self,
        config: NodeConfig,
        comm: Arc<dyn Comm>,
        message_security: Arc<dyn SecurityProvider>,
        identity_service: Arc<dyn IdentityCryptoService>,
        self_identity: PeerIdentity,
    ) -> Self::Gossip;
}
