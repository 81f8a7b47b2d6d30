//! # Gossip Service
//!
//! The gossip-service handle returned by bootstrap. It owns the node
//! configuration, holds the comm handle, and routes every security decision
//! through the injected providers:
//!
//! - `message_security` signs outgoing alive messages and, when enabled,
//!   authenticates incoming ones
//! - `identity_service` validates peer identities, maps them to PKI-IDs and
//!   verifies blocks
//!
//! Membership reconciliation (pull/push, liveness expiry) belongs to the
//! dissemination engine. This service only keeps the latest authenticated
//! alive message per peer.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::{
    AliveMessage, GossipError, Membership, NodeConfig, PeerIdentity, PeerTime, PkiId,
    SecurityError, SignedBlock,
};
use crate::ports::{Comm, Gossip, GossipFactory, IdentityCryptoService, SecurityProvider};

/// Nanoseconds since the epoch, saturating at `u64::MAX`.
fn incarnation_from(since_epoch: Duration) -> u64 {
    u64::try_from(since_epoch.as_nanos()).unwrap_or(u64::MAX)
}

/// Running gossip membership instance.
pub struct GossipService {
    config: NodeConfig,
    comm: Arc<dyn Comm>,
    message_security: Arc<dyn SecurityProvider>,
    identity_service: Arc<dyn IdentityCryptoService>,
    self_identity: PeerIdentity,
    self_pki_id: PkiId,
    /// Incarnation number, fixed for the lifetime of this instance
    inc_number: u64,
    seq_num: AtomicU64,
    members: RwLock<HashMap<PkiId, AliveMessage>>,
    stopped: AtomicBool,
}

impl GossipService {
    /// Wire a gossip service.
    ///
    /// The incarnation number is taken from the wall clock so a restarted
    /// node supersedes its previous announcements.
    pub fn new(
        config: NodeConfig,
        comm: Arc<dyn Comm>,
        message_security: Arc<dyn SecurityProvider>,
        identity_service: Arc<dyn IdentityCryptoService>,
        self_identity: PeerIdentity,
    ) -> Self {
        let inc_number = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(incarnation_from)
            .unwrap_or_default();
        Self::with_incarnation(
            config,
            comm,
            message_security,
            identity_service,
            self_identity,
            inc_number,
        )
    }

    /// Wire a gossip service with an explicit incarnation number.
    pub fn with_incarnation(
        config: NodeConfig,
        comm: Arc<dyn Comm>,
        message_security: Arc<dyn SecurityProvider>,
        identity_service: Arc<dyn IdentityCryptoService>,
        self_identity: PeerIdentity,
        inc_number: u64,
    ) -> Self {
        let self_pki_id = identity_service.get_pki_id_of_cert(&self_identity);

        info!(
            id = %config.id,
            bind_port = config.bind_port,
            bootstrap_peers = config.bootstrap_peers.len(),
            message_auth = message_security.is_enabled(),
            "Gossip service created"
        );

        Self {
            config,
            comm,
            message_security,
            identity_service,
            self_identity,
            self_pki_id,
            inc_number,
            seq_num: AtomicU64::new(0),
            members: RwLock::new(HashMap::new()),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn comm(&self) -> &Arc<dyn Comm> {
        &self.comm
    }

    pub fn self_identity(&self) -> &PeerIdentity {
        &self.self_identity
    }

    /// Build and sign the next alive message announcing this node.
    pub fn create_alive_message(&self) -> AliveMessage {
        let seq_num = self.seq_num.fetch_add(1, Ordering::SeqCst) + 1;
        let msg = AliveMessage::new(
            Membership {
                endpoint: self.config.self_endpoint.clone(),
                metadata: Vec::new(),
                pki_id: self.self_pki_id.clone(),
            },
            PeerTime::new(self.inc_number, seq_num),
        );
        self.message_security.sign_message(msg)
    }

    /// Accept an alive message into the membership view.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the view changed
    /// - `Ok(false)` if an equal or newer message was already stored
    ///
    /// # Errors
    ///
    /// - `GossipError::Stopped` after `stop`
    /// - `GossipError::SelfMessage` for this node's own announcements
    /// - `GossipError::InvalidAliveMessage` if message security is enabled
    ///   and the message fails validation
    pub fn handle_alive_message(&self, msg: AliveMessage) -> Result<bool, GossipError> {
        if self.is_stopped() {
            return Err(GossipError::Stopped);
        }
        if msg.pki_id() == &self.self_pki_id {
            return Err(GossipError::SelfMessage);
        }
        if self.message_security.is_enabled() && !self.message_security.validate_alive_msg(&msg) {
            warn!(peer = %msg.pki_id(), "Dropping alive message that failed validation");
            return Err(GossipError::InvalidAliveMessage(msg.pki_id().clone()));
        }

        let mut members = self.members.write();
        match members.entry(msg.pki_id().clone()) {
            Entry::Occupied(mut entry) => {
                if entry.get().timestamp >= msg.timestamp {
                    return Ok(false);
                }
                entry.insert(msg);
            }
            Entry::Vacant(entry) => {
                debug!(
                    peer = %msg.pki_id(),
                    endpoint = %msg.membership.endpoint,
                    "New peer in membership view"
                );
                entry.insert(msg);
            }
        }
        Ok(true)
    }

    /// Latest stored alive message of a peer.
    pub fn alive_message_of(&self, pki_id: &PkiId) -> Option<AliveMessage> {
        self.members.read().get(pki_id).cloned()
    }

    /// Validate a peer identity and return its PKI-ID.
    pub fn verify_peer_identity(&self, identity: &PeerIdentity) -> Result<PkiId, SecurityError> {
        self.identity_service.validate_identity(identity)?;
        Ok(self.identity_service.get_pki_id_of_cert(identity))
    }

    pub fn verify_block(&self, block: &SignedBlock) -> Result<(), SecurityError> {
        self.identity_service.verify_block(block)
    }
}

impl Gossip for GossipService {
    fn self_pki_id(&self) -> &PkiId {
        &self.self_pki_id
    }

    fn peers(&self) -> Vec<Membership> {
        let mut peers: Vec<Membership> = self
            .members
            .read()
            .values()
            .map(|msg| msg.membership.clone())
            .collect();
        peers.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
        peers
    }

    fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        self.comm.stop();
        info!(id = %self.config.id, "Gossip service stopped");
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Factory producing `GossipService` instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct GossipServiceFactory;

impl GossipFactory for GossipServiceFactory {
    type Gossip = GossipService;

    fn new_gossip_service(
        &self,
        config: NodeConfig,
        comm: Arc<dyn Comm>,
        message_security: Arc<dyn SecurityProvider>,
        identity_service: Arc<dyn IdentityCryptoService>,
        self_identity: PeerIdentity,
    ) -> GossipService {
        GossipService::new(config, comm, message_security, identity_service, self_identity)
    }
}
