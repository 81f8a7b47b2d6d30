//! # TCP Communication Adapter
//!
//! `TcpComm` binds the gossip wire-protocol handler to an already-bound
//! `tokio::net::TcpListener`. The listener is shared with the caller: the
//! comm handle never closes it, it only stops using it.
//!
//! PKI-IDs are derived by the injected identity service, the same mapping
//! the gossip service uses.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::{CommError, PeerIdentity, PkiId, SecurityError};
use crate::ports::{Comm, CommFactory, ConnectionHandshake, DialOptions, IdentityCryptoService};

/// Communication handle bound to a TCP listener.
pub struct TcpComm {
    server: Arc<TcpListener>,
    local_addr: SocketAddr,
    security: Arc<dyn IdentityCryptoService>,
    identity: PeerIdentity,
    pki_id: PkiId,
    options: DialOptions,
    shutdown_tx: watch::Sender<bool>,
}

impl TcpComm {
    /// Bind a comm handle to `server`.
    ///
    /// # Errors
    ///
    /// - `CommError::EmptyIdentity` if `self_identity` is empty
    /// - `CommError::Listener` if the listener's address cannot be read
    pub fn new(
        server: Arc<TcpListener>,
        security: Arc<dyn IdentityCryptoService>,
        self_identity: Vec<u8>,
        options: DialOptions,
    ) -> Result<Self, CommError> {
        if self_identity.is_empty() {
            return Err(CommError::EmptyIdentity);
        }
        let local_addr = server
            .local_addr()
            .map_err(|e| CommError::Listener(e.to_string()))?;

        let identity = PeerIdentity::new(self_identity);
        let pki_id = security.get_pki_id_of_cert(&identity);
        let (shutdown_tx, _) = watch::channel(false);

        info!(
            %local_addr,
            %pki_id,
            insecure = options.insecure,
            auth_enabled = security.is_enabled(),
            "Comm instance bound to listener"
        );

        Ok(Self {
            server,
            local_addr,
            security,
            identity,
            pki_id,
            options,
            shutdown_tx,
        })
    }

    /// The shared listener this handle is bound to.
    pub fn server(&self) -> &Arc<TcpListener> {
        &self.server
    }

    pub fn self_identity(&self) -> &PeerIdentity {
        &self.identity
    }

    pub fn dial_options(&self) -> &DialOptions {
        &self.options
    }

    /// Receiver that flips to `true` once `stop` has been called.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }
}

impl Comm for TcpComm {
    fn pki_id(&self) -> &PkiId {
        &self.pki_id
    }

    fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    fn create_handshake(&self) -> Result<ConnectionHandshake, SecurityError> {
        let signature = self.security.sign(self.pki_id.as_bytes())?;
        Ok(ConnectionHandshake {
            pki_id: self.pki_id.clone(),
            identity: self.identity.clone(),
            signature,
        })
    }

    fn verify_handshake(&self, handshake: &ConnectionHandshake) -> Result<PkiId, SecurityError> {
        if self.security.get_pki_id_of_cert(&handshake.identity) != handshake.pki_id {
            return Err(SecurityError::IdentityRejected(format!(
                "PKI-ID {} does not match identity",
                handshake.pki_id
            )));
        }
        self.security.verify(
            Some(&handshake.identity),
            &handshake.signature,
            handshake.pki_id.as_bytes(),
        )?;
        debug!(remote = %handshake.pki_id, "Handshake verified");
        Ok(handshake.pki_id.clone())
    }

    fn stop(&self) {
        if self.shutdown_tx.send_replace(true) {
            return;
        }
        info!(local_addr = %self.local_addr, "Comm instance stopped");
    }

    fn is_stopped(&self) -> bool {
        *self.shutdown_tx.borrow()
    }
}

/// Factory producing `TcpComm` handles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpCommFactory;

impl CommFactory for TcpCommFactory {
    type Comm = TcpComm;

    fn new_comm_instance(
        &self,
        server: Arc<TcpListener>,
        security: Arc<dyn IdentityCryptoService>,
        self_identity: Vec<u8>,
        options: DialOptions,
    ) -> Result<TcpComm, CommError> {
        TcpComm::new(server, security, self_identity, options)
    }
}
