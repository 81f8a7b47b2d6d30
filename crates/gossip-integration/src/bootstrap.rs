//! # Node Bootstrap
//!
//! Composition root for a gossip node.
//!
//! ## Bootstrap Sequence
//!
//! 1. Parse the bind port out of the self endpoint
//! 2. Build `NodeConfig` (self endpoint as node ID, bootstrap peers, tuning)
//! 3. Bind a comm handle to the caller's listener, using the identity
//!    service as its security provider and the endpoint bytes as identity
//! 4. Wire the gossip service to config, comm handle, message-security
//!    provider and identity service
//! 5. Check that comm handle and gossip service agree on the self PKI-ID
//!
//! Bootstrap is all-or-nothing: a failure in step 1, 3 or 5 returns an error
//! and nothing constructed so far escapes. It is never retried internally.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::adapters::{AlwaysValidCryptoService, DisabledCryptoService, TcpComm, TcpCommFactory};
use crate::domain::{BootstrapError, NodeConfig, PeerIdentity, ProtocolTuning};
use crate::ports::{
    Comm, CommFactory, ConfigProvider, DialOptions, Gossip, GossipFactory, IdentityCryptoService,
    SecurityProvider,
};
use crate::service::{GossipService, GossipServiceFactory};

/// Assembles gossip nodes from configuration primitives.
///
/// Security providers are injected here; nothing is looked up globally.
/// The identity service is one shared instance serving both the comm layer
/// and the gossip service's identity role, so both see the same
/// verification decisions.
///
/// # Example
///
/// ```rust,ignore
/// let listener = Arc::new(TcpListener::bind("0.0.0.0:7051").await?);
/// let (gossip, comm) = GossipBootstrapper::new()
///     .bootstrap("10.0.0.1:7051", listener, ["10.0.0.2:7051"])?;
/// ```
pub struct GossipBootstrapper<C = TcpCommFactory, G = GossipServiceFactory> {
    comm_factory: C,
    gossip_factory: G,
    identity_service: Arc<dyn IdentityCryptoService>,
    message_security: Arc<dyn SecurityProvider>,
    tuning: ProtocolTuning,
    dial_options: DialOptions,
}

impl GossipBootstrapper {
    /// Bootstrapper with the TCP comm layer, the default gossip service and
    /// the naive demo providers.
    pub fn new() -> Self {
        Self::with_factories(TcpCommFactory, GossipServiceFactory)
    }
}

impl Default for GossipBootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CommFactory, G: GossipFactory> GossipBootstrapper<C, G> {
    /// Bootstrapper with custom comm and gossip factories.
    pub fn with_factories(comm_factory: C, gossip_factory: G) -> Self {
        Self {
            comm_factory,
            gossip_factory,
            identity_service: Arc::new(AlwaysValidCryptoService::new()),
            message_security: Arc::new(DisabledCryptoService::new()),
            tuning: ProtocolTuning::default(),
            dial_options: DialOptions::default(),
        }
    }

    /// Replace the identity service. The same instance also becomes the
    /// comm layer's security provider.
    #[must_use]
    pub fn with_identity_service(mut self, provider: Arc<dyn IdentityCryptoService>) -> Self {
        self.identity_service = provider;
        self
    }

    /// Replace the provider that signs and validates alive messages.
    #[must_use]
    pub fn with_message_security(mut self, provider: Arc<dyn SecurityProvider>) -> Self {
        self.message_security = provider;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: ProtocolTuning) -> Self {
        self.tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_dial_options(mut self, options: DialOptions) -> Self {
        self.dial_options = options;
        self
    }

    /// Assemble a node bound to `server`.
    ///
    /// Returns the gossip-service handle and its comm handle separately so
    /// the caller can drive transport shutdown on its own.
    ///
    /// # Errors
    ///
    /// - `BootstrapError::Config` if `self_endpoint` has no valid port
    /// - `BootstrapError::Comm` if the comm handle cannot be bound
    /// - `BootstrapError::IdentityMismatch` if the comm handle and the gossip
    ///   service derive different PKI-IDs for this node
    pub fn bootstrap<I, S>(
        &self,
        self_endpoint: &str,
        server: Arc<TcpListener>,
        bootstrap_peers: I,
    ) -> Result<(G::Gossip, Arc<C::Comm>), BootstrapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assemble(self_endpoint, server, bootstrap_peers, self.tuning.clone())
    }

    /// Assemble a node with bootstrap peers and tuning taken from `provider`.
    ///
    /// The provider's tuning overrides the bootstrapper's.
    pub fn bootstrap_from_provider(
        &self,
        self_endpoint: &str,
        server: Arc<TcpListener>,
        provider: &dyn ConfigProvider,
    ) -> Result<(G::Gossip, Arc<C::Comm>), BootstrapError> {
        self.assemble(
            self_endpoint,
            server,
            provider.get_bootstrap_peers(),
            provider.get_protocol_tuning(),
        )
    }

    fn assemble<I, S>(
        &self,
        self_endpoint: &str,
        server: Arc<TcpListener>,
        bootstrap_peers: I,
        tuning: ProtocolTuning,
    ) -> Result<(G::Gossip, Arc<C::Comm>), BootstrapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = NodeConfig::with_tuning(self_endpoint, bootstrap_peers, tuning)
            .map_err(|e| {
                error!(endpoint = %self_endpoint, error = %e, "Bootstrap aborted");
                BootstrapError::from(e)
            })?;

        let comm = self
            .comm_factory
            .new_comm_instance(
                server,
                Arc::clone(&self.identity_service),
                self_endpoint.as_bytes().to_vec(),
                self.dial_options.clone(),
            )
            .map_err(|e| {
                error!(endpoint = %self_endpoint, error = %e, "Bootstrap aborted");
                BootstrapError::from(e)
            })?;
        let comm = Arc::new(comm);

        let bind_port = config.bind_port;
        let bootstrap_peers = config.bootstrap_peers.len();
        let gossip = self.gossip_factory.new_gossip_service(
            config,
            comm.clone() as Arc<dyn Comm>,
            Arc::clone(&self.message_security),
            Arc::clone(&self.identity_service),
            PeerIdentity::from(self_endpoint),
        );

        if gossip.self_pki_id() != comm.pki_id() {
            let err = BootstrapError::IdentityMismatch {
                comm: comm.pki_id().clone(),
                gossip: gossip.self_pki_id().clone(),
            };
            error!(endpoint = %self_endpoint, error = %err, "Bootstrap aborted");
            gossip.stop();
            return Err(err);
        }

        info!(
            endpoint = %self_endpoint,
            bind_port,
            bootstrap_peers,
            "Gossip node bootstrapped"
        );

        Ok((gossip, comm))
    }
}

/// Create a gossip component attached to `server` with the default wiring:
/// TCP comm layer, naive demo providers, default tuning, insecure dialing.
///
/// For integration and demo setups ONLY.
pub fn new_gossip_component<I, S>(
    endpoint: &str,
    server: Arc<TcpListener>,
    bootstrap_peers: I,
) -> Result<(GossipService, Arc<TcpComm>), BootstrapError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    GossipBootstrapper::new().bootstrap(endpoint, server, bootstrap_peers)
}
