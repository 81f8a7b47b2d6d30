//! # Membership Flows
//!
//! Two bootstrapped nodes authenticating each other and exchanging alive
//! messages through the injected providers.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use gossip_integration::{
        new_gossip_component, Comm, Gossip, GossipError, GossipService, PeerIdentity,
        SecurityError, TcpComm,
    };
    use tokio::net::TcpListener;

    use crate::init_test_logging;

    async fn node(endpoint: &str, peers: &[&str]) -> Result<(GossipService, Arc<TcpComm>)> {
        let listener = Arc::new(TcpListener::bind("127.0.0.1:0").await?);
        Ok(new_gossip_component(endpoint, listener, peers.iter().copied())?)
    }

    #[tokio::test]
    async fn test_nodes_authenticate_each_other() -> Result<()> {
        init_test_logging();

        let (_a, comm_a) = node("127.0.0.1:7051", &[]).await?;
        let (_b, comm_b) = node("127.0.0.1:7052", &["127.0.0.1:7051"]).await?;

        let from_a = comm_a.create_handshake()?;
        let from_b = comm_b.create_handshake()?;

        assert_eq!(&comm_b.verify_handshake(&from_a)?, comm_a.pki_id());
        assert_eq!(&comm_a.verify_handshake(&from_b)?, comm_b.pki_id());
        Ok(())
    }

    #[tokio::test]
    async fn test_tampered_handshake_is_dropped() -> Result<()> {
        let (_a, comm_a) = node("127.0.0.1:7051", &[]).await?;
        let (_b, comm_b) = node("127.0.0.1:7052", &[]).await?;

        let mut handshake = comm_a.create_handshake()?;
        handshake.signature.push(0);

        let err = comm_b.verify_handshake(&handshake).unwrap_err();
        assert!(matches!(err, SecurityError::SignatureMismatch { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_alive_messages_propagate_into_view() -> Result<()> {
        let (a, _comm_a) = node("127.0.0.1:7051", &[]).await?;
        let (b, _comm_b) = node("127.0.0.1:7052", &["127.0.0.1:7051"]).await?;

        assert!(b.handle_alive_message(a.create_alive_message())?);
        assert!(a.handle_alive_message(b.create_alive_message())?);

        assert_eq!(a.peers().len(), 1);
        assert_eq!(a.peers()[0].endpoint, "127.0.0.1:7052");
        assert_eq!(b.peers()[0].pki_id, *a.self_pki_id());
        Ok(())
    }

    #[tokio::test]
    async fn test_newer_announcement_replaces_older() -> Result<()> {
        let (a, _comm_a) = node("127.0.0.1:7051", &[]).await?;
        let (b, _comm_b) = node("127.0.0.1:7052", &[]).await?;

        let first = a.create_alive_message();
        let second = a.create_alive_message();

        assert!(b.handle_alive_message(second.clone())?);
        assert!(!b.handle_alive_message(first)?);
        assert_eq!(
            b.alive_message_of(a.self_pki_id()).map(|m| m.timestamp),
            Some(second.timestamp)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_identity_checks_agree_across_nodes() -> Result<()> {
        let (a, _comm_a) = node("127.0.0.1:7051", &[]).await?;
        let (b, _comm_b) = node("127.0.0.1:7052", &[]).await?;

        let identity = PeerIdentity::from("127.0.0.1:7053");
        assert_eq!(a.verify_peer_identity(&identity)?, b.verify_peer_identity(&identity)?);
        Ok(())
    }

    #[tokio::test]
    async fn test_stopped_node_ignores_announcements() -> Result<()> {
        let (a, _comm_a) = node("127.0.0.1:7051", &[]).await?;
        let (b, comm_b) = node("127.0.0.1:7052", &[]).await?;

        b.stop();
        assert!(comm_b.is_stopped());
        assert_eq!(
            b.handle_alive_message(a.create_alive_message()),
            Err(GossipError::Stopped)
        );
        Ok(())
    }
}
