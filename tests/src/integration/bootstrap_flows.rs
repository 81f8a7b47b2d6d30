//! # Bootstrap Flows
//!
//! End-to-end node assembly through `new_gossip_component` and
//! `GossipBootstrapper`.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::Result;
    use gossip_integration::{
        new_gossip_component, BootstrapError, Comm, ConfigProvider, Gossip, GossipBootstrapper,
        ProtocolTuning, TomlConfigProvider,
    };
    use tokio::net::TcpListener;

    use crate::init_test_logging;

    async fn listener() -> Result<Arc<TcpListener>> {
        Ok(Arc::new(TcpListener::bind("127.0.0.1:0").await?))
    }

    // =========================================================================
    // Seed node
    // =========================================================================

    #[tokio::test]
    async fn test_seed_node_end_to_end() -> Result<()> {
        init_test_logging();

        let (gossip, comm) =
            new_gossip_component("127.0.0.1:7051", listener().await?, Vec::<String>::new())?;

        assert_eq!(gossip.config().bind_port, 7051);
        assert!(gossip.config().bootstrap_peers.is_empty());
        assert_eq!(gossip.config().tuning, ProtocolTuning::default());
        assert_eq!(gossip.self_pki_id(), comm.pki_id());
        assert!(gossip.peers().is_empty());

        gossip.stop();
        assert!(comm.is_stopped());
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_peer_entry_does_not_fail_bootstrap() -> Result<()> {
        let (gossip, _comm) =
            new_gossip_component("127.0.0.1:7051", listener().await?, ["badaddr"])?;
        assert_eq!(gossip.config().bootstrap_peers, vec!["badaddr"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_well_formed_port_is_parsed() -> Result<()> {
        for port in [1u16, 80, 7051, 30303, 65535] {
            let endpoint = format!("node.local:{port}");
            let (gossip, _comm) =
                new_gossip_component(&endpoint, listener().await?, Vec::<String>::new())?;
            assert_eq!(gossip.config().bind_port, port);
            assert_eq!(gossip.config().id, endpoint);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_endpoints_return_no_handles() -> Result<()> {
        for endpoint in ["node.local", "node.local:", "node.local:abc", "node.local:70000"] {
            let server = listener().await?;
            let result = new_gossip_component(endpoint, Arc::clone(&server), ["127.0.0.1:7052"]);
            assert!(matches!(result, Err(BootstrapError::Config(_))));
            // nothing kept a reference to the listener
            assert_eq!(Arc::strong_count(&server), 1);
        }
        Ok(())
    }

    // =========================================================================
    // Config file
    // =========================================================================

    #[tokio::test]
    async fn test_bootstrap_from_toml_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(
            file,
            r#"
            [bootstrap]
            peers = ["127.0.0.1:7052", "127.0.0.1:7053"]

            [gossip]
            pull_interval_ms = 2000
            pull_peer_num = 4
            "#
        )?;
        let provider = TomlConfigProvider::load(file.path())?;
        assert_eq!(provider.get_bootstrap_peers().len(), 2);

        let (gossip, _comm) = GossipBootstrapper::new().bootstrap_from_provider(
            "127.0.0.1:7051",
            listener().await?,
            &provider,
        )?;

        let config = gossip.config();
        assert_eq!(config.bootstrap_peers, vec!["127.0.0.1:7052", "127.0.0.1:7053"]);
        assert_eq!(config.tuning.pull_interval, Duration::from_secs(2));
        assert_eq!(config.tuning.pull_peer_num, 4);
        assert_eq!(config.tuning.propagate_peer_num, 3);
        Ok(())
    }
}
