//! Tests for the naive security providers

use super::*;
use crate::domain::{Membership, PeerTime};
use rand::{Rng, RngCore};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

fn providers() -> Vec<Box<dyn SecurityProvider>> {
    vec![
        Box::new(DisabledCryptoService::new()),
        Box::new(AlwaysValidCryptoService::new()),
    ]
}

fn alive_message(endpoint: &str, seq_num: u64) -> AliveMessage {
    AliveMessage::new(
        Membership {
            endpoint: endpoint.to_string(),
            metadata: vec![7, 7],
            pki_id: PkiId::new(endpoint.as_bytes()),
        },
        PeerTime::new(1, seq_num),
    )
}

// =============================================================================
// IsEnabled
// =============================================================================

#[test]
fn test_disabled_provider_reports_disabled() {
    assert!(!DisabledCryptoService::new().is_enabled());
}

#[test]
fn test_always_valid_provider_reports_enabled() {
    assert!(AlwaysValidCryptoService::new().is_enabled());
}

// =============================================================================
// Sign / Verify
// =============================================================================

#[test]
fn test_sign_is_identity_transform() {
    for provider in providers() {
        for len in [0, 1, 32, 1024] {
            let msg = random_bytes(len);
            assert_eq!(provider.sign(&msg).unwrap(), msg);
        }
    }
}

#[test]
fn test_verify_accepts_equal_signature() {
    let identity = PeerIdentity::from("127.0.0.1:7051");
    for provider in providers() {
        for _ in 0..50 {
            let len = rand::thread_rng().gen_range(0..256);
            let msg = random_bytes(len);
            assert!(provider.verify(None, &msg, &msg).is_ok());
            assert!(provider.verify(Some(&identity), &msg, &msg).is_ok());
        }
    }
}

#[test]
fn test_verify_accepts_own_signature() {
    for provider in providers() {
        let msg = b"membership request".to_vec();
        let signature = provider.sign(&msg).unwrap();
        assert!(provider.verify(None, &signature, &msg).is_ok());
    }
}

#[test]
fn test_verify_rejects_different_signature() {
    for provider in providers() {
        let msg = b"hello".to_vec();
        let sig = b"hellp".to_vec();
        let err = provider.verify(None, &sig, &msg).unwrap_err();
        assert_eq!(
            err,
            SecurityError::SignatureMismatch {
                signature: sig.clone(),
                message: msg.clone(),
            }
        );
    }
}

#[test]
fn test_verify_rejects_prefix_and_empty_signature() {
    for provider in providers() {
        assert!(provider.verify(None, b"hel", b"hello").is_err());
        assert!(provider.verify(None, b"", b"hello").is_err());
        assert!(provider.verify(None, b"hello", b"").is_err());
    }
}

// =============================================================================
// Alive messages
// =============================================================================

#[test]
fn test_alive_messages_always_validate() {
    for provider in providers() {
        assert!(provider.validate_alive_msg(&AliveMessage::default()));
        assert!(provider.validate_alive_msg(&alive_message("10.0.0.1:7051", 3)));
    }
}

#[test]
fn test_sign_message_returns_input_unchanged() {
    for provider in providers() {
        let msg = alive_message("10.0.0.1:7051", 9);
        assert_eq!(provider.sign_message(msg.clone()), msg);
    }
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_pki_id_of_cert_is_identity_mapping() {
    let provider = AlwaysValidCryptoService::new();
    for len in [0, 5, 64] {
        let raw = random_bytes(len);
        let pki_id = provider.get_pki_id_of_cert(&PeerIdentity::new(raw.clone()));
        assert_eq!(pki_id.as_bytes(), raw.as_slice());
    }
}

#[test]
fn test_identity_and_block_always_valid() {
    let provider = AlwaysValidCryptoService::new();
    assert!(provider.validate_identity(&PeerIdentity::default()).is_ok());
    assert!(provider
        .validate_identity(&PeerIdentity::from("anything"))
        .is_ok());
    assert!(provider
        .verify_block(&SignedBlock::new(b"block".to_vec(), b"not-a-sig".to_vec()))
        .is_ok());
}

#[test]
fn test_providers_are_shareable_across_threads() {
    use std::sync::Arc;

    let provider: Arc<dyn SecurityProvider> = Arc::new(AlwaysValidCryptoService::new());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let provider = Arc::clone(&provider);
            std::thread::spawn(move || {
                let msg = vec![i; 16];
                let sig = provider.sign(&msg).unwrap();
                provider.verify(None, &sig, &msg).is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
