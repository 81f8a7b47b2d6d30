//! Core domain types for the gossip node.
//!
//! `AliveMessage` is the only structured message this crate touches. It is
//! signed and validated here, but its wire layout belongs to the gossip
//! engine.

use std::fmt;

/// PKI identifier of a peer.
///
/// Derived from a peer's identity material and used as the key for
/// membership bookkeeping.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PkiId(Vec<u8>);

impl PkiId {
    /// Wrap raw identifier bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Borrow the raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw identifier bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&PeerIdentity> for PkiId {
    fn from(identity: &PeerIdentity) -> Self {
        Self(identity.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for PkiId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PkiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for PkiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PkiId({})", hex::encode(&self.0))
    }
}

/// Identity material of a peer (a certificate in a real deployment).
///
/// The demo providers use the peer's endpoint bytes as its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PeerIdentity(Vec<u8>);

impl PeerIdentity {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PeerIdentity {
    fn from(endpoint: &str) -> Self {
        Self(endpoint.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for PeerIdentity {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Logical timestamp of an alive message.
///
/// `inc_number` changes on every restart of a node; `seq_num` grows with
/// every announcement within one incarnation. Ordering is lexicographic, so
/// a newer incarnation always supersedes an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PeerTime {
    /// Incarnation number (set once at node start)
    pub inc_number: u64,
    /// Sequence number within the incarnation
    pub seq_num: u64,
}

impl PeerTime {
    pub fn new(inc_number: u64, seq_num: u64) -> Self {
        Self {
            inc_number,
            seq_num,
        }
    }
}

/// Membership record carried by an alive message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Membership {
    /// Network endpoint the peer is reachable on (host:port)
    pub endpoint: String,
    /// Opaque application metadata
    pub metadata: Vec<u8>,
    /// PKI-ID of the announcing peer
    pub pki_id: PkiId,
}

/// Liveness/membership announcement exchanged between nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AliveMessage {
    pub membership: Membership,
    pub timestamp: PeerTime,
    /// Signature over the message, filled by `SecurityProvider::sign_message`
    pub signature: Vec<u8>,
}

impl AliveMessage {
    /// Create an unsigned alive message.
    pub fn new(membership: Membership, timestamp: PeerTime) -> Self {
        Self {
            membership,
            timestamp,
            signature: Vec::new(),
        }
    }

    /// PKI-ID of the announcing peer.
    pub fn pki_id(&self) -> &PkiId {
        &self.membership.pki_id
    }

    /// Whether a signature has been attached.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }
}

/// A block together with its producer signature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignedBlock {
    pub data: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SignedBlock {
    pub fn new(data: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            signature: signature.into(),
        }
    }
}
