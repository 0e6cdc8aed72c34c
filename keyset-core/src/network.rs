//! Network definitions and the network display filter

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Network identifier (genesis hash + encryption key in the network store)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(String);

impl NetworkId {
    /// Create identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NetworkId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Signature scheme of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    /// Schnorrkel
    #[default]
    Sr25519,
    /// Edwards
    Ed25519,
    /// secp256k1 with SS58 addresses
    Ecdsa,
    /// secp256k1 with 0x-hex addresses
    Ethereum,
}

/// Network metadata as delivered by the network provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Identifier
    pub id: NetworkId,
    /// Human-readable name
    pub title: String,
    /// Logo asset name
    #[serde(default)]
    pub logo: String,
    /// SS58 address prefix
    pub base58_prefix: u16,
    /// Signature scheme
    #[serde(default)]
    pub encryption: Encryption,
    /// Default derivation path for new keys
    #[serde(default)]
    pub path_id: String,
}

impl Network {
    /// Find a network by id
    pub fn find<'a>(networks: &'a [Network], id: &NetworkId) -> Option<&'a Network> {
        networks.iter().find(|n| &n.id == id)
    }
}

/// Set of network ids selected for display filtering.
///
/// An empty filter means "show everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkFilter(BTreeSet<NetworkId>);

impl NetworkFilter {
    /// Empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no network is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected networks
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether a key on `id` passes the filter
    pub fn admits(&self, id: &NetworkId) -> bool {
        self.0.is_empty() || self.0.contains(id)
    }

    /// Check membership
    pub fn contains(&self, id: &NetworkId) -> bool {
        self.0.contains(id)
    }

    /// Copy of this filter with `id` flipped in or out
    pub fn toggled(&self, id: &NetworkId) -> Self {
        let mut next = self.0.clone();
        if !next.remove(id) {
            next.insert(id.clone());
        }
        Self(next)
    }

    /// Iterate selected ids in order
    pub fn iter(&self) -> impl Iterator<Item = &NetworkId> {
        self.0.iter()
    }
}

impl FromIterator<NetworkId> for NetworkFilter {
    fn from_iter<I: IntoIterator<Item = NetworkId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
