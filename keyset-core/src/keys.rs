//! Key set model: root key, derived keys and the root key summary

use crate::network::{Encryption, NetworkId};
use crate::ss58::encode_address;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Derivation path, e.g. `//polkadot//0`.
///
/// Ordered by plain lexicographic string comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivationPath(String);

impl DerivationPath {
    /// Create path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrow as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DerivationPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Root key of a seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootKey {
    /// Seed name, also the key set identifier
    pub seed_name: String,
    /// Raw public key
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
    /// Signature scheme
    #[serde(default)]
    pub encryption: Encryption,
}

/// Derived key record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedKey {
    /// Derivation path, unique within a key set
    pub path: DerivationPath,
    /// Network the key was derived for
    pub network_id: NetworkId,
    /// Raw public key
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
    /// Display name base
    #[serde(default)]
    pub name: String,
    /// Signature scheme
    #[serde(default)]
    pub encryption: Encryption,
    /// Path has a `///password` component
    #[serde(default)]
    pub has_password: bool,
}

impl DerivedKey {
    /// Identifier handed to the navigation resolver
    pub fn public_key_id(&self) -> String {
        hex::encode(&self.public_key)
    }
}

/// Root key plus its derived keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKeySet")]
pub struct KeySet {
    root: RootKey,
    derived: Vec<DerivedKey>,
}

#[derive(Deserialize)]
struct RawKeySet {
    root: RootKey,
    #[serde(default)]
    derived: Vec<DerivedKey>,
}

impl TryFrom<RawKeySet> for KeySet {
    type Error = Error;

    fn try_from(raw: RawKeySet) -> Result<Self> {
        KeySet::new(raw.root, raw.derived)
    }
}

impl KeySet {
    /// Build a key set, rejecting duplicate derivation paths
    pub fn new(root: RootKey, derived: Vec<DerivedKey>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(derived.len());
        for key in &derived {
            if !seen.insert(&key.path) {
                return Err(Error::DuplicatePath(key.path.to_string()));
            }
        }
        Ok(Self { root, derived })
    }

    /// Root key
    pub fn root(&self) -> &RootKey {
        &self.root
    }

    /// Derived keys in provider order
    pub fn derived(&self) -> &[DerivedKey] {
        &self.derived
    }

    /// Seed name of the root key
    pub fn name(&self) -> &str {
        &self.root.seed_name
    }

    /// Number of derived keys
    pub fn len(&self) -> usize {
        self.derived.len()
    }

    /// True when the set has no derived keys
    pub fn is_empty(&self) -> bool {
        self.derived.is_empty()
    }

    /// Copy of this set with `key` appended
    pub fn with_derived(&self, key: DerivedKey) -> Result<Self> {
        let mut derived = self.derived.clone();
        derived.push(key);
        Self::new(self.root.clone(), derived)
    }

    /// Copy of this set without the key at `path`, `None` if absent
    pub fn without_path(&self, path: &DerivationPath) -> Option<Self> {
        let index = self.derived.iter().position(|k| &k.path == path)?;
        let mut derived = self.derived.clone();
        derived.remove(index);
        Some(Self {
            root: self.root.clone(),
            derived,
        })
    }
}

/// Root key display data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySummary {
    /// Key set name
    pub key_name: String,
    /// Encoded root public key
    pub base58: String,
}

impl KeySummary {
    /// Compute from the root key only
    pub fn from_root(root: &RootKey, prefix: u16) -> Result<Self> {
        Ok(Self {
            key_name: root.seed_name.clone(),
            base58: encode_address(&root.public_key, prefix, root.encryption)?,
        })
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let encoded = encoded.strip_prefix("0x").unwrap_or(&encoded);
        hex::decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> RootKey {
        RootKey {
            seed_name: "Main".to_string(),
            public_key: vec![0x11; 32],
            encryption: Encryption::Sr25519,
        }
    }

    fn derived(path: &str) -> DerivedKey {
        DerivedKey {
            path: DerivationPath::from(path),
            network_id: NetworkId::from("polkadot"),
            public_key: vec![0x22; 32],
            name: "Main".to_string(),
            encryption: Encryption::Sr25519,
            has_password: false,
        }
    }

    #[test]
    fn test_duplicate_paths_rejected() {
        let err = KeySet::new(root(), vec![derived("//0"), derived("//0")]).unwrap_err();
        assert!(matches!(err, Error::DuplicatePath(p) if p == "//0"));
    }

    #[test]
    fn test_key_set_accessors() {
        let set = KeySet::new(root(), vec![derived("//1"), derived("//0")]).unwrap();
        assert_eq!(set.name(), "Main");
        assert_eq!(set.len(), 2);
        assert_eq!(set.derived()[0].path.as_str(), "//1");
    }

    #[test]
    fn test_deserialize_validates_paths() {
        let json = r#"{
            "root": {"seed_name": "Main", "public_key": "0x1111"},
            "derived": [
                {"path": "//0", "network_id": "a", "public_key": "22"},
                {"path": "//0", "network_id": "b", "public_key": "33"}
            ]
        }"#;
        assert!(serde_json::from_str::<KeySet>(json).is_err());
    }

    #[test]
    fn test_hex_public_key_serde() {
        let set = KeySet::new(root(), vec![derived("//0")]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains(&"11".repeat(32)));
        let parsed: KeySet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn test_with_and_without_derived() {
        let set = KeySet::new(root(), vec![derived("//0")]).unwrap();
        let grown = set.with_derived(derived("//1")).unwrap();
        assert_eq!(grown.len(), 2);
        assert!(grown.with_derived(derived("//1")).is_err());

        let shrunk = grown.without_path(&DerivationPath::from("//0")).unwrap();
        assert_eq!(shrunk.derived()[0].path.as_str(), "//1");
        assert!(shrunk.without_path(&DerivationPath::from("//0")).is_none());
    }

    #[test]
    fn test_summary_from_root() {
        let summary = KeySummary::from_root(&root(), 42).unwrap();
        assert_eq!(summary.key_name, "Main");
        assert!(summary.base58.starts_with('5'));
    }

    #[test]
    fn test_public_key_id_is_hex() {
        assert_eq!(derived("//0").public_key_id(), "22".repeat(32));
    }
}
