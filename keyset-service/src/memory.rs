//! In-memory collaborators
//!
//! Backs the CLI harness and tests with a fixture instead of real seed
//! storage.

use crate::providers::{
    ConnectivityMonitor, KeyActions, KeyDetails, KeySetProvider, NetworkProvider, SeedStore,
};
use async_trait::async_trait;
use keyset_core::{DerivationPath, DerivedKey, Error, KeySet, Network, Result};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Serialized store contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    /// Key sets, keyed by root seed name
    #[serde(default)]
    pub key_sets: Vec<KeySet>,
    /// Network universe
    #[serde(default)]
    pub networks: Vec<Network>,
    /// Reported connectivity
    #[serde(default)]
    pub connected: bool,
}

/// Store implementing every collaborator trait
#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    key_sets: RwLock<BTreeMap<String, KeySet>>,
    networks: RwLock<Vec<Network>>,
    connected: AtomicBool,
    backups: Mutex<Vec<String>>,
    navigation_resets: Mutex<Vec<String>>,
}

impl InMemoryKeyStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated from a fixture
    pub fn from_fixture(fixture: Fixture) -> Self {
        let store = Self::new();
        for key_set in fixture.key_sets {
            store.insert_key_set(key_set);
        }
        store.set_networks(fixture.networks);
        store.set_connected(fixture.connected);
        store
    }

    /// Parse a JSON fixture
    pub fn from_fixture_json(json: &str) -> Result<Self> {
        let fixture: Fixture = serde_json::from_str(json)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Load a JSON fixture file
    pub fn from_fixture_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_fixture_json(&content)
    }

    /// Insert or replace a key set
    pub fn insert_key_set(&self, key_set: KeySet) {
        self.key_sets
            .write()
            .insert(key_set.name().to_string(), key_set);
    }

    /// Replace the network universe
    pub fn set_networks(&self, networks: Vec<Network>) {
        *self.networks.write() = networks;
    }

    /// Set reported connectivity
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    /// Add a derived key to an existing set
    pub fn add_derived_key(&self, set_name: &str, key: DerivedKey) -> Result<()> {
        let mut key_sets = self.key_sets.write();
        let current = key_sets
            .get(set_name)
            .ok_or_else(|| Error::Fetch(format!("Key set not found: {}", set_name)))?;
        let updated = current.with_derived(key)?;
        key_sets.insert(set_name.to_string(), updated);
        Ok(())
    }

    /// Remove a derived key, `false` if the set or path is unknown
    pub fn remove_derived_key(&self, set_name: &str, path: &DerivationPath) -> bool {
        let mut key_sets = self.key_sets.write();
        match key_sets.get(set_name).and_then(|set| set.without_path(path)) {
            Some(updated) => {
                key_sets.insert(set_name.to_string(), updated);
                true
            }
            None => false,
        }
    }

    /// Names of stored key sets
    pub fn key_set_names(&self) -> Vec<String> {
        self.key_sets.read().keys().cloned().collect()
    }

    /// Seeds a backup was requested for
    pub fn backups(&self) -> Vec<String> {
        self.backups.lock().clone()
    }

    /// Seeds whose navigation state was reset
    pub fn navigation_resets(&self) -> Vec<String> {
        self.navigation_resets.lock().clone()
    }
}

#[async_trait]
impl KeySetProvider for InMemoryKeyStore {
    async fn fetch_key_set(&self, set_id: &str) -> Result<KeySet> {
        self.key_sets
            .read()
            .get(set_id)
            .cloned()
            .ok_or_else(|| Error::Fetch(format!("Key set not found: {}", set_id)))
    }
}

#[async_trait]
impl NetworkProvider for InMemoryKeyStore {
    async fn fetch_networks(&self) -> Result<Vec<Network>> {
        Ok(self.networks.read().clone())
    }
}

impl SeedStore for InMemoryKeyStore {
    fn remove_seed(&self, name: &str) -> bool {
        self.key_sets.write().remove(name).is_some()
    }
}

impl KeyActions for InMemoryKeyStore {
    fn resolve_navigation_target(&self, key_name: &str, public_key_id: &str) -> Option<KeyDetails> {
        let key_sets = self.key_sets.read();
        let key = key_sets
            .get(key_name)?
            .derived()
            .iter()
            .find(|k| k.public_key_id() == public_key_id)?;
        Some(KeyDetails {
            key_name: key_name.to_string(),
            path: key.path.to_string(),
            network_id: key.network_id.to_string(),
            public_key_id: public_key_id.to_string(),
        })
    }

    fn perform_backup_seed(&self, key_name: &str) {
        self.backups.lock().push(key_name.to_string());
    }

    fn reset_navigation_state(&self, key_name: &str) {
        self.navigation_resets.lock().push(key_name.to_string());
    }
}

impl ConnectivityMonitor for InMemoryKeyStore {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "key_sets": [{
            "root": {"seed_name": "Main", "public_key": "0101"},
            "derived": [{"path": "//0", "network_id": "A", "public_key": "abcd"}]
        }],
        "networks": [{"id": "A", "title": "Alpha", "base58_prefix": 0}]
    }"#;

    #[tokio::test]
    async fn test_fixture_round_trip_through_traits() {
        let store = InMemoryKeyStore::from_fixture_json(FIXTURE).unwrap();
        let set = store.fetch_key_set("Main").await.unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(store.fetch_networks().await.unwrap()[0].title, "Alpha");
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn test_unknown_set_is_fetch_error() {
        let store = InMemoryKeyStore::new();
        let err = store.fetch_key_set("Nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Key set not found: Nope");
    }

    #[test]
    fn test_remove_seed_once() {
        let store = InMemoryKeyStore::from_fixture_json(FIXTURE).unwrap();
        assert!(store.remove_seed("Main"));
        assert!(!store.remove_seed("Main"));
        assert!(store.key_set_names().is_empty());
    }

    #[test]
    fn test_resolve_navigation_target() {
        let store = InMemoryKeyStore::from_fixture_json(FIXTURE).unwrap();
        let details = store.resolve_navigation_target("Main", "abcd").unwrap();
        assert_eq!(details.path, "//0");
        assert!(store.resolve_navigation_target("Main", "ffff").is_none());
    }

    #[test]
    fn test_derived_key_mutations() {
        let store = InMemoryKeyStore::from_fixture_json(FIXTURE).unwrap();
        assert!(store.remove_derived_key("Main", &DerivationPath::from("//0")));
        assert!(!store.remove_derived_key("Main", &DerivationPath::from("//0")));
        assert!(!store.remove_derived_key("Other", &DerivationPath::from("//0")));
    }
}
