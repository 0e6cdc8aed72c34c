//! External collaborators of the controller
//!
//! Key derivation, seed storage and network metadata live behind these
//! traits; the controller only sees request/response results.

use async_trait::async_trait;
use keyset_core::{KeySet, Network, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Source of key set data
#[async_trait]
pub trait KeySetProvider: Send + Sync {
    /// Fetch the current key set for `set_id`
    async fn fetch_key_set(&self, set_id: &str) -> Result<KeySet>;
}

/// Source of network metadata
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Fetch all known networks
    async fn fetch_networks(&self) -> Result<Vec<Network>>;
}

/// Seed storage
pub trait SeedStore: Send + Sync {
    /// Remove a seed, `true` when it was removed
    fn remove_seed(&self, name: &str) -> bool;
}

/// Navigation and backup side effects
pub trait KeyActions: Send + Sync {
    /// Resolve the details screen for a derived key, `None` to decline
    fn resolve_navigation_target(&self, key_name: &str, public_key_id: &str) -> Option<KeyDetails>;

    /// Start the seed backup flow
    fn perform_backup_seed(&self, key_name: &str);

    /// Reset navigation state after leaving the backup flow
    fn reset_navigation_state(&self, key_name: &str);
}

/// Reports whether any network interface is up
pub trait ConnectivityMonitor: Send + Sync {
    /// `true` when the device is online
    fn is_connected(&self) -> bool;
}

/// Navigation target for a single derived key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDetails {
    /// Key set name
    pub key_name: String,
    /// Derivation path
    pub path: String,
    /// Network id
    pub network_id: String,
    /// Hex public key
    pub public_key_id: String,
}

/// All collaborators handed to a controller
#[derive(Clone)]
pub struct Providers {
    /// Key set source
    pub key_sets: Arc<dyn KeySetProvider>,
    /// Network metadata source
    pub networks: Arc<dyn NetworkProvider>,
    /// Seed storage
    pub seeds: Arc<dyn SeedStore>,
    /// Navigation/backup side effects
    pub actions: Arc<dyn KeyActions>,
    /// Connectivity status
    pub connectivity: Arc<dyn ConnectivityMonitor>,
}

impl Providers {
    /// Use one object for every collaborator
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: KeySetProvider
            + NetworkProvider
            + SeedStore
            + KeyActions
            + ConnectivityMonitor
            + 'static,
    {
        Self {
            key_sets: store.clone(),
            networks: store.clone(),
            seeds: store.clone(),
            actions: store.clone(),
            connectivity: store,
        }
    }
}
