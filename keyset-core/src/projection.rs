//! Derived key projection
//!
//! Turns a [`KeySet`] into the ordered, filtered rows displayed on the key
//! set details screen. Rows are rebuilt from scratch on every call.

use crate::keys::{DerivedKey, KeySet};
use crate::network::{Network, NetworkFilter};
use crate::ss58::{encode_address, GENERIC_SUBSTRATE_PREFIX};
use serde::{Deserialize, Serialize};

/// Listing state of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// No rows to show
    #[default]
    EmptyState,
    /// At least one row
    List,
}

impl ViewState {
    /// View state for a projected row sequence
    pub fn for_rows(rows: &[DerivedKeyRow]) -> Self {
        if rows.is_empty() {
            Self::EmptyState
        } else {
            Self::List
        }
    }
}

/// Display data of a derived key row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedKeyRowViewModel {
    /// Display name base
    pub name: String,
    /// Derivation path
    pub path: String,
    /// Path carries a password
    pub has_password: bool,
    /// Network title, or the raw id for unknown networks
    pub network_title: String,
    /// Network logo asset name
    pub network_logo: String,
    /// Encoded address
    pub base58: String,
}

/// One row of the derived key listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedKeyRow {
    /// Source record
    pub key: DerivedKey,
    /// Precomputed display data
    pub view_model: DerivedKeyRowViewModel,
    /// `0x` hex of the public key
    pub public_key_details: String,
}

impl DerivedKeyRow {
    /// Build a row, resolving network display data from `networks`
    pub fn new(key: &DerivedKey, networks: &[Network]) -> Self {
        let network = Network::find(networks, &key.network_id);
        let prefix = network.map_or(GENERIC_SUBSTRATE_PREFIX, |n| n.base58_prefix);
        let public_key_details = format!("0x{}", hex::encode(&key.public_key));

        let base58 = match encode_address(&key.public_key, prefix, key.encryption) {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(
                    path = %key.path,
                    network = %key.network_id,
                    "Falling back to hex for derived key address: {}",
                    e
                );
                public_key_details.clone()
            }
        };

        Self {
            key: key.clone(),
            view_model: DerivedKeyRowViewModel {
                name: key.name.clone(),
                path: key.path.to_string(),
                has_password: key.has_password,
                network_title: network
                    .map(|n| n.title.clone())
                    .unwrap_or_else(|| key.network_id.to_string()),
                network_logo: network.map(|n| n.logo.clone()).unwrap_or_default(),
                base58,
            },
            public_key_details,
        }
    }
}

/// Project a key set into display rows.
///
/// Records are stable-sorted by derivation path, then dropped unless their
/// network passes `filter` (an empty filter keeps everything).
pub fn project(
    key_set: &KeySet,
    filter: &NetworkFilter,
    networks: &[Network],
) -> Vec<DerivedKeyRow> {
    let mut sorted: Vec<&DerivedKey> = key_set.derived().iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    sorted
        .into_iter()
        .filter(|key| filter.admits(&key.network_id))
        .map(|key| DerivedKeyRow::new(key, networks))
        .collect()
}
