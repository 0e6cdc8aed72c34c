//! Export payload for the key export modal

use crate::keys::KeySummary;
use crate::projection::DerivedKeyRow;
use crate::Result;
use serde::{Deserialize, Serialize};

/// One exported derived key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedKey {
    /// Derivation path
    pub path: String,
    /// Network id
    pub network_id: String,
    /// Network title
    pub network_title: String,
    /// Encoded address
    pub base58: String,
}

impl From<&DerivedKeyRow> for ExportedKey {
    fn from(row: &DerivedKeyRow) -> Self {
        Self {
            path: row.view_model.path.clone(),
            network_id: row.key.network_id.to_string(),
            network_title: row.view_model.network_title.clone(),
            base58: row.view_model.base58.clone(),
        }
    }
}

/// Root summary plus the keys chosen for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    /// Root key display data
    pub summary: KeySummary,
    /// Exported keys in selection order
    pub keys: Vec<ExportedKey>,
}

impl ExportPayload {
    /// Build a payload; `None` without a summary
    pub fn build(summary: Option<&KeySummary>, rows: &[DerivedKeyRow]) -> Option<Self> {
        let summary = summary?.clone();
        Some(Self {
            summary,
            keys: rows.iter().map(ExportedKey::from).collect(),
        })
    }

    /// JSON encoding shown as the export QR content
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_summary_no_payload() {
        assert!(ExportPayload::build(None, &[]).is_none());
    }

    #[test]
    fn test_summary_only_payload() {
        let summary = KeySummary {
            key_name: "Main".to_string(),
            base58: "5Grw".to_string(),
        };
        let payload = ExportPayload::build(Some(&summary), &[]).unwrap();
        assert!(payload.keys.is_empty());
        let json = payload.to_json().unwrap();
        assert!(json.contains("\"key_name\":\"Main\""));
    }
}
