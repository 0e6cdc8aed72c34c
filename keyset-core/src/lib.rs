//! Key set core
//!
//! Data model for a root key and its derived keys, SS58 address encoding,
//! the derived key projection (sort + network filter) and multi-selection
//! state used by the key set details controller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod keys;
pub mod network;
pub mod projection;
pub mod selection;
pub mod ss58;

pub use error::{Error, ErrorCategory, Result};
pub use export::{ExportPayload, ExportedKey};
pub use keys::{DerivationPath, DerivedKey, KeySet, KeySummary, RootKey};
pub use network::{Encryption, Network, NetworkFilter, NetworkId};
pub use projection::{project, DerivedKeyRow, DerivedKeyRowViewModel, ViewState};
pub use selection::SelectionSet;
pub use ss58::{encode_address, GENERIC_SUBSTRATE_PREFIX, MAX_SS58_PREFIX};
