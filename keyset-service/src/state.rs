//! Published controller state and one-shot signals

use keyset_core::{DerivedKeyRow, KeySummary, ViewState};
use tokio::sync::mpsc;

/// Snapshot of everything the key set details screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDetailsState {
    /// Root key display data, unset until the first successful refresh
    pub key_summary: Option<KeySummary>,
    /// Projected rows
    pub derived_keys: Vec<DerivedKeyRow>,
    /// Rows selected for export, in selection order
    pub selected_keys: Vec<DerivedKeyRow>,
    /// Empty or list
    pub view_state: ViewState,
    /// A network filter is applied
    pub is_filtering_active: bool,
    /// Row taps toggle selection
    pub is_in_selection_mode: bool,
    /// Error alert visible
    pub is_presenting_error: bool,
    /// Error alert message
    pub error_message: Option<String>,
    /// Key export modal visible
    pub is_showing_key_export: bool,
    /// Network selection overlay visible
    pub is_presenting_network_selection: bool,
    /// Key set removal confirmation visible
    pub is_showing_remove_confirmation: bool,
    /// Seed backup modal visible
    pub is_showing_backup_modal: bool,
    /// "Device is online" alert visible
    pub is_presenting_connectivity_alert: bool,
    /// Transient message
    pub snackbar: Option<Snackbar>,
}

/// Snackbar appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnackbarStyle {
    /// Neutral confirmation
    Info,
    /// Destructive action confirmation
    Warning,
}

/// Transient confirmation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snackbar {
    /// Text
    pub message: String,
    /// Appearance
    pub style: SnackbarStyle,
}

impl Snackbar {
    /// Info snackbar
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: SnackbarStyle::Info,
        }
    }

    /// Warning snackbar
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: SnackbarStyle::Warning,
        }
    }
}

/// Outcome reported to the parent navigation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The whole key set was removed
    KeySetDeleted,
    /// A derived key was added to the set
    DerivedKeyCreated,
    /// A derived key was removed from the set
    DerivedKeyDeleted,
}

/// One-shot signal consumed by the navigation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Close the key set details screen
    Dismiss,
    /// Report an outcome
    Completion(Completion),
}

/// Receiving end of the controller's signal channel
pub type SignalReceiver = mpsc::UnboundedReceiver<Signal>;
