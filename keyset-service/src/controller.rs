//! Key set details controller
//!
//! Owns the screen state for one key set. All mutation goes through
//! `&mut self`; provider calls are awaited on the caller's task and their
//! completions re-enter through [`KeyDetailsController::finish_refresh`].

use crate::config::ControllerConfig;
use crate::context::AppContext;
use crate::providers::{KeyDetails, Providers};
use crate::sequence::{RequestSequence, Ticket};
use crate::state::{Completion, KeyDetailsState, Signal, SignalReceiver, Snackbar};
use futures::future::BoxFuture;
use futures::FutureExt;
use keyset_core::{
    project, DerivedKeyRow, Error, ExportPayload, KeySet, KeySummary, NetworkId, Result,
    SelectionSet, ViewState,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

const DERIVED_KEY_CREATED: &str = "Derived key has been created";
const DERIVED_KEY_DELETED: &str = "Derived key has been deleted";

/// A key set fetch that has been issued but not yet applied
pub struct PendingRefresh {
    ticket: Ticket,
    fetch: BoxFuture<'static, Result<KeySet>>,
}

impl PendingRefresh {
    /// Ticket of this request
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Drive the fetch to completion
    pub async fn wait(self) -> RefreshCompletion {
        RefreshCompletion {
            ticket: self.ticket,
            result: self.fetch.await,
        }
    }
}

/// Result of a key set fetch, ready to be applied
pub struct RefreshCompletion {
    ticket: Ticket,
    result: Result<KeySet>,
}

impl RefreshCompletion {
    /// Ticket of the originating request
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshOutcome {
    Applied,
    Failed,
    Stale,
}

/// Controller for the key set details screen
pub struct KeyDetailsController {
    key_name: String,
    context: AppContext,
    providers: Providers,
    config: ControllerConfig,
    key_set: Option<KeySet>,
    selection: SelectionSet,
    state: KeyDetailsState,
    requests: RequestSequence,
    state_tx: watch::Sender<KeyDetailsState>,
    signal_tx: mpsc::UnboundedSender<Signal>,
}

impl KeyDetailsController {
    /// Create a controller for `key_name`.
    ///
    /// Returns the controller and the receiver of its one-shot signals.
    /// Nothing is fetched until [`initialize`](Self::initialize) or
    /// [`refresh`](Self::refresh) is called.
    pub fn new(
        key_name: impl Into<String>,
        context: AppContext,
        providers: Providers,
        config: ControllerConfig,
    ) -> (Self, SignalReceiver) {
        let state = KeyDetailsState {
            is_filtering_active: !context.filter().is_empty(),
            ..Default::default()
        };
        let (state_tx, _) = watch::channel(state.clone());
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let controller = Self {
            key_name: key_name.into(),
            context,
            providers,
            config,
            key_set: None,
            selection: SelectionSet::new(),
            state,
            requests: RequestSequence::new(),
            state_tx,
            signal_tx,
        };
        (controller, signal_rx)
    }

    /// Key set name
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// Current state snapshot
    pub fn state(&self) -> &KeyDetailsState {
        &self.state
    }

    /// Shared application context
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<KeyDetailsState> {
        self.state_tx.subscribe()
    }

    /// Initial load: networks first, then the key set
    pub async fn initialize(&mut self) {
        self.refresh_networks().await;
        self.refresh().await;
    }

    // ------------------------------------------------------------------
    // Refresh
    // ------------------------------------------------------------------

    /// Fetch the key set and rebuild rows and summary.
    ///
    /// On failure the error alert is raised and the previous rows stay.
    pub async fn refresh(&mut self) {
        self.reload().await;
    }

    /// Issue a key set fetch without applying it
    pub fn start_refresh(&mut self) -> PendingRefresh {
        let ticket = self.requests.issue();
        let provider = Arc::clone(&self.providers.key_sets);
        let set_id = self.key_name.clone();
        debug!(
            event = "key_set_refresh_started",
            key_name = %set_id,
            ticket = ticket.value(),
            "Refreshing key set"
        );

        PendingRefresh {
            ticket,
            fetch: async move { provider.fetch_key_set(&set_id).await }.boxed(),
        }
    }

    /// Apply a fetch result.
    ///
    /// Returns `false` when the completion was stale and dropped.
    pub fn finish_refresh(&mut self, completion: RefreshCompletion) -> bool {
        self.apply_refresh(completion) != RefreshOutcome::Stale
    }

    /// Fetch the network universe and replace it in the shared context
    pub async fn refresh_networks(&mut self) {
        let result = self.providers.networks.fetch_networks().await;
        match result {
            Ok(networks) => {
                debug!(
                    event = "networks_refreshed",
                    count = networks.len(),
                    "Network list refreshed"
                );
                self.context.replace_networks(networks);
                self.rebuild();
            }
            Err(e) => self.present_error(&e),
        }
        self.publish();
    }

    /// A derived key was added elsewhere: reload and report.
    ///
    /// The snackbar is only shown when the reload succeeded; the completion
    /// is signalled either way.
    pub async fn on_derived_key_created(&mut self) {
        let outcome = self.reload().await;
        if outcome == RefreshOutcome::Applied && self.config.snackbar_messages {
            self.state.snackbar = Some(Snackbar::info(DERIVED_KEY_CREATED));
            self.publish();
        }
        self.emit(Signal::Completion(Completion::DerivedKeyCreated));
    }

    /// A derived key was removed elsewhere: reload and report
    pub async fn on_derived_key_deleted(&mut self) {
        let outcome = self.reload().await;
        if outcome == RefreshOutcome::Applied && self.config.snackbar_messages {
            self.state.snackbar = Some(Snackbar::warning(DERIVED_KEY_DELETED));
            self.publish();
        }
        self.emit(Signal::Completion(Completion::DerivedKeyDeleted));
    }

    // ------------------------------------------------------------------
    // Selection and row taps
    // ------------------------------------------------------------------

    /// Enter or leave selection mode
    pub fn set_selection_mode(&mut self, active: bool) {
        self.state.is_in_selection_mode = active;
        if !active && self.config.clear_selection_on_exit {
            self.selection.clear();
        }
        self.publish();
    }

    /// Toggle `row` in the selection; no-op outside selection mode
    pub fn toggle_selection(&mut self, row: &DerivedKeyRow) {
        if !self.state.is_in_selection_mode {
            return;
        }
        self.selection.toggle(row);
        self.publish();
    }

    /// Select every listed row, entering selection mode
    pub fn select_all(&mut self) {
        self.state.is_in_selection_mode = true;
        self.selection.select_all(&self.state.derived_keys);
        self.publish();
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.publish();
    }

    /// Handle a row tap.
    ///
    /// In selection mode the row is toggled and no target is returned.
    /// Otherwise the navigation resolver decides; `None` means stay.
    pub fn on_row_tapped(&mut self, row: &DerivedKeyRow) -> Option<KeyDetails> {
        if self.state.is_in_selection_mode {
            self.toggle_selection(row);
            return None;
        }

        let target = self
            .providers
            .actions
            .resolve_navigation_target(&self.key_name, &row.key.public_key_id());
        if target.is_none() {
            debug!(
                event = "navigation_declined",
                path = %row.key.path,
                "No navigation target for derived key"
            );
        }
        target
    }

    // ------------------------------------------------------------------
    // Network filter
    // ------------------------------------------------------------------

    /// Show the network selection overlay
    pub fn present_network_selection(&mut self) {
        self.state.is_presenting_network_selection = true;
        self.publish();
    }

    /// Flip one network in the shared filter
    pub fn toggle_network_filter(&mut self, network_id: &NetworkId) {
        let next = self.context.filter().toggled(network_id);
        self.context.replace_filter(next);
    }

    /// Overlay closed: pick up the filter and re-project
    pub fn on_network_selection_dismissed(&mut self) {
        self.state.is_presenting_network_selection = false;
        self.state.is_filtering_active = !self.context.filter().is_empty();
        self.rebuild();
        self.publish();
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Payload for the selected keys, `None` without a key summary
    pub fn export_model(&self) -> Option<ExportPayload> {
        ExportPayload::build(self.state.key_summary.as_ref(), self.selection.rows())
    }

    /// Payload for every listed key, `None` without a key summary
    pub fn export_all_model(&self) -> Option<ExportPayload> {
        ExportPayload::build(self.state.key_summary.as_ref(), &self.state.derived_keys)
    }

    /// Open the export modal if there is something to export
    pub fn present_export(&mut self) -> bool {
        if self.export_model().is_none() {
            return false;
        }
        self.state.is_showing_key_export = true;
        self.publish();
        true
    }

    /// Close the export modal and leave selection mode
    pub fn dismiss_export(&mut self) {
        self.state.is_showing_key_export = false;
        self.set_selection_mode(false);
    }

    // ------------------------------------------------------------------
    // Key set removal
    // ------------------------------------------------------------------

    /// Ask for removal confirmation
    pub fn present_remove_confirmation(&mut self) {
        self.state.is_showing_remove_confirmation = true;
        self.publish();
    }

    /// Cancel removal
    pub fn dismiss_remove_confirmation(&mut self) {
        self.state.is_showing_remove_confirmation = false;
        self.publish();
    }

    /// Remove the seed behind this key set.
    ///
    /// On success emits `KeySetDeleted` followed by `Dismiss`. If the store
    /// refuses, nothing changes and no error is shown.
    pub fn request_remove_key_set(&mut self) -> bool {
        if !self.providers.seeds.remove_seed(&self.key_name) {
            debug!(
                event = "seed_removal_refused",
                key_name = %self.key_name,
                "Seed was not removed"
            );
            return false;
        }

        info!(event = "key_set_removed", key_name = %self.key_name, "Key set removed");
        self.state.is_showing_remove_confirmation = false;
        self.publish();
        self.emit(Signal::Completion(Completion::KeySetDeleted));
        self.emit(Signal::Dismiss);
        true
    }

    // ------------------------------------------------------------------
    // Backup
    // ------------------------------------------------------------------

    /// Start a seed backup, or warn if the device is online
    pub fn request_backup(&mut self) {
        if self.providers.connectivity.is_connected() {
            warn!(
                event = "backup_blocked_online",
                key_name = %self.key_name,
                "Backup requested while device is online"
            );
            self.state.is_presenting_connectivity_alert = true;
        } else {
            self.providers.actions.perform_backup_seed(&self.key_name);
            self.state.is_showing_backup_modal = true;
        }
        self.publish();
    }

    /// Close the backup modal
    pub fn dismiss_backup_modal(&mut self) {
        self.state.is_showing_backup_modal = false;
        self.providers.actions.reset_navigation_state(&self.key_name);
        self.publish();
    }

    // ------------------------------------------------------------------
    // Alerts
    // ------------------------------------------------------------------

    /// Hide the error alert
    pub fn dismiss_error(&mut self) {
        self.state.is_presenting_error = false;
        self.state.error_message = None;
        self.publish();
    }

    /// Hide the connectivity alert
    pub fn dismiss_connectivity_alert(&mut self) {
        self.state.is_presenting_connectivity_alert = false;
        self.publish();
    }

    /// Hide the snackbar
    pub fn dismiss_snackbar(&mut self) {
        self.state.snackbar = None;
        self.publish();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn reload(&mut self) -> RefreshOutcome {
        let pending = self.start_refresh();
        let completion = pending.wait().await;
        self.apply_refresh(completion)
    }

    fn apply_refresh(&mut self, completion: RefreshCompletion) -> RefreshOutcome {
        let RefreshCompletion { ticket, result } = completion;
        if !self.requests.accept(ticket, self.config.completion_ordering) {
            debug!(
                event = "key_set_refresh_stale",
                key_name = %self.key_name,
                ticket = ticket.value(),
                last_applied = ?self.requests.last_applied().map(|t| t.value()),
                "Dropping stale key set completion"
            );
            return RefreshOutcome::Stale;
        }

        let outcome = match result {
            Ok(key_set) => {
                info!(
                    event = "key_set_refreshed",
                    key_name = %self.key_name,
                    derived_keys = key_set.len(),
                    pending = self.requests.has_pending(),
                    "Key set refreshed"
                );
                self.key_set = Some(key_set);
                self.rebuild();
                RefreshOutcome::Applied
            }
            Err(e) => {
                self.present_error(&e);
                RefreshOutcome::Failed
            }
        };
        self.publish();
        outcome
    }

    fn rebuild(&mut self) {
        let Some(key_set) = &self.key_set else {
            return;
        };

        let networks = self.context.networks();
        let rows = project(key_set, &self.context.filter(), &networks);

        self.state.key_summary =
            match KeySummary::from_root(key_set.root(), self.config.root_base58_prefix) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!(
                        event = "key_summary_failed",
                        key_name = %self.key_name,
                        "Cannot encode root key: {}",
                        e
                    );
                    None
                }
            };

        self.selection.retain_listed(&rows);
        self.state.view_state = ViewState::for_rows(&rows);
        self.state.derived_keys = rows;
    }

    fn present_error(&mut self, error: &Error) {
        warn!(
            event = "provider_fetch_failed",
            key_name = %self.key_name,
            category = %error.category(),
            transient = error.is_transient(),
            "Provider call failed: {}",
            error
        );
        self.state.is_presenting_error = true;
        self.state.error_message = Some(error.user_message());
    }

    fn publish(&mut self) {
        self.state.selected_keys = self.selection.rows().to_vec();
        self.state_tx.send_replace(self.state.clone());
    }

    fn emit(&self, signal: Signal) {
        if let Err(mpsc::error::SendError(signal)) = self.signal_tx.send(signal) {
            debug!(?signal, "Signal receiver dropped");
        }
    }
}
