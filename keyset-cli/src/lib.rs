//! Command implementations for the key set CLI harness
//!
//! Drives a [`KeyDetailsController`] against a JSON fixture so the listing,
//! export and removal flows can be inspected without a UI.

#![forbid(unsafe_code)]

use anyhow::{bail, Context};
use keyset_core::{DerivedKeyRow, NetworkFilter, NetworkId};
use keyset_service::{
    AppContext, ControllerConfig, InMemoryKeyStore, KeyDetailsController, KeyDetailsState,
    Providers, Signal, SignalReceiver,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Fixture file
    pub fixture: PathBuf,
    /// Key set name
    pub key_set: String,
    /// Optional controller config file
    pub config: Option<PathBuf>,
    /// Networks to filter by
    pub networks: Vec<String>,
}

/// A loaded controller plus its collaborators
pub struct Session {
    /// Controller under inspection
    pub controller: KeyDetailsController,
    /// Signal receiver
    pub signals: SignalReceiver,
    /// Backing store
    pub store: Arc<InMemoryKeyStore>,
}

impl Session {
    /// Load the fixture, build the controller and run the initial refresh
    pub async fn open(options: &SessionOptions) -> anyhow::Result<Self> {
        let store = InMemoryKeyStore::from_fixture_file(&options.fixture)
            .with_context(|| format!("Loading fixture {}", options.fixture.display()))?;
        if !store.key_set_names().contains(&options.key_set) {
            bail!("Unknown key set '{}'", options.key_set);
        }

        let config = match &options.config {
            Some(path) => ControllerConfig::from_file(path)
                .with_context(|| format!("Loading config {}", path.display()))?,
            None => ControllerConfig::default(),
        };

        let store = Arc::new(store);
        let (mut controller, signals) = KeyDetailsController::new(
            options.key_set.clone(),
            AppContext::new(),
            Providers::from_store(store.clone()),
            config,
        );
        controller.initialize().await;
        if let Some(message) = &controller.state().error_message {
            bail!("Refresh failed: {}", message);
        }

        if !options.networks.is_empty() {
            controller.present_network_selection();
            for id in &options.networks {
                controller.toggle_network_filter(&NetworkId::new(id.as_str()));
            }
            controller.on_network_selection_dismissed();
        }

        Ok(Self {
            controller,
            signals,
            store,
        })
    }
}

/// Render the listing, one line per row
pub fn render_listing(state: &KeyDetailsState, filter: &NetworkFilter) -> String {
    let mut lines = Vec::new();
    if let Some(summary) = &state.key_summary {
        lines.push(format!("Key set: {} ({})", summary.key_name, summary.base58));
    }
    if state.is_filtering_active {
        let ids: Vec<&str> = filter.iter().map(NetworkId::as_str).collect();
        lines.push(format!("Filter: {}", ids.join(", ")));
    }
    if state.derived_keys.is_empty() {
        lines.push("No derived keys".to_string());
    } else {
        lines.extend(state.derived_keys.iter().map(render_row));
    }
    lines.join("\n")
}

fn render_row(row: &DerivedKeyRow) -> String {
    let lock = if row.view_model.has_password { " [pwd]" } else { "" };
    format!(
        "{}{}\t{}\t{}",
        row.view_model.path, lock, row.view_model.network_title, row.view_model.base58
    )
}

/// `show`: print the projected listing
pub async fn show(options: &SessionOptions, json: bool) -> anyhow::Result<String> {
    let session = Session::open(options).await?;
    let state = session.controller.state();
    if json {
        return Ok(serde_json::to_string_pretty(&state.derived_keys)?);
    }
    Ok(render_listing(state, &session.controller.context().filter()))
}

/// `export`: select keys by path (or all) and print the export payload
pub async fn export(
    options: &SessionOptions,
    paths: &[String],
    all: bool,
) -> anyhow::Result<String> {
    let mut session = Session::open(options).await?;
    let controller = &mut session.controller;

    let payload = if all {
        controller.export_all_model()
    } else {
        controller.set_selection_mode(true);
        for path in paths {
            let row = controller
                .state()
                .derived_keys
                .iter()
                .find(|r| &r.view_model.path == path)
                .cloned()
                .with_context(|| format!("No listed key at path '{}'", path))?;
            controller.toggle_selection(&row);
        }
        controller.export_model()
    };

    let payload = payload.context("Key summary unavailable")?;
    Ok(payload.to_json()?)
}

/// `remove`: remove the key set and report emitted signals
pub async fn remove(options: &SessionOptions) -> anyhow::Result<String> {
    let mut session = Session::open(options).await?;
    session.controller.present_remove_confirmation();
    if !session.controller.request_remove_key_set() {
        return Ok("Key set was not removed".to_string());
    }

    let mut lines = Vec::new();
    while let Ok(signal) = session.signals.try_recv() {
        lines.push(match signal {
            Signal::Dismiss => "dismiss".to_string(),
            Signal::Completion(completion) => format!("completion: {:?}", completion),
        });
    }
    lines.push(format!(
        "Remaining key sets: {}",
        session.store.key_set_names().len()
    ));
    Ok(lines.join("\n"))
}

/// `backup`: request a seed backup
pub async fn backup(options: &SessionOptions) -> anyhow::Result<String> {
    let mut session = Session::open(options).await?;
    session.controller.request_backup();
    let state = session.controller.state();
    if state.is_presenting_connectivity_alert {
        return Ok("Backup blocked: device is online".to_string());
    }
    session.controller.dismiss_backup_modal();
    Ok(format!("Backup started for {}", session.controller.key_name()))
}
