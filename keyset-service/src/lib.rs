//! Key set details service
//!
//! Controller for the key set details screen: refreshes the key set and
//! network metadata through external providers, projects derived keys,
//! tracks selection and modal state, and emits one-shot signals to the
//! navigation shell.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod controller;
pub mod memory;
pub mod providers;
pub mod sequence;
pub mod state;

pub use config::{CompletionOrdering, ControllerConfig};
pub use context::AppContext;
pub use controller::{KeyDetailsController, PendingRefresh, RefreshCompletion};
pub use memory::{Fixture, InMemoryKeyStore};
pub use providers::{
    ConnectivityMonitor, KeyActions, KeyDetails, KeySetProvider, NetworkProvider, Providers,
    SeedStore,
};
pub use sequence::{RequestSequence, Ticket};
pub use state::{Completion, KeyDetailsState, Signal, SignalReceiver, Snackbar, SnackbarStyle};
