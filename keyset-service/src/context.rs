//! Application-wide state shared between screens

use keyset_core::{Network, NetworkFilter};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared network universe and network filter.
///
/// Values are only ever read or replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    inner: Arc<RwLock<ContextInner>>,
}

#[derive(Debug, Default)]
struct ContextInner {
    networks: Arc<Vec<Network>>,
    filter: NetworkFilter,
}

impl AppContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a preset filter
    pub fn with_filter(filter: NetworkFilter) -> Self {
        let context = Self::new();
        context.replace_filter(filter);
        context
    }

    /// Current network universe
    pub fn networks(&self) -> Arc<Vec<Network>> {
        Arc::clone(&self.inner.read().networks)
    }

    /// Replace the network universe
    pub fn replace_networks(&self, networks: Vec<Network>) {
        self.inner.write().networks = Arc::new(networks);
    }

    /// Current network filter
    pub fn filter(&self) -> NetworkFilter {
        self.inner.read().filter.clone()
    }

    /// Replace the network filter
    pub fn replace_filter(&self, filter: NetworkFilter) {
        self.inner.write().filter = filter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyset_core::NetworkId;

    #[test]
    fn test_clones_share_state() {
        let context = AppContext::new();
        let other = context.clone();
        other.replace_filter([NetworkId::from("a")].into_iter().collect());
        assert_eq!(context.filter().len(), 1);
    }

    #[test]
    fn test_networks_snapshot_survives_replace() {
        let context = AppContext::new();
        let before = context.networks();
        context.replace_networks(vec![Network {
            id: NetworkId::from("a"),
            title: "A".to_string(),
            logo: String::new(),
            base58_prefix: 0,
            encryption: Default::default(),
            path_id: String::new(),
        }]);
        assert!(before.is_empty());
        assert_eq!(context.networks().len(), 1);
    }
}
