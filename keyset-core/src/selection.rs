//! Multi-selection of derived key rows

use crate::projection::DerivedKeyRow;

/// Ordered set of selected rows, membership by equality
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    rows: Vec<DerivedKeyRow>,
}

impl SelectionSet {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `row` if selected, otherwise append it.
    ///
    /// Returns `true` when the row ends up selected.
    pub fn toggle(&mut self, row: &DerivedKeyRow) -> bool {
        if let Some(index) = self.rows.iter().position(|r| r == row) {
            self.rows.remove(index);
            false
        } else {
            self.rows.push(row.clone());
            true
        }
    }

    /// Check membership
    pub fn contains(&self, row: &DerivedKeyRow) -> bool {
        self.rows.contains(row)
    }

    /// Replace the selection with `rows`
    pub fn select_all(&mut self, rows: &[DerivedKeyRow]) {
        self.rows = rows.to_vec();
    }

    /// Drop selected rows that are no longer listed
    pub fn retain_listed(&mut self, rows: &[DerivedKeyRow]) {
        self.rows.retain(|r| rows.contains(r));
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Selected rows in selection order
    pub fn rows(&self) -> &[DerivedKeyRow] {
        &self.rows
    }

    /// Number of selected rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{DerivationPath, DerivedKey};
    use crate::network::{Encryption, NetworkId};

    fn row(path: &str) -> DerivedKeyRow {
        let key = DerivedKey {
            path: DerivationPath::from(path),
            network_id: NetworkId::from("A"),
            public_key: vec![0x05; 32],
            name: "Main".to_string(),
            encryption: Encryption::Sr25519,
            has_password: false,
        };
        DerivedKeyRow::new(&key, &[])
    }

    #[test]
    fn test_toggle_appends_then_removes() {
        let mut selection = SelectionSet::new();
        assert!(selection.toggle(&row("//0")));
        assert!(selection.toggle(&row("//1")));
        assert_eq!(selection.len(), 2);
        assert!(!selection.toggle(&row("//0")));
        assert_eq!(selection.rows()[0].view_model.path, "//1");
    }

    #[test]
    fn test_selection_order_is_tap_order() {
        let mut selection = SelectionSet::new();
        selection.toggle(&row("//2"));
        selection.toggle(&row("//0"));
        let paths: Vec<_> = selection.rows().iter().map(|r| r.view_model.path.clone()).collect();
        assert_eq!(paths, vec!["//2", "//0"]);
    }

    #[test]
    fn test_retain_listed() {
        let mut selection = SelectionSet::new();
        selection.toggle(&row("//0"));
        selection.toggle(&row("//1"));
        selection.retain_listed(&[row("//1")]);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&row("//1")));
    }
}
