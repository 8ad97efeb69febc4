use formcalc_engine::engine::{Table, recompute};

/// Input pairs the table is seeded with when a session starts.
pub(crate) const SEED_ROWS: [(f64, f64); 4] =
    [(100.0, 10.0), (200.0, 50.0), (50.0, 20.0), (400.0, 80.0)];

/// Holds the current table of one session.
///
/// `replace` swaps the whole table; the store never sees partial edits.
pub trait SessionStore {
    /// The current table.
    fn get(&self) -> Table;

    /// Replace the stored table wholesale.
    fn replace(&mut self, table: Table);
}

/// The default table with its derived columns already computed.
pub fn seed_table() -> Table {
    recompute(&Table::from_pairs(&SEED_ROWS))
}

/// In-memory store; lives exactly as long as its session.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryStore {
    table: Table,
}

impl MemoryStore {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// A store holding [`seed_table`].
    pub fn seeded() -> Self {
        Self::new(seed_table())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self) -> Table {
        self.table.clone()
    }

    fn replace(&mut self, table: Table) {
        self.table = table;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcalc_engine::engine::{Row, is_consistent};

    #[test]
    fn test_seed_table_is_computed_before_first_display() {
        let table = seed_table();
        assert_eq!(table.len(), 4);
        assert!(is_consistent(&table));
        let inputs: Vec<(f64, f64)> = table.iter().map(|r| (r.a, r.b)).collect();
        assert_eq!(inputs, SEED_ROWS.to_vec());
    }

    #[test]
    fn test_replace_is_visible_to_later_get() {
        let mut store = MemoryStore::default();
        let replacement = recompute(&Table::from_pairs(&[(1.0, 1.0)]));
        store.replace(replacement.clone());
        assert_eq!(store.get(), replacement);
    }

    #[test]
    fn test_get_returns_an_independent_copy() {
        let store = MemoryStore::default();
        let mut copy = store.get();
        copy.push(Row::new(1.0, 1.0));
        assert_eq!(store.get().len(), 4);
    }
}
