// Property-based tests for the recompute engine.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use formcalc_engine::engine::{Row, Table, is_consistent, recompute};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// Finite input value, with both signed zeros well represented.
fn arb_input() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        1 => Just(-0.0),
        6 => -1.0e6..1.0e6f64,
    ]
}

/// Rows as a host might hand them over: derived values missing or stale.
fn arb_row() -> impl Strategy<Value = Row> {
    (
        arb_input(),
        arb_input(),
        proptest::option::of(-1.0e3..1.0e3f64),
        proptest::option::of(-1.0e3..1.0e3f64),
    )
        .prop_map(|(a, b, c, d)| Row { a, b, c, d })
}

fn arb_table() -> impl Strategy<Value = Table> {
    proptest::collection::vec(arb_row(), 0..32).prop_map(Table::from_rows)
}

proptest! {
    #![proptest_config(config())]
    #[test]
    fn derived_columns_follow_inputs(table in arb_table()) {
        let out = recompute(&table);
        for (i, row) in out.iter().enumerate() {
            prop_assert_eq!(row.c, Some(row.a * row.b), "Row {} product", i);
            let expected = if row.a == 0.0 { 0.0 } else { row.b / row.a };
            prop_assert_eq!(row.d, Some(expected), "Row {} ratio", i);
            if row.a == 0.0 {
                prop_assert_eq!(row.d, Some(0.0), "Row {} zero A", i);
            }
        }
        prop_assert!(is_consistent(&out));
    }

    #[test]
    fn recompute_is_idempotent(table in arb_table()) {
        let once = recompute(&table);
        let twice = recompute(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn input_table_is_left_unchanged(table in arb_table()) {
        let snapshot = table.clone();
        let _ = recompute(&table);
        prop_assert_eq!(table, snapshot);
    }

    #[test]
    fn row_count_and_order_are_kept(table in arb_table()) {
        let out = recompute(&table);
        prop_assert_eq!(out.len(), table.len());
        for (i, (before, after)) in table.iter().zip(out.iter()).enumerate() {
            prop_assert_eq!(before.a.to_bits(), after.a.to_bits(), "Row {} A moved", i);
            prop_assert_eq!(before.b.to_bits(), after.b.to_bits(), "Row {} B moved", i);
        }
    }
}
