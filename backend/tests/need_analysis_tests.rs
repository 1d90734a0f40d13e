//! Purchasing need-analysis tests
//!
//! Covers the report over a part snapshot:
//! - recommended quantity and priority per part
//! - the quantity > 0 cut applied after computing, never before
//! - filter ordering (search/category before the cut, priority after)
//! - sort order and summary counters

use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::stock::{
    compute_need_analysis, recommended_quantity, NeedFilters, PartSnapshot, PurchasePriority,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn part(code: &str, current: i32, minimum: i32, rop: i32, price: &str) -> PartSnapshot {
    PartSnapshot {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: format!("Part {code}"),
        category: "Mesin".to_string(),
        brand: Some("Astra".to_string()),
        current_stock: current,
        minimum_stock: minimum,
        rop,
        price: dec(price),
        location: Some("Rak A1".to_string()),
        daily_demand: dec("1.5"),
        lead_time: 7,
        recent_avg_demand: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A part needing 15 units at high priority
    #[test]
    fn test_critical_part_report_row() {
        let report = compute_need_analysis(
            &[part("GSK-001", 3, 8, 10, "65000")],
            &NeedFilters::default(),
        );

        assert_eq!(report.items.len(), 1);
        let item = &report.items[0];
        assert_eq!(item.recommended_quantity, 15);
        assert_eq!(item.priority, PurchasePriority::Tinggi);
        assert_eq!(item.estimated_cost, dec("975000"));
        assert_eq!(item.safety_stock, item.minimum_stock);
    }

    /// A part at its reorder point gets medium priority
    #[test]
    fn test_reorder_part_report_row() {
        let report = compute_need_analysis(
            &[part("REM-003", 8, 5, 12, "85000")],
            &NeedFilters::default(),
        );

        let item = &report.items[0];
        assert_eq!(item.recommended_quantity, 9);
        assert_eq!(item.priority, PurchasePriority::Sedang);
        assert_eq!(item.estimated_cost, dec("765000"));
    }

    /// Parts with enough stock never appear in the report
    #[test]
    fn test_sufficient_stock_excluded() {
        // 15 >= 8 + 6, nothing to buy
        let report = compute_need_analysis(
            &[part("OLI-002", 15, 6, 8, "35000")],
            &NeedFilters::default(),
        );

        assert!(report.items.is_empty());
        assert_eq!(report.summary.total_items, 0);
    }

    /// The exclusion boundary: current == rop + minimum is excluded,
    /// one unit less is included
    #[test]
    fn test_exclusion_boundary() {
        let at_boundary = compute_need_analysis(
            &[part("A", 18, 8, 10, "100")],
            &NeedFilters::default(),
        );
        assert!(at_boundary.items.is_empty());

        let below_boundary = compute_need_analysis(
            &[part("A", 17, 8, 10, "100")],
            &NeedFilters::default(),
        );
        assert_eq!(below_boundary.items.len(), 1);
        assert_eq!(below_boundary.items[0].recommended_quantity, 1);
    }

    /// Search narrows before the cut, priority narrows after it
    #[test]
    fn test_filter_ordering() {
        let parts = vec![
            part("KMP-001", 2, 5, 10, "100"),  // tinggi, matches "kmp"
            part("KMP-002", 9, 5, 10, "100"),  // sedang, matches "kmp"
            part("KMP-003", 30, 5, 10, "100"), // matches "kmp" but nothing to buy
            part("OLI-001", 2, 5, 10, "100"),  // tinggi, does not match
        ];

        let filters = NeedFilters {
            search: Some("kmp".to_string()),
            priority: Some(PurchasePriority::Tinggi),
            ..NeedFilters::default()
        };
        let report = compute_need_analysis(&parts, &filters);

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].code, "KMP-001");
    }

    /// Category filter drops non-matching parts entirely
    #[test]
    fn test_category_filter() {
        let mut electrical = part("ACC-001", 2, 5, 10, "100");
        electrical.category = "Kelistrikan".to_string();
        let parts = vec![part("GSK-001", 2, 5, 10, "100"), electrical];

        let filters = NeedFilters {
            category: Some("Kelistrikan".to_string()),
            ..NeedFilters::default()
        };
        let report = compute_need_analysis(&parts, &filters);

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].code, "ACC-001");
    }

    /// Summary counters over an empty snapshot are all zero
    #[test]
    fn test_empty_snapshot_summary() {
        let report = compute_need_analysis(&[], &NeedFilters::default());

        assert_eq!(report.summary.total_items, 0);
        assert_eq!(report.summary.total_cost, Decimal::ZERO);
        assert_eq!(report.summary.high_priority, 0);
        assert_eq!(report.summary.medium_priority, 0);
        assert_eq!(report.summary.low_priority, 0);
    }

    /// High priority sorts first, larger orders first within a tier
    #[test]
    fn test_sort_order() {
        let parts = vec![
            part("C1", 11, 5, 10, "100"), // rendah, qty 4
            part("A1", 9, 5, 10, "100"),  // sedang, qty 6
            part("B1", 2, 5, 10, "100"),  // tinggi, qty 13
            part("B2", 4, 5, 10, "100"),  // tinggi, qty 11
            part("A2", 8, 5, 10, "100"),  // sedang, qty 7
        ];

        let report = compute_need_analysis(&parts, &NeedFilters::default());
        let order: Vec<&str> = report.items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(order, vec!["B1", "B2", "A2", "A1", "C1"]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot_strategy() -> impl Strategy<Value = PartSnapshot> {
        (
            0i32..=60,   // current stock
            1i32..=20,   // minimum stock
            0i32..=40,   // rop
            1i64..=1000, // price
        )
            .prop_map(|(current, minimum, rop, price)| {
                part("P", current, minimum, rop, &price.to_string())
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Recommended quantity is never negative
        #[test]
        fn prop_recommended_quantity_never_negative(
            current in -100i32..=1000,
            minimum in 1i32..=100,
            rop in 0i32..=500
        ) {
            prop_assert!(recommended_quantity(current, rop, minimum) >= 0);
        }

        /// A part with current >= rop + minimum never appears in the report
        #[test]
        fn prop_sufficient_stock_always_excluded(
            minimum in 1i32..=100,
            rop in 0i32..=500,
            surplus in 0i32..=500
        ) {
            let current = rop + minimum + surplus;
            let report = compute_need_analysis(
                &[part("P", current, minimum, rop, "100")],
                &NeedFilters::default(),
            );
            prop_assert!(report.items.is_empty());
        }

        /// Estimated cost is exactly quantity * price for every row
        #[test]
        fn prop_cost_is_exact(parts in prop::collection::vec(snapshot_strategy(), 0..20)) {
            let report = compute_need_analysis(&parts, &NeedFilters::default());
            for item in &report.items {
                prop_assert_eq!(
                    item.estimated_cost,
                    Decimal::from(item.recommended_quantity) * item.price
                );
            }
        }

        /// Tiers are contiguous and quantities non-increasing within a tier
        #[test]
        fn prop_sort_order_holds(parts in prop::collection::vec(snapshot_strategy(), 0..30)) {
            let report = compute_need_analysis(&parts, &NeedFilters::default());

            fn rank(priority: PurchasePriority) -> u8 {
                match priority {
                    PurchasePriority::Tinggi => 0,
                    PurchasePriority::Sedang => 1,
                    PurchasePriority::Rendah => 2,
                }
            }

            for pair in report.items.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(rank(a.priority) <= rank(b.priority));
                if a.priority == b.priority {
                    prop_assert!(a.recommended_quantity >= b.recommended_quantity);
                }
            }
        }

        /// Summary counters always agree with the rows
        #[test]
        fn prop_summary_matches_items(parts in prop::collection::vec(snapshot_strategy(), 0..30)) {
            let report = compute_need_analysis(&parts, &NeedFilters::default());
            let items = &report.items;

            prop_assert_eq!(report.summary.total_items, items.len() as u64);
            prop_assert_eq!(
                report.summary.total_cost,
                items.iter().map(|i| i.estimated_cost).sum::<Decimal>()
            );
            prop_assert_eq!(
                report.summary.high_priority,
                items.iter().filter(|i| i.priority == PurchasePriority::Tinggi).count() as u64
            );
            prop_assert_eq!(
                report.summary.medium_priority,
                items.iter().filter(|i| i.priority == PurchasePriority::Sedang).count() as u64
            );
            prop_assert_eq!(
                report.summary.low_priority,
                items.iter().filter(|i| i.priority == PurchasePriority::Rendah).count() as u64
            );
        }

        /// Every included row really needs stock
        #[test]
        fn prop_all_rows_have_positive_quantity(
            parts in prop::collection::vec(snapshot_strategy(), 0..30)
        ) {
            let report = compute_need_analysis(&parts, &NeedFilters::default());
            for item in &report.items {
                prop_assert!(item.recommended_quantity > 0);
            }
        }

        /// The report is a pure function of its snapshot
        #[test]
        fn prop_report_is_deterministic(
            parts in prop::collection::vec(snapshot_strategy(), 0..20)
        ) {
            let first = compute_need_analysis(&parts, &NeedFilters::default());
            let second = compute_need_analysis(&parts, &NeedFilters::default());

            prop_assert_eq!(first.summary, second.summary);
            let first_codes: Vec<_> = first.items.iter().map(|i| i.id).collect();
            let second_codes: Vec<_> = second.items.iter().map(|i| i.id).collect();
            prop_assert_eq!(first_codes, second_codes);
        }
    }
}
