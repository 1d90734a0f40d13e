//! Stock status classification tests
//!
//! Covers the threshold ladder used by every stock view:
//! - at or below minimum stock -> critical
//! - at or below the reorder point -> reorder
//! - at or below 1.5x the reorder point -> low
//! - above that -> good

use shared::stock::{calculate_rop, classify_stock, StockStatus};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Boundary equality is inclusive at every tier
    #[test]
    fn test_boundaries_are_inclusive() {
        // current == minimum is critical, not reorder
        assert_eq!(classify_stock(8, 10, 8), StockStatus::Critical);
        // current == rop is reorder, not low
        assert_eq!(classify_stock(10, 10, 8), StockStatus::Reorder);
        // current == rop * 1.5 (integer case) is low, not good
        assert_eq!(classify_stock(15, 10, 8), StockStatus::Low);
        assert_eq!(classify_stock(16, 10, 8), StockStatus::Good);
    }

    /// The minimum-stock rung wins even when the reorder point is lower
    #[test]
    fn test_critical_wins_over_reorder() {
        assert_eq!(classify_stock(5, 3, 6), StockStatus::Critical);
    }

    /// The 1.5x boundary is a real-number comparison, not an integer one
    #[test]
    fn test_fractional_low_boundary() {
        // rop = 5: boundary at 7.5, so 7 is low and 8 is good
        assert_eq!(classify_stock(7, 5, 2), StockStatus::Low);
        assert_eq!(classify_stock(8, 5, 2), StockStatus::Good);

        // rop = 7: boundary at 10.5
        assert_eq!(classify_stock(10, 7, 2), StockStatus::Low);
        assert_eq!(classify_stock(11, 7, 2), StockStatus::Good);
    }

    /// Bad upstream data is not masked: negative stock classifies literally
    #[test]
    fn test_negative_stock_is_critical() {
        assert_eq!(classify_stock(-1, 10, 5), StockStatus::Critical);
        assert_eq!(classify_stock(i32::MIN, 0, 1), StockStatus::Critical);
    }

    /// Zero reorder point still produces a sensible ladder
    #[test]
    fn test_zero_rop() {
        assert_eq!(classify_stock(0, 0, 1), StockStatus::Critical);
        assert_eq!(classify_stock(2, 0, 1), StockStatus::Good);
    }

    /// Concrete part from the workshop floor
    #[test]
    fn test_known_scenarios() {
        // Gasket: 3 on hand, minimum 8, rop 10
        assert_eq!(classify_stock(3, 10, 8), StockStatus::Critical);
        // Oil: 15 on hand, minimum 6, rop 8 (15 > 12)
        assert_eq!(classify_stock(15, 8, 6), StockStatus::Good);
        // Brake pads: 8 on hand, minimum 5, rop 12
        assert_eq!(classify_stock(8, 12, 5), StockStatus::Reorder);
    }

    /// Display metadata stays in sync with the status
    #[test]
    fn test_labels_and_colors() {
        assert_eq!(StockStatus::Critical.label(), "Stok Kritis");
        assert_eq!(StockStatus::Reorder.label(), "Perlu Reorder");
        assert_eq!(StockStatus::Low.label(), "Stok Rendah");
        assert_eq!(StockStatus::Good.label(), "Stok Aman");

        assert_eq!(StockStatus::Critical.severity_color(), "red");
        assert_eq!(StockStatus::Good.severity_color(), "green");
    }

    /// Reorder point rounds demand * lead time up to whole units
    #[test]
    fn test_rop_calculation() {
        assert_eq!(calculate_rop(dec("1.5"), 7), 11);
        assert_eq!(calculate_rop(dec("1.5"), 2), 3);
        assert_eq!(calculate_rop(dec("2"), 5), 10);
        assert_eq!(calculate_rop(dec("0.4"), 2), 1);
        assert_eq!(calculate_rop(dec("0"), 14), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Anything at or below minimum stock is critical, whatever the rop
        #[test]
        fn prop_at_or_below_minimum_is_critical(
            minimum in 1i32..=1000,
            rop in 0i32..=2000,
            below in 0i32..=1000
        ) {
            let current = minimum - below;
            prop_assert_eq!(classify_stock(current, rop, minimum), StockStatus::Critical);
        }

        /// Between minimum (exclusive) and rop (inclusive) is reorder
        #[test]
        fn prop_between_minimum_and_rop_is_reorder(
            minimum in 1i32..=1000,
            span in 1i32..=1000,
            offset in 1i32..=1000
        ) {
            let rop = minimum + span;
            let current = minimum + offset.min(span);
            prop_assert_eq!(classify_stock(current, rop, minimum), StockStatus::Reorder);
        }

        /// Between rop (exclusive) and rop * 1.5 (inclusive) is low
        #[test]
        fn prop_between_rop_and_one_and_a_half_rop_is_low(
            minimum in 1i32..=100,
            rop_extra in 1i32..=1000,
            frac in 0.0f64..=1.0
        ) {
            let rop = minimum + rop_extra;
            let ceiling = (rop as f64) * 1.5;
            let current = ((rop as f64) + frac * (ceiling - rop as f64)).ceil() as i32;
            prop_assume!(current > rop && (current as f64) <= ceiling);
            prop_assert_eq!(classify_stock(current, rop, minimum), StockStatus::Low);
        }

        /// Above rop * 1.5 is good
        #[test]
        fn prop_above_one_and_a_half_rop_is_good(
            minimum in 1i32..=100,
            rop in 0i32..=10_000,
            extra in 1i32..=10_000
        ) {
            let current = ((rop as f64) * 1.5).floor() as i32 + extra;
            prop_assume!(current > minimum && (current as f64) > (rop as f64) * 1.5);
            prop_assert_eq!(classify_stock(current, rop, minimum), StockStatus::Good);
        }

        /// Same inputs, same answer: classification has no hidden state
        #[test]
        fn prop_classification_is_deterministic(
            current in -1000i32..=10_000,
            rop in 0i32..=10_000,
            minimum in 1i32..=1000
        ) {
            let first = classify_stock(current, rop, minimum);
            let second = classify_stock(current, rop, minimum);
            prop_assert_eq!(first, second);
        }

        /// Every input lands in exactly one tier
        #[test]
        fn prop_classification_is_total(
            current in -1000i32..=100_000,
            rop in 0i32..=10_000,
            minimum in 1i32..=1000
        ) {
            let status = classify_stock(current, rop, minimum);
            prop_assert!(matches!(
                status,
                StockStatus::Critical | StockStatus::Reorder | StockStatus::Low | StockStatus::Good
            ));
        }
    }
}
