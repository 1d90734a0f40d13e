//! Stock movement tests
//!
//! Exercises the rules the movement service enforces around the
//! read-modify-write on a part's stock count:
//! - inbound adds, outbound subtracts
//! - outbound beyond availability is rejected before any write
//! - price derivation: explicit unit price wins, outbound falls back to
//!   the catalog price, total = unit price * quantity

use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Mirror of the service's stock adjustment, without the database
fn apply_movement(current: i32, direction: &str, quantity: i32) -> Result<i32, &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be greater than zero");
    }

    match direction {
        "in" => Ok(current + quantity),
        "out" => {
            if current >= quantity {
                Ok(current - quantity)
            } else {
                Err("Insufficient stock")
            }
        }
        _ => Err("Invalid direction"),
    }
}

/// Mirror of the service's price derivation
fn derive_prices(
    unit_price: Option<Decimal>,
    direction: &str,
    catalog_price: Decimal,
    quantity: i32,
) -> (Option<Decimal>, Option<Decimal>) {
    let unit = match (unit_price, direction) {
        (Some(price), _) => Some(price),
        (None, "out") => Some(catalog_price),
        _ => None,
    };
    let total = unit.map(|price| price * Decimal::from(quantity));
    (unit, total)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_inbound_adds_stock() {
        assert_eq!(apply_movement(10, "in", 5).unwrap(), 15);
        assert_eq!(apply_movement(0, "in", 3).unwrap(), 3);
    }

    #[test]
    fn test_outbound_subtracts_stock() {
        assert_eq!(apply_movement(10, "out", 4).unwrap(), 6);
        // Taking the last unit is allowed
        assert_eq!(apply_movement(5, "out", 5).unwrap(), 0);
    }

    #[test]
    fn test_outbound_beyond_availability_rejected() {
        assert!(apply_movement(3, "out", 4).is_err());
        assert!(apply_movement(0, "out", 1).is_err());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        assert!(apply_movement(10, "in", 0).is_err());
        assert!(apply_movement(10, "out", -2).is_err());
    }

    #[test]
    fn test_explicit_unit_price_wins() {
        let (unit, total) = derive_prices(Some(dec("5000")), "in", dec("6500"), 4);
        assert_eq!(unit, Some(dec("5000")));
        assert_eq!(total, Some(dec("20000")));
    }

    #[test]
    fn test_outbound_falls_back_to_catalog_price() {
        let (unit, total) = derive_prices(None, "out", dec("65000"), 3);
        assert_eq!(unit, Some(dec("65000")));
        assert_eq!(total, Some(dec("195000")));
    }

    #[test]
    fn test_inbound_without_price_has_no_total() {
        let (unit, total) = derive_prices(None, "in", dec("65000"), 3);
        assert_eq!(unit, None);
        assert_eq!(total, None);
    }

    #[test]
    fn test_zero_price_part_yields_zero_total() {
        let (unit, total) = derive_prices(None, "out", Decimal::ZERO, 7);
        assert_eq!(unit, Some(Decimal::ZERO));
        assert_eq!(total, Some(Decimal::ZERO));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn direction_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("in"), Just("out")]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Stock after any accepted sequence of movements is never negative
        #[test]
        fn prop_stock_never_goes_negative(
            start in 0i32..=1000,
            movements in prop::collection::vec((direction_strategy(), 1i32..=50), 0..30)
        ) {
            let mut stock = start;
            for (direction, quantity) in movements {
                if let Ok(next) = apply_movement(stock, direction, quantity) {
                    stock = next;
                }
            }
            prop_assert!(stock >= 0);
        }

        /// Accepted movements conserve units: final = start + ins - outs
        #[test]
        fn prop_accepted_movements_balance(
            start in 0i32..=1000,
            movements in prop::collection::vec((direction_strategy(), 1i32..=50), 0..30)
        ) {
            let mut stock = start;
            let mut total_in = 0i32;
            let mut total_out = 0i32;

            for (direction, quantity) in movements {
                if let Ok(next) = apply_movement(stock, direction, quantity) {
                    stock = next;
                    match direction {
                        "in" => total_in += quantity,
                        _ => total_out += quantity,
                    }
                }
            }

            prop_assert_eq!(stock, start + total_in - total_out);
        }

        /// An outbound movement is accepted exactly when stock suffices
        #[test]
        fn prop_outbound_acceptance(
            stock in 0i32..=1000,
            quantity in 1i32..=1000
        ) {
            let result = apply_movement(stock, "out", quantity);
            if stock >= quantity {
                prop_assert_eq!(result.unwrap(), stock - quantity);
            } else {
                prop_assert!(result.is_err());
            }
        }

        /// Total price is always unit price times quantity when present
        #[test]
        fn prop_total_price_consistent(
            unit in prop::option::of(1i64..=100_000),
            quantity in 1i32..=500,
            catalog in 0i64..=100_000,
            direction in direction_strategy()
        ) {
            let unit_price = unit.map(Decimal::from);
            let catalog_price = Decimal::from(catalog);
            let (derived_unit, total) = derive_prices(unit_price, direction, catalog_price, quantity);

            match derived_unit {
                Some(price) => prop_assert_eq!(total, Some(price * Decimal::from(quantity))),
                None => prop_assert_eq!(total, None),
            }

            // Outbound movements always carry a price
            if direction == "out" {
                prop_assert!(derived_unit.is_some());
            }
        }
    }
}
