//! Decimal money helpers and the order-totals computation.
//!
//! Prices travel over the wire and sit in the database as plain f64 numbers
//! (the original REST contract). All arithmetic happens in [`Decimal`] after
//! an exact shortest-round-trip conversion, and rounding to 2 places happens
//! once, at the end - never on intermediate values.
//!
//! The totals computation is deliberately free of any cart or HTTP types so a
//! server-side verification step can call it against stored line items
//! without dragging in the client crate.

use core::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::status::DeliveryType;

/// Order subtotal at or above this amount ships free (200 KM).
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Flat fee for standard delivery below the threshold (10 KM).
pub const STANDARD_SHIPPING_FEE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Flat fee for express delivery below the threshold (15 KM).
pub const EXPRESS_SHIPPING_FEE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// VAT rate applied to the subtotal (0.17).
pub const TAX_RATE: Decimal = Decimal::from_parts(17, 0, 0, false, 2);

/// Convert a wire/database price into an exact [`Decimal`].
///
/// Goes through the f64's shortest round-trip string so `19.99f64` becomes
/// exactly `19.99` instead of the underlying binary approximation.
/// Non-finite input maps to zero.
#[must_use]
pub fn decimal_from_price(price: f64) -> Decimal {
    if !price.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&price.to_string()).unwrap_or(Decimal::ZERO)
}

/// Convert a [`Decimal`] amount back to the f64 wire representation.
#[must_use]
pub fn price_to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// Round a monetary amount to 2 decimal places, half away from zero.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computed checkout totals, unrounded.
///
/// Only [`OrderTotals::total_rounded`] rounds; keep using the raw fields for
/// any further arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of price x quantity over all lines.
    pub subtotal: Decimal,
    /// Flat delivery fee, zero at or above the free-shipping threshold.
    pub shipping: Decimal,
    /// VAT on the subtotal.
    pub tax: Decimal,
}

impl OrderTotals {
    /// Subtotal + shipping + tax, unrounded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal + self.shipping + self.tax
    }

    /// The amount actually charged: total rounded once to 2 places.
    #[must_use]
    pub fn total_rounded(&self) -> Decimal {
        round2(self.total())
    }
}

/// Compute checkout totals for `(unit price, quantity)` lines.
///
/// Shipping is free once the subtotal reaches [`FREE_SHIPPING_THRESHOLD`];
/// below it, a flat fee applies depending on the delivery type. Tax is
/// [`TAX_RATE`] of the subtotal. The result is order-independent in the
/// lines.
#[must_use]
pub fn order_totals<I>(lines: I, delivery: DeliveryType) -> OrderTotals
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    let subtotal: Decimal = lines
        .into_iter()
        .map(|(price, quantity)| price * Decimal::from(quantity))
        .sum();

    let shipping = if subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        match delivery {
            DeliveryType::Standard => STANDARD_SHIPPING_FEE,
            DeliveryType::Express => EXPRESS_SHIPPING_FEE,
        }
    };

    let tax = subtotal * TAX_RATE;

    OrderTotals {
        subtotal,
        shipping,
        tax,
    }
}

/// Format an amount for display, rounded to 2 places with the currency unit.
#[must_use]
pub fn format_km(amount: Decimal) -> String {
    format!("{:.2} KM", round2(amount))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_decimal_from_price_is_exact() {
        assert_eq!(decimal_from_price(19.99), dec("19.99"));
        assert_eq!(decimal_from_price(199.99), dec("199.99"));
        assert_eq!(decimal_from_price(0.1), dec("0.1"));
        assert_eq!(decimal_from_price(f64::NAN), Decimal::ZERO);
        assert_eq!(decimal_from_price(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_totals_reference_scenario() {
        // 2 x 100.00 standard: free shipping kicks in exactly at 200.00.
        let totals = order_totals([(dec("100"), 2)], DeliveryType::Standard);
        assert_eq!(totals.subtotal, dec("200"));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, dec("34"));
        assert_eq!(totals.total_rounded(), dec("234.00"));
    }

    #[test]
    fn test_free_shipping_boundary() {
        for (delivery, fee) in [
            (DeliveryType::Standard, STANDARD_SHIPPING_FEE),
            (DeliveryType::Express, EXPRESS_SHIPPING_FEE),
        ] {
            let below = order_totals([(dec("199.99"), 1)], delivery);
            assert_eq!(below.shipping, fee);

            let at = order_totals([(dec("200.00"), 1)], delivery);
            assert_eq!(at.shipping, Decimal::ZERO);
        }
    }

    #[test]
    fn test_totals_order_independent() {
        let a = [(dec("12.50"), 3), (dec("7.99"), 1), (dec("120"), 2)];
        let b = [(dec("120"), 2), (dec("12.50"), 3), (dec("7.99"), 1)];
        assert_eq!(
            order_totals(a, DeliveryType::Express),
            order_totals(b, DeliveryType::Express)
        );
    }

    #[test]
    fn test_rounding_happens_once_at_the_end() {
        // A sub-cent unit price keeps the intermediates unrounded; only the
        // final total collapses to 2 places.
        let totals = order_totals([(dec("0.333"), 2)], DeliveryType::Standard);
        assert_eq!(totals.subtotal, dec("0.666"));
        assert_eq!(totals.tax, dec("0.11322"));
        assert_eq!(totals.total(), dec("10.77922"));
        assert_eq!(totals.total_rounded(), dec("10.78"));
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = order_totals([], DeliveryType::Standard);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        // An empty cart is below the threshold, so the flat fee applies;
        // checkout rejects empty carts before this ever matters.
        assert_eq!(totals.shipping, STANDARD_SHIPPING_FEE);
        assert_eq!(totals.total_rounded(), dec("10.00"));
    }

    #[test]
    fn test_format_km() {
        assert_eq!(format_km(dec("199.9")), "199.90 KM");
        assert_eq!(format_km(dec("10.775")), "10.78 KM");
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(dec("2.345")), dec("2.35"));
        assert_eq!(round2(dec("-2.345")), dec("-2.35"));
    }
}
