//! Price arithmetic for an order.
//!
//! All amounts are exact decimals, so rounding never trips over binary
//! floating point error (4.999999999 never ceilings to 5.10).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::models::{MenuItem, ROUND_UP_INCREMENT};

pub fn extras_total<'a, I>(items: I) -> Decimal
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    items.into_iter().map(|item| item.price).sum()
}

pub fn subtotal<'a, I>(base_price: Decimal, extras: I) -> Decimal
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    base_price + extras_total(extras)
}

pub fn tax(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

pub fn gross_total(amount: Decimal, rate: Decimal) -> Decimal {
    amount + tax(amount, rate)
}

/// Rounds up to the next multiple of ten cents.
///
/// Exact multiples are left alone.
///
/// # Examples
///
/// ```
/// use icecream_land::domain::round_up_to_nearest_ten_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_up_to_nearest_ten_cents(Decimal::new(4951, 3)), Decimal::new(5, 0));
/// assert_eq!(round_up_to_nearest_ten_cents(Decimal::new(500, 2)), Decimal::new(5, 0));
/// ```
pub fn round_up_to_nearest_ten_cents(value: Decimal) -> Decimal {
    (value / ROUND_UP_INCREMENT).ceil() * ROUND_UP_INCREMENT
}

/// Formats an amount for display as dollars with exactly two decimals.
///
/// Half-cent amounts round away from zero.
pub fn format_currency(value: Decimal) -> String {
    let cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", cents)
}

/// What the confirmation screen shows before the order is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub rounded_total: Decimal,
}

impl PriceBreakdown {
    pub fn new(subtotal: Decimal, rate: Decimal) -> Self {
        let total = gross_total(subtotal, rate);
        Self {
            subtotal,
            tax: tax(subtotal, rate),
            total,
            rounded_total: round_up_to_nearest_ten_cents(total),
        }
    }

    /// Amount charged for the given round-up choice.
    pub fn payable(&self, round_up: bool) -> Decimal {
        if round_up { self.rounded_total } else { self.total }
    }

    pub fn donation(&self) -> Decimal {
        self.rounded_total - self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{PricingConfig, TAX_RATE};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_extras_total() {
        let config = PricingConfig::default();
        assert_eq!(extras_total(&config.extras_catalog), dec("1.50"));
        assert_eq!(extras_total(&Vec::<MenuItem>::new()), Decimal::ZERO);
    }

    #[test]
    fn test_subtotal() {
        let config = PricingConfig::default();
        let extras = [
            config.extra("Sprinkles").unwrap().clone(),
            config.extra("Cheese").unwrap().clone(),
        ];
        assert_eq!(subtotal(dec("1.50"), &extras), dec("2.25"));
    }

    #[test]
    fn test_tax_and_gross() {
        assert_eq!(tax(dec("2.25"), TAX_RATE), dec("0.1125"));
        assert_eq!(gross_total(dec("2.25"), TAX_RATE), dec("2.3625"));
        assert_eq!(gross_total(Decimal::ZERO, TAX_RATE), Decimal::ZERO);
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up_to_nearest_ten_cents(dec("4.951")), dec("5.00"));
        assert_eq!(round_up_to_nearest_ten_cents(dec("2.3625")), dec("2.40"));
        assert_eq!(round_up_to_nearest_ten_cents(dec("2.3001")), dec("2.40"));
        assert_eq!(round_up_to_nearest_ten_cents(dec("0.01")), dec("0.10"));
        assert_eq!(round_up_to_nearest_ten_cents(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_round_up_leaves_exact_tenths() {
        assert_eq!(round_up_to_nearest_ten_cents(dec("5.00")), dec("5.00"));
        assert_eq!(round_up_to_nearest_ten_cents(dec("2.10")), dec("2.10"));
        assert_eq!(round_up_to_nearest_ten_cents(dec("4.999999999")), dec("5.00"));
    }

    #[test]
    fn test_round_up_is_smallest_covering_multiple() {
        let tenth = dec("0.10");
        let mut value = Decimal::ZERO;
        while value <= dec("6.00") {
            let rounded = round_up_to_nearest_ten_cents(value);
            assert!(rounded >= value);
            assert_eq!(rounded % tenth, Decimal::ZERO);
            assert!(rounded - tenth < value);
            value += dec("0.0125");
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("2.3625")), "$2.36");
        assert_eq!(format_currency(dec("2.4")), "$2.40");
        assert_eq!(format_currency(dec("0.1125")), "$0.11");
        assert_eq!(format_currency(dec("1.005")), "$1.01");
        assert_eq!(format_currency(Decimal::new(3, 0)), "$3.00");
    }

    #[test]
    fn test_price_breakdown() {
        let breakdown = PriceBreakdown::new(dec("2.25"), TAX_RATE);
        assert_eq!(breakdown.subtotal, dec("2.25"));
        assert_eq!(breakdown.tax, dec("0.1125"));
        assert_eq!(breakdown.total, dec("2.3625"));
        assert_eq!(breakdown.rounded_total, dec("2.40"));
        assert_eq!(breakdown.payable(false), dec("2.3625"));
        assert_eq!(breakdown.payable(true), dec("2.40"));
        assert_eq!(breakdown.donation(), dec("0.0375"));
    }
}
