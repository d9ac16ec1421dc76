//! Price helpers
//!
//! Amounts travel as currency units (`f64`) but are summed in cents so
//! order totals never drift.

use serde::{Deserialize, Serialize};

/// Currency unit to cents (rounded half away from zero)
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Cents to currency unit
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Tax owed on a line, in cents
///
/// `tax_rate` is a percentage (10 = 10%).
pub fn line_tax_cents(line_cents: i64, tax_rate: f64) -> i64 {
    (line_cents as f64 * tax_rate / 100.0).round() as i64
}

/// One priced line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Unit price in currency unit
    pub price: f64,
    pub quantity: i32,
    /// Tax rate in percentage
    pub tax_rate: f64,
}

impl OrderLine {
    pub fn new(price: f64, quantity: i32, tax_rate: f64) -> Self {
        Self {
            price,
            quantity,
            tax_rate,
        }
    }
}

/// Order totals in currency unit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Sum lines; tax is rounded per line
    pub fn compute(lines: &[OrderLine]) -> Self {
        let (subtotal, tax) = lines.iter().fold((0i64, 0i64), |(sub, tax), line| {
            let line_cents = to_cents(line.price) * line.quantity as i64;
            (sub + line_cents, tax + line_tax_cents(line_cents, line.tax_rate))
        });
        Self {
            subtotal: from_cents(subtotal),
            tax: from_cents(tax),
            total: from_cents(subtotal + tax),
        }
    }
}
