//! # Margin Layering
//!
//! Contingency is applied to the subtotal first; profit is then applied to
//! the contingency-inflated base, not to the raw subtotal:
//!
//! ```text
//! contingency = subtotal × c%
//! base        = subtotal + contingency
//! profit      = base × p%
//! total       = base + profit
//! ```

use serde::{Deserialize, Serialize};

use crate::units::round2;

/// Markup detail, so callers can show "cost vs. markup" separately.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginDetail {
    pub contingency_pct: f64,
    pub contingency_amount: f64,
    pub profit_pct: f64,
    pub profit_amount: f64,
}

impl MarginDetail {
    /// Copy with every value rounded to two decimals
    pub fn rounded(&self) -> Self {
        MarginDetail {
            contingency_pct: round2(self.contingency_pct),
            contingency_amount: round2(self.contingency_amount),
            profit_pct: round2(self.profit_pct),
            profit_amount: round2(self.profit_amount),
        }
    }
}

/// Apply contingency then profit to a subtotal. Returns the detail and the total.
///
/// ```rust
/// use quote_core::calculations::margins::apply_margins;
///
/// let (detail, total) = apply_margins(1000.0, 10.0, 20.0);
/// assert!((detail.contingency_amount - 100.0).abs() < 1e-9);
/// assert!((detail.profit_amount - 220.0).abs() < 1e-9);
/// assert!((total - 1320.0).abs() < 1e-9);
/// ```
pub fn apply_margins(subtotal: f64, contingency_pct: f64, profit_pct: f64) -> (MarginDetail, f64) {
    let contingency_amount = subtotal * contingency_pct / 100.0;
    let base_with_contingency = subtotal + contingency_amount;
    let profit_amount = base_with_contingency * profit_pct / 100.0;
    let total = base_with_contingency + profit_amount;

    let detail = MarginDetail {
        contingency_pct,
        contingency_amount,
        profit_pct,
        profit_amount,
    };
    (detail, total)
}
