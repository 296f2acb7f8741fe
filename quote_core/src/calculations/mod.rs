//! # Quote Calculation
//!
//! The pricing engine: `compute_quote(input, config) -> QuoteResult`.
//!
//! Pure, deterministic and infallible. It sanitizes its inputs, runs the
//! takeoff, prices each line, groups the lines into categories, layers
//! contingency then profit, and rounds everything to two decimals. The only
//! short-circuit is a non-positive width or length, which yields an all-zero
//! result meaning "insufficient input".
//!
//! - [`takeoff`] - Geometry and quantities (frames, steel kg, areas, volumes)
//! - [`costing`] - Per-line prices and category grouping
//! - [`margins`] - Contingency and profit layering
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::compute_quote;
//! use quote_core::input::QuotationInput;
//! use quote_core::pricing::PriceConfig;
//!
//! let input = QuotationInput::with_dimensions(20.0, 30.0, 5.0, 10.0);
//! let result = compute_quote(&input, &PriceConfig::reference());
//!
//! assert!(result.total > result.subtotal);
//! assert_eq!(result.quantities.frame_count, 7);
//! println!("Total: USD {:.2}", result.total);
//! ```

pub mod costing;
pub mod margins;
pub mod takeoff;

use serde::{Deserialize, Serialize};

use crate::input::QuotationInput;
use crate::pricing::PriceConfig;
use crate::units::round2;

// Re-export commonly used types
pub use costing::{CostBreakdown, CostLines};
pub use margins::MarginDetail;
pub use takeoff::Takeoff;

/// Raw quantities behind a quote, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quantities {
    pub frame_count: u32,
    pub slope_factor: f64,
    pub rafter_length_m: f64,
    pub column_kg_per_m: f64,
    pub beam_kg_per_m: f64,
    pub column_kg: f64,
    pub beam_kg: f64,
    pub purlin_kg: f64,
    pub total_steel_kg: f64,
    pub footprint_area_m2: f64,
    pub perimeter_m: f64,
    pub roof_area_m2: f64,
    pub net_wall_area_m2: f64,
    pub total_cladding_area_m2: f64,
    pub insulation_area_m2: f64,
    pub concrete_volume_m3: f64,
}

impl Quantities {
    fn from_takeoff(t: &Takeoff) -> Self {
        Quantities {
            frame_count: t.frame_count,
            slope_factor: round2(t.slope_factor),
            rafter_length_m: round2(t.rafter_length.0),
            column_kg_per_m: round2(t.column_weight.kg_per_m.0),
            beam_kg_per_m: round2(t.beam_weight.kg_per_m.0),
            column_kg: round2(t.column_kg.0),
            beam_kg: round2(t.beam_kg.0),
            purlin_kg: round2(t.purlin_kg.0),
            total_steel_kg: round2(t.total_steel_kg().0),
            footprint_area_m2: round2(t.footprint.0),
            perimeter_m: round2(t.perimeter.0),
            roof_area_m2: round2(t.roof_area.0),
            net_wall_area_m2: round2(t.net_wall_area.0),
            total_cladding_area_m2: round2(t.cladding_area().0),
            insulation_area_m2: round2(t.insulation_area().0),
            concrete_volume_m3: round2(t.concrete_volume().0),
        }
    }
}

/// Itemized estimate returned by [`compute_quote`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "total": 152340.18,
///   "subtotal": 116068.71,
///   "breakdown": {
///     "structural_materials": 31426.47, "cladding_and_insulation": 10854.59,
///     "accessories": 0.0, "civil_works": 0.0,
///     "labor": 30451.98, "logistics_and_other": 1700.0
///   },
///   "lines": { "steel": 30426.47, "fasteners": 500.0, "...": 0.0 },
///   "quantities": {
///     "frame_count": 7, "total_steel_kg": 8693.28, "total_cladding_area_m2": 602.99, "...": 0.0
///   },
///   "margins": {
///     "contingency_pct": 5.0, "contingency_amount": 5803.44,
///     "profit_pct": 25.0, "profit_amount": 30468.04
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Final price including contingency and profit
    pub total: f64,

    /// Sum of the six categories, before margins
    pub subtotal: f64,

    /// Category totals
    pub breakdown: CostBreakdown,

    /// Individual priced lines
    pub lines: CostLines,

    /// Takeoff quantities
    pub quantities: Quantities,

    /// Contingency and profit detail
    pub margins: MarginDetail,
}

impl QuoteResult {
    /// The all-zero result returned for a zero footprint
    pub fn zero() -> Self {
        Self::default()
    }

    /// True when the result carries no cost at all ("insufficient input")
    pub fn is_empty(&self) -> bool {
        self.total == 0.0 && self.subtotal == 0.0 && self.quantities.total_steel_kg == 0.0
    }

    /// Total markup (contingency + profit)
    pub fn markup(&self) -> f64 {
        round2(self.margins.contingency_amount + self.margins.profit_amount)
    }
}

/// Compute a quote.
///
/// Never fails and never panics on odd numbers: every numeric field of both
/// arguments is coerced to a finite, non-negative, bounded value first, so
/// every field of the result is finite. Safe to call from any number of
/// threads; nothing is shared or mutated.
///
/// # Arguments
///
/// * `input` - Building geometry and feature selections
/// * `config` - Unit prices, margins and weight tables (already resolved
///   against defaults by the caller; absent prices count as zero here)
pub fn compute_quote(input: &QuotationInput, config: &PriceConfig) -> QuoteResult {
    let input = input.sanitized();
    let config = config.sanitized();

    let d = &input.dimensions;
    if d.width_m <= 0.0 || d.length_m <= 0.0 {
        tracing::debug!(
            width_m = d.width_m,
            length_m = d.length_m,
            "zero footprint, returning empty quote"
        );
        return QuoteResult::zero();
    }

    let takeoff = takeoff::takeoff(&input, &config.weight_tables);
    let lines = costing::price_lines(&takeoff, &input, &config);
    let breakdown = lines.breakdown();
    let subtotal = breakdown.subtotal();
    let (margins, total) =
        margins::apply_margins(subtotal, config.contingency_pct, config.profit_pct);

    tracing::debug!(
        width_m = d.width_m,
        length_m = d.length_m,
        frames = takeoff.frame_count,
        steel_kg = takeoff.total_steel_kg().0,
        subtotal,
        total,
        "quote computed"
    );

    QuoteResult {
        total: round2(total),
        subtotal: round2(subtotal),
        breakdown: breakdown.rounded(),
        lines: lines.rounded(),
        quantities: Quantities::from_takeoff(&takeoff),
        margins: margins.rounded(),
    }
}
