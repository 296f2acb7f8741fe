//! # quote_core - Metal Building Quotation Engine
//!
//! `quote_core` prices a steel-frame building (shed, warehouse, industrial
//! hall) from its geometry and a handful of feature toggles. Given a
//! [`QuotationInput`] and a [`PriceConfig`], [`compute_quote`] returns an
//! itemized [`QuoteResult`]: quantities, six cost categories, subtotal,
//! contingency and profit, and total.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: One pure function; no I/O, no shared state
//! - **Total**: Odd numbers are sanitized, never rejected; a zero footprint yields a zero quote
//! - **JSON-First**: Every input and output type implements Serialize/Deserialize
//! - **Lenient decoding**: Numbers, numeric strings and garbage all decode
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::{compute_quote, resolve_price_config, PriceConfig, QuotationInput};
//!
//! // No stored prices yet: everything comes from the reference defaults
//! let prices = resolve_price_config(None, &PriceConfig::reference());
//!
//! let input = QuotationInput::with_dimensions(20.0, 30.0, 5.0, 10.0);
//! let result = compute_quote(&input, &prices.config);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"breakdown\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The engine: takeoff, costing, margins
//! - [`input`] - Quotation input model
//! - [`pricing`] - Price configuration and resolution over defaults
//! - [`materials`] - Linear-weight tables and lookup
//! - [`history`] - Archive-ready quote records
//! - [`sanitize`] - Numeric coercion and lenient serde helpers
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON reading helpers

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod history;
pub mod input;
pub mod materials;
pub mod pricing;
pub mod sanitize;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute_quote, CostBreakdown, Quantities, QuoteResult};
pub use errors::{CoreResult, QuoteError};
pub use history::QuoteRecord;
pub use input::QuotationInput;
pub use pricing::{
    resolve_price_config, PriceConfig, PriceSource, ResolvedPriceConfig, StoredPriceConfig,
};
