//! # File I/O Module
//!
//! Read-only JSON helpers for the collaborators around the engine: a
//! quotation input captured by some form, a stored price file, an archived
//! history record. Writing and storage belong to the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::{load_quotation_input, load_stored_prices};
//! use quote_core::pricing::{resolve_price_config, PriceConfig};
//! use quote_core::calculations::compute_quote;
//! use std::path::Path;
//!
//! let input = load_quotation_input(Path::new("shed.json"))?;
//! let stored = load_stored_prices(Path::new("prices.json")).ok();
//! let resolved = resolve_price_config(stored.as_ref(), &PriceConfig::reference());
//!
//! let result = compute_quote(&input, &resolved.config);
//! println!("Total: {:.2}", result.total);
//! # Ok::<(), quote_core::errors::QuoteError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{CoreResult, QuoteError};
use crate::history::QuoteRecord;
use crate::input::QuotationInput;
use crate::pricing::StoredPriceConfig;

/// Read a file into a string.
fn read_to_string(path: &Path) -> CoreResult<String> {
    let mut file = File::open(path)
        .map_err(|e| QuoteError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| QuoteError::file_error("read", path.display().to_string(), e.to_string()))?;

    Ok(contents)
}

/// Read and decode any JSON document.
///
/// # Returns
///
/// * `Err(QuoteError::FileError)` - I/O error
/// * `Err(QuoteError::SerializationError)` - Invalid JSON or wrong shape
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        QuoteError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

/// Load a quotation input. Missing sections take their defaults.
pub fn load_quotation_input(path: &Path) -> CoreResult<QuotationInput> {
    let input: QuotationInput = read_json(path)?;
    tracing::debug!(path = %path.display(), "loaded quotation input");
    Ok(input)
}

/// Load a stored (partial) price configuration.
pub fn load_stored_prices(path: &Path) -> CoreResult<StoredPriceConfig> {
    let stored: StoredPriceConfig = read_json(path)?;
    tracing::debug!(path = %path.display(), "loaded stored prices");
    Ok(stored)
}

/// Load an archived history record, checking its schema version.
pub fn load_quote_record(path: &Path) -> CoreResult<QuoteRecord> {
    let contents = read_to_string(path)?;
    QuoteRecord::from_json(&contents)
}
