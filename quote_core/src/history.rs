//! # Quote History Records
//!
//! The archive-ready shape of a finished quote. Storing records is left to
//! the caller; this module only builds them and moves them in and out of JSON.
//!
//! ## Structure
//!
//! ```text
//! QuoteRecord
//! ├── id: Uuid (v4, assigned on creation)
//! ├── project_name: String ("Untitled project" when blank)
//! ├── created: DateTime<Utc>
//! ├── schema_version: String
//! ├── input: QuotationInput (everything needed to recompute)
//! └── result: QuoteResult (the figures as quoted)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::compute_quote;
//! use quote_core::history::QuoteRecord;
//! use quote_core::input::QuotationInput;
//! use quote_core::pricing::PriceConfig;
//!
//! let input = QuotationInput::with_dimensions(12.0, 24.0, 4.5, 15.0);
//! let result = compute_quote(&input, &PriceConfig::reference());
//! let record = QuoteRecord::new("Galpón Norte", input, result);
//!
//! let json = record.to_json().unwrap();
//! let restored = QuoteRecord::from_json(&json).unwrap();
//! assert_eq!(restored.id, record.id);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{compute_quote, QuoteResult};
use crate::errors::{CoreResult, QuoteError};
use crate::input::QuotationInput;
use crate::pricing::PriceConfig;

/// Current schema version for archived records
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Name given to records saved without one
pub const UNTITLED_PROJECT: &str = "Untitled project";

/// One archived quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: Uuid,

    pub project_name: String,

    /// When the quote was produced
    pub created: DateTime<Utc>,

    /// Schema version (for migration compatibility)
    pub schema_version: String,

    pub input: QuotationInput,

    pub result: QuoteResult,
}

/// Only the version field, read before committing to the full shape
#[derive(Deserialize)]
struct RecordHeader {
    schema_version: String,
}

impl QuoteRecord {
    /// Wrap a computed quote for archiving.
    ///
    /// ```rust
    /// use quote_core::history::{QuoteRecord, UNTITLED_PROJECT};
    /// use quote_core::calculations::QuoteResult;
    /// use quote_core::input::QuotationInput;
    ///
    /// let record = QuoteRecord::new("   ", QuotationInput::default(), QuoteResult::zero());
    /// assert_eq!(record.project_name, UNTITLED_PROJECT);
    /// ```
    pub fn new(
        project_name: impl Into<String>,
        input: QuotationInput,
        result: QuoteResult,
    ) -> Self {
        let name = project_name.into();
        let trimmed = name.trim();
        let project_name = if trimmed.is_empty() {
            UNTITLED_PROJECT.to_string()
        } else {
            trimmed.to_string()
        };

        QuoteRecord {
            id: Uuid::new_v4(),
            project_name,
            created: Utc::now(),
            schema_version: SCHEMA_VERSION.to_string(),
            input,
            result,
        }
    }

    /// Re-run the engine on the archived input with a (possibly newer) price config.
    pub fn recompute(&self, config: &PriceConfig) -> QuoteResult {
        compute_quote(&self.input, config)
    }

    /// Pretty JSON for the archive
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(QuoteError::serialization)
    }

    /// Decode an archived record, rejecting incompatible schema versions.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let header: RecordHeader = serde_json::from_str(json).map_err(QuoteError::serialization)?;
        validate_version(&header.schema_version)?;

        serde_json::from_str(json).map_err(QuoteError::serialization)
    }
}

/// Validate that a record version is compatible with the current schema.
///
/// The major version must match; on 0.x the record's minor may not be newer
/// than ours.
pub fn validate_version(record_version: &str) -> CoreResult<()> {
    let mismatch = || QuoteError::VersionMismatch {
        record_version: record_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let record_parts: Vec<u32> = record_version
        .split('.')
        .filter_map(|p| p.trim().parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if record_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    if record_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 && record_parts.len() > 1 && current_parts.len() > 1 {
        if record_parts[1] > current_parts[1] {
            tracing::warn!(record_version, "record written by a newer schema");
            return Err(mismatch());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::WeightTableKind;

    fn sample_record() -> QuoteRecord {
        let mut input = QuotationInput::with_dimensions(20.0, 30.0, 5.0, 10.0);
        input.columns.size_label = "IPN 200".to_string();
        let mut config = PriceConfig::reference();
        config.weight_tables =
            config.weight_tables.with_entry(WeightTableKind::Ipn, "IPN 200", 26.2);
        let result = compute_quote(&input, &config);
        QuoteRecord::new("Nave Industrial Sur", input, result)
    }

    #[test]
    fn test_record_creation() {
        let record = sample_record();
        assert_eq!(record.project_name, "Nave Industrial Sur");
        assert_eq!(record.schema_version, SCHEMA_VERSION);
        assert!(record.result.total > 0.0);
    }

    #[test]
    fn test_blank_name_defaults() {
        let record = QuoteRecord::new("", QuotationInput::default(), QuoteResult::zero());
        assert_eq!(record.project_name, UNTITLED_PROJECT);
    }

    #[test]
    fn test_unique_ids() {
        let a = QuoteRecord::new("A", QuotationInput::default(), QuoteResult::zero());
        let b = QuoteRecord::new("A", QuotationInput::default(), QuoteResult::zero());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_json_roundtrip() {
        let record = sample_record();
        let json = record.to_json().unwrap();
        assert!(json.contains("\"schema_version\": \"0.1.0\""));

        let restored = QuoteRecord::from_json(&json).unwrap();
        assert_eq!(restored.id, record.id);
        assert_eq!(restored.project_name, record.project_name);
        assert_eq!(restored.created, record.created);
        assert_eq!(restored.input, record.input);
        assert!((restored.result.total - record.result.total).abs() < 1e-6);
        assert_eq!(restored.result.quantities.frame_count, 7);
    }

    #[test]
    fn test_recompute_with_new_prices() {
        let record = sample_record();
        let mut config = PriceConfig::reference();
        config.weight_tables =
            config.weight_tables.with_entry(WeightTableKind::Ipn, "IPN 200", 26.2);

        assert_eq!(record.recompute(&config), record.result);

        config.steel_structural = 5.0;
        assert!(record.recompute(&config).total > record.result.total);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_from_json_rejects_newer_schema() {
        let mut record = sample_record();
        record.schema_version = "0.3.0".to_string();
        let json = serde_json::to_string(&record).unwrap();

        match QuoteRecord::from_json(&json) {
            Err(QuoteError::VersionMismatch { record_version, expected_version }) => {
                assert_eq!(record_version, "0.3.0");
                assert_eq!(expected_version, SCHEMA_VERSION);
            }
            other => panic!("expected VersionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = QuoteRecord::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
