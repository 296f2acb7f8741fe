//! # Materials Database
//!
//! Material data the engine reads during takeoff. Today that is the steel
//! profile weight tables; unit prices live in [`crate::pricing`].
//!
//! ## Example
//!
//! ```rust
//! use quote_core::input::{ColumnSpec, ColumnType};
//! use quote_core::materials::{resolve_linear_weight, WeightTableKind, WeightTables};
//!
//! let tables = WeightTables::new().with_entry(WeightTableKind::Tube, "150x150", 15.0);
//! let column = ColumnSpec {
//!     kind: ColumnType::Tube,
//!     size_label: "150x150".to_string(),
//!     ..Default::default()
//! };
//!
//! let weight = resolve_linear_weight(&column, &tables);
//! assert_eq!(weight.kg_per_m.0, 15.0);
//! ```

pub mod weight_tables;

pub use weight_tables::{
    resolve_linear_weight, LinearWeight, WeightSource, WeightTableKind, WeightTables,
    LATTICE_FALLBACK_KG_PER_M,
};
