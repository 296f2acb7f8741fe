//! # Price Configuration
//!
//! Unit prices, margins and weight tables for one quote.
//!
//! Two shapes exist:
//!
//! - [`StoredPriceConfig`] is what a settings screen persists: a flat record
//!   where every field may be absent, blank, zero or non-numeric.
//! - [`PriceConfig`] is what the engine consumes: every field populated.
//!
//! [`resolve_price_config`] turns the first into the second by taking each
//! stored value only when it is present and strictly positive, and the
//! reference default otherwise. The engine never applies domain defaults
//! itself; inside [`crate::calculations::compute_quote`] an absent price is
//! simply zero.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::pricing::{resolve_price_config, PriceConfig, PriceSource, StoredPriceConfig};
//!
//! let stored: StoredPriceConfig =
//!     serde_json::from_str(r#"{ "steel_structural": "4.10", "cladding": "", "profit_pct": 0 }"#)
//!         .unwrap();
//! let resolved = resolve_price_config(Some(&stored), &PriceConfig::reference());
//!
//! assert_eq!(resolved.source, PriceSource::Stored);
//! assert_eq!(resolved.config.steel_structural, 4.10);
//! assert_eq!(resolved.config.cladding, 18.0); // blank → reference
//! assert_eq!(resolved.config.profit_pct, 25.0); // zero → reference
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::materials::WeightTables;
use crate::sanitize::{bounded, lenient_f64, lenient_opt_f64, lenient_opt_table, MAX_AMOUNT};

/// Unit prices (USD), margins (percent) and weight tables consumed by the engine.
///
/// ## JSON Example
///
/// ```json
/// {
///   "steel": 3.5, "steel_structural": 3.5, "steel_tubular": 3.8,
///   "cladding": 18.0, "insulation": 12.0, "fireproof_panel": 45.0,
///   "contingency_pct": 5.0, "profit_pct": 25.0,
///   "weight_tables": { "ipn": { "IPN 300": 54.2 }, "tube": { "150x150": 15.0 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    // --- Steel (USD/kg) ---
    /// Generic steel price, used when a specific steel price is zero
    #[serde(deserialize_with = "lenient_f64")]
    pub steel: f64,
    /// Rolled/structural steel, also used for beams and purlins
    #[serde(deserialize_with = "lenient_f64")]
    pub steel_structural: f64,
    /// Tubular steel (tube columns only)
    #[serde(deserialize_with = "lenient_f64")]
    pub steel_tubular: f64,

    // --- Envelope (USD/m²) ---
    #[serde(deserialize_with = "lenient_f64")]
    pub cladding: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub insulation: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub fireproof_panel: f64,

    // --- Accessories (USD/unit, soil study flat) ---
    #[serde(deserialize_with = "lenient_f64")]
    pub wind_turbine: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub translucent_panel: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub emergency_door: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub soil_study: f64,

    // --- Civil works ---
    /// H21 concrete (USD/m³)
    #[serde(deserialize_with = "lenient_f64")]
    pub concrete_light: f64,
    /// H30 concrete (USD/m³)
    #[serde(deserialize_with = "lenient_f64")]
    pub concrete_industrial: f64,
    /// Top reinforcement mesh (USD/m²)
    #[serde(deserialize_with = "lenient_f64")]
    pub top_mesh: f64,

    // --- Labor and overhead ---
    /// Fastener allowance (flat)
    #[serde(deserialize_with = "lenient_f64")]
    pub fasteners: f64,
    /// Sealants and flashing (USD per meter of perimeter)
    #[serde(deserialize_with = "lenient_f64")]
    pub sealants_per_m: f64,
    /// Shop fabrication (USD/kg of steel)
    #[serde(deserialize_with = "lenient_f64")]
    pub fabrication_per_kg: f64,
    /// Erection (USD/m² of footprint)
    #[serde(deserialize_with = "lenient_f64")]
    pub erection_per_m2: f64,
    /// Engineering and drawings (flat)
    #[serde(deserialize_with = "lenient_f64")]
    pub engineering: f64,
    /// Paint/treatment (USD/m² of cladding)
    #[serde(deserialize_with = "lenient_f64")]
    pub paint_per_m2: f64,
    /// Lifting equipment hire (flat)
    #[serde(deserialize_with = "lenient_f64")]
    pub lifting_equipment: f64,
    /// Freight (USD/km)
    #[serde(deserialize_with = "lenient_f64")]
    pub freight_per_km: f64,
    /// Crew per-diem (flat)
    #[serde(deserialize_with = "lenient_f64")]
    pub per_diem: f64,

    // --- Margins (percent) ---
    #[serde(deserialize_with = "lenient_f64")]
    pub contingency_pct: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub profit_pct: f64,

    /// Steel profile weight tables
    pub weight_tables: WeightTables,
}

impl PriceConfig {
    /// Reference prices used when nothing (or nothing usable) is stored.
    pub fn reference() -> Self {
        PriceConfig {
            steel: 3.50,
            steel_structural: 3.50,
            steel_tubular: 3.50,
            cladding: 18.00,
            insulation: 12.00,
            fireproof_panel: 45.00,
            wind_turbine: 150.00,
            translucent_panel: 35.00,
            emergency_door: 400.00,
            soil_study: 300.00,
            concrete_light: 140.00,
            concrete_industrial: 160.00,
            top_mesh: 8.00,
            fasteners: 500.00,
            sealants_per_m: 5.00,
            fabrication_per_kg: 1.50,
            erection_per_m2: 25.00,
            engineering: 600.00,
            paint_per_m2: 4.00,
            lifting_equipment: 800.00,
            freight_per_km: 2.50,
            per_diem: 300.00,
            contingency_pct: 5.0,
            profit_pct: 25.0,
            weight_tables: WeightTables::default(),
        }
    }

    /// Structural steel price, falling back to the generic steel price when zero
    pub fn structural_steel_price(&self) -> f64 {
        if self.steel_structural > 0.0 {
            self.steel_structural
        } else {
            self.steel
        }
    }

    /// Tubular steel price, falling back to the generic steel price when zero
    pub fn tubular_steel_price(&self) -> f64 {
        if self.steel_tubular > 0.0 {
            self.steel_tubular
        } else {
            self.steel
        }
    }

    /// Return a copy with every numeric field finite, non-negative and at most
    /// [`MAX_AMOUNT`].
    pub fn sanitized(&self) -> Self {
        let f = |value: f64| bounded(value, MAX_AMOUNT);
        PriceConfig {
            steel: f(self.steel),
            steel_structural: f(self.steel_structural),
            steel_tubular: f(self.steel_tubular),
            cladding: f(self.cladding),
            insulation: f(self.insulation),
            fireproof_panel: f(self.fireproof_panel),
            wind_turbine: f(self.wind_turbine),
            translucent_panel: f(self.translucent_panel),
            emergency_door: f(self.emergency_door),
            soil_study: f(self.soil_study),
            concrete_light: f(self.concrete_light),
            concrete_industrial: f(self.concrete_industrial),
            top_mesh: f(self.top_mesh),
            fasteners: f(self.fasteners),
            sealants_per_m: f(self.sealants_per_m),
            fabrication_per_kg: f(self.fabrication_per_kg),
            erection_per_m2: f(self.erection_per_m2),
            engineering: f(self.engineering),
            paint_per_m2: f(self.paint_per_m2),
            lifting_equipment: f(self.lifting_equipment),
            freight_per_km: f(self.freight_per_km),
            per_diem: f(self.per_diem),
            contingency_pct: f(self.contingency_pct),
            profit_pct: f(self.profit_pct),
            weight_tables: self.weight_tables.sanitized(),
        }
    }
}

/// Persisted price settings. Every field is optional and decoded leniently.
///
/// Field names match [`PriceConfig`]; the camel-case names written by the
/// earlier settings screen are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredPriceConfig {
    #[serde(alias = "precioAcero", deserialize_with = "lenient_opt_f64")]
    pub steel: Option<f64>,
    #[serde(alias = "precioAceroEstructural", deserialize_with = "lenient_opt_f64")]
    pub steel_structural: Option<f64>,
    #[serde(alias = "precioAceroTubular", deserialize_with = "lenient_opt_f64")]
    pub steel_tubular: Option<f64>,
    #[serde(alias = "precioChapa", deserialize_with = "lenient_opt_f64")]
    pub cladding: Option<f64>,
    #[serde(alias = "precioAislacion", deserialize_with = "lenient_opt_f64")]
    pub insulation: Option<f64>,
    #[serde(
        alias = "precioPanelIgnifugo",
        alias = "precioIgnifugo",
        deserialize_with = "lenient_opt_f64"
    )]
    pub fireproof_panel: Option<f64>,
    #[serde(alias = "precioEolico", deserialize_with = "lenient_opt_f64")]
    pub wind_turbine: Option<f64>,
    #[serde(
        alias = "precioChapaTraslucida",
        alias = "precioTraslucida",
        deserialize_with = "lenient_opt_f64"
    )]
    pub translucent_panel: Option<f64>,
    #[serde(alias = "precioPuertaEmergencia", deserialize_with = "lenient_opt_f64")]
    pub emergency_door: Option<f64>,
    #[serde(alias = "precioEstudioSuelo", deserialize_with = "lenient_opt_f64")]
    pub soil_study: Option<f64>,
    #[serde(alias = "precioHormigonH21", deserialize_with = "lenient_opt_f64")]
    pub concrete_light: Option<f64>,
    #[serde(alias = "precioHormigonH30", deserialize_with = "lenient_opt_f64")]
    pub concrete_industrial: Option<f64>,
    #[serde(alias = "precioMallaCima", deserialize_with = "lenient_opt_f64")]
    pub top_mesh: Option<f64>,
    #[serde(alias = "tornilleriaFijaciones", deserialize_with = "lenient_opt_f64")]
    pub fasteners: Option<f64>,
    #[serde(alias = "selladoresZingueria", deserialize_with = "lenient_opt_f64")]
    pub sealants_per_m: Option<f64>,
    #[serde(alias = "manoObraFabricacion", deserialize_with = "lenient_opt_f64")]
    pub fabrication_per_kg: Option<f64>,
    #[serde(alias = "montajeEstructura", deserialize_with = "lenient_opt_f64")]
    pub erection_per_m2: Option<f64>,
    #[serde(alias = "ingenieriaPlanos", deserialize_with = "lenient_opt_f64")]
    pub engineering: Option<f64>,
    #[serde(alias = "pinturaTratamiento", deserialize_with = "lenient_opt_f64")]
    pub paint_per_m2: Option<f64>,
    #[serde(alias = "mediosElevacion", deserialize_with = "lenient_opt_f64")]
    pub lifting_equipment: Option<f64>,
    #[serde(alias = "logisticaFletes", deserialize_with = "lenient_opt_f64")]
    pub freight_per_km: Option<f64>,
    #[serde(alias = "viaticos", deserialize_with = "lenient_opt_f64")]
    pub per_diem: Option<f64>,
    #[serde(alias = "imprevistosContingencia", deserialize_with = "lenient_opt_f64")]
    pub contingency_pct: Option<f64>,
    #[serde(alias = "margenGanancia", deserialize_with = "lenient_opt_f64")]
    pub profit_pct: Option<f64>,

    #[serde(alias = "pesosIPN", deserialize_with = "lenient_opt_table")]
    pub ipn_weights: Option<BTreeMap<String, f64>>,
    #[serde(alias = "pesosW", deserialize_with = "lenient_opt_table")]
    pub w_weights: Option<BTreeMap<String, f64>>,
    #[serde(alias = "pesosTubo", deserialize_with = "lenient_opt_table")]
    pub tube_weights: Option<BTreeMap<String, f64>>,
    #[serde(alias = "pesosPerfilC", deserialize_with = "lenient_opt_table")]
    pub channel_weights: Option<BTreeMap<String, f64>>,
    #[serde(alias = "pesosReticulado", deserialize_with = "lenient_opt_table")]
    pub lattice_weights: Option<BTreeMap<String, f64>>,
}

/// Where the resolved prices came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// A stored configuration existed (individual fields may still have defaulted)
    Stored,
    /// Nothing was stored; every value is a reference default
    ReferenceDefaults,
}

/// Outcome of [`resolve_price_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPriceConfig {
    pub config: PriceConfig,
    pub source: PriceSource,
    /// Names of stored fields that were unusable and replaced by a default
    pub defaulted_fields: Vec<&'static str>,
}

/// Merge stored settings over reference defaults.
///
/// Pure: no storage access. A stored number is used only when present and
/// strictly positive. Stored weight tables replace the default tables.
pub fn resolve_price_config(
    stored: Option<&StoredPriceConfig>,
    defaults: &PriceConfig,
) -> ResolvedPriceConfig {
    let Some(stored) = stored else {
        tracing::info!("no stored prices, using reference defaults");
        return ResolvedPriceConfig {
            config: defaults.clone(),
            source: PriceSource::ReferenceDefaults,
            defaulted_fields: Vec::new(),
        };
    };

    let mut defaulted_fields = Vec::new();
    let mut pick = |name: &'static str, value: Option<f64>, default: f64| match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(_) => {
            defaulted_fields.push(name);
            default
        }
        None => default,
    };

    let config = PriceConfig {
        steel: pick("steel", stored.steel, defaults.steel),
        steel_structural: pick(
            "steel_structural",
            stored.steel_structural,
            defaults.steel_structural,
        ),
        steel_tubular: pick("steel_tubular", stored.steel_tubular, defaults.steel_tubular),
        cladding: pick("cladding", stored.cladding, defaults.cladding),
        insulation: pick("insulation", stored.insulation, defaults.insulation),
        fireproof_panel: pick("fireproof_panel", stored.fireproof_panel, defaults.fireproof_panel),
        wind_turbine: pick("wind_turbine", stored.wind_turbine, defaults.wind_turbine),
        translucent_panel: pick(
            "translucent_panel",
            stored.translucent_panel,
            defaults.translucent_panel,
        ),
        emergency_door: pick("emergency_door", stored.emergency_door, defaults.emergency_door),
        soil_study: pick("soil_study", stored.soil_study, defaults.soil_study),
        concrete_light: pick("concrete_light", stored.concrete_light, defaults.concrete_light),
        concrete_industrial: pick(
            "concrete_industrial",
            stored.concrete_industrial,
            defaults.concrete_industrial,
        ),
        top_mesh: pick("top_mesh", stored.top_mesh, defaults.top_mesh),
        fasteners: pick("fasteners", stored.fasteners, defaults.fasteners),
        sealants_per_m: pick("sealants_per_m", stored.sealants_per_m, defaults.sealants_per_m),
        fabrication_per_kg: pick(
            "fabrication_per_kg",
            stored.fabrication_per_kg,
            defaults.fabrication_per_kg,
        ),
        erection_per_m2: pick("erection_per_m2", stored.erection_per_m2, defaults.erection_per_m2),
        engineering: pick("engineering", stored.engineering, defaults.engineering),
        paint_per_m2: pick("paint_per_m2", stored.paint_per_m2, defaults.paint_per_m2),
        lifting_equipment: pick(
            "lifting_equipment",
            stored.lifting_equipment,
            defaults.lifting_equipment,
        ),
        freight_per_km: pick("freight_per_km", stored.freight_per_km, defaults.freight_per_km),
        per_diem: pick("per_diem", stored.per_diem, defaults.per_diem),
        contingency_pct: pick("contingency_pct", stored.contingency_pct, defaults.contingency_pct),
        profit_pct: pick("profit_pct", stored.profit_pct, defaults.profit_pct),
        weight_tables: WeightTables {
            ipn: stored.ipn_weights.clone().unwrap_or_else(|| defaults.weight_tables.ipn.clone()),
            w: stored.w_weights.clone().unwrap_or_else(|| defaults.weight_tables.w.clone()),
            tube: stored
                .tube_weights
                .clone()
                .unwrap_or_else(|| defaults.weight_tables.tube.clone()),
            channel: stored
                .channel_weights
                .clone()
                .unwrap_or_else(|| defaults.weight_tables.channel.clone()),
            lattice: stored
                .lattice_weights
                .clone()
                .unwrap_or_else(|| defaults.weight_tables.lattice.clone()),
        },
    };

    if !defaulted_fields.is_empty() {
        tracing::warn!(
            fields = ?defaulted_fields,
            "stored prices not usable, reference defaults applied"
        );
    }

    ResolvedPriceConfig {
        config,
        source: PriceSource::Stored,
        defaulted_fields,
    }
}
