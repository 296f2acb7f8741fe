//! # Quotation Input
//!
//! The fully-populated structure an input collector hands to the engine.
//! One value per quote attempt; nothing here has identity.
//!
//! ## Structure
//!
//! ```text
//! QuotationInput
//! ├── dimensions: Dimensions (width, length, eave height, roof slope)
//! ├── columns / beams: MemberSpec (profile family, sub-type, fill, size label, manual kg/m)
//! ├── enclosure: Enclosure (wall cladding + insulation toggles)
//! ├── openings: Openings (industrial doors, emergency doors)
//! ├── roof_accessories: RoofAccessories (translucent panels, wind turbines)
//! ├── floor: ConcreteFloor (grade, slab thickness, soil study, street apron)
//! └── logistics: Logistics (distance, lifting equipment)
//! ```
//!
//! Every numeric field decodes leniently (see [`crate::sanitize`]) and every
//! section is optional in JSON, so a partially filled form still decodes.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "dimensions": { "width_m": 20.0, "length_m": 30.0, "eave_height_m": 5.0, "slope_pct": 10.0 },
//!   "columns": { "kind": "Tube", "size_label": "150x150" },
//!   "beams": { "kind": "SolidWeb", "sub_type": "IPN", "size_label": "IPN 300" },
//!   "enclosure": { "lateral": { "enabled": true, "cladding": "T-101" } },
//!   "logistics": { "distance_km": 120.0, "lifting_equipment": true }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::sanitize::{
    bounded, lenient_f64, lenient_u32, parse_leading_number, MAX_AMOUNT, MAX_LENGTH, MAX_SLOPE_PCT,
};
use crate::units::{Centimeters, Meters};

/// Slab thickness used when the thickness label carries no usable number
pub const DEFAULT_SLAB_THICKNESS_CM: f64 = 15.0;

/// Labels that mark an insulation product as a fireproof panel
const FIREPROOF_MARKERS: [&str; 3] = ["fireproof", "ignífugo", "ignifugo"];

// ============================================================================
// Root input
// ============================================================================

/// Everything the engine needs to know about the building.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationInput {
    /// Overall geometry
    pub dimensions: Dimensions,

    /// Primary columns
    pub columns: ColumnSpec,

    /// Roof beams (rafters)
    pub beams: BeamSpec,

    /// Wall cladding and insulation selections
    pub enclosure: Enclosure,

    /// Doors
    pub openings: Openings,

    /// Roof-mounted accessories
    pub roof_accessories: RoofAccessories,

    /// Concrete floor and civil works
    pub floor: ConcreteFloor,

    /// Transport and lifting
    pub logistics: Logistics,
}

impl QuotationInput {
    /// Create an input with the given geometry and every feature disabled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quote_core::input::QuotationInput;
    ///
    /// let input = QuotationInput::with_dimensions(20.0, 30.0, 5.0, 10.0);
    /// assert_eq!(input.dimensions.length_m, 30.0);
    /// assert!(!input.floor.enabled);
    /// ```
    pub fn with_dimensions(
        width_m: f64,
        length_m: f64,
        eave_height_m: f64,
        slope_pct: f64,
    ) -> Self {
        QuotationInput {
            dimensions: Dimensions {
                width_m,
                length_m,
                eave_height_m,
                slope_pct,
            },
            ..Default::default()
        }
    }

    /// Return a copy with every numeric field coerced to a finite, non-negative
    /// value and clamped to the limits in [`crate::sanitize`].
    pub fn sanitized(&self) -> Self {
        let mut input = self.clone();
        let length = |v: f64| bounded(v, MAX_LENGTH);

        let d = &mut input.dimensions;
        d.width_m = length(d.width_m);
        d.length_m = length(d.length_m);
        d.eave_height_m = length(d.eave_height_m);
        d.slope_pct = bounded(d.slope_pct, MAX_SLOPE_PCT);

        input.columns.manual_kg_per_m = bounded(input.columns.manual_kg_per_m, MAX_AMOUNT);
        input.beams.manual_kg_per_m = bounded(input.beams.manual_kg_per_m, MAX_AMOUNT);

        let doors = &mut input.openings.industrial_doors;
        doors.width_m = length(doors.width_m);
        doors.height_m = length(doors.height_m);

        let apron = &mut input.floor.street_apron;
        apron.distance_m = length(apron.distance_m);
        input.logistics.distance_km = length(input.logistics.distance_km);

        input
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Building geometry in meters; roof slope as a percentage grade.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    /// Transverse span (m)
    #[serde(deserialize_with = "lenient_f64")]
    pub width_m: f64,

    /// Length along the ridge (m)
    #[serde(deserialize_with = "lenient_f64")]
    pub length_m: f64,

    /// Column height up to the eave (m)
    #[serde(deserialize_with = "lenient_f64")]
    pub eave_height_m: f64,

    /// Roof grade in percent (10 = 10 %)
    #[serde(deserialize_with = "lenient_f64")]
    pub slope_pct: f64,
}

// ============================================================================
// Structural members
// ============================================================================

/// Profile family used to pick a weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileFamily {
    /// Rolled solid-web profile (IPN or W)
    SolidWeb,
    /// Built-up truss member
    Lattice,
    /// Tubular section
    Tube,
    /// Cold-formed channel ("C" profile)
    ChannelProfile,
}

/// Column profile family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnType {
    #[default]
    #[serde(alias = "Alma llena")]
    SolidWeb,
    #[serde(alias = "Reticulado")]
    Lattice,
    #[serde(alias = "Tubo")]
    Tube,
    #[serde(alias = "Perfil C")]
    ChannelProfile,
}

/// Beam profile family (tubes are not offered for beams).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BeamType {
    #[default]
    #[serde(alias = "Alma llena")]
    SolidWeb,
    #[serde(alias = "Reticulado")]
    Lattice,
    #[serde(alias = "Perfil C")]
    ChannelProfile,
}

impl From<ColumnType> for ProfileFamily {
    fn from(kind: ColumnType) -> Self {
        match kind {
            ColumnType::SolidWeb => ProfileFamily::SolidWeb,
            ColumnType::Lattice => ProfileFamily::Lattice,
            ColumnType::Tube => ProfileFamily::Tube,
            ColumnType::ChannelProfile => ProfileFamily::ChannelProfile,
        }
    }
}

impl From<BeamType> for ProfileFamily {
    fn from(kind: BeamType) -> Self {
        match kind {
            BeamType::SolidWeb => ProfileFamily::SolidWeb,
            BeamType::Lattice => ProfileFamily::Lattice,
            BeamType::ChannelProfile => ProfileFamily::ChannelProfile,
        }
    }
}

/// Rolled profile series for solid-web members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProfileSubtype {
    #[default]
    #[serde(rename = "IPN")]
    Ipn,
    W,
}

/// Fill material of a lattice member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatticeFill {
    #[serde(alias = "Angulo")]
    Angle,
    #[serde(alias = "Hierro Redondo")]
    RoundBar,
    #[serde(alias = "Perfil C")]
    ChannelProfile,
}

impl LatticeFill {
    /// Suffix used in compound lattice weight-table keys (`"500 mm_Angulo"`)
    pub fn table_key(&self) -> &'static str {
        match self {
            LatticeFill::Angle => "Angulo",
            LatticeFill::RoundBar => "Hierro Redondo",
            LatticeFill::ChannelProfile => "Perfil C",
        }
    }
}

/// Selection for one structural member group (columns or beams).
///
/// `sub_type` only matters for solid-web members and `lattice_fill` only for
/// lattice members. A positive `manual_kg_per_m` bypasses table lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberSpec<K> {
    /// Profile family
    pub kind: K,

    /// IPN or W series (solid-web only); IPN when absent
    pub sub_type: Option<ProfileSubtype>,

    /// Fill material (lattice only)
    pub lattice_fill: Option<LatticeFill>,

    /// Size label, the key into the weight tables (e.g. "IPN 300")
    pub size_label: String,

    /// Manually entered linear weight (kg/m); zero means "use the tables"
    #[serde(deserialize_with = "lenient_f64")]
    pub manual_kg_per_m: f64,
}

/// Column selection
pub type ColumnSpec = MemberSpec<ColumnType>;

/// Beam selection
pub type BeamSpec = MemberSpec<BeamType>;

impl<K: Copy + Into<ProfileFamily>> MemberSpec<K> {
    /// Profile family of this member
    pub fn family(&self) -> ProfileFamily {
        self.kind.into()
    }
}

// ============================================================================
// Enclosure
// ============================================================================

/// Cladding sheet profile. Recorded for presentation; price is the same for all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CladdingProfile {
    #[default]
    #[serde(rename = "T-101", alias = "T101")]
    T101,
    Sinusoidal,
    #[serde(alias = "Prepintada")]
    Prepainted,
}

/// Cladding toggle for a pair of walls.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallCladding {
    pub enabled: bool,
    pub cladding: CladdingProfile,
}

/// Insulation toggle for the roof or a pair of walls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsulationOption {
    pub enabled: bool,

    /// Free-text product label (e.g. "Bubble 10mm", "Fireproof panel")
    pub insulation_type: String,
}

impl InsulationOption {
    /// Whether the selected product is a fireproof panel (case-insensitive)
    pub fn is_fireproof(&self) -> bool {
        let label = self.insulation_type.to_lowercase();
        FIREPROOF_MARKERS.iter().any(|marker| label.contains(marker))
    }
}

/// Wall cladding and insulation selections.
///
/// The roof is always clad; only its insulation is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Enclosure {
    /// The two long side walls
    pub lateral: WallCladding,

    /// The front and back gable walls
    pub front_back: WallCladding,

    pub roof_insulation: InsulationOption,
    pub lateral_insulation: InsulationOption,
    pub front_back_insulation: InsulationOption,
}

// ============================================================================
// Openings and accessories
// ============================================================================

/// A toggle with a unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CountedOption {
    pub enabled: bool,
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
}

impl CountedOption {
    /// Units that actually count toward cost (zero unless enabled)
    pub fn active_count(&self) -> u32 {
        if self.enabled {
            self.count
        } else {
            0
        }
    }
}

/// Industrial (sectional/rolling) doors cut out of the wall cladding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustrialDoors {
    pub enabled: bool,
    #[serde(deserialize_with = "lenient_u32")]
    pub count: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub width_m: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub height_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Openings {
    pub industrial_doors: IndustrialDoors,
    pub emergency_doors: CountedOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofAccessories {
    pub translucent_panels: CountedOption,
    pub wind_turbines: CountedOption,
}

// ============================================================================
// Concrete floor
// ============================================================================

/// Concrete grade of the floor slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConcreteGrade {
    /// H21, light duty
    #[default]
    #[serde(alias = "H21", alias = "H21 (Liviano)")]
    Light,
    /// H30, industrial duty
    #[serde(alias = "H30", alias = "H30 (Industrial)")]
    Industrial,
}

/// Surface finish. Recorded for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FloorFinish {
    #[default]
    #[serde(alias = "Llaneado Mecánico")]
    MechanicalTrowel,
    #[serde(alias = "Rodillado")]
    Rolled,
    #[serde(alias = "Sin terminación")]
    Unfinished,
}

/// Concrete access apron from the street, fixed 6 m wide.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetApron {
    pub enabled: bool,
    #[serde(deserialize_with = "lenient_f64")]
    pub distance_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcreteFloor {
    pub enabled: bool,
    pub grade: ConcreteGrade,

    /// Slab thickness label, e.g. "15 cm"
    pub thickness_label: String,

    pub finish: FloorFinish,

    /// Soil study (flat fee, independent of the floor toggle)
    pub soil_study: bool,

    pub street_apron: StreetApron,
}

impl Default for ConcreteFloor {
    fn default() -> Self {
        ConcreteFloor {
            enabled: false,
            grade: ConcreteGrade::Light,
            thickness_label: format!("{DEFAULT_SLAB_THICKNESS_CM} cm"),
            finish: FloorFinish::MechanicalTrowel,
            soil_study: false,
            street_apron: StreetApron::default(),
        }
    }
}

impl ConcreteFloor {
    /// Slab thickness parsed from the label (centimeters), 15 cm when unusable.
    pub fn slab_thickness(&self) -> Meters {
        let cm = parse_leading_number(&self.thickness_label)
            .filter(|cm| *cm > 0.0)
            .map_or(DEFAULT_SLAB_THICKNESS_CM, |cm| cm.min(MAX_LENGTH * 100.0));
        Centimeters(cm).into()
    }
}

// ============================================================================
// Logistics
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Logistics {
    /// Round-trip distance to site (km)
    #[serde(deserialize_with = "lenient_f64")]
    pub distance_km: f64,

    /// Crane / lifting equipment hire
    pub lifting_equipment: bool,
}
