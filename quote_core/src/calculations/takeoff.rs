//! # Quantity Takeoff
//!
//! Derives physical quantities from the building geometry and feature
//! selections: frames, member lengths, steel weights, envelope areas and
//! concrete volumes. No prices are involved here.
//!
//! ## Assumptions
//!
//! - Frames every 5 m along the length, plus one to close the far end
//! - One equivalent rafter per frame spanning the full width, stretched by
//!   the slope factor `sqrt(1 + (slope/100)²)`
//! - Purlins every 1.2 m across the width, running the full length, at a
//!   fixed 5 kg/m regardless of the primary profile choice
//! - Door openings reduce wall cladding, never below zero
//! - Insulation areas come from the geometry alone: openings are not
//!   deducted and the matching cladding toggle is not required
//! - The street apron is 6 m wide and uses the slab thickness

use serde::{Deserialize, Serialize};

use crate::input::QuotationInput;
use crate::materials::{resolve_linear_weight, LinearWeight, WeightTables};
use crate::units::{CubicMeters, KgPerMeter, Kilograms, Meters, SquareMeters};

/// Frame spacing along the building length (m)
pub const BAY_SPACING_M: f64 = 5.0;

/// Purlin spacing across the roof (m)
pub const PURLIN_SPACING_M: f64 = 1.2;

/// Linear weight assumed for every purlin (kg/m)
pub const PURLIN_KG_PER_M: f64 = 5.0;

/// Width of the concrete access apron (m)
pub const APRON_WIDTH_M: f64 = 6.0;

/// Unrounded quantities for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Takeoff {
    /// Number of transverse frames
    pub frame_count: u32,
    /// Rafter stretch factor from the roof grade
    pub slope_factor: f64,
    /// Rafter length per frame
    pub rafter_length: Meters,

    /// Total column length (two columns per frame)
    pub column_length: Meters,
    /// Total rafter length
    pub beam_length: Meters,
    pub column_weight: LinearWeight,
    pub beam_weight: LinearWeight,
    pub column_kg: Kilograms,
    pub beam_kg: Kilograms,

    pub purlin_rows: u32,
    pub purlin_length: Meters,
    pub purlin_kg: Kilograms,

    pub footprint: SquareMeters,
    pub perimeter: Meters,
    pub roof_area: SquareMeters,
    /// Enabled wall area before door openings
    pub gross_wall_area: SquareMeters,
    pub door_area: SquareMeters,
    /// Wall cladding area after door openings, clamped at zero
    pub net_wall_area: SquareMeters,

    pub roof_insulation_area: SquareMeters,
    pub lateral_insulation_area: SquareMeters,
    pub front_back_insulation_area: SquareMeters,

    pub slab_thickness: Meters,
    pub slab_volume: CubicMeters,
    pub apron_volume: CubicMeters,
}

impl Takeoff {
    /// Columns + beams + purlins
    pub fn total_steel_kg(&self) -> Kilograms {
        self.column_kg + self.beam_kg + self.purlin_kg
    }

    /// Roof area plus net wall area
    pub fn cladding_area(&self) -> SquareMeters {
        self.roof_area + self.net_wall_area
    }

    /// Sum of every enabled insulation area
    pub fn insulation_area(&self) -> SquareMeters {
        self.roof_insulation_area + self.lateral_insulation_area + self.front_back_insulation_area
    }

    /// Slab plus apron
    pub fn concrete_volume(&self) -> CubicMeters {
        self.slab_volume + self.apron_volume
    }
}

/// Slope factor for a roof grade in percent
pub fn slope_factor(slope_pct: f64) -> f64 {
    (1.0 + (slope_pct / 100.0).powi(2)).sqrt()
}

/// Frames needed for a building length: one per started bay, plus one.
/// Saturates at `u32::MAX`.
pub fn frame_count(length_m: f64) -> u32 {
    whole_count(length_m / BAY_SPACING_M).saturating_add(1)
}

/// Purlin rows needed across a roof width. Saturates at `u32::MAX`.
pub fn purlin_rows(width_m: f64) -> u32 {
    whole_count(width_m / PURLIN_SPACING_M)
}

/// Round a ratio up to a count; NaN and negatives give 0.
fn whole_count(ratio: f64) -> u32 {
    // `as` saturates at both ends and maps NaN to 0
    ratio.ceil() as u32
}

/// Run the takeoff. Expects sanitized input.
pub fn takeoff(input: &QuotationInput, tables: &WeightTables) -> Takeoff {
    let d = &input.dimensions;
    let width = Meters(d.width_m);
    let length = Meters(d.length_m);
    let eave = Meters(d.eave_height_m);

    // --- Frames and primary members ---
    let frames = frame_count(d.length_m);
    let slope = slope_factor(d.slope_pct);
    let rafter_length = width * slope;

    let column_length = eave * (2.0 * f64::from(frames));
    let beam_length = rafter_length * f64::from(frames);

    let column_weight = resolve_linear_weight(&input.columns, tables);
    let beam_weight = resolve_linear_weight(&input.beams, tables);
    let column_kg = column_length * column_weight.kg_per_m;
    let beam_kg = beam_length * beam_weight.kg_per_m;

    // --- Purlins ---
    let rows = purlin_rows(d.width_m);
    let purlin_length = length * f64::from(rows);
    let purlin_kg = purlin_length * KgPerMeter(PURLIN_KG_PER_M);

    // --- Envelope ---
    let footprint = width * length;
    let perimeter = (width + length) * 2.0;
    let roof_area = footprint * slope;

    let lateral_walls = length * eave * 2.0;
    let front_back_walls = width * eave * 2.0;

    let enclosure = &input.enclosure;
    let mut gross_wall_area = SquareMeters::default();
    if enclosure.lateral.enabled {
        gross_wall_area = gross_wall_area + lateral_walls;
    }
    if enclosure.front_back.enabled {
        gross_wall_area = gross_wall_area + front_back_walls;
    }

    let doors = &input.openings.industrial_doors;
    let door_area = if doors.enabled && doors.count > 0 {
        Meters(doors.width_m) * Meters(doors.height_m) * f64::from(doors.count)
    } else {
        SquareMeters::default()
    };
    let net_wall_area = gross_wall_area.saturating_sub(door_area);

    let area_if = |enabled: bool, area: SquareMeters| {
        if enabled {
            area
        } else {
            SquareMeters::default()
        }
    };
    let roof_insulation_area = area_if(enclosure.roof_insulation.enabled, roof_area);
    let lateral_insulation_area = area_if(enclosure.lateral_insulation.enabled, lateral_walls);
    let front_back_insulation_area =
        area_if(enclosure.front_back_insulation.enabled, front_back_walls);

    // --- Concrete ---
    let floor = &input.floor;
    let slab_thickness = floor.slab_thickness();
    let (slab_volume, apron_volume) = if floor.enabled {
        let slab = footprint * slab_thickness;
        let apron = if floor.street_apron.enabled {
            Meters(floor.street_apron.distance_m) * Meters(APRON_WIDTH_M) * slab_thickness
        } else {
            CubicMeters::default()
        };
        (slab, apron)
    } else {
        (CubicMeters::default(), CubicMeters::default())
    };

    Takeoff {
        frame_count: frames,
        slope_factor: slope,
        rafter_length,
        column_length,
        beam_length,
        column_weight,
        beam_weight,
        column_kg,
        beam_kg,
        purlin_rows: rows,
        purlin_length,
        purlin_kg,
        footprint,
        perimeter,
        roof_area,
        gross_wall_area,
        door_area,
        net_wall_area,
        roof_insulation_area,
        lateral_insulation_area,
        front_back_insulation_area,
        slab_thickness,
        slab_volume,
        apron_volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{BeamType, ColumnType, ProfileSubtype};
    use crate::materials::WeightTableKind;

    fn reference_building() -> (QuotationInput, WeightTables) {
        let mut input = QuotationInput::with_dimensions(20.0, 30.0, 5.0, 10.0);
        input.columns.kind = ColumnType::Tube;
        input.columns.size_label = "150x150".to_string();
        input.beams.kind = BeamType::SolidWeb;
        input.beams.sub_type = Some(ProfileSubtype::Ipn);
        input.beams.size_label = "IPN 270".to_string();

        let tables = WeightTables::new()
            .with_entry(WeightTableKind::Tube, "150x150", 15.0)
            .with_entry(WeightTableKind::Ipn, "IPN 270", 36.2);
        (input, tables)
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(30.0), 7);
        assert_eq!(frame_count(31.0), 8);
        assert_eq!(frame_count(4.0), 2);
        assert_eq!(frame_count(0.0), 1);
    }

    #[test]
    fn test_counts_saturate_on_extreme_lengths() {
        assert_eq!(frame_count(3.0e10), u32::MAX);
        assert_eq!(frame_count(f64::MAX), u32::MAX);
        assert_eq!(frame_count(f64::NAN), 1);
        assert_eq!(purlin_rows(f64::MAX), u32::MAX);
        assert_eq!(purlin_rows(-4.0), 0);
    }

    #[test]
    fn test_slope_factor() {
        assert_eq!(slope_factor(0.0), 1.0);
        assert!((slope_factor(10.0) - 1.004_987_6).abs() < 1e-6);
    }

    #[test]
    fn test_purlin_rows() {
        assert_eq!(purlin_rows(20.0), 17);
        assert_eq!(purlin_rows(1.0), 1);
        assert_eq!(purlin_rows(0.0), 0);
    }

    #[test]
    fn test_steel_takeoff() {
        let (input, tables) = reference_building();
        let t = takeoff(&input, &tables);

        assert_eq!(t.frame_count, 7);
        assert!((t.rafter_length.0 - 20.099_75).abs() < 1e-4);
        assert!((t.column_kg.0 - 1050.0).abs() < 1e-9);
        assert!((t.beam_kg.0 - 5093.277).abs() < 1e-2);
        assert_eq!(t.purlin_rows, 17);
        assert!((t.purlin_length.0 - 510.0).abs() < 1e-9);
        assert!((t.purlin_kg.0 - 2550.0).abs() < 1e-9);
        assert!((t.total_steel_kg().0 - 8693.277).abs() < 1e-2);
    }

    #[test]
    fn test_roof_is_always_clad() {
        let (input, tables) = reference_building();
        let t = takeoff(&input, &tables);
        assert_eq!(t.net_wall_area, SquareMeters(0.0));
        assert!((t.cladding_area().0 - 600.0 * slope_factor(10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_wall_areas_and_door_deduction() {
        let (mut input, tables) = reference_building();
        input.enclosure.lateral.enabled = true;
        input.enclosure.front_back.enabled = true;
        input.openings.industrial_doors.enabled = true;
        input.openings.industrial_doors.count = 2;
        input.openings.industrial_doors.width_m = 4.0;
        input.openings.industrial_doors.height_m = 4.5;

        let t = takeoff(&input, &tables);
        // 2*30*5 + 2*20*5 = 500, doors 2*4*4.5 = 36
        assert!((t.gross_wall_area.0 - 500.0).abs() < 1e-9);
        assert!((t.door_area.0 - 36.0).abs() < 1e-9);
        assert!((t.net_wall_area.0 - 464.0).abs() < 1e-9);
    }

    #[test]
    fn test_door_area_clamped_at_zero() {
        let (mut input, tables) = reference_building();
        input.enclosure.front_back.enabled = true;
        input.openings.industrial_doors.enabled = true;
        input.openings.industrial_doors.count = 10;
        input.openings.industrial_doors.width_m = 10.0;
        input.openings.industrial_doors.height_m = 10.0;

        let t = takeoff(&input, &tables);
        assert_eq!(t.net_wall_area, SquareMeters(0.0));
    }

    #[test]
    fn test_disabled_doors_are_not_deducted() {
        let (mut input, tables) = reference_building();
        input.enclosure.lateral.enabled = true;
        input.openings.industrial_doors.count = 2;
        input.openings.industrial_doors.width_m = 4.0;
        input.openings.industrial_doors.height_m = 4.0;

        let t = takeoff(&input, &tables);
        assert!((t.net_wall_area.0 - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_insulation_ignores_cladding_and_doors() {
        let (mut input, tables) = reference_building();
        input.enclosure.lateral_insulation.enabled = true;
        input.openings.industrial_doors.enabled = true;
        input.openings.industrial_doors.count = 1;
        input.openings.industrial_doors.width_m = 5.0;
        input.openings.industrial_doors.height_m = 5.0;

        let t = takeoff(&input, &tables);
        assert!((t.lateral_insulation_area.0 - 300.0).abs() < 1e-9);
        assert_eq!(t.front_back_insulation_area, SquareMeters(0.0));
        assert_eq!(t.roof_insulation_area, SquareMeters(0.0));
    }

    #[test]
    fn test_concrete_volumes() {
        let (mut input, tables) = reference_building();
        input.floor.street_apron.enabled = true;
        input.floor.street_apron.distance_m = 10.0;

        // Apron only counts with the floor enabled
        let t = takeoff(&input, &tables);
        assert_eq!(t.concrete_volume(), CubicMeters(0.0));

        input.floor.enabled = true;
        input.floor.thickness_label = "20 cm".to_string();
        let t = takeoff(&input, &tables);
        assert!((t.slab_volume.0 - 120.0).abs() < 1e-9);
        assert!((t.apron_volume.0 - 12.0).abs() < 1e-9);
        assert!((t.concrete_volume().0 - 132.0).abs() < 1e-9);
    }
}
