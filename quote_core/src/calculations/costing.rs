//! # Cost Accumulation
//!
//! Prices a [`Takeoff`] line by line and groups the lines into the six
//! breakdown categories:
//!
//! | Category                  | Lines                                         |
//! |---------------------------|-----------------------------------------------|
//! | `structural_materials`    | steel, fasteners, sealants                    |
//! | `cladding_and_insulation` | cladding, insulation                          |
//! | `accessories`             | wind turbines, translucent panels, emergency doors, soil study |
//! | `civil_works`             | slab concrete, top mesh, apron concrete       |
//! | `labor`                   | fabrication, erection, paint                  |
//! | `logistics_and_other`     | freight, lifting, engineering, per-diem       |
//!
//! Steel pricing: tube columns use the tubular rate; every other column,
//! all beams and all purlins use the structural rate.

use serde::{Deserialize, Serialize};

use crate::calculations::takeoff::Takeoff;
use crate::input::{ColumnType, ConcreteGrade, QuotationInput};
use crate::pricing::PriceConfig;
use crate::units::round2;

/// Every priced line of a quote (USD).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostLines {
    pub steel: f64,
    pub fasteners: f64,
    pub sealants: f64,

    pub cladding: f64,
    pub insulation: f64,

    pub wind_turbines: f64,
    pub translucent_panels: f64,
    pub emergency_doors: f64,
    pub soil_study: f64,

    pub slab_concrete: f64,
    pub top_mesh: f64,
    pub apron_concrete: f64,

    pub fabrication: f64,
    pub erection: f64,
    pub paint: f64,

    pub freight: f64,
    pub lifting: f64,
    pub engineering: f64,
    pub per_diem: f64,
}

/// Category totals (USD).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub structural_materials: f64,
    pub cladding_and_insulation: f64,
    pub accessories: f64,
    pub civil_works: f64,
    pub labor: f64,
    pub logistics_and_other: f64,
}

impl CostLines {
    /// Group the lines into categories
    pub fn breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            structural_materials: self.steel + self.fasteners + self.sealants,
            cladding_and_insulation: self.cladding + self.insulation,
            accessories: self.wind_turbines
                + self.translucent_panels
                + self.emergency_doors
                + self.soil_study,
            civil_works: self.slab_concrete + self.top_mesh + self.apron_concrete,
            labor: self.fabrication + self.erection + self.paint,
            logistics_and_other: self.freight + self.lifting + self.engineering + self.per_diem,
        }
    }

    /// Copy with every line rounded to cents
    pub fn rounded(&self) -> Self {
        CostLines {
            steel: round2(self.steel),
            fasteners: round2(self.fasteners),
            sealants: round2(self.sealants),
            cladding: round2(self.cladding),
            insulation: round2(self.insulation),
            wind_turbines: round2(self.wind_turbines),
            translucent_panels: round2(self.translucent_panels),
            emergency_doors: round2(self.emergency_doors),
            soil_study: round2(self.soil_study),
            slab_concrete: round2(self.slab_concrete),
            top_mesh: round2(self.top_mesh),
            apron_concrete: round2(self.apron_concrete),
            fabrication: round2(self.fabrication),
            erection: round2(self.erection),
            paint: round2(self.paint),
            freight: round2(self.freight),
            lifting: round2(self.lifting),
            engineering: round2(self.engineering),
            per_diem: round2(self.per_diem),
        }
    }
}

impl CostBreakdown {
    /// Sum of the six categories
    pub fn subtotal(&self) -> f64 {
        self.structural_materials
            + self.cladding_and_insulation
            + self.accessories
            + self.civil_works
            + self.labor
            + self.logistics_and_other
    }

    /// Copy with every category rounded to cents
    pub fn rounded(&self) -> Self {
        CostBreakdown {
            structural_materials: round2(self.structural_materials),
            cladding_and_insulation: round2(self.cladding_and_insulation),
            accessories: round2(self.accessories),
            civil_works: round2(self.civil_works),
            labor: round2(self.labor),
            logistics_and_other: round2(self.logistics_and_other),
        }
    }
}

/// Price a takeoff. Expects sanitized input and config.
pub fn price_lines(takeoff: &Takeoff, input: &QuotationInput, config: &PriceConfig) -> CostLines {
    let structural = config.structural_steel_price();
    let column_rate = match input.columns.kind {
        ColumnType::Tube => config.tubular_steel_price(),
        _ => structural,
    };
    let steel = takeoff.column_kg.0 * column_rate
        + takeoff.beam_kg.0 * structural
        + takeoff.purlin_kg.0 * structural;

    // --- Envelope ---
    let cladding = takeoff.cladding_area().0 * config.cladding;

    let roof_rate = if input.enclosure.roof_insulation.is_fireproof() {
        config.fireproof_panel
    } else {
        config.insulation
    };
    let insulation = takeoff.roof_insulation_area.0 * roof_rate
        + (takeoff.lateral_insulation_area.0 + takeoff.front_back_insulation_area.0)
            * config.insulation;

    // --- Accessories ---
    let per_unit = |count: u32, price: f64| f64::from(count) * price;
    let accessories = &input.roof_accessories;
    let wind_turbines = per_unit(accessories.wind_turbines.active_count(), config.wind_turbine);
    let translucent_panels =
        per_unit(accessories.translucent_panels.active_count(), config.translucent_panel);
    let emergency_doors =
        per_unit(input.openings.emergency_doors.active_count(), config.emergency_door);
    let soil_study = if input.floor.soil_study { config.soil_study } else { 0.0 };

    // --- Civil works ---
    let (slab_concrete, top_mesh, apron_concrete) = if input.floor.enabled {
        let concrete_rate = match input.floor.grade {
            ConcreteGrade::Industrial => config.concrete_industrial,
            ConcreteGrade::Light => config.concrete_light,
        };
        (
            takeoff.slab_volume.0 * concrete_rate,
            takeoff.footprint.0 * config.top_mesh,
            takeoff.apron_volume.0 * concrete_rate,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    // --- Logistics ---
    let lifting = if input.logistics.lifting_equipment {
        config.lifting_equipment
    } else {
        0.0
    };

    CostLines {
        steel,
        fasteners: config.fasteners,
        sealants: takeoff.perimeter.0 * config.sealants_per_m,
        cladding,
        insulation,
        wind_turbines,
        translucent_panels,
        emergency_doors,
        soil_study,
        slab_concrete,
        top_mesh,
        apron_concrete,
        fabrication: takeoff.total_steel_kg().0 * config.fabrication_per_kg,
        erection: takeoff.footprint.0 * config.erection_per_m2,
        paint: takeoff.cladding_area().0 * config.paint_per_m2,
        freight: input.logistics.distance_km * config.freight_per_km,
        lifting,
        engineering: config.engineering,
        per_diem: config.per_diem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::takeoff::takeoff;
    use crate::materials::{WeightTableKind, WeightTables};

    fn steel_only_prices() -> PriceConfig {
        PriceConfig {
            steel_structural: 2.0,
            steel_tubular: 3.0,
            ..Default::default()
        }
    }

    fn building() -> (QuotationInput, WeightTables) {
        let mut input = QuotationInput::with_dimensions(10.0, 20.0, 4.0, 0.0);
        input.columns.size_label = "IPN 200".to_string();
        input.beams.size_label = "IPN 200".to_string();
        let tables = WeightTables::new()
            .with_entry(WeightTableKind::Ipn, "IPN 200", 26.2)
            .with_entry(WeightTableKind::Tube, "IPN 200", 10.0);
        (input, tables)
    }

    #[test]
    fn test_tube_columns_use_tubular_rate() {
        let (mut input, tables) = building();
        let config = steel_only_prices();

        let t = takeoff(&input, &tables);
        let solid = price_lines(&t, &input, &config);
        assert!((solid.steel - t.total_steel_kg().0 * 2.0).abs() < 1e-9);

        input.columns.kind = ColumnType::Tube;
        let t = takeoff(&input, &tables);
        let tube = price_lines(&t, &input, &config);
        let expected = t.column_kg.0 * 3.0 + (t.beam_kg.0 + t.purlin_kg.0) * 2.0;
        assert!((tube.steel - expected).abs() < 1e-9);
    }

    #[test]
    fn test_generic_steel_price_fallback() {
        let (input, tables) = building();
        let config = PriceConfig {
            steel: 1.5,
            ..Default::default()
        };
        let t = takeoff(&input, &tables);
        let lines = price_lines(&t, &input, &config);
        assert!((lines.steel - t.total_steel_kg().0 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_fireproof_roof_insulation_rate() {
        let (mut input, tables) = building();
        input.enclosure.roof_insulation.enabled = true;
        input.enclosure.roof_insulation.insulation_type = "Fireproof Panel".to_string();
        input.enclosure.front_back_insulation.enabled = true;
        input.enclosure.front_back_insulation.insulation_type = "Fireproof Panel".to_string();
        let config = PriceConfig {
            insulation: 10.0,
            fireproof_panel: 40.0,
            ..Default::default()
        };

        let t = takeoff(&input, &tables);
        let lines = price_lines(&t, &input, &config);
        // roof 200 m² at 40, gables 2*10*4 = 80 m² at the standard 10
        assert!((lines.insulation - (200.0 * 40.0 + 80.0 * 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_accessories_need_flag_and_count() {
        let (mut input, tables) = building();
        let config = PriceConfig {
            wind_turbine: 150.0,
            translucent_panel: 35.0,
            emergency_door: 400.0,
            soil_study: 300.0,
            ..Default::default()
        };
        input.roof_accessories.wind_turbines.enabled = true;
        input.roof_accessories.wind_turbines.count = 4;
        input.roof_accessories.translucent_panels.count = 10;
        input.openings.emergency_doors.enabled = true;
        input.floor.soil_study = true;

        let t = takeoff(&input, &tables);
        let lines = price_lines(&t, &input, &config);
        assert_eq!(lines.wind_turbines, 600.0);
        assert_eq!(lines.translucent_panels, 0.0);
        assert_eq!(lines.emergency_doors, 0.0);
        assert_eq!(lines.soil_study, 300.0);
        assert_eq!(lines.breakdown().accessories, 900.0);
    }

    #[test]
    fn test_concrete_floor_by_grade() {
        let (mut input, tables) = building();
        let config = PriceConfig {
            concrete_light: 140.0,
            concrete_industrial: 160.0,
            top_mesh: 8.0,
            ..Default::default()
        };
        input.floor.enabled = true;
        input.floor.thickness_label = "15 cm".to_string();
        input.floor.street_apron.enabled = true;
        input.floor.street_apron.distance_m = 10.0;

        let t = takeoff(&input, &tables);
        let light = price_lines(&t, &input, &config);
        // slab 200*0.15 = 30 m³, apron 10*6*0.15 = 9 m³, mesh 200 m²
        assert!((light.slab_concrete - 30.0 * 140.0).abs() < 1e-9);
        assert!((light.apron_concrete - 9.0 * 140.0).abs() < 1e-9);
        assert!((light.top_mesh - 1600.0).abs() < 1e-9);

        input.floor.grade = ConcreteGrade::Industrial;
        let industrial = price_lines(&t, &input, &config);
        assert!((industrial.breakdown().civil_works - (39.0 * 160.0 + 1600.0)).abs() < 1e-9);
    }

    #[test]
    fn test_labor_and_logistics_lines() {
        let (mut input, tables) = building();
        input.logistics.distance_km = 100.0;
        let config = PriceConfig::reference();

        let t = takeoff(&input, &tables);
        let lines = price_lines(&t, &input, &config);
        assert!((lines.fabrication - t.total_steel_kg().0 * 1.5).abs() < 1e-9);
        assert!((lines.erection - 200.0 * 25.0).abs() < 1e-9);
        assert!((lines.paint - 200.0 * 4.0).abs() < 1e-9);
        assert!((lines.sealants - 60.0 * 5.0).abs() < 1e-9);
        assert_eq!(lines.fasteners, 500.0);
        assert_eq!(lines.freight, 250.0);
        assert_eq!(lines.lifting, 0.0);

        input.logistics.lifting_equipment = true;
        let lines = price_lines(&t, &input, &config);
        assert_eq!(lines.lifting, 800.0);
        assert_eq!(lines.breakdown().logistics_and_other, 250.0 + 800.0 + 600.0 + 300.0);
    }

    #[test]
    fn test_subtotal_sums_categories() {
        let breakdown = CostBreakdown {
            structural_materials: 1.0,
            cladding_and_insulation: 2.0,
            accessories: 3.0,
            civil_works: 4.0,
            labor: 5.0,
            logistics_and_other: 6.0,
        };
        assert_eq!(breakdown.subtotal(), 21.0);
    }
}
