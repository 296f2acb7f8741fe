//! Steel Profile Weight Tables
//!
//! Label → linear weight (kg/m) tables for the five profile families the
//! quoting tool offers. The tables are user-maintained and travel with the
//! price configuration, so they may be sparse or empty.
//!
//! ## Lookup precedence
//!
//! 1. A positive manual kg/m on the member wins outright.
//! 2. An empty size label resolves to 0 kg/m without any lookup.
//! 3. Solid-web members read the IPN or W table (IPN when no sub-type is
//!    chosen); tubes read the tube table; channel profiles read the channel
//!    table. A missing key resolves to 0 kg/m.
//! 4. Lattice members try `"{size}_{fill}"`, then `"{size}"`, then fall back
//!    to [`LATTICE_FALLBACK_KG_PER_M`].
//!
//! Keys match exactly; no case folding or trimming is applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::input::{LatticeFill, MemberSpec, ProfileFamily, ProfileSubtype};
use crate::sanitize::{bounded, lenient_table, MAX_AMOUNT};
use crate::units::KgPerMeter;

/// Conservative lattice weight used when neither lattice key exists (kg/m)
pub const LATTICE_FALLBACK_KG_PER_M: f64 = 25.0;

/// Which table a weight came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightTableKind {
    Ipn,
    W,
    Tube,
    Channel,
    Lattice,
}

/// The five label → kg/m tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTables {
    /// IPN rolled profiles
    #[serde(alias = "pesosIPN", deserialize_with = "lenient_table")]
    pub ipn: BTreeMap<String, f64>,

    /// W (wide flange) rolled profiles
    #[serde(alias = "pesosW", deserialize_with = "lenient_table")]
    pub w: BTreeMap<String, f64>,

    /// Tubular sections
    #[serde(alias = "pesosTubo", deserialize_with = "lenient_table")]
    pub tube: BTreeMap<String, f64>,

    /// Channel ("C") profiles
    #[serde(alias = "pesosPerfilC", deserialize_with = "lenient_table")]
    pub channel: BTreeMap<String, f64>,

    /// Lattice members, keyed by `"{size}_{fill}"` or `"{size}"`
    #[serde(alias = "pesosReticulado", deserialize_with = "lenient_table")]
    pub lattice: BTreeMap<String, f64>,
}

/// Where a resolved linear weight came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source")]
pub enum WeightSource {
    /// Manually entered on the member
    Manual,
    /// Found in a table under `key`
    Table { table: WeightTableKind, key: String },
    /// Lattice member with no matching key; the constant fallback applied
    LatticeFallback,
    /// Non-lattice member whose size label is not in its table
    Missing { table: WeightTableKind },
    /// No size label selected
    NoSizeLabel,
}

/// A resolved linear weight together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearWeight {
    pub kg_per_m: KgPerMeter,
    pub source: WeightSource,
}

impl LinearWeight {
    fn new(kg_per_m: f64, source: WeightSource) -> Self {
        LinearWeight {
            kg_per_m: KgPerMeter(kg_per_m),
            source,
        }
    }
}

impl WeightTables {
    /// Create empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the table for a kind
    pub fn table(&self, kind: WeightTableKind) -> &BTreeMap<String, f64> {
        match kind {
            WeightTableKind::Ipn => &self.ipn,
            WeightTableKind::W => &self.w,
            WeightTableKind::Tube => &self.tube,
            WeightTableKind::Channel => &self.channel,
            WeightTableKind::Lattice => &self.lattice,
        }
    }

    /// Mutably borrow the table for a kind
    pub fn table_mut(&mut self, kind: WeightTableKind) -> &mut BTreeMap<String, f64> {
        match kind {
            WeightTableKind::Ipn => &mut self.ipn,
            WeightTableKind::W => &mut self.w,
            WeightTableKind::Tube => &mut self.tube,
            WeightTableKind::Channel => &mut self.channel,
            WeightTableKind::Lattice => &mut self.lattice,
        }
    }

    /// Builder-style insert, handy for tests and fixtures
    ///
    /// ```rust
    /// use quote_core::materials::{WeightTableKind, WeightTables};
    ///
    /// let tables = WeightTables::new()
    ///     .with_entry(WeightTableKind::Ipn, "IPN 300", 54.2)
    ///     .with_entry(WeightTableKind::Lattice, "500 mm_Angulo", 18.0);
    /// assert_eq!(tables.ipn["IPN 300"], 54.2);
    /// ```
    pub fn with_entry(
        mut self,
        kind: WeightTableKind,
        label: impl Into<String>,
        kg_per_m: f64,
    ) -> Self {
        self.table_mut(kind).insert(label.into(), kg_per_m);
        self
    }

    /// Copy of the tables with every weight finite, non-negative and bounded
    pub fn sanitized(&self) -> Self {
        let clean = |table: &BTreeMap<String, f64>| {
            table
                .iter()
                .map(|(label, kg)| (label.clone(), bounded(*kg, MAX_AMOUNT)))
                .collect()
        };
        WeightTables {
            ipn: clean(&self.ipn),
            w: clean(&self.w),
            tube: clean(&self.tube),
            channel: clean(&self.channel),
            lattice: clean(&self.lattice),
        }
    }

    /// Look up the linear weight of a profile by family and size label.
    pub fn lookup(
        &self,
        family: ProfileFamily,
        sub_type: Option<ProfileSubtype>,
        lattice_fill: Option<LatticeFill>,
        size_label: &str,
    ) -> LinearWeight {
        if size_label.is_empty() {
            return LinearWeight::new(0.0, WeightSource::NoSizeLabel);
        }

        let kind = match family {
            ProfileFamily::Lattice => return self.lookup_lattice(lattice_fill, size_label),
            ProfileFamily::SolidWeb => match sub_type.unwrap_or_default() {
                ProfileSubtype::Ipn => WeightTableKind::Ipn,
                ProfileSubtype::W => WeightTableKind::W,
            },
            ProfileFamily::Tube => WeightTableKind::Tube,
            ProfileFamily::ChannelProfile => WeightTableKind::Channel,
        };

        match self.table(kind).get(size_label) {
            Some(kg) => LinearWeight::new(
                *kg,
                WeightSource::Table {
                    table: kind,
                    key: size_label.to_string(),
                },
            ),
            None => {
                tracing::warn!(
                    table = ?kind,
                    size_label,
                    "size label not found in weight table, using 0 kg/m"
                );
                LinearWeight::new(0.0, WeightSource::Missing { table: kind })
            }
        }
    }

    /// Compound key → size-only key → constant fallback.
    fn lookup_lattice(&self, lattice_fill: Option<LatticeFill>, size_label: &str) -> LinearWeight {
        let compound = lattice_fill.map(|fill| format!("{}_{}", size_label, fill.table_key()));
        let candidates = compound.into_iter().chain(std::iter::once(size_label.to_string()));

        for key in candidates {
            if let Some(kg) = self.lattice.get(&key) {
                return LinearWeight::new(
                    *kg,
                    WeightSource::Table {
                        table: WeightTableKind::Lattice,
                        key,
                    },
                );
            }
        }

        tracing::warn!(
            size_label,
            fallback_kg_per_m = LATTICE_FALLBACK_KG_PER_M,
            "lattice size not found in weight table, using constant fallback"
        );
        LinearWeight::new(LATTICE_FALLBACK_KG_PER_M, WeightSource::LatticeFallback)
    }
}

/// Resolve the linear weight of a column or beam selection.
///
/// A positive manual weight bypasses the tables entirely.
pub fn resolve_linear_weight<K>(member: &MemberSpec<K>, tables: &WeightTables) -> LinearWeight
where
    K: Copy + Into<ProfileFamily>,
{
    if member.manual_kg_per_m > 0.0 {
        return LinearWeight::new(member.manual_kg_per_m, WeightSource::Manual);
    }
    tables.lookup(member.family(), member.sub_type, member.lattice_fill, &member.size_label)
}
