//! # Constants and type definitions for hipcat
//!
//! This module centralizes the **photometric constants**, **unit aliases**, and the
//! **column-name contract** shared by the readers, the enrichment pipeline, and the
//! writers.
//!
//! ## Overview
//!
//! - Constants of the closed-form conversions (parallax → distance, distance modulus,
//!   color index → temperature)
//! - Unit type aliases used across the crate
//! - Column names accepted on input and produced on output
//!
//! Every reader resolves a raw field through the list of names in [`RAW_COLUMNS`], so a
//! file may use either the snake-case contract names (`parallax_mas`, `B_V`) or the
//! historical Hipparcos headers (`Plx`, `B-V`).

// -------------------------------------------------------------------------------------------------
// Photometric constants
// -------------------------------------------------------------------------------------------------

/// Milliarcseconds per arcsecond: a parallax of `p` mas gives a distance of `1000 / p` pc.
pub const MAS_PER_ARCSEC: f64 = 1000.0;

/// Multiplier of `log10(d)` in the distance modulus `m - M = 5·log10(d) - 5`
pub const DISTANCE_MODULUS_SLOPE: f64 = 5.0;

/// Constant term of the distance modulus (reference distance of 10 pc)
pub const DISTANCE_MODULUS_ZERO_POINT: f64 = 5.0;

/// Numerator of the empirical B−V → effective temperature relation, in Kelvin
pub const TEMPERATURE_SCALE: f64 = 8540.0;

/// Offset added to the B−V color index in the temperature relation
pub const TEMPERATURE_BV_OFFSET: f64 = 0.865;

/// Denominators of the temperature relation whose magnitude is below this are treated as zero
pub const TEMPERATURE_DENOM_EPS: f64 = 1e-12;

// -------------------------------------------------------------------------------------------------
// Linear photometric relations (classifier feature synthesis)
// -------------------------------------------------------------------------------------------------

/// `BTmag ≈ BT_FROM_V_SLOPE · Vmag + BT_FROM_V_OFFSET`
pub const BT_FROM_V_SLOPE: f64 = 0.88114;
pub const BT_FROM_V_OFFSET: f64 = 1.78857;

/// `VTmag ≈ VT_FROM_V_SLOPE · Vmag + VT_FROM_V_OFFSET`
pub const VT_FROM_V_SLOPE: f64 = 0.8588;
pub const VT_FROM_V_OFFSET: f64 = 1.18088;

/// `V−I ≈ VI_FROM_BV_SLOPE · (B−V) + VI_FROM_BV_OFFSET`
pub const VI_FROM_BV_SLOPE: f64 = 1.0595;
pub const VI_FROM_BV_OFFSET: f64 = 0.01201;

/// `(V−I)red ≈ VI_RED_FROM_VI_SLOPE · (V−I) + VI_RED_FROM_VI_OFFSET`
pub const VI_RED_FROM_VI_SLOPE: f64 = 1.0024;
pub const VI_RED_FROM_VI_OFFSET: f64 = 0.01201;

/// `Hpmag ≈ HP_FROM_V_SLOPE · Vmag + HP_FROM_V_OFFSET`
pub const HP_FROM_V_SLOPE: f64 = 1.00564;
pub const HP_FROM_V_OFFSET: f64 = 0.05840;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in milliarcseconds
pub type MilliArcSec = f64;
/// Proper motion in milliarcseconds per year
pub type MasPerYear = f64;
/// Distance in parsecs
pub type Parsec = f64;
/// Apparent or absolute magnitude
pub type Magnitude = f64;
/// Temperature in Kelvin
pub type Kelvin = f64;
/// Hipparcos catalog identifier
pub type HipId = u32;

// -------------------------------------------------------------------------------------------------
// Column-name contract
// -------------------------------------------------------------------------------------------------

/// Raw field of a [`StarRecord`](crate::catalog::StarRecord) and the file column names
/// that map onto it (first name is the canonical one, written by the Parquet exporter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawColumn {
    pub names: &'static [&'static str],
    pub kind: ColumnKind,
}

impl RawColumn {
    /// Canonical (output) name of the column.
    pub fn canonical(&self) -> &'static str {
        self.names[0]
    }

    /// `true` if `name` is one of the accepted spellings.
    pub fn accepts(&self, name: &str) -> bool {
        self.names.contains(&name)
    }
}

/// Physical storage kind of a raw column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Id,
    Float,
    Text,
}

pub const COL_HIP: RawColumn = RawColumn { names: &["HIP"], kind: ColumnKind::Id };
pub const COL_RA: RawColumn = RawColumn { names: &["RAdeg"], kind: ColumnKind::Float };
pub const COL_DEC: RawColumn = RawColumn { names: &["DEdeg"], kind: ColumnKind::Float };
pub const COL_PARALLAX: RawColumn = RawColumn {
    names: &["parallax_mas", "Plx"],
    kind: ColumnKind::Float,
};
pub const COL_PM_RA: RawColumn = RawColumn { names: &["pmRA"], kind: ColumnKind::Float };
pub const COL_PM_DE: RawColumn = RawColumn { names: &["pmDE"], kind: ColumnKind::Float };
pub const COL_VMAG: RawColumn = RawColumn { names: &["Vmag"], kind: ColumnKind::Float };
pub const COL_BTMAG: RawColumn = RawColumn { names: &["BTmag"], kind: ColumnKind::Float };
pub const COL_VTMAG: RawColumn = RawColumn { names: &["VTmag"], kind: ColumnKind::Float };
pub const COL_HPMAG: RawColumn = RawColumn { names: &["Hpmag"], kind: ColumnKind::Float };
pub const COL_B_V: RawColumn = RawColumn { names: &["B_V", "B-V"], kind: ColumnKind::Float };
pub const COL_V_I: RawColumn = RawColumn { names: &["V_I", "V-I"], kind: ColumnKind::Float };
pub const COL_V_I_RED: RawColumn = RawColumn {
    names: &["V_I_red", "(V-I)red"],
    kind: ColumnKind::Float,
};
pub const COL_SPECTRAL_RAW: RawColumn = RawColumn {
    names: &["spectral_class_raw", "SpType"],
    kind: ColumnKind::Text,
};
pub const COL_VAR_TYPE: RawColumn = RawColumn {
    names: &["variability_type", "VarType"],
    kind: ColumnKind::Text,
};
pub const COL_VAR_PERIOD: RawColumn = RawColumn {
    names: &["variability_period", "Period"],
    kind: ColumnKind::Float,
};

/// Every raw column, in the order the Parquet exporter writes them.
pub const RAW_COLUMNS: [RawColumn; 16] = [
    COL_HIP,
    COL_RA,
    COL_DEC,
    COL_PARALLAX,
    COL_PM_RA,
    COL_PM_DE,
    COL_VMAG,
    COL_BTMAG,
    COL_VTMAG,
    COL_HPMAG,
    COL_B_V,
    COL_V_I,
    COL_V_I_RED,
    COL_SPECTRAL_RAW,
    COL_VAR_TYPE,
    COL_VAR_PERIOD,
];

/// Output name of the geometric distance column (parsecs)
pub const COL_DISTANCE: &str = "distance_pc";
/// Output name of the absolute visual magnitude column
pub const COL_M_V: &str = "M_v";
/// Output name of the absolute Hipparcos magnitude column
pub const COL_M_HIP: &str = "M_Hip";
/// Output name of the effective temperature column (Kelvin)
pub const COL_T_EFF: &str = "T_eff";
/// Output name of the spectral type category column
pub const COL_SPECTRAL_TYPE: &str = "spectral_type";
/// Output name of the spectral subclass category column
pub const COL_SPECTRAL_SUBCLASS: &str = "spectral_subclass";

/// Derived columns, in output order.
pub const DERIVED_COLUMNS: [&str; 6] = [
    COL_DISTANCE,
    COL_M_V,
    COL_M_HIP,
    COL_T_EFF,
    COL_SPECTRAL_TYPE,
    COL_SPECTRAL_SUBCLASS,
];

/// Precomputed columns that may appear in already-processed catalog files.
///
/// They are never read: the pipeline always recomputes derived values from raw fields.
pub const PRECOMPUTED_COLUMNS: [&str; 12] = [
    COL_DISTANCE,
    COL_M_V,
    COL_M_HIP,
    COL_T_EFF,
    COL_SPECTRAL_TYPE,
    COL_SPECTRAL_SUBCLASS,
    "d",
    "T",
    "Tipo_espectral",
    "Clase_espectral",
    "distancia",
    "Temperatura",
];

#[cfg(test)]
mod constants_test {
    use super::*;

    #[test]
    fn test_raw_column_aliases() {
        assert_eq!(COL_PARALLAX.canonical(), "parallax_mas");
        assert!(COL_PARALLAX.accepts("Plx"));
        assert!(COL_B_V.accepts("B-V"));
        assert!(!COL_B_V.accepts("b_v"));
    }

    #[test]
    fn test_raw_and_derived_names_are_disjoint() {
        for raw in RAW_COLUMNS {
            for name in raw.names {
                assert!(!PRECOMPUTED_COLUMNS.contains(name), "{name} is ambiguous");
            }
        }
    }
}
