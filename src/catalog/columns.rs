//! # Named numeric columns and scatter series
//!
//! [`StarColumn`] names every numeric column of the enriched table, raw or derived, under
//! its contract name. It is the handle used by [`stats`](crate::stats) and by the series
//! builders below to pull values out of an [`EnrichedStar`] without matching on fields.
//!
//! ## Scatter series
//!
//! The chart layer plots pairs (or triples) of columns colored either by the discrete
//! spectral type or by a continuous column. [`scatter`] and [`scatter3d`] keep only the
//! rows where every requested coordinate is defined, and tag each point with its
//! original row index so a consumer can always go back to the full record.
//!
//! Typical series:
//!
//! | chart | x | y | color |
//! |---|---|---|---|
//! | HR diagram | `B-V` | `M_v` | spectral type |
//! | temperature HR diagram | `V-I` | `M_Hip` | `T_eff` |
//! | proper motion | `pmRA` | `pmDE` | `distance_pc` |
//! | 3D HR diagram | `V-I`, `M_Hip`, `T_eff` | | spectral type |
use std::fmt;
use std::str::FromStr;

use crate::catalog::EnrichedStar;
use crate::constants::{
    RawColumn, COL_BTMAG, COL_B_V, COL_DEC, COL_DISTANCE, COL_HPMAG, COL_M_HIP, COL_M_V,
    COL_PARALLAX, COL_PM_DE, COL_PM_RA, COL_RA, COL_T_EFF, COL_VAR_PERIOD, COL_VMAG, COL_VTMAG,
    COL_V_I, COL_V_I_RED,
};
use crate::hipcat_errors::HipcatError;
use crate::spectral::SpectralType;

/// A numeric column of the enriched catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarColumn {
    RaDeg,
    DecDeg,
    Parallax,
    PmRa,
    PmDe,
    Vmag,
    BtMag,
    VtMag,
    HpMag,
    BV,
    VI,
    VIRed,
    VariabilityPeriod,
    Distance,
    MV,
    MHip,
    TEff,
}

impl StarColumn {
    pub const ALL: [StarColumn; 17] = [
        StarColumn::RaDeg,
        StarColumn::DecDeg,
        StarColumn::Parallax,
        StarColumn::PmRa,
        StarColumn::PmDe,
        StarColumn::Vmag,
        StarColumn::BtMag,
        StarColumn::VtMag,
        StarColumn::HpMag,
        StarColumn::BV,
        StarColumn::VI,
        StarColumn::VIRed,
        StarColumn::VariabilityPeriod,
        StarColumn::Distance,
        StarColumn::MV,
        StarColumn::MHip,
        StarColumn::TEff,
    ];

    fn raw(self) -> Option<RawColumn> {
        match self {
            StarColumn::RaDeg => Some(COL_RA),
            StarColumn::DecDeg => Some(COL_DEC),
            StarColumn::Parallax => Some(COL_PARALLAX),
            StarColumn::PmRa => Some(COL_PM_RA),
            StarColumn::PmDe => Some(COL_PM_DE),
            StarColumn::Vmag => Some(COL_VMAG),
            StarColumn::BtMag => Some(COL_BTMAG),
            StarColumn::VtMag => Some(COL_VTMAG),
            StarColumn::HpMag => Some(COL_HPMAG),
            StarColumn::BV => Some(COL_B_V),
            StarColumn::VI => Some(COL_V_I),
            StarColumn::VIRed => Some(COL_V_I_RED),
            StarColumn::VariabilityPeriod => Some(COL_VAR_PERIOD),
            StarColumn::Distance | StarColumn::MV | StarColumn::MHip | StarColumn::TEff => None,
        }
    }

    /// Contract name of the column.
    pub fn name(self) -> &'static str {
        match self {
            StarColumn::Distance => COL_DISTANCE,
            StarColumn::MV => COL_M_V,
            StarColumn::MHip => COL_M_HIP,
            StarColumn::TEff => COL_T_EFF,
            _ => self.raw().map_or("", |c| c.canonical()),
        }
    }

    /// `true` for columns computed by the enrichment pipeline.
    pub fn is_derived(self) -> bool {
        self.raw().is_none()
    }

    /// Axis label with unit.
    pub fn label(self) -> &'static str {
        match self {
            StarColumn::RaDeg => "Right ascension [deg]",
            StarColumn::DecDeg => "Declination [deg]",
            StarColumn::Parallax => "Parallax [mas]",
            StarColumn::PmRa => "Proper motion in RA [mas/yr]",
            StarColumn::PmDe => "Proper motion in Dec [mas/yr]",
            StarColumn::Vmag => "Apparent visual magnitude [mag]",
            StarColumn::BtMag => "Apparent BT magnitude [mag]",
            StarColumn::VtMag => "Apparent VT magnitude [mag]",
            StarColumn::HpMag => "Apparent Hp magnitude [mag]",
            StarColumn::BV => "B-V [mag]",
            StarColumn::VI => "V-I [mag]",
            StarColumn::VIRed => "(V-I)red [mag]",
            StarColumn::VariabilityPeriod => "Variability period [d]",
            StarColumn::Distance => "Distance [pc]",
            StarColumn::MV => "Absolute magnitude [mag]",
            StarColumn::MHip => "Absolute Hipparcos magnitude [mag]",
            StarColumn::TEff => "Temperature [K]",
        }
    }

    /// Value of this column for one row (`None` when missing or undefined).
    pub fn value(self, star: &EnrichedStar) -> Option<f64> {
        let r = &star.record;
        let d = &star.derived;
        match self {
            StarColumn::RaDeg => r.ra_deg,
            StarColumn::DecDeg => r.dec_deg,
            StarColumn::Parallax => r.parallax_mas,
            StarColumn::PmRa => r.pm_ra,
            StarColumn::PmDe => r.pm_de,
            StarColumn::Vmag => r.vmag,
            StarColumn::BtMag => r.bt_mag,
            StarColumn::VtMag => r.vt_mag,
            StarColumn::HpMag => r.hp_mag,
            StarColumn::BV => r.b_v,
            StarColumn::VI => r.v_i,
            StarColumn::VIRed => r.v_i_red,
            StarColumn::VariabilityPeriod => r.variability_period,
            StarColumn::Distance => d.distance_pc,
            StarColumn::MV => d.m_v,
            StarColumn::MHip => d.m_hip,
            StarColumn::TEff => d.t_eff,
        }
    }

    /// Values of this column over a table, `None` kept in place.
    pub fn values<'a>(self, catalog: &'a [EnrichedStar]) -> impl Iterator<Item = Option<f64>> + 'a {
        catalog.iter().map(move |s| self.value(s))
    }
}

impl fmt::Display for StarColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StarColumn {
    type Err = HipcatError;

    /// Accepts the contract name or any historical alias (`"Plx"`, `"B-V"`, …).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StarColumn::ALL
            .into_iter()
            .find(|c| c.name() == s || c.raw().is_some_and(|raw| raw.accepts(s)))
            .ok_or_else(|| HipcatError::UnknownColumn(s.to_string()))
    }
}

/// One point of a scatter series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    /// Row index in the table the series was built from
    pub index: usize,
    pub x: f64,
    pub y: f64,
    /// Third coordinate, only set by [`scatter3d`]
    pub z: Option<f64>,
    /// Continuous color value, if a color column was requested and is defined
    pub color: Option<f64>,
    /// Discrete color category
    pub spectral_type: Option<SpectralType>,
}

/// Two-dimensional series of the rows where both `x` and `y` are defined.
///
/// Arguments
/// -----------------
/// * `catalog`: the enriched table.
/// * `x`, `y`: coordinate columns.
/// * `color`: optional continuous color column; a row with an undefined color is kept
///   with `color = None`.
///
/// Return
/// ----------
/// * Points in table order.
pub fn scatter(
    catalog: &[EnrichedStar],
    x: StarColumn,
    y: StarColumn,
    color: Option<StarColumn>,
) -> Vec<ScatterPoint> {
    catalog
        .iter()
        .enumerate()
        .filter_map(|(index, star)| {
            Some(ScatterPoint {
                index,
                x: x.value(star)?,
                y: y.value(star)?,
                z: None,
                color: color.and_then(|c| c.value(star)),
                spectral_type: star.derived.spectral_type,
            })
        })
        .collect()
}

/// Three-dimensional series of the rows where `x`, `y` and `z` are all defined.
pub fn scatter3d(
    catalog: &[EnrichedStar],
    x: StarColumn,
    y: StarColumn,
    z: StarColumn,
) -> Vec<ScatterPoint> {
    catalog
        .iter()
        .enumerate()
        .filter_map(|(index, star)| {
            Some(ScatterPoint {
                index,
                x: x.value(star)?,
                y: y.value(star)?,
                z: Some(z.value(star)?),
                color: None,
                spectral_type: star.derived.spectral_type,
            })
        })
        .collect()
}

#[cfg(test)]
mod columns_test {
    use super::*;
    use crate::catalog::{Enrich, StarRecord};

    fn table() -> Vec<EnrichedStar> {
        vec![
            StarRecord {
                parallax_mas: Some(50.0),
                vmag: Some(3.0),
                b_v: Some(1.1),
                v_i: Some(1.2),
                hp_mag: Some(3.1),
                spectral_class_raw: Some("K1III".into()),
                ..Default::default()
            },
            StarRecord {
                vmag: Some(8.0),
                b_v: Some(0.1),
                spectral_class_raw: Some("A2".into()),
                ..Default::default()
            },
            StarRecord {
                parallax_mas: Some(5.0),
                vmag: Some(9.0),
                v_i: Some(0.4),
                hp_mag: Some(9.1),
                ..Default::default()
            },
        ]
        .enrich()
    }

    #[test]
    fn test_names_round_trip() {
        for column in StarColumn::ALL {
            assert_eq!(column.name().parse::<StarColumn>(), Ok(column));
        }
        assert_eq!("Plx".parse::<StarColumn>(), Ok(StarColumn::Parallax));
        assert_eq!("B-V".parse::<StarColumn>(), Ok(StarColumn::BV));
        assert_eq!(
            "Tipo_espectral".parse::<StarColumn>(),
            Err(HipcatError::UnknownColumn("Tipo_espectral".into()))
        );
    }

    #[test]
    fn test_derived_flag() {
        assert!(StarColumn::TEff.is_derived());
        assert!(!StarColumn::Vmag.is_derived());
        assert_eq!(StarColumn::ALL.iter().filter(|c| c.is_derived()).count(), 4);
    }

    #[test]
    fn test_values_keep_missing_in_place() {
        let values: Vec<Option<f64>> = StarColumn::Distance.values(&table()).collect();
        assert_eq!(values, vec![Some(20.0), None, Some(200.0)]);
    }

    #[test]
    fn test_hr_diagram_series() {
        let points = scatter(&table(), StarColumn::BV, StarColumn::MV, None);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].index, 0);
        assert_eq!(points[0].x, 1.1);
        assert_eq!(points[0].spectral_type, Some(SpectralType::K));
    }

    #[test]
    fn test_colored_series_keeps_rows_without_color() {
        let points = scatter(
            &table(),
            StarColumn::VI,
            StarColumn::MHip,
            Some(StarColumn::TEff),
        );
        assert_eq!(points.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 2]);
        assert!(points[0].color.is_some());
        assert_eq!(points[1].color, None);
    }

    #[test]
    fn test_scatter3d_requires_all_coordinates() {
        let points = scatter3d(&table(), StarColumn::VI, StarColumn::MHip, StarColumn::TEff);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].z, table()[0].derived.t_eff);
    }
}
