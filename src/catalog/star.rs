//! Catalog rows: raw measurements, derived quantities, and their pairing.
use serde::Deserialize;

use crate::constants::{Degree, HipId, Kelvin, Magnitude, MasPerYear, MilliArcSec, Parsec};
use crate::photometry::{compute_absolute_magnitude, compute_distance, compute_temperature};
use crate::spectral::{
    classify_spectral_subclass, classify_spectral_type, SpectralSubclass, SpectralType,
};

/// One raw row of the star catalog.
///
/// Every field is optional: a missing cell is `None`, never a sentinel value.
/// Field names on disk follow the column contract of
/// [`RAW_COLUMNS`](crate::constants::RAW_COLUMNS); the serde aliases let a CSV file use
/// either the contract names or the historical Hipparcos headers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StarRecord {
    #[serde(rename = "HIP", default, deserialize_with = "csv::invalid_option")]
    pub hip: Option<HipId>,

    #[serde(rename = "RAdeg", default, deserialize_with = "csv::invalid_option")]
    pub ra_deg: Option<Degree>,
    #[serde(rename = "DEdeg", default, deserialize_with = "csv::invalid_option")]
    pub dec_deg: Option<Degree>,

    #[serde(
        rename = "parallax_mas",
        alias = "Plx",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub parallax_mas: Option<MilliArcSec>,

    #[serde(rename = "pmRA", default, deserialize_with = "csv::invalid_option")]
    pub pm_ra: Option<MasPerYear>,
    #[serde(rename = "pmDE", default, deserialize_with = "csv::invalid_option")]
    pub pm_de: Option<MasPerYear>,

    #[serde(rename = "Vmag", default, deserialize_with = "csv::invalid_option")]
    pub vmag: Option<Magnitude>,
    #[serde(rename = "BTmag", default, deserialize_with = "csv::invalid_option")]
    pub bt_mag: Option<Magnitude>,
    #[serde(rename = "VTmag", default, deserialize_with = "csv::invalid_option")]
    pub vt_mag: Option<Magnitude>,
    #[serde(rename = "Hpmag", default, deserialize_with = "csv::invalid_option")]
    pub hp_mag: Option<Magnitude>,

    #[serde(
        rename = "B_V",
        alias = "B-V",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub b_v: Option<f64>,
    #[serde(
        rename = "V_I",
        alias = "V-I",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub v_i: Option<f64>,
    #[serde(
        rename = "V_I_red",
        alias = "(V-I)red",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub v_i_red: Option<f64>,

    #[serde(rename = "spectral_class_raw", alias = "SpType", default)]
    pub spectral_class_raw: Option<String>,

    #[serde(rename = "variability_type", alias = "VarType", default)]
    pub variability_type: Option<String>,
    #[serde(
        rename = "variability_period",
        alias = "Period",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub variability_period: Option<f64>,
}

/// `NaN` cells are missing values in columnar exports of the catalog.
#[inline]
fn non_nan(x: Option<f64>) -> Option<f64> {
    x.filter(|v| !v.is_nan())
}

#[inline]
fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl StarRecord {
    /// Turn reader artifacts into explicit missing values.
    ///
    /// * `NaN` floats become `None`.
    /// * Empty or whitespace-only strings become `None`.
    ///
    /// Non-empty strings are kept verbatim (no trimming), so classification still sees
    /// the exact catalog text.
    pub fn normalized(self) -> Self {
        StarRecord {
            hip: self.hip,
            ra_deg: non_nan(self.ra_deg),
            dec_deg: non_nan(self.dec_deg),
            parallax_mas: non_nan(self.parallax_mas),
            pm_ra: non_nan(self.pm_ra),
            pm_de: non_nan(self.pm_de),
            vmag: non_nan(self.vmag),
            bt_mag: non_nan(self.bt_mag),
            vt_mag: non_nan(self.vt_mag),
            hp_mag: non_nan(self.hp_mag),
            b_v: non_nan(self.b_v),
            v_i: non_nan(self.v_i),
            v_i_red: non_nan(self.v_i_red),
            spectral_class_raw: non_blank(self.spectral_class_raw),
            variability_type: non_blank(self.variability_type),
            variability_period: non_nan(self.variability_period),
        }
    }
}

/// Quantities derived from a single [`StarRecord`].
///
/// Each field is computed independently from the row's own raw fields; `None` marks a
/// value whose inputs were missing or outside the domain of its formula.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedFields {
    /// `1000 / parallax_mas`, strictly positive when defined
    pub distance_pc: Option<Parsec>,
    /// `Vmag − 5·log10(d) + 5`
    pub m_v: Option<Magnitude>,
    /// `Hpmag − 5·log10(d) + 5`
    pub m_hip: Option<Magnitude>,
    /// `8540 / (B−V + 0.865)`
    pub t_eff: Option<Kelvin>,
    pub spectral_type: Option<SpectralType>,
    pub spectral_subclass: Option<SpectralSubclass>,
}

impl DerivedFields {
    /// Compute every derived field of a row.
    ///
    /// Arguments
    /// -----------------
    /// * `record`: the raw row; it is only borrowed and never modified.
    ///
    /// Return
    /// ----------
    /// * A [`DerivedFields`] where an undefined distance also leaves both absolute
    ///   magnitudes undefined.
    pub fn compute(record: &StarRecord) -> Self {
        let distance_pc = compute_distance(record.parallax_mas);
        let raw_class = record.spectral_class_raw.as_deref();

        DerivedFields {
            distance_pc,
            m_v: compute_absolute_magnitude(record.vmag, distance_pc),
            m_hip: compute_absolute_magnitude(record.hp_mag, distance_pc),
            t_eff: compute_temperature(record.b_v),
            spectral_type: classify_spectral_type(raw_class),
            spectral_subclass: classify_spectral_subclass(raw_class),
        }
    }

    /// Number of derived fields that are defined (`0..=6`).
    pub fn defined_count(&self) -> usize {
        [
            self.distance_pc.is_some(),
            self.m_v.is_some(),
            self.m_hip.is_some(),
            self.t_eff.is_some(),
            self.spectral_type.is_some(),
            self.spectral_subclass.is_some(),
        ]
        .iter()
        .filter(|b| **b)
        .count()
    }
}

/// A raw row together with its derived quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedStar {
    pub record: StarRecord,
    pub derived: DerivedFields,
}

impl EnrichedStar {
    /// Enrich a single row, taking ownership of the raw fields.
    pub fn from_record(record: StarRecord) -> Self {
        let derived = DerivedFields::compute(&record);
        EnrichedStar { record, derived }
    }
}

#[cfg(test)]
mod star_test {
    use super::*;

    fn sun_like() -> StarRecord {
        StarRecord {
            hip: Some(1),
            parallax_mas: Some(100.0),
            vmag: Some(4.83),
            hp_mag: Some(4.9),
            b_v: Some(0.65),
            spectral_class_raw: Some("G2V".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_all_fields() {
        let derived = DerivedFields::compute(&sun_like());
        assert_eq!(derived.distance_pc, Some(10.0));
        assert_eq!(derived.m_v, Some(4.83));
        assert_eq!(derived.m_hip, Some(4.9));
        assert_eq!(derived.t_eff, Some(8540.0 / (0.65 + 0.865)));
        assert_eq!(derived.spectral_type, Some(SpectralType::G));
        assert_eq!(derived.spectral_subclass.map(|s| s.to_string()), Some("G2".into()));
        assert_eq!(derived.defined_count(), 6);
    }

    #[test]
    fn test_empty_record_has_nothing_defined() {
        let derived = DerivedFields::compute(&StarRecord::default());
        assert_eq!(derived, DerivedFields::default());
        assert_eq!(derived.defined_count(), 0);
    }

    #[test]
    fn test_invalid_parallax_leaves_magnitudes_undefined() {
        let record = StarRecord {
            parallax_mas: Some(-3.2),
            ..sun_like()
        };
        let derived = DerivedFields::compute(&record);
        assert_eq!(derived.distance_pc, None);
        assert_eq!(derived.m_v, None);
        assert_eq!(derived.m_hip, None);
        assert!(derived.t_eff.is_some());
    }

    #[test]
    fn test_enrichment_keeps_raw_fields() {
        let record = sun_like();
        let star = EnrichedStar::from_record(record.clone());
        assert_eq!(star.record, record);
    }

    #[test]
    fn test_normalized() {
        let record = StarRecord {
            vmag: Some(f64::NAN),
            b_v: Some(0.3),
            spectral_class_raw: Some("   ".into()),
            variability_type: Some("M".into()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(record.vmag, None);
        assert_eq!(record.b_v, Some(0.3));
        assert_eq!(record.spectral_class_raw, None);
        assert_eq!(record.variability_type.as_deref(), Some("M"));
    }
}
