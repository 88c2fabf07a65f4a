//! # Classifier feature vectors
//!
//! Spectral-type classifiers consume an eleven-value photometric feature vector per star,
//! in the fixed column order of [`StarFeatures::COLUMNS`]:
//!
//! `[Vmag, BTmag, VTmag, B-V, V-I, Hpmag, (V-I)red, d, T, M_v, M_Hip]`
//!
//! A vector is obtained in one of two ways:
//!
//! * [`StarFeatures::from_enriched`] reads it from a catalog row whose eleven values are
//!   all defined.
//! * [`StarFeatures::from_observables`] synthesizes it from the three quantities a user
//!   usually knows (`Vmag`, `B-V`, distance), filling the other magnitudes and colors
//!   with linear photometric relations fitted on the Hipparcos catalog:
//!
//! | feature | relation |
//! |---|---|
//! | `BTmag` | `0.88114·V + 1.78857` |
//! | `VTmag` | `0.8588·V + 1.18088` |
//! | `V-I` | `1.0595·(B−V) + 0.01201` |
//! | `(V-I)red` | `1.0024·(V−I) + 0.01201` |
//! | `Hpmag` | `1.00564·V + 0.05840` |
//!
//! `T`, `M_v` and `M_Hip` follow the enrichment formulas of [`crate::photometry`].
//!
//! Models
//! -----------------
//! Trained models live outside this crate. [`SpectralClassifier`] is the seam through
//! which they are plugged in; [`classify_catalog`] runs one over a table.
//! [`TemperatureRuleClassifier`] is a model-free reference implementation.
use std::ops::RangeInclusive;

use log::debug;

use crate::catalog::EnrichedStar;
use crate::constants::{
    Kelvin, Magnitude, Parsec, BT_FROM_V_OFFSET, BT_FROM_V_SLOPE, HP_FROM_V_OFFSET,
    HP_FROM_V_SLOPE, VI_FROM_BV_OFFSET, VI_FROM_BV_SLOPE, VI_RED_FROM_VI_OFFSET,
    VI_RED_FROM_VI_SLOPE, VT_FROM_V_OFFSET, VT_FROM_V_SLOPE,
};
use crate::hipcat_errors::HipcatError;
use crate::photometry::{compute_absolute_magnitude, compute_temperature};
use crate::spectral::SpectralType;

/// Accepted input domain of [`StarFeatures::from_observables`].
///
/// The defaults cover the range of the Hipparcos catalog the relations were fitted on.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableBounds {
    pub vmag: RangeInclusive<Magnitude>,
    pub b_v: RangeInclusive<f64>,
    pub distance_pc: RangeInclusive<Parsec>,
}

impl Default for ObservableBounds {
    fn default() -> Self {
        ObservableBounds {
            vmag: -1.5..=14.0,
            b_v: -0.4..=5.46,
            distance_pc: 1.2..=990.0,
        }
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<f64, HipcatError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(HipcatError::ObservableOutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// The eleven classifier inputs of one star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarFeatures {
    pub vmag: Magnitude,
    pub bt_mag: Magnitude,
    pub vt_mag: Magnitude,
    pub b_v: f64,
    pub v_i: f64,
    pub hp_mag: Magnitude,
    pub v_i_red: f64,
    pub distance_pc: Parsec,
    pub t_eff: Kelvin,
    pub m_v: Magnitude,
    pub m_hip: Magnitude,
}

impl StarFeatures {
    /// Feature names in model input order.
    pub const COLUMNS: [&'static str; 11] = [
        "Vmag", "BTmag", "VTmag", "B-V", "V-I", "Hpmag", "(V-I)red", "d", "T", "M_v", "M_Hip",
    ];

    /// Values in [`Self::COLUMNS`] order.
    pub fn as_array(&self) -> [f64; 11] {
        [
            self.vmag,
            self.bt_mag,
            self.vt_mag,
            self.b_v,
            self.v_i,
            self.hp_mag,
            self.v_i_red,
            self.distance_pc,
            self.t_eff,
            self.m_v,
            self.m_hip,
        ]
    }

    /// Synthesize a feature vector from apparent magnitude, color and distance.
    ///
    /// Arguments
    /// -----------------
    /// * `vmag`: apparent visual magnitude.
    /// * `b_v`: `B−V` color index.
    /// * `distance_pc`: distance in parsecs.
    /// * `bounds`: accepted input domain.
    ///
    /// Return
    /// ----------
    /// * `Err(HipcatError::ObservableOutOfRange)` for the first input outside `bounds`
    ///   (or not finite).
    /// * `Err(HipcatError::ObservableOutOfRange)` naming `"T"` if the color index makes the
    ///   temperature undefined, which only happens with bounds below `B−V = −0.865`.
    /// * `Err(HipcatError::ObservableOutOfRange)` naming `"d"` if the distance makes the
    ///   absolute magnitudes undefined, which only happens with bounds reaching `d ≤ 0`.
    pub fn from_observables(
        vmag: Magnitude,
        b_v: f64,
        distance_pc: Parsec,
        bounds: &ObservableBounds,
    ) -> Result<Self, HipcatError> {
        let vmag = check_range("Vmag", vmag, &bounds.vmag)?;
        let b_v = check_range("B-V", b_v, &bounds.b_v)?;
        let distance_pc = check_range("d", distance_pc, &bounds.distance_pc)?;

        let bt_mag = BT_FROM_V_SLOPE * vmag + BT_FROM_V_OFFSET;
        let vt_mag = VT_FROM_V_SLOPE * vmag + VT_FROM_V_OFFSET;
        let v_i = VI_FROM_BV_SLOPE * b_v + VI_FROM_BV_OFFSET;
        let v_i_red = VI_RED_FROM_VI_SLOPE * v_i + VI_RED_FROM_VI_OFFSET;
        let hp_mag = HP_FROM_V_SLOPE * vmag + HP_FROM_V_OFFSET;

        let t_eff = compute_temperature(Some(b_v)).ok_or(HipcatError::ObservableOutOfRange {
            name: "T",
            value: b_v,
            min: *bounds.b_v.start(),
            max: *bounds.b_v.end(),
        })?;
        let distance_out_of_domain = || HipcatError::ObservableOutOfRange {
            name: "d",
            value: distance_pc,
            min: *bounds.distance_pc.start(),
            max: *bounds.distance_pc.end(),
        };
        let d = Some(distance_pc);
        let m_v = compute_absolute_magnitude(Some(vmag), d).ok_or_else(distance_out_of_domain)?;
        let m_hip =
            compute_absolute_magnitude(Some(hp_mag), d).ok_or_else(distance_out_of_domain)?;

        Ok(StarFeatures {
            vmag,
            bt_mag,
            vt_mag,
            b_v,
            v_i,
            hp_mag,
            v_i_red,
            distance_pc,
            t_eff,
            m_v,
            m_hip,
        })
    }

    /// Feature vector of a catalog row, `None` unless all eleven values are defined.
    pub fn from_enriched(star: &EnrichedStar) -> Option<Self> {
        let r = &star.record;
        let d = &star.derived;
        Some(StarFeatures {
            vmag: r.vmag?,
            bt_mag: r.bt_mag?,
            vt_mag: r.vt_mag?,
            b_v: r.b_v?,
            v_i: r.v_i?,
            hp_mag: r.hp_mag?,
            v_i_red: r.v_i_red?,
            distance_pc: d.distance_pc?,
            t_eff: d.t_eff?,
            m_v: d.m_v?,
            m_hip: d.m_hip?,
        })
        .filter(|f| f.as_array().iter().all(|x| x.is_finite()))
    }
}

/// A spectral-type model.
pub trait SpectralClassifier {
    /// Model name, used in error reports.
    fn name(&self) -> &str;

    /// Predict the spectral type of one star.
    fn predict(&self, features: &StarFeatures) -> Result<SpectralType, HipcatError>;
}

/// Run a classifier over every row that has a complete feature vector.
///
/// Return
/// ----------
/// * `(row index, predicted type)` pairs in table order; rows without features are
///   skipped.
/// * The first prediction error, if any.
pub fn classify_catalog<C>(
    classifier: &C,
    catalog: &[EnrichedStar],
) -> Result<Vec<(usize, SpectralType)>, HipcatError>
where
    C: SpectralClassifier + ?Sized,
{
    let predictions = catalog
        .iter()
        .enumerate()
        .filter_map(|(i, s)| StarFeatures::from_enriched(s).map(|f| (i, f)))
        .map(|(i, f)| classifier.predict(&f).map(|t| (i, t)))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        "{} classified {} of {} rows",
        classifier.name(),
        predictions.len(),
        catalog.len()
    );
    Ok(predictions)
}

/// Harvard type from effective temperature alone.
///
/// Lower temperature bounds, in Kelvin: `O ≥ 30000`, `B ≥ 10000`, `A ≥ 7500`,
/// `F ≥ 6000`, `G ≥ 5200`, `K ≥ 3700`, `M` below.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureRuleClassifier;

impl TemperatureRuleClassifier {
    const LOWER_BOUNDS: [(Kelvin, SpectralType); 6] = [
        (30_000.0, SpectralType::O),
        (10_000.0, SpectralType::B),
        (7_500.0, SpectralType::A),
        (6_000.0, SpectralType::F),
        (5_200.0, SpectralType::G),
        (3_700.0, SpectralType::K),
    ];
}

impl SpectralClassifier for TemperatureRuleClassifier {
    fn name(&self) -> &str {
        "temperature-rule"
    }

    fn predict(&self, features: &StarFeatures) -> Result<SpectralType, HipcatError> {
        let t = features.t_eff;
        if !t.is_finite() || t <= 0.0 {
            return Err(HipcatError::ClassifierError {
                model: self.name().to_string(),
                reason: format!("temperature {t} K is not a positive finite value"),
            });
        }
        Ok(Self::LOWER_BOUNDS
            .iter()
            .find(|(lower, _)| t >= *lower)
            .map_or(SpectralType::M, |(_, ty)| *ty))
    }
}
