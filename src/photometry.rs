//! # Photometric conversions
//!
//! Closed-form, element-wise conversions from raw catalog measurements to derived
//! astrophysical quantities:
//!
//! - [`compute_distance`] – parallax (mas) → geometric distance (pc), `d = 1000 / p`
//! - [`compute_absolute_magnitude`] – apparent magnitude + distance → absolute magnitude,
//!   `M = m − 5·log10(d) + 5`
//! - [`compute_temperature`] – B−V color index → effective temperature,
//!   `T = 8540 / ((B−V) + 0.865)`
//!
//! ## Undefined values
//!
//! Every function is **total** over `Option<f64>`: a missing input, an input outside the
//! domain of the formula (non-positive parallax or distance, zero denominator) or a
//! non-finite result yields `None`. No function panics and none returns a numeric
//! sentinel, so statistics computed downstream are never polluted by placeholder values.
//!
//! `None` propagates: feeding the `None` returned by [`compute_distance`] into
//! [`compute_absolute_magnitude`] yields `None`.

use crate::constants::{
    Kelvin, Magnitude, MilliArcSec, Parsec, DISTANCE_MODULUS_SLOPE, DISTANCE_MODULUS_ZERO_POINT,
    MAS_PER_ARCSEC, TEMPERATURE_BV_OFFSET, TEMPERATURE_DENOM_EPS, TEMPERATURE_SCALE,
};

/// Keep finite values only.
#[inline]
fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

/// Geometric distance from a trigonometric parallax.
///
/// Arguments
/// -----------------
/// * `parallax_mas`: measured parallax in milliarcseconds, or `None` if missing.
///
/// Return
/// ----------
/// * `Some(1000 / parallax_mas)` in parsecs when the parallax is finite and strictly
///   positive; the result is then strictly positive.
/// * `None` when the parallax is missing, zero, negative, or not finite.
///
/// See also
/// ------------
/// * [`compute_absolute_magnitude`] – consumes the returned distance.
pub fn compute_distance(parallax_mas: Option<MilliArcSec>) -> Option<Parsec> {
    let p = parallax_mas?;
    if !p.is_finite() || p <= 0.0 {
        return None;
    }
    finite(MAS_PER_ARCSEC / p)
}

/// Distance modulus `5·log10(d) − 5` for a distance in parsecs.
///
/// Returns `None` for missing, non-positive or non-finite distances.
pub fn distance_modulus(distance_pc: Option<Parsec>) -> Option<Magnitude> {
    let d = distance_pc?;
    if !d.is_finite() || d <= 0.0 {
        return None;
    }
    finite(DISTANCE_MODULUS_SLOPE * d.log10() - DISTANCE_MODULUS_ZERO_POINT)
}

/// Absolute magnitude from an apparent magnitude and a distance.
///
/// Applies identically to the visual band (`Vmag → M_v`) and to the Hipparcos band
/// (`Hpmag → M_Hip`), both with the same distance modulus.
///
/// Arguments
/// -----------------
/// * `apparent_mag`: apparent magnitude, or `None` if missing.
/// * `distance_pc`: distance in parsecs, or `None` if undefined.
///
/// Return
/// ----------
/// * `Some(apparent_mag − 5·log10(distance_pc) + 5)` when both inputs are present and the
///   distance is finite and strictly positive.
/// * `None` otherwise.
pub fn compute_absolute_magnitude(
    apparent_mag: Option<Magnitude>,
    distance_pc: Option<Parsec>,
) -> Option<Magnitude> {
    let m = apparent_mag?;
    let modulus = distance_modulus(distance_pc)?;
    finite(m - modulus)
}

/// Effective temperature from the B−V color index.
///
/// Arguments
/// -----------------
/// * `b_v`: B−V color index in magnitudes, or `None` if missing.
///
/// Return
/// ----------
/// * `Some(8540 / (b_v + 0.865))` in Kelvin.
/// * `None` if `b_v` is missing or not finite, if the denominator is zero within
///   [`TEMPERATURE_DENOM_EPS`], or if the denominator is negative (the relation would
///   return a negative absolute temperature).
pub fn compute_temperature(b_v: Option<f64>) -> Option<Kelvin> {
    let bv = b_v?;
    let denom = bv + TEMPERATURE_BV_OFFSET;
    if !denom.is_finite() || denom <= TEMPERATURE_DENOM_EPS {
        return None;
    }
    finite(TEMPERATURE_SCALE / denom)
}
