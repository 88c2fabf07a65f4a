//! # Catalog: ingestion, enrichment, and queries
//!
//! High-level facilities to **load** a raw star catalog, **enrich** every row with the
//! derived astrophysical quantities, and **query** the enriched table in the fixed
//! spectral category order expected by chart and model consumers.
//!
//! Modules
//! -----------------
//! * [`star`](crate::catalog::star) – [`StarRecord`], [`DerivedFields`], [`EnrichedStar`].
//! * [`columns`](crate::catalog::columns) – Named numeric columns and scatter series.
//! * [`parquet_reader`](crate::catalog::parquet_reader) – Arrow/Parquet ingestion.
//! * [`parquet_writer`](crate::catalog::parquet_writer) – Arrow/Parquet export of the enriched table.
//! * [`csv_reader`](crate::catalog::csv_reader) – CSV ingestion.
//! * [`catalog_file`](crate::catalog::catalog_file) – **Public** trait exposing `new_from_*` and `add_from_*`.
//! * [`display`](crate::catalog::display) – Table renderers.
//!
//! Data Model
//! -----------------
//! * [`StarCatalog`] = `Vec<StarRecord>`: the raw table, in file order.
//! * [`EnrichedCatalog`] = `Vec<EnrichedStar>`: raw rows plus derived fields, same order.
//!
//! Pipeline
//! -----------------
//! [`Enrich::enrich`] maps every row independently through
//! [`DerivedFields::compute`]. It never drops, adds, or reorders rows and never touches
//! raw fields; undefined derived values are `None` per field and never abort the call.
//!
//! Re-enriching an [`EnrichedCatalog`] recomputes the derived fields from the preserved
//! raw fields, so the operation is idempotent:
//!
//! ```rust
//! use hipcat::catalog::{Enrich, StarRecord};
//!
//! let raw = vec![StarRecord {
//!     parallax_mas: Some(20.0),
//!     vmag: Some(6.1),
//!     spectral_class_raw: Some("K3III".into()),
//!     ..Default::default()
//! }];
//! let once = raw.enrich();
//! assert_eq!(once.enrich(), once);
//! ```
//!
//! Queries
//! -----------------
//! [`EnrichedCatalogExt`] provides visibility filtering, category-ordered sorting,
//! per-type selection, and derived-field coverage.
use std::fmt;

use itertools::Itertools;
use log::{debug, info};

use crate::constants::Magnitude;
use crate::spectral::{SpectralSubclass, SpectralType};

pub mod catalog_file;
pub mod columns;
pub mod csv_reader;
pub mod display;
pub mod parquet_reader;
pub mod parquet_writer;
pub mod star;

pub use star::{DerivedFields, EnrichedStar, StarRecord};

/// The raw catalog table.
pub type StarCatalog = Vec<StarRecord>;

/// The enriched catalog table (raw columns plus derived columns).
pub type EnrichedCatalog = Vec<EnrichedStar>;

/// Append the derived quantities to every row of a table.
pub trait Enrich {
    /// Build the enriched table.
    ///
    /// Return
    /// ----------
    /// * A new [`EnrichedCatalog`] with exactly one row per input row, in input order.
    fn enrich(&self) -> EnrichedCatalog;
}

impl Enrich for [StarRecord] {
    fn enrich(&self) -> EnrichedCatalog {
        let enriched: EnrichedCatalog = self
            .iter()
            .cloned()
            .map(EnrichedStar::from_record)
            .collect();
        log_enrichment(&enriched);
        enriched
    }
}

impl Enrich for [EnrichedStar] {
    /// Derived fields are recomputed from raw fields only; existing derived values are
    /// discarded.
    fn enrich(&self) -> EnrichedCatalog {
        let enriched: EnrichedCatalog = self
            .iter()
            .map(|star| EnrichedStar::from_record(star.record.clone()))
            .collect();
        log_enrichment(&enriched);
        enriched
    }
}

/// Consuming variant of [`Enrich::enrich`] that moves the raw rows instead of cloning them.
pub fn enrich_catalog(catalog: StarCatalog) -> EnrichedCatalog {
    let enriched: EnrichedCatalog = catalog.into_iter().map(EnrichedStar::from_record).collect();
    log_enrichment(&enriched);
    enriched
}

fn log_enrichment(enriched: &[EnrichedStar]) {
    info!("Enriched {} catalog rows", enriched.len());
    if log::log_enabled!(log::Level::Debug) {
        debug!("Derived field coverage: {}", enriched.derived_coverage());
    }
}

/// Sort key placing undefined categories after every defined one.
#[inline]
fn undefined_last<T: Ord + Copy>(value: Option<T>) -> (bool, Option<T>) {
    (value.is_none(), value)
}

/// Number of rows for which each derived field is defined.
///
/// Display
/// -----------------
/// * `{}` – compact single line: `rows=10, distance_pc=9, M_v=9, …`
/// * `{:#}` – aligned multi-line summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivedCoverage {
    pub rows: usize,
    pub distance_pc: usize,
    pub m_v: usize,
    pub m_hip: usize,
    pub t_eff: usize,
    pub spectral_type: usize,
    pub spectral_subclass: usize,
}

impl fmt::Display for DerivedCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Derived field coverage ({} rows)", self.rows)?;
            writeln!(f, "--------------------------------")?;
            writeln!(f, "distance_pc       : {}", self.distance_pc)?;
            writeln!(f, "M_v               : {}", self.m_v)?;
            writeln!(f, "M_Hip             : {}", self.m_hip)?;
            writeln!(f, "T_eff             : {}", self.t_eff)?;
            writeln!(f, "spectral_type     : {}", self.spectral_type)?;
            write!(f, "spectral_subclass : {}", self.spectral_subclass)
        } else {
            write!(
                f,
                "rows={}, distance_pc={}, M_v={}, M_Hip={}, T_eff={}, spectral_type={}, spectral_subclass={}",
                self.rows,
                self.distance_pc,
                self.m_v,
                self.m_hip,
                self.t_eff,
                self.spectral_type,
                self.spectral_subclass
            )
        }
    }
}

/// Queries over an enriched table.
///
/// Every method returns a new table (or a summary) and leaves `self` untouched.
pub trait EnrichedCatalogExt {
    /// Rows strictly brighter than `cutoff_magnitude` (`Vmag < cutoff`).
    ///
    /// Rows without `Vmag` are excluded. Input order is preserved.
    fn filter_visible(&self, cutoff_magnitude: Magnitude) -> EnrichedCatalog;

    /// Stable sort by spectral type in category order (`O … M`), undefined types last.
    fn sorted_by_spectral_type(&self) -> EnrichedCatalog;

    /// Stable sort by spectral subclass in category order (`O0 … M9`), undefined last.
    fn sorted_by_spectral_subclass(&self) -> EnrichedCatalog;

    /// Rows of a single spectral type, in input order.
    fn with_spectral_type(&self, spectral_type: SpectralType) -> EnrichedCatalog;

    /// Rows of a single spectral subclass, in input order.
    fn with_spectral_subclass(&self, subclass: SpectralSubclass) -> EnrichedCatalog;

    /// Count of defined values for every derived field.
    fn derived_coverage(&self) -> DerivedCoverage;

    /// The raw table, without derived fields.
    fn raw_records(&self) -> StarCatalog;
}

impl EnrichedCatalogExt for [EnrichedStar] {
    fn filter_visible(&self, cutoff_magnitude: Magnitude) -> EnrichedCatalog {
        self.iter()
            .filter(|s| s.record.vmag.is_some_and(|v| v < cutoff_magnitude))
            .cloned()
            .collect()
    }

    fn sorted_by_spectral_type(&self) -> EnrichedCatalog {
        self.iter()
            .sorted_by_key(|s| undefined_last(s.derived.spectral_type))
            .cloned()
            .collect()
    }

    fn sorted_by_spectral_subclass(&self) -> EnrichedCatalog {
        self.iter()
            .sorted_by_key(|s| undefined_last(s.derived.spectral_subclass))
            .cloned()
            .collect()
    }

    fn with_spectral_type(&self, spectral_type: SpectralType) -> EnrichedCatalog {
        self.iter()
            .filter(|s| s.derived.spectral_type == Some(spectral_type))
            .cloned()
            .collect()
    }

    fn with_spectral_subclass(&self, subclass: SpectralSubclass) -> EnrichedCatalog {
        self.iter()
            .filter(|s| s.derived.spectral_subclass == Some(subclass))
            .cloned()
            .collect()
    }

    fn derived_coverage(&self) -> DerivedCoverage {
        self.iter().fold(
            DerivedCoverage {
                rows: self.len(),
                ..Default::default()
            },
            |mut acc, s| {
                let d = &s.derived;
                acc.distance_pc += d.distance_pc.is_some() as usize;
                acc.m_v += d.m_v.is_some() as usize;
                acc.m_hip += d.m_hip.is_some() as usize;
                acc.t_eff += d.t_eff.is_some() as usize;
                acc.spectral_type += d.spectral_type.is_some() as usize;
                acc.spectral_subclass += d.spectral_subclass.is_some() as usize;
                acc
            },
        )
    }

    fn raw_records(&self) -> StarCatalog {
        self.iter().map(|s| s.record.clone()).collect()
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    fn row(hip: u32, vmag: Option<f64>, sp: Option<&str>) -> StarRecord {
        StarRecord {
            hip: Some(hip),
            parallax_mas: Some(10.0),
            vmag,
            b_v: Some(0.5),
            spectral_class_raw: sp.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample() -> StarCatalog {
        vec![
            row(1, Some(5.0), Some("M2III")),
            row(2, Some(7.5), Some("A0V")),
            row(3, None, Some("O9.5V")),
            row(4, Some(2.1), None),
            row(5, Some(6.4), Some("A3m")),
            row(6, Some(9.9), Some("K0")),
        ]
    }

    fn hips(catalog: &[EnrichedStar]) -> Vec<u32> {
        catalog.iter().filter_map(|s| s.record.hip).collect()
    }

    #[test]
    fn test_enrich_preserves_rows_and_order() {
        let raw = sample();
        let enriched = raw.enrich();
        assert_eq!(enriched.len(), raw.len());
        assert_eq!(hips(&enriched), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(enriched.raw_records(), raw);
    }

    #[test]
    fn test_enrich_owned_matches_borrowed() {
        let raw = sample();
        assert_eq!(enrich_catalog(raw.clone()), raw.enrich());
    }

    #[test]
    fn test_re_enrichment_is_idempotent() {
        let once = sample().enrich();
        let twice = once.enrich();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_re_enrichment_discards_stale_derived_values() {
        let mut tampered = sample().enrich();
        tampered[0].derived.distance_pc = Some(-1.0);
        tampered[0].derived.spectral_type = Some(SpectralType::O);
        assert_eq!(tampered.enrich(), sample().enrich());
    }

    #[test]
    fn test_filter_visible() {
        let enriched = sample().enrich();
        assert_eq!(hips(&enriched.filter_visible(6.5)), vec![1, 4, 5]);
        assert!(enriched.filter_visible(-2.0).is_empty());
    }

    #[test]
    fn test_sorted_by_spectral_type() {
        let sorted = sample().enrich().sorted_by_spectral_type();
        let letters: Vec<Option<char>> = sorted
            .iter()
            .map(|s| s.derived.spectral_type.map(SpectralType::letter))
            .collect();
        assert_eq!(
            letters,
            vec![Some('O'), Some('A'), Some('A'), Some('K'), Some('M'), None]
        );
        // stable among equal keys
        assert_eq!(hips(&sorted), vec![3, 2, 5, 6, 1, 4]);
    }

    #[test]
    fn test_sorted_by_spectral_subclass() {
        let sorted = sample().enrich().sorted_by_spectral_subclass();
        let codes: Vec<String> = sorted
            .iter()
            .map(|s| {
                s.derived
                    .spectral_subclass
                    .map_or_else(|| "-".to_string(), |c| c.to_string())
            })
            .collect();
        assert_eq!(codes, vec!["O9", "A0", "A3", "K0", "M2", "-"]);
    }

    #[test]
    fn test_selection_by_category() {
        let enriched = sample().enrich();
        assert_eq!(hips(&enriched.with_spectral_type(SpectralType::A)), vec![2, 5]);
        let a3 = SpectralSubclass::new(SpectralType::A, 3).unwrap();
        assert_eq!(hips(&enriched.with_spectral_subclass(a3)), vec![5]);
        assert!(enriched.with_spectral_type(SpectralType::B).is_empty());
    }

    #[test]
    fn test_derived_coverage() {
        let coverage = sample().enrich().derived_coverage();
        assert_eq!(coverage.rows, 6);
        assert_eq!(coverage.distance_pc, 6);
        assert_eq!(coverage.m_v, 5);
        assert_eq!(coverage.m_hip, 0);
        assert_eq!(coverage.t_eff, 6);
        assert_eq!(coverage.spectral_type, 5);
        assert_eq!(coverage.spectral_subclass, 5);
        assert!(coverage.to_string().starts_with("rows=6, distance_pc=6"));
        assert!(format!("{coverage:#}").contains("M_Hip             : 0"));
    }
}
