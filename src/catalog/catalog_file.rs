//! # Catalog ingestion
//!
//! Public entry points to **build and extend** a [`StarCatalog`] from files.
//!
//! ## Overview
//! -----------------
//! [`CatalogFile`] is implemented for [`StarCatalog`] and provides:
//! - Constructors that **create** a new table from a source (`new_from_*`),
//! - Appenders that **extend** an existing table (`add_from_*`).
//!
//! | source | columns resolved by | crate-private routine |
//! |---|---|---|
//! | Parquet | Arrow schema field names | `parquet_to_catalog` |
//! | CSV | header names (serde aliases) | `csv_to_catalog` |
//!
//! ## Duplicates & ordering
//! -----------------
//! - Rows keep file order; an `add_*` call appends after the existing rows.
//! - **No deduplication** is performed: ingesting the same file twice doubles its rows.
//!
//! ## Error semantics
//! -----------------
//! Every method returns `Result<_, HipcatError>`. On error, an `add_*` call may have
//! appended the batches read before the failure.
//!
//! ## Example
//! -----------------
//! ```no_run
//! use camino::Utf8Path;
//! use hipcat::catalog::catalog_file::CatalogFile;
//! use hipcat::catalog::{Enrich, StarCatalog};
//! use hipcat::params::CatalogParams;
//!
//! # fn demo() -> Result<(), hipcat::hipcat_errors::HipcatError> {
//! let params = CatalogParams::default();
//! let mut catalog = StarCatalog::new_from_parquet(Utf8Path::new("hipparcos.parquet"), &params)?;
//! catalog.add_from_csv(Utf8Path::new("extra_stars.csv"), &params)?;
//! let enriched = catalog.enrich();
//! # Ok(()) }
//! ```
use camino::Utf8Path;

use super::csv_reader::csv_to_catalog;
use super::parquet_reader::parquet_to_catalog;
use crate::catalog::StarCatalog;
use crate::hipcat_errors::HipcatError;
use crate::params::CatalogParams;

/// File ingestion for a raw star table.
pub trait CatalogFile {
    /// Create a table from a Parquet file.
    ///
    /// Arguments
    /// -----------------
    /// * `parquet` – Path to the input Parquet file.
    /// * `params` – Batch size and strict column policy.
    ///
    /// Return
    /// ----------
    /// * `Ok(Self)` – One row per file row, in file order.
    /// * `Err(HipcatError)` – If the file cannot be opened or decoded, or a raw column
    ///   is absent in strict mode.
    ///
    /// See also
    /// ------------
    /// * [`add_from_parquet`](CatalogFile::add_from_parquet) – Appends to an existing table.
    fn new_from_parquet(parquet: &Utf8Path, params: &CatalogParams) -> Result<Self, HipcatError>
    where
        Self: Sized;

    /// Append the rows of a Parquet file; returns the number of rows added.
    fn add_from_parquet(
        &mut self,
        parquet: &Utf8Path,
        params: &CatalogParams,
    ) -> Result<usize, HipcatError>;

    /// Create a table from a CSV file with a header line.
    fn new_from_csv(csv: &Utf8Path, params: &CatalogParams) -> Result<Self, HipcatError>
    where
        Self: Sized;

    /// Append the rows of a CSV file; returns the number of rows added.
    fn add_from_csv(&mut self, csv: &Utf8Path, params: &CatalogParams)
        -> Result<usize, HipcatError>;
}

impl CatalogFile for StarCatalog {
    fn new_from_parquet(parquet: &Utf8Path, params: &CatalogParams) -> Result<Self, HipcatError> {
        let mut catalog = StarCatalog::new();
        parquet_to_catalog(&mut catalog, parquet, params)?;
        Ok(catalog)
    }

    fn add_from_parquet(
        &mut self,
        parquet: &Utf8Path,
        params: &CatalogParams,
    ) -> Result<usize, HipcatError> {
        parquet_to_catalog(self, parquet, params)
    }

    fn new_from_csv(csv: &Utf8Path, params: &CatalogParams) -> Result<Self, HipcatError> {
        let mut catalog = StarCatalog::new();
        csv_to_catalog(&mut catalog, csv, params)?;
        Ok(catalog)
    }

    fn add_from_csv(
        &mut self,
        csv: &Utf8Path,
        params: &CatalogParams,
    ) -> Result<usize, HipcatError> {
        csv_to_catalog(self, csv, params)
    }
}
