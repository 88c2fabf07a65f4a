//! # Catalog loading parameters
//!
//! This module defines the [`CatalogParams`] configuration struct and its builder, which
//! control how catalog files are read into a [`StarCatalog`](crate::catalog::StarCatalog).
//!
//! The [`CatalogParams`] object centralizes the reader settings:
//!
//! - `batch_size` – number of rows decoded per Arrow record batch (Parquet).
//! - `strict_columns` – fail when a raw column is absent instead of filling it with `None`.
//! - `csv_delimiter` – field separator of CSV files.
//! - `csv_comment` – optional comment prefix of CSV lines to skip (VizieR exports use `#`).
//!
//! Parameters are created either with [`CatalogParams::default`] or through the
//! validating [`CatalogParamsBuilder`]:
//!
//! ```rust
//! use hipcat::params::CatalogParams;
//!
//! let params = CatalogParams::builder()
//!     .batch_size(16_384)
//!     .strict_columns(true)
//!     .csv_delimiter(b';')
//!     .build()
//!     .unwrap();
//! assert_eq!(params.batch_size, 16_384);
//! ```
use std::fmt;

use crate::hipcat_errors::HipcatError;

/// Reader configuration for catalog ingestion.
///
/// See also
/// ------------
/// * [`CatalogParamsBuilder::build`] – Validation rules.
/// * [`CatalogFile`](crate::catalog::catalog_file::CatalogFile) – Consumers of these parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogParams {
    /// Rows per Arrow record batch when reading Parquet (default: 8192)
    pub batch_size: usize,
    /// Error on absent raw columns instead of warning (default: false)
    pub strict_columns: bool,
    /// CSV field separator (default: `b','`)
    pub csv_delimiter: u8,
    /// Lines of a CSV file starting with this byte are skipped (default: none)
    pub csv_comment: Option<u8>,
}

impl CatalogParams {
    /// Construct a new [`CatalogParams`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent builder initialized with the defaults.
    pub fn builder() -> CatalogParamsBuilder {
        CatalogParamsBuilder::new()
    }
}

impl Default for CatalogParams {
    fn default() -> Self {
        CatalogParams {
            batch_size: 8192,
            strict_columns: false,
            csv_delimiter: b',',
            csv_comment: None,
        }
    }
}

/// Builder for [`CatalogParams`], with validation.
#[derive(Debug, Clone)]
pub struct CatalogParamsBuilder {
    params: CatalogParams,
}

impl Default for CatalogParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: CatalogParams::default(),
        }
    }

    pub fn batch_size(mut self, v: usize) -> Self {
        self.params.batch_size = v;
        self
    }
    pub fn strict_columns(mut self, v: bool) -> Self {
        self.params.strict_columns = v;
        self
    }
    pub fn csv_delimiter(mut self, v: u8) -> Self {
        self.params.csv_delimiter = v;
        self
    }
    pub fn csv_comment(mut self, v: Option<u8>) -> Self {
        self.params.csv_comment = v;
        self
    }

    /// Finalize the builder and produce a [`CatalogParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `batch_size ≥ 1`.
    /// * `csv_delimiter` is a printable ASCII character or a tab, and not a double quote
    ///   (the CSV quote character).
    /// * `csv_comment`, when set, is a printable ASCII character different from the
    ///   delimiter.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(CatalogParams)` if all values are valid.
    /// * `Err(HipcatError::InvalidCatalogParameter)` otherwise.
    pub fn build(self) -> Result<CatalogParams, HipcatError> {
        let p = &self.params;

        if p.batch_size == 0 {
            return Err(HipcatError::InvalidCatalogParameter(
                "batch_size must be >= 1".into(),
            ));
        }

        let d = p.csv_delimiter;
        let printable = d.is_ascii_graphic() || d == b' ' || d == b'\t';
        if !printable || d == b'"' {
            return Err(HipcatError::InvalidCatalogParameter(format!(
                "csv_delimiter must be a printable ASCII character other than '\"' (got byte {d})"
            )));
        }

        if let Some(c) = p.csv_comment {
            if !c.is_ascii_graphic() || c == d {
                return Err(HipcatError::InvalidCatalogParameter(format!(
                    "csv_comment must be a printable ASCII character distinct from the delimiter (got byte {c})"
                )));
            }
        }

        Ok(self.params)
    }
}

impl fmt::Display for CatalogParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delimiter = match self.csv_delimiter {
            b'\t' => "\\t".to_string(),
            d => (d as char).to_string(),
        };
        let comment = self
            .csv_comment
            .map_or_else(|| "none".to_string(), |c| format!("'{}'", c as char));
        if f.alternate() {
            writeln!(f, "Catalog Parameters")?;
            writeln!(f, "------------------")?;
            writeln!(
                f,
                "  batch_size      = {:<10} # Rows per Parquet record batch",
                self.batch_size
            )?;
            writeln!(
                f,
                "  strict_columns  = {:<10} # Fail on absent raw columns",
                self.strict_columns
            )?;
            writeln!(
                f,
                "  csv_delimiter   = {:<10} # CSV field separator",
                format!("'{delimiter}'")
            )?;
            write!(
                f,
                "  csv_comment     = {:<10} # CSV comment prefix",
                comment
            )
        } else {
            write!(
                f,
                "CatalogParams(batch_size={}, strict_columns={}, csv_delimiter='{}', csv_comment={})",
                self.batch_size, self.strict_columns, delimiter, comment
            )
        }
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_default_builds() {
        let params = CatalogParams::builder().build().unwrap();
        assert_eq!(params, CatalogParams::default());
        assert_eq!(params.batch_size, 8192);
    }

    #[test]
    fn test_rejects_zero_batch() {
        let err = CatalogParams::builder().batch_size(0).build().unwrap_err();
        assert_eq!(
            err,
            HipcatError::InvalidCatalogParameter("batch_size must be >= 1".into())
        );
    }

    #[test]
    fn test_delimiters() {
        assert!(CatalogParams::builder().csv_delimiter(b'\t').build().is_ok());
        assert!(CatalogParams::builder().csv_delimiter(b'|').build().is_ok());
        assert!(CatalogParams::builder().csv_delimiter(b'"').build().is_err());
        assert!(CatalogParams::builder().csv_delimiter(0xE9).build().is_err());
        assert!(CatalogParams::builder().csv_delimiter(b'\n').build().is_err());
    }

    #[test]
    fn test_comment_prefix() {
        assert!(CatalogParams::builder().csv_comment(Some(b'#')).build().is_ok());
        assert!(CatalogParams::builder().csv_comment(Some(b',')).build().is_err());
        assert!(CatalogParams::builder().csv_comment(Some(b' ')).build().is_err());
    }

    #[test]
    fn test_display() {
        let params = CatalogParams::default();
        assert_eq!(
            params.to_string(),
            "CatalogParams(batch_size=8192, strict_columns=false, csv_delimiter=',', csv_comment=none)"
        );
        let pretty = format!("{params:#}");
        assert!(pretty.starts_with("Catalog Parameters"));
        assert!(pretty.contains("batch_size      = 8192"));
    }
}
