//! CSV ingestion of a raw star catalog.
//!
//! Rows are deserialized with `serde` straight into [`StarRecord`]. Headers may use the
//! contract names or the historical Hipparcos names (`Plx`, `B-V`, `V-I`, `(V-I)red`,
//! `SpType`, `VarType`, `Period`); any other header, including precomputed derived
//! columns, is ignored. When a file carries several names of the same raw column
//! (`B_V` and `B-V`), the first accepted name wins, as in the Parquet reader, and the
//! others are ignored with a warning.
//!
//! Header names are trimmed, field values are not: a spectral class read as `" G2V"`
//! stays unclassifiable. A numeric cell that does not parse is read as missing.
use std::fs::File;
use std::io;

use camino::Utf8Path;
use log::{debug, info, warn};

use crate::catalog::{StarCatalog, StarRecord};
use crate::constants::{PRECOMPUTED_COLUMNS, RAW_COLUMNS};
use crate::hipcat_errors::HipcatError;
use crate::params::CatalogParams;

/// Check a CSV header row against the raw column contract.
///
/// Return
/// ----------
/// * `Some(headers)` when several headers map onto the same raw column: the first
///   accepted name (in [`RAW_COLUMNS`] order) keeps the column, the others are renamed so
///   the row deserializer ignores them.
/// * `None` when the header row can be used as is.
fn check_headers(
    headers: &csv::StringRecord,
    params: &CatalogParams,
) -> Result<Option<csv::StringRecord>, HipcatError> {
    for name in headers.iter().filter(|h| PRECOMPUTED_COLUMNS.contains(h)) {
        debug!("Ignoring precomputed column '{name}'");
    }

    let mut resolved: Vec<String> = headers.iter().map(str::to_string).collect();
    let mut renamed = false;
    for raw in RAW_COLUMNS.iter() {
        let chosen = raw
            .names
            .iter()
            .find_map(|name| headers.iter().position(|h| h == *name));
        let Some(chosen) = chosen else {
            if params.strict_columns {
                return Err(HipcatError::MissingColumn(raw.canonical().to_string()));
            }
            warn!(
                "Column '{}' not found in CSV header; filling with missing values",
                raw.canonical()
            );
            continue;
        };
        for (i, h) in headers.iter().enumerate() {
            if i != chosen && raw.accepts(h) {
                warn!(
                    "Column '{h}' duplicates '{}' in CSV header; ignoring it",
                    &headers[chosen]
                );
                resolved[i] = format!("{h}#{i}");
                renamed = true;
            }
        }
    }
    Ok(renamed.then(|| csv::StringRecord::from(resolved)))
}

/// Read a raw catalog from any CSV source.
///
/// Arguments
/// -----------------
/// * `source`: the CSV bytes, header line first.
/// * `params`: delimiter, comment prefix and strict column policy.
///
/// Return
/// ----------
/// * The rows in source order, normalized (see [`StarRecord::normalized`]).
pub fn read_csv<R: io::Read>(
    source: R,
    params: &CatalogParams,
) -> Result<StarCatalog, HipcatError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(params.csv_delimiter)
        .comment(params.csv_comment)
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if let Some(resolved) = check_headers(&headers, params)? {
        reader.set_headers(resolved);
    }

    reader
        .deserialize::<StarRecord>()
        .map(|row| Ok(row?.normalized()))
        .collect()
}

/// Append the rows of a CSV file to an existing catalog.
///
/// Return
/// ----------
/// * `Ok(n)` – number of rows appended.
pub(crate) fn csv_to_catalog(
    catalog: &mut StarCatalog,
    path: &Utf8Path,
    params: &CatalogParams,
) -> Result<usize, HipcatError> {
    let rows = read_csv(File::open(path)?, params)?;
    let appended = rows.len();
    catalog.extend(rows);
    info!("Read {appended} catalog rows from {path}");
    Ok(appended)
}
