//! # Parquet Reader for Star Catalogs
//!
//! Column-projected ingestion of a star catalog stored as **Apache Parquet** into a
//! [`StarCatalog`].
//!
//! ## Overview
//! -----------------
//! The entry point is a crate-internal routine that reads Parquet record batches,
//! projects only the raw catalog columns, decodes them once per batch into typed
//! vectors, and appends one [`StarRecord`] per row. It is called by the public
//! [`CatalogFile`](crate::catalog::catalog_file::CatalogFile) helpers.
//!
//! Key design points:
//! - **Projection-first**: materialize only the raw columns listed in
//!   [`RAW_COLUMNS`], under any of their accepted names.
//! - **Typed decode once per batch**: each projected column is converted to a
//!   `Vec<Option<_>>` before the row loop.
//! - **Derived columns are never read**: precomputed columns such as `d`, `M_v` or
//!   `Tipo_espectral` are skipped; enrichment always recomputes them.
//!
//! ## Accepted Arrow types
//! -----------------
//! - Float columns: `Float64`, `Float32`, `Int32`, `Int64`.
//! - `HIP`: `Int32`, `Int64`, `UInt32`, `UInt64` (out-of-range identifiers become `None`).
//! - Text columns: `Utf8`, `LargeUtf8`, and `Dictionary(Int32, Utf8)` (categorical
//!   columns written by dataframe libraries).
//!
//! Any other type is a [`HipcatError::UnsupportedColumnType`].
//!
//! ## Null Handling Policy
//! -----------------
//! Nulls and `NaN` cells become `None` (see [`StarRecord::normalized`]). Rows are never
//! skipped, so the catalog keeps one record per file row.
//!
//! ## Missing Columns
//! -----------------
//! A raw column absent from the file is filled with `None` and reported with a warning,
//! unless [`CatalogParams::strict_columns`] is set, in which case
//! [`HipcatError::MissingColumn`] is returned before any row is read.
use std::fs::File;

use arrow_array::cast::AsArray;
use arrow_array::types::{
    Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type,
};
use arrow_array::{Array, ArrayRef, RecordBatch, RecordBatchReader};
use arrow_schema::DataType;
use camino::Utf8Path;
use log::{debug, info, warn};
use parquet::arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ProjectionMask};

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::{StarCatalog, StarRecord};
use crate::constants::{
    RawColumn, COL_BTMAG, COL_B_V, COL_DEC, COL_HIP, COL_HPMAG, COL_PARALLAX, COL_PM_DE,
    COL_PM_RA, COL_RA, COL_SPECTRAL_RAW, COL_VAR_PERIOD, COL_VAR_TYPE, COL_VMAG, COL_VTMAG,
    COL_V_I, COL_V_I_RED, PRECOMPUTED_COLUMNS, RAW_COLUMNS,
};
use crate::hipcat_errors::HipcatError;
use crate::params::CatalogParams;

fn unsupported(column: &str, found: &DataType) -> HipcatError {
    HipcatError::UnsupportedColumnType {
        column: column.to_string(),
        found: found.to_string(),
    }
}

/// Decode a numeric Arrow column into `f64` values.
pub(crate) fn float_values(
    array: &ArrayRef,
    column: &str,
) -> Result<Vec<Option<f64>>, HipcatError> {
    let values = match array.data_type() {
        DataType::Float64 => array.as_primitive::<Float64Type>().iter().collect(),
        DataType::Float32 => array
            .as_primitive::<Float32Type>()
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Int32 => array
            .as_primitive::<Int32Type>()
            .iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Int64 => array
            .as_primitive::<Int64Type>()
            .iter()
            .map(|v| v.map(|x| x as f64))
            .collect(),
        other => return Err(unsupported(column, other)),
    };
    Ok(values)
}

/// Decode an integer Arrow column into catalog identifiers.
pub(crate) fn id_values(array: &ArrayRef, column: &str) -> Result<Vec<Option<u32>>, HipcatError> {
    let values = match array.data_type() {
        DataType::UInt32 => array.as_primitive::<UInt32Type>().iter().collect(),
        DataType::UInt64 => array
            .as_primitive::<UInt64Type>()
            .iter()
            .map(|v| v.and_then(|x| u32::try_from(x).ok()))
            .collect(),
        DataType::Int32 => array
            .as_primitive::<Int32Type>()
            .iter()
            .map(|v| v.and_then(|x| u32::try_from(x).ok()))
            .collect(),
        DataType::Int64 => array
            .as_primitive::<Int64Type>()
            .iter()
            .map(|v| v.and_then(|x| u32::try_from(x).ok()))
            .collect(),
        other => return Err(unsupported(column, other)),
    };
    Ok(values)
}

/// Decode a string or categorical Arrow column.
pub(crate) fn text_values(
    array: &ArrayRef,
    column: &str,
) -> Result<Vec<Option<String>>, HipcatError> {
    let values = match array.data_type() {
        DataType::Utf8 => array
            .as_string::<i32>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::LargeUtf8 => array
            .as_string::<i64>()
            .iter()
            .map(|v| v.map(str::to_string))
            .collect(),
        DataType::Dictionary(key, value)
            if key.as_ref() == &DataType::Int32 && value.as_ref() == &DataType::Utf8 =>
        {
            let dict = array.as_dictionary::<Int32Type>();
            let labels = dict.values().as_string::<i32>();
            dict.keys()
                .iter()
                .map(|k| {
                    k.and_then(|k| usize::try_from(k).ok())
                        .filter(|k| *k < labels.len() && labels.is_valid(*k))
                        .map(|k| labels.value(k).to_string())
                })
                .collect()
        }
        other => return Err(unsupported(column, other)),
    };
    Ok(values)
}

/// Position of each raw column inside the projected record batches.
struct ColumnPositions {
    positions: Vec<(RawColumn, Option<usize>)>,
}

impl ColumnPositions {
    /// Resolve every raw column against a batch schema, taking the first accepted name found.
    fn resolve(schema: &arrow_schema::Schema) -> Self {
        let positions = RAW_COLUMNS
            .iter()
            .map(|raw| {
                let pos = raw.names.iter().find_map(|name| schema.index_of(name).ok());
                (*raw, pos)
            })
            .collect();
        ColumnPositions { positions }
    }

    fn position(&self, column: RawColumn) -> Option<usize> {
        self.positions
            .iter()
            .find(|(raw, _)| *raw == column)
            .and_then(|(_, pos)| *pos)
    }

    fn floats(
        &self,
        batch: &RecordBatch,
        column: RawColumn,
    ) -> Result<Vec<Option<f64>>, HipcatError> {
        match self.position(column) {
            Some(i) => float_values(batch.column(i), column.canonical()),
            None => Ok(vec![None; batch.num_rows()]),
        }
    }

    fn ids(&self, batch: &RecordBatch, column: RawColumn) -> Result<Vec<Option<u32>>, HipcatError> {
        match self.position(column) {
            Some(i) => id_values(batch.column(i), column.canonical()),
            None => Ok(vec![None; batch.num_rows()]),
        }
    }

    fn texts(
        &self,
        batch: &RecordBatch,
        column: RawColumn,
    ) -> Result<Vec<Option<String>>, HipcatError> {
        match self.position(column) {
            Some(i) => text_values(batch.column(i), column.canonical()),
            None => Ok(vec![None; batch.num_rows()]),
        }
    }
}

/// Convert one projected record batch into catalog rows.
fn decode_batch(
    batch: &RecordBatch,
    positions: &ColumnPositions,
) -> Result<Vec<StarRecord>, HipcatError> {
    let hip = positions.ids(batch, COL_HIP)?;
    let ra = positions.floats(batch, COL_RA)?;
    let dec = positions.floats(batch, COL_DEC)?;
    let plx = positions.floats(batch, COL_PARALLAX)?;
    let pm_ra = positions.floats(batch, COL_PM_RA)?;
    let pm_de = positions.floats(batch, COL_PM_DE)?;
    let vmag = positions.floats(batch, COL_VMAG)?;
    let bt = positions.floats(batch, COL_BTMAG)?;
    let vt = positions.floats(batch, COL_VTMAG)?;
    let hp = positions.floats(batch, COL_HPMAG)?;
    let b_v = positions.floats(batch, COL_B_V)?;
    let v_i = positions.floats(batch, COL_V_I)?;
    let v_i_red = positions.floats(batch, COL_V_I_RED)?;
    let mut sp_type = positions.texts(batch, COL_SPECTRAL_RAW)?;
    let mut var_type = positions.texts(batch, COL_VAR_TYPE)?;
    let period = positions.floats(batch, COL_VAR_PERIOD)?;

    let records = (0..batch.num_rows())
        .map(|i| {
            StarRecord {
                hip: hip[i],
                ra_deg: ra[i],
                dec_deg: dec[i],
                parallax_mas: plx[i],
                pm_ra: pm_ra[i],
                pm_de: pm_de[i],
                vmag: vmag[i],
                bt_mag: bt[i],
                vt_mag: vt[i],
                hp_mag: hp[i],
                b_v: b_v[i],
                v_i: v_i[i],
                v_i_red: v_i_red[i],
                spectral_class_raw: sp_type[i].take(),
                variability_type: var_type[i].take(),
                variability_period: period[i],
            }
            .normalized()
        })
        .collect();
    Ok(records)
}

/// Load a star catalog from a Parquet file into an existing [`StarCatalog`].
///
/// Arguments
/// -----------------
/// * `catalog` – The mutable [`StarCatalog`] rows are appended to (file order).
/// * `parquet` – Path to the input Parquet file.
/// * `params` – Reader configuration (batch size, strict column policy).
///
/// Return
/// ----------
/// * `Ok(n)` – number of rows appended.
/// * `Err(HipcatError)` – I/O, Parquet, unsupported column type, or (in strict mode)
///   missing column.
///
/// See also
/// ------------
/// * [`CatalogFile::new_from_parquet`](crate::catalog::catalog_file::CatalogFile::new_from_parquet) – Public wrapper.
pub(crate) fn parquet_to_catalog(
    catalog: &mut StarCatalog,
    parquet: &Utf8Path,
    params: &CatalogParams,
) -> Result<usize, HipcatError> {
    let file = File::open(parquet)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let parquet_metadata = builder.metadata();
    let total_rows = parquet_metadata.file_metadata().num_rows();
    let schema_descr = parquet_metadata.file_metadata().schema_descr();
    let all_fields = schema_descr.columns();

    for name in all_fields.iter().map(|f| f.name()) {
        if PRECOMPUTED_COLUMNS.contains(&name) {
            debug!("Ignoring precomputed column '{name}' in {parquet}");
        }
    }

    // Leaf indices of the raw columns present in the file.
    let mut projection_indices = Vec::with_capacity(RAW_COLUMNS.len());
    for raw in RAW_COLUMNS.iter() {
        let found = raw
            .names
            .iter()
            .find_map(|name| all_fields.iter().position(|f| f.name() == *name));
        match found {
            Some(idx) => projection_indices.push(idx),
            None if params.strict_columns => {
                return Err(HipcatError::MissingColumn(raw.canonical().to_string()))
            }
            None => warn!(
                "Column '{}' not found in {parquet}; filling with missing values",
                raw.canonical()
            ),
        }
    }
    let mask = ProjectionMask::leaves(schema_descr, projection_indices);

    let reader = builder
        .with_projection(mask)
        .with_batch_size(params.batch_size)
        .build()?;
    let positions = ColumnPositions::resolve(reader.schema().as_ref());

    #[cfg(feature = "progress")]
    let pb = {
        let pb = ProgressBar::new(total_rows.max(0) as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} rows ({percent:>3}%) | {per_sec} | ETA {eta_precise}",
        ) {
            pb.set_style(style);
        }
        pb
    };

    let start_len = catalog.len();
    catalog.reserve(usize::try_from(total_rows).unwrap_or(0));

    for maybe_batch in reader {
        let batch = maybe_batch?;
        debug!("Decoding record batch of {} rows", batch.num_rows());
        let rows = decode_batch(&batch, &positions)?;

        #[cfg(feature = "progress")]
        pb.inc(rows.len() as u64);

        catalog.extend(rows);
    }

    #[cfg(feature = "progress")]
    pb.finish_and_clear();

    let appended = catalog.len() - start_len;
    info!("Read {appended} catalog rows from {parquet}");
    Ok(appended)
}

#[cfg(test)]
mod parquet_reader_test {
    use super::*;
    use arrow_array::{
        DictionaryArray, Float32Array, Int64Array, LargeStringArray, StringArray, UInt8Array,
    };
    use std::sync::Arc;

    #[test]
    fn test_float_values_widen_types() {
        let f32s: ArrayRef = Arc::new(Float32Array::from(vec![Some(1.5), None]));
        assert_eq!(float_values(&f32s, "Vmag").unwrap(), vec![Some(1.5), None]);

        let i64s: ArrayRef = Arc::new(Int64Array::from(vec![Some(-3), Some(7)]));
        assert_eq!(float_values(&i64s, "Vmag").unwrap(), vec![Some(-3.0), Some(7.0)]);
    }

    #[test]
    fn test_unsupported_type() {
        let bytes: ArrayRef = Arc::new(UInt8Array::from(vec![1u8]));
        assert_eq!(
            float_values(&bytes, "Vmag").unwrap_err(),
            HipcatError::UnsupportedColumnType {
                column: "Vmag".into(),
                found: "UInt8".into()
            }
        );
    }

    #[test]
    fn test_id_values_reject_out_of_range() {
        let ids: ArrayRef =
            Arc::new(Int64Array::from(vec![Some(42), Some(-1), Some(1 << 40), None]));
        assert_eq!(
            id_values(&ids, "HIP").unwrap(),
            vec![Some(42), None, None, None]
        );
    }

    #[test]
    fn test_text_values() {
        let utf8: ArrayRef = Arc::new(StringArray::from(vec![Some("G2V"), None]));
        assert_eq!(
            text_values(&utf8, "SpType").unwrap(),
            vec![Some("G2V".to_string()), None]
        );

        let large: ArrayRef = Arc::new(LargeStringArray::from(vec![Some("K0III")]));
        assert_eq!(
            text_values(&large, "SpType").unwrap(),
            vec![Some("K0III".to_string())]
        );

        let dict: DictionaryArray<Int32Type> =
            vec![Some("A0V"), None, Some("A0V"), Some("M2")].into_iter().collect();
        let dict: ArrayRef = Arc::new(dict);
        assert_eq!(
            text_values(&dict, "SpType").unwrap(),
            vec![
                Some("A0V".to_string()),
                None,
                Some("A0V".to_string()),
                Some("M2".to_string())
            ]
        );
    }
}
