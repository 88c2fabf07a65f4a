//! Parquet export of an enriched catalog.
//!
//! The file carries the raw columns under their contract names (in
//! [`RAW_COLUMNS`] order) followed by the derived columns of
//! [`DERIVED_COLUMNS`]. Every column is nullable; undefined values are written as nulls.
//! Spectral categories are written as `Utf8` labels (`"K"`, `"K3"`).
//!
//! Reading such a file back with
//! [`CatalogFile::new_from_parquet`](crate::catalog::catalog_file::CatalogFile::new_from_parquet)
//! recovers the raw table exactly; the derived columns are ignored by the reader and
//! recomputed on enrichment.
use std::fs::File;
use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray, UInt32Array};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use camino::Utf8Path;
use log::info;
use parquet::arrow::ArrowWriter;

use crate::catalog::EnrichedStar;
use crate::constants::{
    COL_DISTANCE, COL_M_HIP, COL_M_V, COL_SPECTRAL_SUBCLASS, COL_SPECTRAL_TYPE, COL_T_EFF,
    RAW_COLUMNS,
};
use crate::constants::{ColumnKind, RawColumn};
use crate::hipcat_errors::HipcatError;

fn arrow_type(kind: ColumnKind) -> DataType {
    match kind {
        ColumnKind::Id => DataType::UInt32,
        ColumnKind::Float => DataType::Float64,
        ColumnKind::Text => DataType::Utf8,
    }
}

/// Arrow schema of an exported enriched catalog.
pub fn enriched_schema() -> SchemaRef {
    let raw = RAW_COLUMNS
        .iter()
        .map(|c: &RawColumn| Field::new(c.canonical(), arrow_type(c.kind), true));
    let derived = [
        Field::new(COL_DISTANCE, DataType::Float64, true),
        Field::new(COL_M_V, DataType::Float64, true),
        Field::new(COL_M_HIP, DataType::Float64, true),
        Field::new(COL_T_EFF, DataType::Float64, true),
        Field::new(COL_SPECTRAL_TYPE, DataType::Utf8, true),
        Field::new(COL_SPECTRAL_SUBCLASS, DataType::Utf8, true),
    ];
    Arc::new(Schema::new(raw.chain(derived).collect::<Vec<_>>()))
}

fn floats<'a>(
    catalog: &'a [EnrichedStar],
    f: impl Fn(&'a EnrichedStar) -> Option<f64>,
) -> ArrayRef {
    Arc::new(catalog.iter().map(f).collect::<Float64Array>())
}

fn texts<'a>(
    catalog: &'a [EnrichedStar],
    f: impl Fn(&'a EnrichedStar) -> Option<String>,
) -> ArrayRef {
    Arc::new(catalog.iter().map(f).collect::<StringArray>())
}

/// Build one Arrow record batch holding the whole table.
pub fn to_record_batch(catalog: &[EnrichedStar]) -> Result<RecordBatch, HipcatError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(catalog.iter().map(|s| s.record.hip).collect::<UInt32Array>()),
        floats(catalog, |s| s.record.ra_deg),
        floats(catalog, |s| s.record.dec_deg),
        floats(catalog, |s| s.record.parallax_mas),
        floats(catalog, |s| s.record.pm_ra),
        floats(catalog, |s| s.record.pm_de),
        floats(catalog, |s| s.record.vmag),
        floats(catalog, |s| s.record.bt_mag),
        floats(catalog, |s| s.record.vt_mag),
        floats(catalog, |s| s.record.hp_mag),
        floats(catalog, |s| s.record.b_v),
        floats(catalog, |s| s.record.v_i),
        floats(catalog, |s| s.record.v_i_red),
        texts(catalog, |s| s.record.spectral_class_raw.clone()),
        texts(catalog, |s| s.record.variability_type.clone()),
        floats(catalog, |s| s.record.variability_period),
        floats(catalog, |s| s.derived.distance_pc),
        floats(catalog, |s| s.derived.m_v),
        floats(catalog, |s| s.derived.m_hip),
        floats(catalog, |s| s.derived.t_eff),
        texts(catalog, |s| s.derived.spectral_type.map(|t| t.to_string())),
        texts(catalog, |s| s.derived.spectral_subclass.map(|c| c.to_string())),
    ];
    Ok(RecordBatch::try_new(enriched_schema(), columns)?)
}

/// Write an enriched catalog to a Parquet file, replacing any existing file.
///
/// Return
/// ----------
/// * `Ok(n)` – number of rows written.
/// * `Err(HipcatError)` – I/O, Arrow, or Parquet failure.
pub fn write_enriched_parquet(
    catalog: &[EnrichedStar],
    path: &Utf8Path,
) -> Result<usize, HipcatError> {
    let batch = to_record_batch(catalog)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    info!("Wrote {} enriched rows to {path}", catalog.len());
    Ok(catalog.len())
}
