//! # Tabular display for enriched catalogs
//!
//! Borrowing renderers that print an enriched table with Rust formatting (`{}`), without
//! cloning rows.
//!
//! ## Overview
//!
//! The entry point is the display adaptor [`EnrichedCatalogDisplay`], built through
//! [`EnrichedCatalogDisplayExt`]. Two layouts are available:
//!
//! - **Compact** (fixed-width):
//!   `# | HIP | Vmag | B-V | SpType | Type | Sub | d [pc] | M_v | T_eff [K]`
//! - **Wide** (uses `comfy-table`):
//!   every raw column followed by every derived column. Cells are never wrapped, so
//!   the table may exceed the terminal width.
//!
//! Undefined values render as `—`.
//!
//! ## Precision, sorting, limits
//!
//! - `with_precision(p)` sets the fractional digits of every float column (default 3;
//!   temperatures are always printed without decimals).
//! - `sorted()` prints rows in spectral subclass order (`O0 … M9`, undefined last). The
//!   `#` column always shows the **original index** for traceability.
//! - `with_limit(n)` prints the first `n` rows (after sorting) and a trailing
//!   `… (k more rows)` line.
//!
//! ## Quick examples
//!
//! ```rust
//! use hipcat::catalog::display::EnrichedCatalogDisplayExt;
//! use hipcat::catalog::{Enrich, StarRecord};
//!
//! let table = vec![StarRecord {
//!     hip: Some(32349),
//!     vmag: Some(-1.46),
//!     parallax_mas: Some(379.21),
//!     spectral_class_raw: Some("A0m...".into()),
//!     ..Default::default()
//! }]
//! .enrich();
//!
//! let text = table.show().with_precision(2).to_string();
//! assert!(text.contains("32349"));
//! println!("{}", table.table_wide().sorted());
//! ```
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::catalog::EnrichedStar;
use crate::constants::{
    COL_BTMAG, COL_B_V, COL_DEC, COL_DISTANCE, COL_HIP, COL_HPMAG, COL_M_HIP, COL_M_V,
    COL_PARALLAX, COL_PM_DE, COL_PM_RA, COL_RA, COL_SPECTRAL_RAW, COL_SPECTRAL_SUBCLASS,
    COL_SPECTRAL_TYPE, COL_T_EFF, COL_VAR_PERIOD, COL_VAR_TYPE, COL_VMAG, COL_VTMAG, COL_V_I,
    COL_V_I_RED,
};

/// Rendering of an undefined cell.
pub const UNDEFINED_CELL: &str = "—";

enum TableMode {
    Compact,
    Wide,
}

/// Display adaptor rendering an enriched table.
///
/// See also
/// ------------
/// * [`EnrichedCatalogDisplayExt`] – Builders for each mode.
pub struct EnrichedCatalogDisplay<'a> {
    catalog: &'a [EnrichedStar],
    mode: TableMode,
    /// Fractional digits for float columns (default = 3)
    precision: usize,
    /// Maximum number of printed rows
    limit: Option<usize>,
    sorted: bool,
}

fn float_cell(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| UNDEFINED_CELL.to_string(), |v| format!("{v:.precision$}"))
}

fn text_cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| UNDEFINED_CELL.to_string(), |v| v.to_string())
}

impl<'a> EnrichedCatalogDisplay<'a> {
    /// Build a new adaptor in compact mode.
    pub fn new(catalog: &'a [EnrichedStar]) -> Self {
        Self {
            catalog,
            mode: TableMode::Compact,
            precision: 3,
            limit: None,
            sorted: false,
        }
    }

    /// Select the wide layout (`true`) or go back to the compact one.
    pub fn wide(mut self, yes: bool) -> Self {
        self.mode = if yes {
            TableMode::Wide
        } else {
            TableMode::Compact
        };
        self
    }

    pub fn with_precision(mut self, p: usize) -> Self {
        self.precision = p;
        self
    }

    /// Print at most `n` rows.
    pub fn with_limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Print rows in spectral subclass order, undefined last.
    ///
    /// Ties keep their original relative order.
    pub fn sorted(mut self) -> Self {
        self.sorted = true;
        self
    }

    /// `(original_index, row)` pairs honoring the `sorted` flag and the row limit.
    fn rows(&self) -> Vec<(usize, &'a EnrichedStar)> {
        let mut rows: Vec<(usize, &'a EnrichedStar)> = self.catalog.iter().enumerate().collect();
        if self.sorted {
            rows.sort_by_key(|(_, s)| {
                let sub = s.derived.spectral_subclass;
                (sub.is_none(), sub)
            });
        }
        if let Some(n) = self.limit {
            rows.truncate(n);
        }
        rows
    }

    fn write_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;
        writeln!(
            f,
            "{:>5}  {:>6}  {:>7}  {:>7}  {:<12}  {:<4}  {:<3}  {:>10}  {:>7}  {:>9}",
            "#", "HIP", "Vmag", "B-V", "SpType", "Type", "Sub", "d [pc]", "M_v", "T_eff [K]"
        )?;
        for (i, s) in self.rows() {
            let r = &s.record;
            let d = &s.derived;
            writeln!(
                f,
                "{:>5}  {:>6}  {:>7}  {:>7}  {:<12}  {:<4}  {:<3}  {:>10}  {:>7}  {:>9}",
                i,
                text_cell(r.hip),
                float_cell(r.vmag, p),
                float_cell(r.b_v, p),
                r.spectral_class_raw.as_deref().unwrap_or(UNDEFINED_CELL),
                text_cell(d.spectral_type),
                text_cell(d.spectral_subclass),
                float_cell(d.distance_pc, p),
                float_cell(d.m_v, p),
                float_cell(d.t_eff, 0),
            )?;
        }
        Ok(())
    }

    fn render_wide_comfy(&self) -> String {
        let p = self.precision;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Disabled);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new(COL_HIP.canonical()),
            Cell::new(COL_RA.canonical()),
            Cell::new(COL_DEC.canonical()),
            Cell::new(COL_PARALLAX.canonical()),
            Cell::new(COL_PM_RA.canonical()),
            Cell::new(COL_PM_DE.canonical()),
            Cell::new(COL_VMAG.canonical()),
            Cell::new(COL_BTMAG.canonical()),
            Cell::new(COL_VTMAG.canonical()),
            Cell::new(COL_HPMAG.canonical()),
            Cell::new(COL_B_V.canonical()),
            Cell::new(COL_V_I.canonical()),
            Cell::new(COL_V_I_RED.canonical()),
            Cell::new(COL_SPECTRAL_RAW.canonical()),
            Cell::new(COL_VAR_TYPE.canonical()),
            Cell::new(COL_VAR_PERIOD.canonical()),
            Cell::new(COL_DISTANCE),
            Cell::new(COL_M_V),
            Cell::new(COL_M_HIP),
            Cell::new(COL_T_EFF),
            Cell::new(COL_SPECTRAL_TYPE),
            Cell::new(COL_SPECTRAL_SUBCLASS),
        ]);

        let right = |s: String| Cell::new(s).set_alignment(CellAlignment::Right);
        for (i, s) in self.rows() {
            let r = &s.record;
            let d = &s.derived;
            table.add_row(Row::from(vec![
                right(i.to_string()),
                right(text_cell(r.hip)),
                right(float_cell(r.ra_deg, p)),
                right(float_cell(r.dec_deg, p)),
                right(float_cell(r.parallax_mas, p)),
                right(float_cell(r.pm_ra, p)),
                right(float_cell(r.pm_de, p)),
                right(float_cell(r.vmag, p)),
                right(float_cell(r.bt_mag, p)),
                right(float_cell(r.vt_mag, p)),
                right(float_cell(r.hp_mag, p)),
                right(float_cell(r.b_v, p)),
                right(float_cell(r.v_i, p)),
                right(float_cell(r.v_i_red, p)),
                Cell::new(text_cell(r.spectral_class_raw.as_deref())),
                Cell::new(text_cell(r.variability_type.as_deref())),
                right(float_cell(r.variability_period, p)),
                right(float_cell(d.distance_pc, p)),
                right(float_cell(d.m_v, p)),
                right(float_cell(d.m_hip, p)),
                right(float_cell(d.t_eff, 0)),
                Cell::new(text_cell(d.spectral_type)),
                Cell::new(text_cell(d.spectral_subclass)),
            ]));
        }

        table.to_string()
    }
}

/// Builders for [`EnrichedCatalogDisplay`].
///
/// ```rust,ignore
/// println!("{}", enriched.show());
/// println!("{}", enriched.table_wide().with_limit(20));
/// ```
pub trait EnrichedCatalogDisplayExt {
    /// Compact fixed-width table.
    fn show(&self) -> EnrichedCatalogDisplay<'_>;

    /// Wide table with every column.
    fn table_wide(&self) -> EnrichedCatalogDisplay<'_>;

    fn show_string(&self) -> String {
        format!("{}", self.show())
    }
}

impl EnrichedCatalogDisplayExt for [EnrichedStar] {
    fn show(&self) -> EnrichedCatalogDisplay<'_> {
        EnrichedCatalogDisplay::new(self)
    }
    fn table_wide(&self) -> EnrichedCatalogDisplay<'_> {
        EnrichedCatalogDisplay::new(self).wide(true)
    }
}

impl fmt::Display for EnrichedCatalogDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.catalog.len();
        writeln!(f, "Enriched catalog (n={n})")?;
        writeln!(f, "-----------------------")?;

        match self.mode {
            TableMode::Wide => f.write_str(&self.render_wide_comfy())?,
            TableMode::Compact => self.write_compact(f)?,
        }

        let shown = self.limit.map_or(n, |l| l.min(n));
        if shown < n {
            if matches!(self.mode, TableMode::Wide) {
                writeln!(f)?;
            }
            writeln!(f, "… ({} more rows)", n - shown)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod enriched_display_tests {
    use super::*;
    use crate::catalog::{Enrich, StarRecord};

    fn sample() -> Vec<EnrichedStar> {
        vec![
            StarRecord {
                hip: Some(11),
                vmag: Some(5.0),
                parallax_mas: Some(10.0),
                b_v: Some(1.5),
                spectral_class_raw: Some("M1III".into()),
                ..Default::default()
            },
            StarRecord {
                hip: Some(22),
                vmag: Some(2.0),
                ..Default::default()
            },
            StarRecord {
                hip: Some(33),
                vmag: Some(4.0),
                parallax_mas: Some(4.0),
                spectral_class_raw: Some("B8V".into()),
                ..Default::default()
            },
        ]
        .enrich()
    }

    fn data_lines(s: &str) -> Vec<&str> {
        s.lines().skip(3).collect()
    }

    #[test]
    fn test_compact_layout() {
        let table = sample();
        let s = table.show().to_string();
        assert!(s.starts_with("Enriched catalog (n=3)\n"));
        let lines = data_lines(&s);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("100.000"));
        assert!(lines[0].contains("M1III"));
        // row 22 has no derived value at all
        assert!(lines[1].matches(UNDEFINED_CELL).count() >= 6);
    }

    #[test]
    fn test_precision() {
        let s = sample().show().with_precision(1).to_string();
        assert!(data_lines(&s)[0].contains("100.0 "));
        assert!(!s.contains("100.000"));
    }

    #[test]
    fn test_sorted_keeps_original_index() {
        let table = sample();
        let s = table.show().sorted().to_string();
        let first_cols: Vec<&str> = data_lines(&s)
            .iter()
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(first_cols, vec!["2", "0", "1"]);
    }

    #[test]
    fn test_limit() {
        let s = sample().show().with_limit(1).to_string();
        assert_eq!(data_lines(&s).len(), 2);
        assert!(s.ends_with("… (2 more rows)\n"));
    }

    #[test]
    fn test_wide_has_every_column() {
        let s = sample().table_wide().to_string();
        for name in ["HIP", "parallax_mas", "variability_period", "M_Hip", "spectral_subclass"] {
            assert!(s.contains(name), "missing header {name}");
        }
        assert!(s.contains("B8"));
    }
}
