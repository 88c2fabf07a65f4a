//! # Catalog statistics
//!
//! Aggregates over an enriched table, used by chart and report consumers.
//!
//! Components
//! -----------------
//! * [`Histogram`] – Equal-width binning of one numeric column (`None` ignored).
//! * [`grouped_histogram`] – One histogram per spectral type on shared bin edges.
//! * [`ColumnSummary`] – Count, missing, min, quartile, median, p95, max and mean of a column.
//! * [`describe`] – [`ColumnSummary`] of every numeric column.
//! * [`SpectralTypeCounts`] / [`SpectralSubclassCounts`] – Category counts, every
//!   category present (zero-filled) in category order, plus an `undefined` count.
//!
//! Missing values
//! -----------------
//! `None` and non-finite values are never binned nor summarized; they are counted in the
//! `missing` field of the aggregate that saw them.
use std::collections::BTreeMap;
use std::fmt;

use ordered_float::NotNan;

use crate::catalog::columns::StarColumn;
use crate::catalog::display::UNDEFINED_CELL;
use crate::catalog::EnrichedStar;
use crate::spectral::{SpectralSubclass, SpectralType};

/// Split an iterator of optional values into its finite values and a missing count.
fn split_finite<I>(values: I) -> (Vec<f64>, usize)
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut finite = Vec::new();
    let mut missing = 0;
    for v in values {
        match v.filter(|x| x.is_finite()) {
            Some(x) => finite.push(x),
            None => missing += 1,
        }
    }
    (finite, missing)
}

/// Upper limit on the number of bins [`Histogram::with_bin_width`] will allocate.
pub const MAX_BINS: usize = 1 << 20;

/// Equal-width histogram.
///
/// Bins are half-open `[edges[k], edges[k+1])` except the last one, which is closed so
/// that the maximum value is counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `nbins + 1` increasing bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Values that were `None` or non-finite
    pub missing: usize,
    /// Finite values outside `[edges[0], edges[nbins]]` (only with explicit edges)
    pub outside: usize,
}

impl Histogram {
    /// Histogram with `nbins` equal-width bins spanning `[min, max]` of the values.
    ///
    /// When every value is equal, the single value sits in the middle of a range of
    /// width 1.
    ///
    /// Return
    /// ----------
    /// * `None` if `nbins == 0` or no value is finite.
    pub fn with_bins<I>(values: I, nbins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        if nbins == 0 {
            return None;
        }
        let (finite, missing) = split_finite(values);
        let (lo, hi) = min_max(&finite)?;
        let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
        let width = (hi - lo) / nbins as f64;
        let mut edges: Vec<f64> = (0..nbins).map(|k| lo + k as f64 * width).collect();
        edges.push(hi);
        Some(Self::binned(finite, missing, edges))
    }

    /// Histogram with bins of a fixed `width`, starting at the minimum value.
    ///
    /// Return
    /// ----------
    /// * `None` if `width` is not strictly positive and finite, if no value is finite, or
    ///   if the range would need more than [`MAX_BINS`] bins.
    pub fn with_bin_width<I>(values: I, width: f64) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        if !(width.is_finite() && width > 0.0) {
            return None;
        }
        let (finite, missing) = split_finite(values);
        let (lo, hi) = min_max(&finite)?;
        let span = ((hi - lo) / width).ceil();
        if !span.is_finite() || span > MAX_BINS as f64 {
            return None;
        }
        let nbins = (span as usize).max(1);
        let mut edges: Vec<f64> = (0..nbins).map(|k| lo + k as f64 * width).collect();
        // rounding of `lo + nbins * width` may land just below the maximum
        edges.push((lo + nbins as f64 * width).max(hi));
        Some(Self::binned(finite, missing, edges))
    }

    /// Histogram over explicit, strictly increasing edges (at least two).
    pub fn with_edges<I>(values: I, edges: Vec<f64>) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let increasing = edges.windows(2).all(|w| w[0] < w[1]);
        if edges.len() < 2 || !increasing || edges.iter().any(|e| !e.is_finite()) {
            return None;
        }
        let (finite, missing) = split_finite(values);
        Some(Self::binned(finite, missing, edges))
    }

    fn binned(finite: Vec<f64>, missing: usize, edges: Vec<f64>) -> Self {
        let mut hist = Histogram {
            counts: vec![0; edges.len() - 1],
            edges,
            missing,
            outside: 0,
        };
        for x in finite {
            match hist.bin_index(x) {
                Some(k) => hist.counts[k] += 1,
                None => hist.outside += 1,
            }
        }
        hist
    }

    pub fn nbins(&self) -> usize {
        self.counts.len()
    }

    /// Number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin of a value, `None` outside the edges.
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        let first = *self.edges.first()?;
        let last = *self.edges.last()?;
        if !(x >= first && x <= last) {
            return None;
        }
        if x == last {
            return Some(self.nbins() - 1);
        }
        Some(self.edges.partition_point(|e| *e <= x) - 1)
    }

    /// Bin centers, one per bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// Running totals of the counts.
    pub fn cumulative(&self) -> Vec<usize> {
        self.counts
            .iter()
            .scan(0, |acc, c| {
                *acc += c;
                Some(*acc)
            })
            .collect()
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &x| match acc {
        None => Some((x, x)),
        Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
    })
}

/// One histogram per spectral type, all on the edges of the whole column.
///
/// Rows without a spectral type take part in the edges but in no histogram. Every type
/// is a key, in category order, even when it has no row.
///
/// Return
/// ----------
/// * `None` if `nbins == 0` or the column has no finite value.
pub fn grouped_histogram(
    catalog: &[EnrichedStar],
    column: StarColumn,
    nbins: usize,
) -> Option<BTreeMap<SpectralType, Histogram>> {
    let edges = Histogram::with_bins(column.values(catalog), nbins)?.edges;
    SpectralType::ALL
        .into_iter()
        .map(|t| {
            let values = catalog
                .iter()
                .filter(|s| s.derived.spectral_type == Some(t))
                .map(|s| column.value(s));
            Histogram::with_edges(values, edges.clone()).map(|h| (t, h))
        })
        .collect()
}

/// Order statistics of one numeric column.
///
/// Quantiles use the nearest-rank definition: the `p`-th percentile of `n` sorted values
/// is the value of rank `⌈p/100 · n⌉` (at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnSummary {
    /// Finite values
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p95: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

fn nearest_rank(sorted: &[NotNan<f64>], percentile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = ((percentile / 100.0) * sorted.len() as f64).ceil() as usize;
    let idx = rank.clamp(1, sorted.len()) - 1;
    Some(sorted[idx].into_inner())
}

impl ColumnSummary {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let (finite, missing) = split_finite(values);
        let mut sorted: Vec<NotNan<f64>> =
            finite.into_iter().filter_map(|x| NotNan::new(x).ok()).collect();
        sorted.sort_unstable();

        let count = sorted.len();
        let mean = (count > 0)
            .then(|| sorted.iter().map(|x| x.into_inner()).sum::<f64>() / count as f64);

        ColumnSummary {
            count,
            missing,
            min: sorted.first().map(|x| x.into_inner()),
            p25: nearest_rank(&sorted, 25.0),
            median: nearest_rank(&sorted, 50.0),
            p95: nearest_rank(&sorted, 95.0),
            max: sorted.last().map(|x| x.into_inner()),
            mean,
        }
    }

    /// Summary of one column of a table.
    pub fn of(catalog: &[EnrichedStar], column: StarColumn) -> Self {
        Self::from_values(column.values(catalog))
    }
}

/// [`ColumnSummary`] of every numeric column, in [`StarColumn::ALL`] order.
pub fn describe(catalog: &[EnrichedStar]) -> Vec<(StarColumn, ColumnSummary)> {
    StarColumn::ALL
        .into_iter()
        .map(|c| (c, ColumnSummary::of(catalog, c)))
        .collect()
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(3);
        let cell = |v: Option<f64>| {
            v.map_or_else(|| UNDEFINED_CELL.to_string(), |x| format!("{x:.p$}"))
        };
        if f.alternate() {
            writeln!(f, "count   : {}", self.count)?;
            writeln!(f, "missing : {}", self.missing)?;
            writeln!(f, "min     : {}", cell(self.min))?;
            writeln!(f, "p25     : {}", cell(self.p25))?;
            writeln!(f, "median  : {}", cell(self.median))?;
            writeln!(f, "p95     : {}", cell(self.p95))?;
            writeln!(f, "max     : {}", cell(self.max))?;
            write!(f, "mean    : {}", cell(self.mean))
        } else {
            write!(
                f,
                "count={} missing={} min={} p25={} median={} p95={} max={} mean={}",
                self.count,
                self.missing,
                cell(self.min),
                cell(self.p25),
                cell(self.median),
                cell(self.p95),
                cell(self.max),
                cell(self.mean)
            )
        }
    }
}

/// Row count per spectral type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectralTypeCounts {
    /// Every type, `O` to `M`, zero-filled
    pub counts: BTreeMap<SpectralType, usize>,
    pub undefined: usize,
}

impl SpectralTypeCounts {
    pub fn from_catalog(catalog: &[EnrichedStar]) -> Self {
        let mut counts: BTreeMap<SpectralType, usize> =
            SpectralType::ALL.into_iter().map(|t| (t, 0)).collect();
        let mut undefined = 0;
        for star in catalog {
            match star.derived.spectral_type {
                Some(t) => *counts.entry(t).or_default() += 1,
                None => undefined += 1,
            }
        }
        SpectralTypeCounts { counts, undefined }
    }

    pub fn get(&self, spectral_type: SpectralType) -> usize {
        self.counts.get(&spectral_type).copied().unwrap_or(0)
    }

    /// Rows counted, undefined included.
    pub fn total(&self) -> usize {
        self.counts.values().sum::<usize>() + self.undefined
    }
}

impl fmt::Display for SpectralTypeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (t, n) in &self.counts {
            writeln!(f, "{t:<9} : {n}")?;
        }
        write!(f, "undefined : {}", self.undefined)
    }
}

/// Row count per spectral subclass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectralSubclassCounts {
    /// Every subclass, `O0` to `M9`, zero-filled
    pub counts: BTreeMap<SpectralSubclass, usize>,
    pub undefined: usize,
}

impl SpectralSubclassCounts {
    pub fn from_catalog(catalog: &[EnrichedStar]) -> Self {
        let mut counts: BTreeMap<SpectralSubclass, usize> =
            SpectralSubclass::all().map(|c| (c, 0)).collect();
        let mut undefined = 0;
        for star in catalog {
            match star.derived.spectral_subclass {
                Some(c) => *counts.entry(c).or_default() += 1,
                None => undefined += 1,
            }
        }
        SpectralSubclassCounts { counts, undefined }
    }

    pub fn get(&self, subclass: SpectralSubclass) -> usize {
        self.counts.get(&subclass).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum::<usize>() + self.undefined
    }

    /// Subclasses with at least one row, in category order.
    pub fn non_zero(&self) -> impl Iterator<Item = (SpectralSubclass, usize)> + '_ {
        self.counts
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(c, n)| (*c, *n))
    }
}

#[cfg(test)]
mod stats_test {
    use super::*;
    use crate::catalog::{Enrich, StarRecord};
    use approx::assert_relative_eq;

    fn star(vmag: Option<f64>, sp: Option<&str>) -> StarRecord {
        StarRecord {
            vmag,
            spectral_class_raw: sp.map(str::to_string),
            ..Default::default()
        }
    }

    fn table() -> Vec<EnrichedStar> {
        vec![
            star(Some(1.0), Some("B3V")),
            star(Some(2.0), Some("G2V")),
            star(Some(2.5), Some("G8III")),
            star(None, Some("K0")),
            star(Some(5.0), None),
            star(Some(f64::NAN), Some("G5")),
        ]
        .enrich()
    }

    #[test]
    fn test_histogram_with_bins() {
        let values = [Some(0.0), Some(1.0), None, Some(2.0), Some(4.0)];
        let h = Histogram::with_bins(values, 4).unwrap();
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(h.counts, vec![1, 1, 1, 1]);
        assert_eq!(h.missing, 1);
        assert_eq!(h.total(), 4);
        assert_eq!(h.cumulative(), vec![1, 2, 3, 4]);
        assert_eq!(h.centers()[0], 0.5);
    }

    #[test]
    fn test_histogram_degenerate_inputs() {
        assert!(Histogram::with_bins([Some(1.0)], 0).is_none());
        assert!(Histogram::with_bins([None, Some(f64::INFINITY)], 3).is_none());

        let single = Histogram::with_bins([Some(3.0), Some(3.0)], 2).unwrap();
        assert_eq!(single.edges, vec![2.5, 3.0, 3.5]);
        assert_eq!(single.counts, vec![0, 2]);
    }

    #[test]
    fn test_histogram_with_bin_width() {
        let h = Histogram::with_bin_width([Some(0.0), Some(0.9), Some(2.5)], 1.0).unwrap();
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(h.counts, vec![2, 0, 1]);
        assert!(Histogram::with_bin_width([Some(1.0)], 0.0).is_none());
    }

    #[test]
    fn test_histogram_with_bin_width_keeps_maximum() {
        let h = Histogram::with_bin_width([Some(0.0), Some(0.9)], 0.3).unwrap();
        assert_eq!(h.nbins(), 3);
        assert_eq!(h.edges.last().copied(), Some(0.9));
        assert_eq!(h.counts, vec![1, 0, 1]);
        assert_eq!(h.outside, 0);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn test_histogram_with_tiny_bin_width() {
        assert!(Histogram::with_bin_width([Some(0.0), Some(1.0)], 1e-300).is_none());
        let max = MAX_BINS as f64;
        let h = Histogram::with_bin_width([Some(0.0), Some(max)], 1.0).unwrap();
        assert_eq!(h.nbins(), MAX_BINS);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn test_histogram_with_edges_counts_outside() {
        let h =
            Histogram::with_edges([Some(-1.0), Some(0.5), Some(9.0)], vec![0.0, 1.0]).unwrap();
        assert_eq!(h.counts, vec![1]);
        assert_eq!(h.outside, 2);
        assert!(Histogram::with_edges([Some(1.0)], vec![1.0, 1.0]).is_none());
    }

    #[test]
    fn test_grouped_histogram_shares_edges() {
        let groups = grouped_histogram(&table(), StarColumn::Vmag, 2).unwrap();
        assert_eq!(groups.len(), 7);
        assert_eq!(groups.keys().next(), Some(&SpectralType::O));
        let g = &groups[&SpectralType::G];
        assert_eq!(g.edges, vec![1.0, 3.0, 5.0]);
        assert_eq!(g.counts, vec![2, 0]);
        assert_eq!(g.missing, 1);
        assert_eq!(groups[&SpectralType::B].counts, vec![1, 0]);
        assert_eq!(groups[&SpectralType::M].total(), 0);
    }

    #[test]
    fn test_column_summary_nearest_rank() {
        let values = (1..=20).map(|v| Some(v as f64)).chain([None]);
        let s = ColumnSummary::from_values(values);
        assert_eq!(s.count, 20);
        assert_eq!(s.missing, 1);
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.p25, Some(5.0));
        assert_eq!(s.median, Some(10.0));
        assert_eq!(s.p95, Some(19.0));
        assert_eq!(s.max, Some(20.0));
        assert_relative_eq!(s.mean.unwrap(), 10.5);
    }

    #[test]
    fn test_column_summary_empty() {
        let s = ColumnSummary::of(&table(), StarColumn::Distance);
        assert_eq!(s.count, 0);
        assert_eq!(s.missing, 6);
        assert_eq!(s.median, None);
        assert!(s.to_string().contains("median=—"));
    }

    #[test]
    fn test_column_summary_display() {
        let s = ColumnSummary::from_values([Some(1.0), Some(2.0)]);
        assert_eq!(
            format!("{s:.1}"),
            "count=2 missing=0 min=1.0 p25=1.0 median=1.0 p95=2.0 max=2.0 mean=1.5"
        );
        assert!(format!("{s:#}").starts_with("count   : 2\n"));
    }

    #[test]
    fn test_describe_covers_every_column() {
        let all = describe(&table());
        assert_eq!(all.len(), StarColumn::ALL.len());
        let (_, vmag) = all.iter().find(|(c, _)| *c == StarColumn::Vmag).unwrap();
        assert_eq!(vmag.count, 4);
        assert_eq!(vmag.missing, 2);
    }

    #[test]
    fn test_spectral_type_counts() {
        let counts = SpectralTypeCounts::from_catalog(&table());
        assert_eq!(counts.counts.len(), 7);
        assert_eq!(counts.get(SpectralType::G), 3);
        assert_eq!(counts.get(SpectralType::O), 0);
        assert_eq!(counts.undefined, 1);
        assert_eq!(counts.total(), 6);
        let text = counts.to_string();
        assert!(text.starts_with("O         : 0\n"));
        assert!(text.ends_with("undefined : 1"));
    }

    #[test]
    fn test_spectral_subclass_counts() {
        let counts = SpectralSubclassCounts::from_catalog(&table());
        assert_eq!(counts.counts.len(), SpectralSubclass::COUNT);
        let g2 = SpectralSubclass::new(SpectralType::G, 2).unwrap();
        assert_eq!(counts.get(g2), 1);
        let codes: Vec<String> = counts.non_zero().map(|(c, _)| c.to_string()).collect();
        assert_eq!(codes, vec!["B3", "G2", "G5", "G8", "K0"]);
        assert_eq!(counts.total(), 6);
    }
}
