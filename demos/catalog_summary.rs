//! Load a catalog, enrich it, and print a short report.
//!
//!   cargo run --example catalog_summary -- hipparcos.parquet [enriched.parquet]
//!   RUST_LOG=debug cargo run --example catalog_summary -- stars.csv
//!
//! Files ending in `.csv` are read as CSV, anything else as Parquet. When a second path
//! is given, the enriched table is written there as Parquet.
use std::error::Error;

use camino::Utf8PathBuf;
use flexi_logger::Logger;

use hipcat::catalog::columns::StarColumn;
use hipcat::catalog::parquet_writer::write_enriched_parquet;
use hipcat::features::{classify_catalog, TemperatureRuleClassifier};
use hipcat::stats::{describe, grouped_histogram, SpectralTypeCounts};
use hipcat::{
    CatalogFile, CatalogParams, Enrich, EnrichedCatalogDisplayExt, EnrichedCatalogExt,
    StarCatalog,
};

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let mut args = std::env::args().skip(1);
    let input: Utf8PathBuf = args
        .next()
        .ok_or("usage: catalog_summary <catalog.parquet|catalog.csv> [enriched.parquet]")?
        .into();
    let output: Option<Utf8PathBuf> = args.next().map(Utf8PathBuf::from);

    let params = CatalogParams::builder().csv_comment(Some(b'#')).build()?;
    println!("{params:#}\n");

    let raw = if input.extension() == Some("csv") {
        StarCatalog::new_from_csv(&input, &params)?
    } else {
        StarCatalog::new_from_parquet(&input, &params)?
    };
    let enriched = raw.enrich();

    println!("{:#}\n", enriched.derived_coverage());
    println!("{}\n", SpectralTypeCounts::from_catalog(&enriched));

    for (column, summary) in describe(&enriched)
        .into_iter()
        .filter(|(c, _)| c.is_derived())
    {
        println!("{:<12} {summary:.2}", column.name());
    }
    println!();

    if let Some(groups) = grouped_histogram(&enriched, StarColumn::MV, 10) {
        for (spectral_type, hist) in groups.iter().filter(|(_, h)| h.total() > 0) {
            println!("M_v {spectral_type}: {:?}", hist.counts);
        }
        println!();
    }

    let visible = enriched.filter_visible(6.5);
    println!(
        "{}",
        visible.show().sorted().with_precision(2).with_limit(25)
    );

    let predictions = classify_catalog(&TemperatureRuleClassifier, &enriched)?;
    let agreeing = predictions
        .iter()
        .filter(|(i, t)| enriched[*i].derived.spectral_type == Some(*t))
        .count();
    println!(
        "temperature rule agrees with the catalog type on {agreeing} of {} stars",
        predictions.len()
    );

    if let Some(output) = output {
        write_enriched_parquet(&enriched, &output)?;
    }
    Ok(())
}
