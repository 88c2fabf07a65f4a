//! # hipcat
//!
//! Load a Hipparcos-style star catalog, append the derived astrophysical quantities
//! (distance, absolute magnitudes, effective temperature, spectral type and subclass),
//! and query, summarize and export the enriched table.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use hipcat::{CatalogFile, CatalogParams, Enrich, EnrichedCatalogExt, StarCatalog};
//! use hipcat::stats::SpectralTypeCounts;
//!
//! # fn demo() -> Result<(), hipcat::HipcatError> {
//! let raw = StarCatalog::new_from_parquet(Utf8Path::new("hipparcos.parquet"), &CatalogParams::default())?;
//! let enriched = raw.enrich();
//! let visible = enriched.filter_visible(6.5);
//! println!("{}", SpectralTypeCounts::from_catalog(&visible));
//! # Ok(()) }
//! ```
pub mod catalog;
pub mod constants;
pub mod features;
pub mod hipcat_errors;
pub mod params;
pub mod photometry;
pub mod spectral;
pub mod stats;

pub use catalog::catalog_file::CatalogFile;
pub use catalog::display::EnrichedCatalogDisplayExt;
pub use catalog::{
    enrich_catalog, Enrich, EnrichedCatalog, EnrichedCatalogExt, EnrichedStar, StarCatalog,
    StarRecord,
};
pub use hipcat_errors::HipcatError;
pub use params::CatalogParams;
pub use spectral::{SpectralSubclass, SpectralType};
