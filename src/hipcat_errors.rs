use thiserror::Error;

#[derive(Error, Debug)]
pub enum HipcatError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow_schema::ArrowError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Column '{0}' not found in schema")]
    MissingColumn(String),

    #[error("Column '{column}' has unsupported type {found}")]
    UnsupportedColumnType { column: String, found: String },

    #[error("Invalid catalog parameter: {0}")]
    InvalidCatalogParameter(String),

    #[error("Observable {name} = {value} outside accepted range [{min}, {max}]")]
    ObservableOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Unknown catalog column: {0}")]
    UnknownColumn(String),

    #[error("Invalid spectral classification: {0}")]
    InvalidSpectralClass(String),

    #[error("Classifier '{model}' failed: {reason}")]
    ClassifierError { model: String, reason: String },
}

impl PartialEq for HipcatError {
    fn eq(&self, other: &Self) -> bool {
        use HipcatError::*;
        match (self, other) {
            // Wrapped foreign errors are not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (ParquetError(_), ParquetError(_)) => true,
            (ArrowError(_), ArrowError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            (MissingColumn(a), MissingColumn(b)) => a == b,
            (
                UnsupportedColumnType {
                    column: c1,
                    found: f1,
                },
                UnsupportedColumnType {
                    column: c2,
                    found: f2,
                },
            ) => c1 == c2 && f1 == f2,
            (InvalidCatalogParameter(a), InvalidCatalogParameter(b)) => a == b,
            (
                ObservableOutOfRange {
                    name: n1,
                    value: v1,
                    min: lo1,
                    max: hi1,
                },
                ObservableOutOfRange {
                    name: n2,
                    value: v2,
                    min: lo2,
                    max: hi2,
                },
            ) => n1 == n2 && v1 == v2 && lo1 == lo2 && hi1 == hi2,
            (UnknownColumn(a), UnknownColumn(b)) => a == b,
            (InvalidSpectralClass(a), InvalidSpectralClass(b)) => a == b,
            (
                ClassifierError {
                    model: m1,
                    reason: r1,
                },
                ClassifierError {
                    model: m2,
                    reason: r2,
                },
            ) => m1 == m2 && r1 == r2,

            _ => false,
        }
    }
}
