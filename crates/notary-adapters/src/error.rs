use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("column '{0}' not found in header")]
    MissingColumn(String),
    #[error("row {row}, column '{column}': '{value}' is not a number")]
    NonNumeric { row: usize, column: String, value: String },
    #[error("no data rows")]
    NoRows,
}
