//! Fuente tabular: CSV con header, columnas seleccionadas, filas aplanadas
//! en orden (fila 1 col A, fila 1 col B, fila 2 col A, ...).

use log::debug;
use notary_core::Record;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularSource {
    columns: Vec<String>,
    delimiter: u8,
}

impl TabularSource {
    pub fn new<I, S>(columns: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { columns: columns.into_iter().map(|c| -> String { c.into() }).collect(),
               delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn load(&self, path: &Path) -> Result<Record, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Io { path: path.display().to_string(),
                                                                      source })?;
        let record = self.read(file)?;
        debug!("tabular: {} readings from {}", record.len(), path.display());
        Ok(record)
    }

    /// Lee desde cualquier `Read`. `row` en los errores es la fila de datos
    /// (1 = primera fila tras el header).
    pub fn read<R: Read>(&self, input: R) -> Result<Record, SourceError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true)
                                                  .delimiter(self.delimiter)
                                                  .trim(csv::Trim::All)
                                                  .from_reader(input);
        let headers = reader.headers()?.clone();
        let indices = self.columns
                          .iter()
                          .map(|name| {
                              headers.iter()
                                     .position(|h| h == name.as_str())
                                     .ok_or_else(|| SourceError::MissingColumn(name.clone()))
                          })
                          .collect::<Result<Vec<_>, _>>()?;

        let mut readings = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            for (col, idx) in self.columns.iter().zip(&indices) {
                let cell = row.get(*idx).unwrap_or("");
                let value: f64 = cell.parse().map_err(|_| SourceError::NonNumeric { row: i + 1,
                                                                                      column: col.clone(),
                                                                                      value: cell.to_string() })?;
                readings.push(value);
            }
        }
        if readings.is_empty() {
            return Err(SourceError::NoRows);
        }
        Ok(Record::Numeric(readings))
    }
}
