//! CSV Data Loader Module
//! Reads the disaster CSV with Polars and extracts the two fields the chart needs.

use crate::config::ColumnNames;
use crate::data::records::RawRecord;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Column '{0}' not found in CSV")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a CSV file. Every column is read as a string so that year
    /// parsing stays under our control.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        info!(path = %file_path.display(), rows = df.height(), "loaded CSV");

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Extract one `RawRecord` per row from the configured columns.
    pub fn records(&self, columns: &ColumnNames) -> Result<Vec<RawRecord>, LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;

        let types = Self::string_column(df, &columns.disaster_type)?;
        let years = Self::string_column(df, &columns.year)?;
        let types = types.str()?;
        let years = years.str()?;

        let records: Vec<RawRecord> = types
            .into_iter()
            .zip(years.into_iter())
            .map(|(t, y)| RawRecord::from_fields(t, y))
            .collect();

        debug!(count = records.len(), "extracted raw records");
        Ok(records)
    }

    fn string_column(df: &DataFrame, name: &str) -> Result<Series, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        Ok(column.as_materialized_series().cast(&DataType::String)?)
    }
}

/// Load a CSV and return its raw records in one step.
pub fn load_records(path: &Path, columns: &ColumnNames) -> Result<Vec<RawRecord>, LoaderError> {
    let mut loader = DataLoader::new();
    loader.load_csv(path)?;
    loader.records(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn reads_type_and_year_columns() {
        let file = create_temp_csv(
            "Country,Disaster.Type,Start.Year\n\
             Chile,Flood,2001 \n\
             Peru,,1999\n\
             Haiti,Storm,abc\n\
             Japan,Earthquake,2011\n",
        );

        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();
        assert_eq!(df.height(), 4);

        let records = loader.records(&ColumnNames::default()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].disaster_type.as_deref(), Some("Flood"));
        assert_eq!(records[0].year, Some(2001));
        assert!(records[1].disaster_type.as_deref().unwrap_or("").is_empty());
        assert_eq!(records[2].year, None);
        assert_eq!(records[3].year, Some(2011));
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = create_temp_csv("Type,Year\nFlood,2000\n");
        let err = load_records(file.path(), &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(name) if name == "Disaster.Type"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_records(Path::new("/nonexistent/disasters.csv"), &ColumnNames::default())
            .unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn records_before_load_is_no_data() {
        let loader = DataLoader::new();
        assert!(matches!(
            loader.records(&ColumnNames::default()),
            Err(LoaderError::NoData)
        ));
    }
}
