//! Dataset loading from delimited translation sheets.
//!
//! The source file is a headered CSV with one translated sentence per row.
//! Loading selects exactly two named columns (an identifier and the sentence
//! text), canonicalizes them into [`Row`], and preserves the original row
//! order. Every field is read as text - identifiers such as `001` must keep
//! their zero padding because they are used verbatim in output filenames.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default name of the identifier column in the source sheet.
pub const DEFAULT_ID_COLUMN: &str = "Unique ID";

/// Default name of the sentence column in the source sheet.
pub const DEFAULT_TEXT_COLUMN: &str = "Sentence (Translation in Target Language )";

/// Errors that can occur while loading a dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file does not exist.
    #[error("Dataset file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file could not be read or parsed as CSV.
    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    /// A required column header is absent from the source.
    #[error("Required column '{0}' not found in dataset header")]
    MissingColumn(String),

    /// A row carries an identifier that cannot be used in a filename.
    #[error("Row {row}: invalid id '{id}': {reason}")]
    InvalidId {
        row: usize,
        id: String,
        reason: String,
    },

    /// Two rows share the same identifier.
    ///
    /// Duplicate ids would map to the same output path, silently losing one
    /// row's audio, so the whole load is rejected.
    #[error("Duplicate id '{id}' at rows {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
}

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// One unit of work: a sentence plus its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Unique identifier, used verbatim in the output filename.
    pub id: String,
    /// Sentence to synthesize. May be empty; empty text is the engine's
    /// problem, not ours.
    pub text: String,
}

/// Names of the two source columns to select and canonicalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Header of the identifier column.
    pub id_column: String,
    /// Header of the sentence column.
    pub text_column: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
        }
    }
}

/// Ordered, immutable sequence of rows, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from already-validated rows.
    ///
    /// Mainly useful for tests; production datasets come from
    /// [`load_dataset`].
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Rows in original source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load a dataset from a headered CSV file.
///
/// Selects the two columns named by `mapping`, preserving original row
/// order. Fails if either header is missing, if any id is empty or contains
/// a path separator, or if two rows share an id.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `mapping` - Names of the identifier and sentence columns
pub fn load_dataset(path: impl AsRef<Path>, mapping: &ColumnMapping) -> DatasetResult<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_idx = find_column(&headers, &mapping.id_column)?;
    let text_idx = find_column(&headers, &mapping.text_column)?;

    let mut rows = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (i, record) in reader.records().enumerate() {
        // 1-based data row numbers in errors; the header is row 0.
        let row_num = i + 1;
        let record = record?;

        let id = record.get(id_idx).unwrap_or("").to_string();
        let text = record.get(text_idx).unwrap_or("").to_string();

        validate_id(row_num, &id)?;

        if let Some(&first) = seen.get(&id) {
            return Err(DatasetError::DuplicateId {
                id,
                first,
                second: row_num,
            });
        }
        seen.insert(id.clone(), row_num);

        rows.push(Row { id, text });
    }

    tracing::info!("Loaded {} rows from {}", rows.len(), path.display());

    Ok(Dataset { rows })
}

/// Find a column index by exact header name.
fn find_column(headers: &csv::StringRecord, name: &str) -> DatasetResult<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
}

/// Reject ids that cannot safely appear in an output filename.
fn validate_id(row: usize, id: &str) -> DatasetResult<()> {
    if id.is_empty() {
        return Err(DatasetError::InvalidId {
            row,
            id: id.to_string(),
            reason: "id is empty".to_string(),
        });
    }
    if id.contains('/') || id.contains('\\') {
        return Err(DatasetError::InvalidId {
            row,
            id: id.to_string(),
            reason: "id contains a path separator".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tempfile::TempDir;

    const HEADER: &str = "Unique ID,Sentence (Translation in Target Language )";

    fn write_csv(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("sentences.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_rows_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n001,Hello\n002,World\n"));

        let dataset = load_dataset(&path, &ColumnMapping::default()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].id, "001");
        assert_eq!(dataset.rows()[0].text, "Hello");
        assert_eq!(dataset.rows()[1].id, "002");
        assert_eq!(dataset.rows()[1].text, "World");
    }

    #[test]
    fn preserves_zero_padded_ids() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n007,Sentence\n"));

        let dataset = load_dataset(&path, &ColumnMapping::default()).unwrap();

        assert_eq!(dataset.rows()[0].id, "007");
    }

    #[test]
    fn ignores_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Book,Unique ID,Sentence (Translation in Target Language ),Notes\n\
             Genesis,001,In the beginning,checked\n",
        );

        let dataset = load_dataset(&path, &ColumnMapping::default()).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows()[0].id, "001");
        assert_eq!(dataset.rows()[0].text, "In the beginning");
    }

    #[test]
    fn allows_empty_text() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n001,\n"));

        let dataset = load_dataset(&path, &ColumnMapping::default()).unwrap();

        assert_eq!(dataset.rows()[0].text, "");
    }

    #[test]
    fn missing_id_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "Identifier,Sentence (Translation in Target Language )\n001,Hello\n",
        );

        let err = load_dataset(&path, &ColumnMapping::default()).unwrap_err();

        match err {
            DatasetError::MissingColumn(name) => assert_eq!(name, "Unique ID"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_text_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "Unique ID,Sentence\n001,Hello\n");

        let err = load_dataset(&path, &ColumnMapping::default()).unwrap_err();

        assert!(matches!(err, DatasetError::MissingColumn(_)));
    }

    #[test]
    fn custom_column_mapping() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "verse,yoruba\n1_1,Ni atetekose\n");

        let mapping = ColumnMapping {
            id_column: "verse".to_string(),
            text_column: "yoruba".to_string(),
        };
        let dataset = load_dataset(&path, &mapping).unwrap();

        assert_eq!(dataset.rows()[0].id, "1_1");
        assert_eq!(dataset.rows()[0].text, "Ni atetekose");
    }

    #[test]
    fn duplicate_id_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n001,Hello\n002,There\n001,Again\n"));

        let err = load_dataset(&path, &ColumnMapping::default()).unwrap_err();

        match err {
            DatasetError::DuplicateId { id, first, second } => {
                assert_eq!(id, "001");
                assert_eq!(first, 1);
                assert_eq!(second, 3);
            }
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn empty_id_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n,Hello\n"));

        let err = load_dataset(&path, &ColumnMapping::default()).unwrap_err();

        assert!(matches!(err, DatasetError::InvalidId { .. }));
    }

    #[test]
    fn path_separator_in_id_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n../etc,Hello\n"));

        let err = load_dataset(&path, &ColumnMapping::default()).unwrap_err();

        match err {
            DatasetError::InvalidId { row, id, .. } => {
                assert_eq!(row, 1);
                assert_eq!(id, "../etc");
            }
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reported() {
        let err = load_dataset("/nonexistent/sentences.csv", &ColumnMapping::default())
            .unwrap_err();

        assert!(matches!(err, DatasetError::FileNotFound(_)));
    }

    #[test]
    fn quoted_fields_parse() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n001,\"Hello, world\"\n"));

        let dataset = load_dataset(&path, &ColumnMapping::default()).unwrap();

        assert_eq!(dataset.rows()[0].text, "Hello, world");
    }
}
