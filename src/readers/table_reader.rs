use crate::error::{Result, TrackerError};
use crate::models::{Table, Value};
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads a headed CSV file into a [`Table`], inferring one value type per cell
#[derive(Debug, Default)]
pub struct TableReader;

impl TableReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a CSV file. A missing file is reported as [`TrackerError::MissingInput`].
    pub fn read_table(&self, path: &Path) -> Result<Table> {
        if !path.exists() {
            return Err(TrackerError::MissingInput {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("table")
            .to_string();

        let table = self.parse(&name, &bytes)?;
        debug!(
            "Loaded {} ({} rows, {} columns)",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    /// Parse CSV bytes; input that is not valid UTF-8 is decoded as Windows-1252
    pub fn parse(&self, name: &str, bytes: &[u8]) -> Result<Table> {
        let text = decode(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
            return Err(TrackerError::InvalidFormat(format!(
                "{}: missing header row",
                name
            )));
        }

        let mut table = Table::new(name, columns);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Value::infer).collect())?;
        }

        Ok(table)
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_table_infers_types() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Stop_ID,Station_ID,Stop_Name,ADA,Latitude")?;
        writeln!(file, "30001,40830,18th (54th/Cermak-bound),True,41.857908")?;
        writeln!(file, "30002,40830,18th (Loop-bound),false,")?;

        let table = TableReader::new().read_table(file.path())?;

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 5);
        assert_eq!(table.rows()[0][0], Value::Int(30001));
        assert_eq!(table.rows()[0][3], Value::Bool(true));
        assert_eq!(table.rows()[1][3], Value::Bool(false));
        assert_eq!(table.rows()[0][4], Value::Float(41.857908));
        assert_eq!(table.rows()[1][4], Value::Null);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = TableReader::new()
            .read_table(Path::new("/no/such/Stops.csv"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::MissingInput { .. }));
    }

    #[test]
    fn test_ragged_rows_are_malformed() {
        let bytes = b"Line_ID,Color\n1,Red\n2,Blue,extra\n";
        assert!(TableReader::new().parse("Lines", bytes).is_err());
    }

    #[test]
    fn test_latin1_input_is_decoded() -> Result<()> {
        let bytes = b"Station_ID,Station_Name\n1,Caf\xe9\n";
        let table = TableReader::new().parse("Stations", bytes)?;
        assert_eq!(table.rows()[0][1], Value::Text("Café".to_string()));
        Ok(())
    }

    #[test]
    fn test_bom_is_stripped() -> Result<()> {
        let bytes = b"\xEF\xBB\xBFLine_ID,Color\n1,Red\n";
        let table = TableReader::new().parse("Lines", bytes)?;
        assert_eq!(table.columns()[0], "Line_ID");
        Ok(())
    }
}
