use crate::error::Result;
use crate::models::Table;
use std::fs;
use std::path::Path;

/// Writes a [`Table`] as a headed CSV file, replacing any previous file in full
pub struct TableWriter;

impl TableWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_table(&self, table: &Table, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Truncates an existing file; no temp-file rename, so a failed write is not atomic
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_write_table_overwrites() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("combined.csv");
        fs::write(&path, "stale,content\n1,2\n3,4\n")?;

        let table = Table::with_rows(
            "combined",
            vec!["Station_ID".to_string(), "Ride_Date".to_string(), "ADA".to_string()],
            vec![vec![
                Value::Text("40830".to_string()),
                Value::Date(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()),
                Value::Bool(true),
            ]],
        )?;

        TableWriter::new().write_table(&table, &path)?;

        let written = fs::read_to_string(&path)?;
        assert_eq!(written, "Station_ID,Ride_Date,ADA\n40830,2001-01-01,True\n");
        Ok(())
    }

    #[test]
    fn test_nulls_are_empty_cells() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("out.csv");
        let table = Table::with_rows(
            "t",
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Value::Null, Value::Int(3)]],
        )?;

        TableWriter::new().write_table(&table, &path)?;
        assert_eq!(fs::read_to_string(&path)?, "a,b\n,3\n");
        Ok(())
    }
}
