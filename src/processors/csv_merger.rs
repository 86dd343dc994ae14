use crate::error::Result;
use crate::models::{Table, Value};
use crate::readers::TableReader;
use crate::utils::constants::{
    COL_RIDE_DATE, LINES_FILE, LINE_ID, RIDERSHIP_FILE, STATIONS_FILE, STATION_ID,
    STOPS_FILE, STOP_DETAILS_FILE, STOP_ID,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::TableWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Locations of the five normalized inputs
#[derive(Debug, Clone)]
pub struct MergeInputs {
    pub lines: PathBuf,
    pub stations: PathBuf,
    pub stops: PathBuf,
    pub stop_details: PathBuf,
    pub ridership: PathBuf,
}

impl MergeInputs {
    /// The fixed file names inside one directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            lines: dir.join(LINES_FILE),
            stations: dir.join(STATIONS_FILE),
            stops: dir.join(STOPS_FILE),
            stop_details: dir.join(STOP_DETAILS_FILE),
            ridership: dir.join(RIDERSHIP_FILE),
        }
    }
}

/// Loaded inputs; ridership is optional
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub lines: Table,
    pub stations: Table,
    pub stops: Table,
    pub stop_details: Table,
    pub ridership: Option<Table>,
}

#[derive(Debug, Clone)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub ridership_joined: bool,
}

impl MergeSummary {
    pub fn summary(&self) -> String {
        format!(
            "Combined data saved successfully! Total rows: {}\n\
            Columns in combined dataset: {}",
            self.rows,
            self.columns.join(", ")
        )
    }
}

/// Denormalizes stops, stations, stop details, lines and ridership into one table
pub struct CsvMerger {
    inputs: MergeInputs,
    reader: TableReader,
}

impl CsvMerger {
    pub fn new(inputs: MergeInputs) -> Self {
        Self {
            inputs,
            reader: TableReader::new(),
        }
    }

    /// Load every input. Any missing or malformed required file fails the whole load.
    pub fn load(&self, progress: &ProgressReporter) -> Result<SourceTables> {
        progress.set_message("Reading input files...");

        let mut lines = self.reader.read_table(&self.inputs.lines)?;
        let mut stations = self.reader.read_table(&self.inputs.stations)?;
        let mut stops = self.reader.read_table(&self.inputs.stops)?;
        let mut stop_details = self.reader.read_table(&self.inputs.stop_details)?;

        let mut ridership = if self.inputs.ridership.exists() {
            Some(self.reader.read_table(&self.inputs.ridership)?)
        } else {
            info!(
                "{} not present, combining without ridership",
                self.inputs.ridership.display()
            );
            None
        };

        for table in [&mut lines, &mut stations, &mut stops, &mut stop_details]
            .into_iter()
            .chain(ridership.as_mut())
        {
            let coerced = table.coerce_ids_to_text();
            debug!("{}: identifier columns as text: {:?}", table.name(), coerced);
        }

        if let Some(ref mut rides) = ridership {
            if let Some(idx) = rides.column_index(COL_RIDE_DATE) {
                rides.map_column(idx, Value::to_date);
            }
        }

        Ok(SourceTables {
            lines,
            stations,
            stops,
            stop_details,
            ridership,
        })
    }

    /// Left-join chain: stops, stations, stop details, lines, then ridership if loaded
    pub fn combine(&self, tables: &SourceTables) -> Result<Table> {
        let mut combined = tables.stops.left_join(&tables.stations, STATION_ID)?;
        combined = combined.left_join(&tables.stop_details, STOP_ID)?;
        combined = combined.left_join(&tables.lines, LINE_ID)?;

        if let Some(ref ridership) = tables.ridership {
            combined = combined.left_join(ridership, STATION_ID)?;
        }

        debug!(
            "Combined table: {} rows x {} columns",
            combined.row_count(),
            combined.column_count()
        );
        Ok(combined)
    }

    /// Load, join and write the combined table to `output`, replacing any previous file.
    /// Nothing is written unless every required input loaded and joined.
    pub fn merge_to(&self, output: &Path, progress: &ProgressReporter) -> Result<MergeSummary> {
        let tables = self.load(progress)?;

        progress.set_message("Combining data...");
        let combined = self.combine(&tables)?;

        progress.set_message(&format!("Saving combined data to {}...", output.display()));
        TableWriter::new().write_table(&combined, output)?;
        progress.finish_with_message("Combined data saved");

        Ok(MergeSummary {
            output: output.to_path_buf(),
            rows: combined.row_count(),
            columns: combined.columns().to_vec(),
            ridership_joined: tables.ridership.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_inputs(dir: &Path) -> Result<()> {
        fs::write(dir.join(LINES_FILE), "Line_ID,Color\n1,Red\n2,Purple-Express\n")?;
        fs::write(dir.join(STATIONS_FILE), "Station_ID,Station_Name\n40830,Main St\n")?;
        fs::write(
            dir.join(STOPS_FILE),
            "Stop_ID,Station_ID,Stop_Name,Direction,ADA\n30001,40830,Main St (N),N,1\n",
        )?;
        fs::write(dir.join(STOP_DETAILS_FILE), "Stop_ID,Line_ID\n30001,1\n")?;
        Ok(())
    }

    #[test]
    fn test_merge_without_ridership() -> Result<()> {
        let dir = TempDir::new()?;
        write_inputs(dir.path())?;
        let output = dir.path().join("combined.csv");

        let merger = CsvMerger::new(MergeInputs::in_dir(dir.path()));
        let summary = merger.merge_to(&output, &ProgressReporter::silent())?;

        assert_eq!(summary.rows, 1);
        assert!(!summary.ridership_joined);
        assert_eq!(
            fs::read_to_string(&output)?,
            "Stop_ID,Station_ID,Stop_Name,Direction,ADA,Station_Name,Line_ID,Color\n\
             30001,40830,Main St (N),N,1,Main St,1,Red\n"
        );
        Ok(())
    }

    #[test]
    fn test_merge_with_ridership_parses_dates() -> Result<()> {
        let dir = TempDir::new()?;
        write_inputs(dir.path())?;
        fs::write(
            dir.path().join(RIDERSHIP_FILE),
            "Station_ID,Ride_Date,Type_of_Day,Num_Riders\n\
             40830,01/01/2001,U,290\n\
             40830,not-a-date,W,1240\n",
        )?;

        let merger = CsvMerger::new(MergeInputs::in_dir(dir.path()));
        let tables = merger.load(&ProgressReporter::silent())?;
        let combined = merger.combine(&tables)?;

        assert_eq!(combined.row_count(), 2);
        let date_idx = combined.require_column(COL_RIDE_DATE)?;
        assert_eq!(combined.rows()[0][date_idx].to_string(), "2001-01-01");
        assert_eq!(combined.rows()[1][date_idx], Value::Null);
        Ok(())
    }

    #[test]
    fn test_merge_with_database_exported_dates() -> Result<()> {
        let dir = TempDir::new()?;
        write_inputs(dir.path())?;
        fs::write(
            dir.path().join(RIDERSHIP_FILE),
            "Station_ID,Ride_Date,Type_of_Day,Num_Riders\n\
             40830,2019-01-01 00:00:00.000,U,290\n\
             40830,2019-01-02T00:00:00Z,W,1240\n",
        )?;
        let output = dir.path().join("combined.csv");

        let merger = CsvMerger::new(MergeInputs::in_dir(dir.path()));
        merger.merge_to(&output, &ProgressReporter::silent())?;

        let written = fs::read_to_string(&output)?;
        assert!(written.contains(",2019-01-01,U,290"), "{}", written);
        assert!(written.contains(",2019-01-02,W,1240"), "{}", written);
        Ok(())
    }

    #[test]
    fn test_missing_required_input_writes_nothing() -> Result<()> {
        for missing in [LINES_FILE, STATIONS_FILE, STOPS_FILE, STOP_DETAILS_FILE] {
            let dir = TempDir::new()?;
            write_inputs(dir.path())?;
            fs::remove_file(dir.path().join(missing))?;
            let output = dir.path().join("combined.csv");

            let merger = CsvMerger::new(MergeInputs::in_dir(dir.path()));
            let err = merger
                .merge_to(&output, &ProgressReporter::silent())
                .unwrap_err();

            assert!(matches!(err, TrackerError::MissingInput { .. }), "{}", missing);
            assert!(!output.exists(), "output written without {}", missing);
        }
        Ok(())
    }

    #[test]
    fn test_unmatched_stops_are_kept() -> Result<()> {
        let dir = TempDir::new()?;
        write_inputs(dir.path())?;
        fs::write(
            dir.path().join(STOPS_FILE),
            "Stop_ID,Station_ID,Stop_Name,Direction,ADA\n\
             30001,40830,Main St (N),N,1\n\
             30002,49999,Nowhere (S),S,0\n",
        )?;

        let merger = CsvMerger::new(MergeInputs::in_dir(dir.path()));
        let tables = merger.load(&ProgressReporter::silent())?;
        let combined = merger.combine(&tables)?;

        assert_eq!(combined.row_count(), tables.stops.row_count());
        let color = combined.require_column("Color")?;
        assert_eq!(combined.rows()[1][color], Value::Null);
        Ok(())
    }
}
