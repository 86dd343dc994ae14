use super::queries;
use crate::error::{Result, TrackerError};
use crate::settings::{PercentBase, Settings};
use crate::utils::chart_path;
use crate::writers::ChartRenderer;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything a reporter command needs: the open database, the percentage
/// denominator chosen at startup, and where plots go.
pub struct Session {
    conn: Connection,
    percent_total: i64,
    charts: ChartRenderer,
    map_image: PathBuf,
}

impl Session {
    /// Open the configured database read-only and compute the percent base once
    pub fn open(settings: &Settings) -> Result<Self> {
        let path = settings.database_path();
        if !path.exists() {
            return Err(TrackerError::MissingInput { path });
        }

        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        info!("Opened {} read-only", path.display());

        let charts = ChartRenderer::new(settings.output_path()).with_font(settings.font_file().as_deref());
        Self::new(conn, settings.percent_base, charts, settings.map_image_path())
    }

    pub fn new(
        conn: Connection,
        percent_base: PercentBase,
        charts: ChartRenderer,
        map_image: PathBuf,
    ) -> Result<Self> {
        let percent_total = match percent_base.fixed_total() {
            Some(total) => total,
            None => queries::total_ridership(&conn)?,
        };
        debug!("Percentages relative to {} riders ({:?})", percent_total, percent_base);

        Ok(Self {
            conn,
            percent_total,
            charts,
            map_image,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn percent_total(&self) -> i64 {
        self.percent_total
    }

    pub fn charts(&self) -> &ChartRenderer {
        &self.charts
    }

    pub fn map_image(&self) -> &Path {
        &self.map_image
    }

    /// Output path for a named plot, creating the plot directory on first use
    pub fn plot_path(&self, name: &str) -> Result<PathBuf> {
        if self.charts.ensure_output_dir()? {
            info!("Created output directory: {}", self.charts.output_dir().display());
        }
        Ok(chart_path(self.charts.output_dir(), name))
    }
}

#[cfg(test)]
mod tests {
    use super::super::queries::fixtures::seeded;
    use super::*;
    use crate::utils::constants::HISTORICAL_TOTAL_RIDERSHIP;
    use tempfile::TempDir;

    #[test]
    fn test_live_percent_base() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(
            seeded(),
            PercentBase::Live,
            ChartRenderer::new(dir.path()),
            dir.path().join("chicago.png"),
        )
        .unwrap();
        assert_eq!(session.percent_total(), 2000);
    }

    #[test]
    fn test_fixed_percent_base() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(
            seeded(),
            PercentBase::Fixed,
            ChartRenderer::new(dir.path()),
            dir.path().join("chicago.png"),
        )
        .unwrap();
        assert_eq!(session.percent_total(), HISTORICAL_TOTAL_RIDERSHIP);
    }

    #[test]
    fn test_missing_database() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::default().with_data_dir(dir.path());
        match Session::open(&settings) {
            Err(TrackerError::MissingInput { path }) => {
                assert!(path.ends_with("CTA2_L_daily_ridership.db"))
            }
            other => panic!("expected missing input, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_plot_path_creates_directory() {
        let dir = TempDir::new().unwrap();
        let plots = dir.path().join("plots");
        let session = Session::new(
            seeded(),
            PercentBase::Live,
            ChartRenderer::new(&plots),
            dir.path().join("chicago.png"),
        )
        .unwrap();

        let path = session.plot_path("report_ridership_by_year").unwrap();
        assert!(plots.is_dir());
        assert_eq!(path, plots.join("report_ridership_by_year.png"));
    }
}
