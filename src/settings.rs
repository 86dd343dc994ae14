use crate::error::Result;
use crate::utils::constants::{
    CONFIG_FILE_STEM, DEFAULT_COMBINED_FILE, DEFAULT_DATABASE_FILE, DEFAULT_MAP_IMAGE,
    DEFAULT_OUTPUT_DIR, ENV_PREFIX, FONT_CANDIDATES, HISTORICAL_TOTAL_RIDERSHIP,
};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Which denominator the reporter uses for ridership percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PercentBase {
    /// `SUM(Num_Riders)` computed once when the session opens
    #[default]
    Live,
    /// The historical all-time total, for output parity with older runs
    Fixed,
}

impl PercentBase {
    pub fn fixed_total(&self) -> Option<i64> {
        match self {
            PercentBase::Live => None,
            PercentBase::Fixed => Some(HISTORICAL_TOTAL_RIDERSHIP),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub combined_file: PathBuf,
    pub database: PathBuf,
    pub output_dir: PathBuf,
    pub map_image: PathBuf,
    pub font_path: Option<PathBuf>,
    pub percent_base: PercentBase,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            combined_file: PathBuf::from(DEFAULT_COMBINED_FILE),
            database: PathBuf::from(DEFAULT_DATABASE_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            map_image: PathBuf::from(DEFAULT_MAP_IMAGE),
            font_path: None,
            percent_base: PercentBase::Live,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional config file and `CTA_TRACKER_*` variables.
    ///
    /// An explicitly passed file must exist; the implicit `cta-tracker.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file_source = match explicit {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE_STEM).required(false),
        };

        let settings = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Resolve a configured path against the data directory (absolute paths are kept)
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn combined_path(&self) -> PathBuf {
        self.resolve(&self.combined_file)
    }

    pub fn database_path(&self) -> PathBuf {
        self.resolve(&self.database)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn map_image_path(&self) -> PathBuf {
        self.resolve(&self.map_image)
    }

    /// The configured font, or the first well-known system font that exists
    pub fn font_file(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.font_path {
            return Some(path.clone());
        }
        FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_resolve_against_data_dir() {
        let settings = Settings::default().with_data_dir("/data/cta");

        assert_eq!(
            settings.combined_path(),
            PathBuf::from("/data/cta/CTA_Combined_Data.csv")
        );
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/data/cta/CTA2_L_daily_ridership.db")
        );
        assert_eq!(settings.percent_base, PercentBase::Live);
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let mut settings = Settings::default().with_data_dir("/data/cta");
        settings.output_dir = PathBuf::from("/tmp/plots");
        assert_eq!(settings.output_path(), PathBuf::from("/tmp/plots"));
    }

    #[test]
    fn test_load_explicit_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "data_dir = \"/srv/cta\"")?;
        writeln!(file, "percent_base = \"fixed\"")?;
        writeln!(file, "output_dir = \"charts\"")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.data_dir, PathBuf::from("/srv/cta"));
        assert_eq!(settings.percent_base, PercentBase::Fixed);
        assert_eq!(settings.output_path(), PathBuf::from("/srv/cta/charts"));
        assert_eq!(settings.combined_file, PathBuf::from(DEFAULT_COMBINED_FILE));
        Ok(())
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = Settings::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_fixed_total() {
        assert_eq!(PercentBase::Live.fixed_total(), None);
        assert_eq!(
            PercentBase::Fixed.fixed_total(),
            Some(HISTORICAL_TOTAL_RIDERSHIP)
        );
    }
}
