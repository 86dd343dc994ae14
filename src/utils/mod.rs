pub mod constants;
pub mod filename;
pub mod format;
pub mod progress;

pub use constants::*;
pub use filename::{chart_path, column_chart_path};
pub use format::{percent_suffix, percentage, thousands};
pub use progress::ProgressReporter;
