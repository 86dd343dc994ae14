pub mod dataset_overview;
pub mod explorer;
pub mod statistics;

pub use dataset_overview::{DatasetOverview, MissingColumn};
pub use explorer::{AnalysisSelection, Explorer};
pub use statistics::{describe_columns, Describe};
