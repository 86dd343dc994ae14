pub mod csv_merger;
pub mod data_cleaner;

pub use csv_merger::{CsvMerger, MergeInputs, MergeSummary, SourceTables};
pub use data_cleaner::{CleaningReport, DataCleaner};
