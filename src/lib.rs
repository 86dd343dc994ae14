pub mod analyzers;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod reporter;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{Result, TrackerError};
