//! # chronogram-loader
//!
//! Input boundary of the chronogram generator: CSV delivery tables and
//! JSON configuration.
//!
//! This crate provides:
//! - [`Config`]: column-name mapping, squad colors, axis layout
//! - [`load_table`]: CSV rows to normalized [`chronogram_core::RawRecord`]s
//! - [`tribes`]: the distinct tribes found in a table
//!
//! Genuine error handling lives here (missing file, missing column,
//! malformed configuration); the downstream pipeline itself never fails.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chronogram_loader::{load_table, tribes, Config};
//!
//! let config = Config::from_path("config.json".as_ref())?;
//! let records = load_table("deliveries.csv".as_ref(), &config)?;
//! for tribe in tribes(&records) {
//!     println!("{tribe}: {} rows", records.iter().filter(|r| r.tribe == tribe).count());
//! }
//! ```

pub mod config;
pub mod table;

pub use config::{AxisConfig, Columns, Config};
pub use table::{load_table, tribes, ColumnMap};

use thiserror::Error;

/// Loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column not found in table header: {0}")]
    MissingColumn(String),
}
