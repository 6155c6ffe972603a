//! # Storage Layer
//!
//! Persistence for the transport CLI.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Vehicles | Comma-separated, one per line | `data/vehicles.txt` |
//! | Config | TOML | `transport.toml` |
//!
//! ## Consistency
//!
//! - [`VehicleStore`] rewrites the whole file after every mutation
//! - Writes go to a temp file which is then renamed over the data file
//! - No locking: one process is assumed to own the file
//!
//! ## Key Types
//!
//! - [`VehicleStore`] - In-memory vehicles backed by the data file
//! - [`LoadReport`] - Lines loaded and skipped on a load
//! - [`Config`] - Optional configuration

mod config;
mod records;

pub use config::{Config, ConfigError, CONFIG_FILE};
pub use records::{LoadReport, SkippedLine, StoreError, VehicleStore, DEFAULT_DATA_FILE};
