//! Transport CLI - A local-first vehicle record manager
//!
//! Vehicles (number, type, status, floor) are kept in a flat
//! comma-separated file and managed through an interactive menu.

pub mod domain;
pub mod storage;
pub mod logging;
pub mod cli;

pub use domain::{RecordError, Vehicle};
pub use storage::{LoadReport, StoreError, VehicleStore};
