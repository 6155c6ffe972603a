//! Domain models for the transport CLI
//!
//! Contains the vehicle record and its line encoding, without any I/O.

mod vehicle;

pub use vehicle::{RecordError, Vehicle, DELIMITER, FIELD_COUNT};
