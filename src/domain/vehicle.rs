//! Vehicle domain model
//!
//! A vehicle is persisted as a single comma-separated line:
//! `number,type,status,floor`. No escaping is performed, so an attribute
//! containing a comma will not survive a round trip.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between fields of an encoded vehicle
pub const DELIMITER: char = ',';

/// Number of fields in an encoded vehicle
pub const FIELD_COUNT: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid vehicle data: expected {expected} fields, found {fields}: '{line}'", expected = FIELD_COUNT)]
    Malformed { fields: usize, line: String },
}

/// A single vehicle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    /// Vehicle number; the lookup key (compared case-insensitively)
    pub number: String,

    /// Vehicle type, e.g. "Car" or "Bus"
    pub kind: String,

    /// Conventionally "Available", "On Duty" or "Maintenance"
    pub status: String,

    /// Parking floor, e.g. "Ground" or "2nd"
    pub floor: String,
}

impl Vehicle {
    pub fn new(
        number: impl Into<String>,
        kind: impl Into<String>,
        status: impl Into<String>,
        floor: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            kind: kind.into(),
            status: status.into(),
            floor: floor.into(),
        }
    }

    /// Encodes the vehicle as one line (without terminator)
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decodes a vehicle from one persisted line
    ///
    /// Fields beyond the fourth are ignored. Field contents are not validated.
    pub fn decode(line: &str) -> Result<Self, RecordError> {
        let parts: Vec<&str> = line.split(DELIMITER).collect();
        if parts.len() < FIELD_COUNT {
            return Err(RecordError::Malformed {
                fields: parts.len(),
                line: line.to_string(),
            });
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }

    /// Returns true if this vehicle's number equals `number`, ignoring case
    pub fn matches(&self, number: &str) -> bool {
        self.number.to_lowercase() == number.to_lowercase()
    }

    /// Returns true if any attribute contains the field delimiter
    pub fn has_delimiter(&self) -> bool {
        [&self.number, &self.kind, &self.status, &self.floor]
            .iter()
            .any(|field| field.contains(DELIMITER))
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}{d}{}",
            self.number,
            self.kind,
            self.status,
            self.floor,
            d = DELIMITER
        )
    }
}

impl FromStr for Vehicle {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
