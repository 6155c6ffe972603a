//! Flat-file storage for vehicles
//!
//! Vehicles are stored one per line in `data/vehicles.txt` (by default).
//! The in-memory collection is a cache of the file: it is rebuilt fully on
//! load and the file is rewritten fully after every mutation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::{RecordError, Vehicle};

/// Default location of the data file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/vehicles.txt";

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create data file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A persisted line that could not be decoded
#[derive(Debug, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the data file
    pub line_number: usize,
    pub content: String,
    pub error: RecordError,
}

/// Outcome of a load: what was read, what was skipped, and whether the
/// file itself could be read
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
    pub error: Option<StoreError>,
}

impl LoadReport {
    /// Returns true if every line loaded and the file was readable
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.error.is_none()
    }
}

/// Ordered collection of vehicles backed by a flat file
#[derive(Debug)]
pub struct VehicleStore {
    path: PathBuf,
    vehicles: Vec<Vehicle>,
}

impl VehicleStore {
    /// Creates an empty, unloaded store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            vehicles: Vec::new(),
        }
    }

    /// Prepares the data directory and file, then loads the file
    ///
    /// Only directory or file creation failures are returned as errors;
    /// load problems are reported in the [`LoadReport`].
    pub fn initialize(path: impl Into<PathBuf>) -> Result<(Self, LoadReport), StoreError> {
        let mut store = Self::new(path);

        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Create the file if missing without truncating an existing one
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&store.path)
            .map_err(|source| StoreError::CreateFile {
                path: store.path.clone(),
                source,
            })?;

        let report = store.load();
        Ok((store, report))
    }

    /// Returns the path to the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory collection with the contents of the file
    ///
    /// Malformed lines are skipped and reported. If the file cannot be
    /// read, the collection is left empty and the error is reported.
    pub fn load(&mut self) -> LoadReport {
        self.vehicles.clear();
        let mut report = LoadReport::default();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(source) => {
                report.error = Some(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
                return report;
            }
        };

        let reader = BufReader::new(file);
        for (index, chunk) in reader.split(b'\n').enumerate() {
            let mut bytes = match chunk {
                Ok(bytes) => bytes,
                Err(source) => {
                    report.error = Some(StoreError::Read {
                        path: self.path.clone(),
                        source,
                    });
                    break;
                }
            };
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            let line = String::from_utf8_lossy(&bytes);
            match Vehicle::decode(&line) {
                Ok(vehicle) => self.vehicles.push(vehicle),
                Err(error) => {
                    debug!(line_number = index + 1, %error, "skipping malformed line");
                    report.skipped.push(SkippedLine {
                        line_number: index + 1,
                        content: line.into_owned(),
                        error,
                    });
                }
            }
        }

        report.loaded = self.vehicles.len();
        debug!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded vehicles"
        );
        report
    }

    /// Rewrites the data file from the in-memory collection
    ///
    /// Writes to a temp file first, then renames it over the data file.
    /// A failure leaves the in-memory collection untouched.
    pub fn save(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = self.temp_path();
        if let Err(source) = self.write_and_replace(&temp_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(source));
        }

        debug!(path = %self.path.display(), count = self.vehicles.len(), "saved vehicles");
        Ok(())
    }

    /// Appends a vehicle and saves
    pub fn add(&mut self, vehicle: Vehicle) -> Result<(), StoreError> {
        debug!(number = %vehicle.number, "adding vehicle");
        self.vehicles.push(vehicle);
        self.save()
    }

    /// Returns the first vehicle whose number matches, ignoring case
    pub fn search(&self, number: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.matches(number))
    }

    /// Removes every vehicle whose number matches, ignoring case
    ///
    /// Saves only when something was removed. Returns the number removed;
    /// on a save error the removal still stands in memory.
    pub fn remove(&mut self, number: &str) -> Result<usize, StoreError> {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| !v.matches(number));
        let removed = before - self.vehicles.len();

        debug!(number, removed, "removed vehicles");
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }

    /// Returns all vehicles in insertion order
    pub fn list(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    fn write_and_replace(&self, temp_path: &Path) -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)?;

        let mut writer = BufWriter::new(file);
        for vehicle in &self.vehicles {
            write!(writer, "{}{}", vehicle.encode(), LINE_ENDING)?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(temp_path, &self.path)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
