//! Output formatting for the interactive shell

use std::io::{self, Write};

use crate::domain::Vehicle;

/// Output helper for consistent formatting
///
/// Everything the shell shows, including error messages, goes to the same
/// writer so a transcript reads in order.
pub struct Output<W: Write> {
    writer: W,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Prints a message followed by a newline
    pub fn line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)
    }

    /// Prints a blank line
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Prints a prompt without a newline and flushes it
    pub fn prompt(&mut self, message: &str) -> io::Result<()> {
        write!(self.writer, "{}", message)?;
        self.writer.flush()
    }

    /// Prints an error message
    pub fn error(&mut self, context: &str, error: &dyn std::error::Error) -> io::Result<()> {
        writeln!(self.writer, "{}: {}", context, error)
    }

    /// Prints a vehicle's fields on one line
    pub fn vehicle(&mut self, vehicle: &Vehicle) -> io::Result<()> {
        writeln!(self.writer, "{}", describe(vehicle))
    }

    /// Prints a vehicle's fields on one line after a label
    pub fn found(&mut self, vehicle: &Vehicle) -> io::Result<()> {
        writeln!(self.writer, "Found: {}", describe(vehicle))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn describe(vehicle: &Vehicle) -> String {
    format!(
        "Number: {}, Type: {}, Status: {}, Floor: {}",
        vehicle.number, vehicle.kind, vehicle.status, vehicle.floor
    )
}
