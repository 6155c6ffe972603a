//! Interactive menu loop
//!
//! Reads one line per prompt from any [`BufRead`] and writes to any
//! [`Write`], so the same loop serves stdin/stdout and tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use super::output::Output;
use crate::domain::Vehicle;
use crate::storage::{LoadReport, StoreError, VehicleStore};

const MENU: [&str; 5] = [
    "1. Add Vehicle",
    "2. View Vehicles",
    "3. Search Vehicle",
    "4. Remove Vehicle",
    "0. Exit",
];

/// A menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
    Search,
    Remove,
    Exit,
    Unknown(i32),
}

impl From<i32> for MenuChoice {
    fn from(code: i32) -> Self {
        match code {
            1 => MenuChoice::Add,
            2 => MenuChoice::View,
            3 => MenuChoice::Search,
            4 => MenuChoice::Remove,
            0 => MenuChoice::Exit,
            other => MenuChoice::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Exiting,
}

/// The interactive shell; owns the store for the whole session
pub struct Shell<R: BufRead, W: Write> {
    store: VehicleStore,
    input: R,
    output: Output<W>,
    state: State,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: VehicleStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output: Output::new(output),
            state: State::Running,
        }
    }

    /// Prints the outcome of the startup load
    pub fn report_load(&mut self, report: &LoadReport) -> io::Result<()> {
        if report.is_clean() {
            return Ok(());
        }
        for skipped in &report.skipped {
            self.output
                .line(&format!("Skipping invalid line: {}", skipped.content))?;
        }
        if let Some(error) = &report.error {
            self.output.error("Error loading vehicles", error)?;
        }
        Ok(())
    }

    /// Prints a failure to prepare the data file
    pub fn report_init_error(&mut self, error: &StoreError) -> io::Result<()> {
        self.output.error("Could not initialize data file", error)
    }

    /// Runs the menu loop until Exit is chosen or input ends
    ///
    /// Only failures writing to the output are returned; store errors are
    /// printed and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        while self.state == State::Running {
            self.print_menu()?;

            let Some(code) = self.read_choice()? else {
                self.input_closed()?;
                break;
            };

            self.dispatch(MenuChoice::from(code))?;
        }
        self.output.flush()
    }

    /// Returns the store and the output writer
    pub fn into_parts(self) -> (VehicleStore, W) {
        (self.store, self.output.into_inner())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        self.output.blank()?;
        self.output.line("--- Transport Management System ---")?;
        for entry in MENU {
            self.output.line(entry)?;
        }
        self.output.prompt("Enter choice: ")
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::View => self.view(),
            MenuChoice::Search => self.search(),
            MenuChoice::Remove => self.remove(),
            MenuChoice::Exit => {
                self.state = State::Exiting;
                self.output.line("Exiting system...")
            }
            MenuChoice::Unknown(_) => self.output.line("Invalid option! Try again."),
        }
    }

    fn add(&mut self) -> io::Result<()> {
        let Some(number) = self.ask("Enter Vehicle Number: ")? else {
            return self.input_closed();
        };
        let Some(kind) = self.ask("Enter Vehicle Type: ")? else {
            return self.input_closed();
        };
        let Some(status) = self.ask("Enter Status (Available/On Duty/Maintenance): ")? else {
            return self.input_closed();
        };
        let Some(floor) = self.ask("Enter Floor (e.g., Ground, 1st, 2nd): ")? else {
            return self.input_closed();
        };

        let vehicle = Vehicle::new(number, kind, status, floor);
        if vehicle.has_delimiter() {
            warn!(number = %vehicle.number, "vehicle field contains a comma; it will not reload as entered");
        }

        match self.store.add(vehicle) {
            Ok(()) => self.output.line("Vehicle added successfully."),
            Err(e) => self.output.error("Error saving vehicles", &e),
        }
    }

    fn view(&mut self) -> io::Result<()> {
        if self.store.is_empty() {
            return self.output.line("No vehicles found.");
        }
        for vehicle in self.store.list() {
            self.output.vehicle(vehicle)?;
        }
        Ok(())
    }

    fn search(&mut self) -> io::Result<()> {
        let Some(number) = self.ask("Enter Vehicle Number to Search: ")? else {
            return self.input_closed();
        };

        match self.store.search(&number) {
            Some(vehicle) => self.output.found(vehicle),
            None => self.output.line("Vehicle not found."),
        }
    }

    fn remove(&mut self) -> io::Result<()> {
        let Some(number) = self.ask("Enter Vehicle Number to Remove: ")? else {
            return self.input_closed();
        };

        match self.store.remove(&number) {
            Ok(0) => self.output.line("Vehicle not found."),
            Ok(_) => self.output.line("Vehicle removed successfully."),
            Err(e) => self.output.error("Error saving vehicles", &e),
        }
    }

    /// Reads menu lines until one parses as an integer; `None` on end of input
    fn read_choice(&mut self) -> io::Result<Option<i32>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<i32>() {
                Ok(code) => return Ok(Some(code)),
                Err(_) => {
                    debug!(input = %line, "rejected menu input");
                    self.output.prompt("Invalid input. Please enter a number: ")?;
                }
            }
        }
    }

    fn input_closed(&mut self) -> io::Result<()> {
        debug!("input closed, leaving menu");
        self.state = State::Exiting;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.prompt(prompt)?;
        self.read_line()
    }

    /// Reads one line without its terminator; `None` on end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run_session(store: VehicleStore, script: &str) -> (VehicleStore, String) {
        let mut shell = Shell::new(store, script.as_bytes(), Vec::new());
        shell.run().unwrap();
        let (store, output) = shell.into_parts();
        (store, String::from_utf8(output).unwrap())
    }

    fn empty_store(dir: &TempDir) -> VehicleStore {
        VehicleStore::initialize(dir.path().join("data").join("vehicles.txt"))
            .unwrap()
            .0
    }

    #[test]
    fn menu_codes_map_to_choices() {
        assert_eq!(MenuChoice::from(1), MenuChoice::Add);
        assert_eq!(MenuChoice::from(2), MenuChoice::View);
        assert_eq!(MenuChoice::from(3), MenuChoice::Search);
        assert_eq!(MenuChoice::from(4), MenuChoice::Remove);
        assert_eq!(MenuChoice::from(0), MenuChoice::Exit);
        assert_eq!(MenuChoice::from(7), MenuChoice::Unknown(7));
        assert_eq!(MenuChoice::from(-1), MenuChoice::Unknown(-1));
    }

    #[test]
    fn exit_prints_farewell() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(empty_store(&dir), "0\n");

        assert!(output.contains("--- Transport Management System ---"));
        assert!(output.contains("1. Add Vehicle"));
        assert!(output.ends_with("Exiting system...\n"));
    }

    #[test]
    fn add_view_remove_scenario() {
        let dir = TempDir::new().unwrap();
        let script = "2\n1\nV1\nCar\nAvailable\nGround\n2\n4\nv1\n2\n0\n";

        let (store, output) = run_session(empty_store(&dir), script);

        let record = "Number: V1, Type: Car, Status: Available, Floor: Ground";
        assert_eq!(output.matches("No vehicles found.").count(), 2);
        assert_eq!(output.matches(record).count(), 1);
        assert!(output.contains("Vehicle added successfully."));
        assert!(output.contains("Vehicle removed successfully."));
        assert!(store.is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
    }

    #[test]
    fn search_found_and_missing() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        store
            .add(Vehicle::new("AB12", "Bus", "On Duty", "1st"))
            .unwrap();

        let (_, output) = run_session(store, "3\nab12\n3\nzz\n0\n");

        assert!(output.contains("Found: Number: AB12, Type: Bus, Status: On Duty, Floor: 1st"));
        assert!(output.contains("Vehicle not found."));
    }

    #[test]
    fn remove_missing_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(empty_store(&dir), "4\nV9\n0\n");

        assert!(output.contains("Vehicle not found."));
        assert!(!output.contains("removed successfully"));
    }

    #[test]
    fn non_integer_input_reprompts_without_menu() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(empty_store(&dir), "abc\n\n0\n");

        assert_eq!(
            output.matches("Invalid input. Please enter a number: ").count(),
            2
        );
        assert_eq!(output.matches("--- Transport Management System ---").count(), 1);
        assert!(output.contains("Exiting system..."));
    }

    #[test]
    fn unknown_option_loops() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(empty_store(&dir), "9\n0\n");

        assert!(output.contains("Invalid option! Try again."));
        assert_eq!(output.matches("--- Transport Management System ---").count(), 2);
    }

    #[test]
    fn end_of_input_stops_quietly() {
        let dir = TempDir::new().unwrap();
        let (store, output) = run_session(empty_store(&dir), "1\nV1\nCar\n");

        assert!(store.is_empty());
        assert!(!output.contains("Exiting system..."));
    }

    #[test]
    fn fields_are_taken_verbatim() {
        let dir = TempDir::new().unwrap();
        let script = "1\n  V 1 \r\nMini Bus\nOn Duty\n2nd\n0\n";

        let (store, _) = run_session(empty_store(&dir), script);

        assert_eq!(
            store.list(),
            &[Vehicle::new("  V 1 ", "Mini Bus", "On Duty", "2nd")]
        );
    }

    #[test]
    fn save_errors_do_not_stop_the_loop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("occupied");
        fs::create_dir_all(path.join("inner")).unwrap();
        let store = VehicleStore::new(&path);

        let (store, output) = run_session(store, "1\nV1\nCar\nAvailable\nGround\n2\n0\n");

        assert!(output.contains("Error saving vehicles: "));
        assert!(output.contains("Number: V1"));
        assert!(output.contains("Exiting system..."));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn report_load_prints_skipped_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vehicles.txt");
        fs::write(&path, "V1,Car,Available,Ground\nbad line\n").unwrap();
        let (store, report) = VehicleStore::initialize(&path).unwrap();

        let mut shell = Shell::new(store, "0\n".as_bytes(), Vec::new());
        shell.report_load(&report).unwrap();
        let (_, output) = shell.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(output, "Skipping invalid line: bad line\n");
    }

    #[test]
    fn report_load_prints_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let mut store = VehicleStore::new(dir.path().join("missing.txt"));
        let report = store.load();

        let mut shell = Shell::new(store, "0\n".as_bytes(), Vec::new());
        shell.report_load(&report).unwrap();
        let (_, output) = shell.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("Error loading vehicles: Failed to read "));
        assert!(output.contains("missing.txt"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn report_load_is_silent_when_clean() {
        let dir = TempDir::new().unwrap();
        let (store, report) = VehicleStore::initialize(dir.path().join("vehicles.txt")).unwrap();

        let mut shell = Shell::new(store, "0\n".as_bytes(), Vec::new());
        shell.report_load(&report).unwrap();
        let (_, output) = shell.into_parts();

        assert!(output.is_empty());
    }

    #[test]
    fn report_init_error_prints_message() {
        let dir = TempDir::new().unwrap();
        let error = StoreError::CreateDir {
            path: dir.path().join("data"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };

        let mut shell = Shell::new(empty_store(&dir), "0\n".as_bytes(), Vec::new());
        shell.report_init_error(&error).unwrap();
        let (_, output) = shell.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("Could not initialize data file: Failed to create directory "));
        assert!(output.trim_end().ends_with("permission denied"));
    }
}
