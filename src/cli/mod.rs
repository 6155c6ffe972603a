//! # Command-Line Interface
//!
//! The interactive menu and its entry point.
//!
//! ## Menu
//!
//! | Code | Action |
//! |------|--------|
//! | `1` | Add a vehicle |
//! | `2` | View all vehicles |
//! | `3` | Search by vehicle number |
//! | `4` | Remove by vehicle number |
//! | `0` | Exit |
//!
//! Anything that is not an integer is rejected and the choice is asked
//! for again; unknown integers show the menu again.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse the optional flags, load configuration and the
//! data file, and start the menu loop on stdin/stdout.

mod app;
mod output;
mod shell;

pub use app::{run, Cli};
pub use output::Output;
pub use shell::{MenuChoice, Shell};
