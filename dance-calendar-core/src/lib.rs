//! Core types for the dance calendar.
//!
//! This crate holds everything that does not touch a terminal or a file:
//! - `Event` and the loader that reads the static event source
//! - `FilterState`, `ViewState` and their query-string encoding
//! - month/year grids, the detail view model and ICS export
//! - `AppState`, the single owner of mutable state

pub mod app;
pub mod detail;
pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod ics;
pub mod loader;
pub mod url_state;
pub mod view;

#[cfg(test)]
mod testing;

pub use app::{Action, AppState, CalendarView};
pub use error::{CalendarError, CalendarResult};
pub use event::{DanceStyle, Event};
