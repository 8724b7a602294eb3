//! cdx-parser
//!
//! Turns one free-text model turn into a typed action. Tolerates format
//! drift (missing markers, dashes, aliases, tool names buried in prose) and
//! counts every non-standard interpretation it had to apply. Also renders
//! the observation text the model receives for each action.

pub mod classify;
pub mod input;
pub mod observation;
pub mod outcome;
pub mod parser;
mod state;

pub use observation::{ImagingLedger, render_observation};
pub use outcome::{InvalidAction, InvalidReason, ParseOutcome};
pub use parser::ActionParser;
