//! cdx-cli
//!
//! Offline harness around the parser and the evaluator: splits recorded
//! transcripts into turns, replays them into a trajectory and scores the
//! result. The `cdx` binary is a thin clap front end over this module.

pub mod case;
