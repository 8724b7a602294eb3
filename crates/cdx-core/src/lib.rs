//! cdx-core
//!
//! Pure domain types shared by the parser, the vocabulary and the evaluator:
//! parsed agent actions, score and answer records, per-case reference data,
//! and the tunable matching thresholds. No text processing lives here.

pub mod config;
pub mod error;
pub mod models;
