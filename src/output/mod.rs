//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_classify_result, print_stats, write_guess, write_question, write_reveal};
