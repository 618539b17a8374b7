//! Guesstimate
//!
//! A daily numeric guessing game. Each day has one question with a numeric
//! answer; the player gets five guesses and log-scale proximity feedback after
//! each one. Progress, streaks and history survive restarts.
//!
//! # Quick Start
//!
//! ```rust
//! use guesstimate::core::{FeedbackLevel, classify, parse_input};
//!
//! let guess = parse_input("1.2b").unwrap();
//! let feedback = classify(guess, 1_000_000_000.0, None, None);
//! assert_eq!(feedback.level, FeedbackLevel::Warm);
//! println!("{} {}", feedback.emoji, feedback.label);
//! ```

// Core domain types
pub mod core;

// Session state machine, persistence, timers
pub mod game;

// Share text
pub mod share;

// Question bank
pub mod questions;

// Runtime settings
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
