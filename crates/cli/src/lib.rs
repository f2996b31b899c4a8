//! CLI utilities for the findeasy tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Per-file patch outcomes and batch summaries

#![warn(missing_docs)]

pub mod output;
