//! # vouch-cli: Vouch Command-Line Interface
//!
//! Decodes JSON and YAML user documents from the command line and prints
//! the failure report for each.
//!
//! ## Subcommands
//!
//! - `check`: decode documents into tagged users and report every failure
//! - `brands`: list the standard brands and their rules
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates; no decoding rules here.
//! - Reports go to stdout, logs to stderr.
//! - Exit codes: 0 success, 1 a document failed to decode, 2 operational
//!   error (unreadable or unparseable input).

pub mod brands;
pub mod check;

/// Output format shared by every subcommand.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}
