//! vixlint core library.
//!
//! This crate checks Vix sources against the language style guide and
//! exposes the lint pipeline programmatically.
//!
//! High-level modules:
//! - `tokenize`: Line tokenizer with indentation metadata.
//! - `checks`: Rule engine and the individual style rules.
//! - `lint`: Per-file passes, path expansion, and parallel runs.
//! - `models`: Tokens, declarations, diagnostics, and report structs.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod lint;
pub mod models;
pub mod output;
pub mod tokenize;
pub mod utils;
