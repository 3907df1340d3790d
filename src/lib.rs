// Pedantic lint configuration for the crate.
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are limited to constant regex compilation
// - module_name_repetitions: Types like `ScanState` read better unqualified
// - too_many_lines: The scanner transition table is kept in one match
// - option_if_let_else: if-let is often clearer
// - needless_pass_by_value: Dedup passes take ownership of the records they filter
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::option_if_let_else,
    clippy::needless_pass_by_value
)]

pub mod batch;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod operations;

pub use chart::{convert_to_timestamp, parse_medical_text};
pub use models::{CompositeRecord, FlatRecord, SoapSection};
