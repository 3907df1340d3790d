//! Operations behind the CLI commands that sit outside the parser itself.

pub mod input;
pub mod stats;

pub use input::read_chart_text;
pub use stats::{get_text_stats, TextStats};
