pub mod scanner;

pub use scanner::{ScannedFile, Scanner, SkipReason};
