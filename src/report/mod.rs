//! Presentation of extracted cell parameters.
//!
//! We keep formatting code in one place so:
//! - the normalization/extraction code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;
