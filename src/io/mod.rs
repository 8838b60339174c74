//! Input/output helpers.
//!
//! - sweep-file ingest + validation (`ingest`)
//! - report artifacts: text and JSON (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
