//! The measurement-interpretation core.
//!
//! - quadrant/unit normalization (`normalize`)
//! - figure-of-merit extraction (`extract`)
//!
//! Both are pure in-memory transforms; no I/O happens here.

pub mod extract;
pub mod normalize;

pub use extract::*;
pub use normalize::*;
