#![forbid(unsafe_code)]
#![doc = "Common types, error codes, and identifiers for sedh."]

pub mod error;
pub mod ids;

pub use error::*;
pub use ids::*;
