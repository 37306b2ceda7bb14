//! Value mappers between legacy wire primitives and canonical values
//!
//! Every mapper is a pure, total function: malformed input never panics and
//! never produces an error. Unparsable numbers decode to `0` and unknown
//! codes pass through unchanged.

pub mod boolean;
pub mod codes;
pub mod date;
pub mod number;
pub mod text;

pub use codes::{CodeTable, Frequency};
