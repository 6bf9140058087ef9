//! Helpers over schema-less JSON values: lenient coercion with defaults and
//! order-independent structural hashing.
pub mod coerce;
pub mod deep;

pub use coerce::*;
pub use deep::*;
