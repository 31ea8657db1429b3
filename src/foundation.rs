/// Geometry and pixel primitives.
pub mod core;
/// Error type.
pub mod error;

pub(crate) mod math;
