/// Time, geometry and style primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
