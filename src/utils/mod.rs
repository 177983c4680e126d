// src/utils/mod.rs
pub mod coordinate;
pub mod grid;
pub mod util;

pub use coordinate::Coordinate;
