// src/generator/mod.rs
pub mod curve;
mod generator; // Re-exported below
pub mod pipeline;
pub mod settings;

pub use curve::{DensityCurve, Keyframe, KeyframeCurve};
pub use generator::{Generator, MapSnapshot, DEFAULT_MAP_SIZE};
pub use pipeline::GenerationStats;
pub use settings::GeneratorSettings;
