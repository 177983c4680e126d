// src/editor/mod.rs

mod commands;
mod session;

pub use commands::{CommandOutput, GeneratorCommand};
pub use session::{GeneratorSession, DEFAULT_HISTORY_LIMIT};
