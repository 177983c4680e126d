// src/editor/session.rs

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::editor::commands::{CommandOutput, GeneratorCommand};
use crate::error::SessionError;
use crate::generator::{Generator, MapSnapshot};

/// Oldest entries are dropped once the undo stack grows past this.
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

#[derive(Debug, Clone)]
struct HistoryEntry {
    command: GeneratorCommand,
    /// Map state on the other side of the command.
    snapshot: MapSnapshot,
}

/// A generator being edited interactively.
///
/// The generator sits behind an `Arc<RwLock<..>>` so preview code can hold a
/// read handle and copy buffers while the session drives edits.
pub struct GeneratorSession {
    generator: Arc<RwLock<Generator>>,

    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    history_limit: usize,

    /// Set once any command succeeds.
    is_dirty: bool,
}

impl GeneratorSession {
    pub fn new(generator: Generator) -> Self {
        Self {
            generator: Arc::new(RwLock::new(generator)),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            is_dirty: false,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Shared handle to the generator, for display and export code.
    pub fn generator(&self) -> Arc<RwLock<Generator>> {
        Arc::clone(&self.generator)
    }

    pub fn map_buffer_copy(&self) -> Vec<Vec<bool>> {
        self.generator.read().map_buffer_copy()
    }

    pub fn height_buffer_copy(&self) -> Vec<Vec<f32>> {
        self.generator.read().height_buffer_copy()
    }

    /// Runs `command`. Failed commands leave the map and the history as
    /// they were.
    pub fn execute(&mut self, command: GeneratorCommand) -> Result<CommandOutput, SessionError> {
        let mut generator = self.generator.write();
        let before = generator.snapshot();
        let output = command.execute(&mut generator)?;
        drop(generator);

        debug!("Executed {}", command.name());
        self.undo_stack.push(HistoryEntry {
            command,
            snapshot: before,
        });
        if self.undo_stack.len() > self.history_limit {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
        self.is_dirty = true;
        Ok(output)
    }

    /// Restores the map as it was before the last command and returns that
    /// command.
    pub fn undo(&mut self) -> Result<GeneratorCommand, SessionError> {
        let entry = match self.undo_stack.pop() {
            Some(entry) => entry,
            None => {
                warn!("Undo requested with empty history");
                return Err(SessionError::NothingToUndo);
            }
        };
        let redo = self.swap_snapshot(entry)?;
        let command = redo.command.clone();
        self.redo_stack.push(redo);
        Ok(command)
    }

    /// Reapplies the last undone command's result. The command is not run
    /// again, so random draws are not repeated.
    pub fn redo(&mut self) -> Result<GeneratorCommand, SessionError> {
        let entry = match self.redo_stack.pop() {
            Some(entry) => entry,
            None => {
                warn!("Redo requested with nothing undone");
                return Err(SessionError::NothingToRedo);
            }
        };
        let undo = self.swap_snapshot(entry)?;
        let command = undo.command.clone();
        self.undo_stack.push(undo);
        Ok(command)
    }

    /// Installs `entry`'s snapshot and returns an entry holding the state it
    /// replaced.
    fn swap_snapshot(&mut self, entry: HistoryEntry) -> Result<HistoryEntry, SessionError> {
        let mut generator = self.generator.write();
        let current = generator.snapshot();
        generator.restore(entry.snapshot)?;
        debug!("Restored map state around {}", entry.command.name());
        Ok(HistoryEntry {
            command: entry.command,
            snapshot: current,
        })
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }
}

impl Default for GeneratorSession {
    fn default() -> Self {
        Self::new(Generator::default())
    }
}
