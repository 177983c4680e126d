// src/editor/commands.rs

use crate::error::GridError;
use crate::generator::{GenerationStats, Generator, GeneratorSettings, KeyframeCurve};
use crate::utils::Coordinate;

/// One user-facing operation on a generator.
#[derive(Clone, Debug, PartialEq)]
pub enum GeneratorCommand {
    NewMap {
        size: usize,
        initial_density: f32,
        curve: KeyframeCurve,
    },
    Refine {
        min_threshold: usize,
        max_threshold: usize,
    },
    RemoveDisconnectedChambers,
    RemovePillars {
        max_pillar_size: usize,
    },
    RemoveIsle {
        at: Coordinate,
    },
    InvertHeight,
    AutoGenerate(GeneratorSettings),
}

/// What a command reports back after running.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutput {
    Done,
    /// Size of the chamber kept by chamber removal.
    ChamberSize(usize),
    /// Cells changed by pillar or isle removal.
    CellsChanged(usize),
    Generated(GenerationStats),
}

impl GeneratorCommand {
    /// Returns a user-friendly name for the command.
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorCommand::NewMap { .. } => "New Map",
            GeneratorCommand::Refine { .. } => "Refine",
            GeneratorCommand::RemoveDisconnectedChambers => "Remove Disconnected Chambers",
            GeneratorCommand::RemovePillars { .. } => "Remove Pillars",
            GeneratorCommand::RemoveIsle { .. } => "Remove Isle",
            GeneratorCommand::InvertHeight => "Invert Height",
            GeneratorCommand::AutoGenerate(_) => "Automatically Generate Level",
        }
    }

    pub fn execute(&self, generator: &mut Generator) -> Result<CommandOutput, GridError> {
        match self {
            GeneratorCommand::NewMap {
                size,
                initial_density,
                curve,
            } => {
                generator.new_map(*size, *initial_density, curve)?;
                Ok(CommandOutput::Done)
            }
            GeneratorCommand::Refine {
                min_threshold,
                max_threshold,
            } => {
                generator.refine(*min_threshold, *max_threshold);
                Ok(CommandOutput::Done)
            }
            GeneratorCommand::RemoveDisconnectedChambers => {
                Ok(CommandOutput::ChamberSize(generator.remove_disconnected_chambers()))
            }
            GeneratorCommand::RemovePillars { max_pillar_size } => {
                Ok(CommandOutput::CellsChanged(generator.remove_pillars(*max_pillar_size)))
            }
            GeneratorCommand::RemoveIsle { at } => Ok(CommandOutput::CellsChanged(generator.remove_isle(*at)?)),
            GeneratorCommand::InvertHeight => {
                generator.invert_height();
                Ok(CommandOutput::Done)
            }
            GeneratorCommand::AutoGenerate(settings) => Ok(CommandOutput::Generated(generator.auto_generate(settings)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_command_resizes() {
        let mut generator = Generator::with_seed(1);
        let command = GeneratorCommand::NewMap {
            size: 30,
            initial_density: 0.4,
            curve: KeyframeCurve::default(),
        };
        assert_eq!(command.execute(&mut generator), Ok(CommandOutput::Done));
        assert_eq!(generator.size(), 30);
    }

    #[test]
    fn test_remove_isle_command_reports_errors() {
        let mut generator = Generator::with_seed(1);
        let command = GeneratorCommand::RemoveIsle {
            at: Coordinate::new(-1, 4),
        };
        assert!(matches!(
            command.execute(&mut generator),
            Err(GridError::OutOfBounds { x: -1, y: 4, .. })
        ));
    }

    #[test]
    fn test_chamber_command_reports_size() {
        let mut generator = Generator::with_seed(1);
        // A fresh generator is all open: one chamber covering the map.
        let output = GeneratorCommand::RemoveDisconnectedChambers.execute(&mut generator);
        let cells = generator.size() * generator.size();
        assert_eq!(output, Ok(CommandOutput::ChamberSize(cells)));
    }

    #[test]
    fn test_names() {
        assert_eq!(GeneratorCommand::InvertHeight.name(), "Invert Height");
        assert_eq!(
            GeneratorCommand::AutoGenerate(GeneratorSettings::default()).name(),
            "Automatically Generate Level"
        );
    }
}
