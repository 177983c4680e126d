// src/generator/pipeline.rs

use std::time::Instant;

use log::info;
use rand::{RngCore, SeedableRng};

use crate::error::GridError;
use crate::generator::generator::Generator;
use crate::generator::settings::GeneratorSettings;

/// Summary of one automatic generation run.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation_time: f64,
    pub main_chamber_size: usize,
    pub pillar_cells_removed: usize,
    pub open_cells: usize,
    pub solid_cells: usize,
}

impl<R: RngCore + SeedableRng> Generator<R> {
    /// Seeds, refines and cleans up a whole map in one call:
    /// seed, refine, keep the main chamber, optionally drop pillars, refine
    /// again, optionally invert the heights.
    pub fn auto_generate(&mut self, settings: &GeneratorSettings) -> Result<GenerationStats, GridError> {
        let start = Instant::now();
        let mut stats = GenerationStats::default();

        if let Some(seed) = settings.seed {
            self.reseed(seed);
        }

        self.new_map(settings.map_size, settings.initial_density, &settings.density_curve)?;
        for _ in 0..settings.refinement_steps {
            self.refine(settings.min_threshold, settings.max_threshold);
        }

        stats.main_chamber_size = self.remove_disconnected_chambers();

        if settings.remove_pillars {
            stats.pillar_cells_removed = self.remove_pillars(settings.max_pillar_size);
        }

        for _ in 0..settings.refinement_steps {
            self.refine(settings.min_threshold, settings.max_threshold);
        }

        if settings.invert_height {
            self.invert_height();
        }

        stats.open_cells = self.open_cell_count();
        stats.solid_cells = self.solid_cell_count();
        stats.generation_time = start.elapsed().as_secs_f64();

        info!(
            "Generated {}x{} cave in {:.3}s: main chamber {} cells, {} open / {} solid",
            settings.map_size,
            settings.map_size,
            stats.generation_time,
            stats.main_chamber_size,
            stats.open_cells,
            stats.solid_cells
        );
        Ok(stats)
    }
}
