// src/generator/generator.rs

use log::{debug, warn};
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::GridError;
use crate::generator::curve::DensityCurve;
use crate::map::{bubble, flood, Bubble, Grid, Swapchain};
use crate::utils::Coordinate;

/// Side length of a generator that has not been given a map yet.
pub const DEFAULT_MAP_SIZE: usize = 128;

/// Sampling step of the height noise, in noise units per cell.
const HEIGHT_FREQUENCY: f64 = 0.05;

/// Height seeding offsets are drawn from `-HEIGHT_OFFSET_RANGE..HEIGHT_OFFSET_RANGE`.
const HEIGHT_OFFSET_RANGE: i32 = 50;

/// Fixed divisor of the mass sum, whatever the number of open neighbors.
const MASS_DIVISOR: f32 = 8.0;

/// Detached copy of both generator buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    pub occupancy: Grid<bool>,
    pub height: Grid<f32>,
}

impl MapSnapshot {
    pub fn size(&self) -> usize {
        self.occupancy.size()
    }
}

/// Cellular-automaton cave generator.
///
/// Holds an occupancy swapchain (`true` = wall, `false` = floor) and a height
/// swapchain of the same size, plus the random source used for seeding.
#[derive(Debug, Clone)]
pub struct Generator<R = StdRng> {
    occupancy: Swapchain<bool>,
    height: Swapchain<f32>,
    rng: R,
}

impl Generator<StdRng> {
    /// A generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// A generator whose maps are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Generator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + SeedableRng> Generator<R> {
    /// Restarts the random stream from `seed`. Map contents are untouched.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

impl<R: RngCore> Generator<R> {
    pub fn with_rng(rng: R) -> Self {
        Generator {
            occupancy: Swapchain::new(DEFAULT_MAP_SIZE),
            height: Swapchain::new(DEFAULT_MAP_SIZE),
            rng,
        }
    }

    pub fn size(&self) -> usize {
        self.occupancy.size()
    }

    pub fn occupancy(&self) -> &Swapchain<bool> {
        &self.occupancy
    }

    pub fn height(&self) -> &Swapchain<f32> {
        &self.height
    }

    /// Copy of the occupancy grid, indexed `[x][y]`.
    pub fn map_buffer_copy(&self) -> Vec<Vec<bool>> {
        self.occupancy.buffer_copy()
    }

    /// Copy of the height grid, indexed `[x][y]`.
    pub fn height_buffer_copy(&self) -> Vec<Vec<f32>> {
        self.height.buffer_copy()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            occupancy: self.occupancy.current().clone(),
            height: self.height.current().clone(),
        }
    }

    /// Replaces both buffers with `snapshot`, resizing when needed. Both
    /// grids must share one size; on error nothing changes.
    pub fn restore(&mut self, snapshot: MapSnapshot) -> Result<(), GridError> {
        if snapshot.occupancy.size() != snapshot.height.size() {
            return Err(GridError::SizeMismatch {
                expected: snapshot.occupancy.size(),
                found: snapshot.height.size(),
            });
        }
        self.occupancy = Swapchain::from_grid(snapshot.occupancy);
        self.height = Swapchain::from_grid(snapshot.height);
        Ok(())
    }

    /// Seeds a fresh map.
    ///
    /// A cell turns solid when a uniform draw falls below
    /// `curve.evaluate(r)`, where `r` is the cell's distance from the center
    /// in a frame scaled so the grid spans `[-0.75, 0.75)` on each axis.
    /// Heights come from Perlin noise at a random offset, so consecutive maps
    /// differ. `initial_density` is accepted but does not affect seeding.
    pub fn new_map<C>(&mut self, size: usize, initial_density: f32, curve: &C) -> Result<(), GridError>
    where
        C: DensityCurve + ?Sized,
    {
        if size == 0 {
            return Err(GridError::InvalidSize(size));
        }
        if size != self.size() {
            self.occupancy = Swapchain::new(size);
            self.height = Swapchain::new(size);
        }

        let side = size as f32;
        let rng = &mut self.rng;
        self.occupancy.write_coordinates(|c| {
            let x = (c.x as f32 / side - 0.5) * 1.5;
            let y = (c.y as f32 / side - 0.5) * 1.5;
            rng.random::<f32>() < curve.evaluate((x * x + y * y).sqrt())
        });

        let offset_x = f64::from(self.rng.random_range(-HEIGHT_OFFSET_RANGE..HEIGHT_OFFSET_RANGE));
        let offset_y = f64::from(self.rng.random_range(-HEIGHT_OFFSET_RANGE..HEIGHT_OFFSET_RANGE));
        let perlin = Perlin::new(self.rng.random());
        self.height.par_write_from(|_, c| {
            let sample = perlin.get([
                (f64::from(c.x) + offset_x) * HEIGHT_FREQUENCY,
                (f64::from(c.y) + offset_y) * HEIGHT_FREQUENCY,
            ]);
            (((sample + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
        });

        debug!(
            "Seeded {}x{} map: {} solid cells (initial density {} unused)",
            size,
            size,
            self.solid_cell_count(),
            initial_density
        );
        Ok(())
    }

    /// Solid cells in the `(2 * range + 1)^2` window around `c`, center
    /// excluded. Cells beyond the map edge count as solid.
    pub fn count_alive_adjacent_cells(&self, c: Coordinate, range: usize) -> usize {
        count_alive(self.occupancy.current(), c, range as i32)
    }

    /// Sum of the heights of open cells in the `(2 * range + 1)^2` window
    /// around `c` (center included), divided by 8.
    pub fn get_mass(&self, range: usize, c: Coordinate) -> f32 {
        mass(self.occupancy.current(), self.height.current(), range as i32, c)
    }

    /// One automaton generation.
    ///
    /// A solid cell survives with at least `min_threshold` solid neighbors;
    /// an open cell fills in with more than `max_threshold`. Heights are then
    /// re-diffused over the new occupancy.
    pub fn refine(&mut self, min_threshold: usize, max_threshold: usize) {
        self.occupancy.par_write_from(|map, c| {
            let count = count_alive(map, c, 1);
            if map[c] {
                count >= min_threshold
            } else {
                count > max_threshold
            }
        });

        let map = self.occupancy.current();
        self.height.par_write_from(|height, c| mass(map, height, 1, c));

        debug!(
            "Refined map ({}, {}): {} solid cells",
            min_threshold,
            max_threshold,
            self.solid_cell_count()
        );
    }

    /// `h -> 1 - h` for every height.
    pub fn invert_height(&mut self) {
        self.height.write_values(|&h| 1.0 - h);
    }

    /// Flips the connected region containing `c` to the opposite value.
    /// Returns how many cells changed.
    pub fn remove_isle(&mut self, c: Coordinate) -> Result<usize, GridError> {
        let mut buffer = self.occupancy.current().clone();
        let value = *buffer.get(c).ok_or(GridError::OutOfBounds {
            x: c.x,
            y: c.y,
            size: buffer.size(),
        })?;

        let flipped = flood(&mut buffer, c, !value, None);
        self.occupancy.write_grid(buffer)?;
        debug!("Removed isle at {}: {} cells flipped", c, flipped);
        Ok(flipped)
    }

    /// Every maximal 4-connected region of cells equal to `target`.
    pub fn list_bubbles(&self, target: bool) -> Vec<Bubble> {
        bubble::list_bubbles(self.occupancy.current().clone(), target)
    }

    /// Keeps only the largest open region; everything else becomes solid.
    /// Returns the size of the surviving chamber, or 0 when the map has no
    /// open cell at all.
    pub fn remove_disconnected_chambers(&mut self) -> usize {
        let chambers = self.list_bubbles(false);
        let count = chambers.len();

        // First chamber wins ties.
        let main_chamber = chambers
            .into_iter()
            .reduce(|best, chamber| if chamber.len() > best.len() { chamber } else { best });

        match main_chamber {
            Some(chamber) => {
                self.occupancy.write_masked_over(&chamber, || false, || true);
                debug!("Kept main chamber of {} cells out of {} chambers", chamber.len(), count);
                chamber.len()
            }
            None => {
                warn!("No open chamber found; map left untouched");
                0
            }
        }
    }

    /// Opens every solid region of at most `max_pillar_size` cells. Larger
    /// wall masses are left alone. Returns the number of cells opened.
    pub fn remove_pillars(&mut self, max_pillar_size: usize) -> usize {
        let mask: Bubble = self
            .list_bubbles(true)
            .into_iter()
            .filter(|pillar| pillar.len() <= max_pillar_size)
            .flatten()
            .collect();

        self.occupancy.write_masked(&mask, || false);
        debug!("Removed pillars up to {} cells: {} cells opened", max_pillar_size, mask.len());
        mask.len()
    }

    pub fn solid_cell_count(&self) -> usize {
        self.occupancy.iter().filter(|&&solid| solid).count()
    }

    pub fn open_cell_count(&self) -> usize {
        self.occupancy.iter().filter(|&&solid| !solid).count()
    }
}

fn count_alive(map: &Grid<bool>, c: Coordinate, range: i32) -> usize {
    let mut result = 0;
    for j in -range..=range {
        for i in -range..=range {
            if i == 0 && j == 0 {
                continue;
            }
            // Off-map neighbors read as wall.
            if map.get(c + Coordinate::new(i, j)).copied().unwrap_or(true) {
                result += 1;
            }
        }
    }
    result
}

fn mass(map: &Grid<bool>, height: &Grid<f32>, range: i32, c: Coordinate) -> f32 {
    let mut result = 0.0;
    for j in -range..=range {
        for i in -range..=range {
            let neighbor = c + Coordinate::new(i, j);
            if let (Some(&h), Some(&false)) = (height.get(neighbor), map.get(neighbor)) {
                result += h;
            }
        }
    }
    result / MASS_DIVISOR
}
