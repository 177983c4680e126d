// src/map/swapchain.rs
//! Double-buffered square grid.
//!
//! A `Swapchain` owns two [`Grid`]s. Reads always hit the *read* role, writes
//! always land in the *write* role, and [`Swapchain::swap`] exchanges the two
//! roles without copying. Every `write*` pass fills the whole write role from
//! the read role and swaps once at the end, so a cellular-automaton rule sees
//! only the previous generation no matter which cells it has already produced.

use std::ops::Index;

use rayon::prelude::*;

use crate::error::GridError;
use crate::map::grid::{Cells, Grid};
use crate::utils::grid::{coordinate_of, coordinates, for_each_2d_flat};
use crate::utils::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub struct Swapchain<T> {
    read: Grid<T>,
    write: Grid<T>,
}

impl<T: Clone + Default> Swapchain<T> {
    /// Two `size * size` buffers of default-valued cells.
    pub fn new(size: usize) -> Self {
        Swapchain {
            read: Grid::filled(size, T::default()),
            write: Grid::filled(size, T::default()),
        }
    }
}

impl<T: Clone> Swapchain<T> {
    /// Builds a swapchain whose read and write roles both start as copies of
    /// `buffer` (indexed `buffer[x][y]`).
    pub fn from_buffer(buffer: &[Vec<T>]) -> Result<Self, GridError> {
        let read = Grid::from_nested(buffer)?;
        Ok(Swapchain {
            write: read.clone(),
            read,
        })
    }

    /// Both roles start as `grid`.
    pub fn from_grid(grid: Grid<T>) -> Self {
        Swapchain {
            write: grid.clone(),
            read: grid,
        }
    }

    /// Side length of both buffers.
    pub fn size(&self) -> usize {
        self.read.size()
    }

    pub fn is_coordinate_within_bounds(&self, c: Coordinate) -> bool {
        self.read.contains(c)
    }

    pub fn is_coordinate_outside_bounds(&self, c: Coordinate) -> bool {
        !self.is_coordinate_within_bounds(c)
    }

    /// The current generation.
    pub fn current(&self) -> &Grid<T> {
        &self.read
    }

    /// Value of the read role at `(x, y)`. Panics outside the grid.
    pub fn get(&self, x: i32, y: i32) -> &T {
        &self.read[Coordinate::new(x, y)]
    }

    /// Stores `value` in the write role at `(x, y)`. Invisible to readers
    /// until the next swap. Panics outside the grid.
    pub fn set(&mut self, x: i32, y: i32, value: T) {
        self.write[Coordinate::new(x, y)] = value;
    }

    /// Exchanges the read and write roles.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.read, &mut self.write);
    }

    /// Deep copy of the read role, indexed `copy[x][y]`.
    pub fn buffer_copy(&self) -> Vec<Vec<T>> {
        self.read.to_nested()
    }

    pub fn copy_read_to_write(&mut self) {
        self.write.cells_mut().clone_from_slice(self.read.cells());
    }

    /// Calls `function` for every cell of the read role, row-major.
    pub fn read<F>(&self, mut function: F)
    where
        F: FnMut(Coordinate, &T),
    {
        for c in coordinates(self.size()) {
            function(c, &self.read[c]);
        }
    }

    /// Most general write pass: `function` gets the whole previous generation
    /// plus the coordinate being produced.
    pub fn write_from<F>(&mut self, mut function: F)
    where
        F: FnMut(&Grid<T>, Coordinate) -> T,
    {
        let size = self.size();
        let read = &self.read;
        for_each_2d_flat(self.write.cells_mut(), size, |c, cell| *cell = function(read, c));
        self.swap();
    }

    /// `write[c] = function(c, read[c])` for every cell, then swap.
    pub fn write<F>(&mut self, mut function: F)
    where
        F: FnMut(Coordinate, &T) -> T,
    {
        self.write_from(|read, c| function(c, &read[c]));
    }

    pub fn write_values<F>(&mut self, mut function: F)
    where
        F: FnMut(&T) -> T,
    {
        self.write_from(|read, c| function(&read[c]));
    }

    pub fn write_coordinates<F>(&mut self, mut function: F)
    where
        F: FnMut(Coordinate) -> T,
    {
        self.write_from(|_, c| function(c));
    }

    pub fn fill_with<F>(&mut self, mut function: F)
    where
        F: FnMut() -> T,
    {
        self.write_from(|_, _| function());
    }

    /// Cells listed in `mask` get `mask_value()`, every other cell keeps its
    /// current value.
    pub fn write_masked<F>(&mut self, mask: &[Coordinate], mut mask_value: F)
    where
        F: FnMut() -> T,
    {
        self.copy_read_to_write();
        for &c in mask {
            self.write[c] = mask_value();
        }
        self.swap();
    }

    /// Cells listed in `mask` get `mask_value()`, every other cell gets
    /// `base_value()`.
    pub fn write_masked_over<F, B>(&mut self, mask: &[Coordinate], mut mask_value: F, mut base_value: B)
    where
        F: FnMut() -> T,
        B: FnMut() -> T,
    {
        for cell in self.write.cells_mut() {
            *cell = base_value();
        }
        for &c in mask {
            self.write[c] = mask_value();
        }
        self.swap();
    }

    /// Replaces the write role with a copy of `buffer` and swaps. The buffer
    /// must have the swapchain's size.
    pub fn write_buffer(&mut self, buffer: &[Vec<T>]) -> Result<(), GridError> {
        if buffer.len() != self.size() {
            return Err(GridError::SizeMismatch {
                expected: self.size(),
                found: buffer.len(),
            });
        }
        self.write_grid(Grid::from_nested(buffer)?)
    }

    /// Same as [`write_buffer`](Self::write_buffer) for an owned grid.
    pub fn write_grid(&mut self, grid: Grid<T>) -> Result<(), GridError> {
        if grid.size() != self.size() {
            return Err(GridError::SizeMismatch {
                expected: self.size(),
                found: grid.size(),
            });
        }
        self.write = grid;
        self.swap();
        Ok(())
    }

    pub fn iter(&self) -> Cells<'_, T> {
        self.read.iter()
    }
}

impl<T: Clone + Send + Sync> Swapchain<T> {
    /// Parallel [`write_from`](Self::write_from). Each cell is produced
    /// independently; the swap happens once every cell is written.
    pub fn par_write_from<F>(&mut self, function: F)
    where
        F: Fn(&Grid<T>, Coordinate) -> T + Sync,
    {
        let size = self.size();
        let read = &self.read;
        self.write
            .cells_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, cell)| *cell = function(read, coordinate_of(index, size)));
        self.swap();
    }

    pub fn par_write<F>(&mut self, function: F)
    where
        F: Fn(Coordinate, &T) -> T + Sync,
    {
        self.par_write_from(|read, c| function(c, &read[c]));
    }
}

impl<T> Index<Coordinate> for Swapchain<T> {
    type Output = T;

    fn index(&self, c: Coordinate) -> &T {
        &self.read[c]
    }
}

impl<'a, T: Clone> IntoIterator for &'a Swapchain<T> {
    type Item = &'a T;
    type IntoIter = Cells<'a, T>;

    fn into_iter(self) -> Cells<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(size: usize) -> Swapchain<i32> {
        let mut chain = Swapchain::new(size);
        chain.write_coordinates(|c| c.x * 100 + c.y);
        chain
    }

    #[test]
    fn test_new_is_zero_filled() {
        let chain: Swapchain<f32> = Swapchain::new(4);
        assert_eq!(chain.size(), 4);
        assert!(chain.iter().all(|&cell| cell == 0.0));
    }

    #[test]
    fn test_from_buffer_fills_both_roles() {
        let buffer = vec![vec![true, false], vec![false, true]];
        let mut chain = Swapchain::from_buffer(&buffer).unwrap();
        assert_eq!(chain.buffer_copy(), buffer);
        chain.swap();
        assert_eq!(chain.buffer_copy(), buffer);
    }

    #[test]
    fn test_set_is_invisible_until_swap() {
        let mut chain: Swapchain<i32> = Swapchain::new(3);
        let c = Coordinate::new(1, 2);
        chain.set(1, 2, 7);
        assert_eq!(chain[c], 0);
        assert_eq!(*chain.get(1, 2), 0);
        chain.swap();
        assert_eq!(chain[c], 7);
        assert_eq!(*chain.get(1, 2), 7);
    }

    #[test]
    fn test_write_uses_previous_generation() {
        let mut chain = numbered(5);
        let before = chain.buffer_copy();
        // Each cell copies its left neighbor; reading the new generation
        // would smear the first column across the row.
        chain.write_from(|read, c| {
            let left = c - Coordinate::new(1, 0);
            read.get(left).copied().unwrap_or(-1)
        });
        for c in coordinates(5) {
            let expected = if c.x == 0 { -1 } else { before[(c.x - 1) as usize][c.y as usize] };
            assert_eq!(chain[c], expected);
        }
    }

    #[test]
    fn test_write_equals_function_of_old_value() {
        let mut chain = numbered(4);
        let before = chain.buffer_copy();
        chain.write(|c, &old| old * 2 + c.y);
        for c in coordinates(4) {
            assert_eq!(chain[c], before[c.x as usize][c.y as usize] * 2 + c.y);
        }
    }

    #[test]
    fn test_par_write_matches_sequential_write() {
        let mut sequential = numbered(16);
        let mut parallel = sequential.clone();
        sequential.write(|c, &old| old - c.x);
        parallel.par_write(|c, &old| old - c.x);
        assert_eq!(sequential.buffer_copy(), parallel.buffer_copy());
    }

    #[test]
    fn test_buffer_copy_does_not_alias() {
        let mut chain = numbered(3);
        let first = chain.buffer_copy();
        let mut second = chain.buffer_copy();
        assert_eq!(first, second);

        second[0][0] = 999;
        assert_ne!(first, second);
        assert_eq!(chain[Coordinate::new(0, 0)], 0);

        chain.fill_with(|| 5);
        assert_eq!(first[2][2], 202);
    }

    #[test]
    fn test_write_masked_copies_through() {
        let mut chain = numbered(4);
        let mask = [Coordinate::new(0, 0), Coordinate::new(3, 3)];
        chain.write_masked(&mask, || -1);
        assert_eq!(chain[Coordinate::new(0, 0)], -1);
        assert_eq!(chain[Coordinate::new(3, 3)], -1);
        assert_eq!(chain[Coordinate::new(2, 1)], 201);
    }

    #[test]
    fn test_write_masked_over_base() {
        let mut chain = numbered(4);
        chain.write_masked_over(&[Coordinate::new(1, 1)], || 1, || 0);
        assert_eq!(chain.iter().filter(|&&cell| cell == 1).count(), 1);
        assert_eq!(chain[Coordinate::new(1, 1)], 1);
    }

    #[test]
    fn test_write_buffer_size_mismatch() {
        let mut chain: Swapchain<bool> = Swapchain::new(3);
        let result = chain.write_buffer(&vec![vec![true; 4]; 4]);
        assert_eq!(result, Err(GridError::SizeMismatch { expected: 3, found: 4 }));
        let result = chain.write_buffer(&vec![vec![true; 2]; 3]);
        assert_eq!(result, Err(GridError::SizeMismatch { expected: 3, found: 2 }));
        assert!(chain.iter().all(|&cell| !cell));

        chain.write_buffer(&vec![vec![true; 3]; 3]).unwrap();
        assert!(chain.iter().all(|&cell| cell));
    }

    #[test]
    fn test_bounds_queries() {
        let chain: Swapchain<u8> = Swapchain::new(5);
        assert!(chain.is_coordinate_within_bounds(Coordinate::new(0, 0)));
        assert!(chain.is_coordinate_within_bounds(Coordinate::new(4, 4)));
        assert!(chain.is_coordinate_outside_bounds(Coordinate::new(5, 0)));
        assert!(chain.is_coordinate_outside_bounds(Coordinate::new(0, -1)));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let chain = numbered(3);
        let first: Vec<i32> = chain.iter().copied().collect();
        let second: Vec<i32> = (&chain).into_iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(first[..3], [0, 100, 200]);
    }

    #[test]
    fn test_read_visits_row_major() {
        let chain = numbered(2);
        let mut seen = Vec::new();
        chain.read(|c, &cell| seen.push((c, cell)));
        assert_eq!(seen[1], (Coordinate::new(1, 0), 100));
        assert_eq!(seen.len(), 4);
    }
}
