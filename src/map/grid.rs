// src/map/grid.rs

use std::ops::{Index, IndexMut};

use crate::error::GridError;
use crate::utils::grid::{coordinate_of, flat_index, to_nested};
use crate::utils::Coordinate;

/// A square buffer of `size * size` cells, stored flat and addressed
/// `x * size + y`. One role of a [`Swapchain`](crate::map::Swapchain).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A grid with every cell set to `value`.
    pub fn filled(size: usize, value: T) -> Self {
        Grid {
            size,
            cells: vec![value; size * size],
        }
    }

    /// Copies a nested buffer (`buffer[x][y]`). Every column must be as long
    /// as there are columns.
    pub fn from_nested(buffer: &[Vec<T>]) -> Result<Self, GridError> {
        let size = buffer.len();
        let mut cells = Vec::with_capacity(size * size);
        for column in buffer {
            if column.len() != size {
                return Err(GridError::SizeMismatch {
                    expected: size,
                    found: column.len(),
                });
            }
            cells.extend_from_slice(column);
        }
        Ok(Grid { size, cells })
    }

    /// Deep copy as nested columns (`result[x][y]`).
    pub fn to_nested(&self) -> Vec<Vec<T>> {
        to_nested(&self.cells, self.size)
    }
}

impl<T> Grid<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.size && (c.y as usize) < self.size
    }

    /// Flat index of `c`, or `None` when it lies outside the grid.
    pub fn index_of(&self, c: Coordinate) -> Option<usize> {
        if self.contains(c) {
            Some(flat_index(c.x as usize, c.y as usize, self.size))
        } else {
            None
        }
    }

    pub fn get(&self, c: Coordinate) -> Option<&T> {
        self.index_of(c).map(|index| &self.cells[index])
    }

    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        coordinate_of(index, self.size)
    }

    /// Row-major iteration over the cells.
    pub fn iter(&self) -> Cells<'_, T> {
        Cells { grid: self, position: 0 }
    }

    fn checked_index(&self, c: Coordinate) -> usize {
        match self.index_of(c) {
            Some(index) => index,
            None => panic!("coordinate {} outside a {}x{} grid", c, self.size, self.size),
        }
    }
}

impl<T> Index<Coordinate> for Grid<T> {
    type Output = T;

    fn index(&self, c: Coordinate) -> &T {
        &self.cells[self.checked_index(c)]
    }
}

impl<T> IndexMut<Coordinate> for Grid<T> {
    fn index_mut(&mut self, c: Coordinate) -> &mut T {
        let index = self.checked_index(c);
        &mut self.cells[index]
    }
}

/// Lazy row-major walk over a grid's cells. Finite; call `iter()` again
/// for a fresh pass.
#[derive(Debug)]
pub struct Cells<'a, T> {
    grid: &'a Grid<T>,
    position: usize,
}

impl<T> Clone for Cells<'_, T> {
    fn clone(&self) -> Self {
        Cells {
            grid: self.grid,
            position: self.position,
        }
    }
}

impl<'a, T> Iterator for Cells<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let size = self.grid.size;
        if self.position >= size * size {
            return None;
        }
        let x = self.position % size;
        let y = self.position / size;
        self.position += 1;
        Some(&self.grid.cells[flat_index(x, y, size)])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.size * self.grid.size - self.position;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cells<'_, T> {}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = Cells<'a, T>;

    fn into_iter(self) -> Cells<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_nested_rejects_ragged_columns() {
        let ragged = vec![vec![1, 2], vec![3]];
        assert_eq!(
            Grid::from_nested(&ragged),
            Err(GridError::SizeMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_nested_layout_is_x_major() {
        let nested = vec![vec![1, 2], vec![3, 4]];
        let grid = Grid::from_nested(&nested).unwrap();
        assert_eq!(grid[Coordinate::new(1, 0)], 3);
        assert_eq!(grid[Coordinate::new(0, 1)], 2);
        assert_eq!(grid.to_nested(), nested);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::from_nested(&[vec![1, 2], vec![3, 4]]).unwrap();
        let cells: Vec<i32> = grid.iter().copied().collect();
        assert_eq!(cells, vec![1, 3, 2, 4]);
        assert_eq!(grid.iter().len(), 4);
    }

    #[test]
    fn test_get_outside_bounds() {
        let grid = Grid::filled(3, false);
        assert!(grid.get(Coordinate::new(-1, 0)).is_none());
        assert!(grid.get(Coordinate::new(0, 3)).is_none());
        assert_eq!(grid.get(Coordinate::new(2, 2)), Some(&false));
    }

    #[test]
    #[should_panic]
    fn test_index_outside_bounds_panics() {
        let grid = Grid::filled(3, 0u8);
        let _ = grid[Coordinate::new(3, 0)];
    }
}
