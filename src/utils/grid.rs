// src/utils/grid.rs
//! Helpers that walk a square grid, either stored as nested rows
//! (`grid[x][y]`) or as a flat buffer indexed `x * size + y`.
//!
//! Every walk is row-major: `y` is the outer loop and `x` the inner one, so
//! anything that consumes random draws per cell sees them in the same order
//! regardless of which storage form it iterates.

use crate::utils::Coordinate;

/// Flat index of `(x, y)` in a `size * size` buffer.
#[inline]
pub fn flat_index(x: usize, y: usize, size: usize) -> usize {
    x * size + y
}

/// Inverse of [`flat_index`].
#[inline]
pub fn coordinate_of(index: usize, size: usize) -> Coordinate {
    Coordinate::new((index / size) as i32, (index % size) as i32)
}

/// All coordinates of a `size * size` grid in row-major order.
pub fn coordinates(size: usize) -> impl Iterator<Item = Coordinate> + Clone {
    (0..size).flat_map(move |y| (0..size).map(move |x| Coordinate::new(x as i32, y as i32)))
}

/// Calls `function` for every cell of a nested grid, exposing the cell's
/// coordinate and a mutable reference to it.
///
/// # Examples
///
/// ```
/// use cavegen::utils::grid::for_each_2d;
///
/// let mut grid = vec![vec![0; 3]; 3];
/// for_each_2d(&mut grid, |c, cell| *cell = c.x + c.y);
/// assert_eq!(grid[2][1], 3);
/// ```
pub fn for_each_2d<T, F>(grid: &mut [Vec<T>], mut function: F)
where
    F: FnMut(Coordinate, &mut T),
{
    let height = grid.first().map_or(0, Vec::len);
    for y in 0..height {
        for (x, column) in grid.iter_mut().enumerate() {
            function(Coordinate::new(x as i32, y as i32), &mut column[y]);
        }
    }
}

/// Treats a flat buffer of `size * size` cells as a 2D grid.
pub fn for_each_2d_flat<T, F>(buffer: &mut [T], size: usize, mut function: F)
where
    F: FnMut(Coordinate, &mut T),
{
    debug_assert_eq!(buffer.len(), size * size);
    for y in 0..size {
        for x in 0..size {
            function(Coordinate::new(x as i32, y as i32), &mut buffer[flat_index(x, y, size)]);
        }
    }
}

/// Splits a flat buffer into nested columns (`result[x][y]`).
pub fn to_nested<T: Clone>(buffer: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    buffer.chunks(size).map(<[T]>::to_vec).collect()
}
