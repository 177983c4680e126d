// src/map/bubble.rs
//! Connected-region search over occupancy snapshots.
//!
//! A bubble is a maximal 4-connected region of cells that share one value.
//! The fill works on a detached copy of a grid with an explicit work stack,
//! so region size is bounded by heap memory rather than call depth.

use crate::map::grid::Grid;
use crate::utils::grid::coordinates;
use crate::utils::Coordinate;

/// Coordinates of one connected region, in discovery order.
pub type Bubble = Vec<Coordinate>;

/// Overwrites the 4-connected region reachable from `start` through cells
/// that differ from `target`, setting each of them to `target`.
///
/// When `bubble` is given, every overwritten coordinate is appended to it.
/// Starting outside the grid, or on a cell that already holds `target`,
/// changes nothing. Returns the number of cells written.
pub fn flood<T>(buffer: &mut Grid<T>, start: Coordinate, target: T, mut bubble: Option<&mut Bubble>) -> usize
where
    T: Copy + PartialEq,
{
    let mut stack = Vec::new();
    let mut filled = 0;

    if claim(buffer, start, target) {
        stack.push(start);
    }

    while let Some(c) = stack.pop() {
        filled += 1;
        if let Some(bubble) = bubble.as_deref_mut() {
            bubble.push(c);
        }
        // Reverse so the first cardinal is popped first.
        for &offset in Coordinate::CARDINALS.iter().rev() {
            let next = c + offset;
            if claim(buffer, next, target) {
                stack.push(next);
            }
        }
    }

    filled
}

/// Writes `target` into `c` if it is inside the grid and not already `target`.
fn claim<T>(buffer: &mut Grid<T>, c: Coordinate, target: T) -> bool
where
    T: Copy + PartialEq,
{
    match buffer.index_of(c) {
        Some(index) if buffer.cells()[index] != target => {
            buffer.cells_mut()[index] = target;
            true
        }
        _ => false,
    }
}

/// Partitions the cells equal to `target` into their maximal 4-connected
/// regions. `snapshot` is consumed as scratch space: every region found is
/// flipped to `!target` so the row-major scan never revisits it.
pub fn list_bubbles(mut snapshot: Grid<bool>, target: bool) -> Vec<Bubble> {
    let mut bubbles = Vec::new();

    for c in coordinates(snapshot.size()) {
        if snapshot[c] == target {
            let mut bubble = Bubble::new();
            flood(&mut snapshot, c, !target, Some(&mut bubble));
            if !bubble.is_empty() {
                bubbles.push(bubble);
            }
        }
    }

    bubbles
}
