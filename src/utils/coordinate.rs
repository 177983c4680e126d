// src/utils/coordinate.rs

use std::fmt;
use std::ops::{Add, Sub};

/// A 2D integer cell index. Signed so that neighbor offsets can step
/// outside the grid and be rejected by a bounds check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    /// The four axis-aligned neighbor offsets, in flood-fill visiting order.
    pub const CARDINALS: [Coordinate; 4] = [
        Coordinate::new(1, 0),
        Coordinate::new(-1, 0),
        Coordinate::new(0, 1),
        Coordinate::new(0, -1),
    ];
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Coordinate::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
