// src/generator/curve.rs

use serde::{Deserialize, Serialize};

use crate::utils::util::{inverse_lerp, lerp};

/// Maps a radial distance from the map center to the probability that a
/// freshly seeded cell is solid.
pub trait DensityCurve {
    fn evaluate(&self, distance: f32) -> f32;
}

impl<F> DensityCurve for F
where
    F: Fn(f32) -> f32,
{
    fn evaluate(&self, distance: f32) -> f32 {
        self(distance)
    }
}

/// A single `(time, value)` key on a [`KeyframeCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Keyframe { time, value }
    }
}

/// Piecewise-linear curve through a set of keyframes. Outside the keyed
/// range it holds the first or last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeCurve {
    keys: Vec<Keyframe>,
}

impl KeyframeCurve {
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        KeyframeCurve { keys }
    }

    pub fn constant(value: f32) -> Self {
        KeyframeCurve::new(vec![Keyframe::new(0.0, value)])
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<Vec<Keyframe>> for KeyframeCurve {
    fn from(keys: Vec<Keyframe>) -> Self {
        KeyframeCurve::new(keys)
    }
}

impl From<KeyframeCurve> for Vec<Keyframe> {
    fn from(curve: KeyframeCurve) -> Self {
        curve.keys
    }
}

impl Default for KeyframeCurve {
    /// Slightly denser at the center and much denser towards the rim, so
    /// seeded maps close off at their edges.
    fn default() -> Self {
        KeyframeCurve::new(vec![
            Keyframe::new(0.0, 0.534),
            Keyframe::new(0.662, 0.487),
            Keyframe::new(1.0, 0.8),
        ])
    }
}

impl DensityCurve for KeyframeCurve {
    fn evaluate(&self, distance: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if distance.is_nan() {
            return last.value;
        }
        if distance <= first.time {
            return first.value;
        }
        if distance >= last.time {
            return last.value;
        }
        // Find the segment that contains `distance`.
        let upper = self.keys.partition_point(|key| key.time <= distance);
        let (a, b) = (self.keys[upper - 1], self.keys[upper]);
        lerp(a.value, b.value, inverse_lerp(a.time, b.time, distance))
    }
}
