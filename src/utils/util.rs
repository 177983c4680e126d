//! Interpolation helpers for density curves.
//!
//! ```
//! use cavegen::utils::util::{inverse_lerp, lerp};
//!
//! let t = inverse_lerp(0.0, 0.662, 0.331);
//! assert_eq!(t, 0.5);
//! assert_eq!(lerp(2.0, 4.0, t), 3.0);
//! ```

/// Linear interpolation between `a` and `b`; `t` is not clamped.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b` (0 at `a`, 1 at `b`).
/// Returns 0 when the range is empty.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        (value - a) / (b - a)
    }
}
