//! The involute of a circle, in polar form.
//!
//! For a base circle of radius `rb` and curve parameter `t`:
//!
//! ```text
//! radius = rb * sqrt(1 + t²)
//! angle  = t - atan(t)
//! ```
//!
//! `t = 0` is the point where the curve leaves the base circle. Negative `t`
//! traces the mirror image about the x axis (same radius, negated angle).

use crate::errors::InvoluteError;
use crate::types::{Angle, Length, PolarPoint};

/// Point on the involute of the circle of radius `base_radius` at parameter `t`.
#[inline]
pub fn involute(t: f64, base_radius: Length) -> PolarPoint {
    PolarPoint {
        radius: base_radius * (1.0 + t * t).sqrt(),
        angle: Angle::from_radians(t - t.atan()),
    }
}

/// The non-negative parameter at which the involute reaches `radius`.
///
/// The negative solution is `-solve_t(..)`. Radii inside the base circle have
/// no solution.
pub fn solve_t(radius: Length, base_radius: Length) -> Result<f64, InvoluteError> {
    let ratio = radius
        .checked_div(base_radius)
        .filter(|r| r.is_finite() && base_radius.0 > 0.0)
        .ok_or(InvoluteError::DegenerateBaseCircle { base_radius: base_radius.0 })?;
    let under_root = ratio * ratio - 1.0;
    if under_root < 0.0 {
        return Err(InvoluteError::BelowBaseCircle {
            radius: radius.0,
            base_radius: base_radius.0,
        });
    }
    Ok(under_root.sqrt())
}
