//! Parametric curve sampling.
//!
//! Uniform sampling walks the parameter range in equal steps. Adaptive
//! sampling starts from the two endpoints and keeps splitting the longest
//! chord at its parameter midpoint until every chord is short enough.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::TAU;

use glam::DVec2;

use crate::log::warn;
use crate::types::{Angle, Length};

/// Default number of steps for parametric curves
pub const DEFAULT_STEPS: usize = 32;

/// Upper bound on the samples produced by adaptive refinement
pub const MAX_ADAPTIVE_SAMPLES: usize = 4096;

/// Steps per full turn used when an arc is approximated by a polyline
const ARC_STEPS_PER_TURN: f64 = 256.0;

/// How a parametric curve is turned into a polyline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveSampling {
    Uniform { steps: usize },
    Adaptive { max_segment: Length },
}

impl Default for CurveSampling {
    fn default() -> Self {
        CurveSampling::Uniform {
            steps: DEFAULT_STEPS,
        }
    }
}

impl CurveSampling {
    /// Parameter values covering `[t_min, t_max]`, endpoints included
    pub fn params(&self, curve: &dyn Fn(f64) -> DVec2, t_min: f64, t_max: f64) -> Vec<f64> {
        match *self {
            CurveSampling::Uniform { steps } => uniform(t_min, t_max, steps).collect(),
            CurveSampling::Adaptive { max_segment } => adaptive(curve, t_min, t_max, max_segment),
        }
    }
}

/// `steps + 1` evenly spaced parameters from `t_min` to `t_max`.
///
/// The range may run backwards (`t_min > t_max`). The last value is exactly
/// `t_max`. Zero steps is treated as one.
pub fn uniform(t_min: f64, t_max: f64, steps: usize) -> impl Iterator<Item = f64> {
    let steps = steps.max(1);
    let step = (t_max - t_min) / steps as f64;
    (0..steps)
        .map(move |i| t_min + step * i as f64)
        .chain(std::iter::once(t_max))
}

/// Number of polyline steps for an arc spanning `sweep`
pub fn arc_steps(sweep: Angle) -> usize {
    let turns = sweep.radians().abs() / TAU;
    ((turns * ARC_STEPS_PER_TURN).ceil() as usize).max(1)
}

#[derive(Debug)]
struct Chord {
    length: f64,
    t_start: f64,
    t_end: f64,
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Chord {}

impl PartialOrd for Chord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Chord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length.total_cmp(&other.length)
    }
}

/// Sorted parameters such that consecutive curve points are at most
/// `max_segment` apart (or [`MAX_ADAPTIVE_SAMPLES`] is reached).
pub fn adaptive(
    curve: &dyn Fn(f64) -> DVec2,
    t_min: f64,
    t_max: f64,
    max_segment: Length,
) -> Vec<f64> {
    let chord = |t_start: f64, t_end: f64| Chord {
        length: curve(t_start).distance(curve(t_end)),
        t_start,
        t_end,
    };

    let mut params = vec![t_min, t_max];
    let mut heap = BinaryHeap::new();
    heap.push(chord(t_min, t_max));

    while let Some(longest) = heap.peek() {
        if longest.length <= max_segment.raw() {
            break;
        }
        if params.len() >= MAX_ADAPTIVE_SAMPLES {
            warn!(
                max_segment = max_segment.raw(),
                longest = longest.length,
                "adaptive sampling hit the sample limit"
            );
            break;
        }
        let Some(Chord { t_start, t_end, .. }) = heap.pop() else {
            break;
        };
        let t_mid = t_start + (t_end - t_start) / 2.0;
        params.push(t_mid);
        heap.push(chord(t_start, t_mid));
        heap.push(chord(t_mid, t_end));
    }

    if t_min <= t_max {
        params.sort_by(f64::total_cmp);
    } else {
        params.sort_by(|a, b| b.total_cmp(a));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn uniform_includes_both_endpoints() {
        let ts: Vec<f64> = uniform(0.0, 1.0, 4).collect();
        assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn uniform_runs_backwards() {
        let ts: Vec<f64> = uniform(-0.5, -2.5, 4).collect();
        assert_eq!(ts, vec![-0.5, -1.0, -1.5, -2.0, -2.5]);
    }

    #[test]
    fn uniform_zero_steps_still_spans_range() {
        let ts: Vec<f64> = uniform(1.0, 3.0, 0).collect();
        assert_eq!(ts, vec![1.0, 3.0]);
    }

    #[test]
    fn adaptive_straight_line_is_split_evenly() {
        let line = |t: f64| dvec2(t, 0.0);
        let ts = adaptive(&line, 0.0, 1.0, Length(0.3));
        assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn adaptive_chords_respect_limit() {
        let circle = |t: f64| dvec2(t.cos(), t.sin()) * 5.0;
        let ts = adaptive(&circle, 0.0, 3.0, Length(0.1));
        for pair in ts.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(circle(pair[0]).distance(circle(pair[1])) <= 0.1);
        }
    }

    #[test]
    fn adaptive_backwards_range_stays_ordered() {
        let line = |t: f64| dvec2(t, t);
        let ts = adaptive(&line, 0.0, -1.0, Length(0.5));
        assert_eq!(ts.first(), Some(&0.0));
        assert_eq!(ts.last(), Some(&-1.0));
        assert!(ts.windows(2).all(|p| p[0] > p[1]));
    }

    #[test]
    fn adaptive_stops_at_sample_limit() {
        let line = |t: f64| dvec2(t, 0.0);
        let ts = adaptive(&line, 0.0, 1.0, Length::ZERO);
        assert_eq!(ts.len(), MAX_ADAPTIVE_SAMPLES);
    }

    #[test]
    fn arc_steps_scale_with_sweep() {
        assert_eq!(arc_steps(Angle::FULL_TURN), 256);
        assert_eq!(arc_steps(Angle::ZERO), 1);
        assert_eq!(arc_steps(-Angle::FULL_TURN / 2.0), 128);
    }
}
