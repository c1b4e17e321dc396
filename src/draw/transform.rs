//! Current-transform bookkeeping shared by the canvases.

use glam::{DAffine2, DVec2};

use crate::log::warn;
use crate::types::Angle;

/// User-to-world transform with a save/restore stack.
///
/// `rotate` and `translate` post-multiply, so they act in the current user
/// space the same way cairo's `rotate`/`translate` do.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: DAffine2,
    saved: Vec<DAffine2>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: DAffine2::IDENTITY,
            saved: Vec::new(),
        }
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> DAffine2 {
        self.current
    }

    /// Number of unmatched `save` calls
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(t) => self.current = t,
            None => {
                warn!("restore without matching save");
            }
        }
    }

    pub fn rotate(&mut self, angle: Angle) {
        self.current = self.current * DAffine2::from_angle(angle.radians());
    }

    pub fn translate(&mut self, offset: DVec2) {
        self.current = self.current * DAffine2::from_translation(offset);
    }

    /// Map a user-space point to world space
    pub fn apply(&self, p: DVec2) -> DVec2 {
        self.current.transform_point2(p)
    }
}
