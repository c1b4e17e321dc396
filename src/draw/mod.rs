//! Drawing interface consumed by the gear generator
//!
//! This module is organized into submodules:
//! - `curve`: parametric curve sampling (uniform and adaptive)
//! - `transform`: the save/restore transform stack shared by canvases
//! - `record`: a canvas that records world-space marks for later replay
//! - `raster`: a tiny-skia backed canvas producing PNG images
//! - `axes`: coordinate axes with tick marks

pub mod axes;
pub mod curve;
pub mod raster;
pub mod record;
pub mod transform;

use std::ops::{Deref, DerefMut};

use glam::DVec2;

use crate::types::{Angle, Color, Length};

pub use axes::draw_axes;
pub use curve::CurveSampling;
pub use raster::{RasterCanvas, Viewport};
pub use record::{Event, Mark, MarkEnum, Recorder, Recording};
pub use transform::TransformStack;

/// Stroke width, either in device pixels or in user-space units
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Thickness {
    /// Multiple of one device pixel, resolved by the target canvas
    Pixels(f64),
    /// Fixed width in user units
    User(Length),
}

impl Default for Thickness {
    fn default() -> Self {
        Thickness::Pixels(1.0)
    }
}

/// Stroke style for every drawing primitive
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub color: Color,
    pub thickness: Thickness,
    /// Alternating on/off lengths in user units; empty means solid
    pub dash_pattern: Vec<Length>,
    pub dash_offset: Length,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: Thickness::default(),
            dash_pattern: Vec::new(),
            dash_offset: Length::ZERO,
        }
    }
}

impl Style {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn with_thickness(mut self, thickness: Thickness) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_dash(mut self, pattern: Vec<Length>, offset: Length) -> Self {
        self.dash_pattern = pattern;
        self.dash_offset = offset;
        self
    }
}

/// A 2D drawing surface with a cairo-like current transform.
///
/// Coordinates passed to the drawing methods are in the current user space;
/// `rotate` and `translate` compose onto the current transform and `save` /
/// `restore` push and pop it. Prefer [`Saved`] over pairing the calls by hand.
pub trait Canvas {
    fn save(&mut self);

    fn restore(&mut self);

    fn rotate(&mut self, angle: Angle);

    fn translate(&mut self, offset: DVec2);

    /// Length of one device pixel in user units
    fn one_pixel(&self) -> Length;

    fn draw_circle(&mut self, center: DVec2, radius: Length, style: &Style);

    fn draw_line(&mut self, from: DVec2, to: DVec2, style: &Style);

    fn draw_polyline(&mut self, points: &[DVec2], style: &Style);

    /// Stroke width of `style` in user units
    fn stroke_width(&self, style: &Style) -> Length {
        match style.thickness {
            Thickness::Pixels(n) => self.one_pixel() * n,
            Thickness::User(len) => len,
        }
    }

    /// Stroke `curve` over `[t_min, t_max]` split into `steps` equal parameter steps.
    fn draw_parametric_curve(
        &mut self,
        curve: &dyn Fn(f64) -> DVec2,
        t_min: f64,
        t_max: f64,
        steps: usize,
        style: &Style,
    ) {
        let points: Vec<DVec2> = curve::uniform(t_min, t_max, steps).map(curve).collect();
        self.draw_polyline(&points, style);
    }

    /// Stroke `curve` refining until no chord is longer than `max_segment`.
    fn draw_parametric_curve_adaptive(
        &mut self,
        curve: &dyn Fn(f64) -> DVec2,
        t_min: f64,
        t_max: f64,
        max_segment: Length,
        style: &Style,
    ) {
        let points: Vec<DVec2> = curve::adaptive(curve, t_min, t_max, max_segment)
            .into_iter()
            .map(curve)
            .collect();
        self.draw_polyline(&points, style);
    }

    fn draw_sampled_curve(
        &mut self,
        curve: &dyn Fn(f64) -> DVec2,
        t_min: f64,
        t_max: f64,
        sampling: CurveSampling,
        style: &Style,
    ) {
        match sampling {
            CurveSampling::Uniform { steps } => {
                self.draw_parametric_curve(curve, t_min, t_max, steps, style)
            }
            CurveSampling::Adaptive { max_segment } => {
                self.draw_parametric_curve_adaptive(curve, t_min, t_max, max_segment, style)
            }
        }
    }

    /// Circular arc from `start` to `end` (counter-clockwise when `end > start`)
    fn draw_arc(&mut self, center: DVec2, radius: Length, start: Angle, end: Angle, style: &Style) {
        let steps = curve::arc_steps(end - start);
        let r = radius.raw();
        self.draw_parametric_curve(
            &|t| center + Angle::from_radians(t).unit() * r,
            start.radians(),
            end.radians(),
            steps,
            style,
        );
    }
}

/// Scoped transform state: saves on creation, restores on drop.
///
/// Derefs to the wrapped canvas, so rotations applied through the guard are
/// undone on every exit path.
pub struct Saved<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas + ?Sized> Saved<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        canvas.save();
        Self { canvas }
    }
}

impl<C: Canvas + ?Sized> Deref for Saved<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for Saved<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for Saved<'_, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
