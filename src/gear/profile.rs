//! Tooth construction and gear assembly
//!
//! One tooth is described in its own frame, with the rising flank leaving the
//! positive x axis. Every tooth of the gear is that same profile drawn under a
//! rotation of `index * 2π / teeth`.

use glam::DVec2;

use super::params::{DerivedRadii, GearParameters, RootJoin};
use super::style::ProfileStyle;
use crate::draw::curve::{self, CurveSampling};
use crate::draw::{Canvas, Saved, Style};
use crate::errors::{Error, InvoluteError};
use crate::involute::{involute, solve_t};
use crate::log::{debug, trace, warn};
use crate::types::{Angle, BBox, Length, PolarPoint};

/// What part of the tooth a segment is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Root circle up to where the rising flank starts
    RootRadial,
    RisingFlank,
    TipArc,
    FallingFlank,
    /// Falling flank back down to the root circle
    FallingRadial,
    /// Along the root circle to the next tooth
    RootArc,
}

/// Geometry of a segment, centered on the gear axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Line {
        from: PolarPoint,
        to: PolarPoint,
    },
    /// Involute of the base circle between two curve parameters
    Involute {
        base_radius: Length,
        t_start: f64,
        t_end: f64,
    },
    Arc {
        radius: Length,
        start: Angle,
        end: Angle,
    },
}

impl Shape {
    fn sample(&self, sampling: CurveSampling) -> Vec<DVec2> {
        match *self {
            Shape::Line { from, to } => vec![from.to_cartesian(), to.to_cartesian()],
            Shape::Involute {
                base_radius,
                t_start,
                t_end,
            } => {
                let f = |t: f64| involute(t, base_radius).to_cartesian();
                sampling
                    .params(&f, t_start, t_end)
                    .into_iter()
                    .map(f)
                    .collect()
            }
            Shape::Arc { radius, start, end } => {
                curve::uniform(start.radians(), end.radians(), curve::arc_steps(end - start))
                    .map(|a| PolarPoint::new(radius, Angle::from_radians(a)).to_cartesian())
                    .collect()
            }
        }
    }

    fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, sampling: CurveSampling, style: &Style) {
        match *self {
            Shape::Line { from, to } => {
                canvas.draw_line(from.to_cartesian(), to.to_cartesian(), style)
            }
            Shape::Involute {
                base_radius,
                t_start,
                t_end,
            } => canvas.draw_sampled_curve(
                &|t| involute(t, base_radius).to_cartesian(),
                t_start,
                t_end,
                sampling,
                style,
            ),
            Shape::Arc { radius, start, end } => {
                canvas.draw_arc(DVec2::ZERO, radius, start, end, style)
            }
        }
    }
}

/// One piece of a tooth outline.
///
/// `frame` is an extra rotation applied before drawing `shape`: the falling
/// side is the rising side's geometry with negated curve parameters, drawn
/// under a rotation of `2 * mirror_angle`. Segments run tip-ward on the rising
/// side and root-ward on the falling side so consecutive segments share
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToothSegment {
    pub kind: SegmentKind,
    pub shape: Shape,
    pub frame: Angle,
}

impl ToothSegment {
    fn new(kind: SegmentKind, shape: Shape) -> Self {
        Self {
            kind,
            shape,
            frame: Angle::ZERO,
        }
    }

    fn mirrored(kind: SegmentKind, shape: Shape, frame: Angle) -> Self {
        Self { kind, shape, frame }
    }

    /// Polyline for this segment in the tooth frame
    pub fn points(&self, sampling: CurveSampling) -> Vec<DVec2> {
        let rotation = self.frame.unit();
        self.shape
            .sample(sampling)
            .into_iter()
            .map(|p| rotation.rotate(p))
            .collect()
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, sampling: CurveSampling, style: &Style) {
        if self.frame == Angle::ZERO {
            self.shape.draw(canvas, sampling, style);
        } else {
            let mut c = Saved::new(canvas);
            c.rotate(self.frame);
            self.shape.draw(&mut *c, sampling, style);
        }
    }
}

/// Rotation of one tooth about the gear axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToothFrame {
    pub index: u32,
    pub rotation: Angle,
}

/// The solved single-tooth profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToothProfile {
    base_radius: Length,
    root_radius: Length,
    outside_radius: Length,
    angular_pitch: Angle,
    t_outside: f64,
    t_pitch: f64,
    t_root: f64,
    mirror_angle: Angle,
    root_join: RootJoin,
}

impl ToothProfile {
    pub fn new(radii: &DerivedRadii, angular_pitch: Angle) -> Result<Self, InvoluteError> {
        let t_outside = solve_t(radii.outside, radii.base)?;
        let t_pitch = solve_t(radii.pitch, radii.base)?;
        let root_join = radii.root_join();
        let t_root = match root_join {
            RootJoin::OnRootCircle => solve_t(radii.root, radii.base)?,
            RootJoin::RadialFromRoot => 0.0,
        };
        // tooth center: a quarter of the angular pitch past the pitch point
        let mirror_angle = involute(t_pitch, radii.base).angle + angular_pitch / 4.0;

        Ok(Self {
            base_radius: radii.base,
            root_radius: radii.root,
            outside_radius: radii.outside,
            angular_pitch,
            t_outside,
            t_pitch,
            t_root,
            mirror_angle,
            root_join,
        })
    }

    pub fn t_outside(&self) -> f64 {
        self.t_outside
    }

    pub fn t_pitch(&self) -> f64 {
        self.t_pitch
    }

    pub fn t_root(&self) -> f64 {
        self.t_root
    }

    /// Angle of the tooth's symmetry line
    pub fn mirror_angle(&self) -> Angle {
        self.mirror_angle
    }

    pub fn root_join(&self) -> RootJoin {
        self.root_join
    }

    /// Rising flank point at curve parameter `t`
    pub fn rising(&self, t: f64) -> PolarPoint {
        involute(t, self.base_radius)
    }

    /// Falling flank point at curve parameter `t` (negative along the flank)
    pub fn falling(&self, t: f64) -> PolarPoint {
        involute(t, self.base_radius).rotated(self.mirror_angle * 2.0)
    }

    /// Angular width of the tip land; zero or negative means a pointed tooth
    pub fn tip_span(&self) -> Angle {
        let tip = self.rising(self.t_outside).angle;
        (self.mirror_angle - tip) * 2.0
    }

    pub fn is_pointed(&self) -> bool {
        self.tip_span() <= Angle::ZERO
    }

    /// Outline pieces in drawing order, from the root of the rising flank to
    /// the root of the next tooth
    pub fn segments(&self) -> Vec<ToothSegment> {
        let mirror = self.mirror_angle * 2.0;
        let radial = matches!(self.root_join, RootJoin::RadialFromRoot);
        let root_point = PolarPoint::new(self.root_radius, Angle::ZERO);
        let base_point = PolarPoint::new(self.base_radius, Angle::ZERO);
        let mut segments = Vec::with_capacity(6);

        if radial {
            segments.push(ToothSegment::new(
                SegmentKind::RootRadial,
                Shape::Line {
                    from: root_point,
                    to: base_point,
                },
            ));
        }
        segments.push(ToothSegment::new(
            SegmentKind::RisingFlank,
            Shape::Involute {
                base_radius: self.base_radius,
                t_start: self.t_root,
                t_end: self.t_outside,
            },
        ));

        let tip = self.rising(self.t_outside).angle;
        segments.push(ToothSegment::new(
            SegmentKind::TipArc,
            Shape::Arc {
                radius: self.outside_radius,
                start: tip,
                end: mirror - tip,
            },
        ));

        segments.push(ToothSegment::mirrored(
            SegmentKind::FallingFlank,
            Shape::Involute {
                base_radius: self.base_radius,
                t_start: -self.t_outside,
                t_end: -self.t_root,
            },
            mirror,
        ));
        if radial {
            segments.push(ToothSegment::mirrored(
                SegmentKind::FallingRadial,
                Shape::Line {
                    from: base_point,
                    to: root_point,
                },
                mirror,
            ));
        }

        let foot = self.rising(self.t_root).angle;
        segments.push(ToothSegment::new(
            SegmentKind::RootArc,
            Shape::Arc {
                radius: self.root_radius,
                start: mirror - foot,
                end: self.angular_pitch + foot,
            },
        ));
        segments
    }
}

/// A validated gear, ready to be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct GearProfile {
    params: GearParameters,
    radii: DerivedRadii,
    tooth: ToothProfile,
}

impl GearProfile {
    pub fn new(params: &GearParameters) -> Result<Self, Error> {
        let radii = DerivedRadii::new(params)?;
        let tooth = ToothProfile::new(&radii, params.angular_pitch())?;
        debug!(
            teeth = params.number_of_teeth(),
            t_outside = tooth.t_outside(),
            t_pitch = tooth.t_pitch(),
            t_root = tooth.t_root(),
            mirror_angle = tooth.mirror_angle().radians(),
            root_join = ?tooth.root_join(),
            "solved tooth profile"
        );
        if tooth.is_pointed() {
            warn!(
                tip_span = tooth.tip_span().radians(),
                "flanks cross before the outside circle, teeth are pointed"
            );
        }
        Ok(Self {
            params: *params,
            radii,
            tooth,
        })
    }

    pub fn params(&self) -> &GearParameters {
        &self.params
    }

    pub fn radii(&self) -> &DerivedRadii {
        &self.radii
    }

    pub fn tooth(&self) -> &ToothProfile {
        &self.tooth
    }

    pub fn tooth_frames(&self) -> impl Iterator<Item = ToothFrame> + use<> {
        let pitch = self.params.angular_pitch();
        (0..self.params.number_of_teeth()).map(move |index| ToothFrame {
            index,
            rotation: pitch * index as f64,
        })
    }

    /// Smallest box holding every tooth
    pub fn bounds(&self) -> BBox {
        BBox::around(DVec2::ZERO, self.radii.outside)
    }

    /// The closed gear outline as one polyline, first point repeated at the end
    pub fn outline(&self, sampling: CurveSampling) -> Vec<DVec2> {
        let segments = self.tooth.segments();
        let tolerance = self.radii.outside.raw() * 1e-12;
        let mut points: Vec<DVec2> = Vec::new();
        for frame in self.tooth_frames() {
            let rotation = frame.rotation.unit();
            for segment in &segments {
                for p in segment.points(sampling) {
                    let p = rotation.rotate(p);
                    if points.last().is_none_or(|q| q.distance(p) > tolerance) {
                        points.push(p);
                    }
                }
            }
        }
        points
    }

    /// Draw the reference circles (if enabled) then every tooth, each inside
    /// its own saved transform scope
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, style: &ProfileStyle) {
        if style.reference_circles {
            self.draw_reference_circles(canvas, style);
        }

        let segments = self.tooth.segments();
        for frame in self.tooth_frames() {
            trace!(index = frame.index, rotation = frame.rotation.radians(), "tooth");
            let mut c = Saved::new(&mut *canvas);
            c.rotate(frame.rotation);
            if style.construction_lines {
                self.draw_construction_lines(&mut *c, style);
            }
            for segment in &segments {
                let color = style.palette.segment(segment.kind);
                segment.draw(&mut *c, style.sampling, &style.outline(color));
            }
        }
    }

    fn draw_reference_circles<C: Canvas + ?Sized>(&self, canvas: &mut C, style: &ProfileStyle) {
        let palette = &style.palette;
        for (radius, color) in [
            (self.radii.pitch, palette.pitch),
            (self.radii.root, palette.root),
            (self.radii.base, palette.base),
            (self.radii.outside, palette.outside),
        ] {
            canvas.draw_circle(DVec2::ZERO, radius, &style.reference(color));
        }
    }

    /// Rays from the center to the rising flank's crossings of the outside,
    /// pitch and root circles
    fn draw_construction_lines<C: Canvas + ?Sized>(&self, canvas: &mut C, style: &ProfileStyle) {
        let palette = &style.palette;
        let tooth = &self.tooth;
        let pitch = self.params.circular_pitch();
        for (t, color) in [
            (tooth.t_outside(), palette.outside),
            (tooth.t_pitch(), palette.pitch),
            (tooth.t_root(), palette.root),
        ] {
            let end = tooth.rising(t).to_cartesian();
            canvas.draw_line(DVec2::ZERO, end, &style.construction(color, pitch));
        }
    }
}
