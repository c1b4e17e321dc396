//! Recording canvas
//!
//! Every primitive is stored in world space (the current transform already
//! applied), so a [`Recording`] can report its bounds and be replayed onto a
//! canvas that has no transform of its own.

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use super::transform::TransformStack;
use super::{Canvas, Style};
use crate::types::{Angle, BBox, Length};

/// Common behavior for recorded primitives
#[enum_dispatch]
pub trait Mark {
    /// Short lowercase name, used in summaries
    fn kind(&self) -> &'static str;

    /// World-space bounds of the geometry (stroke width not included)
    fn bounds(&self) -> BBox;

    fn style(&self) -> &Style;

    /// Draw this mark onto another canvas
    fn replay(&self, canvas: &mut dyn Canvas);
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleMark {
    pub center: DVec2,
    pub radius: Length,
    pub style: Style,
}

impl Mark for CircleMark {
    fn kind(&self) -> &'static str {
        "circle"
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        bb.expand_circle(self.center, self.radius);
        bb
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn replay(&self, canvas: &mut dyn Canvas) {
        canvas.draw_circle(self.center, self.radius, &self.style);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineMark {
    pub from: DVec2,
    pub to: DVec2,
    pub style: Style,
}

impl Mark for LineMark {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        bb.expand_point(self.from);
        bb.expand_point(self.to);
        bb
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn replay(&self, canvas: &mut dyn Canvas) {
        canvas.draw_line(self.from, self.to, &self.style);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineMark {
    pub points: Vec<DVec2>,
    pub style: Style,
}

impl Mark for PolylineMark {
    fn kind(&self) -> &'static str {
        "polyline"
    }

    fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for p in &self.points {
            bb.expand_point(*p);
        }
        bb
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn replay(&self, canvas: &mut dyn Canvas) {
        canvas.draw_polyline(&self.points, &self.style);
    }
}

/// A recorded primitive
#[enum_dispatch(Mark)]
#[derive(Debug, Clone, PartialEq)]
pub enum MarkEnum {
    Circle(CircleMark),
    Line(LineMark),
    Polyline(PolylineMark),
}

/// Everything that happened on a [`Recorder`], in order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Save,
    Restore,
    Rotate(Angle),
    Translate(DVec2),
    Mark(MarkEnum),
}

/// A canvas that keeps what is drawn on it
#[derive(Debug, Clone)]
pub struct Recorder {
    transform: TransformStack,
    one_pixel: Length,
    events: Vec<Event>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::with_one_pixel(Length(1.0))
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder reporting `one_pixel` as its device pixel size
    pub fn with_one_pixel(one_pixel: Length) -> Self {
        Self {
            transform: TransformStack::new(),
            one_pixel,
            events: Vec::new(),
        }
    }

    pub fn transform(&self) -> &TransformStack {
        &self.transform
    }

    /// Number of unmatched `save` calls
    pub fn depth(&self) -> usize {
        self.transform.depth()
    }

    pub fn finish(self) -> Recording {
        Recording {
            events: self.events,
        }
    }

    fn push_mark(&mut self, mark: impl Into<MarkEnum>) {
        self.events.push(Event::Mark(mark.into()));
    }
}

impl Canvas for Recorder {
    fn save(&mut self) {
        self.transform.save();
        self.events.push(Event::Save);
    }

    fn restore(&mut self) {
        self.transform.restore();
        self.events.push(Event::Restore);
    }

    fn rotate(&mut self, angle: Angle) {
        self.transform.rotate(angle);
        self.events.push(Event::Rotate(angle));
    }

    fn translate(&mut self, offset: DVec2) {
        self.transform.translate(offset);
        self.events.push(Event::Translate(offset));
    }

    fn one_pixel(&self) -> Length {
        self.one_pixel
    }

    fn draw_circle(&mut self, center: DVec2, radius: Length, style: &Style) {
        let center = self.transform.apply(center);
        self.push_mark(CircleMark {
            center,
            radius,
            style: style.clone(),
        });
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, style: &Style) {
        let from = self.transform.apply(from);
        let to = self.transform.apply(to);
        self.push_mark(LineMark {
            from,
            to,
            style: style.clone(),
        });
    }

    fn draw_polyline(&mut self, points: &[DVec2], style: &Style) {
        let points = points.iter().map(|p| self.transform.apply(*p)).collect();
        self.push_mark(PolylineMark {
            points,
            style: style.clone(),
        });
    }
}

/// The finished output of a [`Recorder`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    events: Vec<Event>,
}

impl Recording {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn marks(&self) -> impl Iterator<Item = &MarkEnum> {
        self.events.iter().filter_map(|e| match e {
            Event::Mark(m) => Some(m),
            _ => None,
        })
    }

    pub fn bounds(&self) -> BBox {
        let mut bb = BBox::new();
        for mark in self.marks() {
            bb.union(&mark.bounds());
        }
        bb
    }

    /// Draw every recorded mark onto `canvas`, in order
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for mark in self.marks() {
            mark.replay(canvas);
        }
    }
}

/// One event per line, marks by kind only
impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut indent = 0usize;
        for event in &self.events {
            if matches!(event, Event::Restore) {
                indent = indent.saturating_sub(1);
            }
            let label = match event {
                Event::Save => "save",
                Event::Restore => "restore",
                Event::Rotate(_) => "rotate",
                Event::Translate(_) => "translate",
                Event::Mark(m) => m.kind(),
            };
            writeln!(f, "{:width$}{}", "", label, width = indent * 2)?;
            if matches!(event, Event::Save) {
                indent += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn marks_are_recorded_in_world_space() {
        let mut rec = Recorder::new();
        rec.save();
        rec.rotate(Angle::from_degrees(90.0));
        rec.draw_line(DVec2::ZERO, dvec2(2.0, 0.0), &Style::default());
        rec.restore();
        rec.draw_line(DVec2::ZERO, dvec2(2.0, 0.0), &Style::default());

        let recording = rec.finish();
        let lines: Vec<_> = recording
            .marks()
            .filter_map(|m| match m {
                MarkEnum::Line(l) => Some(l.to),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 2);
        assert!((lines[0] - dvec2(0.0, 2.0)).length() < 1e-12);
        assert_eq!(lines[1], dvec2(2.0, 0.0));
    }

    #[test]
    fn bounds_cover_all_marks() {
        let mut rec = Recorder::new();
        rec.draw_circle(DVec2::ZERO, Length(1.0), &Style::default());
        rec.draw_polyline(&[dvec2(3.0, 0.0), dvec2(3.0, 4.0)], &Style::default());
        let bb = rec.finish().bounds();
        assert_eq!(bb.min, dvec2(-1.0, -1.0));
        assert_eq!(bb.max, dvec2(3.0, 4.0));
    }

    #[test]
    fn replay_reproduces_marks() {
        let mut rec = Recorder::new();
        rec.translate(dvec2(1.0, 1.0));
        rec.draw_circle(DVec2::ZERO, Length(2.0), &Style::default());
        let first = rec.finish();

        let mut copy = Recorder::new();
        first.replay(&mut copy);
        let second = copy.finish();
        assert_eq!(first.marks().collect::<Vec<_>>(), second.marks().collect::<Vec<_>>());
    }

    #[test]
    fn display_indents_scopes() {
        let mut rec = Recorder::new();
        rec.save();
        rec.rotate(Angle::ZERO);
        rec.draw_line(DVec2::ZERO, DVec2::X, &Style::default());
        rec.restore();
        assert_eq!(
            rec.finish().to_string(),
            "save\n  rotate\n  line\nrestore\n"
        );
    }
}
