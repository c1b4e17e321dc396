//! Coordinate axes through the origin

use glam::dvec2;

use super::{Canvas, Saved, Style};
use crate::log::warn;
use crate::types::{BBox, Color, Length};

/// Half-length of a tick mark, in device pixels
const TICK_PIXELS: f64 = 2.0;
/// Ticks closer together than this many device pixels are not drawn
const MIN_TICK_SPACING_PIXELS: f64 = 1.0;

pub const X_AXIS_COLOR: Color = Color::rgba(1.0, 0.0, 0.0, 0.6);
pub const Y_AXIS_COLOR: Color = Color::rgba(0.0, 1.0, 0.0, 0.3);

/// Values from `start` up to (not including) `stop`, every `step`
fn ticks(start: f64, stop: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (start / step).ceil() as i64;
    let last = (stop / step).ceil() as i64;
    (first..last).map(move |i| i as f64 * step)
}

/// Draw the X and Y axes across `bounds`, with a tick every `increment` user
/// units (no ticks for `None` or a non-positive increment).
///
/// Ticks that would sit closer than a device pixel apart are skipped.
pub fn draw_axes<C: Canvas + ?Sized>(canvas: &mut C, bounds: &BBox, increment: Option<Length>) {
    let mut c = Saved::new(canvas);
    let one_pixel = c.one_pixel();
    let tick = one_pixel * TICK_PIXELS;
    let increment = increment.filter(|i| i.raw() > 0.0).and_then(|i| {
        if i.raw() < one_pixel.raw() * MIN_TICK_SPACING_PIXELS {
            warn!(
                increment = i.raw(),
                one_pixel = one_pixel.raw(),
                "axis ticks closer than a pixel, skipping them"
            );
            None
        } else {
            Some(i.raw())
        }
    });

    let x_style = Style::new(X_AXIS_COLOR);
    c.draw_line(dvec2(bounds.min.x, 0.0), dvec2(bounds.max.x, 0.0), &x_style);
    if let Some(step) = increment {
        for x in ticks(bounds.min.x, bounds.max.x, step) {
            c.draw_line(dvec2(x, -tick.raw()), dvec2(x, tick.raw()), &x_style);
        }
    }

    let y_style = Style::new(Y_AXIS_COLOR);
    c.draw_line(dvec2(0.0, bounds.min.y), dvec2(0.0, bounds.max.y), &y_style);
    if let Some(step) = increment {
        for y in ticks(bounds.min.y, bounds.max.y, step) {
            c.draw_line(dvec2(-tick.raw(), y), dvec2(tick.raw(), y), &y_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{MarkEnum, Recorder};
    use glam::DVec2;

    #[test]
    fn ticks_are_aligned_to_increment() {
        let t: Vec<f64> = ticks(-2.5, 2.5, 1.0).collect();
        assert_eq!(t, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn axes_with_ticks() {
        let mut rec = Recorder::new();
        let bounds = BBox::around(DVec2::ZERO, Length(3.0));
        draw_axes(&mut rec, &bounds, Some(Length(1.0)));
        let recording = rec.finish();
        let lines = recording
            .marks()
            .filter(|m| matches!(m, MarkEnum::Line(_)))
            .count();
        // two axes, six ticks on each (-3..=2)
        assert_eq!(lines, 2 + 6 + 6);
    }

    #[test]
    fn sub_pixel_increment_draws_bare_axes() {
        let mut rec = Recorder::with_one_pixel(Length(0.1));
        let bounds = BBox::around(DVec2::ZERO, Length(30.0));
        draw_axes(&mut rec, &bounds, Some(Length(1e-9)));
        assert_eq!(rec.finish().marks().count(), 2);
    }

    #[test]
    fn one_pixel_increment_still_ticks() {
        let mut rec = Recorder::with_one_pixel(Length(0.5));
        let bounds = BBox::around(DVec2::ZERO, Length(2.0));
        draw_axes(&mut rec, &bounds, Some(Length(0.5)));
        // two axes, eight ticks on each (-2..=1.5)
        assert_eq!(rec.finish().marks().count(), 2 + 8 + 8);
    }

    #[test]
    fn axes_without_ticks() {
        let mut rec = Recorder::new();
        let bounds = BBox::around(DVec2::ZERO, Length(3.0));
        draw_axes(&mut rec, &bounds, None);
        assert_eq!(rec.finish().marks().count(), 2);
    }
}
