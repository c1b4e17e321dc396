//! Raster canvas backed by tiny-skia
//!
//! User space is mapped onto the pixmap by a [`Viewport`] with the Y axis
//! pointing up; paths are built in device pixels and stroked with
//! anti-aliasing.

use camino::Utf8Path;
use glam::{DAffine2, DVec2, dvec2};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash};

use super::transform::TransformStack;
use super::{Canvas, Style};
use crate::errors::RenderError;
use crate::log::{debug, warn};
use crate::types::{Angle, BBox, Color, Length};

/// Mapping from a user-space window onto a `width × height` pixel grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: BBox,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(bounds: BBox, width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::CanvasSize { width, height });
        }
        if bounds.is_empty()
            || !bounds.is_finite()
            || bounds.width().raw() <= 0.0
            || bounds.height().raw() <= 0.0
        {
            return Err(RenderError::ViewBounds);
        }
        Ok(Self {
            bounds,
            width,
            height,
        })
    }

    /// Square window of half-size `radius` around `center`
    pub fn centered(
        center: DVec2,
        radius: Length,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        Self::new(BBox::around(center, radius), width, height)
    }

    /// Smallest window around `content` (scaled by `margin`) whose aspect
    /// ratio matches the pixel grid
    pub fn fit(content: &BBox, width: u32, height: u32, margin: f64) -> Result<Self, RenderError> {
        if content.is_empty() || !content.is_finite() {
            return Err(RenderError::ViewBounds);
        }
        if width == 0 || height == 0 {
            return Err(RenderError::CanvasSize { width, height });
        }
        let aspect = width as f64 / height as f64;
        let mut half = dvec2(content.width().raw(), content.height().raw()) * 0.5 * margin;
        if half.x < half.y * aspect {
            half.x = half.y * aspect;
        } else {
            half.y = half.x / aspect;
        }
        let center = content.center();
        Self::new(
            BBox {
                min: center - half,
                max: center + half,
            },
            width,
            height,
        )
    }

    pub fn bounds(&self) -> BBox {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per user unit along each axis
    pub fn scale(&self) -> DVec2 {
        dvec2(
            self.width as f64 / self.bounds.width().raw(),
            self.height as f64 / self.bounds.height().raw(),
        )
    }

    /// World (user) to device transform, flipping Y
    pub fn to_device(&self) -> DAffine2 {
        let scale = self.scale();
        DAffine2::from_scale(dvec2(scale.x, -scale.y))
            * DAffine2::from_translation(dvec2(-self.bounds.min.x, -self.bounds.max.y))
    }

    /// User-space length of one horizontal device pixel
    pub fn one_pixel(&self) -> Length {
        Length(1.0 / self.scale().x)
    }
}

/// A canvas drawing into a tiny-skia pixmap
#[derive(Debug)]
pub struct RasterCanvas {
    pixmap: Pixmap,
    viewport: Viewport,
    transform: TransformStack,
}

impl RasterCanvas {
    pub fn new(viewport: Viewport) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(viewport.width(), viewport.height()).ok_or(
            RenderError::CanvasSize {
                width: viewport.width(),
                height: viewport.height(),
            },
        )?;
        debug!(
            width = viewport.width(),
            height = viewport.height(),
            one_pixel = viewport.one_pixel().raw(),
            "raster canvas created"
        );
        Ok(Self {
            pixmap,
            viewport,
            transform: TransformStack::new(),
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Color of the pixel at device coordinates, if inside the pixmap
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    pub fn fill(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// User-space point to device pixels under the current transform
    pub fn to_device(&self, p: DVec2) -> DVec2 {
        self.viewport
            .to_device()
            .transform_point2(self.transform.apply(p))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::PngEncode {
                message: e.to_string(),
            })
    }

    pub fn save_png(&self, path: &Utf8Path) -> Result<(), RenderError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|source| RenderError::Io {
            path: path.to_string(),
            source,
        })?;
        debug!(%path, "wrote png");
        Ok(())
    }

    fn stroke(&mut self, path: Option<tiny_skia::Path>, style: &Style) {
        let Some(path) = path else {
            warn!("skipping degenerate path");
            return;
        };

        let mut paint = Paint::default();
        let [r, g, b, a] = style.color.to_rgba8();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let px_per_unit = self.viewport.scale().x;
        let mut stroke = Stroke {
            width: (self.stroke_width(style).raw() * px_per_unit) as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        if !style.dash_pattern.is_empty() {
            let mut intervals: Vec<f32> = style
                .dash_pattern
                .iter()
                .map(|l| (l.raw() * px_per_unit) as f32)
                .collect();
            // an odd pattern repeats to form on/off pairs
            if intervals.len() % 2 == 1 {
                intervals.extend_from_within(..);
            }
            let offset = (style.dash_offset.raw() * px_per_unit) as f32;
            stroke.dash = StrokeDash::new(intervals, offset);
            if stroke.dash.is_none() {
                warn!("ignoring invalid dash pattern");
            }
        }

        self.pixmap
            .stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
    }
}

impl Canvas for RasterCanvas {
    fn save(&mut self) {
        self.transform.save();
    }

    fn restore(&mut self) {
        self.transform.restore();
    }

    fn rotate(&mut self, angle: Angle) {
        self.transform.rotate(angle);
    }

    fn translate(&mut self, offset: DVec2) {
        self.transform.translate(offset);
    }

    fn one_pixel(&self) -> Length {
        self.viewport.one_pixel()
    }

    fn draw_circle(&mut self, center: DVec2, radius: Length, style: &Style) {
        let c = self.to_device(center);
        let r = self.viewport.scale() * radius.raw();
        let path = Rect::from_xywh(
            (c.x - r.x) as f32,
            (c.y - r.y) as f32,
            (2.0 * r.x) as f32,
            (2.0 * r.y) as f32,
        )
        .and_then(PathBuilder::from_oval);
        self.stroke(path, style);
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, style: &Style) {
        self.draw_polyline(&[from, to], style);
    }

    fn draw_polyline(&mut self, points: &[DVec2], style: &Style) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut pb = PathBuilder::new();
        let p = self.to_device(*first);
        pb.move_to(p.x as f32, p.y as f32);
        for q in rest {
            let p = self.to_device(*q);
            pb.line_to(p.x as f32, p.y as f32);
        }
        self.stroke(pb.finish(), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Thickness;

    fn canvas() -> RasterCanvas {
        let viewport = Viewport::centered(DVec2::ZERO, Length(5.0), 100, 100).unwrap();
        let mut canvas = RasterCanvas::new(viewport).unwrap();
        canvas.fill(Color::WHITE);
        canvas
    }

    #[test]
    fn viewport_maps_corners_with_y_up() {
        let vp = Viewport::centered(DVec2::ZERO, Length(5.0), 100, 100).unwrap();
        let t = vp.to_device();
        assert_eq!(t.transform_point2(dvec2(-5.0, 5.0)), dvec2(0.0, 0.0));
        assert_eq!(t.transform_point2(dvec2(5.0, -5.0)), dvec2(100.0, 100.0));
        assert_eq!(t.transform_point2(DVec2::ZERO), dvec2(50.0, 50.0));
        assert_eq!(vp.one_pixel(), Length(0.1));
    }

    #[test]
    fn viewport_rejects_empty_sizes() {
        assert!(matches!(
            Viewport::centered(DVec2::ZERO, Length(1.0), 0, 10),
            Err(RenderError::CanvasSize { .. })
        ));
        assert!(matches!(
            Viewport::centered(DVec2::ZERO, Length::ZERO, 10, 10),
            Err(RenderError::ViewBounds)
        ));
    }

    #[test]
    fn fit_matches_pixel_aspect() {
        let content = BBox::around(DVec2::ZERO, Length(2.0));
        let vp = Viewport::fit(&content, 200, 100, 1.0).unwrap();
        assert_eq!(vp.bounds().width(), Length(8.0));
        assert_eq!(vp.bounds().height(), Length(4.0));
        assert_eq!(vp.scale(), dvec2(25.0, 25.0));
    }

    #[test]
    fn line_marks_pixels() {
        let mut canvas = canvas();
        let style = Style::new(Color::BLACK).with_thickness(Thickness::Pixels(3.0));
        canvas.draw_line(dvec2(-4.0, 0.0), dvec2(4.0, 0.0), &style);
        let [r, g, b, _] = canvas.pixel(50, 50).unwrap();
        assert!(r < 128 && g < 128 && b < 128);
        assert_eq!(canvas.pixel(50, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn rotation_moves_strokes() {
        let mut canvas = canvas();
        let style = Style::new(Color::RED).with_thickness(Thickness::Pixels(3.0));
        canvas.save();
        canvas.rotate(Angle::from_degrees(90.0));
        canvas.draw_line(dvec2(1.0, 0.0), dvec2(4.0, 0.0), &style);
        canvas.restore();
        // +x rotated onto +y, which is up on the pixmap
        let [r, g, _, _] = canvas.pixel(50, 25).unwrap();
        assert!(r > 200 && g < 100);
        assert_eq!(canvas.pixel(75, 50), Some([255, 255, 255, 255]));
    }

    #[test]
    fn dashes_leave_gaps() {
        let dark = |canvas: &RasterCanvas, x: u32| {
            let [r, g, b, _] = canvas.pixel(x, 50).unwrap();
            r < 128 && g < 128 && b < 128
        };
        let dashed = Style::new(Color::BLACK)
            .with_thickness(Thickness::Pixels(3.0))
            .with_dash(vec![Length(1.0)], Length::ZERO);

        // one user unit is 10 px: on for 10, off for 10
        let mut plain = canvas();
        plain.draw_line(dvec2(-5.0, 0.0), dvec2(5.0, 0.0), &dashed);
        for x in [5, 25, 45, 65, 85] {
            assert!(dark(&plain, x), "dash at x = {x}");
        }
        for x in [15, 35, 55, 75, 95] {
            assert!(!dark(&plain, x), "gap at x = {x}");
        }

        // an offset of one dash swaps dashes and gaps
        let shifted = dashed.with_dash(vec![Length(1.0)], Length(1.0));
        let mut offset = canvas();
        offset.draw_line(dvec2(-5.0, 0.0), dvec2(5.0, 0.0), &shifted);
        assert!(!dark(&offset, 5));
        assert!(dark(&offset, 15));
    }

    #[test]
    fn invalid_dash_pattern_strokes_solid() {
        let style = Style::new(Color::BLACK)
            .with_thickness(Thickness::Pixels(3.0))
            .with_dash(vec![Length::ZERO], Length::ZERO);
        let mut solid = canvas();
        solid.draw_line(dvec2(-5.0, 0.0), dvec2(5.0, 0.0), &style);
        let [r, _, _, _] = solid.pixel(15, 50).unwrap();
        assert!(r < 128);
    }

    #[test]
    fn circle_is_stroked_on_its_radius() {
        let mut canvas = canvas();
        let style = Style::new(Color::BLACK).with_thickness(Thickness::Pixels(3.0));
        canvas.draw_circle(DVec2::ZERO, Length(3.0), &style);
        assert_ne!(canvas.pixel(80, 50), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(50, 50), Some([255, 255, 255, 255]));
    }

    #[test]
    fn encodes_png() {
        let bytes = canvas().encode_png().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
