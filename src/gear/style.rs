//! Colors and stroke widths for the gear drawing. None of this affects geometry.

use crate::draw::{CurveSampling, Style, Thickness};
use crate::types::{Color, Length};

use super::profile::SegmentKind;

/// Reference circles are stroked at this fraction of the outline width
const REFERENCE_CIRCLE_SCALE: f64 = 0.25;
/// Construction rays are stroked at this fraction of the outline width
const CONSTRUCTION_LINE_SCALE: f64 = 1.0 / 3.0;
/// Construction rays are dashed with this fraction of the circular pitch
const CONSTRUCTION_DASH: f64 = 1.0 / 16.0;

/// One color per curve class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub pitch: Color,
    pub outside: Color,
    pub base: Color,
    pub root: Color,
    /// Involute flanks
    pub flank: Color,
    pub tip: Color,
    /// Root circle arcs between teeth
    pub root_arc: Color,
    /// Radial segments joining a flank to the root circle
    pub radial: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let orange = Color::rgb(1.0, 0.5, 0.2);
        let blue = Color::rgb(0.2, 0.5, 0.7);
        let purple = Color::rgb(0.6, 0.3, 0.7);
        Self {
            pitch: orange,
            outside: blue,
            base: purple,
            root: blue,
            flank: purple,
            tip: blue,
            root_arc: blue,
            radial: Color::RED,
        }
    }
}

impl Palette {
    pub fn segment(&self, kind: SegmentKind) -> Color {
        match kind {
            SegmentKind::RootRadial | SegmentKind::FallingRadial => self.radial,
            SegmentKind::RisingFlank | SegmentKind::FallingFlank => self.flank,
            SegmentKind::TipArc => self.tip,
            SegmentKind::RootArc => self.root_arc,
        }
    }
}

/// Everything [`GearProfile::draw`](super::GearProfile::draw) needs besides the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStyle {
    pub palette: Palette,
    pub sampling: CurveSampling,
    /// Multiplier applied to every stroke width (1.0 = one device pixel outline)
    pub stroke_scale: f64,
    /// Draw the pitch, root, base and outside circles before the teeth
    pub reference_circles: bool,
    /// Draw rays from the center to where tooth 0 crosses the outside, pitch
    /// and root circles
    pub construction_lines: bool,
}

impl Default for ProfileStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            sampling: CurveSampling::default(),
            stroke_scale: 1.0,
            reference_circles: true,
            construction_lines: false,
        }
    }
}

impl ProfileStyle {
    pub(crate) fn outline(&self, color: Color) -> Style {
        Style::new(color).with_thickness(Thickness::Pixels(self.stroke_scale))
    }

    pub(crate) fn reference(&self, color: Color) -> Style {
        Style::new(color)
            .with_thickness(Thickness::Pixels(self.stroke_scale * REFERENCE_CIRCLE_SCALE))
    }

    /// Dashes scale with the gear so they read the same at any zoom
    pub(crate) fn construction(&self, color: Color, circular_pitch: Length) -> Style {
        Style::new(color)
            .with_thickness(Thickness::Pixels(self.stroke_scale * CONSTRUCTION_LINE_SCALE))
            .with_dash(vec![circular_pitch * CONSTRUCTION_DASH], Length::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rays_are_dashed_by_pitch() {
        let style = ProfileStyle::default().construction(Color::BLACK, Length(2.0));
        assert_eq!(style.dash_pattern, vec![Length(0.125)]);
        assert_eq!(style.dash_offset, Length::ZERO);
        assert_eq!(style.thickness, Thickness::Pixels(1.0 / 3.0));
    }

    #[test]
    fn outlines_are_solid() {
        let style = ProfileStyle::default().outline(Color::BLACK);
        assert!(style.dash_pattern.is_empty());
    }
}
