//! Render pipeline: gear parameters in, PNG out
//!
//! The gear is first drawn onto a [`Recorder`]; the recording's bounds pick the
//! view when auto-fitting, then the recording is replayed onto the raster
//! canvas over the background and axes.

pub mod defaults;

use camino::Utf8Path;
use glam::DVec2;

use crate::draw::{RasterCanvas, Recorder, Recording, Viewport, draw_axes};
use crate::errors::Error;
use crate::gear::{GearParameters, GearProfile, ProfileStyle};
use crate::log::debug;
use crate::types::{Color, Length};

/// Which part of the plane ends up in the image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    /// Everything drawn, scaled by `margin` (1.0 is edge to edge)
    Fit { margin: f64 },
    /// A square window of half-size `radius` around `center`, stretched to the
    /// image if it is not square
    Window { center: DVec2, radius: Length },
}

impl Default for View {
    fn default() -> Self {
        View::Fit {
            margin: defaults::FIT_MARGIN,
        }
    }
}

/// Everything about the image that is not gear geometry
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub view: View,
    pub background: Color,
    pub axes: bool,
    /// Tick spacing on the axes, `None` for bare axes
    pub axis_increment: Option<Length>,
    pub profile: ProfileStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            view: View::default(),
            background: defaults::BACKGROUND,
            axes: true,
            axis_increment: Some(defaults::AXIS_INCREMENT),
            profile: ProfileStyle::default(),
        }
    }
}

/// Draw a gear onto a fresh recording
pub fn record(gear: &GearProfile, style: &ProfileStyle) -> Recording {
    let mut recorder = Recorder::new();
    gear.draw(&mut recorder, style);
    recorder.finish()
}

/// Rasterize an already validated gear
pub fn render_profile(gear: &GearProfile, options: &RenderOptions) -> Result<RasterCanvas, Error> {
    let recording = record(gear, &options.profile);

    let viewport = match options.view {
        View::Fit { margin } => {
            let mut content = recording.bounds();
            content.union(&gear.bounds());
            Viewport::fit(&content, options.width, options.height, margin)?
        }
        View::Window { center, radius } => {
            Viewport::centered(center, radius, options.width, options.height)?
        }
    };
    debug!(
        xmin = viewport.bounds().min.x,
        ymin = viewport.bounds().min.y,
        xmax = viewport.bounds().max.x,
        ymax = viewport.bounds().max.y,
        "viewport"
    );

    let mut canvas = RasterCanvas::new(viewport)?;
    canvas.fill(options.background);
    if options.axes {
        draw_axes(&mut canvas, &viewport.bounds(), options.axis_increment);
    }
    recording.replay(&mut canvas);
    Ok(canvas)
}

/// Validate `params` and rasterize the gear
pub fn render(params: &GearParameters, options: &RenderOptions) -> Result<RasterCanvas, Error> {
    let gear = GearProfile::new(params)?;
    render_profile(&gear, options)
}

/// Render to PNG bytes
pub fn render_png(params: &GearParameters, options: &RenderOptions) -> Result<Vec<u8>, Error> {
    Ok(render(params, options)?.encode_png()?)
}

/// Render and write a PNG file
pub fn render_to_file(
    params: &GearParameters,
    options: &RenderOptions,
    path: impl AsRef<Utf8Path>,
) -> Result<(), Error> {
    render(params, options)?.save_png(path.as_ref())?;
    Ok(())
}
