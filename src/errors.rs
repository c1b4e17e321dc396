//! Error types with diagnostics using miette
//!
//! Configuration errors are raised before anything is drawn; render errors
//! come from the raster backend and the filesystem.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Gear parameters that cannot produce a gear
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("a gear needs at least 3 teeth, got {teeth}")]
    #[diagnostic(code(involute::config::too_few_teeth))]
    TooFewTeeth { teeth: u32 },

    #[error("circular pitch must be a positive length: {source}")]
    #[diagnostic(
        code(involute::config::circular_pitch),
        help("circular pitch is the pitch-circle arc length per tooth")
    )]
    CircularPitch {
        value: f64,
        #[source]
        source: NumericError,
    },

    #[error("pressure angle must lie strictly between 0° and 90°, got {degrees}°")]
    #[diagnostic(
        code(involute::config::pressure_angle),
        help("common pressure angles are 14.5°, 20° and 25°")
    )]
    PressureAngle { degrees: f64 },

    #[error("clearance must be a non-negative length: {source}")]
    #[diagnostic(code(involute::config::clearance))]
    Clearance {
        value: f64,
        #[source]
        source: NumericError,
    },

    #[error(
        "outside radius {outside_radius} does not clear the base circle (radius {base_radius})"
    )]
    #[diagnostic(
        code(involute::config::tip_inside_base_circle),
        help("reduce the clearance or the pressure angle")
    )]
    TipInsideBaseCircle {
        outside_radius: f64,
        base_radius: f64,
    },

    #[error(
        "outside radius {outside_radius} does not clear the pitch circle (radius {pitch_radius})"
    )]
    #[diagnostic(
        code(involute::config::tip_inside_pitch_circle),
        help("clearance must stay below circular_pitch / π")
    )]
    TipInsidePitchCircle {
        outside_radius: f64,
        pitch_radius: f64,
    },
}

// ============================================================================
// Involute Errors
// ============================================================================

/// Failures inverting the involute equation
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum InvoluteError {
    #[error("radius {radius} lies inside the base circle (radius {base_radius})")]
    #[diagnostic(code(involute::curve::below_base_circle))]
    BelowBaseCircle { radius: f64, base_radius: f64 },

    #[error("base circle radius must be positive and finite, got {base_radius}")]
    #[diagnostic(code(involute::curve::degenerate_base_circle))]
    DegenerateBaseCircle { base_radius: f64 },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while rasterizing or writing the image
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("invalid canvas size {width}x{height}")]
    #[diagnostic(code(involute::render::canvas_size))]
    CanvasSize { width: u32, height: u32 },

    #[error("invalid view bounds")]
    #[diagnostic(
        code(involute::render::view_bounds),
        help("the view needs a finite, non-empty extent on both axes")
    )]
    ViewBounds,

    #[error("failed to encode PNG: {message}")]
    #[diagnostic(code(involute::render::png_encode))]
    PngEncode { message: String },

    #[error("failed to write {path}")]
    #[diagnostic(code(involute::render::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Any error surfaced by the public entry points
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Involute(#[from] InvoluteError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(d: &dyn Diagnostic) -> String {
        d.code().map(|c| c.to_string()).unwrap_or_default()
    }

    #[test]
    fn config_errors_have_stable_codes() {
        let err = ConfigError::TooFewTeeth { teeth: 2 };
        assert_eq!(code_of(&err), "involute::config::too_few_teeth");
        assert_eq!(err.to_string(), "a gear needs at least 3 teeth, got 2");
    }

    #[test]
    fn top_level_error_is_transparent() {
        let err = Error::from(ConfigError::PressureAngle { degrees: 95.0 });
        assert_eq!(code_of(&err), "involute::config::pressure_angle");
        assert!(err.help().is_some());
    }
}
