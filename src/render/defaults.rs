//! Default rendering settings

use crate::types::{Color, Length};

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 900;

/// Auto-fit leaves this much room around the outside circle
pub const FIT_MARGIN: f64 = 1.1;

pub const BACKGROUND: Color = Color::WHITE;

/// Axis tick spacing in user units
pub const AXIS_INCREMENT: Length = Length(1.0);
