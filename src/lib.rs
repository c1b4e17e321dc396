//! Involute spur gear profiles.
//!
//! Four parameters (circular pitch, tooth count, pressure angle and clearance)
//! fully determine a gear. [`GearProfile`] derives its circles, solves the
//! involute flank against them and draws every tooth onto any [`Canvas`].
//! [`render_png`] and [`render_to_file`] wrap that in a raster pipeline.
//!
//! ```no_run
//! use involute::{GearParameters, RenderOptions, render_to_file};
//!
//! let params = GearParameters::new(2.0, 25, 20.0, 0.0);
//! render_to_file(&params, &RenderOptions::default(), "gear.png")?;
//! # Ok::<(), involute::Error>(())
//! ```

pub mod draw;
pub mod errors;
pub mod gear;
pub mod involute;
pub mod log;
pub mod render;
pub mod types;

pub use draw::{Canvas, Saved, Style, Thickness};
pub use errors::{ConfigError, Error, InvoluteError, RenderError};
pub use gear::{DerivedRadii, GearParameters, GearProfile, Palette, ProfileStyle, RootJoin};
pub use crate::involute::{involute, solve_t};
pub use render::{RenderOptions, View, render, render_png, render_to_file};
pub use types::{Angle, Color, Length, PolarPoint};
