//! Gear profile generator
//!
//! - `params`: the four input parameters and the radii derived from them
//! - `profile`: the solved tooth, its outline segments and the drawing loop
//! - `style`: palette and stroke widths, with no effect on geometry

pub mod params;
pub mod profile;
pub mod style;

pub use params::{DerivedRadii, GearParameters, RootJoin};
pub use profile::{GearProfile, SegmentKind, Shape, ToothFrame, ToothProfile, ToothSegment};
pub use style::{Palette, ProfileStyle};
