//! Strongly-typed numeric primitives for gear geometry (zero-cost newtypes).
//!
//! Lengths and angles never travel as bare `f64` through the geometry code:
//! - `Length` is a distance in user units (whatever unit the circular pitch uses)
//! - `Angle` is always stored in radians; degrees only exist at the edges
//! - `PolarPoint` pairs the two and converts to Cartesian `glam::DVec2`

use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

// ============================================================================
// Length
// ============================================================================

/// A distance in user units
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let val = check_finite(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let val = check_finite(val)?;
        if val == 0.0 {
            Err(NumericError::Zero)
        } else if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Length(val))
        }
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Ratio of two lengths, `None` if the divisor is zero
    #[inline]
    pub fn checked_div(self, rhs: Length) -> Option<f64> {
        if rhs.0 == 0.0 {
            None
        } else {
            Some(self.0 / rhs.0)
        }
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

// NOTE: Length / Length is intentionally NOT implemented as a trait.
// Use Length::checked_div() so a zero base radius cannot leak an infinity.

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Angle
// ============================================================================

/// A planar angle, stored in radians
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const FULL_TURN: Angle = Angle(TAU);

    #[inline]
    pub const fn from_radians(radians: f64) -> Angle {
        Angle(radians)
    }

    #[inline]
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle(degrees.to_radians())
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// Unit vector pointing along this angle
    #[inline]
    pub fn unit(self) -> DVec2 {
        let (sin, cos) = self.0.sin_cos();
        dvec2(cos, sin)
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}rad", self.0)
    }
}

// ============================================================================
// PolarPoint
// ============================================================================

/// A planar point in polar form
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PolarPoint {
    pub radius: Length,
    pub angle: Angle,
}

impl PolarPoint {
    pub fn new(radius: Length, angle: Angle) -> Self {
        Self { radius, angle }
    }

    pub fn to_cartesian(self) -> DVec2 {
        self.angle.unit() * self.radius.0
    }

    /// Reflect through the line at `mirror` radians: the angle becomes
    /// `2 * mirror - angle`, the radius is unchanged.
    pub fn reflect(self, mirror: Angle) -> Self {
        Self {
            radius: self.radius,
            angle: mirror * 2.0 - self.angle,
        }
    }

    pub fn rotated(self, by: Angle) -> Self {
        Self {
            radius: self.radius,
            angle: self.angle + by,
        }
    }
}

impl From<PolarPoint> for DVec2 {
    fn from(p: PolarPoint) -> DVec2 {
        p.to_cartesian()
    }
}

// ============================================================================
// Color
// ============================================================================

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{0}`: expected #rrggbb, #rrggbbaa or a color name")]
pub struct ParseColorError(pub String);

/// RGBA color with channels in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels quantized to 8 bits
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Color::from_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }
        let named = match trimmed.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::RED,
            "green" => Color::rgb(0.0, 0.5, 0.0),
            "blue" => Color::rgb(0.0, 0.0, 1.0),
            "orange" => Color::rgb(1.0, 0.5, 0.2),
            "purple" => Color::rgb(0.6, 0.3, 0.7),
            "steelblue" => Color::rgb(0.2, 0.5, 0.7),
            "gray" | "grey" => Color::rgb(0.5, 0.5, 0.5),
            _ => return Err(ParseColorError(s.to_string())),
        };
        Ok(named)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Axis-aligned bounding box in user space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Square box of half-size `radius` around `center`
    pub fn around(center: DVec2, radius: Length) -> Self {
        BBox {
            min: center - DVec2::splat(radius.0),
            max: center + DVec2::splat(radius.0),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn expand_circle(&mut self, center: DVec2, radius: Length) {
        self.expand_point(center - DVec2::splat(radius.0));
        self.expand_point(center + DVec2::splat(radius.0));
    }

    pub fn union(&mut self, other: &BBox) {
        if !other.is_empty() {
            self.expand_point(other.min);
            self.expand_point(other.max);
        }
    }

    pub fn width(&self) -> Length {
        Length(self.max.x - self.min.x)
    }

    pub fn height(&self) -> Length {
        Length(self.max.y - self.min.y)
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    // ==================== Length tests ====================

    #[test]
    fn length_try_positive() {
        assert_eq!(Length::try_positive(2.0), Ok(Length(2.0)));
        assert_eq!(Length::try_positive(0.0), Err(NumericError::Zero));
        assert_eq!(Length::try_positive(-1.0), Err(NumericError::Negative));
    }

    #[test]
    fn length_try_non_negative_accepts_zero() {
        assert_eq!(Length::try_non_negative(0.0), Ok(Length::ZERO));
        assert_eq!(Length::try_non_negative(-0.5), Err(NumericError::Negative));
    }

    #[test]
    fn length_arithmetic() {
        let a = Length(3.0);
        let b = Length(2.0);
        assert_eq!(a + b, Length(5.0));
        assert_eq!(a - b, Length(1.0));
        assert_eq!(a * 2.0, Length(6.0));
        assert_eq!(a / 2.0, Length(1.5));
        assert_eq!(-a, Length(-3.0));
    }

    #[test]
    fn length_checked_div_by_zero() {
        assert_eq!(Length(6.0).checked_div(Length(2.0)), Some(3.0));
        assert_eq!(Length(6.0).checked_div(Length::ZERO), None);
    }

    // ==================== Angle tests ====================

    #[test]
    fn angle_degree_conversion() {
        let a = Angle::from_degrees(180.0);
        assert!((a.radians() - PI).abs() < 1e-12);
    }

    // ==================== PolarPoint tests ====================

    #[test]
    fn polar_to_cartesian() {
        let p = PolarPoint::new(Length(2.0), Angle::from_radians(FRAC_PI_2));
        let c = p.to_cartesian();
        assert!(c.x.abs() < 1e-12);
        assert!((c.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn polar_reflect_keeps_radius() {
        let p = PolarPoint::new(Length(1.0), Angle::from_radians(0.1));
        let r = p.reflect(Angle::from_radians(0.3));
        assert_eq!(r.radius, Length(1.0));
        assert!((r.angle.radians() - 0.5).abs() < 1e-12);
    }

    // ==================== Color tests ====================

    #[test]
    fn color_parses_hex() {
        let c: Color = "#ff8033".parse().unwrap();
        assert_eq!(c.to_rgba8(), [255, 128, 51, 255]);
        let c: Color = "#00000080".parse().unwrap();
        assert_eq!(c.to_rgba8()[3], 128);
    }

    #[test]
    fn color_parses_names() {
        assert_eq!("Red".parse::<Color>(), Ok(Color::RED));
        assert!("chartreuse-ish".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn color_display_round_trips() {
        let c = Color::rgb(1.0, 0.0, 0.0);
        assert_eq!(c.to_string(), "#ff0000");
        assert_eq!(c.to_string().parse::<Color>(), Ok(c));
    }

    // ==================== BBox tests ====================

    #[test]
    fn bbox_new_is_empty() {
        assert!(BBox::new().is_empty());
    }

    #[test]
    fn bbox_expand_circle() {
        let mut bb = BBox::new();
        bb.expand_circle(dvec2(1.0, 1.0), Length(2.0));
        assert_eq!(bb.min, dvec2(-1.0, -1.0));
        assert_eq!(bb.max, dvec2(3.0, 3.0));
        assert_eq!(bb.width(), Length(4.0));
        assert_eq!(bb.center(), dvec2(1.0, 1.0));
    }

    #[test]
    fn bbox_union_ignores_empty() {
        let mut bb = BBox::around(DVec2::ZERO, Length(1.0));
        bb.union(&BBox::new());
        assert_eq!(bb, BBox::around(DVec2::ZERO, Length(1.0)));
    }
}
