//! Gear parameters and the radii derived from them

use std::f64::consts::{PI, TAU};

use crate::errors::ConfigError;
use crate::log::debug;
use crate::types::{Angle, Length};

/// The four manufacturing parameters of a spur gear.
///
/// Values are taken as given; [`DerivedRadii::new`] validates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearParameters {
    circular_pitch: f64,
    number_of_teeth: u32,
    pressure_angle_degrees: f64,
    clearance: f64,
}

impl GearParameters {
    /// `circular_pitch` and `clearance` in user units, `pressure_angle` in degrees
    pub const fn new(
        circular_pitch: f64,
        number_of_teeth: u32,
        pressure_angle: f64,
        clearance: f64,
    ) -> Self {
        Self {
            circular_pitch,
            number_of_teeth,
            pressure_angle_degrees: pressure_angle,
            clearance,
        }
    }

    pub fn circular_pitch(&self) -> Length {
        Length(self.circular_pitch)
    }

    pub fn number_of_teeth(&self) -> u32 {
        self.number_of_teeth
    }

    pub fn pressure_angle(&self) -> Angle {
        Angle::from_degrees(self.pressure_angle_degrees)
    }

    pub fn pressure_angle_degrees(&self) -> f64 {
        self.pressure_angle_degrees
    }

    pub fn clearance(&self) -> Length {
        Length(self.clearance)
    }

    /// Angle between corresponding points of adjacent teeth, `2π / teeth`
    pub fn angular_pitch(&self) -> Angle {
        Angle::from_radians(TAU / self.number_of_teeth as f64)
    }

    /// Check the inputs that do not depend on the derived radii
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_teeth < 3 {
            return Err(ConfigError::TooFewTeeth {
                teeth: self.number_of_teeth,
            });
        }
        Length::try_positive(self.circular_pitch).map_err(|source| ConfigError::CircularPitch {
            value: self.circular_pitch,
            source,
        })?;
        let pa = self.pressure_angle_degrees;
        if !(pa.is_finite() && pa > 0.0 && pa < 90.0) {
            return Err(ConfigError::PressureAngle { degrees: pa });
        }
        Length::try_non_negative(self.clearance).map_err(|source| ConfigError::Clearance {
            value: self.clearance,
            source,
        })?;
        Ok(())
    }
}

/// Whether the involute flank reaches the root circle on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootJoin {
    /// `base_radius < root_radius`: the flank starts at `t_root`, on the root circle
    OnRootCircle,
    /// `base_radius >= root_radius`: the flank starts at `t = 0` on the base
    /// circle and a radial segment runs down to the root circle
    RadialFromRoot,
}

/// The four defining circles of the gear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRadii {
    pub pitch: Length,
    pub outside: Length,
    pub base: Length,
    pub root: Length,
}

impl DerivedRadii {
    /// Validate `params` and derive the radii
    pub fn new(params: &GearParameters) -> Result<Self, ConfigError> {
        params.validate()?;

        let pitch_length = params.circular_pitch();
        let clearance = params.clearance();
        let teeth = params.number_of_teeth() as f64;

        // near, but not at, halfway up each tooth
        let pitch = pitch_length * teeth / TAU;
        let outside = pitch + pitch_length / PI - clearance;
        let base = pitch * params.pressure_angle().cos();
        let root = pitch * 2.0 - outside - clearance;

        debug!(
            pitch = pitch.raw(),
            outside = outside.raw(),
            base = base.raw(),
            root = root.raw(),
            "derived gear radii"
        );

        if outside <= base {
            return Err(ConfigError::TipInsideBaseCircle {
                outside_radius: outside.raw(),
                base_radius: base.raw(),
            });
        }
        if outside <= pitch {
            return Err(ConfigError::TipInsidePitchCircle {
                outside_radius: outside.raw(),
                pitch_radius: pitch.raw(),
            });
        }

        Ok(Self {
            pitch,
            outside,
            base,
            root,
        })
    }

    pub fn root_join(&self) -> RootJoin {
        if self.base < self.root {
            RootJoin::OnRootCircle
        } else {
            RootJoin::RadialFromRoot
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    fn close(a: Length, b: f64) -> bool {
        (a.raw() - b).abs() < 1e-9
    }

    #[test]
    fn radii_for_twenty_five_teeth() {
        let r = DerivedRadii::new(&GearParameters::new(2.0, 25, 20.0, 0.0)).unwrap();
        assert!(close(r.pitch, 25.0 / PI));
        assert!(close(r.outside, 27.0 / PI));
        assert!(close(r.base, 25.0 / PI * 20f64.to_radians().cos()));
        assert!(close(r.root, 23.0 / PI));
        assert!(r.base <= r.pitch && r.pitch < r.outside);
    }

    #[test]
    fn root_radius_does_not_depend_on_clearance() {
        let a = DerivedRadii::new(&GearParameters::new(2.0, 25, 20.0, 0.0)).unwrap();
        let b = DerivedRadii::new(&GearParameters::new(2.0, 25, 20.0, 0.2)).unwrap();
        assert!(close(b.outside, a.outside.raw() - 0.2));
        assert!(close(b.root, a.root.raw()));
    }

    #[test]
    fn root_join_follows_radius_comparison() {
        // teeth * (1 - cos φ) > 2 puts the base circle below the root circle
        let on_root = DerivedRadii::new(&GearParameters::new(1.0, 60, 20.0, 0.0)).unwrap();
        assert!(on_root.base < on_root.root);
        assert_eq!(on_root.root_join(), RootJoin::OnRootCircle);

        let radial = DerivedRadii::new(&GearParameters::new(1.0, 12, 14.5, 0.0)).unwrap();
        assert!(radial.base >= radial.root);
        assert_eq!(radial.root_join(), RootJoin::RadialFromRoot);
    }

    #[test]
    fn rejects_too_few_teeth() {
        let err = DerivedRadii::new(&GearParameters::new(1.0, 2, 20.0, 0.0)).unwrap_err();
        assert_eq!(err, ConfigError::TooFewTeeth { teeth: 2 });
    }

    #[test]
    fn rejects_non_positive_pitch() {
        let err = GearParameters::new(0.0, 12, 20.0, 0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CircularPitch {
                source: NumericError::Zero,
                ..
            }
        ));
        let err = GearParameters::new(f64::NAN, 12, 20.0, 0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CircularPitch {
                source: NumericError::NaN,
                ..
            }
        ));
    }

    #[test]
    fn rejects_pressure_angle_out_of_range() {
        for pa in [0.0, -5.0, 90.0, 120.0, f64::INFINITY] {
            let err = GearParameters::new(1.0, 12, pa, 0.0).validate().unwrap_err();
            assert!(matches!(err, ConfigError::PressureAngle { .. }), "{pa}");
        }
    }

    #[test]
    fn rejects_negative_clearance() {
        let err = GearParameters::new(1.0, 12, 20.0, -0.1).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Clearance { .. }));
    }

    #[test]
    fn rejects_clearance_swallowing_the_tooth() {
        // outside radius pushed below the base circle
        let err = DerivedRadii::new(&GearParameters::new(1.0, 12, 20.0, 0.5)).unwrap_err();
        assert!(matches!(err, ConfigError::TipInsideBaseCircle { .. }));
        // between base and pitch circle
        let err = DerivedRadii::new(&GearParameters::new(1.0, 12, 20.0, 0.33)).unwrap_err();
        assert!(matches!(err, ConfigError::TipInsidePitchCircle { .. }));
    }
}
