//! Projectile Profiles
//!
//! Immutable description of how one kind of projectile leaves the shooter:
//! its launch velocity, the gravity it falls under, and how charging
//! (drawing a bow) scales its speed.

use serde::{Serialize, Deserialize};

use crate::core::vec2::Vec2;
use crate::core::vec3::Vec3;
use crate::error::ConfigError;
use super::flight::{launch_offset, flight_time, max_range};

/// How launch speed grows with charge time.
///
/// Every curve saturates at the profile's base speed.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChargeCurve {
    /// Not a charged weapon; always base speed.
    #[default]
    Constant,
    /// Vanilla bow draw: `s² + 2s` scaled so `s = 1` gives base speed,
    /// with `s = ticks / full_charge_ticks`.
    Bow {
        /// Ticks until fully drawn
        full_charge_ticks: u32,
    },
    /// Speed proportional to charge time.
    Linear {
        /// Ticks until fully charged
        full_charge_ticks: u32,
    },
    /// Measured speed per whole tick of charge; base speed past the end.
    Table {
        /// `speeds[n]` is the launch speed after `n` ticks
        speeds: Vec<f64>,
    },
}

impl ChargeCurve {
    /// Speed after `ticks` of charging. `ticks` is already clamped to ≥ 0.
    fn speed(&self, base: f64, ticks: f64) -> f64 {
        match *self {
            ChargeCurve::Constant => base,
            ChargeCurve::Bow { full_charge_ticks } => {
                let full = full_charge_ticks as f64;
                if ticks >= full {
                    return base;
                }
                let s = ticks / full;
                base * (s * s + 2.0 * s) / 3.0
            }
            ChargeCurve::Linear { full_charge_ticks } => {
                let full = full_charge_ticks as f64;
                if ticks >= full {
                    return base;
                }
                base * ticks / full
            }
            ChargeCurve::Table { ref speeds } => {
                speeds.get(ticks.floor() as usize).copied().unwrap_or(base)
            }
        }
    }

    /// Ticks after which the curve is flat.
    pub fn full_charge_ticks(&self) -> u32 {
        match *self {
            ChargeCurve::Constant => 0,
            ChargeCurve::Bow { full_charge_ticks } | ChargeCurve::Linear { full_charge_ticks } => {
                full_charge_ticks
            }
            ChargeCurve::Table { ref speeds } => speeds.len() as u32,
        }
    }
}

/// Motion profile of one projectile kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileProfile {
    /// Launch velocity at full charge (horizontal, vertical), blocks/tick.
    pub base_velocity: Vec2,
    /// Vertical acceleration, blocks/tick². Zero or negative.
    #[serde(default)]
    pub gravity: f64,
    /// Charge behavior.
    #[serde(default)]
    pub charge: ChargeCurve,
}

impl ProjectileProfile {
    /// Uncharged profile with a level launch velocity.
    pub const fn new(speed: f64, gravity: f64) -> Self {
        Self {
            base_velocity: Vec2::horizontal(speed),
            gravity,
            charge: ChargeCurve::Constant,
        }
    }

    /// Same profile with a charge curve.
    pub fn with_charge(mut self, charge: ChargeCurve) -> Self {
        self.charge = charge;
        self
    }

    /// Full-charge speed.
    #[inline]
    pub fn base_speed(&self) -> f64 {
        self.base_velocity.length()
    }

    /// Launch speed after `charge_ticks` of charging.
    ///
    /// `None` means fully charged (or not a charged kind). Negative charge is
    /// treated as zero; the result never exceeds base speed.
    pub fn speed(&self, charge_ticks: Option<f64>) -> f64 {
        let base = self.base_speed();
        match charge_ticks {
            None => base,
            Some(ticks) => {
                let ticks = if ticks.is_nan() { 0.0 } else { ticks.max(0.0) };
                self.charge.speed(base, ticks).max(0.0).min(base)
            }
        }
    }

    /// Pitch of the profile's own neutral attitude.
    ///
    /// Non-zero when the base velocity is not level; aim pitch is corrected
    /// by this amount.
    #[inline]
    pub fn initial_angle(&self) -> f64 {
        self.base_velocity.angle()
    }

    /// Pitch offset needed to land on `destination` (low arc).
    ///
    /// NaN when `destination` is beyond range at this charge.
    pub fn launch_angle(&self, position: Vec3, destination: Vec3, charge_ticks: Option<f64>) -> f64 {
        if self.base_speed() == 0.0 {
            return 0.0;
        }
        launch_offset(self.speed(charge_ticks), self.gravity, position.distance(destination))
    }

    /// Ticks for a low-arc shot to reach `destination`.
    ///
    /// NaN when unreachable.
    pub fn time_of_flight(&self, position: Vec3, destination: Vec3, charge_ticks: Option<f64>) -> f64 {
        let offset = self.launch_angle(position, destination, charge_ticks);
        self.arc_time(position.distance(destination), offset, charge_ticks)
    }

    /// Ticks for a shot with the given launch `offset` to cover `distance`.
    pub(crate) fn arc_time(&self, distance: f64, offset: f64, charge_ticks: Option<f64>) -> f64 {
        if self.base_speed() == 0.0 {
            return 0.0;
        }
        flight_time(self.speed(charge_ticks), self.gravity, offset, distance)
    }

    /// Longest straight-line distance reachable at this charge.
    pub fn max_range(&self, charge_ticks: Option<f64>) -> f64 {
        max_range(self.speed(charge_ticks), self.gravity)
    }

    /// Check the profile invariants.
    pub fn validate(&self, kind: &str) -> Result<(), ConfigError> {
        let speed = self.base_speed();
        if !speed.is_finite() || !self.base_velocity.is_finite() {
            return Err(ConfigError::InvalidSpeed { kind: kind.to_string(), speed });
        }
        if !self.gravity.is_finite() || self.gravity > 0.0 {
            return Err(ConfigError::PositiveGravity { kind: kind.to_string(), gravity: self.gravity });
        }

        let full = self.charge.full_charge_ticks();
        if !matches!(self.charge, ChargeCurve::Constant) && full == 0 {
            return Err(ConfigError::InvalidChargeDuration { kind: kind.to_string() });
        }

        // Walk one tick past saturation so the jump to base speed is checked too.
        let mut previous = self.speed(Some(0.0));
        for tick in 1..=full.saturating_add(1) {
            let current = self.speed(Some(tick as f64));
            if current < previous {
                return Err(ConfigError::NonMonotonicCharge { kind: kind.to_string(), tick });
            }
            previous = current;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bow() -> ProjectileProfile {
        ProjectileProfile::new(3.0, -0.05).with_charge(ChargeCurve::Bow { full_charge_ticks: 20 })
    }

    #[test]
    fn test_bow_curve_matches_draw_formula() {
        let bow = bow();
        for ticks in 0..20 {
            let s = ticks as f64 / 20.0;
            let expected = s * s + 2.0 * s;
            assert!((bow.speed(Some(ticks as f64)) - expected).abs() < 1e-12);
        }
        assert_eq!(bow.speed(Some(20.0)), 3.0);
        assert_eq!(bow.speed(Some(500.0)), 3.0);
        assert_eq!(bow.speed(None), 3.0);
    }

    #[test]
    fn test_negative_charge_is_uncharged() {
        let bow = bow();
        assert_eq!(bow.speed(Some(-5.0)), bow.speed(Some(0.0)));
        assert_eq!(bow.speed(Some(-5.0)), 0.0);
    }

    #[test]
    fn test_linear_curve() {
        let profile = ProjectileProfile::new(2.0, -0.05)
            .with_charge(ChargeCurve::Linear { full_charge_ticks: 10 });
        assert_eq!(profile.speed(Some(5.0)), 1.0);
        assert_eq!(profile.speed(Some(10.0)), 2.0);
    }

    #[test]
    fn test_initial_angle() {
        assert_eq!(bow().initial_angle(), 0.0);
        let tilted = ProjectileProfile {
            base_velocity: Vec2::new(1.0, 1.0),
            gravity: -0.05,
            charge: ChargeCurve::Constant,
        };
        assert!((tilted.initial_angle() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_reference_numbers() {
        let profile = ProjectileProfile::new(3.0, -0.05);
        let from = Vec3::ZERO;
        let to = Vec3::new(10.0, 0.0, 0.0);

        let angle = profile.launch_angle(from, to, None);
        assert!((angle - (0.5f64 / 18.0).asin()).abs() < 1e-12);

        let time = profile.time_of_flight(from, to, None);
        assert!((time - 3.333).abs() < 1e-3);
    }

    #[test]
    fn test_zero_gravity_profile() {
        let firework = ProjectileProfile::new(1.6, 0.0);
        for d in [1.0, 17.0, 400.0] {
            let to = Vec3::new(0.0, 0.0, d);
            assert_eq!(firework.launch_angle(Vec3::ZERO, to, None), 0.0);
            assert_eq!(firework.time_of_flight(Vec3::ZERO, to, None), d / 1.6);
        }
    }

    #[test]
    fn test_no_launch_profile() {
        let dropped = ProjectileProfile::new(0.0, -0.08);
        let to = Vec3::new(5.0, -3.0, 0.0);
        assert_eq!(dropped.launch_angle(Vec3::ZERO, to, None), 0.0);
        assert_eq!(dropped.time_of_flight(Vec3::ZERO, to, None), 0.0);
    }

    #[test]
    fn test_out_of_range_is_nan() {
        let rod = ProjectileProfile::new(0.3, -0.03);
        let far = Vec3::new(rod.max_range(None) + 1.0, 0.0, 0.0);
        assert!(rod.launch_angle(Vec3::ZERO, far, None).is_nan());
        assert!(rod.time_of_flight(Vec3::ZERO, far, None).is_nan());
    }

    /// Unreachable counts as never arriving.
    fn arrival(time: f64) -> f64 {
        if time.is_nan() { f64::INFINITY } else { time }
    }

    #[test]
    fn test_undrawn_bow_cannot_reach() {
        let bow = bow();
        let to = Vec3::new(12.0, 0.0, 0.0);
        assert_eq!(bow.speed(Some(0.0)), 0.0);
        assert!(bow.launch_angle(Vec3::ZERO, to, Some(0.0)).is_nan());
        assert!(bow.time_of_flight(Vec3::ZERO, to, Some(0.0)).is_nan());
        assert_eq!(bow.time_of_flight(Vec3::ZERO, Vec3::ZERO, Some(0.0)), 0.0);
    }

    #[test]
    fn test_charge_shortens_flight() {
        let bow = bow();
        let to = Vec3::new(12.0, 0.0, 0.0);
        let mut previous = f64::INFINITY;
        for ticks in 0..=25 {
            let time = arrival(bow.time_of_flight(Vec3::ZERO, to, Some(ticks as f64)));
            assert!(time <= previous, "tick {}: {} > {}", ticks, time, previous);
            previous = time;
        }
        assert!(previous.is_finite());
    }

    proptest! {
        #[test]
        fn prop_more_charge_is_faster_and_sooner(
            a in 0u32..=25,
            b in 0u32..=25,
            x in -60.0f64..60.0,
            y in -20.0f64..20.0,
        ) {
            let bow = bow();
            let (less, more) = if a <= b { (a as f64, b as f64) } else { (b as f64, a as f64) };
            let to = Vec3::new(x, y, 3.0);

            prop_assert!(bow.speed(Some(less)) <= bow.speed(Some(more)));

            let slow = arrival(bow.time_of_flight(Vec3::ZERO, to, Some(less)));
            let fast = arrival(bow.time_of_flight(Vec3::ZERO, to, Some(more)));
            prop_assert!(fast <= slow * (1.0 + 1e-9), "{} ticks: {}, {} ticks: {}", less, slow, more, fast);
        }
    }

    #[test]
    fn test_validate() {
        assert!(bow().validate("bow").is_ok());

        let rising = ProjectileProfile::new(1.0, 0.05);
        assert!(matches!(rising.validate("x"), Err(ConfigError::PositiveGravity { .. })));

        let bad_speed = ProjectileProfile::new(f64::NAN, -0.05);
        assert!(matches!(bad_speed.validate("x"), Err(ConfigError::InvalidSpeed { .. })));

        let instant = ProjectileProfile::new(1.0, -0.05)
            .with_charge(ChargeCurve::Linear { full_charge_ticks: 0 });
        assert!(matches!(instant.validate("x"), Err(ConfigError::InvalidChargeDuration { .. })));

        let sagging = ProjectileProfile::new(2.0, -0.05)
            .with_charge(ChargeCurve::Table { speeds: vec![0.0, 1.0, 0.5, 2.0] });
        assert!(matches!(
            sagging.validate("x"),
            Err(ConfigError::NonMonotonicCharge { tick: 2, .. })
        ));
    }

    #[test]
    fn test_table_curve_saturates() {
        let profile = ProjectileProfile::new(2.0, -0.05)
            .with_charge(ChargeCurve::Table { speeds: vec![0.0, 0.5, 1.5] });
        assert_eq!(profile.speed(Some(1.7)), 0.5);
        assert_eq!(profile.speed(Some(3.0)), 2.0);
        assert!(profile.validate("table").is_ok());
    }
}
