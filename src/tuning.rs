//! Data-driven game balance
//!
//! Two presets ship with the game. `classic` grows only the visible mesh and
//! keeps the collider at its spawn radius. `stepped` also grows the collider,
//! in coarse steps, and relaxes the grounded check to match the taller ball.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Preset name (for logging)
    pub name: String,
    /// Upper bound on the ball size
    pub max_size: f32,
    /// Body height below which the ball counts as touching the ground
    pub grounded_height: f32,
    /// Size gained per world unit rolled
    pub growth_rate: f32,
    /// Displacement per tick below which the ball counts as stationary
    pub min_displacement: f32,
    /// Size lead over the collider scale that triggers a collider rebuild
    pub step_threshold: f32,
    /// Falling below this height respawns the ball
    pub reset_floor: f32,
    /// Spawn position of the ball body
    pub spawn: Vec3,
    /// Linear and angular damping of the ball body
    pub damping: f32,
    /// Ground friction coefficient
    pub ground_friction: f32,
    /// Multiply the roll impulse by the tick duration
    pub time_scaled_impulse: bool,
    /// Grow the collider along with the mesh
    pub scale_collider: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

impl Tuning {
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            max_size: 3.0,
            grounded_height: 1.0,
            growth_rate: 0.05,
            min_displacement: 0.01,
            step_threshold: 0.1,
            reset_floor: -20.0,
            spawn: Vec3::new(0.0, 5.0, 0.0),
            damping: 0.8,
            ground_friction: 1.0,
            time_scaled_impulse: false,
            scale_collider: false,
        }
    }

    pub fn stepped() -> Self {
        Self {
            name: "stepped".to_string(),
            max_size: 4.0,
            grounded_height: 5.0,
            scale_collider: true,
            ..Self::classic()
        }
    }

    /// Look up a preset by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "stepped" => Some(Self::stepped()),
            _ => None,
        }
    }

    /// Resolve a `?tuning=` query value: a preset name, or a JSON object whose
    /// fields override the classic preset
    pub fn from_query(value: &str) -> Option<Self> {
        if let Some(preset) = Self::from_name(value) {
            return Some(preset);
        }
        let tuning = match serde_json::from_str::<Self>(value) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning {:?}: {}", value, e);
                return None;
            }
        };
        if let Err(reason) = tuning.validate() {
            log::warn!("Ignoring tuning {:?}: {}", value, reason);
            return None;
        }
        Some(tuning)
    }

    /// Check the values keep the ball growing from size 1 and spawning above
    /// the world floor
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("growth_rate", self.growth_rate),
            ("min_displacement", self.min_displacement),
            ("step_threshold", self.step_threshold),
            ("damping", self.damping),
            ("ground_friction", self.ground_friction),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(format!("{name} must be >= 0, got {value}"));
            }
        }
        if self.max_size.is_nan() || self.max_size < 1.0 {
            return Err(format!("max_size must be >= 1, got {}", self.max_size));
        }
        if !self.spawn.is_finite() || self.spawn.y <= self.reset_floor || self.reset_floor.is_nan() {
            return Err(format!(
                "spawn {:?} must be above reset_floor {}",
                self.spawn, self.reset_floor
            ));
        }
        Ok(())
    }

    /// Whether a body at `height` is close enough to the ground to pick up snow
    #[inline]
    pub fn is_grounded(&self, height: f32) -> bool {
        height < self.grounded_height
    }

    /// Whether a body at `height` has fallen off the world
    #[inline]
    pub fn is_out_of_world(&self, height: f32) -> bool {
        height < self.reset_floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_by_name() {
        assert_eq!(Tuning::from_name("Stepped"), Some(Tuning::stepped()));
        assert_eq!(Tuning::from_name("classic"), Some(Tuning::classic()));
        assert_eq!(Tuning::from_name("huge"), None);
    }

    #[test]
    fn test_stepped_inherits_classic_constants() {
        let classic = Tuning::classic();
        let stepped = Tuning::stepped();
        assert_eq!(stepped.growth_rate, classic.growth_rate);
        assert_eq!(stepped.reset_floor, classic.reset_floor);
        assert_eq!(stepped.spawn, classic.spawn);
        assert!(stepped.scale_collider);
        assert!(!classic.scale_collider);
        assert_eq!(stepped.max_size, 4.0);
        assert_eq!(stepped.grounded_height, 5.0);
    }

    #[test]
    fn test_query_accepts_json_overrides() {
        let tuning = Tuning::from_query(r#"{"max_size": 6.0, "scale_collider": true}"#).unwrap();
        assert_eq!(tuning.max_size, 6.0);
        assert!(tuning.scale_collider);
        assert_eq!(tuning.growth_rate, Tuning::classic().growth_rate);

        assert_eq!(Tuning::from_query("stepped"), Some(Tuning::stepped()));
        assert_eq!(Tuning::from_query("{not json"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(Tuning::classic().validate(), Ok(()));
        assert_eq!(Tuning::stepped().validate(), Ok(()));
    }

    #[test]
    fn test_query_rejects_invalid_overrides() {
        for bad in [
            r#"{"max_size": 0.5}"#,
            r#"{"growth_rate": -0.1}"#,
            r#"{"min_displacement": -1.0}"#,
            r#"{"step_threshold": -0.1}"#,
            r#"{"spawn": [0.0, -30.0, 0.0]}"#,
            r#"{"reset_floor": 10.0}"#,
        ] {
            assert_eq!(Tuning::from_query(bad), None, "{bad} should be rejected");
        }

        // A shrinking cap would otherwise pull the ball below its spawn size
        let mut tuning = Tuning::classic();
        tuning.max_size = 0.5;
        assert!(tuning.validate().is_err());
        tuning.max_size = 1.0;
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(crate::sim::growth::grow(1.0, 0.4, 0.5, &tuning), 1.0);
    }

    #[test]
    fn test_grounded_and_floor_checks() {
        let tuning = Tuning::classic();
        assert!(tuning.is_grounded(0.5));
        assert!(!tuning.is_grounded(1.0));
        assert!(!tuning.is_out_of_world(-20.0));
        assert!(tuning.is_out_of_world(-20.01));
    }
}
