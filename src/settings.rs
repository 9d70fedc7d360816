//! Operator panel values
//!
//! Tweaked live from the panel in the page. Defaults are hard-coded and the
//! values are not persisted between sessions.

use serde::{Deserialize, Serialize};

/// Follow camera speed range and slider step
pub const FOLLOW_SPEED_RANGE: (f32, f32) = (0.1, 10.0);
pub const FOLLOW_SPEED_STEP: f32 = 0.1;

/// Roll force range and slider step
pub const RUN_SPEED_RANGE: (f32, f32) = (0.05, 2.0);
pub const RUN_SPEED_STEP: f32 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Camera follows the ball instead of looking down from overhead
    pub follow_camera: bool,
    /// How quickly the follow camera closes in on its goal (1/s)
    pub follow_speed: f32,
    /// Roll impulse per unit of ball size
    pub run_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            follow_camera: false,
            follow_speed: 1.0,
            run_speed: 0.05,
        }
    }
}

impl Settings {
    pub fn set_follow_speed(&mut self, value: f32) {
        self.follow_speed = snap(value, FOLLOW_SPEED_RANGE, FOLLOW_SPEED_STEP);
    }

    pub fn set_run_speed(&mut self, value: f32) {
        self.run_speed = snap(value, RUN_SPEED_RANGE, RUN_SPEED_STEP);
    }
}

/// Clamp to `range` and round to the nearest slider step from its minimum.
/// NaN falls back to the minimum.
fn snap(value: f32, range: (f32, f32), step: f32) -> f32 {
    let (min, max) = range;
    if value.is_nan() {
        return min;
    }
    let steps = ((value.clamp(min, max) - min) / step).round();
    (min + steps * step).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_panel() {
        let settings = Settings::default();
        assert!(!settings.follow_camera);
        assert_eq!(settings.follow_speed, 1.0);
        assert_eq!(settings.run_speed, 0.05);
    }

    #[test]
    fn test_follow_speed_is_clamped() {
        let mut settings = Settings::default();
        settings.set_follow_speed(50.0);
        assert_eq!(settings.follow_speed, 10.0);
        settings.set_follow_speed(0.0);
        assert!((settings.follow_speed - 0.1).abs() < 1e-6);
        settings.set_follow_speed(f32::NAN);
        assert!((settings.follow_speed - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_run_speed_snaps_to_step() {
        let mut settings = Settings::default();
        settings.set_run_speed(0.33);
        assert!((settings.run_speed - 0.35).abs() < 1e-5);
        settings.set_run_speed(3.0);
        assert_eq!(settings.run_speed, 2.0);
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = Settings {
            follow_camera: true,
            follow_speed: 2.5,
            run_speed: 0.4,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
