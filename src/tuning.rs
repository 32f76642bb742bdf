//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak lives in
//! [`Tuning`]. Missing JSON fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning data
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Round ===
    /// Round length in seconds
    pub round_seconds: f32,
    /// Points for dropping an item on its matching target
    pub match_points: i64,
    /// Points lost for dropping an item on the wrong target
    pub mismatch_penalty: i64,

    // === Spawning ===
    /// Jittered spawn interval bounds (wall-clock milliseconds)
    pub spawn_min_ms: f64,
    pub spawn_max_ms: f64,
    /// Chance that a spawn produces a second item
    pub double_spawn_chance: f64,
    /// Minimum spacing behind the leftmost item on the belt
    pub min_spawn_gap: f32,
    /// Spacing as a multiple of the new item's width (whichever is larger wins)
    pub spawn_gap_factor: f32,
    /// How far outside the play field an item may drift before it is removed
    pub despawn_margin: f32,

    // === Input ===
    /// Analog vectors shorter than this fall back to digital input
    pub analog_deadzone: f32,

    // === Lifter spring ===
    pub spring_stiffness: f32,
    pub spring_damping: f32,

    // === Gripper ===
    /// Maximum sway of the tube/head (radians)
    pub max_sway: f32,
    /// Fraction of the remaining distance the anchor covers each step
    pub anchor_follow: f32,
    /// Floor for the grab reach (pixels)
    pub min_reach: f32,
    /// Reach as a multiple of the lifter's smaller dimension
    pub reach_factor: f32,
    pub reach_factor_fullscreen: f32,
    /// Gap between the suction pad and a held item's top edge
    pub grip_gap: f32,
    /// Sideways offset of a held item in gripper coordinates
    pub side_nudge: f32,

    // === Falling ===
    /// Gravity floor (px/s²)
    pub gravity_min: f32,
    /// Gravity as a multiple of canvas height (px/s²)
    pub gravity_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_seconds: 60.0,
            match_points: 100,
            mismatch_penalty: 50,

            spawn_min_ms: 700.0,
            spawn_max_ms: 1400.0,
            double_spawn_chance: 0.35,
            min_spawn_gap: 60.0,
            spawn_gap_factor: 1.5,
            despawn_margin: 40.0,

            analog_deadzone: 0.1,

            spring_stiffness: 12.0,
            spring_damping: 7.0,

            max_sway: 0.18,
            anchor_follow: 0.12,
            min_reach: 24.0,
            reach_factor: 1.2,
            reach_factor_fullscreen: 1.6,
            grip_gap: 4.0,
            side_nudge: 0.0,

            gravity_min: 900.0,
            gravity_scale: 2.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.round_seconds > 0.0) {
            return Err(invalid("round_seconds", "must be positive"));
        }
        if !(self.spawn_min_ms > 0.0) || self.spawn_max_ms < self.spawn_min_ms {
            return Err(invalid(
                "spawn_min_ms",
                format!(
                    "need 0 < min <= max, got {}..{}",
                    self.spawn_min_ms, self.spawn_max_ms
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.double_spawn_chance) {
            return Err(invalid("double_spawn_chance", "must be within 0..=1"));
        }
        if !(0.0..1.0).contains(&self.analog_deadzone) {
            return Err(invalid("analog_deadzone", "must be within 0..1"));
        }
        if !(self.spring_stiffness > 0.0) || self.spring_damping < 0.0 {
            return Err(invalid(
                "spring_stiffness",
                "stiffness must be positive and damping non-negative",
            ));
        }
        if !(self.anchor_follow > 0.0 && self.anchor_follow <= 1.0) {
            return Err(invalid("anchor_follow", "must be within (0, 1]"));
        }
        if self.max_sway < 0.0 {
            return Err(invalid("max_sway", "must not be negative"));
        }
        if !(self.gravity_min > 0.0) {
            return Err(invalid("gravity_min", "must be positive"));
        }
        let non_negative = [
            ("gravity_scale", self.gravity_scale),
            ("min_reach", self.min_reach),
            ("reach_factor", self.reach_factor),
            ("reach_factor_fullscreen", self.reach_factor_fullscreen),
            ("despawn_margin", self.despawn_margin),
            ("min_spawn_gap", self.min_spawn_gap),
            ("spawn_gap_factor", self.spawn_gap_factor),
            ("grip_gap", self.grip_gap),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must be finite and >= 0, got {}", value)));
            }
        }
        if !self.side_nudge.is_finite() {
            return Err(invalid("side_nudge", "must be finite"));
        }
        // A negative penalty would reward wrong drops
        if self.mismatch_penalty < 0 {
            return Err(invalid("mismatch_penalty", "must not be negative"));
        }
        Ok(())
    }

    /// Reach multiplier for the current display mode
    pub fn reach_factor_for(&self, fullscreen: bool) -> f32 {
        if fullscreen {
            self.reach_factor_fullscreen
        } else {
            self.reach_factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "round_seconds": 90.0 }"#).unwrap();
        assert_eq!(tuning.round_seconds, 90.0);
        assert_eq!(tuning.match_points, 100);
        assert_eq!(tuning.spawn_max_ms, 1400.0);
    }

    #[test]
    fn test_rejects_inverted_spawn_range() {
        let err = Tuning::from_json(r#"{ "spawn_min_ms": 900.0, "spawn_max_ms": 100.0 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_min_ms", .. }));
    }

    #[test]
    fn test_rejects_negative_distances_and_factors() {
        for field in [
            "gravity_scale",
            "min_reach",
            "reach_factor",
            "reach_factor_fullscreen",
            "despawn_margin",
            "min_spawn_gap",
            "spawn_gap_factor",
            "grip_gap",
        ] {
            let json = format!(r#"{{ "{}": -1.0 }}"#, field);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(
                matches!(err, TuningError::Invalid { field: f, .. } if f == field),
                "{} accepted a negative value",
                field
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let tuning = Tuning {
            grip_gap: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "grip_gap", .. })
        ));
        let tuning = Tuning {
            side_nudge: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_mismatch_penalty() {
        let err = Tuning::from_json(r#"{ "mismatch_penalty": -50 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "mismatch_penalty", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ round_seconds: }"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_fullscreen_reach_is_larger() {
        let tuning = Tuning::default();
        assert!(tuning.reach_factor_for(true) > tuning.reach_factor_for(false));
    }
}
