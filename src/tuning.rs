//! Data-driven game balance
//!
//! Loaded from JSON; every field falls back to its default when missing.

use serde::{Deserialize, Serialize};

/// Balance knobs for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Round length in whole seconds
    pub round_duration_secs: u32,

    // === Spawning ===
    /// Spawn interval at round start (ms)
    pub spawn_interval_ms: f64,
    /// Floor for the accelerated spawn interval (ms)
    pub min_spawn_interval_ms: f64,
    /// Fraction of the base interval removed at full round progress
    pub spawn_acceleration: f64,
    /// Chance that a spawned disc is a trap
    pub trap_chance: f64,

    // === Difficulty ramp ===
    /// Fraction of the base radius lost at full round progress
    pub radius_shrink: f32,
    /// Extra speed multiplier gained at full round progress
    pub speed_ramp: f32,

    // === Bonus ===
    /// Delay from round start to the first bonus (seconds)
    pub bonus_delay_secs: u32,
    /// Length of each bonus window (seconds)
    pub bonus_window_secs: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_duration_secs: 60,

            spawn_interval_ms: 1000.0,
            min_spawn_interval_ms: 200.0,
            spawn_acceleration: 0.7,
            trap_chance: 0.1,

            radius_shrink: 0.5,
            speed_ramp: 1.5,

            bonus_delay_secs: 15,
            bonus_window_secs: 15,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, clamping out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Parse tuning from JSON, falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning: {:?}", tuning);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp every knob into a range the simulation can run with
    pub fn sanitized(mut self) -> Self {
        self.round_duration_secs = self.round_duration_secs.max(1);
        self.min_spawn_interval_ms = self.min_spawn_interval_ms.max(1.0);
        self.spawn_interval_ms = self.spawn_interval_ms.max(self.min_spawn_interval_ms);
        self.spawn_acceleration = self.spawn_acceleration.clamp(0.0, 1.0);
        self.trap_chance = self.trap_chance.clamp(0.0, 1.0);
        self.radius_shrink = self.radius_shrink.clamp(0.0, 0.9);
        self.speed_ramp = self.speed_ramp.max(0.0);
        self.bonus_window_secs = self.bonus_window_secs.max(1);
        self
    }

    /// Load tuning from the file named by `DISC_RUSH_TUNING` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("DISC_RUSH_TUNING") else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load tuning from a `<script id="tuning">` JSON element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tuning"))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.round_duration_secs, 60);
        assert_eq!(t.spawn_interval_ms, 1000.0);
        assert_eq!(t.min_spawn_interval_ms, 200.0);
        assert_eq!(t.bonus_delay_secs, 15);
        assert_eq!(t.bonus_window_secs, 15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "round_duration_secs": 30 }"#).unwrap();
        assert_eq!(t.round_duration_secs, 30);
        assert_eq!(t.spawn_interval_ms, 1000.0);
        assert!((t.trap_chance - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let t = Tuning::from_json(
            r#"{ "round_duration_secs": 0, "trap_chance": 3.0, "spawn_interval_ms": 50.0 }"#,
        )
        .unwrap();
        assert_eq!(t.round_duration_secs, 1);
        assert_eq!(t.trap_chance, 1.0);
        assert_eq!(t.spawn_interval_ms, t.min_spawn_interval_ms);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert!(Tuning::from_json("not json").is_err());
        assert_eq!(Tuning::from_json_or_default("{"), Tuning::default());
    }
}
