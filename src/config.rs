//! Emulation configuration
//!
//! Caller-facing knobs with per-call defaulting: absent ranges fall back to
//! fixed defaults, supplied ones are never overridden.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive delay range in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Sample a delay in milliseconds
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        rng.gen_range(self.min..=self.max)
    }

    fn normalized(self) -> Self {
        if self.min > self.max {
            Self {
                min: self.max,
                max: self.min,
            }
        } else {
            self
        }
    }
}

/// Inclusive pointer speed range in distance-units per 100 ms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Sample a speed in distance-units per 100 ms
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }

    /// Swap an inverted range and floor both bounds at 1.0 — a zero speed
    /// would stall the motion driver on an unbounded step delay.
    fn normalized(self) -> Self {
        let (min, max) = if self.min > self.max {
            (self.max, self.min)
        } else {
            (self.min, self.max)
        };
        Self {
            min: min.max(MIN_SPEED),
            max: max.max(MIN_SPEED),
        }
    }
}

const MIN_SPEED: f64 = 1.0;

pub const DEFAULT_MOUSE_SPEED: SpeedRange = SpeedRange::new(100.0, 300.0);
pub const DEFAULT_TYPING_DELAY: DelayRange = DelayRange::new(50, 150);
pub const DEFAULT_SCROLL_DELAY: DelayRange = DelayRange::new(50, 100);
pub const DEFAULT_MOVE_STEPS: u32 = 25;

/// Emulation configuration as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmulationConfig {
    /// Enable emulation; when false the actor is passed through untouched
    pub enabled: bool,
    /// Pointer speed range in distance-units per 100 ms (default 100-300)
    pub mouse_speed: Option<SpeedRange>,
    /// Per-character typing delay in ms (default 50-150)
    pub typing_delay: Option<DelayRange>,
    /// Delay between scroll chunks in ms (default 50-100)
    pub scroll_delay: Option<DelayRange>,
    /// Number of movement steps per planned path (default 25)
    pub move_steps: Option<u32>,
}

impl EmulationConfig {
    /// Set enabled state
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set pointer speed range
    pub fn mouse_speed(mut self, range: SpeedRange) -> Self {
        self.mouse_speed = Some(range);
        self
    }

    /// Set per-character typing delay range
    pub fn typing_delay(mut self, range: DelayRange) -> Self {
        self.typing_delay = Some(range);
        self
    }

    /// Set inter-chunk scroll delay range
    pub fn scroll_delay(mut self, range: DelayRange) -> Self {
        self.scroll_delay = Some(range);
        self
    }

    /// Set movement step count
    pub fn move_steps(mut self, steps: u32) -> Self {
        self.move_steps = Some(steps);
        self
    }

    /// Merge with defaults into a fully-specified configuration. Defaults
    /// fill only missing fields; supplied ranges survive, normalized so
    /// `min <= max` always holds downstream.
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            mouse_speed: self.mouse_speed.unwrap_or(DEFAULT_MOUSE_SPEED).normalized(),
            typing_delay: self
                .typing_delay
                .unwrap_or(DEFAULT_TYPING_DELAY)
                .normalized(),
            scroll_delay: self
                .scroll_delay
                .unwrap_or(DEFAULT_SCROLL_DELAY)
                .normalized(),
            move_steps: self.move_steps.unwrap_or(DEFAULT_MOVE_STEPS).max(1),
        }
    }
}

/// Fully-defaulted configuration consumed by the motion driver and the
/// interaction primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    pub mouse_speed: SpeedRange,
    pub typing_delay: DelayRange,
    pub scroll_delay: DelayRange,
    pub move_steps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn resolve_fills_defaults() {
        let resolved = EmulationConfig::default().resolve();
        assert_eq!(resolved.mouse_speed, DEFAULT_MOUSE_SPEED);
        assert_eq!(resolved.typing_delay, DEFAULT_TYPING_DELAY);
        assert_eq!(resolved.scroll_delay, DEFAULT_SCROLL_DELAY);
        assert_eq!(resolved.move_steps, DEFAULT_MOVE_STEPS);
    }

    #[test]
    fn resolve_keeps_supplied_fields() {
        let config = EmulationConfig::default()
            .typing_delay(DelayRange::new(10, 20))
            .move_steps(40);
        let resolved = config.resolve();

        assert_eq!(resolved.typing_delay, DelayRange::new(10, 20));
        assert_eq!(resolved.move_steps, 40);
        // Untouched fields still default
        assert_eq!(resolved.mouse_speed, DEFAULT_MOUSE_SPEED);
        assert_eq!(resolved.scroll_delay, DEFAULT_SCROLL_DELAY);
    }

    #[test]
    fn resolve_normalizes_inverted_ranges() {
        let config = EmulationConfig::default()
            .typing_delay(DelayRange::new(200, 100))
            .mouse_speed(SpeedRange::new(300.0, 100.0))
            .move_steps(0);
        let resolved = config.resolve();

        assert_eq!(resolved.typing_delay, DelayRange::new(100, 200));
        assert_eq!(resolved.mouse_speed, SpeedRange::new(100.0, 300.0));
        assert_eq!(resolved.move_steps, 1);
    }

    #[test]
    fn resolve_floors_zero_speed() {
        let config = EmulationConfig::default().mouse_speed(SpeedRange::new(0.0, 0.0));
        let resolved = config.resolve();
        assert!(resolved.mouse_speed.min >= 1.0);
        assert!(resolved.mouse_speed.max >= 1.0);
    }

    #[test]
    fn delay_sample_stays_in_range() {
        let range = DelayRange::new(50, 150);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let delay = range.sample(&mut rng);
            assert!((50..=150).contains(&delay));
        }
    }

    #[test]
    fn config_deserializes_camel_case_with_defaults() {
        let config: EmulationConfig =
            serde_json::from_str(r#"{"enabled":true,"mouseSpeed":{"min":50.0,"max":80.0}}"#)
                .unwrap();

        assert!(config.enabled);
        assert_eq!(config.mouse_speed, Some(SpeedRange::new(50.0, 80.0)));
        assert_eq!(config.typing_delay, None);
        assert_eq!(config.scroll_delay, None);
        assert_eq!(config.move_steps, None);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = EmulationConfig::default()
            .enabled(true)
            .typing_delay(DelayRange::new(30, 90));
        let json = serde_json::to_string(&config).unwrap();
        let back: EmulationConfig = serde_json::from_str(&json).unwrap();

        assert!(back.enabled);
        assert_eq!(back.typing_delay, Some(DelayRange::new(30, 90)));
    }
}
