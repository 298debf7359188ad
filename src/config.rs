//! Simulation configuration and the explicit per-run context
//!
//! `SimConfig` is owned by the host and read by the motion solver every tick;
//! `SimContext` bundles it with the single seeded RNG so nothing in the core
//! depends on process-wide state.

use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::error::ConfigError;

/// The one generator behind every random decision in the core
pub type SimRng = SmallRng;

pub const DEFAULT_SEED: u64 = 12345;
pub const DEFAULT_TICK_RATE: f32 = 60.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityMode {
    /// Constant vector everywhere
    #[default]
    Vector,
    /// Pull toward the grid centre
    Radial,
    Off,
}

impl GravityMode {
    pub fn next(self) -> Self {
        match self {
            GravityMode::Vector => GravityMode::Radial,
            GravityMode::Radial => GravityMode::Off,
            GravityMode::Off => GravityMode::Vector,
        }
    }

    pub fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(GravityMode::Vector),
            1 => Some(GravityMode::Radial),
            2 => Some(GravityMode::Off),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    pub gravity_mode: GravityMode,
    pub gravity: Vec2,
    /// Radial pull is `radial_falloff / distance`...
    pub radial_falloff: f32,
    /// ...capped at this magnitude near the centre
    pub radial_cap: f32,
    pub running: bool,
    /// Logical ticks per second for the fixed-step driver
    pub tick_rate: f32,
    pub seed: u64,
    /// Defaults to one slot per cell
    pub pool_capacity: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity_mode: GravityMode::Vector,
            gravity: Vec2::new(0.0, 0.05),
            radial_falloff: 20.0,
            radial_cap: 0.05,
            running: true,
            tick_rate: DEFAULT_TICK_RATE,
            seed: DEFAULT_SEED,
            pool_capacity: None,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        info!("config loaded: gravity {:?}, {} ticks/s", config.gravity_mode, config.tick_rate);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::Invalid("gravity must be finite".to_string()));
        }
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::Invalid(format!("tickRate must be positive, got {}", self.tick_rate)));
        }
        if !(self.radial_falloff >= 0.0 && self.radial_cap >= 0.0) {
            return Err(ConfigError::Invalid("radial falloff and cap must be non-negative".to_string()));
        }
        if self.pool_capacity == Some(0) {
            return Err(ConfigError::Invalid("poolCapacity must be at least 1".to_string()));
        }
        Ok(())
    }

    #[inline]
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

/// Config + RNG, passed by `&mut` into spawning, ticking and the solver
pub struct SimContext {
    pub config: SimConfig,
    pub rng: SimRng,
}

impl SimContext {
    pub fn new(config: SimConfig) -> Self {
        let rng = SimRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SimRng::seed_from_u64(seed),
        }
    }

    /// Restart the generator, for reproducible replays
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = SimRng::seed_from_u64(seed);
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = SimConfig::from_json(r#"{"gravityMode":"radial","tickRate":30}"#).expect("parses");
        assert_eq!(cfg.gravity_mode, GravityMode::Radial);
        assert_eq!(cfg.tick_rate, 30.0);
        assert_eq!(cfg.gravity, Vec2::new(0.0, 0.05));
        assert!(cfg.running);
    }

    #[test]
    fn invalid_tick_rate_is_rejected() {
        let err = SimConfig::from_json(r#"{"tickRate":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(matches!(SimConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn gravity_mode_cycles() {
        let m = GravityMode::Vector;
        assert_eq!(m.next(), GravityMode::Radial);
        assert_eq!(m.next().next(), GravityMode::Off);
        assert_eq!(m.next().next().next(), GravityMode::Vector);
    }

    #[test]
    fn same_seed_same_stream() {
        use rand::Rng;
        let mut a = SimContext::with_seed(SimConfig::default(), 9);
        let mut b = SimContext::with_seed(SimConfig::default(), 9);
        let xs: Vec<u32> = (0..8).map(|_| a.rng.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn reseed_restarts_the_stream() {
        use rand::Rng;
        let mut ctx = SimContext::with_seed(SimConfig::default(), 1);
        ctx.reseed(9);
        assert_eq!(ctx.config.seed, 9);
        let mut fresh = SimContext::with_seed(SimConfig::default(), 9);
        let xs: Vec<u32> = (0..8).map(|_| ctx.rng.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| fresh.rng.random()).collect();
        assert_eq!(xs, ys);
    }
}
