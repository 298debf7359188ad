use log::{debug, info};

use crate::config::SimContext;

use super::{TickStats, WorldCore};

/// Upper bound on ticks run by a single `advance`, so a stalled host does
/// not spiral trying to catch up
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Runs `WorldCore::tick` at the configured logical rate, independent of how
/// often the host calls in.
#[derive(Clone, Debug, Default)]
pub struct FixedStepDriver {
    accumulator: f32,
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `elapsed` seconds of wall time. Returns the number of ticks run.
    /// Paused worlds run none and accumulate nothing.
    pub fn advance(&mut self, world: &mut WorldCore, ctx: &mut SimContext, elapsed: f32) -> u32 {
        if !ctx.config.running || !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }

        let step = ctx.config.tick_duration();
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= step && ticks < MAX_CATCH_UP_TICKS {
            world.tick(ctx);
            self.accumulator -= step;
            ticks += 1;
        }
        if self.accumulator >= step {
            debug!("dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Pause, then run exactly one tick
    pub fn step_once(&mut self, world: &mut WorldCore, ctx: &mut SimContext) -> TickStats {
        ctx.config.running = false;
        self.accumulator = 0.0;
        world.tick(ctx)
    }

    /// Flip the running flag, returning the new state
    pub fn toggle_running(&mut self, ctx: &mut SimContext) -> bool {
        ctx.config.running = !ctx.config.running;
        self.accumulator = 0.0;
        info!("simulation {}", if ctx.config.running { "resumed" } else { "paused" });
        ctx.config.running
    }
}
