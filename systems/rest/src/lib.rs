#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure rest system that decides whether the player may end the day.
//!
//! The world advances the day unconditionally. The rule that an exhausted
//! farmer cannot go to bed lives here, above the engine.

use homestead_core::Command;
use tracing::debug;

/// Energy the player must have left to be allowed to sleep.
pub const DEFAULT_MIN_ENERGY: u32 = 20;

/// Configuration parameters for the rest system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    min_energy: u32,
}

impl Config {
    /// Creates a configuration requiring `min_energy` to sleep.
    #[must_use]
    pub const fn new(min_energy: u32) -> Self {
        Self { min_energy }
    }

    /// Energy required to sleep.
    #[must_use]
    pub const fn min_energy(&self) -> u32 {
        self.min_energy
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ENERGY)
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestInput {
    /// Indicates whether the player asked to sleep on this frame.
    pub sleep_requested: bool,
}

/// Rest system that translates sleep requests into day-advance commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rest {
    config: Config,
}

impl Rest {
    /// Creates a new rest system with the provided configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Energy the player needs to be allowed to sleep.
    #[must_use]
    pub const fn min_energy(&self) -> u32 {
        self.config.min_energy
    }

    /// Reports whether a player with `energy` left may sleep.
    ///
    /// Adapters use this to disable their sleep control.
    #[must_use]
    pub const fn can_sleep(&self, energy: u32) -> bool {
        energy >= self.config.min_energy
    }

    /// Emits [`Command::AdvanceDay`] when sleep was requested and allowed.
    pub fn handle(&self, input: RestInput, energy: u32, out: &mut Vec<Command>) {
        if !input.sleep_requested {
            return;
        }

        if !self.can_sleep(energy) {
            debug!(
                energy,
                required = self.config.min_energy,
                "sleep refused, player too tired"
            );
            return;
        }

        out.push(Command::AdvanceDay);
    }
}
