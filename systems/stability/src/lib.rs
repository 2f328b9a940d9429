#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects when the simulation stops changing.
//!
//! The detector observes the number of multi-cell components once per
//! generation and declares convergence after an unbroken streak of matching
//! observations. Late in a run, counts that drift by exactly one between
//! generations still extend the streak, absorbing slow oscillation and
//! decay. Any external board reload restarts tracking from scratch.

use torus_life_core::Event;

/// Configuration parameters required to construct the stability system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    min_stable_phases: u32,
    late_tolerance_generation: u64,
}

impl Config {
    /// Creates a configuration from an explicit streak length and the
    /// generation after which the one-off tolerance activates.
    #[must_use]
    pub const fn new(min_stable_phases: u32, late_tolerance_generation: u64) -> Self {
        Self {
            min_stable_phases,
            late_tolerance_generation,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(10, 1000)
    }
}

/// Streak-based convergence detector driven once per generation.
#[derive(Debug)]
pub struct Stability {
    config: Config,
    stable_phases: u32,
    last_combination_count: usize,
}

impl Stability {
    /// Creates a new detector using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stable_phases: 0,
            last_combination_count: 0,
        }
    }

    /// Consumes world events plus the current combination count and reports
    /// whether the simulation has converged.
    ///
    /// [`Event::BoardConfigured`] and [`Event::BoardReloaded`] restart
    /// tracking before any observation in the same batch is consumed.
    pub fn handle(&mut self, events: &[Event], combinations: usize) -> bool {
        for event in events {
            match event {
                Event::BoardConfigured { .. } | Event::BoardReloaded => self.reset(),
                Event::GenerationAdvanced { generation } => {
                    self.observe(*generation, combinations);
                }
            }
        }
        self.is_stable()
    }

    /// Reports whether the streak reached the configured threshold.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.stable_phases >= self.config.min_stable_phases
    }

    /// Number of consecutive generations currently counted as stable.
    #[must_use]
    pub fn stable_phases(&self) -> u32 {
        self.stable_phases
    }

    /// Restarts tracking as if no generation had been observed yet.
    pub fn reset(&mut self) {
        self.stable_phases = 0;
        self.last_combination_count = 0;
    }

    fn observe(&mut self, generation: u64, combinations: usize) {
        if self.stable_phases == 0 {
            self.stable_phases = 1;
            self.last_combination_count = combinations;
            return;
        }

        if combinations == self.last_combination_count {
            self.stable_phases += 1;
        } else if generation >= self.config.late_tolerance_generation
            && self.last_combination_count.abs_diff(combinations) == 1
        {
            // The tracked count deliberately stays put so a slow drift must
            // keep orbiting the same value to count as converging.
            self.stable_phases += 1;
        } else {
            self.stable_phases = 1;
            self.last_combination_count = combinations;
        }
    }
}

impl Default for Stability {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
