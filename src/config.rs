//! Allocator configuration

/// What the coloring pass does with a value that has no real color left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Reuse an extended color no neighbor holds, else create a new one
    #[default]
    Extend,
    /// Give every exhausted value a fresh extended color
    SpillImmediately,
}

/// How candidate pairs are enumerated when building the interference graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildStrategy {
    /// Test every unordered pair
    #[default]
    Pairwise,
    /// Sort by range start and only test pairs whose extents intersect.
    /// Falls back to `Pairwise` if any value has no extent.
    SweepLine,
}

/// Allocator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Seed for the color-selection RNG; `None` draws a fresh one per round
    pub seed: Option<u64>,
    pub exhaustion: ExhaustionPolicy,
    pub build_strategy: BuildStrategy,
    /// Check graph and coloring invariants after the coloring pass
    pub verify: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            exhaustion: ExhaustionPolicy::default(),
            build_strategy: BuildStrategy::default(),
            verify: true,
        }
    }
}

impl AllocatorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_exhaustion(mut self, exhaustion: ExhaustionPolicy) -> Self {
        self.exhaustion = exhaustion;
        self
    }

    pub fn with_build_strategy(mut self, strategy: BuildStrategy) -> Self {
        self.build_strategy = strategy;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}
