//! Configuration types for season generation
//!
//! Level 4 - Utilities and configuration

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Retry ceilings for each level of the search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptLimits {
    /// Random opponent draws per team before the week is abandoned
    pub team_attempts: usize,
    /// Consecutive failed tries of one week before the season attempt is abandoned
    pub week_failures: usize,
    /// Full season attempts before generation fails
    pub season_attempts: usize,
}

impl Default for AttemptLimits {
    fn default() -> Self {
        Self {
            team_attempts: 100,
            week_failures: 15,
            season_attempts: 60,
        }
    }
}

impl AttemptLimits {
    /// Limits scaled to the roster size.
    ///
    /// Late in a week only a couple of teams remain in the pool, and a
    /// fixed small ceiling gives up on pairings that are merely unlucky.
    pub fn for_roster(teams: usize) -> Self {
        Self {
            team_attempts: (teams * 10).max(30),
            ..Default::default()
        }
    }

    /// Set the per-team draw ceiling
    pub fn with_team_attempts(mut self, team_attempts: usize) -> Self {
        self.team_attempts = team_attempts;
        self
    }

    /// Set the consecutive week-failure ceiling
    pub fn with_week_failures(mut self, week_failures: usize) -> Self {
        self.week_failures = week_failures;
        self
    }

    /// Set the season attempt budget
    pub fn with_season_attempts(mut self, season_attempts: usize) -> Self {
        self.season_attempts = season_attempts;
        self
    }
}

/// Season generation configuration
#[derive(Clone, Debug, Default)]
pub struct SeasonConfig {
    /// Retry ceilings
    pub limits: AttemptLimits,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Whether to run season attempts in parallel
    pub parallel: bool,
}

impl SeasonConfig {
    /// Create config with limits scaled to the roster size
    pub fn for_roster(teams: usize) -> Self {
        Self {
            limits: AttemptLimits::for_roster(teams),
            ..Default::default()
        }
    }

    /// Set retry ceilings
    pub fn with_limits(mut self, limits: AttemptLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run season attempts on the rayon pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
