//! Deterministic random stream for simulated play.
//!
//! ```
//! use par_doubles::sim::RallyRng;
//!
//! let mut rng = RallyRng::new(42);
//! let mut branch = rng.fork();
//!
//! let mut again = RallyRng::new(42);
//! let mut branch_again = again.fork();
//! assert_eq!(branch.gen_bool(0.5), branch_again.gen_bool(0.5));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::{PlayerRow, Team};

/// Seeded ChaCha8 stream. The same seed always plays the same rallies.
#[derive(Clone, Debug)]
pub struct RallyRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl RallyRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Split off an independent, reproducible stream (one per game, say).
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let offset = self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::new(self.seed.wrapping_add(offset))
    }

    /// `true` with the given probability. `probability` must lie in `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Winner of a rally the serving team wins with `server_win_probability`.
    pub fn rally_winner(&mut self, serving_team: Team, server_win_probability: f64) -> Team {
        if self.gen_bool(server_win_probability) {
            serving_team
        } else {
            serving_team.opponent()
        }
    }

    /// Either row, evenly.
    pub fn player_row(&mut self) -> PlayerRow {
        if self.gen_bool(0.5) {
            PlayerRow::One
        } else {
            PlayerRow::Two
        }
    }
}
