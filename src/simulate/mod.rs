//! Match simulation.
//!
//! Produces best-of-5 set scores for a match between two entrants. All
//! randomness sits behind the [`MatchSimulator`] trait so the builder can
//! be driven by a seeded generator in tests, or by [`ManualPlay`] when
//! results are entered by hand.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Entrant, MatchOutcome, Scoreline, SETS_TO_WIN};

/// Lowest points a side can score in a set.
pub const MIN_SET_POINTS: u32 = 21;

/// Highest points a side can draw for a set (a tie-break bump may add one).
pub const MAX_SET_POINTS: u32 = 26;

/// Decides matches between two real players.
pub trait MatchSimulator {
    /// Simulator identifier for logging.
    fn name(&self) -> &'static str;

    /// Decide a match. `None` leaves the match pending.
    fn play(&mut self, player1: &str, player2: &str) -> Option<MatchOutcome>;
}

/// Resolve a match from its two slots.
///
/// A single bye hands the other side a walkover. Two byes, an empty slot,
/// or a simulator that declines to decide all leave the match pending.
pub fn simulate_match<S: MatchSimulator + ?Sized>(
    simulator: &mut S,
    player1: Option<&Entrant>,
    player2: Option<&Entrant>,
) -> MatchOutcome {
    match (player1, player2) {
        (Some(Entrant::Bye), Some(Entrant::Player(name)))
        | (Some(Entrant::Player(name)), Some(Entrant::Bye)) => MatchOutcome::Walkover {
            winner: name.clone(),
        },
        (Some(Entrant::Player(a)), Some(Entrant::Player(b))) => simulator
            .play(a, b)
            .unwrap_or(MatchOutcome::Pending),
        _ => MatchOutcome::Pending,
    }
}

/// Random best-of-5 simulator.
///
/// The first-listed player always wins the match; only the scores are
/// random. The loser's set count (0, 1 or 2) is drawn up front and those
/// sets are played first.
pub struct RandomSimulator<R: Rng = StdRng> {
    rng: R,
}

impl RandomSimulator<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible simulator for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSimulator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate set scores in which player1 wins the match.
    pub fn scoreline(&mut self) -> Scoreline {
        let loser_target = self.rng.gen_range(0..SETS_TO_WIN);

        let mut line = Scoreline {
            player1_points: Vec::new(),
            player2_points: Vec::new(),
            player1_sets: 0,
            player2_sets: 0,
        };

        while line.player1_sets < SETS_TO_WIN && line.player2_sets < SETS_TO_WIN {
            let (high, low) = self.set_points();
            if line.player2_sets < loser_target {
                line.player1_points.push(low);
                line.player2_points.push(high);
                line.player2_sets += 1;
            } else {
                line.player1_points.push(high);
                line.player2_points.push(low);
                line.player1_sets += 1;
            }
        }

        line
    }

    /// Draw one set as (winning points, losing points).
    fn set_points(&mut self) -> (u32, u32) {
        let mut a = self.rng.gen_range(MIN_SET_POINTS..=MAX_SET_POINTS);
        let b = self.rng.gen_range(MIN_SET_POINTS..=MAX_SET_POINTS);
        if a == b {
            a += 1;
        }
        (a.max(b), a.min(b))
    }
}

impl<R: Rng> MatchSimulator for RandomSimulator<R> {
    fn name(&self) -> &'static str {
        "random"
    }

    fn play(&mut self, player1: &str, player2: &str) -> Option<MatchOutcome> {
        Some(MatchOutcome::Played {
            winner: player1.to_string(),
            loser: player2.to_string(),
            scoreline: self.scoreline(),
        })
    }
}

/// Leaves every real match pending; only byes are resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualPlay;

impl MatchSimulator for ManualPlay {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn play(&mut self, _player1: &str, _player2: &str) -> Option<MatchOutcome> {
        None
    }
}

/// Pick the simulator for a session: manual play, a seeded generator, or
/// a freshly seeded one.
pub fn select_simulator(seed: Option<u64>, manual: bool) -> Box<dyn MatchSimulator + Send> {
    if manual {
        tracing::info!("Using manual play (byes only)");
        return Box::new(ManualPlay);
    }
    match seed {
        Some(seed) => {
            tracing::info!("Using random simulator (seed {})", seed);
            Box::new(RandomSimulator::seeded(seed))
        }
        None => Box::new(RandomSimulator::from_entropy()),
    }
}
