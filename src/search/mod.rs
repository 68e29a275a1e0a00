//! The checkers AI: a depth-limited minimax search with alpha-beta pruning.
//!
//! The search is single-threaded and runs to completion. Callers that must stay responsive
//! should run it on a separate thread, see `Game::spawn_engine_search`.

use std::str::FromStr;
use std::{fmt, time};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::evaluation::evaluate_for;
use crate::position::{Move, Position, Side};

pub use minmax::alpha_beta;

mod minmax;

/// Type alias for position scores, from the maximizing side's point of view.
pub type Score = i32;

/// Base score for a won position. Adjusted by remaining depth, so that faster wins score higher.
pub const WIN_SCORE: Score = 1_000_000;

/// Bound for the alpha-beta window. Far outside any reachable score, and far from overflowing.
pub const INF: Score = 2 * WIN_SCORE;

/// The engine's playing strength.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Search depth in plies
    pub fn depth(self) -> u16 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Chance of playing a uniformly random legal move instead of searching
    pub fn random_move_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium | Difficulty::Hard => 0.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            s => Err(format!(
                "Invalid difficulty \"{}\", expected easy, medium or hard",
                s
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSettings {
    difficulty: Difficulty,
    maximizing_side: Side,
    depth: Option<u16>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            difficulty: Difficulty::default(),
            maximizing_side: Side::Black,
            depth: None,
        }
    }
}

impl SearchSettings {
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// The side the engine plays. All scores are reported from this side's point of view.
    pub fn maximizing_side(mut self, side: Side) -> Self {
        self.maximizing_side = side;
        self
    }

    /// Search to a fixed depth, instead of the difficulty's depth. The random move chance is kept.
    pub fn depth(mut self, depth: u16) -> Self {
        self.depth = Some(depth.max(1));
        self
    }

    pub fn get_difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn get_maximizing_side(&self) -> Side {
        self.maximizing_side
    }

    pub fn search_depth(&self) -> u16 {
        self.depth.unwrap_or_else(|| self.difficulty.depth())
    }

    pub fn random_move_probability(&self) -> f64 {
        self.difficulty.random_move_probability()
    }
}

/// The result of a top-level search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Move {
        mv: Move,
        score: Score,
        nodes: u64,
        /// True if the move was picked at random, instead of by the search
        random: bool,
    },
    /// The side to move has no legal moves, and has lost the game
    NoLegalMoves,
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<&Move> {
        match self {
            SearchOutcome::Move { mv, .. } => Some(mv),
            SearchOutcome::NoLegalMoves => None,
        }
    }

    pub fn score(&self) -> Option<Score> {
        match self {
            SearchOutcome::Move { score, .. } => Some(*score),
            SearchOutcome::NoLegalMoves => None,
        }
    }
}

/// Picks a move for `side`, using the thread-local random generator for easy mode's random moves.
pub fn best_move(position: &Position, side: Side, settings: &SearchSettings) -> SearchOutcome {
    best_move_with_rng(position, side, settings, &mut rand::thread_rng())
}

/// Picks a move for `side`.
///
/// Each legal move is searched one ply shallower than the configured depth. When `side` is the
/// settings' maximizing side the highest scoring move is picked, otherwise the lowest.
/// Ties go to the first move in move generation order.
pub fn best_move_with_rng<R: Rng>(
    position: &Position,
    side: Side,
    settings: &SearchSettings,
    rng: &mut R,
) -> SearchOutcome {
    let start_time = time::Instant::now();
    let moves = position.legal_moves(side);
    if moves.is_empty() {
        debug!("{} has no legal moves", side);
        return SearchOutcome::NoLegalMoves;
    }

    let random_move_probability = settings.random_move_probability();
    if random_move_probability > 0.0 && rng.gen_bool(random_move_probability) {
        if let Some(mv) = moves.choose(rng) {
            debug!("Playing random move {} for {}", mv, side);
            return SearchOutcome::Move {
                mv: mv.clone(),
                score: evaluate_for(&position.apply(mv), settings.maximizing_side),
                nodes: 1,
                random: true,
            };
        }
    }

    let maximizing = side == settings.maximizing_side;
    let depth = settings.search_depth();
    let mut nodes = 0;
    let mut alpha = -INF;
    let mut beta = INF;
    let mut best: Option<(&Move, Score)> = None;

    for mv in moves.iter() {
        let child = position.apply(mv);
        let score = alpha_beta(
            &child,
            depth - 1,
            alpha,
            beta,
            !maximizing,
            settings.maximizing_side,
            &mut nodes,
        );
        let is_improvement = match best {
            None => true,
            Some((_, best_score)) if maximizing => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if is_improvement {
            best = Some((mv, score));
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }
    }

    match best {
        Some((mv, score)) => {
            debug!(
                "{} searched {} nodes to depth {} in {:.3}s, best move {} with score {}",
                side,
                nodes,
                depth,
                start_time.elapsed().as_secs_f32(),
                mv,
                score
            );
            SearchOutcome::Move {
                mv: mv.clone(),
                score,
                nodes,
                random: false,
            }
        }
        None => SearchOutcome::NoLegalMoves,
    }
}
