//! Depth-limited minimax search with alpha-beta pruning.

use crate::evaluation::evaluate_for;
use crate::position::{Position, Side};
use crate::search::{Score, INF, WIN_SCORE};

/// Searches `depth` plies deep, and returns the score from `maximizing_side`'s point of view.
/// `maximizing_side` is to move when `maximizing` is true, its opponent otherwise.
///
/// A side without legal moves has lost. Those nodes score `WIN_SCORE` plus the remaining depth,
/// so that a win found sooner scores higher than the same win found deeper.
pub fn alpha_beta(
    position: &Position,
    depth: u16,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    maximizing_side: Side,
    nodes: &mut u64,
) -> Score {
    *nodes += 1;

    if depth == 0 {
        return evaluate_for(position, maximizing_side);
    }

    let side_to_move = if maximizing {
        maximizing_side
    } else {
        !maximizing_side
    };
    let mut moves = vec![];
    position.generate_moves(side_to_move, &mut moves);

    if moves.is_empty() {
        return if maximizing {
            -(WIN_SCORE + depth as Score)
        } else {
            WIN_SCORE + depth as Score
        };
    }

    if maximizing {
        let mut max_score = -INF;
        for mv in moves.iter() {
            let child = position.apply(mv);
            let score = alpha_beta(
                &child,
                depth - 1,
                alpha,
                beta,
                false,
                maximizing_side,
                nodes,
            );
            max_score = max_score.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        max_score
    } else {
        let mut min_score = INF;
        for mv in moves.iter() {
            let child = position.apply(mv);
            let score = alpha_beta(
                &child,
                depth - 1,
                alpha,
                beta,
                true,
                maximizing_side,
                nodes,
            );
            min_score = min_score.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        min_score
    }
}
