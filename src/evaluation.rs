//! Static evaluation of checkers positions.
//!
//! A hand-tuned heuristic of material and piece placement. Scores are positive when black is ahead.

use crate::position::{Position, Side, Square};
use crate::search::Score;

pub const MAN_VALUE: Score = 10;
pub const KING_VALUE: Score = 30;

const CENTER_WEIGHT: Score = 2;
const EDGE_PENALTY: Score = 3;
const ADVANCEMENT_WEIGHT: Score = 2;

/// Evaluates the position from black's point of view.
/// Every red piece counts negatively and every black piece positively.
pub fn evaluate(position: &Position) -> Score {
    position
        .pieces()
        .map(|(square, piece)| {
            let material = if piece.is_king() {
                KING_VALUE
            } else {
                MAN_VALUE
            };
            let value = material + positional_bonus(square, piece.side());
            match piece.side() {
                Side::Red => -value,
                Side::Black => value,
            }
        })
        .sum()
}

/// Evaluates the position from `side`'s point of view
pub fn evaluate_for(position: &Position, side: Side) -> Score {
    match side {
        Side::Black => evaluate(position),
        Side::Red => -evaluate(position),
    }
}

/// Bonus for controlling the center columns and advancing towards the opponent's back rank,
/// with a penalty for standing on the side edges.
pub fn positional_bonus(square: Square, side: Side) -> Score {
    let row = square.row() as Score;
    let col = square.col() as Score;

    let distance_from_center = (col - 3).abs() + (col - 4).abs();
    let mut bonus = (7 - distance_from_center) * CENTER_WEIGHT;

    if col == 0 || col == 7 {
        bonus -= EDGE_PENALTY;
    }

    bonus += match side {
        Side::Red => row * ADVANCEMENT_WEIGHT,
        Side::Black => (7 - row) * ADVANCEMENT_WEIGHT,
    };
    bonus
}
