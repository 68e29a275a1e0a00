//! Error types for parsing positions and validating externally sourced moves.

use thiserror::Error;

use crate::position::{Side, Square};

/// Reasons a move from outside the engine, such as a human player, is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("Couldn't parse move \"{0}\", expected something like 9-13 or 9x18x27")]
    Parse(String),

    #[error("There is no piece on square {0}")]
    NoPiece(Square),

    #[error("The piece on square {square} belongs to {owner}")]
    WrongSide { square: Square, owner: Side },

    #[error("{0} has a capture available, and capturing is mandatory")]
    CaptureRequired(Side),

    #[error("Moving from {from} to {to} is not legal")]
    Illegal { from: Square, to: Square },

    #[error("Moving from {from} to {to} matches {count} different capture chains, write out every landing square")]
    Ambiguous { from: Square, to: Square, count: usize },

    #[error("The game is already over")]
    GameOver,

    #[error("It is {0}'s turn")]
    NotYourTurn(Side),

    #[error("The engine reported no legal moves, but {0} still has legal moves")]
    StaleOutcome(Side),
}

/// Errors from parsing the text representation of a position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Two pieces placed on square {0}")]
    DuplicateSquare(Square),

    #[error("Couldn't parse position \"{fen}\", had {rows} rows instead of 8")]
    RowCount { fen: String, rows: usize },

    #[error("Couldn't parse row \"{row}\", it describes {cells} cells instead of 8")]
    RowLength { row: String, cells: usize },

    #[error("Unexpected '{ch}' in row \"{row}\"")]
    UnexpectedChar { ch: char, row: String },
}
