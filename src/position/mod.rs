//! Checkers move generation, along with all required data types.
//!
//! The board is an 8x8 array of optional pieces. Positions are small `Copy` values,
//! so the search simulates moves by copying the position rather than mutating the real one.

use std::fmt;
use std::ops::{Index, IndexMut};

use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use color_trait::{BlackTr, RedTr};
use mv::MoveText;

pub use crate::error::{MoveError, PositionError};
pub use mv::{Move, MAX_CAPTURES};
pub use utils::{
    dark_squares_iterator, squares_iterator, AbstractBoard, Direction, GameResult, Piece, Role,
    Side, Square, BOARD_SIZE,
};

pub(crate) mod color_trait;
mod move_gen;
pub mod mv;
pub mod utils;

/// Number of rows each side fills at the start of the game
const STARTING_ROWS: u8 = 3;

/// Complete representation of a checkers position.
///
/// The side to move is not part of the position, and is passed explicitly to the rules engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    cells: AbstractBoard<Option<Piece>>,
}

/// Everything needed to take back a move with `Position::reverse_move`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ReverseMove {
    from: Square,
    to: Square,
    piece: Option<Piece>,
    captured: ArrayVec<(Square, Piece), MAX_CAPTURES>,
}

impl Index<Square> for Position {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square]
    }
}

impl IndexMut<Square> for Position {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.cells[square]
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let Some(square) = Square::from_row_col(row, col) else {
                    continue;
                };
                match self[square] {
                    Some(piece) => write!(f, "[{}]", piece.to_char())?,
                    None if square.is_dark() => write!(f, "[ ]")?,
                    None => write!(f, "[.]")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "Pieces left: {} red, {} black.",
            self.piece_count(Side::Red),
            self.piece_count(Side::Black)
        )?;
        Ok(())
    }
}

impl Position {
    /// A board without any pieces
    pub fn empty() -> Self {
        Position {
            cells: AbstractBoard::default(),
        }
    }

    /// Red men on the dark squares of rows 0-2, black men on the dark squares of rows 5-7
    pub fn start_position() -> Self {
        Position {
            cells: AbstractBoard::new_from_fn(|square| {
                if !square.is_dark() {
                    None
                } else if square.row() < STARTING_ROWS {
                    Some(Piece::RedMan)
                } else if square.row() >= BOARD_SIZE as u8 - STARTING_ROWS {
                    Some(Piece::BlackMan)
                } else {
                    None
                }
            }),
        }
    }

    /// Builds a position from a snapshot of pieces. At most one piece may occupy any square.
    pub fn from_pieces<I>(pieces: I) -> Result<Self, PositionError>
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut position = Self::empty();
        for (square, piece) in pieces {
            if position[square].is_some() {
                return Err(PositionError::DuplicateSquare(square));
            }
            position[square] = Some(piece);
        }
        Ok(position)
    }

    /// All pieces on the board, row by row
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        squares_iterator().filter_map(move |square| self[square].map(|piece| (square, piece)))
    }

    pub fn piece_count(&self, side: Side) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.side() == side)
            .count()
    }

    /// The position mirrored left to right
    pub fn flip_board_x(&self) -> Position {
        let mut new_position = Self::empty();
        for (square, piece) in self.pieces() {
            new_position[square.flip_x()] = Some(piece);
        }
        new_position
    }

    /// Adds all legal moves for `side` to the provided vector.
    ///
    /// Captures are mandatory: if any piece of `side` can capture, only capture moves are generated.
    /// A capture continues for as long as the capturing piece can keep jumping, and only complete
    /// chains are generated. If `side` has no pieces or no moves, nothing is added.
    pub fn generate_moves(&self, side: Side, moves: &mut Vec<Move>) {
        match side {
            Side::Red => self.generate_moves_colortr::<RedTr, BlackTr>(moves),
            Side::Black => self.generate_moves_colortr::<BlackTr, RedTr>(moves),
        }
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = vec![];
        self.generate_moves(side, &mut moves);
        moves
    }

    /// Plays a move in place. The move is trusted to come from the move generator for this position.
    pub fn do_move(&mut self, mv: &Move) -> ReverseMove {
        let from = mv.origin_square();
        let to = mv.destination_square();
        let piece = self[from].take();
        debug_assert!(piece.is_some(), "No piece to move for {} on\n{:?}", mv, self);

        let mut captured = ArrayVec::new();
        for &square in mv.captures() {
            if let Some(captured_piece) = self[square].take() {
                captured.push((square, captured_piece));
            }
        }

        if let Some(piece) = piece {
            self[to] = Some(if mv.becomes_king() {
                piece.promote()
            } else {
                piece
            });
        }

        ReverseMove {
            from,
            to,
            piece,
            captured,
        }
    }

    pub fn reverse_move(&mut self, reverse_move: ReverseMove) {
        self[reverse_move.to] = None;
        self[reverse_move.from] = reverse_move.piece;
        for (square, piece) in reverse_move.captured {
            self[square] = Some(piece);
        }
    }

    /// The position after `mv` has been played. `self` is left untouched.
    pub fn apply(&self, mv: &Move) -> Position {
        let mut position = *self;
        position.do_move(mv);
        position
    }

    /// Returns the result if `side_to_move` has lost, by having no legal moves left
    pub fn game_result(&self, side_to_move: Side) -> Option<GameResult> {
        if self.legal_moves(side_to_move).is_empty() {
            Some(GameResult::win_for(!side_to_move))
        } else {
            None
        }
    }

    /// Counts the leaf nodes of the legal move tree, `depth` plies deep
    pub fn perft(&self, side_to_move: Side, depth: u16) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves(side_to_move);
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .iter()
            .map(|mv| self.apply(mv).perft(!side_to_move, depth - 1))
            .sum()
    }

    /// Validates a move given as a pair of squares, for example from a click on the board.
    /// Returns the matching legal move, with its full capture chain.
    pub fn find_move(&self, side: Side, from: Square, to: Square) -> Result<Move, MoveError> {
        let piece = self[from].ok_or(MoveError::NoPiece(from))?;
        if piece.side() != side {
            return Err(MoveError::WrongSide {
                square: from,
                owner: piece.side(),
            });
        }
        let legal_moves = self.legal_moves(side);
        let mut candidates = legal_moves
            .iter()
            .filter(|mv| mv.origin_square() == from && mv.destination_square() == to);

        match (candidates.next(), candidates.count()) {
            (Some(mv), 0) => Ok(mv.clone()),
            (Some(_), others) => Err(MoveError::Ambiguous {
                from,
                to,
                count: others + 1,
            }),
            (None, _) => {
                let is_step = piece
                    .directions()
                    .iter()
                    .any(|&direction| from.go_direction(direction) == Some(to));
                if is_step && legal_moves.iter().any(Move::is_capture) {
                    Err(MoveError::CaptureRequired(side))
                } else {
                    Err(MoveError::Illegal { from, to })
                }
            }
        }
    }

    /// Validates a move written in standard notation, like `11-15` or `9x18x27`.
    ///
    /// A capture may also be written with only its start and end squares, as long as
    /// no other capture chain shares those endpoints.
    pub fn move_from_str(&self, side: Side, input: &str) -> Result<Move, MoveError> {
        let text = MoveText::parse(input).ok_or_else(|| MoveError::Parse(input.to_string()))?;
        if text.squares.len() > 2 {
            return self
                .legal_moves(side)
                .into_iter()
                .find(|mv| text.matches_path(mv))
                .ok_or(MoveError::Illegal {
                    from: text.origin_square(),
                    to: text.destination_square(),
                });
        }
        let mv = self.find_move(side, text.origin_square(), text.destination_square())?;
        if mv.is_capture() == text.is_capture {
            Ok(mv)
        } else {
            Err(MoveError::Illegal {
                from: text.origin_square(),
                to: text.destination_square(),
            })
        }
    }

    /// Parses the text representation written by `to_fen`: 8 rows separated by `/`, starting with row 0.
    /// `r` and `b` are men, `R` and `B` are kings, and a digit is a run of empty squares.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let rows: Vec<&str> = fen.trim().split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(PositionError::RowCount {
                fen: fen.to_string(),
                rows: rows.len(),
            });
        }
        let mut position = Self::empty();
        for (row_id, row_str) in rows.into_iter().enumerate() {
            let mut col_id: usize = 0;
            for ch in row_str.chars() {
                if let Some(empty) = ch.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    col_id += empty as usize;
                } else if let Some(piece) = Piece::from_char(ch) {
                    if let Some(square) = Square::from_row_col(row_id as u8, col_id as u8) {
                        position[square] = Some(piece);
                    }
                    col_id += 1;
                } else {
                    return Err(PositionError::UnexpectedChar {
                        ch,
                        row: row_str.to_string(),
                    });
                }
                if col_id > BOARD_SIZE {
                    break;
                }
            }
            if col_id != BOARD_SIZE {
                return Err(PositionError::RowLength {
                    row: row_str.to_string(),
                    cells: col_id,
                });
            }
        }
        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut f = String::new();
        for row in 0..BOARD_SIZE as u8 {
            if row > 0 {
                f.push('/');
            }
            let mut empty = 0;
            for col in 0..BOARD_SIZE as u8 {
                let piece = Square::from_row_col(row, col).and_then(|square| self[square]);
                match piece {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            f.push_str(&empty.to_string());
                            empty = 0;
                        }
                        f.push(piece.to_char());
                    }
                }
            }
            if empty > 0 {
                f.push_str(&empty.to_string());
            }
        }
        f
    }
}
