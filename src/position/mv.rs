use std::fmt;

use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::utils::Square;

/// Upper bound on the number of pieces captured in a single chain.
/// Pieces on the board edge can never be jumped, which leaves 18 dark squares.
pub const MAX_CAPTURES: usize = 18;

pub type Captures = ArrayVec<Square, MAX_CAPTURES>;

/// A legal move for a position, including the full capture chain.
///
/// Moves can only be created by the move generator, so every `Move` in circulation
/// was legal for the position it was generated from.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    from: Square,
    to: Square,
    captures: Captures,
    becomes_king: bool,
}

impl Move {
    pub(crate) fn step(from: Square, to: Square, becomes_king: bool) -> Self {
        Move {
            from,
            to,
            captures: ArrayVec::new(),
            becomes_king,
        }
    }

    pub(crate) fn capture(from: Square, to: Square, captures: Captures, becomes_king: bool) -> Self {
        debug_assert!(!captures.is_empty());
        Move {
            from,
            to,
            captures,
            becomes_king,
        }
    }

    pub fn origin_square(&self) -> Square {
        self.from
    }

    pub fn destination_square(&self) -> Square {
        self.to
    }

    /// The captured cells, in the order they are jumped
    pub fn captures(&self) -> &[Square] {
        &self.captures
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    pub fn becomes_king(&self) -> bool {
        self.becomes_king
    }

    /// Every square the piece lands on, in order. The last element is always the destination.
    pub fn path(&self) -> Vec<Square> {
        if self.captures.is_empty() {
            return vec![self.to];
        }
        let mut current = self.from;
        let mut path = Vec::with_capacity(self.captures.len());
        for &captured in self.captures.iter() {
            match current.jump_over(captured) {
                Some(landing) => {
                    path.push(landing);
                    current = landing;
                }
                None => break,
            }
        }
        path
    }
}

/// Standard checkers notation: `9-13` for a step, `9x18x27` for a capture chain.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from)?;
        if self.is_capture() {
            for square in self.path() {
                write!(f, "x{}", square)?;
            }
        } else {
            write!(f, "-{}", self.to)?;
        }
        Ok(())
    }
}

/// A move as typed by a human: a starting square and one or more landing squares.
/// It must be matched against the legal moves of a position before it can be played.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct MoveText {
    pub(crate) squares: Vec<Square>,
    pub(crate) is_capture: bool,
}

impl MoveText {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if !input.is_ascii() || input.is_empty() {
            return None;
        }
        let is_capture = input.contains('x');
        if is_capture && input.contains('-') {
            return None;
        }
        let separator = if is_capture { 'x' } else { '-' };
        let squares = input
            .split(separator)
            .map(|word| word.trim().parse::<u8>().ok().and_then(Square::from_number))
            .collect::<Option<Vec<Square>>>()?;
        if squares.len() < 2 || (!is_capture && squares.len() != 2) {
            return None;
        }
        Some(MoveText {
            squares,
            is_capture,
        })
    }

    pub(crate) fn origin_square(&self) -> Square {
        self.squares[0]
    }

    pub(crate) fn destination_square(&self) -> Square {
        self.squares[self.squares.len() - 1]
    }

    /// Whether the text names every landing square of `mv`, not just the endpoints
    pub(crate) fn matches_path(&self, mv: &Move) -> bool {
        self.origin_square() == mv.origin_square()
            && self.is_capture == mv.is_capture()
            && self.squares[1..] == mv.path()[..]
    }
}
