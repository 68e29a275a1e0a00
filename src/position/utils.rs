use std::fmt;
use std::ops::{self, Index, IndexMut};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::utils::Direction::*;
use crate::position::utils::Piece::{BlackKing, BlackMan, RedKing, RedMan};

pub const BOARD_SIZE: usize = 8;

/// The number of playable (dark) squares on the board
pub const NUM_DARK_SQUARES: usize = BOARD_SIZE * BOARD_SIZE / 2;

/// One of the two sides in checkers.
/// Red starts on rows 0-2 and moves towards row 7, black starts on rows 5-7 and moves towards row 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Red = 0,
    Black = 1,
}

impl Side {
    /// The row where this side's men are crowned
    pub fn back_rank(self) -> u8 {
        match self {
            Side::Red => BOARD_SIZE as u8 - 1,
            Side::Black => 0,
        }
    }
}

impl ops::Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "red" | "r" => Ok(Side::Red),
            "black" | "b" => Ok(Side::Black),
            s => Err(format!("Invalid side \"{}\", expected red or black", s)),
        }
    }
}

/// The outcome of a finished game. Checkers as played here has no draws:
/// the game ends when the side to move has no legal move, and that side loses.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    RedWin,
    BlackWin,
}

impl GameResult {
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::Red => GameResult::RedWin,
            Side::Black => GameResult::BlackWin,
        }
    }

    pub fn winner(self) -> Side {
        match self {
            GameResult::RedWin => Side::Red,
            GameResult::BlackWin => Side::Black,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wins", self.winner())
    }
}

/// One of the 2 piece roles in checkers. The same as piece, but without different variants for each side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    Man = 0,
    King = 1,
}

/// One of the 4 game pieces in checkers. Each piece has one variant for each side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    RedMan = 0,
    BlackMan = 1,
    RedKing = 2,
    BlackKing = 3,
}

impl Piece {
    pub fn from_role_side(role: Role, side: Side) -> Self {
        match (role, side) {
            (Role::Man, Side::Red) => RedMan,
            (Role::Man, Side::Black) => BlackMan,
            (Role::King, Side::Red) => RedKing,
            (Role::King, Side::Black) => BlackKing,
        }
    }

    pub fn role(self) -> Role {
        match self {
            RedMan | BlackMan => Role::Man,
            RedKing | BlackKing => Role::King,
        }
    }

    pub fn side(self) -> Side {
        match self {
            RedMan | RedKing => Side::Red,
            BlackMan | BlackKing => Side::Black,
        }
    }

    pub fn is_king(self) -> bool {
        self.role() == Role::King
    }

    /// The same piece after being crowned. Kings are unchanged.
    pub fn promote(self) -> Self {
        Piece::from_role_side(Role::King, self.side())
    }

    /// The directions this piece may step or jump in
    pub fn directions(self) -> &'static [Direction] {
        match self {
            RedMan => &[SouthWest, SouthEast],
            BlackMan => &[NorthWest, NorthEast],
            RedKing | BlackKing => &[NorthWest, NorthEast, SouthWest, SouthEast],
        }
    }

    pub fn to_char(self) -> char {
        match self {
            RedMan => 'r',
            BlackMan => 'b',
            RedKing => 'R',
            BlackKing => 'B',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'r' => Some(RedMan),
            'b' => Some(BlackMan),
            'R' => Some(RedKing),
            'B' => Some(BlackKing),
            _ => None,
        }
    }
}

/// A diagonal direction on the board. North is towards row 0.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// Row and column offsets of a single step in this direction
    pub fn delta(self) -> (i8, i8) {
        match self {
            NorthWest => (-1, -1),
            NorthEast => (-1, 1),
            SouthWest => (1, -1),
            SouthEast => (1, 1),
        }
    }
}

/// A cell on the 8x8 board, stored as `row * 8 + col`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    pub fn from_row_col(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Square(row * BOARD_SIZE as u8 + col))
        } else {
            None
        }
    }

    fn from_signed(row: i8, col: i8) -> Option<Self> {
        if row < 0 || col < 0 {
            None
        } else {
            Self::from_row_col(row as u8, col as u8)
        }
    }

    /// Look up a dark square by its standard 1-32 number
    pub fn from_number(number: u8) -> Option<Self> {
        if number == 0 || number as usize > NUM_DARK_SQUARES {
            return None;
        }
        let index = number - 1;
        let row = index / 4;
        let col = (index % 4) * 2 + (row + 1) % 2;
        Self::from_row_col(row, col)
    }

    pub fn row(self) -> u8 {
        self.0 / BOARD_SIZE as u8
    }

    pub fn col(self) -> u8 {
        self.0 % BOARD_SIZE as u8
    }

    /// Only dark squares are ever occupied in a game started from the start position
    pub fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// The standard 1-32 number of a dark square
    pub fn number(self) -> Option<u8> {
        if self.is_dark() {
            Some(self.row() * 4 + self.col() / 2 + 1)
        } else {
            None
        }
    }

    pub fn go_direction(self, direction: Direction) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        Self::from_signed(self.row() as i8 + d_row, self.col() as i8 + d_col)
    }

    /// The square on the far side of `over`, when jumping diagonally from `self`
    pub fn jump_over(self, over: Square) -> Option<Self> {
        let row = 2 * over.row() as i8 - self.row() as i8;
        let col = 2 * over.col() as i8 - self.col() as i8;
        Self::from_signed(row, col)
    }

    /// The square mirrored across the vertical center line of the board
    pub fn flip_x(self) -> Self {
        Square(self.row() * BOARD_SIZE as u8 + (BOARD_SIZE as u8 - 1 - self.col()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(number) => write!(f, "{}", number),
            None => write!(f, "({},{})", self.row(), self.col()),
        }
    }
}

/// Iterates over all 64 squares, row by row
pub fn squares_iterator() -> impl Iterator<Item = Square> {
    (0..(BOARD_SIZE * BOARD_SIZE) as u8).map(Square)
}

/// Iterates over the 32 dark squares, in square number order
pub fn dark_squares_iterator() -> impl Iterator<Item = Square> {
    squares_iterator().filter(|square| square.is_dark())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AbstractBoard<T> {
    raw: [[T; BOARD_SIZE]; BOARD_SIZE],
}

impl<T> AbstractBoard<T> {
    pub fn new_from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Square) -> T,
    {
        AbstractBoard {
            raw: std::array::from_fn(|row| {
                std::array::from_fn(|col| f(Square((row * BOARD_SIZE + col) as u8)))
            }),
        }
    }
}

impl<T> Index<Square> for AbstractBoard<T> {
    type Output = T;

    fn index(&self, square: Square) -> &Self::Output {
        &self.raw[square.row() as usize][square.col() as usize]
    }
}

impl<T> IndexMut<Square> for AbstractBoard<T> {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.raw[square.row() as usize][square.col() as usize]
    }
}
