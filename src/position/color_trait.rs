//* Traits for red/black sides. Useful for writing functions that are generic over the side to move,
//* like how the move generator is structured.

use crate::position::utils::{Piece, Side};
use crate::position::utils::Piece::{BlackKing, BlackMan, RedKing, RedMan};

pub(crate) trait ColorTr {
    fn man_piece() -> Piece;

    /// The row where this side's men are crowned
    fn back_rank() -> u8;

    fn piece_is_ours(piece: Piece) -> bool;

    fn is_crowned_on(piece: Piece, row: u8) -> bool {
        piece == Self::man_piece() && row == Self::back_rank()
    }
}

pub(crate) struct RedTr {}

impl ColorTr for RedTr {
    fn man_piece() -> Piece {
        RedMan
    }

    fn back_rank() -> u8 {
        Side::Red.back_rank()
    }

    fn piece_is_ours(piece: Piece) -> bool {
        piece == RedMan || piece == RedKing
    }
}

pub(crate) struct BlackTr {}

impl ColorTr for BlackTr {
    fn man_piece() -> Piece {
        BlackMan
    }

    fn back_rank() -> u8 {
        Side::Black.back_rank()
    }

    fn piece_is_ours(piece: Piece) -> bool {
        piece == BlackMan || piece == BlackKing
    }
}
