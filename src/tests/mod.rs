#[cfg(test)]
mod move_gen_tests;

#[cfg(test)]
use crate::position::{Piece, Position, Side, Square};

#[cfg(test)]
fn sq(number: u8) -> Square {
    Square::from_number(number).unwrap()
}

/// Builds a position from `(square number, piece)` pairs
#[cfg(test)]
fn position_from_numbers(pieces: &[(u8, Piece)]) -> Position {
    Position::from_pieces(pieces.iter().map(|&(number, piece)| (sq(number), piece))).unwrap()
}

/// Plays the moves from the start position, red first, and returns the side to move afterwards
#[cfg(test)]
fn do_moves_and_check_validity(position: &mut Position, move_strings: &[&str]) -> Side {
    let mut side = Side::Red;
    for move_string in move_strings {
        let mv = position.move_from_str(side, move_string).unwrap();
        assert!(
            position.legal_moves(side).contains(&mv),
            "Move {} was not among legal moves: {:?}\n{:?}",
            mv,
            position.legal_moves(side),
            position
        );
        assert_eq!(mv.to_string(), *move_string);
        position.do_move(&mv);
        side = !side;
    }
    side
}

/// A short opening with an exchange of men
#[cfg(test)]
const EXCHANGE_OPENING: [&str; 5] = ["9-13", "22-18", "10-14", "18x9", "5x14"];
