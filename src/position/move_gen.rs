use arrayvec::ArrayVec;

use crate::position::color_trait::ColorTr;
use crate::position::mv::{Captures, Move};
use crate::position::utils::{Piece, Square};
use crate::position::Position;

impl Position {
    /// Adds every legal move for `Us` to `moves`.
    /// If any piece can capture, only capture chains are generated.
    pub(crate) fn generate_moves_colortr<Us: ColorTr, Them: ColorTr>(&self, moves: &mut Vec<Move>) {
        let start_len = moves.len();
        for (square, piece) in self.pieces() {
            if Us::piece_is_ours(piece) {
                let mut captures = ArrayVec::new();
                self.generate_capture_chains::<Us, Them>(
                    square,
                    square,
                    piece,
                    &mut captures,
                    moves,
                );
            }
        }
        if moves.len() > start_len {
            return;
        }
        for (square, piece) in self.pieces() {
            if Us::piece_is_ours(piece) {
                self.generate_steps::<Us>(square, piece, moves);
            }
        }
    }

    fn generate_steps<Us: ColorTr>(&self, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        for &direction in piece.directions() {
            if let Some(to) = from.go_direction(direction) {
                if self[to].is_none() {
                    moves.push(Move::step(from, to, Us::is_crowned_on(piece, to.row())));
                }
            }
        }
    }

    /// Extends the partial chain in `captures`, with `piece` currently standing on `square`.
    /// `self` already has every earlier jump of the chain applied, so jumped pieces are gone
    /// and the origin square is empty.
    ///
    /// A man that reaches the back rank keeps moving as a man for the rest of the chain,
    /// which in practice ends the chain there.
    fn generate_capture_chains<Us: ColorTr, Them: ColorTr>(
        &self,
        origin: Square,
        square: Square,
        piece: Piece,
        captures: &mut Captures,
        moves: &mut Vec<Move>,
    ) {
        for &direction in piece.directions() {
            let Some(jumped) = square.go_direction(direction) else {
                continue;
            };
            let Some(landing) = jumped.go_direction(direction) else {
                continue;
            };
            match (self[jumped], self[landing]) {
                (Some(jumped_piece), None) if Them::piece_is_ours(jumped_piece) => {
                    let mut next = *self;
                    next[square] = None;
                    next[jumped] = None;
                    next[landing] = Some(piece);
                    captures.push(jumped);

                    let num_moves = moves.len();
                    next.generate_capture_chains::<Us, Them>(
                        origin, landing, piece, captures, moves,
                    );
                    if moves.len() == num_moves {
                        moves.push(Move::capture(
                            origin,
                            landing,
                            captures.clone(),
                            Us::is_crowned_on(piece, landing.row()),
                        ));
                    }

                    captures.pop();
                }
                _ => (),
            }
        }
    }
}
