use crate::position::{GameResult, Move, Piece, Position, Side};
use crate::tests::{do_moves_and_check_validity, position_from_numbers, sq, EXCHANGE_OPENING};

fn move_strings(moves: &[Move]) -> Vec<String> {
    moves.iter().map(|mv| mv.to_string()).collect()
}

#[test]
fn start_position_move_gen_test() {
    let position = Position::start_position();
    let moves = position.legal_moves(Side::Red);
    assert_eq!(
        move_strings(&moves),
        vec!["9-13", "9-14", "10-14", "10-15", "11-15", "11-16", "12-16"]
    );
    assert!(moves.iter().all(|mv| !mv.is_capture() && !mv.becomes_king()));

    assert_eq!(position.legal_moves(Side::Black).len(), 7);
}

#[test]
fn perft_test() {
    let position = Position::start_position();
    assert_eq!(position.perft(Side::Red, 0), 1);
    assert_eq!(position.perft(Side::Red, 1), 7);
    assert_eq!(position.perft(Side::Red, 2), 49);
    assert_eq!(position.perft(Side::Red, 3), 302);
    assert_eq!(position.perft(Side::Red, 4), 1469);
    assert_eq!(position.perft(Side::Red, 5), 7361);
}

#[test]
fn capture_is_mandatory_test() {
    // Red man on 9 can jump the black man on 14, red man on 4 could otherwise step
    let position = position_from_numbers(&[
        (9, Piece::RedMan),
        (4, Piece::RedMan),
        (14, Piece::BlackMan),
    ]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(move_strings(&moves), vec!["9x18"]);
    assert_eq!(moves[0].captures(), &[sq(14)]);
    assert_eq!(moves[0].destination_square(), sq(18));
}

#[test]
fn forced_capture_in_game_test() {
    let mut position = Position::start_position();
    let side = do_moves_and_check_validity(&mut position, &EXCHANGE_OPENING[0..3]);
    assert_eq!(side, Side::Black);
    assert_eq!(move_strings(&position.legal_moves(side)), vec!["18x9"]);

    do_moves_and_check_validity(&mut Position::start_position(), &EXCHANGE_OPENING);
}

#[test]
fn double_jump_is_one_move_test() {
    let position = position_from_numbers(&[
        (1, Piece::RedMan),
        (6, Piece::BlackMan),
        (15, Piece::BlackMan),
    ]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(moves.len(), 1, "{:?}", moves);
    let mv = &moves[0];
    assert_eq!(mv.to_string(), "1x10x19");
    assert_eq!(mv.captures(), &[sq(6), sq(15)]);
    assert_eq!(mv.path(), vec![sq(10), sq(19)]);

    let after = position.apply(mv);
    assert_eq!(after.piece_count(Side::Black), 0);
    assert_eq!(after[sq(19)], Some(Piece::RedMan));
    assert_eq!(after.game_result(Side::Black), Some(GameResult::RedWin));
}

#[test]
fn king_double_jump_is_one_move_test() {
    // The black man on 27 is out of reach after the second jump
    let position = position_from_numbers(&[
        (1, Piece::RedKing),
        (6, Piece::BlackMan),
        (15, Piece::BlackMan),
        (27, Piece::BlackMan),
    ]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(move_strings(&moves), vec!["1x10x19"]);
    assert_eq!(moves[0].captures(), &[sq(6), sq(15)]);
    assert!(!moves[0].becomes_king());

    let after = position.apply(&moves[0]);
    assert_eq!(after[sq(19)], Some(Piece::RedKing));
    assert_eq!(after.piece_count(Side::Black), 1);
    assert_eq!(after[sq(27)], Some(Piece::BlackMan));
}

#[test]
fn branching_capture_chains_test() {
    let position = position_from_numbers(&[
        (1, Piece::RedMan),
        (6, Piece::BlackMan),
        (14, Piece::BlackMan),
        (15, Piece::BlackMan),
    ]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(move_strings(&moves), vec!["1x10x17", "1x10x19"]);
}

#[test]
fn king_capture_loop_test() {
    // The king can jump around the square of black men in both directions, ending where it started
    let position = position_from_numbers(&[
        (10, Piece::RedKing),
        (14, Piece::BlackMan),
        (15, Piece::BlackMan),
        (22, Piece::BlackMan),
        (23, Piece::BlackMan),
    ]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(
        move_strings(&moves),
        vec!["10x17x26x19x10", "10x19x26x17x10"]
    );
    for mv in moves.iter() {
        assert_eq!(mv.captures().len(), 4);
        assert_eq!(mv.origin_square(), mv.destination_square());
        let after = position.apply(mv);
        assert_eq!(after.piece_count(Side::Black), 0);
        assert_eq!(after[sq(10)], Some(Piece::RedKing));
    }
}

#[test]
fn promotion_test() {
    let position = position_from_numbers(&[(25, Piece::RedMan), (8, Piece::BlackMan)]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(move_strings(&moves), vec!["25-29", "25-30"]);
    assert!(moves.iter().all(Move::becomes_king));

    let after = position.apply(&moves[1]);
    assert_eq!(after[sq(30)], Some(Piece::RedKing));
    assert_eq!(after.piece_count(Side::Red), 1);

    // The new king moves backwards
    let king_moves = after.legal_moves(Side::Red);
    assert_eq!(move_strings(&king_moves), vec!["30-25", "30-26"]);

    // Black men are crowned on row 0
    let black_moves = position.legal_moves(Side::Black);
    assert_eq!(move_strings(&black_moves), vec!["8-3", "8-4"]);
    assert!(black_moves.iter().all(Move::becomes_king));
}

#[test]
fn chain_ends_on_promotion_test() {
    // After crowning on 30, a king could continue over 26, but the chain ends there
    let position = position_from_numbers(&[
        (21, Piece::RedMan),
        (25, Piece::BlackMan),
        (26, Piece::BlackMan),
    ]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(move_strings(&moves), vec!["21x30"]);
    assert!(moves[0].becomes_king());

    let after = position.apply(&moves[0]);
    assert_eq!(after[sq(30)], Some(Piece::RedKing));
    assert_eq!(after[sq(26)], Some(Piece::BlackMan));

    // On the next turn, the new king may capture backwards
    assert_eq!(move_strings(&after.legal_moves(Side::Red)), vec!["30x23"]);
}

#[test]
fn king_does_not_promote_again_test() {
    let position = position_from_numbers(&[(25, Piece::RedKing), (8, Piece::BlackMan)]);
    let moves = position.legal_moves(Side::Red);
    assert_eq!(move_strings(&moves), vec!["25-21", "25-22", "25-29", "25-30"]);
    assert!(moves.iter().all(|mv| !mv.becomes_king()));
}

#[test]
fn no_pieces_no_moves_test() {
    let position = position_from_numbers(&[(32, Piece::BlackMan)]);
    assert!(position.legal_moves(Side::Red).is_empty());
    assert_eq!(position.game_result(Side::Red), Some(GameResult::BlackWin));
    assert_eq!(position.game_result(Side::Black), None);

    assert!(Position::empty().legal_moves(Side::Black).is_empty());
}

#[test]
fn blocked_side_has_no_moves_test() {
    // The red man on 1 can neither step nor jump
    let position = position_from_numbers(&[
        (1, Piece::RedMan),
        (5, Piece::BlackMan),
        (6, Piece::BlackMan),
        (10, Piece::BlackMan),
    ]);
    assert!(position.legal_moves(Side::Red).is_empty());
    assert_eq!(position.game_result(Side::Red), Some(GameResult::BlackWin));
    assert!(!position.legal_moves(Side::Black).is_empty());
}

#[test]
fn reverse_move_test() {
    let mut position = Position::start_position();
    do_moves_and_check_validity(&mut position, &EXCHANGE_OPENING[0..3]);
    let original = position;

    for mv in original.legal_moves(Side::Black) {
        let reverse_move = position.do_move(&mv);
        assert_ne!(position, original);
        for reply in position.legal_moves(Side::Red) {
            let child = position.apply(&reply);
            let reverse_reply = position.do_move(&reply);
            assert_eq!(position, child);
            position.reverse_move(reverse_reply);
        }
        position.reverse_move(reverse_move);
        assert_eq!(position, original);
    }
}

#[test]
fn apply_does_not_mutate_test() {
    let position = Position::start_position();
    for mv in position.legal_moves(Side::Red) {
        let child = position.apply(&mv);
        assert_ne!(child, position);
        assert_eq!(position, Position::start_position());
        assert_eq!(child[mv.destination_square()], Some(Piece::RedMan));
        assert_eq!(child[mv.origin_square()], None);
    }
}

#[test]
fn generated_moves_are_appended_test() {
    let position = Position::start_position();
    let mut moves = position.legal_moves(Side::Black);
    position.generate_moves(Side::Red, &mut moves);
    assert_eq!(moves.len(), 14);
}
