//! A game between a human and the engine.
//!
//! `Game` owns the authoritative position. Moves from the human are validated against the rules
//! engine before they are applied, and the engine's moves are checked against the current
//! position when they are handed back from the search thread.

use std::thread;

use log::{info, warn};

use crate::position::{GameResult, Move, MoveError, Position, Side, Square};
use crate::search::{self, SearchOutcome, SearchSettings};

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    side_to_move: Side,
    settings: SearchSettings,
    moves: Vec<Move>,
    result: Option<GameResult>,
}

impl Game {
    /// A new game from the start position, with red to move.
    /// The engine plays the settings' maximizing side.
    pub fn new(settings: SearchSettings) -> Self {
        Self::from_position(Position::start_position(), Side::Red, settings)
    }

    pub fn from_position(position: Position, side_to_move: Side, settings: SearchSettings) -> Self {
        Game {
            position,
            side_to_move,
            settings,
            moves: vec![],
            result: position.game_result(side_to_move),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// All the moves played in the game
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn engine_side(&self) -> Side {
        self.settings.get_maximizing_side()
    }

    pub fn is_engine_turn(&self) -> bool {
        self.result.is_none() && self.side_to_move == self.engine_side()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.result.is_some() {
            return vec![];
        }
        self.position.legal_moves(self.side_to_move)
    }

    /// Plays a human move given as a pair of squares
    pub fn play_human(&mut self, from: Square, to: Square) -> Result<&Move, MoveError> {
        self.check_human_turn()?;
        let mv = self
            .position
            .find_move(self.side_to_move, from, to)
            .map_err(|err| {
                warn!("Rejected move {}-{}: {}", from, to, err);
                err
            })?;
        Ok(self.commit(mv))
    }

    /// Plays a human move given in standard notation
    pub fn play_notation(&mut self, input: &str) -> Result<&Move, MoveError> {
        self.check_human_turn()?;
        let mv = self
            .position
            .move_from_str(self.side_to_move, input)
            .map_err(|err| {
                warn!("Rejected move \"{}\": {}", input.trim(), err);
                err
            })?;
        Ok(self.commit(mv))
    }

    /// Searches on the current thread and plays the engine's move.
    pub fn play_engine(&mut self) -> Result<SearchOutcome, MoveError> {
        self.check_engine_turn()?;
        let outcome = search::best_move(&self.position, self.side_to_move, &self.settings);
        self.apply_engine_move(outcome.clone())?;
        Ok(outcome)
    }

    /// Starts the engine's search on a separate thread, using a copy of the current position.
    /// Hand the outcome back with `apply_engine_move`.
    pub fn spawn_engine_search(&self) -> thread::JoinHandle<SearchOutcome> {
        let position = self.position;
        let side = self.side_to_move;
        let settings = self.settings.clone();
        thread::spawn(move || search::best_move(&position, side, &settings))
    }

    /// Applies a search outcome to the game. The move must still be legal in the current position,
    /// and `NoLegalMoves` is only accepted when the side to move really has no moves.
    pub fn apply_engine_move(&mut self, outcome: SearchOutcome) -> Result<Option<&Move>, MoveError> {
        self.check_engine_turn()?;
        match outcome {
            SearchOutcome::Move { mv, .. } => {
                if !self.position.legal_moves(self.side_to_move).contains(&mv) {
                    return Err(MoveError::Illegal {
                        from: mv.origin_square(),
                        to: mv.destination_square(),
                    });
                }
                Ok(Some(self.commit(mv)))
            }
            SearchOutcome::NoLegalMoves => match self.position.game_result(self.side_to_move) {
                Some(result) => {
                    info!("Game over, {} has no moves: {}", self.side_to_move, result);
                    self.result = Some(result);
                    Ok(None)
                }
                None => Err(MoveError::StaleOutcome(self.side_to_move)),
            },
        }
    }

    fn check_human_turn(&self) -> Result<(), MoveError> {
        if self.result.is_some() {
            Err(MoveError::GameOver)
        } else if self.side_to_move == self.engine_side() {
            Err(MoveError::NotYourTurn(self.engine_side()))
        } else {
            Ok(())
        }
    }

    fn check_engine_turn(&self) -> Result<(), MoveError> {
        if self.result.is_some() {
            Err(MoveError::GameOver)
        } else if self.side_to_move != self.engine_side() {
            Err(MoveError::NotYourTurn(self.side_to_move))
        } else {
            Ok(())
        }
    }

    fn commit(&mut self, mv: Move) -> &Move {
        self.position.do_move(&mv);
        self.side_to_move = !self.side_to_move;
        self.result = self.position.game_result(self.side_to_move);
        if let Some(result) = self.result {
            info!("Game over after {}: {}", mv, result);
        }
        self.moves.push(mv);
        &self.moves[self.moves.len() - 1]
    }
}
