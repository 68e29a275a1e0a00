extern crate arrayvec;
extern crate rand;

pub mod error;
pub mod evaluation;
pub mod game;
pub mod position;
pub mod search;
mod tests;
