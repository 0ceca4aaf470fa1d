//! A strong endgame solver for Dōbutsu shōgi.
//!
//! Every legal position maps bijectively (up to the orientation flip that
//! makes the side to move the "bottom" player) to a dense 35-bit index; a
//! one-byte-per-index table, memory-mapped from a file when persistence is
//! wanted, memoizes the negamax value of each position together with the
//! depth at which it was established.

mod codec;
mod moves;
mod piece;
mod position;
mod pretty;
mod solver;
mod table;

pub use codec::{TableIndex, TABLE_SIZE};
pub use moves::Move;
pub use piece::Piece;
pub use position::{ParseBoardError, Position, Terminality};
pub use pretty::{IntoPretty, Pretty};
pub use solver::search;
pub use table::{Counters, Table, LEGAL, LOSS, WIN};

#[cfg(test)]
mod tests;
