//! Human-readable rendering, kept out of the core types.

use std::fmt::{self, Debug, Display, Formatter};

use crate::moves::Move;
use crate::piece::{BOARD_SQUARES, BOARD_WIDTH, GRID_SLOTS};
use crate::position::Position;

#[derive(Clone, Copy)]
pub struct Pretty<T>(pub T);

pub trait IntoPretty: Sized {
    fn pretty(self) -> Pretty<Self>;
}

impl IntoPretty for Position {
    fn pretty(self) -> Pretty<Self> {
        Pretty(self)
    }
}

impl IntoPretty for Move {
    fn pretty(self) -> Pretty<Self> {
        Pretty(self)
    }
}

impl Display for Pretty<Position> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "|---|")?;
        for row in (0..BOARD_SQUARES / BOARD_WIDTH).rev() {
            let square = row * BOARD_WIDTH;
            write!(f, "|")?;
            for col in 0..BOARD_WIDTH {
                write!(f, "{}", self.0.piece_at(square + col).to_char())?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "|---|")?;

        write!(f, "hand: ")?;
        let mut any = false;
        for slot in BOARD_SQUARES..GRID_SLOTS {
            let piece = self.0.piece_at(slot);
            if !piece.is_empty() {
                write!(f, "{}", piece.to_char())?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }
        writeln!(f)?;

        write!(
            f,
            "{} to move",
            if self.0.sente() { "sente" } else { "gote" }
        )
    }
}

impl Debug for Pretty<Position> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self, f)
    }
}

impl Display for Pretty<Move> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_drop() {
            write!(f, "*{}", self.0.to)
        } else {
            write!(f, "{}->{}", self.0.from, self.0.to)
        }
    }
}

impl Debug for Pretty<Move> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self, f)
    }
}
