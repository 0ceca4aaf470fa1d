//! Successor enumeration: board steps into the king neighborhood filtered by
//! the mover's move set, and drops from the hand onto empty squares.

use std::ops::ControlFlow;

use crate::piece::{may_step, BOARD_SQUARES, CHICK, ELEPHANT, GIRAFFE, GRID_SLOTS};
use crate::position::Position;

/// A half-move of the active player: `from` is a board square or a hand slot
/// (12..17, making the move a drop), `to` is always a board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: u8,
    pub to: u8,
}

impl Move {
    pub const fn is_drop(self) -> bool {
        self.from >= BOARD_SQUARES as u8
    }
}

impl Position {
    /// Visit every legal successor in a deterministic order: board squares
    /// ascending, then hand slots ascending; per board piece the eight
    /// neighborhood offsets ascending, per hand piece the destination squares
    /// ascending. The visitor may break early (fail-high).
    pub fn visit_children(
        &self,
        mut visitor: impl FnMut(Move, Position) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for from in 0..GRID_SLOTS {
            let piece = self.grid[from];
            if !piece.is_active() {
                continue;
            }
            // Two identical animals in hand would generate the same drops
            // twice; the first slot of a run covers them all. Slot 12 has no
            // predecessor in the hand.
            if from > BOARD_SQUARES && self.grid[from - 1].animal() == piece.animal() {
                continue;
            }

            if from < BOARD_SQUARES {
                self.visit_board_moves(from, &mut visitor)?;
            } else {
                self.visit_drops(from, &mut visitor)?;
            }
        }

        ControlFlow::Continue(())
    }

    fn visit_board_moves(
        &self,
        from: usize,
        visitor: &mut impl FnMut(Move, Position) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let piece = self.grid[from];
        for offset in 0..9 {
            if offset == 4 {
                continue;
            }
            // The 3-wide board must not wrap across files.
            if from % 3 == 0 && offset % 3 == 0 {
                continue;
            }
            if from % 3 == 2 && offset % 3 == 2 {
                continue;
            }
            let to = from as isize - 4 + offset as isize;
            if !(0..BOARD_SQUARES as isize).contains(&to) {
                continue;
            }
            let to = to as usize;
            if !may_step(piece.animal(), offset) {
                continue;
            }
            if self.grid[to].is_active() {
                continue;
            }
            let mv = Move {
                from: from as u8,
                to: to as u8,
            };
            visitor(mv, self.apply(mv))?;
        }
        ControlFlow::Continue(())
    }

    fn visit_drops(
        &self,
        from: usize,
        visitor: &mut impl FnMut(Move, Position) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        // Hens never sit in hand and lions never leave the board, so only
        // the three base animals can be dropped.
        if !matches!(self.grid[from].animal(), CHICK | ELEPHANT | GIRAFFE) {
            return ControlFlow::Continue(());
        }
        for to in 0..BOARD_SQUARES {
            if self.grid[to].is_empty() {
                let mv = Move {
                    from: from as u8,
                    to: to as u8,
                };
                visitor(mv, self.apply(mv))?;
            }
        }
        ControlFlow::Continue(())
    }
}
