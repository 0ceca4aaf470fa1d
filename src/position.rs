//! The in-memory position: an 18-slot grid (12 board squares plus the shared
//! 6-slot hand) kept mover-canonical, and the move applier.

use thiserror::Error;

use crate::moves::Move;
use crate::piece::{Piece, BOARD_SQUARES, CHICK, GOAL_RANK_START, GRID_SLOTS, LION};

/// Structural game outcome for the side to move, stamped by the move applier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminality {
    Nonterminal,
    /// The mover's lion survived one ply on the goal rank.
    Won,
    /// The mover's lion was captured on the previous ply.
    Lost,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("board string longer than 18 characters")]
    TooLong,
    #[error("unknown piece character {ch:?} at slot {slot}")]
    UnknownPiece { ch: char, slot: usize },
}

/// A game position. The grid is mover-canonical: the active (side to move)
/// pieces always travel toward squares 9..11, and `sente` records which real
/// player the mover is. `deeper` and `terminality` are solver bookkeeping and
/// take no part in equality.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    pub(crate) grid: [Piece; GRID_SLOTS],
    pub(crate) sente: bool,
    pub(crate) deeper: i32,
    pub(crate) terminality: Terminality,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid && self.sente == other.sente
    }
}

impl Eq for Position {}

/// Reverse the board squares and hand every piece to the other player, so
/// the opponent becomes the active side.
pub(crate) fn flip_grid(grid: &mut [Piece; GRID_SLOTS]) {
    grid[..BOARD_SQUARES].reverse();
    for piece in grid.iter_mut() {
        if !piece.is_empty() {
            *piece = piece.colour_flipped();
        }
    }
}

impl Position {
    /// Parse an 18-character template: squares 0..11 then the hand. Active
    /// pieces are uppercase; shorter strings leave the tail empty.
    pub fn from_template(s: &str, sente: bool) -> Result<Self, ParseBoardError> {
        let mut grid = [Piece::EMPTY; GRID_SLOTS];
        for (slot, ch) in s.chars().enumerate() {
            if slot >= GRID_SLOTS {
                return Err(ParseBoardError::TooLong);
            }
            grid[slot] =
                Piece::from_char(ch).ok_or(ParseBoardError::UnknownPiece { ch, slot })?;
        }
        Ok(Self {
            grid,
            sente,
            deeper: 0,
            terminality: Terminality::Nonterminal,
        })
    }

    /// True when the mover is the real Sente player.
    pub fn sente(&self) -> bool {
        self.sente
    }

    /// Depth bonus for the try rule; folded into the budget at every lookup
    /// and recursion step.
    pub fn deeper(&self) -> i32 {
        self.deeper
    }

    pub fn terminality(&self) -> Terminality {
        self.terminality
    }

    pub fn piece_at(&self, slot: usize) -> Piece {
        self.grid[slot]
    }

    /// The same game position seen from the other player: squares reversed,
    /// colours toggled, side to move swapped.
    pub fn mirrored(&self) -> Self {
        let mut grid = self.grid;
        flip_grid(&mut grid);
        Self {
            grid,
            sente: !self.sente,
            deeper: self.deeper,
            terminality: self.terminality,
        }
    }

    /// First slot in `range` holding exactly `piece`.
    pub(crate) fn find(&self, piece: Piece, range: std::ops::Range<usize>) -> Option<usize> {
        self.grid[range.clone()]
            .iter()
            .position(|p| *p == piece)
            .map(|i| range.start + i)
    }

    /// Apply a generated move and hand the turn over. Captures enter the
    /// first empty hand slot un-promoted and colour-flipped; a chick reaching
    /// the goal rank promotes; a lion reaching it marks the child for two
    /// extra plies of search. The child is stamped terminal when a lion was
    /// captured or when the new mover's lion survived on its goal rank.
    pub fn apply(&self, mv: Move) -> Position {
        let mut grid = self.grid;
        let mut terminality = Terminality::Nonterminal;
        let mut deeper = 0;

        let from = mv.from as usize;
        let to = mv.to as usize;

        let captured = grid[to];
        if !captured.is_empty() {
            if captured.animal() == LION {
                terminality = Terminality::Lost;
            }
            // The hand can only be full when every non-lion piece has been
            // captured, and then the only capture left is the lion itself.
            if let Some(slot) = self.find(Piece::EMPTY, BOARD_SQUARES..GRID_SLOTS) {
                grid[slot] = captured.demoted().colour_flipped();
            }
        }

        grid[to] = grid[from];
        grid[from] = Piece::EMPTY;

        if to >= GOAL_RANK_START {
            if grid[to].animal() == CHICK {
                grid[to] = grid[to].promoted();
            }
            if grid[to].animal() == LION {
                deeper = 2;
            }
        }

        flip_grid(&mut grid);

        for square in GOAL_RANK_START..BOARD_SQUARES {
            if grid[square].is_active() && grid[square].animal() == LION {
                terminality = Terminality::Won;
                break;
            }
        }

        Position {
            grid,
            sente: !self.sente,
            deeper,
            terminality,
        }
    }
}
