//! The bijection between legal positions and dense 35-bit table indices.
//!
//! Index layout, low bit first:
//!
//! - bit 0: side to move, 0 = sente;
//! - bits 1..20: ten 2-bit descriptors for the non-lion squares;
//! - bits 21..26: one ownership bit per non-lion piece, board then hand;
//! - bits 27..28: one promotion bit per chick in the same traversal;
//! - bits 29..34: lion-pair index in [0, 39).
//!
//! Everything below the lion pair is viewed from Sente's perspective; odd
//! indices are the images of even ones under the orientation flip.

use std::cmp::Reverse;

use crate::piece::{
    descriptor, Piece, ANIMAL_BY_DESCRIPTOR, BOARD_SQUARES, BOARD_WIDTH, CHICK, GOAL_RANK_START,
    GRID_SLOTS, HEN, LION, LION_PAIRS, LION_PAIR_COUNT, LION_PAIR_INDEX, NO_PAIR,
};
use crate::position::{flip_grid, Position, Terminality};

const LION_PAIR_SHIFT: u32 = 29;

/// Number of table indices: one byte each in the transposition table.
pub const TABLE_SIZE: u64 = (LION_PAIR_COUNT as u64) << LION_PAIR_SHIFT;

/// A table index, or the all-ones sentinel when the position's lion pair is
/// outside the enumerable space (such positions are terminal and never
/// stored).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TableIndex(pub u64);

impl TableIndex {
    pub const NONE: Self = Self(u64::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Canonical hand order: occupied slots first in descending animal tag,
/// empty slots last. The sort is stable, so equal animals keep the order the
/// decoder assigned them; a side tie-break would remap half of the
/// equal-animal ownership patterns and break the round-trip contract.
fn sort_hand(grid: &mut [Piece; GRID_SLOTS]) {
    grid[BOARD_SQUARES..].sort_by_key(|p| (p.is_empty(), Reverse(p.animal())));
}

impl Position {
    /// Encode into a table index. Works on a private copy of the grid: the
    /// copy is flipped to Sente's perspective when Gote is to move, and its
    /// hand is sorted into canonical order.
    pub fn encode(&self) -> TableIndex {
        let mut grid = self.grid;
        if !self.sente {
            flip_grid(&mut grid);
        }

        let lions = (
            find_board(&grid, Piece::active(LION)),
            find_board(&grid, Piece::passive(LION)),
        );
        let (Some(active_lion), Some(passive_lion)) = lions else {
            return TableIndex::NONE;
        };
        let pair = LION_PAIR_INDEX[active_lion][passive_lion];
        if pair == NO_PAIR {
            return TableIndex::NONE;
        }

        sort_hand(&mut grid);

        let mut h = pair as u64;

        for piece in grid.iter().rev() {
            let animal = piece.animal();
            if animal == CHICK || animal == HEN {
                h = (h << 1) | (animal == HEN) as u64;
            }
        }

        for piece in grid.iter().rev() {
            if !piece.is_empty() && piece.animal() != LION {
                h = (h << 1) | piece.is_passive() as u64;
            }
        }

        for piece in grid[..BOARD_SQUARES].iter().rev() {
            if piece.animal() != LION {
                h <<= 2;
                if !piece.is_empty() {
                    h |= descriptor(piece.animal());
                }
            }
        }

        TableIndex((h << 1) | !self.sente as u64)
    }

    /// Decode a table index, or `None` when the index violates a legality
    /// constraint: out of range, three copies of an animal on the board, a
    /// promoted chick in hand, or an un-promoted chick stranded on its own
    /// last rank.
    pub fn decode(index: u64) -> Option<Position> {
        if index >= TABLE_SIZE {
            return None;
        }

        let mut grid = [Piece::EMPTY; GRID_SLOTS];
        let (active_lion, passive_lion) = LION_PAIRS[(index >> LION_PAIR_SHIFT) as usize];
        grid[active_lion as usize] = Piece::active(LION);
        grid[passive_lion as usize] = Piece::passive(LION);

        let sente = index & 1 == 0;
        let mut h = index >> 1;

        let mut count = [0u32; 4];
        for square in 0..BOARD_SQUARES {
            if grid[square].is_empty() {
                let d = (h & 0b11) as usize;
                if d != 0 {
                    grid[square] = Piece::active(ANIMAL_BY_DESCRIPTOR[d]);
                    count[d] += 1;
                    if count[d] > 2 {
                        return None;
                    }
                }
                h >>= 2;
            }
        }

        // Top the population up to two of each animal; the leftovers land in
        // the hand in descending tag order, empties at the end.
        let mut d = 3;
        for slot in BOARD_SQUARES..GRID_SLOTS {
            while d > 0 && count[d] >= 2 {
                d -= 1;
            }
            grid[slot] = Piece::active(ANIMAL_BY_DESCRIPTOR[d]);
            count[d] += 1;
        }

        for piece in grid.iter_mut() {
            if !piece.is_empty() && piece.animal() != LION {
                if h & 1 != 0 {
                    *piece = piece.colour_flipped();
                }
                h >>= 1;
            }
        }

        for (slot, piece) in grid.iter_mut().enumerate() {
            if piece.animal() == CHICK {
                if h & 1 != 0 {
                    if slot >= BOARD_SQUARES {
                        return None;
                    }
                    *piece = piece.promoted();
                }
                h >>= 1;
            }
        }

        // A chick that reached its last rank would have promoted on arrival,
        // so an un-promoted one there has no legal predecessor.
        for square in GOAL_RANK_START..BOARD_SQUARES {
            if grid[square].is_active() && grid[square].animal() == CHICK {
                return None;
            }
        }
        for square in 0..BOARD_WIDTH {
            if grid[square].is_passive() && grid[square].animal() == CHICK {
                return None;
            }
        }

        if !sente {
            flip_grid(&mut grid);
        }

        Some(Position {
            grid,
            sente,
            deeper: 0,
            terminality: Terminality::Nonterminal,
        })
    }
}

fn find_board(grid: &[Piece; GRID_SLOTS], piece: Piece) -> Option<usize> {
    grid[..BOARD_SQUARES].iter().position(|p| *p == piece)
}
