//! Negamax with depth-tagged memoization through the transposition table.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::position::{Position, Terminality};
use crate::table::Table;

/// Game value for the side to move: −1 loss, 0 draw at this depth, +1 win.
/// Returns `None` when the stop flag was observed; nothing is stored for the
/// unwound part of the tree.
pub fn search(
    position: &Position,
    depth: i32,
    table: &mut Table,
    stop: &AtomicBool,
) -> Option<i8> {
    match position.terminality() {
        Terminality::Won => return Some(1),
        Terminality::Lost => return Some(-1),
        Terminality::Nonterminal => {}
    }

    if stop.load(Ordering::Relaxed) {
        return None;
    }

    let index = position.encode();
    let budget = depth + position.deeper();
    if let Some(result) = table.query(index, budget) {
        return Some(result);
    }
    if budget <= 0 {
        return Some(0);
    }

    let mut best: i8 = -1;
    let mut interrupted = false;
    let _ = position.visit_children(|_, child| {
        match search(&child, depth - 1 + position.deeper(), &mut *table, stop) {
            None => {
                interrupted = true;
                ControlFlow::Break(())
            }
            Some(value) => {
                if -value > best {
                    best = -value;
                }
                if best > 0 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        }
    });
    if interrupted {
        return None;
    }

    let byte = table.enter(index, budget, best);
    log::debug!("{:#x} depth {budget} -> {best} (byte {byte:#04x})", index.0);

    Some(best)
}
