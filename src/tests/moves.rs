use super::*;

use std::ops::ControlFlow;

use rand::Rng;

use crate::piece::{BOARD_SQUARES, HEN, LION};

fn children(position: &Position) -> Vec<(Move, Position)> {
    let mut out = Vec::new();
    let _ = position.visit_children(|mv, child| {
        out.push((mv, child));
        ControlFlow::Continue(())
    });
    out
}

#[test]
fn the_initial_position_has_four_moves() {
    let initial = Position::from_template("ELG C  c gle      ", true).unwrap();
    let moves: Vec<String> = children(&initial)
        .iter()
        .map(|(mv, _)| mv.pretty().to_string())
        .collect();
    assert_eq!(moves, ["1->3", "1->5", "2->5", "4->7"]);
}

#[test]
fn capturing_the_lion_is_terminal_and_the_chick_promotes() {
    let position = Position::from_template("L  g  C  l        ", true).unwrap();
    let (mv, child) = children(&position)
        .into_iter()
        .find(|(mv, _)| mv.to == 9)
        .expect("the chick can step onto the lion");

    assert_eq!(mv.from, 6);
    assert_eq!(child.terminality(), Terminality::Lost);
    // after the flip: the promoted chick sits on square 2, the captured lion
    // in the first hand slot, both owned by the previous mover
    assert_eq!(child.piece_at(2), Piece::passive(HEN));
    assert_eq!(child.piece_at(BOARD_SQUARES), Piece::passive(LION));
}

#[test]
fn duplicate_hand_animals_drop_once() {
    let position = Position::from_template("L    l      CC    ", true).unwrap();
    let drops: Vec<Move> = children(&position)
        .into_iter()
        .map(|(mv, _)| mv)
        .filter(|mv| mv.is_drop())
        .collect();

    // ten empty squares, and only the first of the two chicks generates
    assert_eq!(drops.len(), 10);
    for mv in &drops {
        assert_eq!(mv.from as usize, BOARD_SQUARES);
        assert!(position.piece_at(mv.to as usize).is_empty());
    }
}

#[test]
fn every_child_keeps_the_movers_lion_on_the_board() {
    let initial = Position::from_template("ELG C  c gle      ", true).unwrap();
    for (mv, child) in children(&initial) {
        let lion = (0..BOARD_SQUARES).find(|&sq| child.piece_at(sq) == Piece::passive(LION));
        assert!(
            lion.is_some(),
            "move {} removed the mover's own lion",
            mv.pretty()
        );
    }
}

#[test]
fn a_move_never_lands_on_a_friendly_piece() {
    let mut prng = deterministic_prng();
    let mut checked = 0;
    while checked < 500 {
        let Some(position) = Position::decode(prng.gen_range(0..TABLE_SIZE)) else {
            continue;
        };
        checked += 1;

        for (mv, _) in children(&position) {
            let target = position.piece_at(mv.to as usize);
            assert!(
                !target.is_active(),
                "move {} captures a friendly piece",
                mv.pretty()
            );
            if mv.is_drop() {
                assert!(target.is_empty(), "drop {} onto an occupied square", mv.pretty());
            }
        }
    }
}
