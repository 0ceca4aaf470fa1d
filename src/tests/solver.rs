use super::*;

use std::sync::atomic::{AtomicBool, Ordering};

fn small_table() -> Table {
    Table::anonymous(1 << 20).expect("anonymous table")
}

fn run(position: &Position, depth: i32, table: &mut Table) -> i8 {
    let stop = AtomicBool::new(false);
    search(position, depth, table, &stop).expect("search was not interrupted")
}

#[test]
fn the_initial_position_is_unresolved_at_depth_1() {
    let initial = Position::from_template("ELG C  c gle      ", true).unwrap();
    assert_eq!(run(&initial, 1, &mut small_table()), 0);
}

#[test]
fn capturing_the_lion_wins_at_depth_1() {
    let position = Position::from_template("L  G  l           ", true).unwrap();
    assert_eq!(run(&position, 1, &mut small_table()), 1);
}

#[test]
fn an_unanswered_try_wins_through_the_deeper_bonus() {
    let position = Position::from_template("   l    L         ", true).unwrap();
    let tried = position.apply(Move { from: 8, to: 11 });
    assert_eq!(tried.deeper(), 2);

    let mut table = small_table();
    // within the two bonus plies every reply loses to the surviving lion
    assert_eq!(run(&tried, 0, &mut table), -1);
    // so the try wins for the parent even at depth 1
    assert_eq!(run(&position, 1, &mut table), 1);
}

#[test]
fn a_guarded_try_is_refuted_within_the_bonus_window() {
    // the passive giraffe on 10 guards the goal square 11
    let position = Position::from_template("   l    L g       ", true).unwrap();
    let tried = position.apply(Move { from: 8, to: 11 });
    assert_eq!(tried.deeper(), 2);

    // the opponent recaptures the trying lion inside the bonus window
    assert_eq!(run(&tried, 0, &mut small_table()), 1);
}

#[test]
fn deeper_searches_never_weaken_a_verdict() {
    let mut table = small_table();
    let won = Position::from_template("L  G  l           ", true).unwrap();
    for depth in 1..=4 {
        assert_eq!(run(&won, depth, &mut table), 1, "weakened at depth {depth}");
    }

    let mut table = small_table();
    let initial = Position::from_template("ELG C  c gle      ", true).unwrap();
    let mut previous = -1i8;
    for depth in 1..=3 {
        let value = run(&initial, depth, &mut table);
        assert!(
            value >= previous,
            "value dropped from {previous} to {value} at depth {depth}"
        );
        previous = value;
    }
}

#[test]
fn an_interrupted_search_reports_nothing() {
    let initial = Position::from_template("ELG C  c gle      ", true).unwrap();
    let mut table = small_table();
    let stop = AtomicBool::new(false);
    stop.store(true, Ordering::Relaxed);
    assert_eq!(search(&initial, 5, &mut table, &stop), None);
    assert_eq!(table.counters.wins, 0);
    assert_eq!(table.counters.losses, 0);
}
