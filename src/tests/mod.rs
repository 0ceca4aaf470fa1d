use super::*;

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

mod moves;
mod solver;

fn deterministic_prng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(0x5EED_CAFE)
}

#[test]
fn the_initial_position_renders_correctly() {
    let initial = Position::from_template("ELG C  c gle      ", true).unwrap();
    insta::assert_snapshot!(initial.pretty(), @r"
    |---|
    |gle|
    | c |
    | C |
    |ELG|
    |---|
    hand: -
    sente to move
    ");
}

#[test]
fn the_mirrored_initial_position_renders_correctly() {
    let initial = Position::from_template("ELG C  c gle      ", true).unwrap();
    insta::assert_snapshot!(initial.mirrored().pretty(), @r"
    |---|
    |gle|
    | c |
    | C |
    |ELG|
    |---|
    hand: -
    gote to move
    ");
}

#[test]
fn index_zero_renders_correctly() {
    let position = Position::decode(0).unwrap();
    insta::assert_snapshot!(position.pretty(), @r"
    |---|
    |   |
    |   |
    |  l|
    |L  |
    |---|
    hand: GGEECC
    sente to move
    ");
}
