use super::*;

use crate::instruction::create;
use crate::instruction::Instruction::{Hlt, Mux};

#[test]
fn selects_the_import_direction() {
    let cpu = run_single(&ops![Mux(5), Hlt]);
    assert_eq!(registers(&cpu, 0).status1.mux(), 5);
}

#[test]
fn accepts_one_offset_per_axis() {
    // The form the preprocessor produces from "MUX AFTER, CURRENT, CURRENT".
    let node = ("MUX".to_owned(), vec![1, 0, 0]);
    assert_eq!(create(&node).unwrap(), Mux(2));

    // BEFORE arrives two's complement wrapped.
    let node = ("MUX".to_owned(), vec![255, 0, 0]);
    assert_eq!(create(&node).unwrap(), Mux(1));

    let node = ("MUX".to_owned(), vec![0, 0, 0]);
    assert_eq!(create(&node).unwrap(), Mux(0));
}

#[test]
fn rejects_unencodable_tuples() {
    // Diagonal.
    let node = ("MUX".to_owned(), vec![1, 1, 0]);
    assert!(create(&node).is_err());

    // z BEFORE has no code.
    let node = ("MUX".to_owned(), vec![0, 0, 255]);
    assert!(create(&node).is_err());
}

#[test]
fn rejects_wide_codes() {
    let node = ("MUX".to_owned(), vec![8]);
    assert_eq!(
        *create(&node).unwrap_err().kind(),
        ExceptionKind::InvalidDirection(8)
    );
}

#[test]
fn rejects_two_arguments() {
    let node = ("MUX".to_owned(), vec![1, 0]);
    assert!(matches!(
        create(&node).unwrap_err().kind(),
        ExceptionKind::BadArity { .. }
    ));
}
