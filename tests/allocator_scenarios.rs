//! Сценарии подбора мест на типовых схемах вагона.
//!
//! Run with: `cargo test --test allocator_scenarios`

use std::collections::BTreeSet;

use seat_allocator::{allocate, AllocationError, Seat, SelectionResult, SelectionStatus};

/// `rows` рядов по 7 мест; `free_in_row(row)` возвращает номера позиций (1..=7),
/// которые свободны в этом ряду.
fn coach(rows: u32, free_in_row: impl Fn(u32) -> Vec<u32>) -> Vec<Seat> {
    let mut seats = Vec::new();
    for row in 1..=rows {
        let free = free_in_row(row);
        for col in 1..=7 {
            let number = (row - 1) * 7 + col;
            if free.contains(&col) {
                seats.push(Seat::free(number, row));
            } else {
                seats.push(Seat::booked(number, row, "someone"));
            }
        }
    }
    seats
}

fn no_exclusions() -> BTreeSet<u32> {
    BTreeSet::new()
}

#[test]
fn empty_coach_takes_front_of_first_row() {
    let seats = coach(10, |_| (1..=7).collect());

    let result = allocate(&seats, 5, &no_exclusions()).unwrap();

    assert_eq!(result.status, SelectionStatus::Exact);
    assert_eq!(result.seat_numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(result.rows, vec![1]);
    assert_eq!(result.shortfall, 0);
}

#[test]
fn skips_row_that_is_too_narrow() {
    let seats = coach(10, |row| if row == 1 { vec![1, 2, 3] } else { (1..=7).collect() });

    let result = allocate(&seats, 5, &no_exclusions()).unwrap();

    assert_eq!(result.seat_numbers, vec![8, 9, 10, 11, 12]);
    assert_eq!(result.span(), 1);
}

#[test]
fn single_row_beats_earlier_multi_row_combination() {
    let seats = coach(3, |row| match row {
        1 | 2 => vec![6, 7],
        _ => (1..=7).collect(),
    });

    let result = allocate(&seats, 4, &no_exclusions()).unwrap();

    assert_eq!(result.seat_numbers, vec![15, 16, 17, 18]);
    assert_eq!(result.rows, vec![3]);
}

#[test]
fn spreads_over_minimal_number_of_rows() {
    let seats = coach(10, |_| vec![1, 2, 3]);

    let result = allocate(&seats, 7, &no_exclusions()).unwrap();

    assert_eq!(result.status, SelectionStatus::Exact);
    assert_eq!(result.seat_numbers, vec![1, 2, 3, 8, 9, 10, 15]);
    assert_eq!(result.rows, vec![1, 2, 3]);
    assert_eq!(result.span(), 3);
}

#[test]
fn reports_shortfall_when_coach_is_almost_full() {
    let seats = coach(10, |row| match row {
        1 => vec![5],
        6 => vec![5],
        _ => vec![],
    });

    let result = allocate(&seats, 5, &no_exclusions()).unwrap();

    assert_eq!(result.status, SelectionStatus::Partial);
    assert_eq!(result.seat_numbers, vec![5, 40]);
    assert_eq!(result.shortfall, 3);
}

#[test]
fn fully_booked_coach_yields_none() {
    let seats = coach(10, |_| vec![]);

    let result = allocate(&seats, 3, &no_exclusions()).unwrap();

    assert_eq!(result, SelectionResult::none(3));
    assert!(result.seat_numbers.is_empty());
}

#[test]
fn request_larger_than_coach() {
    let seats = vec![Seat::free(1, 1), Seat::free(2, 1), Seat::free(3, 1)];

    let result = allocate(&seats, 7, &no_exclusions()).unwrap();

    assert_eq!(result.status, SelectionStatus::Partial);
    assert_eq!(result.seat_numbers, vec![1, 2, 3]);
    assert_eq!(result.shortfall, 4);
}

#[test]
fn gaps_in_row_numbers_fall_back_to_partial() {
    // ряды 1, 3, 5 по два свободных места, рядов 2 и 4 нет
    let seats = vec![
        Seat::free(1, 1),
        Seat::free(2, 1),
        Seat::free(15, 3),
        Seat::free(16, 3),
        Seat::free(29, 5),
        Seat::free(30, 5),
    ];

    let result = allocate(&seats, 5, &no_exclusions()).unwrap();

    assert_eq!(result.status, SelectionStatus::Partial);
    assert_eq!(result.seat_numbers, vec![1, 2]);
    assert_eq!(result.shortfall, 3);
}

#[test]
fn held_seats_are_treated_as_taken() {
    let seats = coach(2, |_| (1..=7).collect());
    let held: BTreeSet<u32> = [1, 2, 3].into_iter().collect();

    let result = allocate(&seats, 5, &held).unwrap();

    assert_eq!(result.seat_numbers, vec![8, 9, 10, 11, 12]);
}

#[test]
fn result_does_not_depend_on_snapshot_order() {
    let seats = coach(6, |row| if row % 2 == 0 { vec![2, 4] } else { vec![7] });
    let mut reversed = seats.clone();
    reversed.reverse();

    let first = allocate(&seats, 6, &no_exclusions()).unwrap();
    let again = allocate(&seats, 6, &no_exclusions()).unwrap();
    let from_reversed = allocate(&reversed, 6, &no_exclusions()).unwrap();

    assert_eq!(first, again);
    assert_eq!(first, from_reversed);
}

#[test]
fn invalid_counts_are_rejected() {
    let seats = coach(1, |_| (1..=7).collect());

    assert!(matches!(
        allocate(&seats, 0, &no_exclusions()),
        Err(AllocationError::InvalidRequest { requested: 0, .. })
    ));
    assert!(matches!(
        allocate(&seats, 8, &no_exclusions()),
        Err(AllocationError::InvalidRequest { requested: 8, .. })
    ));
}
