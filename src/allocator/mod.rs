//! allocator
//!
//! Подбор мест под одну заявку по снимку схемы вагона.
//!
//! Порядок поиска:
//! 1.  **Один ряд**: первый (самый верхний) ряд, где свободных мест хватает на всю заявку.
//! 2.  **Подряд идущие ряды**: минимальный по числу рядов непрерывный отрезок,
//!     при равенстве побеждает отрезок с меньшим начальным рядом.
//!
//! Аллокатор ничего не меняет: места помечает занятыми вызывающая сторона
//! после повторной проверки на актуальном состоянии.

pub mod single_row;
pub mod span;

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::error::AllocationError;
use crate::models::{RowNumber, Seat, SeatNumber, SelectionResult};

/// Максимум мест в одной заявке.
pub const MAX_SEATS_PER_REQUEST: u32 = 7;

/// Подходящие места по рядам: ряды по возрастанию, места внутри ряда по возрастанию.
/// Ряды без свободных мест тоже присутствуют (с пустым списком), иначе нельзя
/// отличить полностью занятый ряд от разрыва в нумерации.
pub type EligibleRows = BTreeMap<RowNumber, Vec<SeatNumber>>;

/// Выбранное место вместе с рядом.
pub type Pick = (RowNumber, SeatNumber);

pub fn allocate(
    snapshot: &[Seat],
    requested: u32,
    excluded: &BTreeSet<SeatNumber>,
) -> Result<SelectionResult, AllocationError> {
    if requested == 0 || requested > MAX_SEATS_PER_REQUEST {
        return Err(AllocationError::InvalidRequest {
            requested,
            max: MAX_SEATS_PER_REQUEST,
        });
    }

    let rows = eligible_rows(snapshot, excluded)?;
    let available: usize = rows.values().map(Vec::len).sum();

    if available == 0 {
        info!("No seats available for a request of {}", requested);
        return Ok(SelectionResult::none(requested));
    }

    // Больше, чем есть, всё равно не набрать
    let target = (requested as usize).min(available);
    if target < requested as usize {
        warn!("Only {} of {} requested seats are available", available, requested);
    }

    let picks = match single_row::find(&rows, target) {
        Some(picks) => {
            debug!("Single-row fit for {} seats in row {}", target, picks[0].0);
            picks
        }
        None => match span::find(&rows, target) {
            Some(candidate) => {
                debug!(
                    "Span fit: {} seats from row {} across {} rows",
                    candidate.picks.len(),
                    candidate.start,
                    candidate.span
                );
                candidate.picks
            }
            None => Vec::new(),
        },
    };

    let result = SelectionResult::from_picks(requested, &picks);
    if result.shortfall > 0 {
        warn!(
            "Could not allocate all {} seats, allocated {}",
            requested,
            result.seat_numbers.len()
        );
    }

    Ok(result)
}

/// Группирует снимок по рядам, оставляя только свободные и не исключённые места.
pub fn eligible_rows(
    snapshot: &[Seat],
    excluded: &BTreeSet<SeatNumber>,
) -> Result<EligibleRows, AllocationError> {
    let mut seen = BTreeSet::new();
    let mut rows = EligibleRows::new();

    for seat in snapshot {
        if !seen.insert(seat.seat_number) {
            return Err(AllocationError::DuplicateSeat(seat.seat_number));
        }

        let row = rows.entry(seat.row_number).or_default();
        if !seat.occupied && !excluded.contains(&seat.seat_number) {
            row.push(seat.seat_number);
        }
    }

    // Снимок может прийти в любом порядке
    for seats in rows.values_mut() {
        seats.sort_unstable();
    }

    Ok(rows)
}
