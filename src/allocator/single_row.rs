use super::{EligibleRows, Pick};

/// Первый ряд (по возрастанию номера), в котором хватает мест на `target`.
/// Берутся первые `target` мест этого ряда.
pub fn find(rows: &EligibleRows, target: usize) -> Option<Vec<Pick>> {
    if target == 0 {
        return None;
    }

    rows.iter()
        .find(|(_, seats)| seats.len() >= target)
        .map(|(row, seats)| seats[..target].iter().map(|seat| (*row, *seat)).collect())
}
