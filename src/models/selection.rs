use serde::Serialize;

use super::seat::{RowNumber, SeatNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    /// Подобрано ровно столько мест, сколько запрошено
    Exact,
    /// Подобрана только часть, см. `shortfall`
    Partial,
    /// Свободных мест нет
    None,
}

/// Результат одного вызова аллокатора. Места идут в порядке обхода:
/// по возрастанию ряда, внутри ряда по возрастанию номера.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub status: SelectionStatus,
    pub seat_numbers: Vec<SeatNumber>,
    pub requested: u32,
    pub shortfall: u32,
    pub rows: Vec<RowNumber>,
}

impl SelectionResult {
    pub fn none(requested: u32) -> Self {
        Self {
            status: SelectionStatus::None,
            seat_numbers: Vec::new(),
            requested,
            shortfall: requested,
            rows: Vec::new(),
        }
    }

    /// Собирает результат из выбранных мест вида (ряд, место).
    pub fn from_picks(requested: u32, picks: &[(RowNumber, SeatNumber)]) -> Self {
        if picks.is_empty() {
            return Self::none(requested);
        }

        let granted = picks.len() as u32;
        let status = if granted >= requested {
            SelectionStatus::Exact
        } else {
            SelectionStatus::Partial
        };

        let mut rows: Vec<RowNumber> = picks.iter().map(|(row, _)| *row).collect();
        rows.dedup();

        Self {
            status,
            seat_numbers: picks.iter().map(|(_, seat)| *seat).collect(),
            requested,
            shortfall: requested.saturating_sub(granted),
            rows,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.status == SelectionStatus::Exact
    }

    pub fn is_empty(&self) -> bool {
        self.seat_numbers.is_empty()
    }

    /// Количество задействованных подряд идущих рядов (включительно).
    pub fn span(&self) -> u32 {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => last - first + 1,
            _ => 0,
        }
    }
}
