use serde::{Deserialize, Serialize};

pub type SeatNumber = u32;
pub type RowNumber = u32;

/// Место в схеме вагона. Номер места выдаётся один раз при создании схемы.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    #[serde(alias = "id")]
    pub seat_number: SeatNumber,
    #[serde(alias = "row")]
    pub row_number: RowNumber,
    #[serde(alias = "is_booked", default)]
    pub occupied: bool,
    #[serde(alias = "booked_by", default)]
    pub occupant: Option<String>,
}

impl Seat {
    pub fn free(seat_number: SeatNumber, row_number: RowNumber) -> Self {
        Self {
            seat_number,
            row_number,
            occupied: false,
            occupant: None,
        }
    }

    pub fn booked(seat_number: SeatNumber, row_number: RowNumber, occupant: impl Into<String>) -> Self {
        Self {
            seat_number,
            row_number,
            occupied: true,
            occupant: Some(occupant.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeatStats {
    pub total: usize,
    pub booked: usize,
    pub available: usize,
}
