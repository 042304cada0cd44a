use thiserror::Error;
use uuid::Uuid;

use crate::models::SeatNumber;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("requested seat count {requested} is outside 1..={max}")]
    InvalidRequest { requested: u32, max: u32 },

    #[error("seat {0} appears more than once in the snapshot")]
    DuplicateSeat(SeatNumber),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout must contain at least one row")]
    Empty,

    #[error("row {0} has no seats")]
    EmptyRow(u32),

    #[error("seat {0} appears more than once in the layout")]
    DuplicateSeat(SeatNumber),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitError {
    #[error("seat {0} does not exist")]
    UnknownSeat(SeatNumber),

    #[error("seat {0} is already booked")]
    SeatTaken(SeatNumber),

    #[error("seat {0} is listed twice")]
    DuplicateSeat(SeatNumber),
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid booking request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error("seats were taken concurrently, gave up after {attempts} attempts")]
    Conflict { attempts: u32 },

    #[error("booking {0} not found")]
    NotFound(Uuid),

    #[error("booking {0} belongs to another occupant")]
    Forbidden(Uuid),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
