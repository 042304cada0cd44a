pub mod seat;
pub mod selection;
pub mod booking;

pub use seat::{RowNumber, Seat, SeatNumber, SeatStats};
pub use selection::{SelectionResult, SelectionStatus};
pub use booking::Booking;
