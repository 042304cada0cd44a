pub mod booking;

pub use booking::{AutoBookRequest, BookingOutcome, BookingService, ManualBookRequest, ResetSummary};
