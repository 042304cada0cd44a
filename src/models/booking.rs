use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::seat::SeatNumber;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub occupant: String,
    pub seat_numbers: Vec<SeatNumber>,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(occupant: impl Into<String>, seat_numbers: Vec<SeatNumber>) -> Self {
        Self {
            id: Uuid::new_v4(),
            occupant: occupant.into(),
            seat_numbers,
            booked_at: Utc::now(),
        }
    }
}
