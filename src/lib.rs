pub mod allocator;
pub mod config;
pub mod error;
pub mod models;
pub mod seat_map;
pub mod services;

use std::sync::Arc;
use tracing::info;

pub use allocator::{allocate, MAX_SEATS_PER_REQUEST};
pub use error::{AllocationError, BookingError};
pub use models::{Seat, SelectionResult, SelectionStatus};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub bookings: services::BookingService,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, BookingError> {
        let seat_map = seat_map::SeatMap::from_layout(&config.layout)?;
        let bookings = services::BookingService::new(seat_map, config.booking.clone());

        info!("Booking service ready ({} environment)", config.app.environment);

        Ok(Arc::new(Self { config, bookings }))
    }
}
