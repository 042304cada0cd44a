//! booking.rs
//!
//! Сервисный слой вокруг аллокатора. Сам аллокатор чистый, поэтому вся работа
//! с состоянием здесь:
//! 1.  Снимок схемы берётся под блокировкой чтения, подбор идёт уже без блокировки.
//! 2.  Фиксация под блокировкой записи заново проверяет каждое место. Если место
//!     успели занять, подбор повторяется на свежем снимке (до `commit_retries` раз).
//! 3.  Учёт бронирований: ручная бронь, отмена владельцем, история, полный сброс.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    allocator,
    config::BookingConfig,
    error::{BookingError, CommitError},
    models::{Booking, Seat, SeatNumber, SeatStats, SelectionResult},
    seat_map::SeatMap,
};

/// Заявка на автоматический подбор мест.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AutoBookRequest {
    #[validate(length(min = 1))]
    pub occupant: String,
    #[validate(range(min = 1, max = 7))]
    pub seat_count: u32,
    /// Места, которые заявитель уже держит; аллокатор их пропускает
    #[serde(default)]
    pub held: Vec<SeatNumber>,
    /// Бронировать ли часть, если всех мест не набралось
    #[serde(default = "default_accept_partial")]
    pub accept_partial: bool,
}

fn default_accept_partial() -> bool {
    true
}

impl AutoBookRequest {
    pub fn new(occupant: impl Into<String>, seat_count: u32) -> Self {
        Self {
            occupant: occupant.into(),
            seat_count,
            held: Vec::new(),
            accept_partial: true,
        }
    }
}

/// Ручная бронь конкретных мест.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ManualBookRequest {
    #[validate(length(min = 1))]
    pub occupant: String,
    #[validate(length(min = 1, max = 7))]
    pub seat_numbers: Vec<SeatNumber>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub selection: SelectionResult,
    /// `None`, если бронировать было нечего или частичный подбор отклонён
    pub booking: Option<Booking>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    pub seats_reset: usize,
    pub bookings_deleted: usize,
}

#[derive(Clone)]
pub struct BookingService {
    seats: Arc<RwLock<SeatMap>>,
    bookings: Arc<RwLock<BTreeMap<Uuid, Booking>>>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(seat_map: SeatMap, config: BookingConfig) -> Self {
        Self {
            seats: Arc::new(RwLock::new(seat_map)),
            bookings: Arc::new(RwLock::new(BTreeMap::new())),
            config,
        }
    }

    pub async fn auto_book(&self, req: AutoBookRequest) -> Result<BookingOutcome, BookingError> {
        req.validate()?;

        let excluded: BTreeSet<SeatNumber> = req.held.iter().copied().collect();
        let attempts = self.config.commit_retries + 1;

        for attempt in 1..=attempts {
            let snapshot = self.seats.read().await.snapshot();
            let selection = allocator::allocate(&snapshot, req.seat_count, &excluded)?;

            if selection.is_empty() {
                info!("No seats available for {}", req.occupant);
                return Ok(BookingOutcome { selection, booking: None });
            }

            if !selection.is_exact() && !req.accept_partial {
                info!(
                    "Partial selection of {}/{} seats declined by {}",
                    selection.seat_numbers.len(),
                    req.seat_count,
                    req.occupant
                );
                return Ok(BookingOutcome { selection, booking: None });
            }

            let committed = self
                .commit_and_record(&req.occupant, selection.seat_numbers.clone())
                .await;

            match committed {
                Ok(booking) => {
                    info!(
                        "Booked {} seats in rows {:?} for {} (booking {})",
                        booking.seat_numbers.len(),
                        selection.rows,
                        booking.occupant,
                        booking.id
                    );
                    return Ok(BookingOutcome { selection, booking: Some(booking) });
                }
                Err(CommitError::SeatTaken(seat)) => {
                    // Снимок устарел, пробуем заново
                    warn!(
                        "Seat {} was taken before commit (attempt {}/{}), retrying",
                        seat, attempt, attempts
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!("Giving up auto-book for {} after {} attempts", req.occupant, attempts);
        Err(BookingError::Conflict { attempts })
    }

    pub async fn book_seats(&self, req: ManualBookRequest) -> Result<Booking, BookingError> {
        req.validate()?;

        let booking = self.commit_and_record(&req.occupant, req.seat_numbers).await?;
        info!("Booked seats {:?} for {}", booking.seat_numbers, booking.occupant);
        Ok(booking)
    }

    /// Отмена брони. Отменить может только владелец.
    pub async fn cancel(&self, booking_id: Uuid, occupant: &str) -> Result<Booking, BookingError> {
        let mut bookings = self.bookings.write().await;

        let booking = match bookings.entry(booking_id) {
            Entry::Vacant(_) => return Err(BookingError::NotFound(booking_id)),
            Entry::Occupied(entry) if entry.get().occupant != occupant => {
                return Err(BookingError::Forbidden(booking_id));
            }
            Entry::Occupied(entry) => entry.remove(),
        };

        let freed = self
            .seats
            .write()
            .await
            .release(&booking.seat_numbers, &booking.occupant);
        info!("Booking {} cancelled, {} seats released", booking_id, freed);
        Ok(booking)
    }

    /// Бронирования заявителя, новые первыми
    pub async fn history(&self, occupant: &str) -> Vec<Booking> {
        let bookings = self.bookings.read().await;
        let mut history: Vec<Booking> = bookings
            .values()
            .filter(|booking| booking.occupant == occupant)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.booked_at.cmp(&a.booked_at).then_with(|| a.id.cmp(&b.id)));
        history
    }

    pub async fn reset(&self) -> ResetSummary {
        warn!("RESET: releasing all seats and deleting all bookings");

        let mut bookings = self.bookings.write().await;
        let bookings_deleted = bookings.len();
        bookings.clear();

        let seats_reset = self.seats.write().await.reset();

        info!("RESET: {} seats released, {} bookings deleted", seats_reset, bookings_deleted);
        ResetSummary { seats_reset, bookings_deleted }
    }

    pub async fn stats(&self) -> SeatStats {
        self.seats.read().await.stats()
    }

    pub async fn snapshot(&self) -> Vec<Seat> {
        self.seats.read().await.snapshot()
    }

    /// Занимает места и записывает бронь под обеими блокировками сразу,
    /// чтобы `reset` и `cancel` не вклинились между ними.
    /// Порядок блокировок везде один: сначала `bookings`, потом `seats`.
    async fn commit_and_record(
        &self,
        occupant: &str,
        seat_numbers: Vec<SeatNumber>,
    ) -> Result<Booking, CommitError> {
        let mut bookings = self.bookings.write().await;
        let mut seats = self.seats.write().await;

        seats.commit(&seat_numbers, occupant)?;

        let booking = Booking::new(occupant, seat_numbers);
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }
}
