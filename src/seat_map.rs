use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

use crate::config::LayoutConfig;
use crate::error::{CommitError, LayoutError};
use crate::models::{RowNumber, Seat, SeatNumber, SeatStats};

/// Хранилище мест в памяти. Единственный владелец занятости мест:
/// аллокатор получает от него только снимки.
#[derive(Debug, Clone)]
pub struct SeatMap {
    seats: Vec<Seat>,
    index: BTreeMap<SeatNumber, usize>,
}

impl SeatMap {
    /// Строит схему по количеству мест в каждом ряду. Ряды нумеруются с 1,
    /// места сквозной нумерацией с 1.
    pub fn from_shape(row_sizes: &[u32]) -> Result<Self, LayoutError> {
        if row_sizes.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut seats = Vec::with_capacity(row_sizes.iter().sum::<u32>() as usize);
        let mut seat_number: SeatNumber = 1;

        for (idx, size) in row_sizes.iter().enumerate() {
            let row = idx as RowNumber + 1;
            if *size == 0 {
                return Err(LayoutError::EmptyRow(row));
            }
            for _ in 0..*size {
                seats.push(Seat::free(seat_number, row));
                seat_number += 1;
            }
        }

        Self::from_seats(seats)
    }

    pub fn from_layout(layout: &LayoutConfig) -> Result<Self, LayoutError> {
        let map = Self::from_shape(&layout.row_sizes())?;
        info!("Seat map created: {} rows, {} seats", layout.rows, map.seats.len());
        Ok(map)
    }

    /// Схема из готового списка мест. Номера мест должны быть уникальны.
    pub fn from_seats(seats: Vec<Seat>) -> Result<Self, LayoutError> {
        let mut index = BTreeMap::new();
        for (idx, seat) in seats.iter().enumerate() {
            if index.insert(seat.seat_number, idx).is_some() {
                return Err(LayoutError::DuplicateSeat(seat.seat_number));
            }
        }
        Ok(Self { seats, index })
    }

    pub fn snapshot(&self) -> Vec<Seat> {
        self.seats.clone()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn get(&self, seat_number: SeatNumber) -> Option<&Seat> {
        self.index.get(&seat_number).map(|idx| &self.seats[*idx])
    }

    /// Места, сгруппированные по рядам
    pub fn rows(&self) -> BTreeMap<RowNumber, Vec<&Seat>> {
        let mut rows: BTreeMap<RowNumber, Vec<&Seat>> = BTreeMap::new();
        for seat in &self.seats {
            rows.entry(seat.row_number).or_default().push(seat);
        }
        for seats in rows.values_mut() {
            seats.sort_by_key(|seat| seat.seat_number);
        }
        rows
    }

    pub fn stats(&self) -> SeatStats {
        let booked = self.seats.iter().filter(|seat| seat.occupied).count();
        SeatStats {
            total: self.seats.len(),
            booked,
            available: self.seats.len() - booked,
        }
    }

    /// Занимает места, предварительно проверив каждое на текущем состоянии.
    /// Либо занимаются все места, либо ни одного.
    pub fn commit(&mut self, seat_numbers: &[SeatNumber], occupant: &str) -> Result<(), CommitError> {
        let mut seen = BTreeSet::new();
        let mut positions = Vec::with_capacity(seat_numbers.len());

        for seat_number in seat_numbers {
            if !seen.insert(*seat_number) {
                return Err(CommitError::DuplicateSeat(*seat_number));
            }
            let idx = *self
                .index
                .get(seat_number)
                .ok_or(CommitError::UnknownSeat(*seat_number))?;
            if self.seats[idx].occupied {
                return Err(CommitError::SeatTaken(*seat_number));
            }
            positions.push(idx);
        }

        for idx in positions {
            let seat = &mut self.seats[idx];
            seat.occupied = true;
            seat.occupant = Some(occupant.to_string());
        }

        Ok(())
    }

    /// Освобождает места владельца `occupant`, чужие не трогает.
    /// Возвращает сколько мест реально освобождено.
    pub fn release(&mut self, seat_numbers: &[SeatNumber], occupant: &str) -> usize {
        let mut freed = 0;
        for seat_number in seat_numbers {
            if let Some(idx) = self.index.get(seat_number) {
                let seat = &mut self.seats[*idx];
                if seat.occupied && seat.occupant.as_deref() == Some(occupant) {
                    seat.occupied = false;
                    seat.occupant = None;
                    freed += 1;
                }
            }
        }
        freed
    }

    pub fn reset(&mut self) -> usize {
        let mut freed = 0;
        for seat in self.seats.iter_mut().filter(|seat| seat.occupied) {
            seat.occupied = false;
            seat.occupant = None;
            freed += 1;
        }
        freed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_coach_shape() {
        let map = SeatMap::from_layout(&LayoutConfig::default()).unwrap();
        let rows = map.rows();
        assert_eq!(map.stats().total, 80);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[&1].iter().map(|s| s.seat_number).collect::<Vec<_>>(), (1..=7).collect::<Vec<_>>());
        assert_eq!(rows[&11].iter().map(|s| s.seat_number).collect::<Vec<_>>(), vec![78, 79, 80]);
    }

    #[test]
    fn rejects_empty_shapes() {
        assert_eq!(SeatMap::from_shape(&[]).unwrap_err(), LayoutError::Empty);
        assert_eq!(SeatMap::from_shape(&[7, 0, 7]).unwrap_err(), LayoutError::EmptyRow(2));
    }

    #[test]
    fn commit_is_all_or_nothing() {
        let mut map = SeatMap::from_shape(&[3]).unwrap();
        map.commit(&[2], "anna").unwrap();

        assert_eq!(map.commit(&[1, 2], "boris"), Err(CommitError::SeatTaken(2)));
        assert!(!map.get(1).unwrap().occupied);

        assert_eq!(map.commit(&[1, 9], "boris"), Err(CommitError::UnknownSeat(9)));
        assert_eq!(map.commit(&[1, 1], "boris"), Err(CommitError::DuplicateSeat(1)));
        assert_eq!(map.stats().booked, 1);
    }

    #[test]
    fn release_and_reset_free_seats() {
        let mut map = SeatMap::from_shape(&[4]).unwrap();
        map.commit(&[1, 2, 3], "anna").unwrap();

        assert_eq!(map.release(&[1, 4, 42], "anna"), 1);
        assert_eq!(map.get(2).unwrap().occupant.as_deref(), Some("anna"));
        assert_eq!(map.reset(), 2);
        assert_eq!(map.stats(), SeatStats { total: 4, booked: 0, available: 4 });
    }

    #[test]
    fn release_leaves_other_occupants_seats_booked() {
        let mut map = SeatMap::from_shape(&[4]).unwrap();
        map.commit(&[1, 2], "anna").unwrap();
        map.commit(&[3], "boris").unwrap();

        assert_eq!(map.release(&[1, 2, 3], "anna"), 2);
        assert_eq!(map.get(3).unwrap().occupant.as_deref(), Some("boris"));
        assert_eq!(map.stats().booked, 1);
    }

    #[test]
    fn from_seats_rejects_duplicate_numbers() {
        let seats = vec![Seat::free(1, 1), Seat::free(2, 1), Seat::free(2, 2)];
        assert_eq!(SeatMap::from_seats(seats).unwrap_err(), LayoutError::DuplicateSeat(2));

        let map = SeatMap::from_seats(vec![Seat::free(5, 1), Seat::booked(6, 1, "anna")]).unwrap();
        assert_eq!(map.stats().booked, 1);
    }
}
