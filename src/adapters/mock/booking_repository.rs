use crate::domain::{
    Booking, BookingId, BookingQuery, BookingStatus, ItemId, PageRequest, UserId,
};
use crate::ports::booking_repository::{BookingRepository as BookingRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory implementation of BookingRepository
///
/// The status compare-and-swap holds the lock for the whole check-and-write,
/// matching the conditional UPDATE of the PostgreSQL adapter.
pub struct BookingRepository {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

impl BookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
        }
    }

    fn select(&self, predicate: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        self.bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| predicate(b))
            .cloned()
            .collect()
    }
}

impl Default for BookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn insert(&self, booking: Booking) -> Result<()> {
        self.bookings
            .lock()
            .unwrap()
            .insert(booking.booking_id, booking);
        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self.bookings.lock().unwrap().get(&booking_id).cloned())
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        new: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.get_mut(&booking_id) {
            Some(booking) if booking.status == expected => {
                booking.status = new;
                booking.updated_at = updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find(&self, query: BookingQuery, page: PageRequest) -> Result<Vec<Booking>> {
        let mut bookings = self.select(|b| query.matches(b));
        bookings.sort_by(|a, b| b.start().cmp(&a.start()));
        Ok(page.apply(bookings))
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        Ok(self.select(|b| b.item_id == item_id))
    }

    async fn find_by_item_and_booker(
        &self,
        item_id: ItemId,
        booker_id: UserId,
    ) -> Result<Vec<Booking>> {
        Ok(self.select(|b| b.item_id == item_id && b.booker_id == booker_id))
    }

    async fn find_ended_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        let mut bookings = self.select(|b| b.item_id == item_id && b.is_past_at(now));
        bookings.sort_by(|a, b| b.end().cmp(&a.end()));
        Ok(bookings)
    }

    async fn find_upcoming_for_item(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        let mut bookings = self.select(|b| b.item_id == item_id && b.is_future_at(now));
        bookings.sort_by_key(|b| b.start());
        Ok(bookings)
    }

    async fn find_active_for_owner(
        &self,
        owner_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Booking>> {
        let mut bookings = self.select(|b| b.owner_id == owner_id && b.is_current_at(now));
        bookings.sort_by(|a, b| b.start().cmp(&a.start()));
        Ok(bookings)
    }
}
