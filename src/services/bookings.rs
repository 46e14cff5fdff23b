//! Booking service: slot availability and conflict-checked reservations

use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexSet;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::{Asset, Availability, Booking, BookingChanges, NewBooking, TIME_SLOTS},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    /// Held across check-then-write so two requests cannot claim one slot
    slot_guard: Arc<Mutex<()>>,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            slot_guard: Arc::new(Mutex::new(())),
        }
    }

    async fn find_asset(&self, asset_id: i32) -> AppResult<Asset> {
        self.repository
            .get_asset(asset_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))
    }

    /// Slots held by the asset's live bookings on `date`, in booking order
    async fn booked_slots(&self, asset_id: i32, date: NaiveDate) -> AppResult<IndexSet<String>> {
        let bookings = self.repository.list_bookings_by_date(date).await?;
        Ok(bookings
            .into_iter()
            .filter(|b| b.asset_id == asset_id && b.status.occupies_slot())
            .map(|b| b.time_slot)
            .collect())
    }

    /// Whether a live booking other than `except` holds the slot
    async fn slot_taken(
        &self,
        asset_id: i32,
        date: NaiveDate,
        slot: &str,
        except: Option<i32>,
    ) -> AppResult<bool> {
        let bookings = self.repository.list_bookings_by_date(date).await?;
        Ok(bookings
            .iter()
            .any(|b| Some(b.id) != except && b.holds(asset_id, date, slot)))
    }

    /// Free and booked slots for an asset on a date.
    ///
    /// An asset that is not available has no free slots.
    pub async fn availability(&self, asset_id: i32, date: NaiveDate) -> AppResult<Availability> {
        let asset = self.find_asset(asset_id).await?;
        let booked = self.booked_slots(asset_id, date).await?;

        let available_slots = if asset.is_available {
            TIME_SLOTS
                .iter()
                .filter(|slot| !booked.contains(**slot))
                .map(|slot| slot.to_string())
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(asset_id, %date, free = available_slots.len(), "Availability computed");

        Ok(Availability {
            available_slots,
            booked_slots: booked.into_iter().collect(),
        })
    }

    /// Reserve a slot. The booking is created as pending.
    pub async fn create(&self, data: &NewBooking) -> AppResult<Booking> {
        let _guard = self.slot_guard.lock().await;

        let asset = self.find_asset(data.asset_id).await?;
        if !asset.is_available {
            tracing::warn!(asset_id = asset.id, "Booking refused: asset unavailable");
            return Err(AppError::BusinessRule(
                "Asset is not available for booking".to_string(),
            ));
        }

        // Exact slot match only; duration does not extend the claim
        if self
            .slot_taken(data.asset_id, data.booking_date, &data.time_slot, None)
            .await?
        {
            tracing::warn!(
                asset_id = asset.id,
                date = %data.booking_date,
                slot = %data.time_slot,
                "Booking refused: slot taken"
            );
            return Err(AppError::BusinessRule("Time slot is already booked".to_string()));
        }

        let booking = self.repository.create_booking(data).await?;
        tracing::info!(
            id = booking.id,
            asset_id = booking.asset_id,
            date = %booking.booking_date,
            slot = %booking.time_slot,
            "Booking created"
        );
        Ok(booking)
    }

    /// All bookings, or only those on `date`
    pub async fn list(&self, date: Option<NaiveDate>) -> AppResult<Vec<Booking>> {
        match date {
            Some(date) => self.repository.list_bookings_by_date(date).await,
            None => self.repository.list_bookings().await,
        }
    }

    pub async fn list_for_asset(&self, asset_id: i32) -> AppResult<Vec<Booking>> {
        self.find_asset(asset_id).await?;
        self.repository.list_bookings_by_asset(asset_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        self.repository
            .get_booking(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    /// Apply a partial update.
    ///
    /// Moving a booking, or reviving a cancelled one, must not land on a slot
    /// another live booking holds.
    pub async fn update(&self, id: i32, changes: &BookingChanges) -> AppResult<Booking> {
        let _guard = self.slot_guard.lock().await;

        let mut target = self.get_by_id(id).await?;
        changes.apply_to(&mut target);

        if changes.moves_slot()
            && target.status.occupies_slot()
            && self
                .slot_taken(target.asset_id, target.booking_date, &target.time_slot, Some(id))
                .await?
        {
            return Err(AppError::BusinessRule("Time slot is already booked".to_string()));
        }

        let booking = self
            .repository
            .update_booking(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        tracing::info!(id, status = %booking.status, "Booking updated");
        Ok(booking)
    }
}
