//! In-memory store.
//!
//! Each collection is an ordered map keyed by its integer id, behind its
//! own [`tokio::sync::RwLock`]. Ids come from a per-collection counter that
//! starts at 1 and never hands out the same value twice, so iteration order
//! is insertion order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use super::Store;
use crate::{
    error::AppResult,
    models::{Asset, Booking, BookingChanges, BookingStatus, CreateAsset, NewBooking, UpdateAsset},
};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn values(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filtered(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| pred(row)).cloned().collect()
    }
}

/// Process-lifetime storage for assets and bookings
#[derive(Debug)]
pub struct MemoryStore {
    assets: RwLock<Table<Asset>>,
    bookings: RwLock<Table<Booking>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            assets: RwLock::new(Table::new()),
            bookings: RwLock::new(Table::new()),
        }
    }

    /// Creates a store pre-loaded with `assets`, numbered from 1.
    pub fn with_assets(assets: impl IntoIterator<Item = CreateAsset>) -> Self {
        let mut table = Table::new();
        for data in assets {
            let id = table.allocate_id();
            table.rows.insert(id, data.into_asset(id));
        }
        Self {
            assets: RwLock::new(table),
            bookings: RwLock::new(Table::new()),
        }
    }

    /// Creates a store holding the sample instrument catalog.
    pub fn with_sample_assets() -> Self {
        Self::with_assets(super::seed::sample_assets())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_assets(&self) -> AppResult<Vec<Asset>> {
        Ok(self.assets.read().await.values())
    }

    async fn get_asset(&self, id: i32) -> AppResult<Option<Asset>> {
        Ok(self.assets.read().await.rows.get(&id).cloned())
    }

    async fn get_asset_by_code(&self, code: &str) -> AppResult<Option<Asset>> {
        let assets = self.assets.read().await;
        Ok(assets.rows.values().find(|a| a.asset_id == code).cloned())
    }

    async fn create_asset(&self, data: &CreateAsset) -> AppResult<Asset> {
        let mut assets = self.assets.write().await;
        let id = assets.allocate_id();
        let asset = data.clone().into_asset(id);
        assets.rows.insert(id, asset.clone());
        Ok(asset)
    }

    async fn update_asset(&self, id: i32, data: &UpdateAsset) -> AppResult<Option<Asset>> {
        let mut assets = self.assets.write().await;
        Ok(assets.rows.get_mut(&id).map(|asset| {
            data.apply_to(asset);
            asset.clone()
        }))
    }

    async fn list_bookings(&self) -> AppResult<Vec<Booking>> {
        Ok(self.bookings.read().await.values())
    }

    async fn get_booking(&self, id: i32) -> AppResult<Option<Booking>> {
        Ok(self.bookings.read().await.rows.get(&id).cloned())
    }

    async fn list_bookings_by_asset(&self, asset_id: i32) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.filtered(|b| b.asset_id == asset_id))
    }

    async fn list_bookings_by_date(&self, date: NaiveDate) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.filtered(|b| b.booking_date == date))
    }

    async fn create_booking(&self, data: &NewBooking) -> AppResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let id = bookings.allocate_id();
        let booking = Booking {
            id,
            asset_id: data.asset_id,
            user_email: data.user_email.clone(),
            purpose: data.purpose.clone(),
            booking_date: data.booking_date,
            time_slot: data.time_slot.clone(),
            duration: data.duration,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };
        bookings.rows.insert(id, booking.clone());
        Ok(booking)
    }

    async fn update_booking(&self, id: i32, data: &BookingChanges) -> AppResult<Option<Booking>> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings.rows.get_mut(&id).map(|booking| {
            data.apply_to(booking);
            booking.clone()
        }))
    }
}
