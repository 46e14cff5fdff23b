//! Repository layer: the storage contract and its in-memory implementation

pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{Asset, Booking, BookingChanges, CreateAsset, NewBooking, UpdateAsset},
};

pub use memory::MemoryStore;

/// Storage contract for assets and bookings.
///
/// Lookups return `Ok(None)` for unknown ids; errors are reserved for
/// backing-store failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// All assets, in insertion order
    async fn list_assets(&self) -> AppResult<Vec<Asset>>;

    async fn get_asset(&self, id: i32) -> AppResult<Option<Asset>>;

    /// Lookup by human-readable asset code
    async fn get_asset_by_code(&self, code: &str) -> AppResult<Option<Asset>>;

    async fn create_asset(&self, data: &CreateAsset) -> AppResult<Asset>;

    async fn update_asset(&self, id: i32, data: &UpdateAsset) -> AppResult<Option<Asset>>;

    async fn list_bookings(&self) -> AppResult<Vec<Booking>>;

    async fn get_booking(&self, id: i32) -> AppResult<Option<Booking>>;

    async fn list_bookings_by_asset(&self, asset_id: i32) -> AppResult<Vec<Booking>>;

    /// Bookings on a calendar date
    async fn list_bookings_by_date(&self, date: NaiveDate) -> AppResult<Vec<Booking>>;

    /// Store a new booking as pending, stamped with the creation time
    async fn create_booking(&self, data: &NewBooking) -> AppResult<Booking>;

    async fn update_booking(&self, id: i32, data: &BookingChanges) -> AppResult<Option<Booking>>;
}

/// Shared handle to the store used by all services
pub type Repository = Arc<dyn Store>;
