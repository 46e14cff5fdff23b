//! Data models for Labbook

pub mod asset;
pub mod booking;
pub mod enums;

// Re-export commonly used types
pub use asset::{Asset, AssetQuery, AssetStatusFilter, CreateAsset, UpdateAsset};
pub use booking::{Availability, Booking, BookingChanges, NewBooking, TIME_SLOTS};
pub use enums::{BookingStatus, CalibrationStatus, MaintenanceStatus};
