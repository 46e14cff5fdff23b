//! Booking (slot reservation) model and the fixed slot catalog

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use super::enums::BookingStatus;

/// Bookable start times, in display order. The last interval is 30 minutes.
pub const TIME_SLOTS: [&str; 9] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "16:30",
];

/// Booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i32,
    /// Booked asset (`Asset.id`)
    pub asset_id: i32,
    pub user_email: String,
    pub purpose: String,
    pub booking_date: NaiveDate,
    /// Start time, one of the slot catalog entries
    pub time_slot: String,
    /// Hours
    pub duration: i32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking holds `slot` for `asset_id` on `date`
    pub fn holds(&self, asset_id: i32, date: NaiveDate, slot: &str) -> bool {
        self.asset_id == asset_id
            && self.booking_date == date
            && self.time_slot == slot
            && self.status.occupies_slot()
    }
}

/// Create booking request.
///
/// Every field is required; absent ones are reported by name.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub asset_id: Option<i32>,
    #[validate(email(message = "Valid email is required"))]
    pub user_email: Option<String>,
    #[validate(length(min = 10, message = "Purpose must be at least 10 characters"))]
    pub purpose: Option<String>,
    /// Date (YYYY-MM-DD or RFC 3339)
    pub booking_date: Option<String>,
    pub time_slot: Option<String>,
    #[validate(range(min = 1, message = "Duration must be at least 1 hour"))]
    pub duration: Option<i32>,
}

/// Booking fields as handed to the store, with the date normalized
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub asset_id: i32,
    pub user_email: String,
    pub purpose: String,
    pub booking_date: NaiveDate,
    pub time_slot: String,
    pub duration: i32,
}

impl TryFrom<CreateBooking> for NewBooking {
    type Error = ValidationErrors;

    /// Runs field validation, then checks presence, parses the date and
    /// checks the slot
    fn try_from(data: CreateBooking) -> Result<Self, Self::Error> {
        let mut errors = match data.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let asset_id = require(&mut errors, "asset_id", "Asset is required", data.asset_id);
        let user_email = require(&mut errors, "user_email", "Email is required", data.user_email);
        let purpose = require(&mut errors, "purpose", "Purpose is required", data.purpose);
        let duration = require(&mut errors, "duration", "Duration is required", data.duration);

        let booking_date = require(
            &mut errors,
            "booking_date",
            "Date is required",
            data.booking_date.filter(|raw| !raw.trim().is_empty()),
        )
        .and_then(|raw| {
            let parsed = parse_booking_date(&raw);
            if parsed.is_none() {
                errors.add("booking_date", invalid("date", "Invalid date"));
            }
            parsed
        });

        let time_slot = require(
            &mut errors,
            "time_slot",
            "Time slot is required",
            data.time_slot.filter(|slot| !slot.trim().is_empty()),
        );
        if let Some(ref slot) = time_slot {
            if !is_known_slot(slot) {
                errors.add("time_slot", invalid("time_slot", "Unknown time slot"));
            }
        }

        match (asset_id, user_email, purpose, booking_date, time_slot, duration) {
            (
                Some(asset_id),
                Some(user_email),
                Some(purpose),
                Some(booking_date),
                Some(time_slot),
                Some(duration),
            ) if errors.is_empty() => Ok(NewBooking {
                asset_id,
                user_email,
                purpose,
                booking_date,
                time_slot,
                duration,
            }),
            _ => Err(errors),
        }
    }
}

/// Update booking request (partial)
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBooking {
    #[validate(email(message = "Valid email is required"))]
    pub user_email: Option<String>,
    #[validate(length(min = 10, message = "Purpose must be at least 10 characters"))]
    pub purpose: Option<String>,
    pub booking_date: Option<String>,
    pub time_slot: Option<String>,
    #[validate(range(min = 1, message = "Duration must be at least 1 hour"))]
    pub duration: Option<i32>,
    pub status: Option<BookingStatus>,
}

/// Partial booking fields as handed to the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingChanges {
    pub user_email: Option<String>,
    pub purpose: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub duration: Option<i32>,
    pub status: Option<BookingStatus>,
}

impl BookingChanges {
    /// Merge the present fields into `booking`; the creation time never changes
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(ref email) = self.user_email {
            booking.user_email = email.clone();
        }
        if let Some(ref purpose) = self.purpose {
            booking.purpose = purpose.clone();
        }
        if let Some(date) = self.booking_date {
            booking.booking_date = date;
        }
        if let Some(ref slot) = self.time_slot {
            booking.time_slot = slot.clone();
        }
        if let Some(duration) = self.duration {
            booking.duration = duration;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
    }

    /// Whether applying these changes can make the booking claim a slot anew
    pub fn moves_slot(&self) -> bool {
        self.booking_date.is_some() || self.time_slot.is_some() || self.status.is_some()
    }
}

impl TryFrom<UpdateBooking> for BookingChanges {
    type Error = ValidationErrors;

    fn try_from(data: UpdateBooking) -> Result<Self, Self::Error> {
        let mut errors = match data.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let booking_date = match data.booking_date.as_deref() {
            None => None,
            Some(raw) => {
                let parsed = parse_booking_date(raw);
                if parsed.is_none() {
                    errors.add("booking_date", invalid("date", "Invalid date"));
                }
                parsed
            }
        };
        if let Some(ref slot) = data.time_slot {
            if !is_known_slot(slot) {
                errors.add("time_slot", invalid("time_slot", "Unknown time slot"));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookingChanges {
            user_email: data.user_email,
            purpose: data.purpose,
            booking_date,
            time_slot: data.time_slot,
            duration: data.duration,
            status: data.status,
        })
    }
}

/// Free and taken slots for one asset on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available_slots: Vec<String>,
    pub booked_slots: Vec<String>,
}

/// Booking list query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    /// Only bookings on this date (YYYY-MM-DD)
    pub date: Option<String>,
}

pub fn is_known_slot(slot: &str) -> bool {
    TIME_SLOTS.contains(&slot)
}

/// Reduce a date string to its calendar date.
///
/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, whose
/// time of day is dropped.
pub fn parse_booking_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

fn require<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    message: &'static str,
    value: Option<T>,
) -> Option<T> {
    if value.is_none() {
        errors.add(field, invalid("required", message));
    }
    value
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
