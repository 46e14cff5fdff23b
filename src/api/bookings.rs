//! Booking and availability API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::booking::{
        parse_booking_date, Availability, Booking, BookingChanges, BookingQuery, CreateBooking,
        NewBooking, UpdateBooking,
    },
};

use super::{parse_id, JsonBody, QueryParams};

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    parse_booking_date(raw).ok_or_else(|| AppError::invalid_field("date", "Invalid date"))
}

/// Free and booked time slots for an asset on a date
#[utoipa::path(
    get,
    path = "/assets/{id}/availability/{date}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Asset ID"),
        ("date" = String, Path, description = "Date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Slot availability", body = Availability),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_availability(
    State(state): State<crate::AppState>,
    Path((id, date)): Path<(String, String)>,
) -> AppResult<Json<Availability>> {
    let id = parse_id(&id, "Asset not found")?;
    let date = parse_date(&date)?;
    let availability = state.services.bookings.availability(id, date).await?;
    Ok(Json(availability))
}

/// List bookings of one asset
#[utoipa::path(
    get,
    path = "/assets/{id}/bookings",
    tag = "bookings",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset bookings", body = Vec<Booking>),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_asset_bookings(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Booking>>> {
    let id = parse_id(&id, "Asset not found")?;
    let bookings = state.services.bookings.list_for_asset(id).await?;
    Ok(Json(bookings))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Validation error, asset unavailable or slot taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    JsonBody(data): JsonBody<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = NewBooking::try_from(data)?;
    let booking = state.services.bookings.create(&booking).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(BookingQuery),
    responses(
        (status = 200, description = "Booking list", body = Vec<Booking>),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    QueryParams(query): QueryParams<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let date = query.date.as_deref().map(parse_date).transpose()?;
    let bookings = state.services.bookings.list(date).await?;
    Ok(Json(bookings))
}

/// Get booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = Booking),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let id = parse_id(&id, "Booking not found")?;
    let booking = state.services.bookings.get_by_id(id).await?;
    Ok(Json(booking))
}

/// Update a booking (partial), e.g. to confirm or cancel it
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = i32, Path, description = "Booking ID")),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 400, description = "Validation error or slot taken", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<UpdateBooking>,
) -> AppResult<Json<Booking>> {
    let id = parse_id(&id, "Booking not found")?;
    let changes = BookingChanges::try_from(data)?;
    let booking = state.services.bookings.update(id, &changes).await?;
    Ok(Json(booking))
}
