use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use validator::Validate;

use crate::DbPool;
use crate::error::{BookingError, Error};
use crate::models::{Booking, BookingFilter, BookingStatus, Car, NewBooking};
use crate::rental::RentalPeriod;
use crate::schemas::booking::{
	BookingResponse,
	CreateBookingRequest,
	MessageRequest,
};

/// Submit a new rental application
///
/// Check order is deliberate: dates before car existence, existence before
/// availability, availability before pricing. Any failure aborts before
/// the insert, so nothing is ever partially written.
#[instrument(skip(pool))]
pub(crate) async fn create_booking(
	State(pool): State<DbPool>,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let period = RentalPeriod::new(request.start_date, request.end_date)?;

	let conn = pool.get().await?;

	let car = Car::get_by_id(request.car_id, &conn).await?;

	let existing = Booking::blocking_for_car(car.id, &conn).await?;
	if existing.iter().any(|b| b.blocks(&period)) {
		return Err(BookingError::Unavailable {
			start: period.start(),
			end:   period.end(),
		}
		.into());
	}

	let quote = car.quote(&period)?;

	let now = Utc::now().naive_utc();
	let new_booking = NewBooking {
		car_id:          car.id,
		profile_id:      request.profile_id,
		start_date:      period.start(),
		end_date:        period.end(),
		status:          BookingStatus::Pending,
		estimated_price: quote.total,
		note:            request.note,
		created_at:      now,
		updated_at:      now,
	};

	let booking = new_booking.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// List bookings, optionally filtered by requester and/or status
#[instrument(skip(pool))]
pub(crate) async fn get_bookings(
	State(pool): State<DbPool>,
	Query(filter): Query<BookingFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let bookings = Booking::get_filtered(filter, &conn).await?;
	let response: Vec<BookingResponse> =
		bookings.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_booking(
	State(pool): State<DbPool>,
	Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(booking_id, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

/// Approve a pending booking, re-checking for overlap against the other
/// approved bookings on the same car
#[instrument(skip(pool))]
pub(crate) async fn approve_booking(
	State(pool): State<DbPool>,
	Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(booking_id, &conn).await?;
	let approved = booking.approve(&conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(approved))))
}

/// Reject a pending booking
#[instrument(skip(pool))]
pub(crate) async fn reject_booking(
	State(pool): State<DbPool>,
	Path(booking_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(booking_id, &conn).await?;
	let rejected = booking.reject(&conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(rejected))))
}

/// Attach or replace the admin message on a booking
#[instrument(skip(pool))]
pub(crate) async fn send_booking_message(
	State(pool): State<DbPool>,
	Path(booking_id): Path<i32>,
	Json(request): Json<MessageRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let booking = Booking::get_by_id(booking_id, &conn).await?;
	let updated = booking.set_admin_message(request.message, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(updated))))
}
