use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use validator::Validate;

use crate::DbPool;
use crate::error::Error;
use crate::models::{Booking, Car, CarUpdate, NewCar};
use crate::rental::RentalPeriod;
use crate::schemas::PeriodQuery;
use crate::schemas::booking::{AvailabilityResponse, QuoteResponse};
use crate::schemas::car::{CarResponse, CreateCarRequest, UpdateCarRequest};

#[instrument(skip(pool))]
pub(crate) async fn get_cars(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let cars = Car::get_all(&conn).await?;
	let response: Vec<CarResponse> = cars.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_car(
	State(pool): State<DbPool>,
	Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let car = Car::get_by_id(car_id, &conn).await?;

	Ok((StatusCode::OK, Json(CarResponse::from(car))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_car(
	State(pool): State<DbPool>,
	Json(request): Json<CreateCarRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let now = Utc::now().naive_utc();
	let new_car = NewCar {
		brand:           request.brand,
		model:           request.model,
		car_type:        request.car_type,
		plate_number:    request.plate_number,
		colour:          request.colour,
		price_per_day:   request.price_per_day,
		price_per_week:  request.price_per_week,
		price_per_month: request.price_per_month,
		created_at:      now,
		updated_at:      now,
	};

	let car = new_car.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(CarResponse::from(car))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_car(
	State(pool): State<DbPool>,
	Path(car_id): Path<i32>,
	Json(request): Json<UpdateCarRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let update = CarUpdate::from(request);

	if update.is_empty() {
		return Err(Error::ValidationError(
			"at least one field must be set".to_string(),
		));
	}

	let conn = pool.get().await?;

	let car = update.apply_to(car_id, &conn).await?;

	Ok((StatusCode::OK, Json(CarResponse::from(car))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_car(
	State(pool): State<DbPool>,
	Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Car::delete_by_id(car_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// List the cars that are free for the whole of the given period
#[instrument(skip(pool))]
pub(crate) async fn get_available_cars(
	State(pool): State<DbPool>,
	Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, Error> {
	let period = RentalPeriod::new(query.start_date, query.end_date)?;

	let conn = pool.get().await?;

	let cars = Car::get_available(period, &conn).await?;
	let response: Vec<CarResponse> = cars.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

/// Price a period against a car's rate card without submitting anything
#[instrument(skip(pool))]
pub(crate) async fn get_car_quote(
	State(pool): State<DbPool>,
	Path(car_id): Path<i32>,
	Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, Error> {
	let period = RentalPeriod::new(query.start_date, query.end_date)?;

	let conn = pool.get().await?;

	let car = Car::get_by_id(car_id, &conn).await?;
	let quote = car.quote(&period)?;

	Ok((StatusCode::OK, Json(QuoteResponse::from(quote))))
}

/// Check whether a single car is free for the given period
#[instrument(skip(pool))]
pub(crate) async fn get_car_availability(
	State(pool): State<DbPool>,
	Path(car_id): Path<i32>,
	Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, Error> {
	let period = RentalPeriod::new(query.start_date, query.end_date)?;

	let conn = pool.get().await?;

	let car = Car::get_by_id(car_id, &conn).await?;

	let existing = Booking::blocking_for_car(car.id, &conn).await?;
	let available = !existing.iter().any(|b| b.blocks(&period));

	Ok((StatusCode::OK, Json(AvailabilityResponse { available })))
}
