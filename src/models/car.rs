use bigdecimal::BigDecimal;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::BookingStatus;
use crate::rental::{Quote, RentalPeriod};
use crate::schema::{booking, car};
use crate::{DbConn, Error};

/// A single rentable car and its rate card
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = car)]
pub struct Car {
	pub id:              i32,
	pub brand:           String,
	pub model:           String,
	pub car_type:        String,
	pub plate_number:    String,
	pub colour:          String,
	pub price_per_day:   BigDecimal,
	pub price_per_week:  BigDecimal,
	pub price_per_month: BigDecimal,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

impl Car {
	/// Get a [`Car`] by its id
	#[instrument(skip(conn))]
	pub(crate) async fn get_by_id(
		query_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let found = conn
			.interact(move |conn| {
				use self::car::dsl::*;

				car.find(query_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		found.ok_or_else(|| Error::NotFound(format!("no car {query_id}")))
	}

	/// Get all [`Car`]s
	#[instrument(skip(conn))]
	pub(crate) async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let cars = conn
			.interact(|conn| {
				use self::car::dsl::*;

				car.select(Self::as_select()).order(id.asc()).load(conn)
			})
			.await??;

		Ok(cars)
	}

	/// Get all [`Car`]s without a non-rejected booking overlapping the
	/// given period
	#[instrument(skip(conn))]
	pub(crate) async fn get_available(
		period: RentalPeriod,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let (start, end) = (period.start(), period.end());

		let cars = conn
			.interact(move |conn| {
				let blocked = booking::table
					.filter(booking::status.ne(BookingStatus::Rejected))
					.filter(booking::start_date.le(end))
					.filter(booking::end_date.ge(start))
					.select(booking::car_id);

				car::table
					.filter(car::id.ne_all(blocked))
					.select(Self::as_select())
					.order(car::id.asc())
					.load(conn)
			})
			.await??;

		Ok(cars)
	}

	/// Price the given period against this car's rate card
	///
	/// # Errors
	/// Fails if the period spans no billable days
	pub fn quote(&self, period: &RentalPeriod) -> Result<Quote, Error> {
		Quote::for_period(
			period,
			&self.price_per_day,
			&self.price_per_week,
			&self.price_per_month,
		)
	}

	/// Delete a [`Car`] by its id
	#[instrument(skip(conn))]
	pub(crate) async fn delete_by_id(
		query_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::car::dsl::*;

				diesel::delete(car.filter(id.eq(query_id))).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!("no car {query_id}")));
		}

		Ok(())
	}
}

/// An insertable car
#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = car)]
pub struct NewCar {
	pub brand:           String,
	pub model:           String,
	pub car_type:        String,
	pub plate_number:    String,
	pub colour:          String,
	pub price_per_day:   BigDecimal,
	pub price_per_week:  BigDecimal,
	pub price_per_month: BigDecimal,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

impl NewCar {
	/// Insert this [`NewCar`] into the database
	#[instrument(skip(conn))]
	pub(crate) async fn insert(self, conn: &DbConn) -> Result<Car, Error> {
		let new_car = conn
			.interact(|conn| {
				use self::car::dsl::*;

				diesel::insert_into(car)
					.values(self)
					.returning(Car::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(new_car)
	}
}

/// A partial update to a car's descriptive fields or rate card
///
/// Existing bookings keep the price that was quoted when they were
/// submitted; changing the rates here never reprices them.
#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = car)]
pub struct CarUpdate {
	pub brand:           Option<String>,
	pub model:           Option<String>,
	pub car_type:        Option<String>,
	pub plate_number:    Option<String>,
	pub colour:          Option<String>,
	pub price_per_day:   Option<BigDecimal>,
	pub price_per_week:  Option<BigDecimal>,
	pub price_per_month: Option<BigDecimal>,
}

impl CarUpdate {
	/// Whether this update leaves every field untouched
	///
	/// An empty changeset cannot be written, so callers must reject it
	/// before applying.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.brand.is_none()
			&& self.model.is_none()
			&& self.car_type.is_none()
			&& self.plate_number.is_none()
			&& self.colour.is_none()
			&& self.price_per_day.is_none()
			&& self.price_per_week.is_none()
			&& self.price_per_month.is_none()
	}

	/// Apply this update to the car with the given id
	#[instrument(skip(conn))]
	pub(crate) async fn apply_to(
		self,
		query_id: i32,
		conn: &DbConn,
	) -> Result<Car, Error> {
		let updated_car = conn
			.interact(move |conn| {
				use self::car::dsl::*;

				diesel::update(car.filter(id.eq(query_id)))
					.set((&self, updated_at.eq(Utc::now().naive_utc())))
					.returning(Car::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??;

		updated_car
			.ok_or_else(|| Error::NotFound(format!("no car {query_id}")))
	}
}
