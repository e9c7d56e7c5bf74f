use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::models::Car;
use crate::rental::{RentalPeriod, ranges_overlap};
use crate::schema::booking;
use crate::{DbConn, Error};

/// The settlement state of a rental application
///
/// Bookings start out pending and settle exactly once: an admin either
/// approves or rejects them. Settled bookings never move again.
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingStatus"]
pub enum BookingStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
}

impl BookingStatus {
	/// Attempt the one-way transition to the given state
	///
	/// # Errors
	/// Fails if this booking is no longer pending
	pub fn transition_to(self, next: Self) -> Result<Self, BookingError> {
		match (self, next) {
			(Self::Pending, Self::Approved) => Ok(Self::Approved),
			(Self::Pending, Self::Rejected) => Ok(Self::Rejected),
			(current, _) => Err(BookingError::InvalidTransition(current)),
		}
	}
}

impl std::fmt::Display for BookingStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let repr = match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		};

		write!(f, "{repr}")
	}
}

/// A single rental application
#[derive(
	Associations,
	Clone,
	Debug,
	Deserialize,
	Identifiable,
	Queryable,
	Selectable,
	Serialize,
)]
#[diesel(belongs_to(Car))]
#[diesel(table_name = booking)]
pub struct Booking {
	pub id:              i32,
	pub car_id:          i32,
	pub profile_id:      i32,
	pub start_date:      NaiveDate,
	pub end_date:        NaiveDate,
	pub status:          BookingStatus,
	pub estimated_price: BigDecimal,
	pub note:            Option<String>,
	pub admin_message:   Option<String>,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

/// Filters for listing bookings
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
	pub profile_id: Option<i32>,
	pub status:     Option<BookingStatus>,
}

impl Booking {
	/// Get a [`Booking`] by its id
	#[instrument(skip(conn))]
	pub(crate) async fn get_by_id(
		query_id: i32,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let found = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				booking
					.find(query_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		found.ok_or_else(|| Error::NotFound(format!("no booking {query_id}")))
	}

	/// Get all bookings matching the given filter, newest first
	#[instrument(skip(conn))]
	pub(crate) async fn get_filtered(
		filter: BookingFilter,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				let mut query = booking
					.select(Self::as_select())
					.order(created_at.desc())
					.into_boxed();

				if let Some(p_id) = filter.profile_id {
					query = query.filter(profile_id.eq(p_id));
				}

				if let Some(wanted) = filter.status {
					query = query.filter(status.eq(wanted));
				}

				query.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Get every booking that makes the given car unavailable for some
	/// period: all of its non-rejected bookings
	#[instrument(skip(conn))]
	pub(crate) async fn blocking_for_car(
		query_car_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				booking
					.filter(car_id.eq(query_car_id))
					.filter(status.ne(BookingStatus::Rejected))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Get the approved bookings for a car, excluding the given booking
	#[instrument(skip(conn))]
	async fn approved_siblings(
		query_car_id: i32,
		query_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				booking
					.filter(car_id.eq(query_car_id))
					.filter(id.ne(query_id))
					.filter(status.eq(BookingStatus::Approved))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Whether this booking's date range shares a calendar day with the
	/// given period
	#[must_use]
	pub fn blocks(&self, period: &RentalPeriod) -> bool {
		period.overlaps(self.start_date, self.end_date)
	}

	/// Decide whether this booking may settle as approved, given the other
	/// approved bookings on the same car
	///
	/// # Errors
	/// Fails if this booking is no longer pending, or if any of the given
	/// bookings overlaps it
	fn check_approvable(
		&self,
		siblings: &[Self],
	) -> Result<BookingStatus, BookingError> {
		let next = self.status.transition_to(BookingStatus::Approved)?;

		if let Some(other) = siblings.iter().find(|other| {
			ranges_overlap(
				self.start_date,
				self.end_date,
				other.start_date,
				other.end_date,
			)
		}) {
			return Err(BookingError::AlreadyBooked {
				start: other.start_date,
				end:   other.end_date,
			});
		}

		Ok(next)
	}

	/// Approve this booking
	///
	/// Two overlapping applications can both be accepted while pending;
	/// approval is where only one of them may win. The overlap check is
	/// therefore re-run here against the other approved bookings on the
	/// same car before anything is written.
	///
	/// # Errors
	/// Fails if this booking is no longer pending, or if an approved
	/// booking on the same car overlaps it
	#[instrument(skip(conn))]
	pub(crate) async fn approve(self, conn: &DbConn) -> Result<Self, Error> {
		let siblings =
			Self::approved_siblings(self.car_id, self.id, conn).await?;

		let next = self.check_approvable(&siblings)?;

		self.set_status(next, conn).await
	}

	/// Reject this booking
	///
	/// Rejection only frees capacity, so no overlap check is needed.
	///
	/// # Errors
	/// Fails if this booking is no longer pending
	#[instrument(skip(conn))]
	pub(crate) async fn reject(self, conn: &DbConn) -> Result<Self, Error> {
		let next = self.status.transition_to(BookingStatus::Rejected)?;

		self.set_status(next, conn).await
	}

	async fn set_status(
		self,
		next: BookingStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let settled = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				diesel::update(booking.find(self.id))
					.set((
						status.eq(next),
						updated_at.eq(Utc::now().naive_utc()),
					))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(settled)
	}

	/// Attach or replace the admin message on this booking
	#[instrument(skip(conn))]
	pub(crate) async fn set_admin_message(
		self,
		message: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				diesel::update(booking.find(self.id))
					.set((
						admin_message.eq(message),
						updated_at.eq(Utc::now().naive_utc()),
					))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(updated)
	}
}

/// An insertable rental application
///
/// The estimated price is a point-in-time snapshot of the car's rate card;
/// it is computed exactly once at submission and never recomputed.
#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = booking)]
pub struct NewBooking {
	pub car_id:          i32,
	pub profile_id:      i32,
	pub start_date:      NaiveDate,
	pub end_date:        NaiveDate,
	pub status:          BookingStatus,
	pub estimated_price: BigDecimal,
	pub note:            Option<String>,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

impl NewBooking {
	/// Insert this [`NewBooking`] into the database
	#[instrument(skip(conn))]
	pub(crate) async fn insert(self, conn: &DbConn) -> Result<Booking, Error> {
		let new_booking = conn
			.interact(|conn| {
				use self::booking::dsl::*;

				diesel::insert_into(booking)
					.values(self)
					.returning(Booking::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(new_booking)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	fn booking(
		id: i32,
		status: BookingStatus,
		start: NaiveDate,
		end: NaiveDate,
	) -> Booking {
		let created = date(2025, 1, 1).and_hms_opt(0, 0, 0).unwrap();

		Booking {
			id,
			car_id: 1,
			profile_id: 1,
			start_date: start,
			end_date: end,
			status,
			estimated_price: BigDecimal::from(100),
			note: None,
			admin_message: None,
			created_at: created,
			updated_at: created,
		}
	}

	#[test]
	fn pending_settles_both_ways() {
		assert_eq!(
			BookingStatus::Pending
				.transition_to(BookingStatus::Approved)
				.unwrap(),
			BookingStatus::Approved
		);
		assert_eq!(
			BookingStatus::Pending
				.transition_to(BookingStatus::Rejected)
				.unwrap(),
			BookingStatus::Rejected
		);
	}

	#[test]
	fn settled_bookings_never_move() {
		for settled in [BookingStatus::Approved, BookingStatus::Rejected] {
			for next in [
				BookingStatus::Pending,
				BookingStatus::Approved,
				BookingStatus::Rejected,
			] {
				assert!(settled.transition_to(next).is_err());
			}
		}
	}

	#[test]
	fn pending_never_resets_to_pending() {
		assert!(
			BookingStatus::Pending
				.transition_to(BookingStatus::Pending)
				.is_err()
		);
	}

	#[test]
	fn approval_conflicts_with_overlapping_approved_sibling() {
		let pending = booking(
			1,
			BookingStatus::Pending,
			date(2025, 5, 10),
			date(2025, 5, 15),
		);
		// Touching endpoint is enough to block
		let approved = booking(
			2,
			BookingStatus::Approved,
			date(2025, 5, 15),
			date(2025, 5, 20),
		);

		match pending.check_approvable(&[approved]) {
			Err(BookingError::AlreadyBooked { start, end }) => {
				assert_eq!(start, date(2025, 5, 15));
				assert_eq!(end, date(2025, 5, 20));
			},
			other => panic!("expected a booking conflict, got {other:?}"),
		}
	}

	#[test]
	fn approval_passes_disjoint_approved_siblings() {
		let pending = booking(
			1,
			BookingStatus::Pending,
			date(2025, 5, 10),
			date(2025, 5, 15),
		);
		let siblings = vec![
			booking(
				2,
				BookingStatus::Approved,
				date(2025, 5, 1),
				date(2025, 5, 9),
			),
			booking(
				3,
				BookingStatus::Approved,
				date(2025, 5, 16),
				date(2025, 5, 20),
			),
		];

		assert_eq!(
			pending.check_approvable(&siblings).unwrap(),
			BookingStatus::Approved
		);
	}

	#[test]
	fn settled_booking_cannot_be_approved_again() {
		let approved = booking(
			1,
			BookingStatus::Approved,
			date(2025, 5, 10),
			date(2025, 5, 15),
		);

		assert!(matches!(
			approved.check_approvable(&[]),
			Err(BookingError::InvalidTransition(BookingStatus::Approved))
		));
	}

	#[test]
	fn rejection_ignores_overlapping_siblings() {
		let pending = booking(
			1,
			BookingStatus::Pending,
			date(2025, 5, 10),
			date(2025, 5, 15),
		);
		let approved = booking(
			2,
			BookingStatus::Approved,
			date(2025, 5, 12),
			date(2025, 5, 18),
		);

		// The same sibling blocks approval, yet rejection settles without
		// ever consulting the siblings
		assert!(pending.check_approvable(&[approved]).is_err());
		assert_eq!(
			pending.status.transition_to(BookingStatus::Rejected).unwrap(),
			BookingStatus::Rejected
		);
	}
}
