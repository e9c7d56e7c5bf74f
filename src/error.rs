//! Library-wide error types and [`From`] impls

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

use crate::models::BookingStatus;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
	/// Any error related to a rental application
	#[error(transparent)]
	BookingError(#[from] BookingError),
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let status = match self {
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Self::BookingError(
				BookingError::Unavailable { .. }
				| BookingError::AlreadyBooked { .. },
			) => StatusCode::CONFLICT,
			Self::BookingError(_) => StatusCode::BAD_REQUEST,
		};

		let data = json!({ "message": message });

		(status, Json(data)).into_response()
	}
}

/// Any error related to submitting or settling a rental application
#[derive(Debug, Error)]
pub enum BookingError {
	/// The requested end date does not lie strictly after the start date
	#[error("end date must be after start date")]
	InvalidPeriod { start: NaiveDate, end: NaiveDate },
	/// The requested period spans no billable days
	#[error("rental duration must be at least one day")]
	InvalidDuration(i64),
	/// A non-rejected booking already covers part of the requested period
	#[error("car is not available for the selected dates")]
	Unavailable { start: NaiveDate, end: NaiveDate },
	/// An approved booking already covers part of this booking's period
	#[error("car is already booked for overlapping dates")]
	AlreadyBooked { start: NaiveDate, end: NaiveDate },
	/// The booking has already been settled and cannot change state
	#[error("booking is already {0}")]
	InvalidTransition(BookingStatus),
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map database result errors to application errors
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}
