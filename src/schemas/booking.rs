use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{Booking, BookingStatus};
use crate::rental::Quote;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub car_id:     i32,
	pub profile_id: i32,
	pub start_date: NaiveDate,
	pub end_date:   NaiveDate,
	#[validate(length(
		max = 1000,
		message = "note must be at most 1000 characters long",
		code = "note-length"
	))]
	pub note:       Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
	#[validate(length(
		min = 1,
		max = 2000,
		message = "message must be between 1 and 2000 characters long",
		code = "message-length"
	))]
	pub message: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
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

impl From<Booking> for BookingResponse {
	fn from(value: Booking) -> Self {
		Self {
			id:              value.id,
			car_id:          value.car_id,
			profile_id:      value.profile_id,
			start_date:      value.start_date,
			end_date:        value.end_date,
			status:          value.status,
			estimated_price: value.estimated_price,
			note:            value.note,
			admin_message:   value.admin_message,
			created_at:      value.created_at,
			updated_at:      value.updated_at,
		}
	}
}

/// The tier breakdown behind an estimated price
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
	pub months: i64,
	pub weeks:  i64,
	pub days:   i64,
	pub total:  BigDecimal,
}

impl From<Quote> for QuoteResponse {
	fn from(value: Quote) -> Self {
		Self {
			months: value.months,
			weeks:  value.weeks,
			days:   value.days,
			total:  value.total,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
	pub available: bool,
}
