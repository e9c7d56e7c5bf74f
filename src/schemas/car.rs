use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::ValidationError;
use validator_derive::Validate;

use crate::models::{Car, CarUpdate};

fn validate_rate(rate: &BigDecimal) -> Result<(), ValidationError> {
	if *rate < BigDecimal::from(0) {
		let mut error = ValidationError::new("rate-negative");
		error.message = Some("price rates must be non-negative".into());

		return Err(error);
	}

	Ok(())
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
	#[validate(length(
		min = 1,
		max = 64,
		message = "brand must be between 1 and 64 characters long",
		code = "brand-length"
	))]
	pub brand:           String,
	#[validate(length(
		min = 1,
		max = 64,
		message = "model must be between 1 and 64 characters long",
		code = "model-length"
	))]
	pub model:           String,
	#[validate(length(
		min = 1,
		max = 32,
		message = "car type must be between 1 and 32 characters long",
		code = "car-type-length"
	))]
	pub car_type:        String,
	#[validate(length(
		min = 1,
		max = 16,
		message = "plate number must be between 1 and 16 characters long",
		code = "plate-number-length"
	))]
	pub plate_number:    String,
	#[validate(length(
		min = 1,
		max = 32,
		message = "colour must be between 1 and 32 characters long",
		code = "colour-length"
	))]
	pub colour:          String,
	#[validate(custom(function = validate_rate))]
	pub price_per_day:   BigDecimal,
	#[validate(custom(function = validate_rate))]
	pub price_per_week:  BigDecimal,
	#[validate(custom(function = validate_rate))]
	pub price_per_month: BigDecimal,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
	pub brand:           Option<String>,
	pub model:           Option<String>,
	pub car_type:        Option<String>,
	pub plate_number:    Option<String>,
	pub colour:          Option<String>,
	#[validate(custom(function = validate_rate))]
	pub price_per_day:   Option<BigDecimal>,
	#[validate(custom(function = validate_rate))]
	pub price_per_week:  Option<BigDecimal>,
	#[validate(custom(function = validate_rate))]
	pub price_per_month: Option<BigDecimal>,
}

impl From<UpdateCarRequest> for CarUpdate {
	fn from(value: UpdateCarRequest) -> Self {
		Self {
			brand:           value.brand,
			model:           value.model,
			car_type:        value.car_type,
			plate_number:    value.plate_number,
			colour:          value.colour,
			price_per_day:   value.price_per_day,
			price_per_week:  value.price_per_week,
			price_per_month: value.price_per_month,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
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

impl From<Car> for CarResponse {
	fn from(value: Car) -> Self {
		Self {
			id:              value.id,
			brand:           value.brand,
			model:           value.model,
			car_type:        value.car_type,
			plate_number:    value.plate_number,
			colour:          value.colour,
			price_per_day:   value.price_per_day,
			price_per_week:  value.price_per_week,
			price_per_month: value.price_per_month,
			created_at:      value.created_at,
			updated_at:      value.updated_at,
		}
	}
}
