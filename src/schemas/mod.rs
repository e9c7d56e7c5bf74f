//! Request and response schemas for the API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod booking;
pub mod car;

/// A date range supplied as query parameters
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
	pub start_date: NaiveDate,
	pub end_date:   NaiveDate,
}
