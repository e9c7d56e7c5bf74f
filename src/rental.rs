//! Core rental rules: date-range validation, availability overlap, and the
//! tiered price calculation.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::error::{BookingError, Error};

/// Days covered by one month tier of the rate card.
pub const DAYS_PER_MONTH: i64 = 30;
/// Days covered by one week tier of the rate card.
pub const DAYS_PER_WEEK: i64 = 7;

/// Whether two closed date ranges share at least one calendar day
///
/// Touching endpoints count as an overlap: a booking ending on the day
/// another starts blocks it.
#[must_use]
pub fn ranges_overlap(
	start_a: NaiveDate,
	end_a: NaiveDate,
	start_b: NaiveDate,
	end_b: NaiveDate,
) -> bool {
	start_a <= end_b && start_b <= end_a
}

/// A validated rental date range
///
/// The end date always lies strictly after the start date. Both bounds are
/// calendar dates, so time-of-day can never skew a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RentalPeriod {
	start: NaiveDate,
	end:   NaiveDate,
}

impl RentalPeriod {
	/// Construct a new [`RentalPeriod`]
	///
	/// # Errors
	/// Fails if the end date does not lie strictly after the start date
	pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, Error> {
		if end <= start {
			return Err(BookingError::InvalidPeriod { start, end }.into());
		}

		Ok(Self { start, end })
	}

	#[must_use]
	pub fn start(&self) -> NaiveDate { self.start }

	#[must_use]
	pub fn end(&self) -> NaiveDate { self.end }

	/// The billable length of this period in whole days, exclusive of the
	/// end date
	///
	/// # Errors
	/// Fails if the period spans no billable days
	pub fn days(&self) -> Result<i64, Error> {
		let days = (self.end - self.start).num_days();

		if days <= 0 {
			return Err(BookingError::InvalidDuration(days).into());
		}

		Ok(days)
	}

	/// Whether this period shares at least one calendar day with the given
	/// range
	#[must_use]
	pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
		ranges_overlap(self.start, self.end, start, end)
	}
}

/// A price quote for a rental period, decomposed into rate-card tiers
///
/// The decomposition is a fixed greedy one: whole months first, then whole
/// weeks out of the remainder, then single days. It never searches for a
/// cheaper combination, as the tier rates are independently configurable
/// and the published prices follow this exact breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
	pub months: i64,
	pub weeks:  i64,
	pub days:   i64,
	pub total:  BigDecimal,
}

impl Quote {
	/// Price the given period against a rate card
	///
	/// # Errors
	/// Fails if the period spans no billable days
	pub fn for_period(
		period: &RentalPeriod,
		price_per_day: &BigDecimal,
		price_per_week: &BigDecimal,
		price_per_month: &BigDecimal,
	) -> Result<Self, Error> {
		let total_days = period.days()?;

		let months = total_days / DAYS_PER_MONTH;
		let remainder = total_days % DAYS_PER_MONTH;

		let weeks = remainder / DAYS_PER_WEEK;
		let days = remainder % DAYS_PER_WEEK;

		let total = price_per_month * BigDecimal::from(months)
			+ price_per_week * BigDecimal::from(weeks)
			+ price_per_day * BigDecimal::from(days);

		Ok(Self { months, weeks, days, total })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	fn rates() -> (BigDecimal, BigDecimal, BigDecimal) {
		(BigDecimal::from(100), BigDecimal::from(600), BigDecimal::from(2000))
	}

	#[test]
	fn period_rejects_equal_dates() {
		let day = date(2025, 5, 10);

		assert!(RentalPeriod::new(day, day).is_err());
	}

	#[test]
	fn period_rejects_inverted_dates() {
		assert!(
			RentalPeriod::new(date(2025, 5, 10), date(2025, 5, 1)).is_err()
		);
	}

	#[test]
	fn one_day_period_counts_one_day() {
		let period =
			RentalPeriod::new(date(2025, 5, 10), date(2025, 5, 11)).unwrap();

		assert_eq!(period.days().unwrap(), 1);
	}

	#[test]
	fn overlap_is_closed_interval() {
		let period =
			RentalPeriod::new(date(2025, 5, 10), date(2025, 5, 15)).unwrap();

		// Fully before and fully after
		assert!(!period.overlaps(date(2025, 5, 1), date(2025, 5, 9)));
		assert!(!period.overlaps(date(2025, 5, 16), date(2025, 5, 20)));

		// Touching endpoints still block
		assert!(period.overlaps(date(2025, 5, 1), date(2025, 5, 10)));
		assert!(period.overlaps(date(2025, 5, 15), date(2025, 5, 20)));

		// Partial and full containment
		assert!(period.overlaps(date(2025, 5, 12), date(2025, 5, 20)));
		assert!(period.overlaps(date(2025, 5, 1), date(2025, 5, 30)));
		assert!(period.overlaps(date(2025, 5, 11), date(2025, 5, 14)));
	}

	#[test]
	fn thirty_one_days_prices_as_month_plus_day() {
		let (per_day, per_week, per_month) = rates();
		let period =
			RentalPeriod::new(date(2025, 3, 1), date(2025, 4, 1)).unwrap();

		let quote =
			Quote::for_period(&period, &per_day, &per_week, &per_month)
				.unwrap();

		assert_eq!(quote.months, 1);
		assert_eq!(quote.weeks, 0);
		assert_eq!(quote.days, 1);
		assert_eq!(quote.total, BigDecimal::from(2100));
	}

	#[test]
	fn twenty_nine_days_never_rounds_up_to_a_month() {
		let (per_day, per_week, per_month) = rates();
		let period =
			RentalPeriod::new(date(2025, 5, 1), date(2025, 5, 30)).unwrap();

		let quote =
			Quote::for_period(&period, &per_day, &per_week, &per_month)
				.unwrap();

		// 29 days = 4 weeks + 1 day under the greedy breakdown, even though
		// a month would be cheaper at these rates
		assert_eq!(quote.months, 0);
		assert_eq!(quote.weeks, 4);
		assert_eq!(quote.days, 1);
		assert_eq!(quote.total, BigDecimal::from(2500));
	}

	#[test]
	fn single_day_prices_at_day_rate() {
		let (per_day, per_week, per_month) = rates();
		let period =
			RentalPeriod::new(date(2025, 5, 10), date(2025, 5, 11)).unwrap();

		let quote =
			Quote::for_period(&period, &per_day, &per_week, &per_month)
				.unwrap();

		assert_eq!((quote.months, quote.weeks, quote.days), (0, 0, 1));
		assert_eq!(quote.total, BigDecimal::from(100));
	}

	#[test]
	fn quote_is_deterministic() {
		let (per_day, per_week, per_month) = rates();
		let period =
			RentalPeriod::new(date(2025, 6, 1), date(2025, 6, 20)).unwrap();

		let first =
			Quote::for_period(&period, &per_day, &per_week, &per_month)
				.unwrap();
		let second =
			Quote::for_period(&period, &per_day, &per_week, &per_month)
				.unwrap();

		assert_eq!(first, second);
	}
}
