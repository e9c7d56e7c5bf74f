use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::booking::{
	approve_booking,
	create_booking,
	get_booking,
	get_bookings,
	reject_booking,
	send_booking_message,
};
use crate::controllers::car::{
	create_car,
	delete_car,
	get_available_cars,
	get_car,
	get_car_availability,
	get_car_quote,
	get_cars,
	update_car,
};
use crate::controllers::healthcheck;

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/cars", car_routes())
		.nest("/bookings", booking_routes());

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Car inventory routes
fn car_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_cars).post(create_car))
		.route("/available", get(get_available_cars))
		.route("/{id}", get(get_car).post(update_car).delete(delete_car))
		.route("/{id}/quote", get(get_car_quote))
		.route("/{id}/availability", get(get_car_availability))
}

/// Rental application routes
fn booking_routes() -> Router<AppState> {
	Router::new()
		.route("/", get(get_bookings).post(create_booking))
		.route("/{id}", get(get_booking))
		.route("/{id}/approve", post(approve_booking))
		.route("/{id}/reject", post(reject_booking))
		.route("/{id}/message", post(send_booking_message))
}
