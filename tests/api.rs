use autorent::{AppState, Config, routes};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

/// Build a test server around a pool that is never connected
///
/// Every request below must be rejected at the boundary, before any
/// database access, so the pool only needs to exist.
fn test_app() -> TestServer {
	let config =
		Config { database_url: "postgres://localhost/unreachable".to_string() };
	let database_pool = config.create_database_pool();

	let router = routes::get_app_router(AppState { config, database_pool });

	TestServer::new(router).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_with_equal_dates_is_rejected() {
	let app = test_app();

	let response = app
		.post("/bookings")
		.json(&json!({
			"carId": 1,
			"profileId": 1,
			"startDate": "2025-05-10",
			"endDate": "2025-05-10",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	assert!(response.text().contains("end date must be after start date"));
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_with_inverted_dates_is_rejected() {
	let app = test_app();

	let response = app
		.post("/bookings")
		.json(&json!({
			"carId": 1,
			"profileId": 1,
			"startDate": "2025-05-10",
			"endDate": "2025-05-01",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_with_overlong_note_is_rejected() {
	let app = test_app();

	let response = app
		.post("/bookings")
		.json(&json!({
			"carId": 1,
			"profileId": 1,
			"startDate": "2025-05-10",
			"endDate": "2025-05-12",
			"note": "x".repeat(1001),
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(response.text().contains("note must be at most 1000 characters"));
}

#[tokio::test(flavor = "multi_thread")]
async fn quote_with_equal_dates_is_rejected() {
	let app = test_app();

	let response = app
		.get("/cars/1/quote")
		.add_query_param("startDate", "2025-05-10")
		.add_query_param("endDate", "2025-05-10")
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn availability_with_inverted_dates_is_rejected() {
	let app = test_app();

	let response = app
		.get("/cars/1/availability")
		.add_query_param("startDate", "2025-06-02")
		.add_query_param("endDate", "2025-06-01")
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn car_search_with_inverted_dates_is_rejected() {
	let app = test_app();

	let response = app
		.get("/cars/available")
		.add_query_param("startDate", "2025-06-02")
		.add_query_param("endDate", "2025-06-01")
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn car_with_negative_rate_is_rejected() {
	let app = test_app();

	let response = app
		.post("/cars")
		.json(&json!({
			"brand": "Toyota",
			"model": "Corolla",
			"carType": "sedan",
			"plateNumber": "ABC-123",
			"colour": "blue",
			"pricePerDay": "-10",
			"pricePerWeek": "600",
			"pricePerMonth": "2000",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(response.text().contains("price rates must be non-negative"));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_car_update_is_rejected() {
	let app = test_app();

	let response = app.post("/cars/1").json(&json!({})).await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
	assert!(response.text().contains("at least one field must be set"));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_admin_message_is_rejected() {
	let app = test_app();

	let response =
		app.post("/bookings/1/message").json(&json!({ "message": "" })).await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_route_is_not_found() {
	let app = test_app();

	let response = app.get("/vans").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
