//! # Autorent backend library
//!
//! Car-rental management backend: car inventory, rental applications, and
//! the availability/pricing rules that govern them.

#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use deadpool_diesel::postgres::{Object, Pool};

mod config;

pub mod controllers;
pub mod error;
pub mod models;
pub mod rental;
pub mod routes;
pub mod schema;
pub mod schemas;

pub use config::*;
pub use error::Error;

pub type DbPool = Pool;
pub type DbConn = Object;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:        Config,
	pub database_pool: DbPool,
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}
