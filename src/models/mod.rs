//! Database model definitions

mod booking;
mod car;

pub use booking::*;
pub use car::*;
