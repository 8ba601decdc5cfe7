//! Web layer for the flight search engine.
//!
//! Exposes itinerary search, the airport list and catalog statistics as
//! JSON over HTTP.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
