//! Receipt Points - loyalty points service for purchase receipts
//!
//! Receipts are submitted over HTTP, scored by a fixed set of additive rules
//! and kept in memory so the score can be looked up by the returned id.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_points, calculate_breakdown, PointsBreakdown};
pub use error::ApiError;
pub use models::{Receipt, Item, ProcessReceiptResponse, PointsResponse};
pub use routes::AppState;
pub use services::ScoreStore;
