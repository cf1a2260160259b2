// Core algorithm exports
pub mod scoring;

pub use scoring::{calculate_points, calculate_breakdown, PointsBreakdown};
