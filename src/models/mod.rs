// Model exports
pub mod domain;
pub mod responses;

pub use domain::{Receipt, Item};
pub use responses::{ProcessReceiptResponse, PointsResponse, ErrorResponse};
