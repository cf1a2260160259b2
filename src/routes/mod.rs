// Route exports
pub mod receipts;

use actix_web::web;

pub use receipts::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(receipts::configure);
}
