use actix_web::{http::Method, web, HttpRequest, HttpResponse};
use crate::core::calculate_breakdown;
use crate::error::ApiError;
use crate::models::{PointsResponse, ProcessReceiptResponse, Receipt};
use crate::services::ScoreStore;
use std::sync::Arc;

pub const PROCESS_PATH: &str = "/receipts/process";
const RECEIPTS_PREFIX: &str = "/receipts/";
const POINTS_SUFFIX: &str = "/points";

/// Application state shared across all handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<ScoreStore>,
}

impl AppState {
    pub fn new(store: Arc<ScoreStore>) -> Self {
        Self { store }
    }
}

/// Configure receipt routes
///
/// The process route is registered first so it takes precedence over the
/// catch-all lookup route below it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(
            web::resource(PROCESS_PATH)
                // Receipts have no size cap
                .app_data(web::PayloadConfig::new(usize::MAX))
                .to(process_receipt),
        )
        .service(web::resource("/receipts/{tail:.*}").to(get_points));
}

/// Process a receipt
///
/// POST /receipts/process
///
/// Request body:
/// ```json
/// {
///   "retailer": "Target",
///   "purchaseDate": "2022-01-01",
///   "purchaseTime": "13:01",
///   "items": [{ "shortDescription": "Mountain Dew 12PK", "price": "6.49" }],
///   "total": "6.49"
/// }
/// ```
///
/// Responds with `{"id": "<uuid>"}`.
async fn process_receipt(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    // Wrong method is reported as 404, not 405, matching the existing service.
    if *req.method() != Method::POST {
        tracing::info!("Rejected {} on {}", req.method(), req.path());
        return Err(ApiError::unsupported_method());
    }

    let receipt = decode_receipt(&body).map_err(|e| {
        tracing::info!("Invalid receipt body: {}", e);
        e
    })?;

    let breakdown = calculate_breakdown(&receipt);
    let points = breakdown.total();
    tracing::debug!("Points breakdown for {:?}: {:?}", receipt.retailer, breakdown.rules);

    let id = uuid::Uuid::new_v4().to_string();
    state.store.put(id.clone(), points);

    tracing::info!("Processed receipt {} ({} items): {} points", id, receipt.items.len(), points);

    Ok(HttpResponse::Ok().json(ProcessReceiptResponse { id }))
}

/// Get the points awarded for a receipt
///
/// GET /receipts/{id}/points
///
/// Responds with `{"points": <integer>}`.
async fn get_points(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let id = receipt_id_from_path(req.path());

    match state.store.get(id) {
        Some(points) => Ok(HttpResponse::Ok().json(PointsResponse { points })),
        None => {
            tracing::debug!("No receipt with id {:?}", id);
            Err(ApiError::receipt_not_found())
        }
    }
}

/// Decode the first JSON document in the body
///
/// Anything after the first complete value is ignored. A `null` document is an
/// empty receipt, and an empty body is reported as `EOF`.
pub fn decode_receipt(body: &[u8]) -> Result<Receipt, ApiError> {
    let mut documents = serde_json::Deserializer::from_slice(body).into_iter::<Option<Receipt>>();

    match documents.next() {
        Some(Ok(receipt)) => Ok(receipt.unwrap_or_default()),
        Some(Err(e)) => Err(ApiError::BadRequest(e.to_string())),
        None => Err(ApiError::BadRequest("EOF".to_string())),
    }
}

/// Strip `/receipts/` and a trailing `/points` from a lookup path
pub fn receipt_id_from_path(path: &str) -> &str {
    let id = path.strip_prefix(RECEIPTS_PREFIX).unwrap_or(path);
    id.strip_suffix(POINTS_SUFFIX).unwrap_or(id)
}
