use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::error;
use serde_json::json;

use crate::services::backend::BackendError;

pub mod account;
pub mod addon;
pub mod appointment;
pub mod auth;
pub mod event;
pub mod faq;
pub mod health;
pub mod reservation;
pub mod review;

/// Translate a backend failure into the response the frontend expects:
/// the backend's status code where one exists, 503 for transport failures,
/// and the customer-facing message in the body.
pub(crate) fn backend_failure(err: BackendError) -> HttpResponse {
    error!("Backend call failed: {}", err);
    // reqwest and actix-web carry different http crate versions, so the
    // status crosses over as a bare u16.
    let status = err
        .status_code()
        .and_then(|s| StatusCode::from_u16(s.as_u16()).ok())
        .unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
    HttpResponse::build(status).json(json!({ "message": err.user_message() }))
}
