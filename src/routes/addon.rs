use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::routes::backend_failure;
use crate::services::backend::BackendClient;

// The catalog the reservation form renders: add-ons plus the rate entries
pub async fn get_add_ons(data: web::Data<Arc<BackendClient>>) -> impl Responder {
    let backend = data.into_inner();

    match backend.get_add_ons().await {
        Ok(add_ons) => HttpResponse::Ok().json(add_ons),
        Err(err) => backend_failure(err),
    }
}
