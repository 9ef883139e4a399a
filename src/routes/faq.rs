use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::routes::backend_failure;
use crate::services::backend::BackendClient;

pub async fn get_faqs(data: web::Data<Arc<BackendClient>>) -> impl Responder {
    let backend = data.into_inner();

    match backend.get_faqs().await {
        Ok(faqs) => HttpResponse::Ok().json(faqs),
        Err(err) => backend_failure(err),
    }
}
