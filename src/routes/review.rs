use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::review::ReviewPayload;
use crate::routes::backend_failure;
use crate::services::backend::BackendClient;

pub async fn get_reviews(data: web::Data<Arc<BackendClient>>) -> impl Responder {
    let backend = data.into_inner();

    match backend.get_reviews().await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => backend_failure(err),
    }
}

pub async fn post_review(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    input: web::Json<ReviewPayload>,
) -> impl Responder {
    let backend = data.into_inner();
    let payload = input.into_inner();

    if let Err(message) = payload.validate() {
        return HttpResponse::BadRequest().body(message);
    }

    match backend.post_review(&claims.sub, &payload).await {
        Ok(review) => HttpResponse::Created().json(review),
        Err(err) => backend_failure(err),
    }
}
