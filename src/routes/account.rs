use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::user::UserSession;
use crate::routes::backend_failure;
use crate::services::backend::BackendClient;

// The profile page is rendered straight from the verified token claims
pub async fn profile(claims: web::ReqData<Claims>) -> impl Responder {
    let claims = claims.into_inner();

    HttpResponse::Ok().json(UserSession {
        user_id: claims.sub,
        username: claims.preferred_username.unwrap_or_default(),
        first_name: claims.given_name.unwrap_or_default(),
        last_name: claims.family_name.unwrap_or_default(),
        email: claims.email.unwrap_or_default(),
    })
}

pub async fn user_invoices(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
) -> impl Responder {
    let backend = data.into_inner();

    match backend.user_invoices(&claims.sub).await {
        Ok(invoices) => HttpResponse::Ok().json(invoices),
        Err(err) => backend_failure(err),
    }
}
