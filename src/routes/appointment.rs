use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::appointment::Appointment;
use crate::routes::backend_failure;
use crate::services::backend::BackendClient;

// Book a tour appointment; visitors may book without signing in
pub async fn create(
    data: web::Data<Arc<BackendClient>>,
    input: web::Json<Appointment>,
) -> impl Responder {
    let backend = data.into_inner();
    let payload = input.into_inner();

    if let Err(errors) = payload.validate(Utc::now().naive_utc()) {
        return HttpResponse::BadRequest().json(json!({ "errors": errors }));
    }

    match backend.create_appointment(&payload).await {
        Ok(appointment) => HttpResponse::Created().json(appointment),
        Err(err) => backend_failure(err),
    }
}

pub async fn update(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    path: web::Path<i64>,
    input: web::Json<Appointment>,
) -> impl Responder {
    let backend = data.into_inner();
    let mut payload = input.into_inner();
    payload.user_id = Some(claims.sub.clone());

    if let Err(errors) = payload.validate(Utc::now().naive_utc()) {
        return HttpResponse::BadRequest().json(json!({ "errors": errors }));
    }

    match backend
        .update_appointment(&claims.sub, path.into_inner(), &payload)
        .await
    {
        Ok(appointment) => HttpResponse::Ok().json(appointment),
        Err(err) => backend_failure(err),
    }
}

pub async fn cancel(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    path: web::Path<i64>,
) -> impl Responder {
    let backend = data.into_inner();

    match backend
        .cancel_appointment(&claims.sub, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => backend_failure(err),
    }
}

pub async fn user_appointments(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
) -> impl Responder {
    let backend = data.into_inner();

    match backend.user_appointments(&claims.sub).await {
        Ok(appointments) => HttpResponse::Ok().json(appointments),
        Err(err) => backend_failure(err),
    }
}
