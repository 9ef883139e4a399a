use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::event::CommentPayload;
use crate::routes::backend_failure;
use crate::services::backend::BackendClient;

pub async fn get_events(data: web::Data<Arc<BackendClient>>) -> impl Responder {
    let backend = data.into_inner();

    match backend.get_events().await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(err) => backend_failure(err),
    }
}

pub async fn get_event(
    data: web::Data<Arc<BackendClient>>,
    path: web::Path<i64>,
) -> impl Responder {
    let backend = data.into_inner();

    match backend.get_event(path.into_inner()).await {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(err) => backend_failure(err),
    }
}

pub async fn get_comments(
    data: web::Data<Arc<BackendClient>>,
    path: web::Path<i64>,
) -> impl Responder {
    let backend = data.into_inner();

    match backend.event_comments(path.into_inner()).await {
        Ok(comments) => HttpResponse::Ok().json(comments),
        Err(err) => backend_failure(err),
    }
}

// Post a comment, or a reply when basedCommentId is set
pub async fn post_comment(
    data: web::Data<Arc<BackendClient>>,
    claims: web::ReqData<Claims>,
    path: web::Path<i64>,
    input: web::Json<CommentPayload>,
) -> impl Responder {
    let backend = data.into_inner();
    let payload = input.into_inner();

    if payload.content.trim().is_empty() {
        return HttpResponse::BadRequest().body("Comment content is required");
    }

    match backend
        .post_comment(path.into_inner(), &claims.sub, &payload)
        .await
    {
        Ok(comment) => HttpResponse::Created().json(comment),
        Err(err) => backend_failure(err),
    }
}
