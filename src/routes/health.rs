use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::services::backend::BackendClient;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(data: web::Data<Arc<BackendClient>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // Check backend API reachability
    let backend_result = check_backend(&data).await;
    health
        .services
        .insert("backend".to_string(), backend_result.clone());

    // Check identity provider configuration
    let identity_result = check_identity_config();
    health
        .services
        .insert("identity".to_string(), identity_result.clone());

    // Check token signing configuration
    let jwt_result = check_jwt_secret();
    health.services.insert("jwt".to_string(), jwt_result.clone());

    // Overall status is degraded when any dependency is not ok
    if backend_result.status != "ok"
        || identity_result.status != "ok"
        || jwt_result.status != "ok"
    {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_backend(client: &web::Data<Arc<BackendClient>>) -> ServiceStatus {
    match client.get_faqs().await {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Backend reachable at {}", client.base_url())),
        },
        Err(e) => {
            error!("Backend health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to reach backend: {}", e)),
            }
        }
    }
}

fn check_identity_config() -> ServiceStatus {
    let client_id = env::var("IDENTITY_CLIENT_ID").ok();
    let client_secret = env::var("IDENTITY_CLIENT_SECRET").ok();
    let auth_url = env::var("IDENTITY_AUTH_URL").ok();
    let token_url = env::var("IDENTITY_TOKEN_URL").ok();
    let redirect_uri = env::var("IDENTITY_REDIRECT_URI").ok();

    if client_id.is_some()
        && client_secret.is_some()
        && auth_url.is_some()
        && token_url.is_some()
        && redirect_uri.is_some()
    {
        let masked_id = mask_identifier(&client_id.unwrap_or_default());

        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "Identity provider configured, Client ID: {}, Redirect: {}",
                masked_id,
                redirect_uri.unwrap_or_default()
            )),
        }
    } else {
        let mut missing = Vec::new();

        if client_id.is_none() {
            missing.push("IDENTITY_CLIENT_ID");
        }
        if client_secret.is_none() {
            missing.push("IDENTITY_CLIENT_SECRET");
        }
        if auth_url.is_none() {
            missing.push("IDENTITY_AUTH_URL");
        }
        if token_url.is_none() {
            missing.push("IDENTITY_TOKEN_URL");
        }
        if redirect_uri.is_none() {
            missing.push("IDENTITY_REDIRECT_URI");
        }

        ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("Missing configuration: {}", missing.join(", "))),
        }
    }
}

/// Show only the edges of a configured identifier. Counts characters rather
/// than bytes so non-ASCII ids cannot split a code point.
fn mask_identifier(id: &str) -> String {
    let count = id.chars().count();
    if count > 8 {
        let prefix: String = id.chars().take(6).collect();
        let suffix: String = id.chars().skip(count - 4).collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "***".to_string()
    }
}

fn check_jwt_secret() -> ServiceStatus {
    match env::var("JWT_SECRET") {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Token signing key configured".to_string()),
        },
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some("JWT_SECRET not configured".to_string()),
        },
    }
}
