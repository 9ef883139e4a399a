use actix_web::cookie::{Cookie, SameSite};
use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::{error, info};
use oauth2::{AuthorizationCode, PkceCodeVerifier};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::Claims;
use crate::models::user::{IdentityUserInfo, UserSession};
use crate::services::identity_service::{
    create_identity_oauth_client, exchange_code_for_token, get_identity_auth_url,
    get_identity_user_info,
};

const PKCE_COOKIE: &str = "pkce_verifier";
const STATE_COOKIE: &str = "oauth_state";

#[derive(Debug, Deserialize)]
pub struct AuthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    auth_token: String,
}

// Initiate the OAuth login flow against the identity provider
pub async fn login_init() -> impl Responder {
    let client = create_identity_oauth_client();
    let (auth_url, csrf_token, pkce_verifier) = get_identity_auth_url(&client);

    info!("Redirecting to identity provider for login");

    // The verifier and state round-trip through short-lived HttpOnly cookies
    // so the callback can be validated without server-side session state.
    let pkce_cookie = Cookie::build(PKCE_COOKIE, pkce_verifier.secret().clone())
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/api/auth")
        .finish();
    let state_cookie = Cookie::build(STATE_COOKIE, csrf_token.secret().clone())
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/api/auth")
        .finish();

    HttpResponse::Found()
        .insert_header((header::LOCATION, auth_url.to_string()))
        .cookie(pkce_cookie)
        .cookie(state_cookie)
        .finish()
}

// Handle the identity provider's redirect back to us
pub async fn auth_callback(
    req: HttpRequest,
    query: web::Query<AuthCallbackParams>,
) -> impl Responder {
    if let Some(error) = &query.error {
        error!("OAuth error received: {}", error);
        return HttpResponse::BadRequest().body(format!("OAuth error: {}", error));
    }

    let code = match &query.code {
        Some(code) => AuthorizationCode::new(code.clone()),
        None => return HttpResponse::BadRequest().body("Missing authorization code"),
    };

    let expected_state = req.cookie(STATE_COOKIE).map(|c| c.value().to_string());
    if expected_state.is_none() || query.state != expected_state {
        error!("OAuth state mismatch on callback");
        return HttpResponse::BadRequest().body("Invalid OAuth state");
    }

    let verifier = match req.cookie(PKCE_COOKIE) {
        Some(cookie) => PkceCodeVerifier::new(cookie.value().to_string()),
        None => return HttpResponse::BadRequest().body("Missing PKCE verifier"),
    };

    let client = create_identity_oauth_client();
    let access_token = match exchange_code_for_token(&client, code, verifier).await {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to exchange code for token: {}", e);
            return HttpResponse::InternalServerError().body(format!("Token error: {}", e));
        }
    };

    let user_info = match get_identity_user_info(&access_token).await {
        Ok(info) => info,
        Err(e) => {
            error!("Failed to get user info: {}", e);
            return HttpResponse::InternalServerError().body(format!("User info error: {}", e));
        }
    };

    match generate_token(&user_info) {
        Ok(token) => {
            let frontend_url =
                std::env::var("FRONTEND_URL").unwrap_or("http://localhost:3000".to_string());
            let redirect_url = format!("{}/?token={}", frontend_url, token);

            let mut expired_pkce = Cookie::build(PKCE_COOKIE, "").path("/api/auth").finish();
            expired_pkce.make_removal();
            let mut expired_state = Cookie::build(STATE_COOKIE, "").path("/api/auth").finish();
            expired_state.make_removal();

            HttpResponse::Found()
                .insert_header((header::LOCATION, redirect_url))
                .cookie(expired_pkce)
                .cookie(expired_state)
                .finish()
        }
        Err(_) => HttpResponse::InternalServerError().body("Failed to generate token"),
    }
}

// Echo the signed-in user's session from the verified claims
pub async fn user_session(claims: web::ReqData<Claims>) -> impl Responder {
    let claims = claims.into_inner();

    let user_session = UserSession {
        user_id: claims.sub,
        username: claims.preferred_username.unwrap_or_default(),
        first_name: claims.given_name.unwrap_or_default(),
        last_name: claims.family_name.unwrap_or_default(),
        email: claims.email.unwrap_or_default(),
    };
    HttpResponse::Ok().json(user_session)
}

pub fn generate_token(user_info: &IdentityUserInfo) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let now = Utc::now();

    let claims = Claims {
        sub: user_info.sub.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(24)).timestamp() as usize,
        preferred_username: user_info.preferred_username.clone(),
        given_name: user_info.given_name.clone(),
        family_name: user_info.family_name.clone(),
        email: user_info.email.clone(),
    };

    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(secret.as_ref()))
}
