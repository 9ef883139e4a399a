use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, AuthorizationCode, ClientId,
    ClientSecret, CsrfToken, PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use reqwest::Client as ReqwestClient;
use std::env;
use url::Url;

use crate::models::user::IdentityUserInfo;

// Create a new OAuth client for the identity provider
pub fn create_identity_oauth_client() -> BasicClient {
    let client_id =
        env::var("IDENTITY_CLIENT_ID").expect("Missing IDENTITY_CLIENT_ID environment variable");
    let client_secret = env::var("IDENTITY_CLIENT_SECRET")
        .expect("Missing IDENTITY_CLIENT_SECRET environment variable");
    let auth_url =
        env::var("IDENTITY_AUTH_URL").expect("Missing IDENTITY_AUTH_URL environment variable");
    let token_url =
        env::var("IDENTITY_TOKEN_URL").expect("Missing IDENTITY_TOKEN_URL environment variable");
    let redirect_url = env::var("IDENTITY_REDIRECT_URI")
        .expect("Missing IDENTITY_REDIRECT_URI environment variable");

    BasicClient::new(
        ClientId::new(client_id),
        Some(ClientSecret::new(client_secret)),
        AuthUrl::new(auth_url).expect("Invalid authorization endpoint URL"),
        Some(TokenUrl::new(token_url).expect("Invalid token endpoint URL")),
    )
    .set_redirect_uri(RedirectUrl::new(redirect_url).expect("Invalid redirect URL"))
}

// Generate an authorization URL with a PKCE challenge
pub fn get_identity_auth_url(client: &BasicClient) -> (Url, CsrfToken, PkceCodeVerifier) {
    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
    let (url, csrf_token) = client
        .authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new("openid".to_string()))
        .add_scope(Scope::new("email".to_string()))
        .add_scope(Scope::new("profile".to_string()))
        .set_pkce_challenge(pkce_challenge)
        .url();

    (url, csrf_token, pkce_verifier)
}

// Exchange an authorization code for an access token
pub async fn exchange_code_for_token(
    client: &BasicClient,
    code: AuthorizationCode,
    pkce_verifier: PkceCodeVerifier,
) -> Result<String, String> {
    client
        .exchange_code(code)
        .set_pkce_verifier(pkce_verifier)
        .request_async(async_http_client)
        .await
        .map(|token| token.access_token().secret().clone())
        .map_err(|e| format!("Failed to exchange authorization code: {}", e))
}

// Fetch user information using the access token
pub async fn get_identity_user_info(access_token: &str) -> Result<IdentityUserInfo, String> {
    let userinfo_url = env::var("IDENTITY_USERINFO_URL")
        .map_err(|_| "Missing IDENTITY_USERINFO_URL environment variable".to_string())?;

    let client = ReqwestClient::new();
    let response = client
        .get(userinfo_url)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to request user info: {}", e))?;

    if !response.status().is_success() {
        return Err(format!(
            "Identity provider returned error status: {}",
            response.status()
        ));
    }

    response
        .json::<IdentityUserInfo>()
        .await
        .map_err(|e| format!("Failed to parse user info: {}", e))
}
