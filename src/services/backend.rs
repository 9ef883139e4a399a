//! Thin client over the venue backend's REST API. All portal state lives in
//! the backend; this client only forwards, classifies failures, and decodes.

use log::error;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::env;
use uuid::Uuid;

use crate::models::addon::{AddOn, EntityPage};
use crate::models::appointment::Appointment;
use crate::models::event::{CommentPayload, Event, EventComment};
use crate::models::faq::Faq;
use crate::models::invoice::Invoice;
use crate::models::reservation::{Reservation, ReservationPayload};
use crate::models::review::{Review, ReviewPayload};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug)]
pub enum BackendError {
    BadRequest,
    NotFound,
    Conflict,
    Unavailable,
    Api(StatusCode),
    Network(reqwest::Error),
}

impl BackendError {
    fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => BackendError::BadRequest,
            StatusCode::NOT_FOUND => BackendError::NotFound,
            StatusCode::CONFLICT => BackendError::Conflict,
            StatusCode::SERVICE_UNAVAILABLE => BackendError::Unavailable,
            other => BackendError::Api(other),
        }
    }

    /// The message shown to the customer for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            BackendError::BadRequest => "Please review your data and try again.",
            BackendError::Conflict => {
                "Sorry! That time frame is already taken. Please pick another one."
            }
            BackendError::Unavailable | BackendError::Network(_) => {
                "Service currently unavalaible, please try again later."
            }
            BackendError::NotFound | BackendError::Api(_) => "Oops, something went wrong",
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            BackendError::BadRequest => Some(StatusCode::BAD_REQUEST),
            BackendError::NotFound => Some(StatusCode::NOT_FOUND),
            BackendError::Conflict => Some(StatusCode::CONFLICT),
            BackendError::Unavailable => Some(StatusCode::SERVICE_UNAVAILABLE),
            BackendError::Api(status) => Some(*status),
            BackendError::Network(_) => None,
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::BadRequest => write!(f, "Backend rejected the request (400)"),
            BackendError::NotFound => write!(f, "Backend resource not found (404)"),
            BackendError::Conflict => write!(f, "Backend reported a scheduling conflict (409)"),
            BackendError::Unavailable => write!(f, "Backend service unavailable (503)"),
            BackendError::Api(status) => write!(f, "Backend returned status {}", status),
            BackendError::Network(err) => write!(f, "Backend request failed: {}", err),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Network(err)
    }
}

pub struct BackendClient {
    http: ReqwestClient,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: ReqwestClient::new(),
            base_url,
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            env::var("BACKEND_API_URL").expect("Missing BACKEND_API_URL environment variable");
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn decode<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("Backend call failed with status {}", status);
            return Err(BackendError::from_status(status));
        }
        Ok(response.json::<T>().await?)
    }

    async fn expect_success(request: RequestBuilder) -> Result<(), BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("Backend call failed with status {}", status);
            return Err(BackendError::from_status(status));
        }
        Ok(())
    }

    // --- catalog ---

    /// The full add-on catalog, rate entries included.
    pub async fn get_add_ons(&self) -> Result<Vec<AddOn>, BackendError> {
        let page: EntityPage<AddOn> = Self::decode(self.request(Method::GET, "/addons")).await?;
        Ok(page.content)
    }

    // --- reservations ---

    pub async fn create_reservation(
        &self,
        payload: &ReservationPayload,
        request_id: Uuid,
    ) -> Result<Reservation, BackendError> {
        Self::decode(
            self.request(Method::POST, "/reservations")
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .json(payload),
        )
        .await
    }

    pub async fn update_reservation(
        &self,
        user_id: &str,
        reservation_id: i64,
        payload: &ReservationPayload,
        request_id: Uuid,
    ) -> Result<Reservation, BackendError> {
        Self::decode(
            self.request(
                Method::PUT,
                &format!("/users/{}/reservations/{}", user_id, reservation_id),
            )
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(payload),
        )
        .await
    }

    pub async fn cancel_reservation(
        &self,
        user_id: &str,
        reservation_id: i64,
    ) -> Result<(), BackendError> {
        Self::expect_success(self.request(
            Method::DELETE,
            &format!("/users/{}/reservations/{}", user_id, reservation_id),
        ))
        .await
    }

    /// Cancel several reservations at once.
    pub async fn cancel_reservations(
        &self,
        user_id: &str,
        reservation_ids: &[i64],
    ) -> Result<(), BackendError> {
        Self::expect_success(
            self.request(
                Method::DELETE,
                &format!("/users/{}/reservations", user_id),
            )
            .json(&json!({ "ids": reservation_ids })),
        )
        .await
    }

    pub async fn user_reservations(
        &self,
        user_id: &str,
    ) -> Result<Vec<Reservation>, BackendError> {
        Self::decode(self.request(Method::GET, &format!("/users/{}/reservations", user_id))).await
    }

    // --- appointments ---

    pub async fn create_appointment(
        &self,
        payload: &Appointment,
    ) -> Result<Appointment, BackendError> {
        Self::decode(self.request(Method::POST, "/appointments").json(payload)).await
    }

    pub async fn update_appointment(
        &self,
        user_id: &str,
        appointment_id: i64,
        payload: &Appointment,
    ) -> Result<Appointment, BackendError> {
        Self::decode(
            self.request(
                Method::PUT,
                &format!("/users/{}/appointments/{}", user_id, appointment_id),
            )
            .json(payload),
        )
        .await
    }

    pub async fn cancel_appointment(
        &self,
        user_id: &str,
        appointment_id: i64,
    ) -> Result<(), BackendError> {
        Self::expect_success(self.request(
            Method::DELETE,
            &format!("/users/{}/appointments/{}", user_id, appointment_id),
        ))
        .await
    }

    pub async fn user_appointments(
        &self,
        user_id: &str,
    ) -> Result<Vec<Appointment>, BackendError> {
        Self::decode(self.request(Method::GET, &format!("/users/{}/appointments", user_id))).await
    }

    // --- events & comments ---

    pub async fn get_events(&self) -> Result<Vec<Event>, BackendError> {
        let page: EntityPage<Event> = Self::decode(self.request(Method::GET, "/events")).await?;
        Ok(page.content)
    }

    pub async fn get_event(&self, event_id: i64) -> Result<Event, BackendError> {
        Self::decode(self.request(Method::GET, &format!("/events/{}", event_id))).await
    }

    pub async fn event_comments(
        &self,
        event_id: i64,
    ) -> Result<Vec<EventComment>, BackendError> {
        Self::decode(self.request(Method::GET, &format!("/events/{}/comments", event_id))).await
    }

    pub async fn post_comment(
        &self,
        event_id: i64,
        user_id: &str,
        payload: &CommentPayload,
    ) -> Result<EventComment, BackendError> {
        Self::decode(
            self.request(
                Method::POST,
                &format!("/users/{}/events/{}/comments", user_id, event_id),
            )
            .json(payload),
        )
        .await
    }

    // --- reviews ---

    pub async fn get_reviews(&self) -> Result<Vec<Review>, BackendError> {
        let page: EntityPage<Review> = Self::decode(self.request(Method::GET, "/reviews")).await?;
        Ok(page.content)
    }

    pub async fn post_review(
        &self,
        user_id: &str,
        payload: &ReviewPayload,
    ) -> Result<Review, BackendError> {
        Self::decode(
            self.request(Method::POST, &format!("/users/{}/reviews", user_id))
                .json(payload),
        )
        .await
    }

    // --- invoices & faqs ---

    pub async fn user_invoices(&self, user_id: &str) -> Result<Vec<Invoice>, BackendError> {
        Self::decode(self.request(Method::GET, &format!("/users/{}/invoices", user_id))).await
    }

    pub async fn get_faqs(&self) -> Result<Vec<Faq>, BackendError> {
        Self::decode(self.request(Method::GET, "/faqs")).await
    }
}
