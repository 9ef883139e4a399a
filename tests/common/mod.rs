use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpResponse, Responder};

pub struct TestApp;

impl TestApp {
    pub async fn new() -> Self {
        Self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/login", web::get().to(login_redirect))
                            .route("/callback", web::get().to(callback_missing_code))
                            .route("/session", web::get().to(unauthorized_handler)),
                    )
                    .route("/addons", web::get().to(get_add_ons))
                    .route("/faqs", web::get().to(get_faqs))
                    .route("/events", web::get().to(get_events))
                    .route("/events/{id}", web::get().to(get_event_by_id))
                    .route("/events/{id}/comments", web::get().to(get_comments))
                    .route("/events/{id}/comments", web::post().to(unauthorized_handler))
                    .route("/reviews", web::get().to(get_reviews))
                    .route("/reviews", web::post().to(unauthorized_handler))
                    .route("/reservations/quote", web::post().to(quote))
                    .route("/appointments", web::post().to(create_appointment))
                    .route("/reservations", web::post().to(unauthorized_handler))
                    .route("/reservations", web::delete().to(unauthorized_handler))
                    .route("/reservations/{id}", web::put().to(unauthorized_handler))
                    .route("/reservations/{id}", web::delete().to(unauthorized_handler))
                    .route("/appointments/{id}", web::put().to(unauthorized_handler))
                    .route("/appointments/{id}", web::delete().to(unauthorized_handler))
                    .service(
                        web::scope("/account")
                            .route("/profile", web::get().to(unauthorized_handler))
                            .route("/reservations", web::get().to(unauthorized_handler))
                            .route("/appointments", web::get().to(unauthorized_handler))
                            .route("/invoices", web::get().to(unauthorized_handler)),
                    ),
            )
    }
}

// Mock handler functions for testing
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

async fn get_add_ons() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn get_faqs() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn get_events() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn get_event_by_id() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({"message": "Oops, something went wrong"}))
}

async fn get_comments() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn get_reviews() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn quote() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "addOnsTotalCost": 0,
        "subtotal": 0,
        "taxRate": 0.07,
        "tax": 0,
        "totalPrice": 0
    }))
}

async fn create_appointment() -> impl Responder {
    HttpResponse::BadRequest().json(serde_json::json!({"errors": ["First name is required"]}))
}

async fn login_redirect() -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "https://identity.example.com/auth"))
        .finish()
}

async fn callback_missing_code() -> impl Responder {
    HttpResponse::BadRequest().body("Missing authorization code")
}

async fn unauthorized_handler() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Unauthorized"}))
}

pub fn get_test_user_id() -> String {
    "test-user-123".to_string()
}
