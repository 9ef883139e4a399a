use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use venue_portal::middleware::auth::AuthMiddleware;
use venue_portal::routes;
use venue_portal::services::backend::BackendClient;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let backend = Arc::new(BackendClient::from_env());
    println!("Backend client configured for {}", backend.base_url());

    let frontend_url =
        std::env::var("FRONTEND_URL").unwrap_or("http://localhost:3000".to_string());

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allowed_origin(&frontend_url)
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(backend.clone()))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/login", web::get().to(routes::auth::login_init))
                            .route("/callback", web::get().to(routes::auth::auth_callback))
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware)
                                    .route("/session", web::get().to(routes::auth::user_session)),
                            ),
                    )
                    .service(
                        web::scope("")
                            // Public routes
                            .route("/addons", web::get().to(routes::addon::get_add_ons))
                            .route("/faqs", web::get().to(routes::faq::get_faqs))
                            .route("/events", web::get().to(routes::event::get_events))
                            .route("/events/{id}", web::get().to(routes::event::get_event))
                            .route(
                                "/events/{id}/comments",
                                web::get().to(routes::event::get_comments),
                            )
                            .route("/reviews", web::get().to(routes::review::get_reviews))
                            .route(
                                "/reservations/quote",
                                web::post().to(routes::reservation::quote),
                            )
                            .route(
                                "/appointments",
                                web::post().to(routes::appointment::create),
                            )
                            // Protected routes
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware)
                                    .route(
                                        "/reservations",
                                        web::post().to(routes::reservation::create),
                                    )
                                    .route(
                                        "/reservations",
                                        web::delete().to(routes::reservation::cancel_many),
                                    )
                                    .route(
                                        "/reservations/{id}",
                                        web::put().to(routes::reservation::update),
                                    )
                                    .route(
                                        "/reservations/{id}",
                                        web::delete().to(routes::reservation::cancel),
                                    )
                                    .route(
                                        "/appointments/{id}",
                                        web::put().to(routes::appointment::update),
                                    )
                                    .route(
                                        "/appointments/{id}",
                                        web::delete().to(routes::appointment::cancel),
                                    )
                                    .route(
                                        "/events/{id}/comments",
                                        web::post().to(routes::event::post_comment),
                                    )
                                    .route("/reviews", web::post().to(routes::review::post_review))
                                    .service(
                                        web::scope("/account")
                                            .route(
                                                "/profile",
                                                web::get().to(routes::account::profile),
                                            )
                                            .route(
                                                "/reservations",
                                                web::get().to(
                                                    routes::reservation::user_reservations,
                                                ),
                                            )
                                            .route(
                                                "/appointments",
                                                web::get().to(
                                                    routes::appointment::user_appointments,
                                                ),
                                            )
                                            .route(
                                                "/invoices",
                                                web::get().to(routes::account::user_invoices),
                                            ),
                                    ),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
