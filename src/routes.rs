use crate::{
    api::{analytics, attendance, notification, user},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("non-zero period and burst size");
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let otp_limiter = Arc::new(build_limiter(config.rate_otp_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Extractor failures answer with the same `{"error": ...}` body as handlers.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|e, _| AppError::BadRequest(e.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|e, _| AppError::BadRequest(e.to_string()).into()),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            // Public routes
            .service(
                web::resource("/login")
                    .wrap(login_limiter)
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/verify-otp")
                    .wrap(otp_limiter)
                    .route(web::post().to(handlers::verify_otp)),
            )
            // Protected routes
            .service(
                web::scope("")
                    .wrap(from_fn(auth_middleware)) // authentication
                    .wrap(protected_limiter) // rate limiting
                    .service(web::resource("/punch-in").route(web::post().to(attendance::punch_in)))
                    .service(web::resource("/punch-out").route(web::post().to(attendance::punch_out)))
                    .service(
                        web::scope("/attendance")
                            // /attendance
                            .service(
                                web::resource("").route(web::get().to(attendance::all_attendance)),
                            )
                            // /attendance/{user_id}
                            .service(
                                web::resource("/{user_id}")
                                    .route(web::get().to(attendance::user_attendance)),
                            ),
                    )
                    .service(
                        web::scope("/notifications")
                            // /notifications/{user_id}
                            .service(
                                web::resource("/{user_id}")
                                    .route(web::get().to(notification::list_notifications)),
                            )
                            // /notifications/{id}/read
                            .service(
                                web::resource("/{id}/read")
                                    .route(web::put().to(notification::mark_read)),
                            ),
                    )
                    .service(
                        web::resource("/users")
                            .route(web::get().to(user::list_users))
                            .route(web::post().to(user::create_user)),
                    )
                    .service(
                        web::resource("/analytics").route(web::get().to(analytics::analytics)),
                    ),
            ),
    );
}

// LOGIN
//  ├─ employee               → access token
//  └─ admin / hr / manager   → OTP challenge
//       └─ POST /verify-otp  → access token

// API REQUEST
//  └─ Authorization: Bearer access_token
