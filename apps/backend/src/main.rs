use std::sync::Arc;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{web, App, HttpServer};
use backend::config::interpellation::InterpellationConfig;
use backend::infra::state::build_state;
use backend::interpellation::mailer::LogMailer;
use backend::middleware::cors::cors_middleware;
use backend::middleware::rate_limit::intake_rate_limit_config;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::security_headers::SecurityHeaders;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::security_config::SecurityConfig;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let security_config = SecurityConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });
    let interpellation = InterpellationConfig::from_env().unwrap_or_else(|e| {
        eprintln!("❌ {e}");
        std::process::exit(1);
    });

    let app_state = match build_state()
        .with_security(security_config)
        .with_interpellation(interpellation)
        .with_mailer(Arc::new(LogMailer))
        .build()
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %host,
        port,
        public_base_url = %app_state.interpellation.public_base_url,
        token_ttl_minutes = app_state.tokens.default_ttl_minutes(),
        "Starting interpellation backend"
    );

    let data = web::Data::new(app_state);
    let rate_limit_backend = InMemoryBackend::builder().build();

    HttpServer::new(move || {
        let intake_limiter = RateLimiter::builder(
            rate_limit_backend.clone(),
            intake_rate_limit_config().build(),
        )
        .add_headers()
        .build();

        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(SecurityHeaders)
            .app_data(data.clone())
            .service(
                web::scope("/api/interpellate")
                    .service(
                        web::resource("")
                            .wrap(intake_limiter)
                            .route(web::post().to(routes::interpellate::submit)),
                    )
                    .service(
                        web::resource("/confirm")
                            .route(web::get().to(routes::interpellate::confirm)),
                    ),
            )
            .service(web::scope("/health").configure(routes::health::configure_routes))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
