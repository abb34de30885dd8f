use actix_web::web;

pub mod health;
pub mod interpellate;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wires these under scopes with additional
/// middleware (rate limiting, security headers). For tests we register the
/// same paths without those wrappers so that endpoint behavior can be
/// exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Interpellation routes: /api/interpellate, /api/interpellate/confirm
    cfg.service(web::scope("/api/interpellate").configure(interpellate::configure_routes));
}
