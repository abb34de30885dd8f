use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Build CORS middleware for the public site front-end:
/// - Origins come from CORS_ALLOWED_ORIGINS (comma-separated)
/// - Only GET and POST are used by the intake and confirmation routes
/// - Empty, "null" and non-http(s) entries are ignored
pub fn cors_middleware() -> Cors {
    // e.g. CORS_ALLOWED_ORIGINS=http://localhost:3000,https://eclaireurpublic.fr
    let allowed_raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in parse_allowed_origins(&allowed_raw) {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

/// Parse the origin list, falling back to localhost when nothing valid is set.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        origins
    }
}
