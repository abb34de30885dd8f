//! Security headers middleware.
//!
//! Every response gets nosniff, frame denial, HSTS, a referrer policy and a
//! permissions policy. API and health responses additionally get a
//! `default-src 'none'` CSP and `Cache-Control: no-store`, which also keeps
//! confirmation redirects out of shared caches.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use actix_web::Error as ActixError;
use futures_util::future::{ready, LocalBoxFuture, Ready};

const API_CSP: &str = "default-src 'none'; frame-ancestors 'none'";
const DEFAULT_CSP: &str = "default-src 'self'; frame-ancestors 'none'";
const PERMISSIONS: &str = "geolocation=(), microphone=(), camera=(), payment=(), usb=()";

pub struct SecurityHeaders;

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = SecurityHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware { service }))
    }
}

pub struct SecurityHeadersMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let api = is_api_path(req.path());
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            apply_security_headers(res.headers_mut(), api);
            Ok(res)
        })
    }
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api/") || path == "/health"
}

fn apply_security_headers(headers: &mut HeaderMap, api: bool) {
    let set = |headers: &mut HeaderMap, name: &'static str, value: &'static str| {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    };

    set(headers, "x-content-type-options", "nosniff");
    set(headers, "x-frame-options", "DENY");
    // Browsers ignore HSTS over plain HTTP.
    set(
        headers,
        "strict-transport-security",
        "max-age=31536000; includeSubDomains",
    );
    set(headers, "referrer-policy", "no-referrer");
    set(headers, "permissions-policy", PERMISSIONS);

    if api {
        set(headers, "content-security-policy", API_CSP);
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    } else {
        set(headers, "content-security-policy", DEFAULT_CSP);
    }
}
