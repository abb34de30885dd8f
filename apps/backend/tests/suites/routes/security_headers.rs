// Tests for security headers middleware
//
// Verifies the headers on the real routes, including confirmation redirects.

use actix_web::http::header;
use actix_web::{test, web, HttpResponse};

use crate::support::create_test_app;
use crate::support::fixtures::{confirm_uri, test_state};

async fn root_handler() -> HttpResponse {
    HttpResponse::Ok().body("Hello")
}

fn assert_common_headers(headers: &header::HeaderMap) {
    for (name, expected) in [
        ("x-content-type-options", "nosniff"),
        ("x-frame-options", "DENY"),
        (
            "strict-transport-security",
            "max-age=31536000; includeSubDomains",
        ),
        ("referrer-policy", "no-referrer"),
    ] {
        assert_eq!(
            headers.get(name).and_then(|v| v.to_str().ok()),
            Some(expected),
            "{name} should be {expected}"
        );
    }
    assert!(headers.contains_key("permissions-policy"));
}

#[actix_web::test]
async fn test_security_headers_on_health() {
    let (state, _mailer) = test_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let headers = resp.headers();
    assert_common_headers(headers);
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
    assert_eq!(
        headers.get("content-security-policy").unwrap(),
        "default-src 'none'; frame-ancestors 'none'"
    );
}

#[actix_web::test]
async fn test_security_headers_on_confirmation_redirect() {
    let (state, _mailer) = test_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&confirm_uri("not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 303);
    assert_common_headers(resp.headers());
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}

#[actix_web::test]
async fn test_non_api_paths_allow_caching() {
    let (state, _mailer) = test_state();
    let app = create_test_app(state)
        .with_routes(|cfg| {
            cfg.route("/", web::get().to(root_handler));
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_common_headers(resp.headers());
    assert!(resp.headers().get(header::CACHE_CONTROL).is_none());
}
