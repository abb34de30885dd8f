// Tests for rate limiting on form intake
//
// Mirrors the production wiring: the limiter wraps the POST intake resource
// only, so confirmation links and /health keep working once the intake
// quota is spent.

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{test, web, App};
use backend::middleware::rate_limit::{intake_rate_limit_config, INTAKE_MAX_REQUESTS};
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::routes::interpellate::{confirm, submit};

use crate::support::fixtures::{test_state, valid_request_json};

fn peer(ip: &str) -> std::net::SocketAddr {
    format!("{ip}:4000").parse().expect("socket addr")
}

#[actix_web::test]
async fn test_intake_limit_enforced_per_ip() {
    let (state, _mailer) = test_state();
    let backend = InMemoryBackend::builder().build();
    let limiter = RateLimiter::builder(backend, intake_rate_limit_config().build())
        .add_headers()
        .build();

    let app = test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api/interpellate")
                    .service(
                        web::resource("")
                            .wrap(limiter)
                            .route(web::post().to(submit)),
                    )
                    .service(web::resource("/confirm").route(web::get().to(confirm))),
            )
            .service(web::scope("/health").configure(routes::health::configure_routes)),
    )
    .await;

    let intake = |ip: &str| {
        test::TestRequest::post()
            .uri("/api/interpellate")
            .peer_addr(peer(ip))
            .set_json(valid_request_json())
            .to_request()
    };

    for i in 0..INTAKE_MAX_REQUESTS {
        let resp = test::call_service(&app, intake("203.0.113.7")).await;
        assert_eq!(resp.status().as_u16(), 202, "request {} within quota", i + 1);
        assert!(resp.headers().contains_key("x-ratelimit-remaining"));
        assert!(resp.headers().contains_key("x-ratelimit-limit"));
    }

    let resp = test::call_service(&app, intake("203.0.113.7")).await;
    assert_eq!(resp.status().as_u16(), 429);

    let resp = test::call_service(&app, intake("198.51.100.9")).await;
    assert_eq!(resp.status().as_u16(), 202, "other clients keep their quota");

    let req = test::TestRequest::get()
        .uri("/api/interpellate/confirm?token=bogus")
        .peer_addr(peer("203.0.113.7"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.status().as_u16(),
        303,
        "confirmation links still redirect after the intake quota is spent"
    );

    let req = test::TestRequest::get()
        .uri("/health")
        .peer_addr(peer("203.0.113.7"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "health is not rate limited");
}
