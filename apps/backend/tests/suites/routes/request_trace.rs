// Tests for request tracing
//
// Every response carries an x-request-id; problem responses carry the same
// id in x-trace-id and in the body.

use actix_web::test;
use serde_json::json;

use crate::common::assert_problem_details_structure;
use crate::support::create_test_app;
use crate::support::fixtures::test_state;

#[actix_web::test]
async fn test_request_id_is_a_fresh_uuid() {
    let (state, _mailer) = test_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut seen = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        let id = resp
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .expect("x-request-id header")
            .to_string();
        assert!(uuid::Uuid::parse_str(&id).is_ok(), "{id} is not a UUID");
        seen.push(id);
    }

    assert_ne!(seen[0], seen[1]);
}

#[actix_web::test]
async fn test_problem_trace_id_matches_request_id() {
    let (state, _mailer) = test_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/interpellate")
        .set_json(json!({ "siren": "1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header")
        .to_string();

    let problem = assert_problem_details_structure(resp, 400, "BAD_REQUEST", None).await;
    assert_eq!(problem.trace_id, request_id);
}
