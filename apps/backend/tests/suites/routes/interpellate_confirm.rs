// Tests for GET /api/interpellate/confirm
//
// Every outcome is a 303: success goes to the thank-you page for the SIREN,
// any token problem goes to the same invalid-link page.

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::test;
use backend::interpellation::mailer::MemoryMailer;
use backend::interpellation::token::mint_interpellation_token;

use crate::common::assert_see_other;
use crate::support::create_test_app;
use crate::support::fixtures::{
    confirm_uri, sample_draft, test_security, test_state, test_state_with, PUBLIC_BASE_URL, SIREN,
};

fn error_page() -> String {
    format!("{PUBLIC_BASE_URL}/interpeller/lien-invalide")
}

fn fresh_token() -> String {
    mint_interpellation_token(&sample_draft(), 60, SystemTime::now(), &test_security())
        .expect("token should mint")
}

#[actix_web::test]
async fn test_valid_token_sends_interpellation() {
    let (state, mailer) = test_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&confirm_uri(&fresh_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        assert_see_other(&resp),
        format!("{PUBLIC_BASE_URL}/interpeller/merci/{SIREN}")
    );

    let sent = mailer.take();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to, vec!["maire@ville.fr", "adjoint@ville.fr"]);
    assert_eq!(email.cc, vec!["jean.dupont@example.com"]);
    assert_eq!(email.reply_to.as_deref(), Some("jean.dupont@example.com"));
    assert!(email.subject.contains("Test Ville"));
    assert!(email.body.contains("Jean Dupont"));
}

#[actix_web::test]
async fn test_requester_not_copied_without_cc() {
    let (state, mailer) = test_state();
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut draft = sample_draft();
    draft.is_cc = false;
    let token = mint_interpellation_token(&draft, 60, SystemTime::now(), &test_security())
        .expect("token should mint");

    let req = test::TestRequest::get().uri(&confirm_uri(&token)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_see_other(&resp);

    let sent = mailer.take();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].cc.is_empty());
}

#[actix_web::test]
async fn test_token_from_state_round_trips_through_route() {
    let (state, mailer) = test_state();
    let token = state
        .tokens
        .create_token(&sample_draft())
        .expect("token should mint");
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri(&confirm_uri(&token)).to_request();
    let resp = test::call_service(&app, req).await;

    assert!(assert_see_other(&resp).ends_with(SIREN));
    assert_eq!(mailer.sent().len(), 1);
}

#[actix_web::test]
async fn test_rejected_tokens_redirect_to_error_page() {
    let valid = fresh_token();
    let (payload, signature) = valid.split_once('.').expect("two segments");

    let mut flipped = signature.to_string();
    let last = if flipped.ends_with('A') { "B" } else { "A" };
    flipped.replace_range(flipped.len() - 1.., last);

    let expired =
        mint_interpellation_token(&sample_draft(), -1, SystemTime::now(), &test_security())
            .expect("token should mint");
    let foreign = mint_interpellation_token(
        &sample_draft(),
        60,
        SystemTime::now(),
        &backend::SecurityConfig::new("another-secret").expect("non-empty secret"),
    )
    .expect("token should mint");

    let cases = [
        format!("{payload}.{flipped}"),
        format!("{payload}x.{signature}"),
        expired,
        foreign,
        "garbage".to_string(),
        format!("{valid}.extra"),
        ".".to_string(),
    ];

    for token in cases {
        let (state, mailer) = test_state();
        let app = create_test_app(state).with_prod_routes().build().await;

        let req = test::TestRequest::get().uri(&confirm_uri(&token)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(assert_see_other(&resp), error_page(), "token {token:?}");
        assert!(mailer.sent().is_empty(), "nothing may be sent for {token:?}");
    }
}

#[actix_web::test]
async fn test_missing_or_unparsable_token_redirects_to_error_page() {
    for uri in [
        "/api/interpellate/confirm",
        "/api/interpellate/confirm?token=",
        "/api/interpellate/confirm?token=a&token=b",
    ] {
        let (state, mailer) = test_state();
        let app = create_test_app(state).with_prod_routes().build().await;

        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(assert_see_other(&resp), error_page(), "uri {uri}");
        assert!(mailer.sent().is_empty());
    }
}

#[actix_web::test]
async fn test_delivery_failure_redirects_with_reason() {
    let state = test_state_with(Arc::new(MemoryMailer::failing("relay refused")));
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&confirm_uri(&fresh_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        assert_see_other(&resp),
        format!("{}?reason=delivery", error_page())
    );
}

#[actix_web::test]
async fn test_confirmation_is_not_single_use() {
    let (state, mailer) = test_state();
    let app = create_test_app(state).with_prod_routes().build().await;
    let token = fresh_token();

    for _ in 0..2 {
        let req = test::TestRequest::get().uri(&confirm_uri(&token)).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(assert_see_other(&resp).ends_with(SIREN));
    }

    assert_eq!(mailer.sent().len(), 2);
}
