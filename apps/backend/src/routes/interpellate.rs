use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::interpellation::emails::{confirmation_email, interpellation_email};
use crate::interpellation::request::InterpellateRequest;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct InterpellateResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    pub token: Option<String>,
}

/// Validate the form, mint a token and email the confirmation link.
pub async fn submit(
    body: ValidatedJson<InterpellateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let draft = body.into_inner().validate().map_err(|e| {
        security::intake_rejected(e.code().as_str());
        e
    })?;

    let token = app_state.tokens.create_token(&draft)?;
    let link = app_state.interpellation.confirm_url(&token);
    let email = confirmation_email(&draft, &link, app_state.tokens.default_ttl_minutes());

    app_state.mailer.send(email).await.map_err(|e| {
        warn!(
            siren = %draft.siren,
            error = %Redacted(&e.to_string()),
            "Failed to send confirmation email"
        );
        AppError::from(e)
    })?;

    info!(
        siren = %draft.siren,
        requester = %Redacted(&draft.email),
        "Interpellation pending confirmation"
    );

    Ok(HttpResponse::Accepted().json(InterpellateResponse {
        status: "pending_confirmation",
    }))
}

/// Verify the emailed token and dispatch the interpellation.
///
/// Always answers with a redirect; every token failure lands on the same
/// "invalid or expired link" page. The query is parsed by hand: an unparsable
/// query string (e.g. a repeated `token`) must redirect too.
pub async fn confirm(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let config = &app_state.interpellation;

    let token = web::Query::<ConfirmQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().token)
        .filter(|t| !t.is_empty());

    let Some(token) = token.as_deref() else {
        security::token_rejected("missing");
        return Ok(see_other(&config.error_url(None)));
    };

    let payload = match app_state.tokens.verify_token(token) {
        Ok(payload) => payload,
        Err(_) => {
            security::token_rejected("invalid_or_expired");
            return Ok(see_other(&config.error_url(None)));
        }
    };

    if let Err(e) = app_state.mailer.send(interpellation_email(&payload)).await {
        warn!(
            siren = %payload.siren,
            error = %Redacted(&e.to_string()),
            "Failed to send interpellation email"
        );
        return Ok(see_other(&config.error_url(Some("delivery"))));
    }

    info!(
        siren = %payload.siren,
        community = %payload.community_name,
        cc = payload.is_cc,
        "Interpellation confirmed and sent"
    );

    Ok(see_other(&config.success_url(&payload.siren)))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(submit)));
    cfg.service(web::resource("/confirm").route(web::get().to(confirm)));
}
