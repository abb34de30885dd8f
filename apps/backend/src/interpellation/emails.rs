//! Composition of the two messages in the interpellation flow.

use crate::interpellation::mailer::OutgoingEmail;
use crate::interpellation::request::split_recipients;
use crate::interpellation::token::{TokenDraft, TokenPayload};

/// Human-readable validity window, e.g. "24 heures" or "90 minutes".
pub fn format_validity(ttl_minutes: i64) -> String {
    match ttl_minutes {
        60 => "1 heure".to_string(),
        m if m > 60 && m % 60 == 0 => format!("{} heures", m / 60),
        1 => "1 minute".to_string(),
        m => format!("{m} minutes"),
    }
}

/// Message sent to the requester with the one-click confirmation link.
pub fn confirmation_email(draft: &TokenDraft, confirm_url: &str, ttl_minutes: i64) -> OutgoingEmail {
    let body = format!(
        "Bonjour {firstname},\n\
         \n\
         Vous avez demandé à interpeller les élus de la collectivité {community_name} ({community_type}).\n\
         \n\
         Pour confirmer l'envoi de votre message, cliquez sur le lien ci-dessous :\n\
         {confirm_url}\n\
         \n\
         Ce lien est valable {validity}. Si vous n'êtes pas à l'origine de cette demande, ignorez simplement ce message.\n\
         \n\
         L'équipe Éclaireur Public\n",
        firstname = draft.firstname,
        community_name = draft.community_name,
        community_type = draft.community_type,
        validity = format_validity(ttl_minutes),
    );

    OutgoingEmail {
        to: vec![draft.email.clone()],
        cc: Vec::new(),
        reply_to: None,
        subject: "Confirmez votre interpellation".to_string(),
        body,
    }
}

/// The advocacy message itself, addressed to the community's elected officials.
pub fn interpellation_email(payload: &TokenPayload) -> OutgoingEmail {
    let cc = if payload.is_cc {
        vec![payload.email.clone()]
    } else {
        Vec::new()
    };

    let body = format!(
        "Madame, Monsieur,\n\
         \n\
         En tant que citoyen(ne), je souhaite que la collectivité {community_name} publie ses données \
         de dépenses publiques (marchés publics et subventions) conformément à ses obligations de \
         transparence, afin que chacun puisse en prendre connaissance sur la plateforme Éclaireur Public.\n\
         \n\
         Je vous remercie de l'attention que vous porterez à cette demande et reste dans l'attente de votre réponse.\n\
         \n\
         {firstname} {lastname}\n\
         {email}\n",
        community_name = payload.community_name,
        firstname = payload.firstname,
        lastname = payload.lastname,
        email = payload.email,
    );

    OutgoingEmail {
        to: split_recipients(&payload.emails),
        cc,
        reply_to: Some(payload.email.clone()),
        subject: format!(
            "Interpellation citoyenne : transparence des dépenses publiques de {}",
            payload.community_name
        ),
        body,
    }
}
