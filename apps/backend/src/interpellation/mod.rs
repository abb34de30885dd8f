//! Citizen interpellation flow: signed confirmation tokens, form intake
//! validation, and the emails exchanged along the way.

pub mod emails;
pub mod mailer;
pub mod request;
pub mod token;

pub use mailer::{LogMailer, MailError, Mailer, MemoryMailer, OutgoingEmail};
pub use request::{CommunityType, InterpellateRequest};
pub use token::{
    mint_interpellation_token, verify_interpellation_token, InvalidToken, TokenDraft,
    TokenPayload, TokenService, DEFAULT_TTL_MINUTES,
};
