pub mod interpellate_confirm;
pub mod rate_limiting;
pub mod request_trace;
pub mod security_headers;
