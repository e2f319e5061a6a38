pub mod cancel_token;
pub mod logger;
