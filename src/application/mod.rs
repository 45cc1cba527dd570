pub mod token_service;

pub use token_service::{
    TokenRequestError, TokenService, MSG_INTERNAL, MSG_INVALID_ADDRESS, MSG_INVALID_CHAIN,
    MSG_UPSTREAM_UNAVAILABLE,
};
