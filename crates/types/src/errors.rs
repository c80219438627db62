//! Error taxonomy shared by every subsystem.
//!
//! Every operation is all-or-nothing: any failure aborts with zero
//! observable state change, reported synchronously as the operation's
//! outcome.

use crate::scalars::{Amount, Tick, TokenId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("caller is not the administrator")]
    AccessDenied,

    #[error("caller does not own token {id}")]
    NotOwner { id: TokenId },

    #[error("invalid token id: {id}")]
    InvalidToken { id: TokenId },

    #[error("token {id} is already claimed")]
    AlreadyClaimed { id: TokenId },

    #[error("token {id} is not for sale")]
    NotListed { id: TokenId },

    #[error("caller already owns token {id}")]
    AlreadyOwner { id: TokenId },

    #[error("not enough funds: required {required}, offered {offered}")]
    InsufficientFunds { required: Amount, offered: Amount },

    #[error("sale price must be greater than zero")]
    InvalidPrice,

    #[error("token {id} is not ready to level up ({remaining} ticks remaining)")]
    NotReady { id: TokenId, remaining: Tick },

    #[error("maximum supply reached: requested total {requested}, cap {cap}")]
    MaxSupplyExceeded { requested: u64, cap: u64 },

    #[error("seed space exhausted while minting token {id}")]
    SeedExhausted { id: TokenId },

    #[error("invalid engine parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("ownership ledger failure: {0}")]
    Ledger(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
