//! Crypto module.

mod claims;
mod errors;
mod jwt;
mod rsa;

pub use jwt::JwtUtils;

pub use self::{
    claims::AppClaims,
    errors::{CryptoError, Result},
    rsa::{PrivateRsaKey, RsaUtils},
};
