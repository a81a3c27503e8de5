use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use super::{CryptoError, Result};

/// JWT utilities.
pub struct JwtUtils;

impl JwtUtils {
    /// Create Jwt from an already parsed encoding key.
    pub fn create_jwt_with_key<T: Serialize>(key: &EncodingKey, claims: &T) -> Result<String> {
        encode(&Header::new(Algorithm::RS256), &claims, key)
            .map_err(|e| CryptoError::JwtCreationFailed { source: e })
    }

    /// Parse encoding key.
    pub fn parse_encoding_key(rsa_priv_key: &str) -> Result<EncodingKey> {
        EncodingKey::from_rsa_pem(rsa_priv_key.as_bytes())
            .map_err(|e| CryptoError::InvalidEncodingKey { source: e })
    }
}
