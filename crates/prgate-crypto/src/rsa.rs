use std::path::Path;

use jsonwebtoken::EncodingKey;
use rsa::pkcs1::EncodeRsaPrivateKey;

use crate::{CryptoError, JwtUtils, Result};

const RSA_SIZE: u32 = 2048;

/// RSA utilities.
pub struct RsaUtils;
/// Private RSA key.
#[derive(Clone)]
pub struct PrivateRsaKey(String);

impl PrivateRsaKey {
    /// Wrap PEM contents.
    pub fn from_pem<T: Into<String>>(pem: T) -> Self {
        Self(pem.into())
    }

    /// Read PEM contents from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map(Self)
            .map_err(|e| CryptoError::PrivateKeyUnreadable {
                path: path.display().to_string(),
                source: e,
            })
    }

    /// Get key as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key for JWT signing.
    pub fn to_encoding_key(&self) -> Result<EncodingKey> {
        JwtUtils::parse_encoding_key(&self.0)
    }
}

impl std::fmt::Debug for PrivateRsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateRsaKey(***)")
    }
}

impl RsaUtils {
    /// Generate a RSA private key.
    pub fn generate_rsa_key() -> PrivateRsaKey {
        use ::rsa::RsaPrivateKey;
        use rand::rngs::OsRng;

        let mut rng = OsRng;
        let priv_key =
            RsaPrivateKey::new(&mut rng, RSA_SIZE as usize).expect("failed to generate a key");
        let priv_key_pem = priv_key
            .to_pkcs1_pem(rsa::pkcs8::LineEnding::LF)
            .expect("RSA private key to PEM conversion should work");

        PrivateRsaKey(priv_key_pem.to_string())
    }

    /// Check that a PEM string holds a usable RSA private key.
    pub fn is_valid_private_key(pem: &str) -> bool {
        JwtUtils::parse_encoding_key(pem).is_ok()
    }
}
