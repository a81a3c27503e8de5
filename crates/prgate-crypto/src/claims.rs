use serde::Serialize;

/// Lifetime of an application JWT, in seconds.
const APP_JWT_LIFETIME_IN_SECONDS: u64 = 60;
/// Backdating of `iat`, absorbing clock drift with GitHub.
const APP_JWT_CLOCK_DRIFT_IN_SECONDS: u64 = 60;

/// Claims authenticating as a GitHub App.
///
/// See <https://docs.github.com/en/apps/creating-github-apps/authenticating-with-a-github-app/generating-a-json-web-token-jwt-for-a-github-app>.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AppClaims {
    /// Issued at.
    pub iat: u64,
    /// Expiration time.
    pub exp: u64,
    /// GitHub App identifier.
    pub iss: u64,
}

impl AppClaims {
    /// Build claims for an application, valid from slightly before `now_ts`.
    pub fn new(app_id: u64, now_ts: u64) -> Self {
        Self {
            iat: now_ts.saturating_sub(APP_JWT_CLOCK_DRIFT_IN_SECONDS),
            exp: now_ts + APP_JWT_LIFETIME_IN_SECONDS,
            iss: app_id,
        }
    }
}
