//! Stateless admin session tokens.
//!
//! A token is `v1.<payload>.<signature>` where the payload is base64url JSON
//! `{sub, iat, exp}` and the signature is HMAC-SHA256 over the encoded
//! payload. There is no server-side session table: a token is valid exactly
//! when its signature checks out and it has not expired.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "admin_session";

/// Session lifetime (24 hours).
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Minimum accepted signing secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

const TOKEN_VERSION: &str = "v1";
const MAX_TOKEN_LEN: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("malformed session token")]
    Malformed,
    #[error("unsupported session token version")]
    UnsupportedVersion,
    #[error("session token signature mismatch")]
    BadSignature,
    #[error("session token expired")]
    Expired,
}

/// Claims carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Email of the authenticated administrator.
    pub sub: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Signing key material plus token lifetime.
#[derive(Clone)]
pub struct SessionKeys {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::ConfigError(format!(
                "session secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        Ok(Self {
            secret,
            ttl_secs: SESSION_TTL_SECS,
        })
    }

    /// Read the signing secret from `GAZETTE_SESSION_SECRET`.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("GAZETTE_SESSION_SECRET").map_err(|_| {
            AppError::ConfigError("GAZETTE_SESSION_SECRET not set. Required to sign sessions.".into())
        })?;
        Self::new(secret)
    }

    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Mint a token for `email`, valid from `now` for the configured TTL.
    pub fn issue(&self, email: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let iat = now.timestamp();
        let claims = SessionClaims {
            sub: email.to_string(),
            iat,
            exp: iat + self.ttl_secs,
        };
        let payload_part = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let sig_part = URL_SAFE_NO_PAD.encode(self.sign(payload_part.as_bytes())?);
        Ok(format!("{TOKEN_VERSION}.{payload_part}.{sig_part}"))
    }

    /// Check a token's format, signature and expiry.
    ///
    /// Every caller that needs to know whether a request is authenticated
    /// goes through here.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(SessionError::Malformed);
        }
        let mut parts = token.split('.');
        let (Some(version), Some(payload_part), Some(sig_part), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SessionError::Malformed);
        };
        if version != TOKEN_VERSION {
            return Err(SessionError::UnsupportedVersion);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|_| SessionError::Malformed)?;
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| SessionError::BadSignature)?;
        mac.update(payload_part.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| SessionError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|_| SessionError::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| SessionError::Malformed)?;

        if now.timestamp() >= claims.exp {
            return Err(SessionError::Expired);
        }
        Ok(claims)
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::SessionError(e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
