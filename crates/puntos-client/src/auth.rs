//! # Cashier Session
//!
//! Holds the bearer token issued by `POST /login` and hands it to every
//! authenticated request.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Lifecycle                               │
//! │                                                                         │
//! │  login(user, pass) ──► POST /login ──► access_token                     │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                                    Session::store(token)                │
//! │                                    (memory + token file)                │
//! │                                             │                           │
//! │         every request ◄── Authorization: Bearer <token>                 │
//! │                                             │                           │
//! │                        ┌────────────────────┴───────────────────┐       │
//! │                        ▼                                        ▼       │
//! │                 401 from backend                       `exp` in the past │
//! │                        │                                        │       │
//! │                        └──────────► Session::clear() ◄──────────┘       │
//! │                                     operator logs in again              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `exp` claim is read without verifying the signature: the client has
//! no key and only uses it to avoid sending a token it knows is stale.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Token information kept for the current cashier.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    /// The bearer token as issued.
    pub access_token: String,
    /// Expiry from the `exp` claim, when the token carries one.
    pub expires_at: Option<DateTime<Utc>>,
    /// `sub` claim (the cashier's user name), when present.
    pub subject: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
    #[serde(default)]
    sub: Option<String>,
}

impl TokenInfo {
    /// Wraps a raw token, reading `exp`/`sub` when it is a JWT.
    ///
    /// Opaque (non-JWT) tokens are accepted with no known expiry.
    pub fn from_token(access_token: impl Into<String>) -> Self {
        let access_token = access_token.into();

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(&access_token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|e| debug!(error = %e, "Token is not a readable JWT"))
            .ok();

        let expires_at = claims
            .as_ref()
            .and_then(|c| c.exp)
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single());
        let subject = claims.and_then(|c| c.sub);

        TokenInfo {
            access_token,
            expires_at,
            subject,
        }
    }

    /// Check if the token is past its `exp`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| now >= exp).unwrap_or(false)
    }
}

/// Bearer token holder shared by the client and the register.
///
/// Cloning is cheap; clones share the same token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<TokenInfo>>>,
    path: Option<PathBuf>,
}

impl Session {
    /// In-memory session; the token is lost when the process exits.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Session backed by a token file, loading any token already there.
    ///
    /// A missing or unreadable file just means "not logged in".
    pub fn with_file(path: PathBuf) -> Self {
        let token = match std::fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => {
                let info = TokenInfo::from_token(contents.trim());
                if info.is_expired() {
                    info!(?path, "Stored token has expired");
                    None
                } else {
                    debug!(?path, "Loaded stored token");
                    Some(info)
                }
            }
            Ok(_) => None,
            Err(e) => {
                debug!(?path, error = %e, "No stored token");
                None
            }
        };

        Session {
            token: Arc::new(RwLock::new(token)),
            path: Some(path),
        }
    }

    /// Stores a freshly issued token (memory, then file if configured).
    pub async fn store(&self, access_token: &str) -> ClientResult<()> {
        let info = TokenInfo::from_token(access_token);

        if let Some(path) = &self.path {
            let save_err = |e: std::io::Error| ClientError::SaveFailed {
                what: path.display().to_string(),
                reason: e.to_string(),
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(save_err)?;
            }
            write_token_file(path, access_token).map_err(save_err)?;
        }

        *self.token.write().await = Some(info);
        Ok(())
    }

    /// Returns the bearer token, or `NotLoggedIn` if absent or expired.
    ///
    /// An expired token is cleared on the way out.
    pub async fn bearer(&self) -> ClientResult<String> {
        {
            let guard = self.token.read().await;
            match guard.as_ref() {
                Some(token) if !token.is_expired() => return Ok(token.access_token.clone()),
                None => return Err(ClientError::NotLoggedIn),
                Some(_) => {}
            }
        }

        warn!("Bearer token expired, clearing session");
        self.clear().await;
        Err(ClientError::NotLoggedIn)
    }

    /// Current token info (without any expiry handling).
    pub async fn current(&self) -> Option<TokenInfo> {
        self.token.read().await.clone()
    }

    /// True if a non-expired token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| !t.is_expired())
            .unwrap_or(false)
    }

    /// Forgets the token in memory and on disk.
    pub async fn clear(&self) {
        *self.token.write().await = None;

        if let Some(path) = &self.path {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(?path, error = %e, "Failed to remove token file");
                }
            }
        }
    }
}

/// Writes the token readable by the owner only.
fn write_token_file(path: &Path, token: &str) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;

    // mode() only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(token.as_bytes())
}
