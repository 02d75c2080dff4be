//! # Backend HTTP Client
//!
//! Typed calls against the loyalty backend's REST API.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Flow                                    │
//! │                                                                         │
//! │  Register / CLI                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LoyaltyClient ── Session::bearer() ──► Authorization: Bearer <token>   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reqwest (timeout from config) ──────► backend                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2xx ──► JSON body ──► typed value                                      │
//! │  4xx/5xx ──► `detail` ──► ClientError::from_status                      │
//! │  401 on an authenticated call ──► Session::clear()                      │
//! │                                                                         │
//! │  Exactly one attempt per call. Nothing here retries.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use puntos_core::{CustomerBalance, Movement, PointsRequest};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::{Session, TokenInfo};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Backend Trait
// =============================================================================

/// The cashier-side operations the register needs from the backend.
///
/// Implemented by [`LoyaltyClient`]; tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait LoyaltyBackend {
    /// `GET /movimientos/resumen/{id}`
    async fn balance(&self, customer_id: i64) -> ClientResult<CustomerBalance>;

    /// `GET /movimientos/historial/{id}`
    async fn history(&self, customer_id: i64) -> ClientResult<Vec<Movement>>;

    /// `POST /caja/acumular-qr`
    async fn accumulate(&self, request: &PointsRequest) -> ClientResult<Movement>;

    /// `POST /caja/canjear-qr`
    async fn redeem(&self, request: &PointsRequest) -> ClientResult<Movement>;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

// =============================================================================
// HTTP Client
// =============================================================================

/// reqwest-backed loyalty client.
#[derive(Debug, Clone)]
pub struct LoyaltyClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl LoyaltyClient {
    /// Builds a client and a session as the configuration asks.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = match config.token_path() {
            Some(path) => Session::with_file(path),
            None => Session::in_memory(),
        };
        Self::with_session(config, session)
    }

    /// Builds a client around an existing session.
    pub fn with_session(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(LoyaltyClient {
            http,
            base_url: config.base_url().to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // =========================================================================
    // Cashier Login
    // =========================================================================

    /// `POST /login` with form fields; stores the returned bearer token.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<TokenInfo> {
        debug!(%username, "Logging in");

        let request = self
            .http
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)]);

        let response: LoginResponse = self.execute(request, false).await?;
        if let Some(kind) = response.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                warn!(token_type = %kind, "Unexpected token type");
            }
        }

        self.session.store(&response.access_token).await?;
        info!(%username, "Cashier logged in");

        Ok(TokenInfo::from_token(response.access_token))
    }

    /// Forgets the stored token. The backend keeps no server-side session.
    pub async fn logout(&self) {
        self.session.clear().await;
        info!("Cashier logged out");
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn authed_get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let token = self.session.bearer().await?;
        debug!(path, "GET");
        let request = self.http.get(self.url(path)).bearer_auth(token);
        self.execute(request, true).await
    }

    async fn authed_post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &PointsRequest,
    ) -> ClientResult<T> {
        let token = self.session.bearer().await?;
        debug!(path, puntos = body.puntos, referencia = %body.referencia, "POST");
        let request = self.http.post(self.url(path)).bearer_auth(token).json(body);
        self.execute(request, true).await
    }

    /// Sends once and decodes a success body or maps the failure.
    ///
    /// `authenticated` marks calls that carried the cashier token: a 401 on
    /// those clears the session.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        authenticated: bool,
    ) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let detail = read_detail(response).await;

        if status == StatusCode::UNAUTHORIZED && authenticated {
            warn!("Backend rejected the token, clearing session");
            self.session.clear().await;
        } else {
            debug!(status = status.as_u16(), ?detail, "Request failed");
        }

        Err(ClientError::from_status(status, detail))
    }
}

impl LoyaltyBackend for LoyaltyClient {
    async fn balance(&self, customer_id: i64) -> ClientResult<CustomerBalance> {
        self.authed_get(&format!("/movimientos/resumen/{}", customer_id))
            .await
    }

    async fn history(&self, customer_id: i64) -> ClientResult<Vec<Movement>> {
        self.authed_get(&format!("/movimientos/historial/{}", customer_id))
            .await
    }

    async fn accumulate(&self, request: &PointsRequest) -> ClientResult<Movement> {
        let movement: Movement = self.authed_post("/caja/acumular-qr", request).await?;
        info!(id = movement.id, puntos = movement.points, "Points accumulated");
        Ok(movement)
    }

    async fn redeem(&self, request: &PointsRequest) -> ClientResult<Movement> {
        let movement: Movement = self.authed_post("/caja/canjear-qr", request).await?;
        info!(id = movement.id, puntos = movement.points, "Points redeemed");
        Ok(movement)
    }
}

// =============================================================================
// Error Bodies
// =============================================================================

async fn read_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    detail_from_body(&body)
}

/// Extracts a readable message from a FastAPI error body.
///
/// `detail` is either a string or a list of `{loc, msg, type}` entries;
/// list messages are joined with `"; "`.
pub fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::String(_) => None,
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
