use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    routes::AppState,
};

/// External identity collaborator: resolves a bearer token to a user id or
/// rejects the request. Token mechanics live entirely behind this contract.
#[async_trait::async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> AppResult<Uuid>;
}

/// The authenticated caller, inserted into request extensions by
/// [`require_auth`] for handlers to extract.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Uuid);

/// Middleware guarding auth-required routes. Expects an
/// `Authorization: Bearer <token>` header and delegates verification to the
/// configured [`IdentityVerifier`].
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Unauthorized("No token, authorization denied".to_string())
        })?;

    let user_id = state.identity.verify(token).await?;

    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}

/// HTTP-backed verifier against the identity service's verify endpoint.
#[derive(Clone)]
pub struct RemoteIdentityVerifier {
    http_client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    user_id: Uuid,
}

impl RemoteIdentityVerifier {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: config.identity_api_url.clone(),
        }
    }
}

#[async_trait::async_trait]
impl IdentityVerifier for RemoteIdentityVerifier {
    async fn verify(&self, token: &str) -> AppResult<Uuid> {
        let url = format!("{}/verify", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized("Token is not valid".to_string()));
        }

        let verified: VerifyResponse = response.json().await?;
        Ok(verified.user_id)
    }
}
