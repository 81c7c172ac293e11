/// TMDB metadata gateway
///
/// Thin pass-through to the TMDB v3 API: each operation issues one fresh
/// outbound GET and relays the response body verbatim on success. No retries,
/// no caching, no timeout override beyond the client default. A non-success
/// upstream status is reported uniformly without inspecting the body.
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// Movie catalog queries exposed to the routing layer.
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Free-text movie search with pagination.
    async fn search(&self, query: &str, page: u32) -> AppResult<Value>;

    /// Popular-movies listing with pagination.
    async fn popular(&self, page: u32) -> AppResult<Value>;

    /// Single movie detail, expanded with credits, videos and similar titles.
    async fn details(&self, movie_id: i64) -> AppResult<Value>;

    /// Recommendations for a movie.
    async fn recommendations(&self, movie_id: i64) -> AppResult<Value>;
}

#[derive(Clone)]
pub struct TmdbGateway {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbGateway {
    /// Creates a gateway from injected configuration. The credential and base
    /// address are never read from ambient state.
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
        }
    }

    #[cfg(test)]
    fn with_base_url(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Value> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(
                path = %path,
                status = %response.status(),
                "TMDB request failed"
            );
            return Err(AppError::Upstream("Failed to fetch from TMDB".to_string()));
        }

        let body = response.json().await?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbGateway {
    async fn search(&self, query: &str, page: u32) -> AppResult<Value> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Query parameter is required".to_string(),
            ));
        }

        let page = page.to_string();
        let body = self
            .get_json("/search/movie", &[("query", query), ("page", &page)])
            .await?;

        tracing::info!(query = %query, page = %page, "Movie search completed");
        Ok(body)
    }

    async fn popular(&self, page: u32) -> AppResult<Value> {
        let page = page.to_string();
        self.get_json("/movie/popular", &[("page", &page)]).await
    }

    async fn details(&self, movie_id: i64) -> AppResult<Value> {
        self.get_json(
            &format!("/movie/{}", movie_id),
            &[("append_to_response", "credits,videos,similar")],
        )
        .await
    }

    async fn recommendations(&self, movie_id: i64) -> AppResult<Value> {
        self.get_json(&format!("/movie/{}/recommendations", movie_id), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_query_rejected_before_any_request() {
        // Base URL points nowhere routable; reaching the network would error
        // differently than the InvalidInput we expect.
        let gateway = TmdbGateway::with_base_url(
            "test_key".to_string(),
            "http://invalid.localdomain".to_string(),
        );

        let err = gateway.search("   ", 1).await.unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert_eq!(msg, "Query parameter is required"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
