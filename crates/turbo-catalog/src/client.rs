//! HTTP catalog client with dependency tagging.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use turbo_filter::catalog::{FacetCatalog, FacetOption};
use turbo_filter::BrandId;

use crate::dependency::DependencyTag;
use crate::error::FetchError;
use crate::query::{ProductQuery, ProductsResponse};
use crate::retry::RetryPolicy;
use crate::service::CatalogService;
use crate::timeout::TimeoutConfig;

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Create from a dependency tag's defaults.
    pub fn from_tag(tag: DependencyTag) -> Self {
        Self {
            timeout: TimeoutConfig::from_total(tag.default_timeout()),
            retry: RetryPolicy::new(tag.default_max_retries()),
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            timeout: TimeoutConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Catalog service client speaking JSON over HTTP.
///
/// Each endpoint uses its `DependencyTag` defaults unless a policy override
/// is installed with `with_policy`.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    connect_timeout: Duration,
    base_url: String,
    policy_override: Option<FetchPolicy>,
}

impl HttpCatalogClient {
    /// Create a client for a service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }

        let connect_timeout = TimeoutConfig::default().connect;
        Ok(Self {
            http: build_http(connect_timeout)?,
            connect_timeout,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy_override: None,
        })
    }

    /// Use one policy for every endpoint.
    ///
    /// The connection pool is rebuilt so the policy's connect timeout
    /// applies as well as its total budget.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Result<Self, FetchError> {
        if policy.timeout.connect != self.connect_timeout {
            self.http = build_http(policy.timeout.connect)?;
            self.connect_timeout = policy.timeout.connect;
        }
        self.policy_override = Some(policy);
        Ok(self)
    }

    /// Connect timeout of the underlying HTTP client.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Get the service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Policy in effect for an endpoint.
    pub fn policy_for(&self, tag: DependencyTag) -> FetchPolicy {
        self.policy_override
            .clone()
            .unwrap_or_else(|| FetchPolicy::from_tag(tag))
    }

    fn url_for(&self, tag: DependencyTag) -> String {
        format!("{}{}", self.base_url, tag.path())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        tag: DependencyTag,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let policy = self.policy_for(tag);
        let url = self.url_for(tag);
        let mut attempt = 0;

        loop {
            match self.attempt(&url, params, &policy.timeout).await {
                Ok(value) => {
                    debug!(dependency = %tag, attempt, "catalog request succeeded");
                    return Ok(value);
                }
                Err(e) if policy.retry.should_retry(&e, attempt) => {
                    let delay = policy.retry.backoff.delay_for_attempt(attempt);
                    warn!(dependency = %tag, attempt, error = %e, delay_ms = delay.as_millis() as u64, "retrying catalog request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: &TimeoutConfig,
    ) -> Result<T, FetchError> {
        let budget_ms = timeout.total.as_millis() as u64;
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(budget_ms)
            } else {
                FetchError::from(e)
            }
        };

        let response = self
            .http
            .get(url)
            .query(params)
            .timeout(timeout.total)
            .send()
            .await
            .map_err(map_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(map_err)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn facets(&self) -> Result<FacetCatalog, FetchError> {
        self.get_json(DependencyTag::Facets, &[]).await
    }

    async fn models(&self, brand: &BrandId) -> Result<Vec<FacetOption>, FetchError> {
        self.get_json(DependencyTag::Models, &[("brand", brand.to_string())])
            .await
    }

    async fn products(&self, query: &ProductQuery) -> Result<ProductsResponse, FetchError> {
        self.get_json(DependencyTag::Products, &query.to_params()).await
    }
}

fn build_http(connect_timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| FetchError::Request(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(matches!(
            HttpCatalogClient::new("ftp://catalog"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_urls() {
        let client = HttpCatalogClient::new("http://catalog.local/api/").unwrap();
        assert_eq!(client.base_url(), "http://catalog.local/api");
        assert_eq!(client.url_for(DependencyTag::Models), "http://catalog.local/api/models");
    }

    #[test]
    fn test_policy_override() {
        let client = HttpCatalogClient::new("http://catalog.local").unwrap();
        assert_eq!(client.policy_for(DependencyTag::Facets).retry.max_attempts, 2);

        let client = client
            .with_policy(FetchPolicy::new(TimeoutConfig::default(), RetryPolicy::none()))
            .unwrap();
        assert_eq!(client.policy_for(DependencyTag::Facets).retry.max_attempts, 0);
    }

    #[test]
    fn test_policy_sets_connect_timeout() {
        let client = HttpCatalogClient::new("http://catalog.local").unwrap();
        assert_eq!(client.connect_timeout(), Duration::from_millis(1250));

        let policy = FetchPolicy::new(
            TimeoutConfig::from_total(Duration::from_millis(800)),
            RetryPolicy::none(),
        );
        let client = client.with_policy(policy).unwrap();
        assert_eq!(client.connect_timeout(), Duration::from_millis(200));
    }
}
