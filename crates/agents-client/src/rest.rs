//! REST implementation of [`AgentsApi`].
//!
//! `RestAgentsClient` wraps a `reqwest::Client` and translates every
//! trait method into the corresponding v3 HTTP call. List calls follow
//! `nextPageToken` until the collection is exhausted. Failed calls are
//! not retried; the error goes straight back to the caller.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use cx_domain::config::ApiConfig;
use cx_domain::error::{Error, Result};
use cx_domain::trace::TraceEvent;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::provider::AgentsApi;
use crate::types::{Flow, ListFlowsResponse, ListPagesResponse, Page, Paginated};

const GLOBAL_ENDPOINT: &str = "https://dialogflow.googleapis.com";
const CLIENT_HEADER: &str = concat!("cx-inspector/", env!("CARGO_PKG_VERSION"));

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST-based client for the agents API.
///
/// Created once per process; the underlying `reqwest::Client` keeps a
/// connection pool.
#[derive(Debug, Clone)]
pub struct RestAgentsClient {
    http: Client,
    base_url: Option<String>,
    access_token: String,
    page_size: u32,
    language_code: Option<String>,
    timeout: Duration,
}

impl RestAgentsClient {
    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build a new client from the shared `ApiConfig`.
    ///
    /// The bearer token is resolved here, once: `api.access_token` if set,
    /// otherwise the environment variable named by `api.access_token_env`.
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let access_token = match cfg.access_token {
            Some(ref token) if !token.is_empty() => token.clone(),
            _ => match std::env::var(&cfg.access_token_env) {
                Ok(val) if !val.is_empty() => val,
                _ => {
                    return Err(Error::Auth(format!(
                        "no access token: set api.access_token or the {} environment variable",
                        cfg.access_token_env
                    )))
                }
            },
        };

        let timeout = Duration::from_millis(cfg.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: cfg
                .base_url
                .as_deref()
                .map(|u| u.trim_end_matches('/').to_owned()),
            access_token,
            page_size: cfg.page_size,
            language_code: cfg.language_code.clone(),
            timeout,
        })
    }

    // ── request helpers ──────────────────────────────────────────────

    /// Decorate a `RequestBuilder` with auth and the client header.
    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        let rb = rb
            .bearer_auth(&self.access_token)
            .header("x-goog-api-client", CLIENT_HEADER);
        match self.language_code {
            Some(ref lang) => rb.query(&[("languageCode", lang)]),
            None => rb,
        }
    }

    /// Build the full URL for a resource path like `projects/../flows/f`.
    fn url(&self, resource: &str) -> Result<String> {
        let endpoint = match self.base_url {
            Some(ref base) => base.clone(),
            None => regional_endpoint(resource)?,
        };
        Ok(format!("{endpoint}/v3/{resource}"))
    }

    /// Send one request, emit a trace event and map error statuses.
    ///
    /// * 401 / 403 become `Error::Auth`.
    /// * 404 becomes `Error::NotFound`.
    /// * Any other non-2xx becomes `Error::Api`.
    async fn execute(&self, endpoint: &str, rb: RequestBuilder) -> Result<Response> {
        let start = Instant::now();
        let result = self.decorate(rb).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                TraceEvent::ApiCall {
                    endpoint: endpoint.to_owned(),
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    duration_ms,
                }
                .emit();
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        TraceEvent::ApiCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Error::Auth(format!("{endpoint} auth failed ({status}): {body}"))
            }
            StatusCode::NOT_FOUND => Error::NotFound(format!("{endpoint}: {body}")),
            _ => Error::Api {
                status: status.as_u16(),
                message: format!("{endpoint}: {body}"),
            },
        })
    }

    /// GET a single resource and decode it.
    async fn get_resource<T: DeserializeOwned>(&self, resource: &str) -> Result<T> {
        let url = self.url(resource)?;
        let endpoint = format!("GET /v3/{resource}");
        let resp = self.execute(&endpoint, self.http.get(&url)).await?;

        let body = resp.text().await.map_err(from_reqwest)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Schema(format!("failed to parse {endpoint} response: {e}")))
    }

    /// GET every page of `{parent}/{collection}` and concatenate the items.
    async fn list_all<R>(&self, parent: &str, collection: &str) -> Result<Vec<R::Item>>
    where
        R: Paginated + DeserializeOwned,
    {
        let resource = format!("{parent}/{collection}");
        let url = self.url(&resource)?;
        let endpoint = format!("GET /v3/{resource}");

        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut rb = self
                .http
                .get(&url)
                .query(&[("pageSize", self.page_size.to_string())]);
            if let Some(ref token) = page_token {
                rb = rb.query(&[("pageToken", token)]);
            }

            let resp = self.execute(&endpoint, rb).await?;
            let body = resp.text().await.map_err(from_reqwest)?;
            let page: R = serde_json::from_str(&body)
                .map_err(|e| Error::Schema(format!("failed to parse {endpoint} response: {e}")))?;

            let (batch, next) = page.into_parts();
            items.extend(batch);
            match next.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(resource = %resource, count = items.len(), "listed collection");
        Ok(items)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl AgentsApi for RestAgentsClient {
    async fn list_flows(&self, agent_id: &str) -> Result<Vec<Flow>> {
        self.list_all::<ListFlowsResponse>(agent_id, "flows").await
    }

    async fn get_flow(&self, flow_id: &str) -> Result<Flow> {
        self.get_resource(flow_id).await
    }

    async fn list_pages(&self, flow_id: &str) -> Result<Vec<Page>> {
        self.list_all::<ListPagesResponse>(flow_id, "pages").await
    }

    async fn get_page(&self, page_id: &str) -> Result<Page> {
        self.get_resource(page_id).await
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Endpoint selection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Pick the API endpoint serving a resource from its location segment.
///
/// `projects/p/locations/global/...` maps to the global endpoint, any
/// other location `l` to `https://l-dialogflow.googleapis.com`.
pub fn regional_endpoint(resource_id: &str) -> Result<String> {
    let mut segments = resource_id.split('/');
    while let Some(seg) = segments.next() {
        if seg == "locations" {
            return match segments.next() {
                Some("global") => Ok(GLOBAL_ENDPOINT.to_owned()),
                Some(loc) if !loc.is_empty() => Ok(format!("https://{loc}-dialogflow.googleapis.com")),
                _ => Err(Error::Config(format!("empty location in {resource_id:?}"))),
            };
        }
    }
    Err(Error::Config(format!(
        "no locations/<location> segment in {resource_id:?}"
    )))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a `reqwest::Error` into a domain `Error`.
///
/// Timeout errors become `Error::Timeout`; everything else becomes
/// `Error::Http`.
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg_with_token() -> ApiConfig {
        ApiConfig {
            access_token: Some("tok".into()),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn endpoint_for_global_and_regional() {
        assert_eq!(
            regional_endpoint("projects/p/locations/global/agents/a").unwrap(),
            "https://dialogflow.googleapis.com"
        );
        assert_eq!(
            regional_endpoint("projects/p/locations/europe-west1/agents/a/flows/f").unwrap(),
            "https://europe-west1-dialogflow.googleapis.com"
        );
        assert!(matches!(
            regional_endpoint("agents/a"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn url_uses_base_url_override() {
        let mut cfg = cfg_with_token();
        cfg.base_url = Some("http://localhost:8089/".into());
        let client = RestAgentsClient::new(&cfg).unwrap();
        assert_eq!(
            client.url("projects/p/locations/us-east1/agents/a").unwrap(),
            "http://localhost:8089/v3/projects/p/locations/us-east1/agents/a"
        );
    }

    #[test]
    fn url_derives_regional_endpoint() {
        let client = RestAgentsClient::new(&cfg_with_token()).unwrap();
        assert_eq!(
            client.url("projects/p/locations/us-east1/agents/a/flows/f").unwrap(),
            "https://us-east1-dialogflow.googleapis.com/v3/projects/p/locations/us-east1/agents/a/flows/f"
        );
    }

    #[test]
    fn missing_token_is_auth_error() {
        let cfg = ApiConfig {
            access_token_env: "CX_INSPECTOR_TEST_UNSET_TOKEN_VAR".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(RestAgentsClient::new(&cfg), Err(Error::Auth(_))));
    }

    #[test]
    fn timeout_comes_from_config() {
        let mut cfg = cfg_with_token();
        cfg.timeout_ms = 1234;
        let client = RestAgentsClient::new(&cfg).unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(1234));
    }
}
