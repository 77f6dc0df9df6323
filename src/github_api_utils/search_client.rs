use crate::{config::Config, state_utils::SortOrder};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Request, Response, StatusCode,
};
use std::future::Future;

pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// One outbound repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub sort: String,
    pub order: SortOrder,
    pub page: u32,
}

impl SearchRequest {
    /// `q`, `sort`, `order`, `page` in this order.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("sort", self.sort.clone()),
            ("order", self.order.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Whatever came back over the wire, regardless of status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// The request never produced a usable response.
/// `status` is set when the transport rejected on an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub message: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status();
        TransportError {
            status: status.map(|s| s.as_u16()),
            status_text: status.and_then(|s| s.canonical_reason()).map(str::to_owned),
            message: err.to_string(),
        }
    }
}

/// Sends search requests. Credentials are the transport's business.
pub trait SearchTransport: Send + Sync + 'static {
    fn get(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// Creates and sets standard github api request headers:
/// 1. **X-GitHub-Api-Version**, github api version.
/// 2. **user-agent**, from *GH_API_USER_AGENT*.
fn get_requests_headers(user_agent: &str) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "X-GitHub-Api-Version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    let user_agent = HeaderValue::from_str(user_agent).map_err(|e| TransportError {
        status: None,
        status_text: None,
        message: format!("Invalid user agent '{user_agent}': {e}"),
    })?;
    headers.insert("user-agent", user_agent);
    Ok(headers)
}

/// `reqwest` backed transport using basic auth.
pub struct GitHubClient {
    client: Client,
    search_url: String,
    username: String,
    password: String,
    user_agent: String,
}

impl GitHubClient {
    pub fn new(client: Client, config: &Config) -> Self {
        GitHubClient {
            client,
            search_url: config.search_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl GitHubClient {
    /// The outgoing GET: headers, basic auth, and `q`/`sort`/`order`/`page` in the url.
    fn build_request(&self, request: &SearchRequest) -> Result<Request, TransportError> {
        let headers = get_requests_headers(&self.user_agent)?;
        Ok(self
            .client
            .get(&self.search_url)
            .headers(headers)
            .basic_auth(&self.username, Some(&self.password))
            .query(&request.query_params())
            .build()?)
    }
}

/// Only a 200 body is read, so a failed body read can never hide the status
/// of an error response.
async fn into_raw_response(response: Response) -> Result<RawResponse, TransportError> {
    let status = response.status();
    info!("Request completed: {}", status);
    if let Some(remaining) = response.headers().get("x-ratelimit-remaining") {
        debug!("Search rate limit remaining: {:?}", remaining);
    }

    let body = if status == StatusCode::OK {
        response.text().await?
    } else {
        String::new()
    };
    Ok(RawResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_owned(),
        body,
    })
}

impl SearchTransport for GitHubClient {
    async fn get(&self, request: &SearchRequest) -> Result<RawResponse, TransportError> {
        let request = self.build_request(request)?;
        let response = self.client.execute(request).await?;
        into_raw_response(response).await
    }
}
