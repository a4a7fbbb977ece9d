use crate::api::models::SearchParams;
use crate::error::ApiError;
use crate::utils::error_helpers::{convert_format_error, convert_request_error};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://stdict.korean.go.kr/api";
pub const SEARCH_ENDPOINT: &str = "/search.do";
pub const VIEW_ENDPOINT: &str = "/view.do";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const USER_AGENT: &str = concat!("ko-stdict-mcp-server/", env!("CARGO_PKG_VERSION"));
const SNIPPET_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct StdictClient {
    client: Client,
    pub base_url: String,
}

impl StdictClient {
    // Create client with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(StdictClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn build_request(&self, endpoint: &str, params: &[(&str, String)]) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        self.client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(params)
    }

    /// GET `endpoint` and decode the body as JSON.
    pub async fn get_json(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        tracing::debug!(endpoint, "sending dictionary request");

        let response = self
            .build_request(endpoint, params)
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint, DEFAULT_TIMEOUT_SECS))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, endpoint, DEFAULT_TIMEOUT_SECS))?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|_| convert_format_error(&body, endpoint, SNIPPET_CHARS))
    }

    /// Raw search response.
    pub async fn search(&self, key: &str, params: &SearchParams) -> Result<Value, ApiError> {
        let query = [
            ("key", key.to_string()),
            ("type_search", "search".to_string()),
            ("q", params.q.clone()),
            ("req_type", "json".to_string()),
            ("start", params.start.to_string()),
            ("num", params.num.to_string()),
            ("advanced", params.advanced.as_str().to_string()),
        ];
        self.get_json(SEARCH_ENDPOINT, &query).await
    }

    /// Raw view response for one target code.
    pub async fn view(&self, key: &str, target_code: i64) -> Result<Value, ApiError> {
        let query = [
            ("key", key.to_string()),
            ("type_search", "view".to_string()),
            ("req_type", "json".to_string()),
            ("method", "TARGET_CODE".to_string()),
            ("q", target_code.to_string()),
        ];
        self.get_json(VIEW_ENDPOINT, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StdictClient::new(DEFAULT_BASE_URL.to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client =
            StdictClient::new("http://example.test/api/".to_string()).expect("client creation failed");
        assert_eq!(client.base_url, "http://example.test/api");
    }

    #[test]
    fn test_build_request() {
        let client =
            StdictClient::new("http://example.test/api".to_string()).expect("client creation failed");
        let request = client.build_request(
            VIEW_ENDPOINT,
            &[("q", "435977".to_string()), ("req_type", "json".to_string())],
        );
        let built_request = request.build().expect("Failed to build request");

        assert_eq!(
            built_request.url().as_str(),
            "http://example.test/api/view.do?q=435977&req_type=json"
        );
        assert_eq!(built_request.method(), reqwest::Method::GET);
        assert_eq!(
            built_request
                .headers()
                .get(ACCEPT)
                .unwrap()
                .to_str()
                .unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_build_request_encodes_hangul_query() {
        let client =
            StdictClient::new("http://example.test/api".to_string()).expect("client creation failed");
        let built_request = client
            .build_request(SEARCH_ENDPOINT, &[("q", "사랑".to_string())])
            .build()
            .expect("Failed to build request");

        let pairs: Vec<(String, String)> = built_request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs, vec![("q".to_string(), "사랑".to_string())]);
    }

    #[test]
    fn test_user_agent_names_server() {
        assert!(USER_AGENT.starts_with("ko-stdict-mcp-server/"));
    }
}
