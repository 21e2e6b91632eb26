use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PoliceApiError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://data.police.uk/api";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub fn default_headers() -> Vec<(String, String)> {
    vec![("Content-Type".to_string(), "application/json".to_string())]
}

/// Everything the client needs, passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: default_headers(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ClientSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            base_url: config.api_base_url().to_string(),
            headers: config.headers(),
            timeout: config.timeout(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Thin GET-and-decode wrapper over `reqwest`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &settings.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                PoliceApiError::InvalidConfigValueError {
                    field: "headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                PoliceApiError::InvalidConfigValueError {
                    field: format!("headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` relative to the base URL and parse the body as JSON.
    /// Any status other than 200 fails with `PoliceApiError::Api`.
    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("GET {} -> {}", path, status);

        if status != StatusCode::OK {
            return Err(PoliceApiError::api(path, status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientSettings::default().with_base_url(server.base_url())).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_sends_json_content_type() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/forces")
                .header("Content-Type", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"id": "kent", "name": "Kent Police"}]));
        });

        let body = client_for(&server).get_json("/forces").await.unwrap();

        api_mock.assert();
        assert_eq!(body[0]["id"], "kent");
    }

    #[tokio::test]
    async fn test_non_200_is_api_error_with_path_and_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/forces");
            then.status(404);
        });

        let err = client_for(&server).get_json("/forces").await.unwrap_err();

        api_mock.assert();
        match err {
            PoliceApiError::Api { path, status } => {
                assert_eq!(path, "/forces");
                assert_eq!(status, 404);
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_success_codes_are_still_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/forces");
            then.status(204);
        });

        let err = client_for(&server).get_json("/forces").await.unwrap_err();
        assert!(matches!(err, PoliceApiError::Api { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/forces");
            then.status(200).body("<html>not json</html>");
        });

        let err = client_for(&server).get_json("/forces").await.unwrap_err();
        assert!(matches!(err, PoliceApiError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_trailing_slash_on_base_url_is_trimmed() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/forces");
            then.status(200).json_body(serde_json::json!([]));
        });

        let settings = ClientSettings::default().with_base_url(format!("{}/", server.base_url()));
        let client = ApiClient::new(settings).unwrap();
        client.get_json("/forces").await.unwrap();

        api_mock.assert();
    }

    #[test]
    fn test_invalid_header_is_config_error() {
        let settings = ClientSettings {
            headers: vec![("Bad Header".to_string(), "x".to_string())],
            ..ClientSettings::default()
        };
        let err = ApiClient::new(settings).unwrap_err();
        assert!(matches!(err, PoliceApiError::InvalidConfigValueError { .. }));
    }
}
