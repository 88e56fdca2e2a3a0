use super::{Transport, TransportError};
use crate::config::ClientConfig;
use crate::request::RequestConfig;
use crate::types::ApiResponse;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// reqwest-backed transport against a single base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    default_headers: HeaderMap,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(config.pool_idle_timeout))
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        let mut default_headers = HeaderMap::new();
        for (k, v) in &config.default_headers {
            let (name, value) = header_pair(k, v)?;
            default_headers.insert(name, value);
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            default_headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method(config: &RequestConfig) -> Result<Method> {
        Method::from_bytes(config.method.as_bytes()).map_err(|_| {
            Error::configuration_with_context(
                format!("invalid HTTP method: {}", config.method),
                crate::ErrorContext::new()
                    .with_field_path("overrides.method")
                    .with_source("http_transport"),
            )
        })
    }

    /// Default headers with the per-call `headers` override applied. A string
    /// replaces the default of the same name, `null` removes it, other values
    /// are sent as their JSON text.
    fn merged_headers(&self, config: &RequestConfig) -> Result<HeaderMap> {
        let mut headers = self.default_headers.clone();
        let Some(raw) = config.extra.get("headers") else {
            return Ok(headers);
        };
        let Some(extra) = raw.as_object() else {
            tracing::warn!(value = %raw, "headers override is not an object; ignoring");
            return Ok(headers);
        };
        for (k, v) in extra {
            let v = match v {
                Value::Null => {
                    headers.remove(header_name(k)?);
                    continue;
                }
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let (name, value) = header_pair(k, &v)?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    pub async fn execute(&self, path: &str, config: RequestConfig) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let method = Self::method(&config)?;
        let request_id = Uuid::new_v4().to_string();

        let headers = self.merged_headers(&config)?;

        let mut req = self
            .client
            .request(method, &url)
            .headers(headers)
            .header("x-request-id", &request_id);

        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        if let Some(timeout) = timeout_override(&config) {
            req = req.timeout(timeout);
        }

        for key in config.extra.keys() {
            if key != "headers" && key != "timeout" {
                tracing::debug!(key = %key, "ignoring unsupported request option");
            }
        }

        if let Some(params) = &config.params {
            let pairs = query_pairs(params);
            if !pairs.is_empty() {
                req = req.query(&pairs);
            }
        }

        if let Some(data) = &config.data {
            req = req.json(data);
        }

        tracing::debug!(url = %url, request_id = %request_id, "sending request");

        let response = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), request_id = %request_id, "remote returned error status");
            return Err(Error::Remote {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Error = Error;

    async fn request(&self, path: &str, config: RequestConfig) -> Result<ApiResponse> {
        let json = self.execute(path, config).await?;
        Ok(serde_json::from_value(json)?)
    }
}

fn invalid_header(name: &str, what: &str) -> Error {
    Error::configuration_with_context(
        format!("invalid header {}", what),
        crate::ErrorContext::new()
            .with_field_path(format!("headers.{}", name))
            .with_source("http_transport"),
    )
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid_header(name, "name"))
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let value_h = HeaderValue::from_str(value).map_err(|_| invalid_header(name, "value"))?;
    Ok((header_name(name)?, value_h))
}

/// Per-call `timeout` in whole milliseconds. Anything else is ignored with a
/// warning and the client timeout applies.
fn timeout_override(config: &RequestConfig) -> Option<Duration> {
    let raw = config.extra.get("timeout")?;
    match raw.as_u64() {
        Some(ms) => Some(Duration::from_millis(ms)),
        None => {
            tracing::warn!(value = %raw, "timeout override is not a non-negative integer; ignoring");
            None
        }
    }
}

/// Flatten a params object into query pairs. Strings pass through, other
/// scalars use their JSON text, nested values are JSON-encoded. Nulls are
/// dropped; a non-object params value yields nothing.
fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let Some(obj) = params.as_object() else {
        tracing::warn!("query params are not an object; skipping");
        return Vec::new();
    };
    obj.iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| {
            let s = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), s)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pairs_flatten() {
        let pairs = query_pairs(&json!({
            "conversationId": "c1",
            "limit": 20,
            "archived": false,
            "skip": null,
            "tags": ["a", "b"]
        }));
        assert!(pairs.contains(&("conversationId".into(), "c1".into())));
        assert!(pairs.contains(&("limit".into(), "20".into())));
        assert!(pairs.contains(&("archived".into(), "false".into())));
        assert!(pairs.contains(&("tags".into(), r#"["a","b"]"#.into())));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_query_pairs_non_object() {
        assert!(query_pairs(&json!("oops")).is_empty());
    }

    #[test]
    fn test_new_trims_base_url_and_rejects_bad_headers() {
        let cfg = ClientConfig {
            base_url: "http://localhost:7860/".into(),
            ..ClientConfig::default()
        };
        let t = HttpTransport::new(&cfg).unwrap();
        assert_eq!(t.base_url(), "http://localhost:7860");

        let mut bad = ClientConfig::default();
        bad.default_headers.insert("bad header".into(), "v".into());
        assert!(matches!(
            HttpTransport::new(&bad),
            Err(Error::Configuration { .. })
        ));
    }

    fn with_extra(key: &str, value: Value) -> RequestConfig {
        let mut cfg = RequestConfig::new(crate::endpoint::HttpMethod::Post);
        cfg.extra.insert(key.into(), value);
        cfg
    }

    #[test]
    fn test_timeout_override() {
        assert_eq!(
            timeout_override(&with_extra("timeout", json!(1500))),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(timeout_override(&with_extra("timeout", json!(1500.5))), None);
        assert_eq!(timeout_override(&with_extra("timeout", json!(-1))), None);
        assert_eq!(timeout_override(&with_extra("timeout", json!("60s"))), None);
        assert_eq!(
            timeout_override(&RequestConfig::new(crate::endpoint::HttpMethod::Get)),
            None
        );
    }

    #[test]
    fn test_merged_headers() {
        let mut cfg = ClientConfig::default();
        cfg.default_headers.insert("x-tenant".into(), "default".into());
        cfg.default_headers.insert("x-trace".into(), "on".into());
        let t = HttpTransport::new(&cfg).unwrap();

        let h = t
            .merged_headers(&with_extra(
                "headers",
                json!({"x-tenant": null, "x-trace": "off", "x-retry": 2}),
            ))
            .unwrap();
        assert!(h.get("x-tenant").is_none());
        assert_eq!(h["x-trace"], "off");
        assert_eq!(h["x-retry"], "2");

        // non-object override keeps the defaults
        let h = t.merged_headers(&with_extra("headers", json!("x-tenant: t1"))).unwrap();
        assert_eq!(h["x-tenant"], "default");
        assert_eq!(h.len(), 2);

        assert!(matches!(
            t.merged_headers(&with_extra("headers", json!({"bad header": null}))),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_invalid_method_is_configuration_error() {
        let mut cfg = RequestConfig::new(crate::endpoint::HttpMethod::Get);
        cfg.method = "NOT A VERB".into();
        assert!(matches!(
            HttpTransport::method(&cfg),
            Err(Error::Configuration { .. })
        ));
    }
}
