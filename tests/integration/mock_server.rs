//! Mock HTTP server setup for integration tests

use awsome_client::{ClientBuilder, ConversationsApi, HttpTransport};
use mockito::{Matcher, Mock, Server, ServerGuard};

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock server.
    pub fn client(&self) -> ConversationsApi<HttpTransport> {
        self.builder().build().expect("Failed to build client")
    }

    pub fn builder(&self) -> ClientBuilder {
        ClientBuilder::new().base_url(&self.base_url)
    }

    /// Mock returning the backend's success envelope with `data`.
    pub async fn mock_success(
        &mut self,
        method: &str,
        path: &str,
        data: serde_json::Value,
    ) -> mockito::Mock {
        let body = serde_json::json!({
            "status_code": 200,
            "status_message": "SUCCESS",
            "data": data,
        });
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// Create a mock for an error response
    pub async fn mock_error_response(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        error_body: &str,
    ) -> Mock {
        self.server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(error_body)
            .create_async()
            .await
    }
}
