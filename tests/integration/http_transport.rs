//! End-to-end requests through the reqwest transport against mockito.

use crate::mock_server::MockServerFixture;
use awsome_client::{
    ChatRequestParams, ClientBuilder, DeleteConversationParams, Error, GetMessageHistoryParams,
    ListConversationsParams, RequestOverrides,
};
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_list_conversations_sends_query_string() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", "/api/v1/conversations/list")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("pageSize".into(), "20".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status_code":200,"status_message":"SUCCESS","data":{"total":1,"items":[{"id":"c1"}]}}"#)
        .create_async()
        .await;

    let api = fixture.client();
    let resp = api
        .list_conversations(Some(&ListConversationsParams::page(1, 20)), None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(resp.is_success());
    assert_eq!(resp.status_message, "SUCCESS");
    assert_eq!(resp.data.unwrap()["items"][0]["id"], "c1");
}

#[tokio::test]
async fn test_chat_sends_json_body() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/chat")
        .match_header("content-type", "application/json")
        .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".into()))
        .match_body(Matcher::Json(json!({"conversationId": "c1", "message": "hi"})))
        .with_status(200)
        .with_body(r#"{"status_code":200,"status_message":"SUCCESS","data":"hello"}"#)
        .create_async()
        .await;

    let api = fixture.client();
    let resp = api
        .chat(&ChatRequestParams::new("hi").conversation("c1"), None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.data, Some(json!("hello")));
}

#[tokio::test]
async fn test_delete_uses_query_on_post() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/conversations/delete")
        .match_query(Matcher::UrlEncoded("conversationId".into(), "c9".into()))
        .with_status(200)
        .with_body(r#"{"status_code":200,"status_message":"SUCCESS","data":null}"#)
        .create_async()
        .await;

    let api = fixture.client();
    let resp = api
        .delete_conversation(&DeleteConversationParams::new("c9"), None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(resp.data.is_none());
}

#[tokio::test]
async fn test_bearer_token_and_header_overrides() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("GET", "/api/v1/conversations/messages/history")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer tok-123")
        .match_header("x-tenant", "override")
        .with_status(200)
        .with_body(r#"{"status_code":200,"status_message":"SUCCESS","data":[]}"#)
        .create_async()
        .await;

    let api = fixture
        .builder()
        .api_token("tok-123")
        .default_header("x-tenant", "default")
        .build()
        .unwrap();
    let overrides = RequestOverrides::new().set("headers", json!({"x-tenant": "override"}));
    api.get_message_history(&GetMessageHistoryParams::new("c1").limit(5), Some(&overrides))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_null_header_override_removes_default() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/api/v1/chat")
        .match_header("x-tenant", Matcher::Missing)
        .match_header("x-trace", "on")
        .with_status(200)
        .with_body(r#"{"status_code":200,"status_message":"SUCCESS","data":null}"#)
        .create_async()
        .await;

    let api = fixture
        .builder()
        .default_header("x-tenant", "default")
        .default_header("x-trace", "on")
        .build()
        .unwrap();
    let overrides = RequestOverrides::new().set("headers", json!({"x-tenant": null}));
    api.chat(&ChatRequestParams::new("hi"), Some(&overrides))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_method_override_reaches_server() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_success("GET", "/api/v1/chat", json!({"ok": true}))
        .await;

    let api = fixture.client();
    let overrides = RequestOverrides::new().set("method", "GET");
    api.chat(&ChatRequestParams::new("hi"), Some(&overrides))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_500_maps_to_remote_error() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_error_response("POST", "/api/v1/chat", 500, r#"{"detail":"boom"}"#)
        .await;

    let api = fixture.client();
    let err = api
        .chat(&ChatRequestParams::new("hi"), None)
        .await
        .unwrap_err();

    mock.assert_async().await;
    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_serialization_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/api/v1/conversations/list")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let api = fixture.client();
    let err = api.list_conversations(None, None).await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let api = ClientBuilder::new()
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let err = api.list_conversations(None, None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[test]
fn test_build_rejects_invalid_base_url() {
    let err = ClientBuilder::new().base_url("localhost:7860").build();
    assert!(err.is_err());
}
