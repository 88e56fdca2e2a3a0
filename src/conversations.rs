//! Conversation API operations.
//!
//! Every operation is a row in [`crate::endpoint::DESCRIPTORS`]; the methods
//! below only pick the row and hand off to [`ConversationsApi::dispatch`].

use crate::endpoint::Operation;
use crate::request::{merge, RequestConfig, RequestOverrides};
use crate::transport::Transport;
use crate::types::{
    ApiResponse, ChatRequestParams, ClearMessageHistoryParams, CreateConversationParams,
    DeleteConversationParams, GetMessageHistoryParams, ListConversationsParams, SendMessageParams,
    UpdateConversationParams,
};
use serde::Serialize;

/// Client for the conversation endpoints, generic over the transport.
///
/// Holds no per-call state; clone it or wrap it in an `Arc` to share across tasks.
#[derive(Debug, Clone)]
pub struct ConversationsApi<T> {
    transport: T,
}

impl<T: Transport> ConversationsApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `operation` and issue it through the transport.
    ///
    /// The payload goes to the query or body slot per the endpoint table, then
    /// `overrides` are merged on top (override wins). The transport's result is
    /// returned as-is.
    pub async fn dispatch<P>(
        &self,
        operation: Operation,
        payload: Option<&P>,
        overrides: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error>
    where
        P: Serialize + ?Sized + Sync,
    {
        let descriptor = operation.descriptor();
        let payload = payload.map(serde_json::to_value).transpose()?;
        let config = merge(RequestConfig::for_descriptor(descriptor, payload), overrides);

        tracing::debug!(
            operation = descriptor.name,
            method = %config.method,
            path = descriptor.path,
            "dispatching request"
        );

        self.transport.request(descriptor.path, config).await
    }

    pub async fn create_conversation(
        &self,
        data: &CreateConversationParams,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::CreateConversation, Some(data), options)
            .await
    }

    pub async fn delete_conversation(
        &self,
        params: &DeleteConversationParams,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::DeleteConversation, Some(params), options)
            .await
    }

    pub async fn update_conversation(
        &self,
        data: &UpdateConversationParams,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::UpdateConversation, Some(data), options)
            .await
    }

    /// `params` may be omitted to let the server pick its default page.
    pub async fn list_conversations(
        &self,
        params: Option<&ListConversationsParams>,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::ListConversations, params, options)
            .await
    }

    pub async fn send_message(
        &self,
        data: &SendMessageParams,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::SendMessage, Some(data), options)
            .await
    }

    pub async fn get_message_history(
        &self,
        params: &GetMessageHistoryParams,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::GetMessageHistory, Some(params), options)
            .await
    }

    pub async fn clear_message_history(
        &self,
        params: &ClearMessageHistoryParams,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::ClearMessageHistory, Some(params), options)
            .await
    }

    pub async fn chat(
        &self,
        data: &ChatRequestParams,
        options: Option<&RequestOverrides>,
    ) -> Result<ApiResponse, T::Error> {
        self.dispatch(Operation::Chat, Some(data), options).await
    }
}
