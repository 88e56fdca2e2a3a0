//! # awsome-client
//!
//! awsome 会话 REST API 的异步 Rust 客户端。
//!
//! Async client binding for the awsome conversation REST API.
//!
//! ## Overview
//!
//! Each operation (create/delete/update/list conversations, send/fetch/clear
//! messages, chat) maps to exactly one HTTP request. The mapping lives in a
//! static table ([`endpoint::DESCRIPTORS`]) and a single generic dispatcher
//! ([`ConversationsApi::dispatch`]) turns a table row plus a payload into a
//! request for the [`Transport`].
//!
//! - No retries, no caching, no shared state between calls
//! - Transport errors are returned unchanged
//! - Per-call [`RequestOverrides`] are merged over the computed request (override wins)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use awsome_client::{ClientBuilder, ListConversationsParams};
//!
//! #[tokio::main]
//! async fn main() -> awsome_client::Result<()> {
//!     let api = ClientBuilder::new()
//!         .base_url("http://localhost:7860")
//!         .build()?;
//!
//!     let page = api
//!         .list_conversations(Some(&ListConversationsParams::page(1, 20)), None)
//!         .await?;
//!     println!("{:?}", page.data);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`endpoint`] | Operation → (method, path, placement) table |
//! | [`request`] | Request configuration and override merging |
//! | [`conversations`] | The API surface and generic dispatcher |
//! | [`transport`] | Transport trait and the reqwest implementation |
//! | [`types`] | Payload types and the response envelope |
//! | [`config`] | Client configuration and builder |
//! | [`error`] | Error type of the bundled transport |

pub mod config;
pub mod conversations;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

pub use config::{ClientBuilder, ClientConfig};
pub use conversations::ConversationsApi;
pub use endpoint::{HttpMethod, Operation, OperationDescriptor, Placement};
pub use error::{Error, ErrorContext};
pub use request::{RequestConfig, RequestOverrides};
pub use transport::{HttpTransport, Transport};
pub use types::{
    ApiResponse, ChatRequestParams, ClearMessageHistoryParams, CreateConversationParams,
    DeleteConversationParams, GetMessageHistoryParams, ListConversationsParams, SendMessageParams,
    UpdateConversationParams,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
