//! Endpoint table: one static descriptor per API operation.
//!
//! 每个操作对应一个固定的 HTTP 方法、路径以及参数放置方式（查询参数或请求体）。

use std::fmt;
use std::str::FromStr;

/// HTTP method used by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Where the primary payload of an operation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Serialized into the URL query string (`params`).
    Query,
    /// Sent as the JSON request body (`data`).
    Body,
}

impl Placement {
    /// Configuration key the payload is stored under.
    pub fn config_key(&self) -> &'static str {
        match self {
            Placement::Query => "params",
            Placement::Body => "data",
        }
    }
}

/// Logical operations exposed by the conversation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateConversation,
    DeleteConversation,
    UpdateConversation,
    ListConversations,
    SendMessage,
    GetMessageHistory,
    ClearMessageHistory,
    Chat,
}

/// Static description of how an operation maps onto HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub operation: Operation,
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub placement: Placement,
}

const fn descriptor(
    operation: Operation,
    name: &'static str,
    method: HttpMethod,
    path: &'static str,
    placement: Placement,
) -> OperationDescriptor {
    OperationDescriptor {
        operation,
        name,
        method,
        path,
        placement,
    }
}

/// The full endpoint table, in declaration order of [`Operation`].
pub static DESCRIPTORS: [OperationDescriptor; 8] = [
    descriptor(
        Operation::CreateConversation,
        "createConversation",
        HttpMethod::Post,
        "/api/v1/conversations/create",
        Placement::Body,
    ),
    descriptor(
        Operation::DeleteConversation,
        "deleteConversation",
        HttpMethod::Post,
        "/api/v1/conversations/delete",
        Placement::Query,
    ),
    descriptor(
        Operation::UpdateConversation,
        "updateConversation",
        HttpMethod::Post,
        "/api/v1/conversations/update",
        Placement::Body,
    ),
    descriptor(
        Operation::ListConversations,
        "listConversations",
        HttpMethod::Get,
        "/api/v1/conversations/list",
        Placement::Query,
    ),
    descriptor(
        Operation::SendMessage,
        "sendMessage",
        HttpMethod::Post,
        "/api/v1/conversations/messages/send",
        Placement::Body,
    ),
    descriptor(
        Operation::GetMessageHistory,
        "getMessageHistory",
        HttpMethod::Get,
        "/api/v1/conversations/messages/history",
        Placement::Query,
    ),
    descriptor(
        Operation::ClearMessageHistory,
        "clearMessageHistory",
        HttpMethod::Post,
        "/api/v1/conversations/messages/clear",
        Placement::Query,
    ),
    descriptor(
        Operation::Chat,
        "chat",
        HttpMethod::Post,
        "/api/v1/chat",
        Placement::Body,
    ),
];

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::CreateConversation,
        Operation::DeleteConversation,
        Operation::UpdateConversation,
        Operation::ListConversations,
        Operation::SendMessage,
        Operation::GetMessageHistory,
        Operation::ClearMessageHistory,
        Operation::Chat,
    ];

    pub fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTORS[*self as usize]
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn method(&self) -> HttpMethod {
        self.descriptor().method
    }

    pub fn path(&self) -> &'static str {
        self.descriptor().path
    }

    pub fn placement(&self) -> Placement {
        self.descriptor().placement
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when an operation name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    /// Accepts the camelCase wire name (`listConversations`) or snake_case
    /// (`list_conversations`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
