//! Basic usage example
//!
//! Creates a conversation, chats in it, reads the history and cleans up.
//!
//! Configure the server via environment variables:
//! - AWSOME_BASE_URL (default http://localhost:7860)
//! - AWSOME_API_TOKEN
//!
//! Usage:
//!   AWSOME_BASE_URL=http://localhost:7860 cargo run --example basic_usage

use awsome_client::{
    ChatRequestParams, ClearMessageHistoryParams, ClientBuilder, CreateConversationParams,
    DeleteConversationParams, GetMessageHistoryParams, ListConversationsParams, RequestOverrides,
};

#[derive(Debug, serde::Deserialize)]
struct Created {
    id: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let api = ClientBuilder::new().build()?;

    let created = api
        .create_conversation(&CreateConversationParams::new().title("demo"), None)
        .await?;
    let id = match created.data_as::<Created>()? {
        Some(c) => c.id,
        None => {
            eprintln!("server returned no conversation id: {}", created.status_message);
            return Ok(());
        }
    };
    println!("created conversation {id}");

    // Longer timeout for model calls.
    let slow = RequestOverrides::new().set("timeout", 120_000);
    let reply = api
        .chat(&ChatRequestParams::new("Hello!").conversation(&id), Some(&slow))
        .await?;
    println!("reply: {:?}", reply.data);

    // Independent calls can run concurrently.
    let history_params = GetMessageHistoryParams::new(&id).limit(10);
    let page_params = ListConversationsParams::page(1, 20);
    let (history, page) = futures::join!(
        api.get_message_history(&history_params, None),
        api.list_conversations(Some(&page_params), None),
    );
    println!("history: {:?}", history?.data);
    println!("conversations: {:?}", page?.data);

    api.clear_message_history(&ClearMessageHistoryParams::new(&id), None)
        .await?;
    api.delete_conversation(&DeleteConversationParams::new(&id), None)
        .await?;

    Ok(())
}
