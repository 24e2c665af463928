use anyhow::Result;
use tracing::info;

use crate::{
    Data,
    transport::{ChatTarget, Transport, reply_after},
};

pub const THINKING: &str = "🤔 Thinking...";

pub async fn chat<T: Transport + ?Sized>(
    data: &Data,
    transport: &T,
    chat: ChatTarget,
    text: &str,
) -> Result<()> {
    info!(chat, chars = text.chars().count(), "chat: forwarding to completion");

    reply_after(transport, chat, THINKING, data.completion.complete(text)).await
}
