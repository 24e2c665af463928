use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Where a reply goes. For Telegram this is the chat id.
pub type ChatTarget = i64;

/// Telegram rejects message text longer than this.
pub const MAX_MESSAGE_CHARS: usize = 4096;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MessageHandle {
    pub chat: ChatTarget,
    pub message_id: i32,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat: ChatTarget, text: &str) -> Result<MessageHandle>;

    async fn edit_text(&self, handle: MessageHandle, text: &str) -> Result<()>;
}

/// Split `text` into pieces of at most `limit` chars, cutting at the last
/// newline inside the window when there is one. Never returns an empty list.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while let Some((hard, _)) = rest.char_indices().nth(limit) {
        let cut = rest[..hard]
            .rfind('\n')
            .filter(|&i| i > 0)
            .unwrap_or(hard);

        chunks.push(&rest[..cut]);
        rest = rest[cut..].trim_start_matches('\n');
    }

    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest);
    }

    chunks
}

/// Send a provisional message, run `work`, then replace the provisional
/// text with the result. Falls back to a fresh message if the edit fails;
/// results over the size limit continue in follow-up messages.
pub async fn reply_after<T, F>(
    transport: &T,
    chat: ChatTarget,
    provisional: &str,
    work: F,
) -> Result<()>
where
    T: Transport + ?Sized,
    F: Future<Output = String> + Send,
{
    let handle = transport.send_text(chat, provisional).await?;

    let text = work.await;
    let chunks = split_message(&text, MAX_MESSAGE_CHARS);

    let (first, rest) = match chunks.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    if let Err(e) = transport.edit_text(handle, first).await {
        warn!(chat, message_id = handle.message_id, error = ?e, "edit failed, sending new message");
        transport.send_text(chat, first).await?;
    }

    if !rest.is_empty() {
        debug!(chat, parts = chunks.len(), "reply split across messages");
    }
    for chunk in rest {
        transport.send_text(chat, chunk).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_message("hello", 10), vec!["hello"]);
        assert_eq!(split_message("exactly10!", 10), vec!["exactly10!"]);
        assert_eq!(split_message("", 10), vec![""]);
    }

    #[test]
    fn long_text_is_cut_at_limit() {
        let text = "a".repeat(25);
        let chunks = split_message(&text, 10);

        assert_eq!(chunks, vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]);
    }

    #[test]
    fn cuts_prefer_last_newline() {
        let chunks = split_message("line one\nline two\nline three", 20);

        assert_eq!(chunks, vec!["line one\nline two", "line three"]);
    }

    #[test]
    fn limit_counts_chars_not_bytes() {
        let text = "📈".repeat(5);
        let chunks = split_message(&text, 2);

        assert_eq!(chunks, vec!["📈📈", "📈📈", "📈"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 2));
    }
}
