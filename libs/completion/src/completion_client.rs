use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

pub const DEFAULT_COMPLETION_API: &str = "https://api.nebula.gg";

pub const MISSING_CREDENTIAL: &str = "⚠️ AI chat is not configured yet.\n\n\
     Set AI_API_KEY in the bot environment to enable it.";

pub const NO_CONTENT: &str = "Unable to get a response.";

#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    base_api: String,
    api_key: Option<String>,
}

impl CompletionClient {
    pub fn new(client: Client, base_api: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_api: base_api.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one user message and return the reply text. Never fails: a
    /// missing key, a non-200 status or a transport error all become text.
    pub async fn complete(&self, message: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("completion skipped, no credential configured");
            return MISSING_CREDENTIAL.to_string();
        };

        let url = format!(
            "{}/v1/chat/completions",
            self.base_api.trim_end_matches('/')
        );

        let body = CompletionRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: message,
            }],
            stream: false,
        };

        let res = match self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => return transport_failure(e),
        };

        let status = res.status();
        if status != StatusCode::OK {
            let text = res.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %text, "completion endpoint error");
            return format!("❌ AI request failed (HTTP {})", status.as_u16());
        }

        match res.json::<Value>().await {
            Ok(body) => reply_content(&body)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    warn!(%body, "completion response had no message content");
                    NO_CONTENT.to_string()
                }),
            Err(e) => transport_failure(e),
        }
    }
}

fn transport_failure(e: reqwest::Error) -> String {
    let e = anyhow::Error::from(e);
    error!(error = ?e, "completion request failed");
    format!("❌ Error: {:#}", e)
}

//
// OpenAI-style chat completions JSON
// POST /v1/chat/completions
//
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// First choice's message text. Any other shape, including nulls and
/// non-string content, yields `None`.
fn reply_content(body: &Value) -> Option<&str> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
}
