use completion::CompletionClient;
use stock::QuoteClient;

use crate::{auth::Gate, config::Config};

pub mod auth;
pub mod command;
pub mod config;
pub mod outbound;
pub mod relay;
pub mod telegram;
pub mod transport;

pub struct Data {
    pub config: Config,
    /// Our own username; commands addressed to other bots are skipped.
    pub bot_username: Option<String>,
    pub gate: Gate,
    pub quotes: QuoteClient,
    pub completion: CompletionClient,
}

impl Data {
    /// Wire both upstream callers onto the one shared HTTP client.
    pub fn new(config: Config, http: reqwest::Client) -> Self {
        Self {
            bot_username: None,
            gate: Gate::new(config.authorized_identity.clone()),
            quotes: QuoteClient::new(http.clone(), config.quote_api_url.clone()),
            completion: CompletionClient::new(
                http,
                config.ai_api_url.clone(),
                config.ai_api_key.clone(),
            ),
            config,
        }
    }

    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }
}

pub type Error = anyhow::Error;
