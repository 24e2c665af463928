use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{BotCommand, MessageId, Update},
};
use tracing::{debug, info, info_span, warn};
use tracing_futures::Instrument;

use crate::{
    Data, Error,
    command::Command,
    relay::{self, IncomingMessage},
    transport::{ChatTarget, MessageHandle, Transport},
};

#[async_trait]
impl Transport for Bot {
    async fn send_text(&self, chat: ChatTarget, text: &str) -> Result<MessageHandle> {
        let sent = self.send_message(ChatId(chat), text).await?;

        Ok(MessageHandle {
            chat,
            message_id: sent.id.0,
        })
    }

    async fn edit_text(&self, handle: MessageHandle, text: &str) -> Result<()> {
        self.edit_message_text(ChatId(handle.chat), MessageId(handle.message_id), text)
            .await?;

        Ok(())
    }
}

/// Text messages with a known sender; anything else is not ours to handle.
pub fn incoming(msg: &Message) -> Option<IncomingMessage> {
    let text = msg.text()?;
    let sender = msg.from.as_ref()?;

    Some(IncomingMessage {
        sender_identity: sender.id.0.to_string(),
        chat: msg.chat.id.0,
        message_id: msg.id.0,
        text: text.to_string(),
    })
}

async fn on_message(bot: Bot, msg: Message, data: Arc<Data>) -> Result<(), Error> {
    let Some(incoming) = incoming(&msg) else {
        debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    let span = info_span!(
        "update",
        chat_id = incoming.chat,
        message_id = incoming.message_id,
        sender = %incoming.sender_identity,
    );

    relay::handle_update(&data, &bot, &incoming)
        .instrument(span)
        .await;

    Ok(())
}

async fn register_commands(bot: &Bot) {
    let commands: Vec<BotCommand> = Command::NAMED
        .iter()
        .map(|(_, name, description)| BotCommand::new(*name, *description))
        .collect();

    match bot.set_my_commands(commands).await {
        Ok(_) => info!(count = Command::NAMED.len(), "registered bot commands"),
        Err(e) => warn!(error = ?e, "failed to register bot commands"),
    }
}

/// Long-poll for updates until `shutdown` resolves.
pub async fn run<S>(bot: Bot, data: Arc<Data>, shutdown: S)
where
    S: Future<Output = ()> + Send + 'static,
{
    register_commands(&bot).await;

    let handler = Update::filter_message().endpoint(on_message);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![data])
        .default_handler(|_update| async move {
            debug!("ignoring non-message update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in message handler",
        ))
        .build();

    let token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        shutdown.await;
        info!("shutdown requested, stopping dispatcher");

        match token.shutdown() {
            Ok(stopped) => stopped.await,
            Err(e) => warn!(error = ?e, "dispatcher was not running"),
        }
    });

    info!("listening for updates");
    dispatcher.dispatch().await;
}
