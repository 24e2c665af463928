use anyhow::Result;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::{
    Data,
    auth::{Access, DENIED},
    command::{self, Command, route},
    transport::{ChatTarget, Transport},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender_identity: String,
    pub chat: ChatTarget,
    pub message_id: i32,
    pub text: String,
}

pub fn apology(e: &anyhow::Error) -> String {
    format!(
        "❌ Something went wrong: {}\n\nPlease try again later, or use /help for usage.",
        e
    )
}

/// Handle one update end to end. Handler failures are logged and answered
/// with an apology; nothing escapes to the update loop.
pub async fn handle_update<T: Transport + ?Sized>(
    data: &Data,
    transport: &T,
    msg: &IncomingMessage,
) {
    if let Err(e) = dispatch(data, transport, msg).await {
        error!(error = ?e, "handler failed");

        if let Err(e) = transport.send_text(msg.chat, &apology(&e)).await {
            error!(error = ?e, "failed to deliver apology");
        }
    }
}

pub async fn dispatch<T: Transport + ?Sized>(
    data: &Data,
    transport: &T,
    msg: &IncomingMessage,
) -> Result<()> {
    if let Some(me) = data.bot_username.as_deref()
        && command::addressed_elsewhere(&msg.text, me)
    {
        debug!("command addressed to another bot, skipping");
        return Ok(());
    }

    if data.gate.authorize(&msg.sender_identity) == Access::Deny {
        warn!(sender = %msg.sender_identity, "unauthorized sender");
        transport.send_text(msg.chat, DENIED).await?;
        return Ok(());
    }

    let routed = route(&msg.text);
    info!(command = ?routed.command, args = routed.args.len(), "routed");

    let reply = match routed.command {
        Command::Start => command::START.to_string(),
        Command::Help => command::HELP.to_string(),
        Command::Ping => command::ping(data, Utc::now()),
        Command::Portfolio => command::PORTFOLIO.to_string(),
        Command::Report => command::REPORT.to_string(),
        Command::Stock => return command::stock(data, transport, msg.chat, &routed.args).await,
        Command::FreeText => return command::chat(data, transport, msg.chat, &msg.text).await,
    };

    transport.send_text(msg.chat, &reply).await?;
    debug!("static reply sent");

    Ok(())
}
