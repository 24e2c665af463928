use std::sync::Arc;

use anyhow::Result;
use bot::{Data, config::Config, outbound::outbound_client, telegram};
use teloxide::{Bot, prelude::Requester};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().inspect_err(|e| error!("invalid configuration: {e:#}"))?;

    info!("bot starting, token {}", config.masked_token());

    let http = outbound_client(config.http_timeout)?;
    let bot = Bot::new(&config.bot_token);

    let username = match bot.get_me().await {
        Ok(me) => me.user.username,
        Err(e) => {
            warn!(error = ?e, "getMe failed, answering commands addressed to any bot");
            None
        }
    };
    let data = Arc::new(Data::new(config, http).with_bot_username(username));

    if data.gate.is_configured() {
        info!(authorized = ?data.config.authorized_identity, "authorized identity configured");
    } else {
        warn!("AUTHORIZED_IDENTITY not set, every sender will be denied");
    }
    if !data.completion.has_credential() {
        warn!("AI_API_KEY not set, AI chat replies with a setup hint");
    }

    telegram::run(bot, data, shutdown_signal()).await;

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::{
            select,
            signal::unix::{SignalKind, signal},
        };

        let (mut sigterm, mut sigint) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                error!("failed to install signal handlers: {e}");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
