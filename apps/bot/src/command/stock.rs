use anyhow::Result;
use tracing::{info, warn};

use crate::{
    Data,
    transport::{ChatTarget, Transport, reply_after},
};

pub const USAGE: &str = "❌ Please provide a stock symbol

Usage: /stock <symbol>
Examples:
  /stock 2330.TW (TSMC)
  /stock AAPL (Apple)
  /stock ^TWII (Taiwan Weighted Index)";

pub async fn stock<T: Transport + ?Sized>(
    data: &Data,
    transport: &T,
    chat: ChatTarget,
    args: &[String],
) -> Result<()> {
    let Some(raw) = args.first() else {
        warn!(chat, "stock: missing symbol");
        transport.send_text(chat, USAGE).await?;
        return Ok(());
    };

    let symbol = raw.to_uppercase();
    info!(chat, symbol = %symbol, "stock: lookup");

    reply_after(
        transport,
        chat,
        &format!("🔍 Looking up {}...", symbol),
        data.quotes.quote_report(&symbol, data.config.timezone),
    )
    .await
}
