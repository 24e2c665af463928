use chrono::{DateTime, Utc};

use crate::Data;

pub fn ping(data: &Data, now: DateTime<Utc>) -> String {
    let ai = if data.completion.has_credential() {
        "✅"
    } else {
        "⚠️ not configured"
    };

    format!(
        "🟢 Bot status: running\n\
         \n\
         ⏰ Current time: {}\n\
         🤖 Service: Telegram bot\n\
         🔗 AI endpoint: {}\n\
         🏷️ Version: {}\n\
         \n\
         ✅ All systems normal!",
        now.with_timezone(&data.config.timezone)
            .format("%Y-%m-%d %H:%M:%S"),
        ai,
        data.config.version,
    )
}
