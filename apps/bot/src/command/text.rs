pub const START: &str = "👋 Welcome to Alice, your AI assistant!

🤖 What can I do?

📊 Stock quotes
• /stock 2330.TW - TSMC
• /stock AAPL - Apple
• /stock ^TWII - Taiwan Weighted Index

💬 AI chat
• Just type any question and I will answer with AI
• e.g. \"How did TSMC do today?\"
• e.g. \"Give me a read on the US market trend\"

📈 Portfolio (coming soon)
• /portfolio - Holdings overview
• /report - Report delivery schedule

❓ Other commands
• /help - Show usage
• /ping - Check bot status

💡 Tip: you can ask me anything directly!";

pub const HELP: &str = "📚 Usage

Basic commands
/start - Show the welcome message
/help - Show this help
/ping - Check bot status

Stock quotes
/stock <symbol> - Look up the latest price

Supported symbol formats:
• Taiwan: 2330.TW (TSMC)
• US: AAPL (Apple)
• Indices: ^TWII (Taiwan Weighted), ^DJI (Dow Jones)

Examples:
/stock 2330.TW
/stock AAPL
/stock ^TWII

AI chat
Send any message to chat with the AI:
• \"How did TSMC do today?\"
• \"US market trend analysis\"
• \"Explain what an ETF is\"

Portfolio (in development)
/portfolio - Holdings detail
/report - Report delivery settings

Scheduled reports (planned)
• Daily 06:30 - Taiwan/US market brief
• Daily 07:00 - Portfolio P&L update
• Saturday 07:00 - Weekly investment report

Questions? Just ask me! 😊";

pub const PORTFOLIO: &str = "📊 Portfolio

⚠️ This feature is still in development.

Planned:
• Live holdings P&L
• Per-position cost analysis
• Return statistics
• Risk assessment

Stay tuned!";

pub const REPORT: &str = "📨 Scheduled report timetable

⚠️ Report delivery is not enabled yet.

Planned delivery:
• Daily 06:30 - Taiwan/US market brief
• Daily 07:00 - Portfolio P&L update
• Saturday 07:00 - Weekly investment report

Stay tuned!";
