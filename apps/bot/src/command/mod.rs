mod chat;
mod ping;
mod stock;
mod text;

pub use chat::{THINKING, chat};
pub use ping::ping;
pub use stock::{USAGE as STOCK_USAGE, stock};
pub use text::{HELP, PORTFOLIO, REPORT, START};

pub const COMMAND_PREFIX: char = '/';

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    Start,
    Help,
    Ping,
    Stock,
    Portfolio,
    Report,
    FreeText,
}

impl Command {
    /// Commands reachable through a `/name` token, with their menu description.
    pub const NAMED: [(Command, &'static str, &'static str); 6] = [
        (Command::Start, "start", "Show the welcome message"),
        (Command::Help, "help", "Show usage"),
        (Command::Ping, "ping", "Check bot status"),
        (Command::Stock, "stock", "Look up a stock quote, e.g. /stock 2330.TW"),
        (Command::Portfolio, "portfolio", "Portfolio overview (coming soon)"),
        (Command::Report, "report", "Report schedule (coming soon)"),
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(cmd, _, _)| *cmd)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Routed {
    pub command: Command,
    pub args: Vec<String>,
}

/// Classify a message by its first whitespace-delimited token. A
/// `@botname` suffix is dropped here; commands meant for other bots are
/// filtered earlier with [`addressed_elsewhere`]. Names are case-sensitive.
pub fn route(text: &str) -> Routed {
    let mut tokens = text.split_whitespace();

    let command = tokens
        .next()
        .and_then(|token| token.strip_prefix(COMMAND_PREFIX))
        .map(|name| name.split_once('@').map_or(name, |(name, _)| name))
        .and_then(Command::from_name);

    match command {
        Some(command) => Routed {
            command,
            args: tokens.map(str::to_string).collect(),
        },
        None => Routed {
            command: Command::FreeText,
            args: Vec::new(),
        },
    }
}

/// True when the first token is a `/command@name` aimed at a bot other
/// than `me`. Telegram usernames compare case-insensitively.
pub fn addressed_elsewhere(text: &str, me: &str) -> bool {
    text.split_whitespace()
        .next()
        .filter(|token| token.starts_with(COMMAND_PREFIX))
        .and_then(|token| token.split_once('@'))
        .is_some_and(|(_, target)| !target.eq_ignore_ascii_case(me))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_takes_remaining_tokens() {
        assert_eq!(
            route("/stock 2330.TW"),
            Routed {
                command: Command::Stock,
                args: vec!["2330.TW".to_string()],
            }
        );
        assert_eq!(route("/stock  aapl   extra").args, vec!["aapl", "extra"]);
    }

    #[test]
    fn stock_without_symbol_has_no_args() {
        let routed = route("/stock");
        assert_eq!(routed.command, Command::Stock);
        assert!(routed.args.is_empty());
    }

    #[test]
    fn every_named_command_routes() {
        for (cmd, name, _) in Command::NAMED {
            assert_eq!(route(&format!("/{name}")).command, cmd);
        }
    }

    #[test]
    fn unknown_or_unprefixed_is_free_text() {
        assert_eq!(route("hello").command, Command::FreeText);
        assert_eq!(route("/unknown").command, Command::FreeText);
        assert_eq!(route("stock 2330.TW").command, Command::FreeText);
        assert_eq!(route("/").command, Command::FreeText);
        assert_eq!(route("").command, Command::FreeText);
        assert_eq!(route("   ").command, Command::FreeText);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(route("/Start").command, Command::FreeText);
        assert_eq!(route("/STOCK AAPL").command, Command::FreeText);
    }

    #[test]
    fn only_first_token_is_considered() {
        assert_eq!(route("what does /ping do").command, Command::FreeText);
        assert_eq!(route("  /ping now").command, Command::Ping);
    }

    #[test]
    fn bot_mention_suffix_is_ignored() {
        let routed = route("/stock@alice_bot 2330.TW");
        assert_eq!(routed.command, Command::Stock);
        assert_eq!(routed.args, vec!["2330.TW"]);
    }

    #[test]
    fn mention_of_another_bot_is_detected() {
        assert!(addressed_elsewhere("/stock@other_bot AAPL", "alice_bot"));
        assert!(addressed_elsewhere("/unknown@other_bot", "alice_bot"));

        assert!(!addressed_elsewhere("/stock@alice_bot AAPL", "alice_bot"));
        assert!(!addressed_elsewhere("/stock@Alice_Bot AAPL", "alice_bot"));
        assert!(!addressed_elsewhere("/stock AAPL", "alice_bot"));
        assert!(!addressed_elsewhere("mail me@other_bot", "alice_bot"));
        assert!(!addressed_elsewhere("", "alice_bot"));
    }
}
