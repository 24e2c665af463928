use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::quote_client::Meta;

const DEFAULT_CURRENCY: &str = "TWD";
const MISSING: &str = "N/A";

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn of(change: f64) -> Self {
        if change < 0.0 {
            Direction::Down
        } else if change > 0.0 {
            Direction::Up
        } else {
            Direction::Flat
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Direction::Up => "🟢",
            Direction::Down => "🔴",
            Direction::Flat => "⚪",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: Option<f64>,
    pub previous_close: Option<f64>,
    pub change: f64,
    pub change_percent: f64,
    pub currency: String,
    pub observed_at: DateTime<Utc>,
}

impl Quote {
    /// Build a quote from chart meta. Change stays zero unless both prices
    /// are present, and the percentage needs a non-zero previous close.
    pub fn from_meta(requested: &str, meta: Meta, observed_at: DateTime<Utc>) -> Self {
        let price = meta.regular_market_price;
        let previous_close = meta.previous_close;

        let change = match (price, previous_close) {
            (Some(price), Some(prev)) => price - prev,
            _ => 0.0,
        };

        let change_percent = match previous_close {
            Some(prev) if prev != 0.0 => change / prev * 100.0,
            _ => 0.0,
        };

        Self {
            symbol: meta.symbol.unwrap_or_else(|| requested.to_string()),
            price,
            previous_close,
            change,
            change_percent,
            currency: meta.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            observed_at,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::of(self.change)
    }

    pub fn render(&self, tz: Tz) -> String {
        format!(
            "📊 {symbol} Quote\n\
             \n\
             💰 Price: {price} {currency}\n\
             📉 Previous Close: {prev} {currency}\n\
             {marker} Change: {change:+.2} ({pct:+.2}%)\n\
             🕐 Updated: {at}",
            symbol = self.symbol,
            price = display_price(self.price),
            prev = display_price(self.previous_close),
            currency = self.currency,
            marker = self.direction().marker(),
            change = self.change,
            pct = self.change_percent,
            at = self
                .observed_at
                .with_timezone(&tz)
                .format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

fn display_price(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use chrono_tz::Asia::Taipei;

    use super::*;

    fn meta(price: Option<f64>, prev: Option<f64>) -> Meta {
        Meta {
            symbol: Some("2330.TW".to_string()),
            currency: Some("TWD".to_string()),
            regular_market_price: price,
            previous_close: prev,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 1, 30, 0).unwrap()
    }

    #[test]
    fn positive_change_renders_up_marker() {
        let quote = Quote::from_meta("2330.TW", meta(Some(600.0), Some(590.0)), at());

        assert_eq!(quote.direction(), Direction::Up);

        let text = quote.render(Taipei);
        assert!(text.contains("💰 Price: 600.00 TWD"), "{text}");
        assert!(text.contains("📉 Previous Close: 590.00 TWD"), "{text}");
        assert!(text.contains("🟢 Change: +10.00 (+1.69%)"), "{text}");
        assert!(text.contains("🕐 Updated: 2025-03-14 09:30:00"), "{text}");
    }

    #[test]
    fn negative_change_is_signed_and_red() {
        let quote = Quote::from_meta("AAPL", meta(Some(95.5), Some(100.0)), at());

        assert_eq!(quote.direction(), Direction::Down);
        assert!(quote.render(Taipei).contains("🔴 Change: -4.50 (-4.50%)"));
    }

    #[test]
    fn zero_previous_close_skips_percentage() {
        let quote = Quote::from_meta("X", meta(Some(5.0), Some(0.0)), at());

        assert_eq!(quote.change, 5.0);
        assert_eq!(quote.change_percent, 0.0);
        assert!(quote.render(Taipei).contains("(+0.00%)"));
    }

    #[test]
    fn missing_price_shows_na_without_arithmetic() {
        let quote = Quote::from_meta("X", meta(None, Some(590.0)), at());

        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.change_percent, 0.0);
        assert_eq!(quote.direction(), Direction::Flat);

        let text = quote.render(Taipei);
        assert!(text.contains("💰 Price: N/A TWD"), "{text}");
        assert!(text.contains("⚪ Change: +0.00 (+0.00%)"), "{text}");
    }

    #[test]
    fn missing_symbol_and_currency_fall_back() {
        let quote = Quote::from_meta("^TWII", Meta::default(), at());

        assert_eq!(quote.symbol, "^TWII");
        assert_eq!(quote.currency, "TWD");
        assert!(quote.render(Taipei).contains("📉 Previous Close: N/A TWD"));
    }

    #[test]
    fn render_differs_only_in_timestamp() {
        let first = Quote::from_meta("2330.TW", meta(Some(600.0), Some(590.0)), at());
        let mut second = first.clone();
        second.observed_at = at() + Duration::minutes(5);

        let a = first.render(Taipei);
        let b = second.render(Taipei);

        let strip = |s: &str| {
            s.lines()
                .filter(|l| !l.starts_with("🕐"))
                .collect::<Vec<_>>()
                .join("\n")
        };

        assert_ne!(a, b);
        assert_eq!(strip(&a), strip(&b));
        assert_eq!(a, first.render(Taipei));
    }
}
