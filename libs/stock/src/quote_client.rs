use chrono::Utc;
use chrono_tz::Tz;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::quote::Quote;

pub const DEFAULT_QUOTE_API: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote endpoint returned HTTP {}", .status.as_u16())]
    Status { status: StatusCode },

    #[error("no quote data returned")]
    NotFound,

    #[error("invalid quote endpoint: {0}")]
    InvalidBase(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct QuoteClient {
    client: Client,
    base_api: String,
}

impl QuoteClient {
    pub fn new(client: Client, base_api: impl Into<String>) -> Self {
        Self {
            client,
            base_api: base_api.into(),
        }
    }

    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let url = self.chart_url(symbol)?;

        let res = self.client.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(QuoteError::Status { status });
        }

        let body: ChartResponse = res.json().await?;

        let meta = body
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.meta)
            .ok_or(QuoteError::NotFound)?;

        debug!(symbol, ?meta, "fetched chart meta");

        Ok(Quote::from_meta(symbol, meta, Utc::now()))
    }

    /// `{base}/v8/finance/chart/{symbol}` with the symbol encoded as one
    /// path segment, so `#`, `?` and `/` cannot leak into other URL parts.
    fn chart_url(&self, symbol: &str) -> Result<Url, QuoteError> {
        let invalid = || QuoteError::InvalidBase(self.base_api.clone());

        let mut url = Url::parse(&self.base_api).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);

        Ok(url)
    }

    /// Fetch a quote and render it, turning every failure into reply text.
    pub async fn quote_report(&self, symbol: &str, tz: Tz) -> String {
        match self.fetch_quote(symbol).await {
            Ok(quote) => quote.render(tz),
            Err(QuoteError::Status { status }) => {
                warn!(symbol, status = status.as_u16(), "quote endpoint rejected lookup");
                format!(
                    "❌ Could not fetch a quote for {} (HTTP {})",
                    symbol,
                    status.as_u16()
                )
            }
            Err(QuoteError::NotFound) => {
                warn!(symbol, "quote endpoint returned no result");
                format!("❌ No quote data found for {}", symbol)
            }
            Err(e @ QuoteError::InvalidBase(_)) => {
                warn!(symbol, error = %e, "quote lookup misconfigured");
                format!("❌ Quote lookup failed: {}", e)
            }
            Err(QuoteError::Transport(e)) => {
                let e = anyhow::Error::from(e);
                warn!(symbol, error = ?e, "quote lookup failed");
                format!("❌ Quote lookup failed: {:#}", e)
            }
        }
    }
}

//
// Match Yahoo chart API JSON
// GET /v8/finance/chart/{symbol}
//
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub regular_market_price: Option<f64>,

    #[serde(default)]
    pub previous_close: Option<f64>,
}
