use std::time::Duration;

use anyhow::Result;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};

const AGENT: &str = concat!("Mozilla/5.0 (compatible; bot/", env!("CARGO_PKG_VERSION"), ")");

/// The single HTTP client shared by every upstream call.
pub fn outbound_client(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

    let client = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?;

    Ok(client)
}
