//! HTTP client for venue public ticker endpoints.
//!
//! Each supported venue exposes an unauthenticated REST ticker with best
//! bid/ask. Prices arrive as JSON strings and are parsed to `f64` here, so
//! the rest of the pipeline never sees venue payload shapes.

use crate::config::CollectorConfig;
use crate::error::{CollectorError, CollectorResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use xvd_core::{BITSTAMP, COINBASE, KRAKEN};

/// Default timeout for ticker requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Coinbase rejects requests without a User-Agent header.
const USER_AGENT: &str = concat!("xvd/", env!("CARGO_PKG_VERSION"));

const COINBASE_API_BASE: &str = "https://api.exchange.coinbase.com";
const BITSTAMP_API_BASE: &str = "https://www.bitstamp.net/api/v2";
const KRAKEN_API_BASE: &str = "https://api.kraken.com/0/public";

/// Coinbase Exchange product ticker.
#[derive(Debug, Deserialize)]
struct CoinbaseTicker {
    bid: String,
    ask: String,
}

/// Bitstamp pair ticker.
#[derive(Debug, Deserialize)]
struct BitstampTicker {
    bid: String,
    ask: String,
}

/// Kraken public Ticker envelope. `result` is keyed by the resolved pair
/// name (e.g. "XXBTZUSD" for a "XBTUSD" request).
#[derive(Debug, Deserialize)]
struct KrakenResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: BTreeMap<String, KrakenPairTicker>,
}

/// One Kraken pair entry: `b`/`a` are `[price, whole_lot_volume, lot_volume]`.
#[derive(Debug, Deserialize)]
struct KrakenPairTicker {
    b: Vec<String>,
    a: Vec<String>,
}

/// Client for fetching best bid/ask from venue ticker APIs.
pub struct VenueClient {
    client: Client,
    coinbase_product: String,
    bitstamp_pair: String,
    kraken_pair: String,
}

impl VenueClient {
    /// Create a new venue client with the configured pair codes.
    pub fn new(config: &CollectorConfig) -> CollectorResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                CollectorError::HttpClient(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            coinbase_product: config.coinbase_product.clone(),
            bitstamp_pair: config.bitstamp_pair.clone(),
            kraken_pair: config.kraken_pair.clone(),
        })
    }

    /// Fetch `(bid, ask)` from one venue.
    pub async fn fetch_quote(&self, venue: &str) -> CollectorResult<(f64, f64)> {
        match venue.to_ascii_uppercase().as_str() {
            COINBASE => self.fetch_coinbase().await,
            KRAKEN => self.fetch_kraken().await,
            BITSTAMP => self.fetch_bitstamp().await,
            other => Err(CollectorError::Config(format!(
                "No fetcher for venue: {other}"
            ))),
        }
    }

    async fn fetch_coinbase(&self) -> CollectorResult<(f64, f64)> {
        let url = format!(
            "{COINBASE_API_BASE}/products/{}/ticker",
            self.coinbase_product
        );
        let ticker: CoinbaseTicker = self.get_json(COINBASE, &url).await?;
        Ok((
            parse_price(COINBASE, "bid", &ticker.bid)?,
            parse_price(COINBASE, "ask", &ticker.ask)?,
        ))
    }

    async fn fetch_bitstamp(&self) -> CollectorResult<(f64, f64)> {
        let url = format!("{BITSTAMP_API_BASE}/ticker/{}/", self.bitstamp_pair);
        let ticker: BitstampTicker = self.get_json(BITSTAMP, &url).await?;
        Ok((
            parse_price(BITSTAMP, "bid", &ticker.bid)?,
            parse_price(BITSTAMP, "ask", &ticker.ask)?,
        ))
    }

    async fn fetch_kraken(&self) -> CollectorResult<(f64, f64)> {
        let url = format!("{KRAKEN_API_BASE}/Ticker?pair={}", self.kraken_pair);
        let response: KrakenResponse = self.get_json(KRAKEN, &url).await?;
        quote_from_kraken(response)
    }

    /// GET `url`, require a success status, parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, venue: &str, url: &str) -> CollectorResult<T> {
        debug!(venue = %venue, url = %url, "Fetching ticker");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CollectorError::HttpClient(format!("{venue}: request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollectorError::HttpClient(format!(
                "{venue}: HTTP {status}: {body}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            CollectorError::HttpClient(format!("{venue}: failed to parse response: {e}"))
        })
    }
}

/// Extract `(bid, ask)` from a Kraken Ticker envelope.
///
/// A single-pair request returns one `result` entry; its key is Kraken's
/// resolved pair name, so the first entry is taken rather than looking up
/// the requested code.
fn quote_from_kraken(response: KrakenResponse) -> CollectorResult<(f64, f64)> {
    if !response.error.is_empty() {
        return Err(CollectorError::Payload(format!(
            "KRAKEN: API error: {}",
            response.error.join("; ")
        )));
    }
    let (pair, ticker) = response
        .result
        .into_iter()
        .next()
        .ok_or_else(|| CollectorError::Payload("KRAKEN: empty result".to_string()))?;
    let bid = ticker
        .b
        .first()
        .ok_or_else(|| CollectorError::Payload(format!("KRAKEN: no bid for {pair}")))?;
    let ask = ticker
        .a
        .first()
        .ok_or_else(|| CollectorError::Payload(format!("KRAKEN: no ask for {pair}")))?;
    Ok((
        parse_price(KRAKEN, "bid", bid)?,
        parse_price(KRAKEN, "ask", ask)?,
    ))
}

/// Parse a JSON string price field to `f64`.
fn parse_price(venue: &str, field: &str, raw: &str) -> CollectorResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        CollectorError::Payload(format!("{venue}: {field} {raw:?} is not a number"))
    })
}
