//! Price lookup tools: cryptocurrency (CoinGecko) and stock (Stooq).
//!
//! Both are thin HTTP glue: fetch a quote, pull the one number the
//! agent asked for, hand it back as JSON.

use hearsay_core::tool::Tool;
use hearsay_types::error::ToolError;
use serde_json::json;

use std::collections::HashMap;
use std::time::Duration;

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .expect("failed to create reqwest client")
}

// ---------------------------------------------------------------------------
// Cryptocurrency (CoinGecko simple price)
// ---------------------------------------------------------------------------

/// Current USD price of a cryptocurrency via the CoinGecko simple-price
/// endpoint.
pub struct CryptoPriceTool {
    client: reqwest::Client,
    base_url: String,
}

impl CryptoPriceTool {
    /// Create the tool with its default endpoint.
    pub fn new() -> Self {
        Self {
            client: http_client(),
            base_url: "https://api.coingecko.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl Default for CryptoPriceTool {
    fn default() -> Self {
        Self::new()
    }
}

/// CoinGecko shape: `{"bitcoin": {"usd": 97000.0}}`.
type SimplePrice = HashMap<String, HashMap<String, f64>>;

fn extract_usd_price(coin: &str, payload: &SimplePrice) -> Result<f64, ToolError> {
    payload
        .get(coin)
        .and_then(|prices| prices.get("usd"))
        .copied()
        .ok_or_else(|| ToolError::UnexpectedPayload(format!("no usd price for '{coin}'")))
}

impl Tool for CryptoPriceTool {
    fn name(&self) -> &'static str {
        "crypto_price_usd"
    }

    fn description(&self) -> &'static str {
        "current USD price of a cryptocurrency; args: {\"coin\": string} (CoinGecko id, e.g. \"bitcoin\")"
    }

    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let coin = args
            .get("coin")
            .and_then(|c| c.as_str())
            .ok_or_else(|| ToolError::BadArgs("expected {\"coin\": string}".to_string()))?
            .to_lowercase();

        let payload = self
            .client
            .get(format!("{}/api/v3/simple/price", self.base_url))
            .query(&[("ids", coin.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| ToolError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| ToolError::Http(e.to_string()))?
            .json::<SimplePrice>()
            .await
            .map_err(|e| ToolError::UnexpectedPayload(e.to_string()))?;

        let price = extract_usd_price(&coin, &payload)?;
        Ok(json!({"coin": coin, "usd": price}))
    }
}

// ---------------------------------------------------------------------------
// Stock (Stooq daily quote, CSV)
// ---------------------------------------------------------------------------

/// Current price of a stock via Stooq's CSV quote endpoint.
pub struct StockPriceTool {
    client: reqwest::Client,
    base_url: String,
}

impl StockPriceTool {
    /// Create the tool with its default endpoint.
    pub fn new() -> Self {
        Self {
            client: http_client(),
            base_url: "https://stooq.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl Default for StockPriceTool {
    fn default() -> Self {
        Self::new()
    }
}

/// One quote row out of Stooq's two-line CSV payload.
#[derive(Debug)]
struct StooqQuote {
    symbol: String,
    date: String,
    close: f64,
}

/// Parse Stooq's `Symbol,Date,Time,Open,High,Low,Close,Volume` CSV.
///
/// An unknown symbol comes back with `N/D` in the data columns, which
/// is reported as an unexpected payload rather than a price of zero.
fn parse_stooq_csv(body: &str) -> Result<StooqQuote, ToolError> {
    let data_line = body
        .lines()
        .nth(1)
        .ok_or_else(|| ToolError::UnexpectedPayload("quote CSV has no data row".to_string()))?;

    let fields: Vec<&str> = data_line.split(',').collect();
    if fields.len() < 8 {
        return Err(ToolError::UnexpectedPayload(format!(
            "quote CSV has {} columns, expected 8",
            fields.len()
        )));
    }

    let close: f64 = fields[6].parse().map_err(|_| {
        ToolError::UnexpectedPayload(format!("no quote for '{}'", fields[0]))
    })?;

    Ok(StooqQuote {
        symbol: fields[0].to_lowercase(),
        date: fields[1].to_string(),
        close,
    })
}

impl Tool for StockPriceTool {
    fn name(&self) -> &'static str {
        "stock_price"
    }

    fn description(&self) -> &'static str {
        "latest close price of a stock; args: {\"symbol\": string} (Stooq symbol, e.g. \"aapl.us\")"
    }

    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let symbol = args
            .get("symbol")
            .and_then(|s| s.as_str())
            .ok_or_else(|| ToolError::BadArgs("expected {\"symbol\": string}".to_string()))?
            .to_lowercase();

        let body = self
            .client
            .get(format!("{}/q/l/", self.base_url))
            .query(&[("s", symbol.as_str()), ("f", "sd2t2ohlcv"), ("h", ""), ("e", "csv")])
            .send()
            .await
            .map_err(|e| ToolError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| ToolError::Http(e.to_string()))?
            .text()
            .await
            .map_err(|e| ToolError::Http(e.to_string()))?;

        let quote = parse_stooq_csv(&body)?;
        Ok(json!({"symbol": quote.symbol, "date": quote.date, "close": quote.close}))
    }
}
