//! Treasury rates of exchange client.

use std::time::Duration;

use async_trait::async_trait;
use purchasefx_core::ExchangeRate;
use purchasefx_core::reconciliation::RateSourceError;
use purchasefx_core::reconciliation::ports::ExchangeRateSource;
use purchasefx_shared::config::TreasuryConfig;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

use crate::records::{RateRecord, RatesPage};
use crate::retry::RetryPolicy;

/// Columns requested from the dataset.
const FIELDS: &str =
    "currency,exchange_rate,record_date,record_calendar_day,record_calendar_month,record_calendar_year";

/// Fetches full rate series from the Treasury API.
#[derive(Debug, Clone)]
pub struct TreasuryClient {
    http: Client,
    base_url: String,
    page_size: u32,
    retry: RetryPolicy,
}

impl TreasuryClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &TreasuryConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::new(
            http,
            config.base_url.clone(),
            config.page_size,
            RetryPolicy::new(config.max_attempts, Duration::from_millis(config.retry_delay_ms)),
        ))
    }

    /// Creates a client around an existing HTTP client.
    #[must_use]
    pub fn new(http: Client, base_url: impl Into<String>, page_size: u32, retry: RetryPolicy) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            page_size: page_size.max(1),
            retry,
        }
    }

    /// Fetches one page. Only the send is retried; a response of any status
    /// ends the retry loop.
    async fn fetch_page(&self, currency_name: &str, page: u32) -> Result<RatesPage, RateSourceError> {
        let query = [
            ("fields", FIELDS.to_string()),
            ("filter", format!("currency:eq:{currency_name}")),
            ("sort", "-record_date".to_string()),
            ("format", "json".to_string()),
            ("page[number]", page.to_string()),
            ("page[size]", self.page_size.to_string()),
        ];

        let response = self
            .retry
            .run(|| self.http.get(&self.base_url).query(&query).send())
            .await
            .map_err(|e| {
                error!(error = %e, currency = %currency_name, "exchange rate request failed");
                RateSourceError::Network(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status_code = status.as_u16(), currency = %currency_name, "unexpected API response");
            return Err(RateSourceError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RateSourceError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| RateSourceError::Decoding(e.to_string()))
    }
}

#[async_trait]
impl ExchangeRateSource for TreasuryClient {
    async fn fetch_series(&self, currency_name: &str) -> Result<Vec<ExchangeRate>, RateSourceError> {
        info!(currency = %currency_name, "retrieving exchange rate series");

        let first = self.fetch_page(currency_name, 1).await?;
        if first.data.is_empty() {
            error!(currency = %currency_name, "no data found in API response");
            return Err(RateSourceError::NoRatesFound(currency_name.to_string()));
        }

        let total_pages = first.total_pages();
        let mut records = first.data;
        for page in 2..=total_pages {
            debug!(currency = %currency_name, page, total_pages, "fetching next page");
            records.extend(self.fetch_page(currency_name, page).await?.data);
        }

        let rates = records
            .iter()
            .map(RateRecord::to_exchange_rate)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| warn!(error = %e, currency = %currency_name, "rejected exchange rate record"))?;

        debug!(currency = %currency_name, count = rates.len(), "exchange rate series retrieved");
        Ok(rates)
    }
}
