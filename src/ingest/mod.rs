//! Domestic electricity price ingestion
//!
//! Pulls monthly residential retail prices from the EIA API, keeps the most
//! recent period per state, and writes the `state,price,period` feed.

use crate::core::{Error, IngestConfig, Result};
use crate::feeds::DomesticPriceRecord;
use chrono::{Months, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const RETAIL_SALES_ENDPOINT: &str = "electricity/retail-sales/data";

#[derive(Debug, Deserialize)]
struct EiaEnvelope {
    response: Option<EiaResponse>,
}

#[derive(Debug, Deserialize)]
struct EiaResponse {
    data: Option<Vec<EiaRecord>>,
}

/// One row of the retail-sales dataset
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EiaRecord {
    pub period: String,
    pub stateid: String,
    /// The API sends numbers as strings, numbers, or null
    #[serde(default)]
    pub price: serde_json::Value,
}

impl EiaRecord {
    fn price_text(&self) -> Option<String> {
        match &self.price {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// EIA API client
pub struct EiaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EiaClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client, reading the API key from the configured variable
    pub fn from_config(client: reqwest::Client, config: &IngestConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| Error::Config(format!("{} is not defined in environment variables", config.api_key_env)))?;
        Ok(Self::new(client, &config.base_url, &api_key))
    }

    /// Monthly prices for `sector` from `start` ("YYYY-MM"), newest first
    pub async fn fetch_retail_prices(&self, start: &str, sector: &str, length: u32) -> Result<Vec<EiaRecord>> {
        let url = format!("{}/{}", self.base_url, RETAIL_SALES_ENDPOINT);
        log::debug!("Requesting {} from {}", url, start);

        let length = length.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("frequency", "monthly"),
                ("data[]", "price"),
                ("facets[sectorid][]", sector),
                ("start", start),
                ("sort[0][column]", "period"),
                ("sort[0][direction]", "desc"),
                ("length", length.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("EIA API error response: {}", body);
            return Err(Error::Fetch(format!("EIA API error: {}", status)));
        }

        let envelope: EiaEnvelope = response.json().await?;
        envelope
            .response
            .and_then(|r| r.data)
            .ok_or_else(|| Error::Fetch("Invalid response format from EIA API".to_string()))
    }
}

/// First period to query, `months_back` months before `today`
pub fn start_period(today: NaiveDate, months_back: u32) -> String {
    today
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(today)
        .format("%Y-%m")
        .to_string()
}

fn period_date(period: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", period), "%Y-%m-%d").ok()
}

/// Keep the newest record per two-letter state, sorted by state
///
/// Census-region aggregates have longer ids and are dropped. On equal periods the first record seen wins.
pub fn latest_per_state(records: Vec<EiaRecord>) -> Vec<DomesticPriceRecord> {
    let mut latest: BTreeMap<String, (NaiveDate, DomesticPriceRecord)> = BTreeMap::new();

    for record in records {
        if record.stateid.len() != 2 {
            continue;
        }
        let (Some(date), Some(price)) = (period_date(&record.period), record.price_text()) else {
            log::warn!("Skipping EIA row for {} ({})", record.stateid, record.period);
            continue;
        };

        let newer = latest.get(&record.stateid).map_or(true, |(current, _)| date > *current);
        if newer {
            latest.insert(
                record.stateid.clone(),
                (
                    date,
                    DomesticPriceRecord {
                        state: record.stateid,
                        price,
                        period: record.period,
                    },
                ),
            );
        }
    }

    latest.into_values().map(|(_, record)| record).collect()
}

/// Render the domestic feed
pub fn to_csv(records: &[DomesticPriceRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["state", "price", "period"])?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Serialization(e.to_string()))
}

/// Write the feed to every output path, creating directories as needed
pub fn write_outputs(records: &[DomesticPriceRecord], outputs: &[String]) -> Result<()> {
    let csv = to_csv(records)?;
    for output in outputs {
        let path = Path::new(output);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &csv)?;
        log::info!("Wrote {} state prices to {}", records.len(), path.display());
    }
    Ok(())
}

/// Fetch, reduce, and write the domestic feed
pub async fn run(client: &EiaClient, config: &IngestConfig, today: NaiveDate) -> Result<Vec<DomesticPriceRecord>> {
    let start = start_period(today, config.months_back);
    log::info!("Fetching electricity prices since {}", start);

    let records = client
        .fetch_retail_prices(&start, &config.sector, config.page_length)
        .await?;
    log::info!("Received {} records from EIA API", records.len());

    let prices = latest_per_state(records);
    log::info!("Processed latest prices for {} states", prices.len());

    write_outputs(&prices, &config.outputs)?;
    Ok(prices)
}
