//! Data loading for the calculator
//!
//! The GPU catalog and the two price feeds are fetched concurrently and
//! joined; the calculator only runs once all three are in. Any fetch failure
//! fails the whole load, there is no partial data set.

use crate::core::{Error, Gpu, Result, SourcesConfig};
use crate::db::Database;
use crate::feeds::{parse_feed, DomesticPriceRecord, Feed, InternationalPriceRecord, PriceRecord};
use crate::pricing::PricingEngine;
use std::path::PathBuf;

/// A local file or a remote resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    File(PathBuf),
    Url(String),
}

impl DataLocation {
    /// URLs are recognised by their http(s) scheme, anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataLocation::Url(location.to_string())
        } else {
            DataLocation::File(PathBuf::from(location))
        }
    }

    /// Read the whole resource as text
    pub async fn read_text(&self, client: &reqwest::Client) -> Result<String> {
        match self {
            DataLocation::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| Error::Fetch(format!("{}: {}", path.display(), e))),
            DataLocation::Url(url) => {
                let response = client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Fetch(format!("{} returned {}", url, status)));
                }
                Ok(response.text().await?)
            }
        }
    }
}

/// Where the GPU catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// SQLite file read directly
    Database(PathBuf),
    /// Catalog API returning a JSON array
    Api(String),
}

impl CatalogSource {
    pub fn parse(location: &str) -> Self {
        match DataLocation::parse(location) {
            DataLocation::Url(url) => CatalogSource::Api(url),
            DataLocation::File(path) => CatalogSource::Database(path),
        }
    }

    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<Gpu>> {
        match self {
            CatalogSource::Database(path) => {
                if !path.exists() {
                    return Err(Error::Fetch(format!("catalog not found at {}", path.display())));
                }
                let path = path.clone();
                tokio::task::spawn_blocking(move || Database::open(&path)?.list_gpus())
                    .await
                    .map_err(|e| Error::Fetch(e.to_string()))?
            }
            CatalogSource::Api(url) => {
                let response = client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Fetch(format!("{} returned {}", url, status)));
                }
                Ok(response.json::<Vec<Gpu>>().await?)
            }
        }
    }
}

/// Handles for the three data sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub catalog: CatalogSource,
    pub domestic: DataLocation,
    pub international: DataLocation,
}

impl DataSources {
    pub fn from_config(config: &SourcesConfig) -> Self {
        Self {
            catalog: CatalogSource::parse(&config.catalog),
            domestic: DataLocation::parse(&config.domestic_prices),
            international: DataLocation::parse(&config.international_prices),
        }
    }
}

/// Everything the calculator needs
pub struct DataSet {
    pub catalog: Vec<Gpu>,
    pub pricing: PricingEngine,
}

/// Load state exposed to the presentation layer
pub enum DataStatus {
    Loading,
    Ready(DataSet),
    /// Generic failure, no partial data
    Error(String),
}

impl DataStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DataStatus::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DataStatus::Error(_))
    }
}

impl From<Result<DataSet>> for DataStatus {
    fn from(result: Result<DataSet>) -> Self {
        match result {
            Ok(data) => DataStatus::Ready(data),
            Err(e) => {
                log::error!("{}", e);
                DataStatus::Error(e.to_string())
            }
        }
    }
}

async fn load_feed<T: PriceRecord>(location: &DataLocation, client: &reqwest::Client) -> Result<Vec<T>> {
    let text = location.read_text(client).await?;
    let feed: Feed<T> = parse_feed(&text).unwrap_or_else(|e| {
        log::warn!("Price feed {:?} is unusable ({}), treating it as empty", location, e);
        Feed::default()
    });
    Ok(feed.records)
}

/// Fetch all three sources concurrently
pub async fn load(sources: &DataSources, client: &reqwest::Client) -> Result<DataSet> {
    let (catalog, domestic, international) = tokio::try_join!(
        sources.catalog.fetch(client),
        load_feed::<DomesticPriceRecord>(&sources.domestic, client),
        load_feed::<InternationalPriceRecord>(&sources.international, client),
    )?;

    log::info!(
        "Loaded {} GPUs, {} state prices, {} country prices",
        catalog.len(),
        domestic.len(),
        international.len()
    );

    Ok(DataSet {
        catalog,
        pricing: PricingEngine::new(domestic, international),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn seeded_db(dir: &Path) -> String {
        let path = dir.join("gpu_db.db");
        let db = Database::open(&path).unwrap();
        db.insert_gpu("Nvidia", "GeForce RTX 4090", Some(450)).unwrap();
        db.insert_gpu("AMD", "Radeon RX 7900 XTX", Some(355)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(
            DataLocation::parse("https://example.com/prices.csv"),
            DataLocation::Url("https://example.com/prices.csv".into())
        );
        assert_eq!(
            DataLocation::parse("data/prices.csv"),
            DataLocation::File(PathBuf::from("data/prices.csv"))
        );
        assert_eq!(
            CatalogSource::parse("http://localhost:3000/api/gpus"),
            CatalogSource::Api("http://localhost:3000/api/gpus".into())
        );
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DataSources::from_config(&SourcesConfig {
            catalog: seeded_db(dir.path()),
            domestic_prices: write(dir.path(), "us.csv", "state,price,period\nCA,10.91,2024-06\n"),
            international_prices: write(dir.path(), "intl.csv", "country,price,period\nFrance,0.25,2023\n"),
        });

        let data = load(&sources, &reqwest::Client::new()).await.unwrap();
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.pricing.domestic().len(), 1);
        assert_eq!(data.pricing.international()[0].country, "France");
    }

    #[tokio::test]
    async fn test_empty_feed_degrades_to_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DataSources::from_config(&SourcesConfig {
            catalog: seeded_db(dir.path()),
            domestic_prices: write(dir.path(), "us.csv", ""),
            international_prices: write(dir.path(), "intl.csv", "country,price,period\n"),
        });

        let status = DataStatus::from(load(&sources, &reqwest::Client::new()).await);
        match status {
            DataStatus::Ready(data) => {
                assert!(data.pricing.domestic().is_empty());
                assert_eq!(data.catalog.len(), 2);
            }
            _ => panic!("expected ready data"),
        }
    }

    #[tokio::test]
    async fn test_any_missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sources = DataSources::from_config(&SourcesConfig {
            catalog: seeded_db(dir.path()),
            domestic_prices: write(dir.path(), "us.csv", "state,price,period\nCA,10.91,2024-06\n"),
            international_prices: dir.path().join("missing.csv").to_string_lossy().into_owned(),
        });

        let status = DataStatus::from(load(&sources, &reqwest::Client::new()).await);
        assert!(status.is_error());
        assert!(!status.is_ready());
    }

    #[tokio::test]
    async fn test_missing_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogSource::Database(dir.path().join("nope.db"));

        assert!(matches!(catalog.fetch(&reqwest::Client::new()).await, Err(Error::Fetch(_))));
    }
}
