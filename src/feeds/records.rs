//! Typed price records validated at the parser boundary

use super::parser::Row;
use crate::core::RecordError;
use serde::{Deserialize, Serialize};

/// Latest residential price for a U.S. state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomesticPriceRecord {
    /// Two-letter state code
    pub state: String,
    /// Decimal string, cents per kWh
    pub price: String,
    /// Reporting period, "YYYY-MM"
    pub period: String,
}

/// Price for a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalPriceRecord {
    pub country: String,
    /// Decimal string, dollars per kWh
    pub price: String,
    pub period: String,
}

/// A record type that can be read from a parsed row
pub trait PriceRecord: Sized {
    /// Header fields the feed must provide
    const FIELDS: [&'static str; 3];

    fn from_row(row: &Row) -> Result<Self, RecordError>;
}

fn required<'a>(row: &'a Row, field: &'static str) -> Result<&'a str, RecordError> {
    match row.get(field) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordError::MissingField {
            line: row.line(),
            field,
        }),
    }
}

/// Price is only required to be present; an empty value resolves like any
/// other non-numeric price
fn price(row: &Row) -> Result<String, RecordError> {
    row.get("price").map(str::to_string).ok_or(RecordError::MissingField {
        line: row.line(),
        field: "price",
    })
}

impl PriceRecord for DomesticPriceRecord {
    const FIELDS: [&'static str; 3] = ["state", "price", "period"];

    fn from_row(row: &Row) -> Result<Self, RecordError> {
        let state = required(row, "state")?;
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RecordError::InvalidField {
                line: row.line(),
                field: "state",
                value: state.to_string(),
            });
        }

        Ok(Self {
            state: state.to_string(),
            price: price(row)?,
            period: required(row, "period")?.to_string(),
        })
    }
}

impl PriceRecord for InternationalPriceRecord {
    const FIELDS: [&'static str; 3] = ["country", "price", "period"];

    fn from_row(row: &Row) -> Result<Self, RecordError> {
        Ok(Self {
            country: required(row, "country")?.to_string(),
            price: price(row)?,
            period: required(row, "period")?.to_string(),
        })
    }
}

/// Typed records from a feed plus the rows that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct Feed<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RecordError>,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T: PriceRecord> Feed<T> {
    /// Validate every row, keeping valid records in input order
    pub fn from_rows(rows: impl Iterator<Item = Row>) -> Self {
        let mut feed = Self::default();
        for row in rows {
            match T::from_row(&row) {
                Ok(record) => feed.records.push(record),
                Err(e) => {
                    log::warn!("Rejected price row: {}", e);
                    feed.rejected.push(e);
                }
            }
        }
        feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::parser::parse;

    #[test]
    fn test_domestic_rows() {
        let text = "state,price,period\nCA,10.91,2024-06\nTX,8.20,2024-05\n";
        let feed: Feed<DomesticPriceRecord> = Feed::from_rows(parse(text).unwrap());

        assert!(feed.rejected.is_empty());
        assert_eq!(
            feed.records,
            vec![
                DomesticPriceRecord {
                    state: "CA".into(),
                    price: "10.91".into(),
                    period: "2024-06".into(),
                },
                DomesticPriceRecord {
                    state: "TX".into(),
                    price: "8.20".into(),
                    period: "2024-05".into(),
                },
            ]
        );
    }

    #[test]
    fn test_short_row_is_rejected_not_propagated() {
        let text = "state,price,period\nCA,10.91\nTX,8.20,2024-05\n";
        let feed: Feed<DomesticPriceRecord> = Feed::from_rows(parse(text).unwrap());

        assert_eq!(feed.records.len(), 1);
        assert_eq!(
            feed.rejected,
            vec![RecordError::MissingField { line: 2, field: "period" }]
        );
    }

    #[test]
    fn test_empty_price_is_kept() {
        let text = "state,price,period\nCA,,2024-06\n";
        let feed: Feed<DomesticPriceRecord> = Feed::from_rows(parse(text).unwrap());

        assert!(feed.rejected.is_empty());
        assert_eq!(
            feed.records,
            vec![DomesticPriceRecord {
                state: "CA".into(),
                price: "".into(),
                period: "2024-06".into(),
            }]
        );
    }

    #[test]
    fn test_absent_price_is_rejected() {
        let text = "country,price,period\nJapan\n";
        let feed: Feed<InternationalPriceRecord> = Feed::from_rows(parse(text).unwrap());

        assert!(feed.records.is_empty());
        assert_eq!(
            feed.rejected,
            vec![RecordError::MissingField { line: 2, field: "price" }]
        );
    }

    #[test]
    fn test_bad_state_code() {
        let text = "state,price,period\nUS-TOTAL,12.0,2024-06\n";
        let feed: Feed<DomesticPriceRecord> = Feed::from_rows(parse(text).unwrap());

        assert!(feed.records.is_empty());
        assert!(matches!(
            feed.rejected[0],
            RecordError::InvalidField { field: "state", .. }
        ));
    }

    #[test]
    fn test_non_numeric_price_is_kept_as_string() {
        let text = "country,price,period\nGermany,n/a,2023\n";
        let feed: Feed<InternationalPriceRecord> = Feed::from_rows(parse(text).unwrap());

        assert_eq!(feed.records[0].price, "n/a");
    }
}
