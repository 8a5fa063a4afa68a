//! Electricity price feeds
//!
//! Two comma-delimited feeds share one parser:
//! - domestic: `state,price,period`, price in cents per kWh
//! - international: `country,price,period`, price in dollars per kWh

pub mod parser;
mod records;

pub use parser::{parse, Row, Rows};
pub use records::{DomesticPriceRecord, Feed, InternationalPriceRecord, PriceRecord};

use crate::core::ParseError;

/// Parse and validate a whole feed payload
pub fn parse_feed<T: PriceRecord>(text: &str) -> Result<Feed<T>, ParseError> {
    let rows = parse(text)?;

    for field in T::FIELDS {
        if !rows.header().iter().any(|h| h == field) {
            log::warn!("Price feed header is missing '{}'", field);
        }
    }

    Ok(Feed::from_rows(rows))
}
