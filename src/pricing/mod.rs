//! Price resolution engine
//!
//! Picks the electricity price record for the selected region and
//! normalizes it to dollars per kWh:
//! - State: domestic feed, cents per kWh, divided by 100
//! - Country: international feed, already dollars per kWh
//!
//! A country selection never falls back to the domestic feed.

use crate::core::{PriceStatus, RegionKind, ResolvedPrice, Selection};
use crate::feeds::{DomesticPriceRecord, InternationalPriceRecord};

const CENTS_PER_DOLLAR: f64 = 100.0;

/// Pricing engine over the two loaded feeds
pub struct PricingEngine {
    domestic: Vec<DomesticPriceRecord>,
    international: Vec<InternationalPriceRecord>,
}

impl PricingEngine {
    /// Create a new pricing engine from parsed feeds
    pub fn new(domestic: Vec<DomesticPriceRecord>, international: Vec<InternationalPriceRecord>) -> Self {
        Self {
            domestic,
            international,
        }
    }

    /// Resolve the price for the selection's region
    pub fn resolve(&self, selection: &Selection) -> Option<ResolvedPrice> {
        resolve(&self.domestic, &self.international, selection)
    }

    pub fn domestic(&self) -> &[DomesticPriceRecord] {
        &self.domestic
    }

    pub fn international(&self) -> &[InternationalPriceRecord] {
        &self.international
    }
}

/// Resolve the price record for `selection`, `None` when no record matches
///
/// Lookup is exact and case-sensitive; the first matching record wins.
pub fn resolve(
    domestic: &[DomesticPriceRecord],
    international: &[InternationalPriceRecord],
    selection: &Selection,
) -> Option<ResolvedPrice> {
    let code = selection.region.code.as_str();

    match selection.region.kind {
        RegionKind::Country => {
            let record = international.iter().find(|r| r.country == code)?;
            let (price, status) = parse_price(&record.price);
            Some(ResolvedPrice {
                price_per_kwh: price,
                region_label: record.country.clone(),
                period: record.period.clone(),
                status,
            })
        }
        RegionKind::State => {
            let record = domestic.iter().find(|r| r.state == code)?;
            let (cents, status) = parse_price(&record.price);
            Some(ResolvedPrice {
                price_per_kwh: cents / CENTS_PER_DOLLAR,
                region_label: record.state.clone(),
                period: record.period.clone(),
                status,
            })
        }
    }
}

/// Parse a feed price, substituting 0.0 for anything non-numeric
fn parse_price(raw: &str) -> (f64, PriceStatus) {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (value, PriceStatus::Parsed),
        _ => {
            log::warn!("Unparseable price '{}', using 0.0", raw);
            (0.0, PriceStatus::Defaulted)
        }
    }
}
