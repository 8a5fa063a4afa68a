//! Cost and emission calculator
//!
//! Pure functions from a GPU's power rating, the usage selection, and the
//! resolved price to daily/monthly/annual cost and annual carbon. Nothing is
//! rounded here; rounding happens only when rendering.

use crate::core::{
    CarbonEstimate, ComputedRow, Gpu, Metrics, ResolvedPrice, Selection, US_GRID_LB_CO2_PER_KWH,
};
use crate::pricing::PricingEngine;

const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Compute metrics for one GPU
///
/// A missing price (lookup miss) counts as 0.0 per kWh. A GPU without a TDP
/// draws nothing.
pub fn compute(gpu: &Gpu, selection: &Selection, price: Option<&ResolvedPrice>) -> Metrics {
    let price_per_kwh = price.map_or(0.0, |p| p.price_per_kwh);
    let tdp_watts = gpu.tdp.map_or(0.0, f64::from);
    let hours = f64::from(selection.daily_hours);

    let kilowatts = tdp_watts / 1000.0 * selection.workload_factor;
    let daily_kwh = kilowatts * hours;
    let daily_cost = daily_kwh * price_per_kwh;

    // Grid factor is U.S.-specific
    let annual_carbon = if selection.region.is_domestic() {
        CarbonEstimate::Pounds(daily_kwh * US_GRID_LB_CO2_PER_KWH * DAYS_PER_YEAR)
    } else {
        CarbonEstimate::InsufficientData
    };

    Metrics {
        kilowatts,
        daily_cost,
        monthly_cost: daily_cost * DAYS_PER_MONTH,
        annual_cost: daily_cost * DAYS_PER_YEAR,
        annual_carbon,
    }
}

/// Catalog entries matching the selected company and model
///
/// An empty company or model skips that filter.
pub fn filter_catalog<'a>(catalog: &'a [Gpu], selection: &Selection) -> Vec<&'a Gpu> {
    catalog
        .iter()
        .filter(|gpu| selection.gpu_company.is_empty() || gpu.manufacturer == selection.gpu_company)
        .filter(|gpu| selection.gpu_model.is_empty() || gpu.name == selection.gpu_model)
        .collect()
}

/// Metrics for every visible GPU, tagged with the resolved region
pub fn compute_rows(catalog: &[Gpu], pricing: &PricingEngine, selection: &Selection) -> Vec<ComputedRow> {
    let price = pricing.resolve(selection);
    if price.is_none() {
        log::debug!("No price record for {:?}", selection.region);
    }

    filter_catalog(catalog, selection)
        .into_iter()
        .map(|gpu| ComputedRow {
            gpu: gpu.clone(),
            metrics: compute(gpu, selection, price.as_ref()),
            region_label: price.as_ref().map(|p| p.region_label.clone()).unwrap_or_default(),
            period: price.as_ref().map(|p| p.period.clone()).unwrap_or_default(),
            price_per_kwh: price.as_ref().map_or(0.0, |p| p.price_per_kwh),
        })
        .collect()
}
