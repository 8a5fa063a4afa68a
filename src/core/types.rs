//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Pounds of CO2 emitted per kWh on the U.S. grid
pub const US_GRID_LB_CO2_PER_KWH: f64 = 0.867;

/// Workload factors a user can pick
pub const WORKLOAD_PRESETS: [f64; 3] = [0.15, 0.6, 1.0];

/// A GPU from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gpu {
    pub id: i64,
    pub manufacturer: String,
    pub name: String,
    /// Thermal design power in watts
    pub tdp: Option<u32>,
}

/// Which price feed a region belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// U.S. state, domestic feed (cents/kWh)
    State,
    /// Country, international feed (dollars/kWh)
    Country,
}

/// The active electricity price region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    pub code: String,
}

impl Region {
    pub fn state(code: &str) -> Self {
        Self {
            kind: RegionKind::State,
            code: code.to_string(),
        }
    }

    pub fn country(code: &str) -> Self {
        Self {
            kind: RegionKind::Country,
            code: code.to_string(),
        }
    }

    pub fn is_domestic(&self) -> bool {
        self.kind == RegionKind::State
    }
}

/// The user's current filter selection (not persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub gpu_company: String,
    /// Empty means "all models of the company"
    pub gpu_model: String,
    pub region: Region,
    /// Hours of use per day, 1..=24
    pub daily_hours: u32,
    /// Fraction of TDP drawn under the chosen usage pattern
    pub workload_factor: f64,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            gpu_company: "Nvidia".to_string(),
            gpu_model: String::new(),
            region: Region::state("CA"),
            daily_hours: 10,
            workload_factor: 0.7,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

/// How the price of a resolved record was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStatus {
    Parsed,
    /// The feed value was not numeric and 0.0 was substituted
    Defaulted,
}

/// Price record selected for a region, normalized to dollars per kWh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    pub price_per_kwh: f64,
    pub region_label: String,
    pub period: String,
    pub status: PriceStatus,
}

/// Annual carbon output, only known for the U.S. grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "pounds", rename_all = "snake_case")]
pub enum CarbonEstimate {
    Pounds(f64),
    InsufficientData,
}

impl CarbonEstimate {
    pub fn pounds(&self) -> Option<f64> {
        match self {
            CarbonEstimate::Pounds(lb) => Some(*lb),
            CarbonEstimate::InsufficientData => None,
        }
    }
}

/// Cost and emission figures for one GPU under one selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub kilowatts: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub annual_cost: f64,
    pub annual_carbon: CarbonEstimate,
}

/// One row handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedRow {
    pub gpu: Gpu,
    pub metrics: Metrics,
    /// Empty when no price record matched the region
    pub region_label: String,
    pub period: String,
    pub price_per_kwh: f64,
}
