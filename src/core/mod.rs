//! Core module - Selection state, configuration, and common types

mod config;
mod error;
mod types;

pub use config::{Config, DefaultsConfig, GeneralConfig, IngestConfig, ServerConfig, SourcesConfig};
pub use error::{Error, ParseError, RecordError, Result, SelectionError};
pub use types::{
    CarbonEstimate, ComputedRow, Gpu, Metrics, PriceStatus, Region, RegionKind, ResolvedPrice, Selection,
    US_GRID_LB_CO2_PER_KWH, WORKLOAD_PRESETS,
};
