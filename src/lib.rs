//! GPU Power Cost library
//!
//! Cost and carbon estimation for GPUs: price feeds, price resolution,
//! the filter state machine, and the calculator, plus the catalog storage,
//! catalog API, and price ingestion around them.

pub mod calculator;
pub mod core;
pub mod db;
pub mod feeds;
pub mod filter;
pub mod i18n;
pub mod ingest;
pub mod pricing;
pub mod server;
pub mod sources;
pub mod view;
