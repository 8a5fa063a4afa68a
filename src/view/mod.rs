//! Text presentation of the calculator output
//!
//! Money and kW are shown to 2 decimals, price per kWh to 4.

use crate::core::{CarbonEstimate, ComputedRow, Gpu, PriceStatus, RegionKind, ResolvedPrice, Selection};
use crate::i18n::I18n;
use crate::pricing::PricingEngine;
use crate::sources::DataStatus;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Values offered by each filter control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    /// Models of the selected company only
    pub models: Vec<String>,
    pub states: Vec<String>,
    pub countries: Vec<String>,
}

/// Build the option sets; companies and models sorted, regions in feed order
pub fn filter_options(catalog: &[Gpu], pricing: &PricingEngine, selection: &Selection) -> FilterOptions {
    let companies: BTreeSet<&str> = catalog.iter().map(|g| g.manufacturer.as_str()).collect();
    let models: BTreeSet<&str> = catalog
        .iter()
        .filter(|g| g.manufacturer == selection.gpu_company)
        .map(|g| g.name.as_str())
        .collect();

    FilterOptions {
        companies: companies.into_iter().map(String::from).collect(),
        models: models.into_iter().map(String::from).collect(),
        states: pricing.domestic().iter().map(|r| r.state.clone()).collect(),
        countries: pricing.international().iter().map(|r| r.country.clone()).collect(),
    }
}

pub fn format_money(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn format_price(value: f64) -> String {
    format!("${:.4}", value)
}

pub fn format_carbon(carbon: &CarbonEstimate, i18n: &I18n) -> String {
    match carbon {
        CarbonEstimate::Pounds(lb) => format!("{:.2}", lb),
        CarbonEstimate::InsufficientData => i18n.get("carbon.insufficient_data").to_string(),
    }
}

/// Progress or failure line for a load status; nothing once data is ready
pub fn status_message(status: &DataStatus, i18n: &I18n) -> Option<String> {
    match status {
        DataStatus::Loading => Some(i18n.get("status.loading").to_string()),
        DataStatus::Error(_) => Some(i18n.get("status.error").to_string()),
        DataStatus::Ready(_) => None,
    }
}

/// Selection summary, resolved price, and one line per GPU
pub fn render_report(
    rows: &[ComputedRow],
    price: Option<&ResolvedPrice>,
    selection: &Selection,
    i18n: &I18n,
) -> String {
    let mut out = String::new();

    let model = if selection.gpu_model.is_empty() {
        i18n.get("selection.all_models")
    } else {
        selection.gpu_model.as_str()
    };
    let region_key = match selection.region.kind {
        RegionKind::State => "selection.state",
        RegionKind::Country => "selection.country",
    };

    let _ = writeln!(out, "{}: {}", i18n.get("selection.company"), selection.gpu_company);
    let _ = writeln!(out, "{}: {}", i18n.get("selection.model"), model);
    let _ = writeln!(out, "{}: {}", i18n.get(region_key), selection.region.code);
    let _ = writeln!(out, "{}: {}", i18n.get("selection.hours"), selection.daily_hours);
    let _ = writeln!(out, "{}: {}", i18n.get("selection.workload"), selection.workload_factor);

    let rate = price.map_or(0.0, |p| p.price_per_kwh);
    let period = price.map_or("", |p| p.period.as_str());
    let _ = write!(out, "{}: {}/kWh", i18n.get("price.rate"), format_price(rate));
    if price.map_or(false, |p| p.status == PriceStatus::Defaulted) {
        let _ = write!(out, " ({})", i18n.get("price.unavailable"));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}: {}", i18n.get("price.period"), period);
    let _ = writeln!(out);

    if rows.is_empty() {
        let _ = writeln!(out, "{}", i18n.get("status.no_gpus"));
        return out;
    }

    let _ = writeln!(
        out,
        "{:<32} {:>6} {:>8} {:>10} {:>10} {:>12} {:>18}",
        i18n.get("column.gpu"),
        i18n.get("column.tdp"),
        i18n.get("column.kilowatts"),
        i18n.get("column.daily"),
        i18n.get("column.monthly"),
        i18n.get("column.annual"),
        i18n.get("column.carbon"),
    );

    for row in rows {
        let tdp = row.gpu.tdp.map_or_else(|| "-".to_string(), |w| format!("{}W", w));
        let _ = writeln!(
            out,
            "{:<32} {:>6} {:>8.2} {:>10} {:>10} {:>12} {:>18}",
            format!("{} {}", row.gpu.manufacturer, row.gpu.name),
            tdp,
            row.metrics.kilowatts,
            format_money(row.metrics.daily_cost),
            format_money(row.metrics.monthly_cost),
            format_money(row.metrics.annual_cost),
            format_carbon(&row.metrics.annual_carbon, i18n),
        );
    }

    out
}

/// Render the option sets as labelled lists
pub fn render_options(options: &FilterOptions, i18n: &I18n) -> String {
    let mut out = String::new();
    for (key, values) in [
        ("options.companies", &options.companies),
        ("options.models", &options.models),
        ("options.states", &options.states),
        ("options.countries", &options.countries),
    ] {
        let _ = writeln!(out, "{}: {}", i18n.get(key), values.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_rows;
    use crate::core::Region;
    use crate::feeds::{DomesticPriceRecord, InternationalPriceRecord};
    use crate::sources::DataSet;

    fn catalog() -> Vec<Gpu> {
        vec![
            Gpu { id: 1, manufacturer: "Nvidia".into(), name: "GeForce RTX 4090".into(), tdp: Some(450) },
            Gpu { id: 2, manufacturer: "AMD".into(), name: "Radeon RX 7900 XTX".into(), tdp: Some(355) },
            Gpu { id: 3, manufacturer: "Nvidia".into(), name: "A100".into(), tdp: Some(400) },
        ]
    }

    fn engine() -> PricingEngine {
        PricingEngine::new(
            vec![
                DomesticPriceRecord { state: "TX".into(), price: "8.20".into(), period: "2024-05".into() },
                DomesticPriceRecord { state: "CA".into(), price: "10.91".into(), period: "2024-06".into() },
                DomesticPriceRecord { state: "HI".into(), price: "??".into(), period: "2024-06".into() },
            ],
            vec![InternationalPriceRecord { country: "France".into(), price: "0.2516".into(), period: "2023".into() }],
        )
    }

    #[test]
    fn test_filter_options() {
        let options = filter_options(&catalog(), &engine(), &Selection::new());

        assert_eq!(options.companies, ["AMD", "Nvidia"]);
        assert_eq!(options.models, ["A100", "GeForce RTX 4090"]);
        assert_eq!(options.states, ["TX", "CA", "HI"]);
        assert_eq!(options.countries, ["France"]);
    }

    #[test]
    fn test_number_formats() {
        assert_eq!(format_money(14.7285), "$14.73");
        assert_eq!(format_price(0.1091), "$0.1091");
        assert_eq!(format_price(0.0), "$0.0000");

        let i18n = I18n::new("en");
        assert_eq!(format_carbon(&CarbonEstimate::Pounds(1424.0475), &i18n), "1424.05");
        assert_eq!(format_carbon(&CarbonEstimate::InsufficientData, &i18n), "insufficient data");
    }

    #[test]
    fn test_report_for_state() {
        let engine = engine();
        let selection = Selection { workload_factor: 1.0, ..Selection::new() };
        let price = engine.resolve(&selection);
        let rows = compute_rows(&catalog(), &engine, &selection);

        let report = render_report(&rows, price.as_ref(), &selection, &I18n::new("en"));
        assert!(report.contains("$0.1091/kWh"));
        assert!(report.contains("Period: 2024-06"));
        assert!(report.contains("$179.20"));
        assert!(report.contains("1424.05"));
    }

    #[test]
    fn test_report_for_country() {
        let engine = engine();
        let mut selection = Selection::new();
        selection.region = Region::country("France");
        let price = engine.resolve(&selection);
        let rows = compute_rows(&catalog(), &engine, &selection);

        let report = render_report(&rows, price.as_ref(), &selection, &I18n::new("en"));
        assert!(report.contains("Country: France"));
        assert!(report.contains("insufficient data"));
    }

    #[test]
    fn test_report_for_lookup_miss() {
        let engine = engine();
        let mut selection = Selection::new();
        selection.region = Region::state("ZZ");
        let rows = compute_rows(&catalog(), &engine, &selection);

        let report = render_report(&rows, None, &selection, &I18n::new("en"));
        assert!(report.contains("$0.0000/kWh"));
        assert!(report.contains("Period: \n"));
        assert!(report.contains("$0.00"));
    }

    #[test]
    fn test_report_flags_defaulted_price() {
        let engine = engine();
        let mut selection = Selection::new();
        selection.region = Region::state("HI");
        let price = engine.resolve(&selection);

        let report = render_report(&[], price.as_ref(), &selection, &I18n::new("en"));
        assert!(report.contains("(price unavailable)"));
        assert!(report.contains("No GPUs match"));
    }

    #[test]
    fn test_status_message() {
        let i18n = I18n::new("fr");
        assert_eq!(status_message(&DataStatus::Loading, &i18n).as_deref(), Some("Chargement..."));
        assert_eq!(
            status_message(&DataStatus::Error("timeout".into()), &i18n).as_deref(),
            Some("Erreur lors du chargement des donn\u{00E9}es")
        );

        let ready = DataStatus::Ready(DataSet { catalog: catalog(), pricing: engine() });
        assert_eq!(status_message(&ready, &i18n), None);
    }

    #[test]
    fn test_report_for_empty_feed_price() {
        let feed = crate::feeds::parse_feed::<DomesticPriceRecord>("state,price,period\nCA,,2024-06\n").unwrap();
        let engine = PricingEngine::new(feed.records, Vec::new());
        let selection = Selection::new();
        let price = engine.resolve(&selection);
        let rows = compute_rows(&catalog(), &engine, &selection);

        let report = render_report(&rows, price.as_ref(), &selection, &I18n::new("en"));
        assert!(report.contains("State: CA"));
        assert!(report.contains("$0.0000/kWh (price unavailable)"));
        assert!(report.contains("Period: 2024-06"));
    }

    #[test]
    fn test_render_options() {
        let options = filter_options(&catalog(), &engine(), &Selection::new());
        let text = render_options(&options, &I18n::new("en"));
        assert!(text.contains("Companies: AMD, Nvidia"));
        assert!(text.contains("Countries: France"));
    }
}
