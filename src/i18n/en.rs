//! English labels

pub const LABELS: &[(&str, &str)] = &[
    ("status.loading", "Loading..."),
    ("status.error", "Error loading data"),
    ("status.no_gpus", "No GPUs match the current filters"),
    // Selection summary
    ("selection.company", "Company"),
    ("selection.model", "Model"),
    ("selection.all_models", "All models"),
    ("selection.state", "State"),
    ("selection.country", "Country"),
    ("selection.hours", "Hours per day"),
    ("selection.workload", "Workload"),
    ("price.rate", "Electricity price"),
    ("price.period", "Period"),
    ("price.unavailable", "price unavailable"),
    // Result columns
    ("column.gpu", "GPU"),
    ("column.tdp", "TDP"),
    ("column.kilowatts", "kW"),
    ("column.daily", "Daily"),
    ("column.monthly", "Monthly"),
    ("column.annual", "Annual"),
    ("column.carbon", "CO2 / year (lb)"),
    ("carbon.insufficient_data", "insufficient data"),
    ("options.companies", "Companies"),
    ("options.models", "Models"),
    ("options.states", "States"),
    ("options.countries", "Countries"),
];
