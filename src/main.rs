//! GPU Power Cost - command line entry point
//!
//! Estimates what running a GPU costs in electricity, and how much CO2 it
//! emits on the U.S. grid, for a chosen usage pattern and price region.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gpu_power_cost_lib::calculator::compute_rows;
use gpu_power_cost_lib::core::{Config, Selection};
use gpu_power_cost_lib::db::Database;
use gpu_power_cost_lib::filter::Action;
use gpu_power_cost_lib::i18n::I18n;
use gpu_power_cost_lib::ingest::{self, EiaClient};
use gpu_power_cost_lib::sources::{self, DataSet, DataSources, DataStatus};
use gpu_power_cost_lib::{server, view};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gpu-power-cost",
    version,
    about = "Estimate GPU electricity cost and carbon output by region."
)]
struct Opts {
    /// Configuration file. Defaults to the user config directory.
    #[clap(long, env = "GPU_POWER_COST_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute cost and carbon for the GPUs matching the filters.
    Estimate(EstimateArgs),

    /// List the values each filter accepts.
    Options {
        /// GPU manufacturer whose models are listed.
        #[clap(long)]
        company: Option<String>,
    },

    /// Serve the GPU catalog over HTTP.
    Serve {
        /// Listen address, overrides the config.
        #[clap(short = 'a', long)]
        address: Option<SocketAddr>,

        /// SQLite catalog, overrides the config.
        #[clap(long)]
        database: Option<PathBuf>,
    },

    /// Replace the catalog with a power-draw CSV (Manufacturer, Card Name, TDP).
    Seed {
        csv: PathBuf,

        #[clap(long)]
        database: Option<PathBuf>,
    },

    /// Print a summary of the catalog.
    Stats {
        #[clap(long)]
        database: Option<PathBuf>,
    },

    /// Fetch the latest state electricity prices from the EIA API.
    FetchPrices,
}

#[derive(Debug, clap::Args)]
struct EstimateArgs {
    /// GPU manufacturer. Changing it clears the model.
    #[clap(long)]
    company: Option<String>,

    /// Exact GPU model name. Omit for all models of the company.
    #[clap(long)]
    model: Option<String>,

    /// Two-letter U.S. state code (domestic prices).
    #[clap(long, conflicts_with = "country")]
    state: Option<String>,

    /// Country name (international prices).
    #[clap(long)]
    country: Option<String>,

    /// Hours of use per day, 1-24.
    #[clap(long)]
    hours: Option<u32>,

    /// Workload factor: 0.15, 0.6 or 1.0.
    #[clap(short = 'w', long)]
    workload: Option<f64>,

    /// Print the computed rows as JSON.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

impl EstimateArgs {
    /// Filter actions in the order a user would make them
    fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(company) = &self.company {
            actions.push(Action::SetCompany(company.clone()));
        }
        if let Some(model) = &self.model {
            actions.push(Action::SetModel(model.clone()));
        }
        if let Some(state) = &self.state {
            actions.push(Action::SetState(state.clone()));
        }
        if let Some(country) = &self.country {
            actions.push(Action::SetCountry(country.clone()));
        }
        if let Some(hours) = self.hours {
            actions.push(Action::SetDailyHours(hours));
        }
        if let Some(workload) = self.workload {
            actions.push(Action::SetWorkload(workload));
        }
        actions
    }
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

async fn load_data(config: &Config, i18n: &I18n) -> Option<DataSet> {
    let client = reqwest::Client::new();
    let data_sources = DataSources::from_config(&config.sources);

    let mut status = DataStatus::Loading;
    loop {
        if let Some(message) = view::status_message(&status, i18n) {
            eprintln!("{}", message);
        }
        status = match status {
            DataStatus::Loading => sources::load(&data_sources, &client).await.into(),
            DataStatus::Ready(data) => return Some(data),
            DataStatus::Error(_) => return None,
        };
    }
}

async fn estimate(config: &Config, i18n: &I18n, args: &EstimateArgs) -> Result<bool> {
    let mut selection = config.defaults.selection();
    selection
        .apply_all(args.actions())
        .context("invalid filter selection")?;

    let Some(data) = load_data(config, i18n).await else {
        return Ok(false);
    };

    let rows = compute_rows(&data.catalog, &data.pricing, &selection);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        let price = data.pricing.resolve(&selection);
        print!("{}", view::render_report(&rows, price.as_ref(), &selection, i18n));
    }
    Ok(true)
}

async fn options(config: &Config, i18n: &I18n, company: Option<String>) -> Result<bool> {
    let mut selection: Selection = config.defaults.selection();
    if let Some(company) = company {
        selection.apply(Action::SetCompany(company))?;
    }

    let Some(data) = load_data(config, i18n).await else {
        return Ok(false);
    };

    let options = view::filter_options(&data.catalog, &data.pricing, &selection);
    print!("{}", view::render_options(&options, i18n));
    Ok(true)
}

fn open_database(config: &Config, database: Option<PathBuf>) -> Result<Database> {
    let path = database.unwrap_or_else(|| PathBuf::from(&config.server.database));
    Database::open(&path).with_context(|| format!("failed to open catalog {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let config = load_config(opts.config.as_ref());
    let i18n = I18n::new(&config.general.language);

    log::debug!("Starting gpu-power-cost v{}", env!("CARGO_PKG_VERSION"));

    match opts.command {
        Command::Estimate(args) => {
            if !estimate(&config, &i18n, &args).await? {
                std::process::exit(1);
            }
        }
        Command::Options { company } => {
            if !options(&config, &i18n, company).await? {
                std::process::exit(1);
            }
        }
        Command::Serve { address, database } => {
            let address = match address {
                Some(address) => address,
                None => config
                    .server
                    .address
                    .parse()
                    .with_context(|| format!("invalid server address '{}'", config.server.address))?,
            };
            let db = open_database(&config, database)?;
            server::serve(address, db).await?;
        }
        Command::Seed { csv, database } => {
            let mut db = open_database(&config, database)?;
            let report = db.seed_from_csv(&csv)?;
            println!("Seeding complete! Inserted {} GPUs, skipped {} rows", report.inserted, report.skipped);
        }
        Command::Stats { database } => {
            let stats = open_database(&config, database)?.stats()?;
            println!("Total GPUs: {}", stats.total);
            if let Some(gpu) = &stats.highest_tdp {
                println!("Highest TDP: {} {}W", gpu.name, gpu.tdp.unwrap_or_default());
            }
            println!("Manufacturers: {}", stats.manufacturers.join(", "));
            if let Some(avg) = stats.average_tdp {
                println!("Average TDP: {}W", avg);
            }
        }
        Command::FetchPrices => {
            let client = EiaClient::from_config(reqwest::Client::new(), &config.ingest)?;
            let today = chrono::Local::now().date_naive();
            let prices = ingest::run(&client, &config.ingest, today).await?;
            println!("Electricity prices updated for {} states", prices.len());
        }
    }

    Ok(())
}
