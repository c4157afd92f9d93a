//! labtrack - lab inventory tracker CLI.
//!
//! Front end over the command pipeline: typed (or transcribed) commands
//! mutate the catalog and the usage log, and the forecast/alert views
//! read them back.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use labtrack_catalog::Catalog;
use labtrack_forecast::{
    EXPIRY_WINDOW_DAYS, Forecaster, ForecastError, LinearTrendForecaster, RESTOCK_THRESHOLD,
    expiry_alerts, resources_with_usage, restock_alerts, usage_series,
};
use labtrack_infra::{CatalogStore, CommandOrchestrator, CsvCatalogStore, CsvLedgerStore};
use labtrack_ledger::{LedgerStore, UsageEvent};

#[derive(Parser)]
#[command(name = "labtrack")]
#[command(about = "Smart lab inventory: conversational stock tracking and demand forecasts", long_about = None)]
struct Cli {
    /// Catalog CSV file (Resource,TotalQty,ExpiryDate)
    #[arg(long, default_value = "lab_inventory.csv")]
    catalog: String,

    /// Usage log CSV file (Date,Action,Resource,Qty)
    #[arg(long, default_value = "lab_usage.csv")]
    usage_log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one command, e.g. `labtrack exec use 10 units of ethanol`
    Exec {
        /// The command text (quoting is optional)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Interactive command loop; 'quit' or EOF exits
    Repl,

    /// Show the current catalog
    Show,

    /// Show the most recent usage log entries
    Log {
        /// How many entries to show
        #[arg(long, default_value_t = 10)]
        tail: usize,
    },

    /// Forecast demand from recorded usage
    Forecast {
        /// Resource to forecast; all resources with usage when omitted
        resource: Option<String>,

        /// Days to forecast (7-30)
        #[arg(long, default_value_t = 14)]
        days: u32,
    },

    /// Restocking and expiry alerts
    Alerts {
        /// Quantity below which a resource needs restocking
        #[arg(long, default_value_t = RESTOCK_THRESHOLD)]
        restock_threshold: u64,

        /// Expiry look-ahead window in days
        #[arg(long, default_value_t = EXPIRY_WINDOW_DAYS)]
        expiry_days: i64,
    },
}

fn main() -> Result<()> {
    labtrack_observability::init();

    let cli = Cli::parse();
    let catalog_store = CsvCatalogStore::new(&cli.catalog);
    let ledger_store = CsvLedgerStore::new(&cli.usage_log);

    match cli.command {
        Commands::Exec { text } => exec(catalog_store, ledger_store, &text.join(" ")),
        Commands::Repl => repl(catalog_store, ledger_store),
        Commands::Show => show(&catalog_store),
        Commands::Log { tail } => log(&ledger_store, tail),
        Commands::Forecast { resource, days } => {
            forecast(&catalog_store, &ledger_store, resource.as_deref(), days)
        }
        Commands::Alerts {
            restock_threshold,
            expiry_days,
        } => alerts(&catalog_store, restock_threshold, expiry_days),
    }
}

fn open(
    catalog_store: CsvCatalogStore,
    ledger_store: CsvLedgerStore,
) -> Result<CommandOrchestrator<CsvCatalogStore, CsvLedgerStore>> {
    CommandOrchestrator::open(catalog_store, ledger_store)
        .context("could not open the inventory catalog")
}

fn exec(catalog_store: CsvCatalogStore, ledger_store: CsvLedgerStore, text: &str) -> Result<()> {
    let mut orchestrator = open(catalog_store, ledger_store)?;
    let response = orchestrator
        .handle(text)
        .context("command could not be recorded")?;
    println!("{response}");
    Ok(())
}

fn repl(catalog_store: CsvCatalogStore, ledger_store: CsvLedgerStore) -> Result<()> {
    let mut orchestrator = open(catalog_store, ledger_store)?;
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        // A persistence failure aborts this command only, never the loop.
        match orchestrator.handle(line) {
            Ok(response) => println!("{response}"),
            Err(err) => eprintln!("error: {err}"),
        }
    }

    Ok(())
}

fn load_catalog(store: &CsvCatalogStore) -> Result<Catalog> {
    store.load().context("could not open the inventory catalog")
}

fn show(store: &CsvCatalogStore) -> Result<()> {
    let catalog = load_catalog(store)?;
    if catalog.is_empty() {
        println!("The catalog is empty.");
        return Ok(());
    }

    println!("{:<24} {:>8}  {}", "Resource", "TotalQty", "ExpiryDate");
    for record in catalog.records() {
        let expiry = record
            .expiry_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<24} {:>8}  {}", record.name, record.total_quantity, expiry);
    }
    Ok(())
}

fn log(store: &CsvLedgerStore, tail: usize) -> Result<()> {
    let events = store.load().context("could not read the usage log")?;
    if events.is_empty() {
        println!("No usage recorded yet.");
        return Ok(());
    }

    let start = events.len().saturating_sub(tail);
    for event in &events[start..] {
        print_event(event);
    }
    Ok(())
}

fn print_event(event: &UsageEvent) {
    println!(
        "{}  {:<6} {:<24} {}",
        event.occurred_at.format("%Y-%m-%d %H:%M:%S"),
        event.action,
        event.resource,
        event.quantity
    );
}

fn forecast(
    catalog_store: &CsvCatalogStore,
    ledger_store: &CsvLedgerStore,
    resource: Option<&str>,
    days: u32,
) -> Result<()> {
    let days = days.clamp(7, 30);
    let events = ledger_store.load().context("could not read the usage log")?;

    let targets = match resource {
        Some(name) => vec![labtrack_core::ResourceName::new(name)],
        None => resources_with_usage(&events),
    };
    if targets.is_empty() {
        println!("No usage recorded yet; nothing to forecast.");
        return Ok(());
    }

    // Surface typos in explicit targets before producing an empty series.
    let catalog = load_catalog(catalog_store)?;
    let model = LinearTrendForecaster::new();

    for target in targets {
        if resource.is_some() && catalog.lookup(&target).is_none() {
            println!("{target} not found in inventory.");
            continue;
        }

        let series = usage_series(&events, &target);
        match model.forecast(&series, days) {
            Ok(points) => {
                println!("Forecast for {target} ({days} day(s)):");
                println!("{:<12} {:>10} {:>10} {:>10}", "Date", "Predicted", "Lower", "Upper");
                for p in points {
                    println!(
                        "{:<12} {:>10.1} {:>10.1} {:>10.1}",
                        p.date.to_string(),
                        p.predicted,
                        p.lower,
                        p.upper
                    );
                }
            }
            Err(ForecastError::NotEnoughData { .. }) => {
                println!("Not enough data to forecast {target}.");
            }
            Err(err) => println!("Cannot forecast {target}: {err}"),
        }
        println!();
    }

    Ok(())
}

fn alerts(store: &CsvCatalogStore, restock_threshold: u64, expiry_days: i64) -> Result<()> {
    let catalog = load_catalog(store)?;
    let today = Utc::now().date_naive();

    let restock = restock_alerts(&catalog, restock_threshold);
    if restock.is_empty() {
        println!("All inventory levels are sufficient.");
    } else {
        println!("Resources needing restocking (below {restock_threshold}):");
        for alert in restock {
            println!("  {:<24} {}", alert.resource, alert.total_quantity);
        }
    }

    let expiring = expiry_alerts(&catalog, today, expiry_days);
    if expiring.is_empty() {
        println!("No items are expiring in the next {expiry_days} days.");
    } else {
        println!("Items expiring within {expiry_days} days:");
        for alert in expiring {
            println!("  {:<24} {}", alert.resource, alert.expiry_date);
        }
    }

    Ok(())
}
