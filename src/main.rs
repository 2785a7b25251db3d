//! Bundle Quote - command-line entry point

use anyhow::{Context, Result};
use std::borrow::Cow;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use bundle_quote::cli::{Cli, Commands};
use bundle_quote::{builtin_tables, PriceCalculator, PricingTables, ServiceSet};

/// Initialize the logger with appropriate settings.
///
/// Logs go to stderr so stdout stays clean for quotes and JSON output.
fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "bundle_quote=debug"
    } else {
        "bundle_quote=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed: {:?}", cli);

    let tables: Cow<'static, PricingTables> = match &cli.tables {
        Some(path) => {
            info!("Using pricing tables from {:?}", path);
            Cow::Owned(PricingTables::load_from_file(path)?)
        }
        None => Cow::Borrowed(builtin_tables()),
    };

    match cli.command {
        Commands::Quote { year, services } => {
            let services: ServiceSet = services.into_iter().collect();
            let quote = PriceCalculator::new(&tables)
                .calculate(&services, year)
                .with_context(|| format!("Failed to price {} for {}", services, year))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("Year:        {}", year);
                println!("Services:    {}", services);
                println!("Base price:  {}", quote.base_price);
                println!("Discount:    {}", quote.discount());
                println!("Final price: {}", quote.final_price);
            }
        }
        Commands::Update { selected, action } => {
            let previous: ServiceSet = selected.into_iter().collect();
            let action = action.to_action();
            let next = bundle_quote::update_selected_services(&previous, action);
            if next == previous {
                info!("Selection unchanged by {:?}", action);
            }

            if cli.json {
                println!("{}", serde_json::to_string(&next)?);
            } else {
                println!("{}", next);
            }
        }
        Commands::Tables { output } => match output {
            Some(path) => {
                tables.save_to_file(&path)?;
                info!("Pricing tables written to {:?}", path);
                println!("✓ Pricing tables written to {:?}", path);
            }
            None => println!("{}", serde_json::to_string_pretty(&*tables)?),
        },
        Commands::Validate { path } => match PricingTables::load_from_file(&path) {
            Ok(loaded) => {
                info!("Pricing tables validation successful");
                println!(
                    "✓ Pricing tables are valid: {} years, {} discount rules",
                    loaded.catalog.entries().len(),
                    loaded.discounts.rules().len()
                );
            }
            Err(e) => {
                error!("Pricing tables validation failed: {:#}", e);
                eprintln!("✗ Pricing tables validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
