//! # Shedquote CLI Application
//!
//! Terminal front end for the quotation engine: reads a quotation input as
//! JSON, resolves prices over the reference defaults, and prints the
//! breakdown as text or JSON. Logs go to stderr so stdout stays pipeable.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quote_core::file_io::{load_quotation_input, load_quote_record, load_stored_prices};
use quote_core::{
    compute_quote, resolve_price_config, PriceConfig, PriceSource, QuotationInput, QuoteRecord,
    QuoteResult, ResolvedPriceConfig,
};

#[derive(Parser)]
#[command(name = "quote_cli")]
#[command(about = "Price metal buildings from their geometry and options")]
struct Cli {
    /// Stored price file (JSON); reference defaults fill any gaps
    #[arg(short, long, env = "QUOTE_PRICES", global = true)]
    prices: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a building described by a JSON input file
    Quote {
        /// Path to the quotation input
        input: PathBuf,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Print an archive-ready history record under this project name
        #[arg(long, value_name = "PROJECT_NAME")]
        record: Option<String>,
    },

    /// Re-price an archived history record with the current prices
    Recompute {
        /// Path to the record JSON
        record: PathBuf,
    },

    /// Print the resolved price configuration
    Prices,

    /// Prompt for the four dimensions and quote a bare frame
    Interactive,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

/// Load stored prices if a path was given; unreadable files fall back to defaults.
fn load_prices(path: Option<&Path>) -> ResolvedPriceConfig {
    let stored = path.and_then(|p| match load_stored_prices(p) {
        Ok(stored) => Some(stored),
        Err(e) => {
            tracing::warn!(path = %p.display(), error = %e, "could not read stored prices");
            None
        }
    });

    let resolved = resolve_price_config(stored.as_ref(), &PriceConfig::reference());
    if resolved.source == PriceSource::ReferenceDefaults {
        eprintln!("Note: using reference prices (no stored price file).");
    }
    resolved
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let prices = load_prices(cli.prices.as_deref());

    match cli.command {
        Commands::Quote { input, json, record } => {
            let quotation = load_quotation_input(&input).with_context(|| {
                format!("Failed to load quotation input from {}", input.display())
            })?;
            let result = compute_quote(&quotation, &prices.config);

            if let Some(name) = record {
                let record = QuoteRecord::new(name, quotation, result);
                println!("{}", record.to_json()?);
            } else if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_quote(&quotation, &result);
            }
        }

        Commands::Recompute { record } => {
            let archived = load_quote_record(&record).with_context(|| {
                format!("Failed to load history record from {}", record.display())
            })?;
            let result = archived.recompute(&prices.config);

            println!("Project:  {}", archived.project_name);
            println!("Quoted:   {}", archived.created.format("%Y-%m-%d"));
            println!("Then:     USD {:>14.2}", archived.result.total);
            println!("Now:      USD {:>14.2}", result.total);
            println!("Change:   USD {:>14.2}", result.total - archived.result.total);
        }

        Commands::Prices => {
            println!("{}", serde_json::to_string_pretty(&prices.config)?);
        }

        Commands::Interactive => {
            println!("Shedquote - Metal Building Quotation");
            println!("====================================");
            println!();

            let width = prompt_f64("Width (m) [20.0]: ", 20.0);
            let length = prompt_f64("Length (m) [30.0]: ", 30.0);
            let height = prompt_f64("Eave height (m) [5.0]: ", 5.0);
            let slope = prompt_f64("Roof slope (%) [10.0]: ", 10.0);
            println!();

            let quotation = QuotationInput::with_dimensions(width, length, height, slope);
            let result = compute_quote(&quotation, &prices.config);
            print_quote(&quotation, &result);
        }
    }

    Ok(())
}

fn print_quote(input: &QuotationInput, result: &QuoteResult) {
    if result.is_empty() {
        println!("Insufficient input: width and length must both be greater than zero.");
        return;
    }

    let d = &input.dimensions;
    let q = &result.quantities;
    let b = &result.breakdown;
    let m = &result.margins;

    println!("═══════════════════════════════════════");
    println!("  QUOTATION");
    println!("═══════════════════════════════════════");
    println!();
    println!("Building:");
    println!(
        "  {:.2} x {:.2} m, eave {:.2} m, slope {:.1} %",
        d.width_m, d.length_m, d.eave_height_m, d.slope_pct
    );
    println!();
    println!("Quantities:");
    println!("  Frames:           {}", q.frame_count);
    println!("  Rafter length:    {:.2} m", q.rafter_length_m);
    println!(
        "  Steel:            {:.2} kg (columns {:.2}, beams {:.2}, purlins {:.2})",
        q.total_steel_kg, q.column_kg, q.beam_kg, q.purlin_kg
    );
    println!("  Roof area:        {:.2} m²", q.roof_area_m2);
    println!("  Net wall area:    {:.2} m²", q.net_wall_area_m2);
    println!("  Cladding area:    {:.2} m²", q.total_cladding_area_m2);
    println!("  Insulation area:  {:.2} m²", q.insulation_area_m2);
    println!("  Concrete:         {:.2} m³", q.concrete_volume_m3);
    println!();
    println!("Costs (USD):");
    println!("  Structural materials     {:>14.2}", b.structural_materials);
    println!("  Cladding & insulation    {:>14.2}", b.cladding_and_insulation);
    println!("  Accessories              {:>14.2}", b.accessories);
    println!("  Civil works              {:>14.2}", b.civil_works);
    println!("  Labor                    {:>14.2}", b.labor);
    println!("  Logistics & other        {:>14.2}", b.logistics_and_other);
    println!("  ─────────────────────────────────────");
    println!("  Subtotal                 {:>14.2}", result.subtotal);
    println!("  Contingency ({:>5.1} %)    {:>14.2}", m.contingency_pct, m.contingency_amount);
    println!("  Profit      ({:>5.1} %)    {:>14.2}", m.profit_pct, m.profit_amount);
    println!();
    println!("═══════════════════════════════════════");
    println!("  TOTAL: USD {:.2}", result.total);
    println!("═══════════════════════════════════════");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_command() {
        let cli = Cli::try_parse_from(["quote_cli", "quote", "shed.json", "--json"]).unwrap();
        match cli.command {
            Commands::Quote { input, json, record } => {
                assert_eq!(input, PathBuf::from("shed.json"));
                assert!(json);
                assert!(record.is_none());
            }
            _ => panic!("expected quote command"),
        }
    }

    #[test]
    fn test_parse_record_and_prices() {
        let cli = Cli::try_parse_from([
            "quote_cli",
            "--prices",
            "prices.json",
            "quote",
            "shed.json",
            "--record",
            "Galpón Norte",
        ])
        .unwrap();
        assert_eq!(cli.prices, Some(PathBuf::from("prices.json")));
        match cli.command {
            Commands::Quote { record, .. } => assert_eq!(record.as_deref(), Some("Galpón Norte")),
            _ => panic!("expected quote command"),
        }
    }

    #[test]
    fn test_global_prices_after_subcommand() {
        let cli = Cli::try_parse_from(["quote_cli", "prices", "--prices", "p.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Prices));
        assert_eq!(cli.prices, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["quote_cli", "quote"]).is_err());
        assert!(Cli::try_parse_from(["quote_cli"]).is_err());
    }

    #[test]
    fn test_unreadable_price_file_falls_back() {
        let resolved = load_prices(Some(Path::new("/nonexistent/prices.json")));
        assert_eq!(resolved.source, PriceSource::ReferenceDefaults);
        assert_eq!(resolved.config, PriceConfig::reference());
    }
}
