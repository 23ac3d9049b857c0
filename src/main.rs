//! BasketForge: market-basket analysis CLI
//!
//! This is the main entrypoint that orchestrates loading, cleaning, mining,
//! rule generation and reporting.

use anyhow::Result;
use basketforge::report;
use basketforge::support::SUPPORT_TOLERANCE;
use basketforge::{
    clean_transactions, load_catalog, load_transactions, run_miner, Args, Corpus, MinerRun,
};
use clap::Parser;
use std::time::Instant;
use tracing::{info, warn, Level};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if args.verbose {
        println!("BasketForge - Association Rule Mining");
        println!("=====================================\n");
    }

    run_pipeline(&args)
}

/// Run the full load -> clean -> mine -> report pipeline
fn run_pipeline(args: &Args) -> Result<()> {
    let (min_support, min_confidence) = args.thresholds()?;
    let start_time = Instant::now();

    // Step 1: Load transactions and the optional catalog
    if args.verbose {
        println!("Step 1: Loading data");
        println!("  Input file: {}", args.input);
    }
    let raw_transactions = load_transactions(&args.input)?;
    println!("✓ Data loaded: {} transactions", raw_transactions.len());

    let catalog = match &args.products {
        Some(path) => {
            let catalog = load_catalog(path)?;
            println!("✓ Products loaded: {}", catalog.len());
            Some(catalog)
        }
        None => None,
    };
    let valid_tokens = match &catalog {
        Some(catalog) if !args.no_validate => Some(catalog.valid_tokens()),
        _ => None,
    };

    // Step 2: Clean
    let (cleaned, preprocess) = clean_transactions(&raw_transactions, valid_tokens.as_ref());
    report::print_preprocess_report(&preprocess);
    if cleaned.is_empty() {
        warn!("no valid transactions after preprocessing");
    }
    let corpus = Corpus::new(cleaned);

    // Step 3: Mine and derive rules
    if args.verbose {
        println!("\nStep 3: Mining");
        println!("  Minimum support: {}", min_support.value());
        println!("  Minimum confidence: {}", min_confidence.value());
    }
    let runs: Vec<MinerRun> = args
        .algorithms()
        .into_iter()
        .map(|algorithm| run_miner(algorithm, &corpus, min_support, min_confidence))
        .collect();
    report::print_performance(&runs);

    if let [first, second] = runs.as_slice() {
        if first.table.agrees_with(&second.table, SUPPORT_TOLERANCE) {
            info!(itemsets = first.table.len(), "apriori and eclat agree");
        } else {
            warn!(
                apriori = first.table.len(),
                eclat = second.table.len(),
                "apriori and eclat produced different itemsets"
            );
        }
    }

    // Step 4: Report on the first run
    let Some(primary) = runs.first() else {
        anyhow::bail!("No algorithm selected");
    };
    report::print_itemset_summary(&primary.table, args.top);
    report::print_top_rules(&primary.rules, args.top);

    if let Some(item) = &args.recommend {
        let item = basketforge::cleaning::standardize_item(item);
        let recommendations = primary.rules.recommend_for(&item, args.top);
        report::print_recommendations(&item, &recommendations);

        if let Some(output) = &args.output {
            report::generate_recommendation_chart(&item, &recommendations, output)?;
        }
    }

    if let Some(output) = &args.output {
        report::generate_chart_report(primary, args.top, output)?;
    }
    if let Some(json) = &args.json {
        report::export_json(primary, json)?;
    }

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
