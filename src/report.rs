//! Console report, charts (Plotters) and JSON export of mining results

use crate::cleaning::PreprocessReport;
use crate::miner::MinerRun;
use crate::rules::{Recommendation, Rule, RuleSet};
use crate::support::{FrequentItemset, SupportTable};
use plotters::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Color palette for chart bars
const BAR_COLORS: [RGBColor; 5] = [RED, BLUE, GREEN, CYAN, MAGENTA];

/// Bar chart of the strongest rules' confidence
///
/// # Arguments
/// * `rules` - Ranked rules
/// * `top` - Number of rules to plot
/// * `output_path` - Path to save the PNG plot
/// * `plot_title` - Title for the plot
pub fn create_confidence_chart(
    rules: &RuleSet,
    top: usize,
    output_path: &str,
    plot_title: Option<&str>,
) -> crate::Result<()> {
    let title = plot_title.unwrap_or("Top Association Rules by Confidence");
    let shown = rules.top(top);
    let max_confidence = shown
        .iter()
        .map(|rule| rule.confidence)
        .fold(1.0_f64, f64::max);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(shown.len().max(1) as f64), 0f64..(max_confidence * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Rule rank")
        .y_desc("Confidence")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (rank, rule) in shown.iter().enumerate() {
        let color = BAR_COLORS[rank % BAR_COLORS.len()];
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(rank as f64 + 0.1, 0.0), (rank as f64 + 0.9, rule.confidence)],
                color.filled(),
            )))?
            .label(format!("#{} {} -> {}", rank + 1, rule.antecedent, rule.consequent))
            .legend(move |(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], color.filled()));
    }

    if !shown.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    println!("Rule chart saved to: {}", output_path);

    Ok(())
}

/// Histogram of frequent itemsets per itemset size
pub fn create_itemset_size_chart(table: &SupportTable, output_path: &str) -> crate::Result<()> {
    let counts = table.count_by_size();
    let max_size = table.max_itemset_len();
    let max_count = counts.values().copied().max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Frequent Itemsets by Size", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..((max_size + 1) as f64), 0f64..(max_count * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Itemset size")
        .y_desc("Number of itemsets")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (&size, &count) in &counts {
        let color = BAR_COLORS[size % BAR_COLORS.len()];
        chart.draw_series(std::iter::once(Rectangle::new(
            [(size as f64 - 0.4, 0.0), (size as f64 + 0.4, count as f64)],
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Itemset size chart saved to: {}", output_path);

    Ok(())
}

/// Both charts: rules at `base_output_path`, sizes next to it with a `_sizes` suffix
pub fn generate_chart_report(run: &MinerRun, top: usize, base_output_path: &str) -> crate::Result<()> {
    create_confidence_chart(&run.rules, top, base_output_path, None)?;

    let size_chart_path = sibling_path(base_output_path, "sizes");
    create_itemset_size_chart(&run.table, &size_chart_path)?;

    Ok(())
}

/// `dir/name.ext` -> `dir/name_{suffix}.ext`, with `png` when there is no extension
fn sibling_path(path: &str, suffix: &str) -> String {
    let path = Path::new(path);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy())
        .unwrap_or_else(|| "png".into());
    let file_name = format!("{}_{}.{}", stem, suffix, extension);

    match path.parent() {
        Some(parent) => parent.join(file_name).to_string_lossy().into_owned(),
        None => file_name,
    }
}

/// "Also bought" strength (%) bars for one item's recommendations
pub fn create_recommendation_chart(
    item: &str,
    recommendations: &[Recommendation],
    output_path: &str,
) -> crate::Result<()> {
    let title = format!("Also bought with '{}'", item);

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..(recommendations.len().max(1) as f64), 0f64..110f64)?;

    chart
        .configure_mesh()
        .x_desc("Recommendation")
        .y_desc("Strength (%)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (index, rec) in recommendations.iter().enumerate() {
        let color = BAR_COLORS[index % BAR_COLORS.len()];
        let strength = (rec.confidence * 100.0).round();
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(index as f64 + 0.1, 0.0), (index as f64 + 0.9, strength)],
                color.filled(),
            )))?
            .label(format!("{} ({}%)", rec.item, strength))
            .legend(move |(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], color.filled()));
    }

    if !recommendations.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    println!("Recommendation chart saved to: {}", output_path);

    Ok(())
}

/// Recommendation chart next to `base_output_path` with a `_recommend` suffix
pub fn generate_recommendation_chart(
    item: &str,
    recommendations: &[Recommendation],
    base_output_path: &str,
) -> crate::Result<String> {
    let chart_path = sibling_path(base_output_path, "recommend");
    create_recommendation_chart(item, recommendations, &chart_path)?;
    Ok(chart_path)
}

#[derive(Serialize)]
struct ExportedRun<'a> {
    algorithm: String,
    elapsed_ms: f64,
    frequent_itemsets: Vec<FrequentItemset>,
    rules: &'a [Rule],
    missing_support_lookups: usize,
}

/// Write a mining run as pretty-printed JSON
pub fn export_json(run: &MinerRun, output_path: &str) -> crate::Result<()> {
    let exported = ExportedRun {
        algorithm: run.algorithm.to_string(),
        elapsed_ms: run.elapsed.as_secs_f64() * 1000.0,
        frequent_itemsets: run.table.sorted(),
        rules: run.rules.rules(),
        missing_support_lookups: run.rules.missing_support_lookups(),
    };

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(writer, &exported)?;
    println!("Results exported to: {}", output_path);

    Ok(())
}

/// Print what cleaning removed
pub fn print_preprocess_report(report: &PreprocessReport) {
    println!("\n=== Preprocessing ===");
    println!("Total transactions (before):        {}", report.total_transactions_before);
    println!("Empty transactions (removed):       {}", report.empty_transactions);
    println!("Single-item transactions (removed): {}", report.single_item_transactions);
    println!("Duplicate items (instances):        {}", report.duplicate_item_instances);
    println!("Invalid items (instances):          {}", report.invalid_item_instances);
    println!("Valid transactions (after):         {}", report.total_transactions_after);
    println!("Total items (after):                {}", report.total_items_after);
    println!("Unique products (after):            {}", report.unique_products_after);
}

/// Print the per-algorithm timing comparison
pub fn print_performance(runs: &[MinerRun]) {
    println!("\n=== Performance Comparison ===");
    println!("  Algorithm | Exec time (ms) | # itemsets | # rules");
    println!("  ----------|----------------|------------|--------");
    for run in runs {
        println!(
            "  {:9} | {:14.1} | {:10} | {:7}",
            run.algorithm.to_string(),
            run.elapsed.as_secs_f64() * 1000.0,
            run.table.len(),
            run.rules.len()
        );
    }
}

/// Print itemset counts per size and the most supported itemsets
pub fn print_itemset_summary(table: &SupportTable, top: usize) {
    println!("\n=== Frequent Itemsets ===");
    println!("Total frequent itemsets: {}", table.len());
    for (size, count) in table.count_by_size() {
        println!("  Size {}: {}", size, count);
    }

    for row in table.by_support().iter().take(top) {
        println!("  {:40} support {:.3}", row.itemset.to_string(), row.support);
    }
}

/// Print the strongest rules
pub fn print_top_rules(rules: &RuleSet, top: usize) {
    println!("\n=== Top {} Rules (of {}) ===", top.min(rules.len()), rules.len());
    if rules.is_empty() {
        println!("No rules at the current thresholds.");
        return;
    }

    println!("  Antecedent -> Consequent | support | confidence | lift");
    for rule in rules.top(top) {
        let marker = if rule.missing_support { " *" } else { "" };
        println!(
            "  {} -> {} | {:.3} | {:.3} | {:.3}{}",
            rule.antecedent, rule.consequent, rule.support, rule.confidence, rule.lift, marker
        );
    }
    if rules.missing_support_lookups() > 0 {
        println!(
            "  * derived from missing support ({} lookups filled in)",
            rules.missing_support_lookups()
        );
    }
}

/// Print "also bought" recommendations for one item
pub fn print_recommendations(item: &str, recommendations: &[Recommendation]) {
    println!("\n=== Recommendations for '{}' ===", item);
    if recommendations.is_empty() {
        println!("No associated products found at current thresholds.");
        return;
    }

    println!("  Also bought | Strength (%) | Support | Confidence | Lift");
    for rec in recommendations {
        println!(
            "  {} | {} | {:.3} | {:.3} | {:.3}",
            rec.item,
            (rec.confidence * 100.0).round() as i64,
            rec.support,
            rec.confidence,
            rec.lift
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::miner::{run_miner, Algorithm};
    use crate::threshold::{MinConfidence, MinSupport};
    use std::path::Path;
    use tempfile::tempdir;

    fn create_test_run() -> MinerRun {
        let corpus = Corpus::new(vec![
            vec!["milk", "bread"],
            vec!["milk", "bread", "eggs"],
            vec!["bread", "eggs"],
            vec!["milk", "eggs"],
            vec!["milk", "bread", "butter"],
        ]);
        run_miner(
            Algorithm::Eclat,
            &corpus,
            MinSupport::new(0.4).unwrap(),
            MinConfidence::new(0.5).unwrap(),
        )
    }

    #[test]
    fn test_create_confidence_chart() {
        let run = create_test_run();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("test_rules.png");
        let output_str = output_path.to_str().unwrap();

        let result = create_confidence_chart(&run.rules, 5, output_str, None);
        assert!(result.is_ok());
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_create_itemset_size_chart() {
        let run = create_test_run();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("test_sizes.png");
        let output_str = output_path.to_str().unwrap();

        let result = create_itemset_size_chart(&run.table, output_str);
        assert!(result.is_ok());
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_generate_chart_report() {
        let run = create_test_run();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("test_report.png");
        let output_str = output_path.to_str().unwrap();

        let result = generate_chart_report(&run, 10, output_str);
        assert!(result.is_ok());
        assert!(Path::new(output_str).exists());
        assert!(temp_dir.path().join("test_report_sizes.png").exists());
    }

    #[test]
    fn test_chart_report_keeps_non_png_output() {
        let run = create_test_run();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("rules.bmp");
        let output_str = output_path.to_str().unwrap();

        generate_chart_report(&run, 10, output_str).unwrap();

        let sizes_path = temp_dir.path().join("rules_sizes.bmp");
        assert!(output_path.exists());
        assert!(sizes_path.exists());
        // Rule chart is 900x600, size chart 600x400
        let rules_len = std::fs::metadata(&output_path).unwrap().len();
        let sizes_len = std::fs::metadata(&sizes_path).unwrap().len();
        assert!(rules_len > sizes_len);
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(sibling_path("out/rules.png", "sizes"), "out/rules_sizes.png");
        assert_eq!(sibling_path("rules.jpg", "sizes"), "rules_sizes.jpg");
        assert_eq!(sibling_path("rules", "sizes"), "rules_sizes.png");
        assert_eq!(
            sibling_path("charts.png/rules.bmp", "recommend"),
            "charts.png/rules_recommend.bmp"
        );
    }

    #[test]
    fn test_generate_recommendation_chart() {
        let run = create_test_run();
        let recommendations = run.rules.recommend_for("milk", 5);
        assert!(!recommendations.is_empty());

        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("rules.png");
        let output_str = output_path.to_str().unwrap();

        let chart_path = generate_recommendation_chart("milk", &recommendations, output_str).unwrap();
        assert!(chart_path.ends_with("rules_recommend.png"));
        assert!(Path::new(&chart_path).exists());
        assert!(!output_path.exists());
    }

    #[test]
    fn test_export_json() {
        let run = create_test_run();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("rules.json");
        let output_str = output_path.to_str().unwrap();

        export_json(&run, output_str).unwrap();

        let written: serde_json::Value =
            serde_json::from_reader(File::open(output_str).unwrap()).unwrap();
        assert_eq!(written["algorithm"], "Eclat");
        assert_eq!(
            written["rules"].as_array().unwrap().len(),
            run.rules.len()
        );
        assert_eq!(
            written["frequent_itemsets"][0]["itemset"],
            serde_json::json!(["bread"])
        );
    }
}
