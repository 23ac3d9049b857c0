//! Command-line interface definitions and argument parsing

use crate::miner::Algorithm;
use crate::threshold::{MinConfidence, MinSupport};
use clap::{Parser, ValueEnum};

/// Which miners to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    Apriori,
    Eclat,
    /// Run both and cross-check their itemsets
    Both,
}

/// Market-basket analysis CLI: frequent itemsets and association rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the transactions CSV file
    #[arg(short, long, default_value = "transactions.csv")]
    pub input: String,

    /// Optional products CSV (id,name) used to validate items
    #[arg(short, long)]
    pub products: Option<String>,

    /// Keep items that are not in the products catalog
    #[arg(long)]
    pub no_validate: bool,

    /// Minimum support as a fraction of transactions, in (0, 1]
    #[arg(short = 's', long, default_value = "0.2")]
    pub min_support: f64,

    /// Minimum rule confidence, in (0, 1]
    #[arg(short = 'c', long, default_value = "0.5")]
    pub min_confidence: f64,

    /// Mining algorithm
    #[arg(short, long, value_enum, default_value = "both")]
    pub algorithm: AlgorithmChoice,

    /// Number of rules and itemsets to print
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,

    /// Show products bought together with this item
    #[arg(short, long)]
    pub recommend: Option<String>,

    /// Output path for the rule confidence chart (PNG)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export itemsets and rules as JSON to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate both thresholds before any mining happens
    pub fn thresholds(&self) -> crate::Result<(MinSupport, MinConfidence)> {
        let min_support = MinSupport::new(self.min_support)?;
        let min_confidence = MinConfidence::new(self.min_confidence)?;
        Ok((min_support, min_confidence))
    }

    /// Algorithms to run, in report order
    pub fn algorithms(&self) -> Vec<Algorithm> {
        match self.algorithm {
            AlgorithmChoice::Apriori => vec![Algorithm::Apriori],
            AlgorithmChoice::Eclat => vec![Algorithm::Eclat],
            AlgorithmChoice::Both => Algorithm::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_args() -> Args {
        Args {
            input: "test.csv".to_string(),
            products: None,
            no_validate: false,
            min_support: 0.2,
            min_confidence: 0.5,
            algorithm: AlgorithmChoice::Both,
            top: 10,
            recommend: None,
            output: None,
            json: None,
            verbose: false,
        }
    }

    #[test]
    fn test_thresholds() {
        let mut args = create_test_args();
        let (min_support, min_confidence) = args.thresholds().unwrap();
        assert_eq!(min_support.value(), 0.2);
        assert_eq!(min_confidence.value(), 0.5);

        args.min_support = 0.0;
        assert!(args.thresholds().is_err());

        args.min_support = 0.2;
        args.min_confidence = 1.5;
        assert!(args.thresholds().is_err());
    }

    #[test]
    fn test_algorithms() {
        let mut args = create_test_args();
        assert_eq!(args.algorithms(), vec![Algorithm::Apriori, Algorithm::Eclat]);

        args.algorithm = AlgorithmChoice::Eclat;
        assert_eq!(args.algorithms(), vec![Algorithm::Eclat]);
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::parse_from([
            "basketforge",
            "--input",
            "baskets.csv",
            "-s",
            "0.05",
            "--algorithm",
            "apriori",
            "--recommend",
            "milk",
        ]);
        assert_eq!(args.input, "baskets.csv");
        assert_eq!(args.min_support, 0.05);
        assert_eq!(args.min_confidence, 0.5);
        assert_eq!(args.algorithm, AlgorithmChoice::Apriori);
        assert_eq!(args.recommend.as_deref(), Some("milk"));
    }
}
