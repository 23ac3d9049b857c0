//! BasketForge: frequent itemset mining and association rules for market-basket data
//!
//! Two independent miners (breadth-first Apriori and depth-first Eclat)
//! produce the same [`SupportTable`] for a cleaned [`Corpus`]; the rule
//! generator turns either table into ranked association rules.

pub mod apriori;
pub mod cleaning;
pub mod cli;
pub mod corpus;
pub mod data;
pub mod eclat;
pub mod error;
pub mod itemset;
pub mod miner;
pub mod report;
pub mod rules;
pub mod support;
pub mod threshold;

// Re-export public items for easier access
pub use apriori::{mine_apriori, Apriori};
pub use cleaning::{clean_transactions, PreprocessReport};
pub use cli::Args;
pub use corpus::Corpus;
pub use data::{load_catalog, load_transactions, ProductCatalog};
pub use eclat::{mine_eclat, Eclat, VerticalIndex};
pub use error::MiningError;
pub use itemset::{Item, Itemset};
pub use miner::{run_miner, Algorithm, ItemsetMiner, MinerRun};
pub use rules::{generate_rules, Recommendation, Rule, RuleSet};
pub use support::SupportTable;
pub use threshold::{MinConfidence, MinSupport};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
