//! Common contract for the frequent itemset miners

use crate::apriori::Apriori;
use crate::corpus::Corpus;
use crate::eclat::Eclat;
use crate::rules::{derive_rules, RuleSet};
use crate::support::SupportTable;
use crate::threshold::{MinConfidence, MinSupport};
use std::fmt;
use std::time::{Duration, Instant};

/// A frequent itemset algorithm over a cleaned corpus.
///
/// Every implementation must return the same table for the same inputs.
pub trait ItemsetMiner {
    fn name(&self) -> &'static str;

    fn mine(&self, corpus: &Corpus, min_support: MinSupport) -> SupportTable;
}

/// Available mining algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Apriori,
    Eclat,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Apriori, Algorithm::Eclat];

    pub fn miner(self) -> &'static dyn ItemsetMiner {
        match self {
            Algorithm::Apriori => &Apriori,
            Algorithm::Eclat => &Eclat,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.miner().name())
    }
}

/// Output of one timed mining + rule generation pass
#[derive(Debug, Clone)]
pub struct MinerRun {
    pub algorithm: Algorithm,
    pub table: SupportTable,
    pub rules: RuleSet,
    /// Wall time for mining and rule generation together
    pub elapsed: Duration,
}

/// Mine `corpus` with `algorithm` and derive its rules, timing both steps
pub fn run_miner(
    algorithm: Algorithm,
    corpus: &Corpus,
    min_support: MinSupport,
    min_confidence: MinConfidence,
) -> MinerRun {
    let start_time = Instant::now();
    let table = algorithm.miner().mine(corpus, min_support);
    let rules = derive_rules(&table, min_confidence);
    let elapsed = start_time.elapsed();

    MinerRun {
        algorithm,
        table,
        rules,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::SUPPORT_TOLERANCE;

    #[test]
    fn test_run_each_algorithm() {
        let corpus = Corpus::new(vec![
            vec!["milk", "bread"],
            vec!["milk", "bread", "eggs"],
            vec!["bread", "eggs"],
            vec!["milk", "eggs"],
        ]);
        let min_support = MinSupport::new(0.5).unwrap();
        let min_confidence = MinConfidence::new(0.6).unwrap();

        let runs: Vec<MinerRun> = Algorithm::ALL
            .iter()
            .map(|&algorithm| run_miner(algorithm, &corpus, min_support, min_confidence))
            .collect();

        assert_eq!(runs[0].algorithm.to_string(), "Apriori");
        assert_eq!(runs[1].algorithm.to_string(), "Eclat");
        assert!(runs[0].table.agrees_with(&runs[1].table, SUPPORT_TOLERANCE));
        assert_eq!(runs[0].rules.len(), 6);
        assert_eq!(runs[0].rules, runs[1].rules);
    }
}
