//! Breadth-first, level-wise frequent itemset mining

use crate::corpus::{support_ratio, Corpus};
use crate::error::MiningError;
use crate::itemset::Itemset;
use crate::miner::ItemsetMiner;
use crate::support::SupportTable;
use crate::threshold::MinSupport;
use std::collections::{BTreeSet, HashSet};
use std::time::Instant;
use tracing::{debug, info};

/// Apriori miner: self-join the frequent level, prune by downward closure,
/// then count the survivors against the corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct Apriori;

impl ItemsetMiner for Apriori {
    fn name(&self) -> &'static str {
        "Apriori"
    }

    fn mine(&self, corpus: &Corpus, min_support: MinSupport) -> SupportTable {
        let start_time = Instant::now();
        let mut table = SupportTable::new();
        if corpus.is_empty() {
            return table;
        }

        let n = corpus.len();
        let min_count = min_support.min_count(n);

        // Seed level from per-item counts
        let mut level: Vec<Itemset> = Vec::new();
        for (item, count) in corpus.item_counts() {
            if count >= min_count {
                let itemset = Itemset::single(item);
                table.insert(itemset.clone(), support_ratio(count, n));
                level.push(itemset);
            }
        }

        let mut k = 1;
        while !level.is_empty() {
            let candidates = generate_candidates(&level, k);
            debug!(
                k,
                frequent = level.len(),
                candidates = candidates.len(),
                "apriori level"
            );

            let mut next_level = Vec::new();
            for candidate in candidates {
                let count = corpus.support_count(&candidate);
                if count >= min_count {
                    table.insert(candidate.clone(), support_ratio(count, n));
                    next_level.push(candidate);
                }
            }

            level = next_level;
            k += 1;
        }

        info!(
            itemsets = table.len(),
            levels = k - 1,
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            "apriori finished"
        );
        table
    }
}

/// Mine frequent itemsets level by level
///
/// # Arguments
/// * `corpus` - Cleaned transactions
/// * `min_support` - Minimum support fraction in `(0, 1]`
///
/// # Returns
/// * Every frequent itemset with its support, or an error for an invalid threshold
pub fn mine_apriori(corpus: &Corpus, min_support: f64) -> Result<SupportTable, MiningError> {
    let min_support = MinSupport::new(min_support)?;
    Ok(Apriori.mine(corpus, min_support))
}

/// Size-(k+1) candidates from pairs of level-k itemsets differing in one item,
/// keeping only those whose every k-subset is frequent.
fn generate_candidates(level: &[Itemset], k: usize) -> BTreeSet<Itemset> {
    let frequent: HashSet<&Itemset> = level.iter().collect();
    let mut candidates = BTreeSet::new();

    for (i, left) in level.iter().enumerate() {
        for right in &level[i + 1..] {
            let union = left.union(right);
            if union.len() != k + 1 || candidates.contains(&union) {
                continue;
            }
            if has_frequent_subsets(&union, &frequent) {
                candidates.insert(union);
            }
        }
    }

    candidates
}

fn has_frequent_subsets(candidate: &Itemset, frequent: &HashSet<&Itemset>) -> bool {
    (0..candidate.len()).all(|index| frequent.contains(&candidate.without(index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_corpus() -> Corpus {
        Corpus::new(vec![
            vec!["milk", "bread"],
            vec!["milk", "bread", "eggs"],
            vec!["bread", "eggs"],
            vec!["milk", "eggs"],
        ])
    }

    #[test]
    fn test_mine_apriori_scenario() {
        let table = mine_apriori(&create_test_corpus(), 0.5).unwrap();

        assert_eq!(table.len(), 6);
        for item in ["milk", "bread", "eggs"] {
            assert_eq!(table.get(&Itemset::new([item])), Some(0.75));
        }
        for pair in [["milk", "bread"], ["milk", "eggs"], ["bread", "eggs"]] {
            assert_eq!(table.get(&Itemset::new(pair)), Some(0.5));
        }
        assert!(!table.contains(&Itemset::new(["milk", "bread", "eggs"])));
    }

    #[test]
    fn test_candidates_are_pruned_by_closure() {
        let level = vec![
            Itemset::new(["a", "b"]),
            Itemset::new(["a", "c"]),
            Itemset::new(["b", "d"]),
        ];
        let candidates = generate_candidates(&level, 2);
        // {a,b,c} lacks {b,c}; {a,b,d} lacks {a,d}
        assert!(candidates.is_empty());

        let level = vec![
            Itemset::new(["a", "b"]),
            Itemset::new(["a", "c"]),
            Itemset::new(["b", "c"]),
        ];
        let candidates = generate_candidates(&level, 2);
        assert_eq!(candidates.len(), 1);
        assert!(candidates.contains(&Itemset::new(["a", "b", "c"])));
    }

    #[test]
    fn test_empty_corpus_yields_empty_table() {
        let corpus = Corpus::new(Vec::<Vec<&str>>::new());
        let table = mine_apriori(&corpus, 0.3).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_support_is_rejected() {
        let corpus = create_test_corpus();
        assert!(mine_apriori(&corpus, 0.0).is_err());
        assert!(mine_apriori(&corpus, 1.2).is_err());
    }

    #[test]
    fn test_full_support_with_no_common_item() {
        let table = mine_apriori(&create_test_corpus(), 1.0).unwrap();
        assert!(table.is_empty());
    }
}
