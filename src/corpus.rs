//! Transaction corpus and the support counter

use crate::itemset::{Item, Itemset};
use std::collections::{BTreeMap, HashSet};

/// Cleaned transactions, immutable for the duration of a mining run.
///
/// Transaction index is the transaction id used by the vertical index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    transactions: Vec<Itemset>,
}

impl Corpus {
    /// Build a corpus from already-cleaned transactions.
    ///
    /// Tokens are interned so equal items share one allocation.
    pub fn new<T, I, S>(transactions: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut interned: HashSet<Item> = HashSet::new();
        let transactions = transactions
            .into_iter()
            .map(|transaction| {
                Itemset::new(transaction.into_iter().map(|token| {
                    let token = token.as_ref();
                    match interned.get(token) {
                        Some(item) => item.clone(),
                        None => {
                            let item = Item::new(token);
                            interned.insert(item.clone());
                            item
                        }
                    }
                }))
            })
            .collect();

        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Itemset] {
        &self.transactions
    }

    /// Number of transactions that contain every item of `itemset`
    pub fn support_count(&self, itemset: &Itemset) -> usize {
        self.transactions
            .iter()
            .filter(|transaction| itemset.is_subset_of(transaction))
            .count()
    }

    /// Fraction of transactions that are supersets of `itemset`; 0 on an empty corpus
    pub fn support(&self, itemset: &Itemset) -> f64 {
        support_ratio(self.support_count(itemset), self.len())
    }

    /// Occurrence count of every distinct item, in canonical item order
    pub fn item_counts(&self) -> BTreeMap<Item, usize> {
        let mut counts = BTreeMap::new();
        for item in self.transactions.iter().flat_map(Itemset::iter) {
            *counts.entry(item.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn distinct_items(&self) -> usize {
        self.item_counts().len()
    }
}

/// `count / n` as the support value every miner stores
pub(crate) fn support_ratio(count: usize, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        count as f64 / n as f64
    }
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
    fn test_support_counts_supersets() {
        let corpus = create_test_corpus();
        assert_eq!(corpus.len(), 4);
        assert_eq!(corpus.support_count(&Itemset::new(["milk"])), 3);
        assert_eq!(corpus.support(&Itemset::new(["milk", "bread"])), 0.5);
        assert_eq!(corpus.support(&Itemset::new(["milk", "bread", "eggs"])), 0.25);
    }

    #[test]
    fn test_absent_itemset_has_zero_support() {
        let corpus = create_test_corpus();
        assert_eq!(corpus.support(&Itemset::new(["butter"])), 0.0);
    }

    #[test]
    fn test_empty_corpus_support_is_zero() {
        let corpus = Corpus::new(Vec::<Vec<String>>::new());
        assert!(corpus.is_empty());
        assert_eq!(corpus.support(&Itemset::new(["milk"])), 0.0);
    }

    #[test]
    fn test_item_counts_are_sorted() {
        let corpus = create_test_corpus();
        let counts: Vec<_> = corpus
            .item_counts()
            .into_iter()
            .map(|(item, count)| (item.as_str().to_string(), count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("bread".to_string(), 3),
                ("eggs".to_string(), 3),
                ("milk".to_string(), 3)
            ]
        );
        assert_eq!(corpus.distinct_items(), 3);
    }
}
