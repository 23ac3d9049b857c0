//! Support table shared by both miners and the rule generator

use crate::itemset::Itemset;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Default tolerance when comparing supports produced by different miners
pub const SUPPORT_TOLERANCE: f64 = 1e-9;

/// Frequent itemsets with their supports.
///
/// Entries are write-once: inserting an itemset that is already present
/// leaves the recorded support untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportTable {
    entries: HashMap<Itemset, f64>,
}

/// One row of a support table, used for reporting and export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset {
    pub itemset: Itemset,
    pub support: f64,
}

impl SupportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frequent itemset. Returns false if it was already present.
    pub fn insert(&mut self, itemset: Itemset, support: f64) -> bool {
        match self.entries.entry(itemset) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(support);
                true
            }
        }
    }

    pub fn get(&self, itemset: &Itemset) -> Option<f64> {
        self.entries.get(itemset).copied()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.entries.contains_key(itemset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> {
        self.entries.iter().map(|(itemset, &support)| (itemset, support))
    }

    /// Rows ordered by itemset size, then canonical item order
    pub fn sorted(&self) -> Vec<FrequentItemset> {
        let mut rows: Vec<FrequentItemset> = self
            .iter()
            .map(|(itemset, support)| FrequentItemset {
                itemset: itemset.clone(),
                support,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.itemset
                .len()
                .cmp(&b.itemset.len())
                .then_with(|| a.itemset.cmp(&b.itemset))
        });
        rows
    }

    /// Rows ordered by descending support, ties in canonical order
    pub fn by_support(&self) -> Vec<FrequentItemset> {
        let mut rows = self.sorted();
        rows.sort_by(|a, b| b.support.total_cmp(&a.support));
        rows
    }

    /// Number of frequent itemsets per itemset size
    pub fn count_by_size(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for itemset in self.entries.keys() {
            *counts.entry(itemset.len()).or_insert(0) += 1;
        }
        counts
    }

    pub fn max_itemset_len(&self) -> usize {
        self.entries.keys().map(Itemset::len).max().unwrap_or(0)
    }

    /// Same keys, and supports equal within `tolerance`
    pub fn agrees_with(&self, other: &SupportTable, tolerance: f64) -> bool {
        self.len() == other.len()
            && self.iter().all(|(itemset, support)| {
                other
                    .get(itemset)
                    .is_some_and(|theirs| (theirs - support).abs() <= tolerance)
            })
    }
}

impl FromIterator<(Itemset, f64)> for SupportTable {
    fn from_iter<I: IntoIterator<Item = (Itemset, f64)>>(iter: I) -> Self {
        let mut table = SupportTable::new();
        for (itemset, support) in iter {
            table.insert(itemset, support);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_write_once() {
        let mut table = SupportTable::new();
        assert!(table.insert(Itemset::new(["milk"]), 0.75));
        assert!(!table.insert(Itemset::new(["milk"]), 0.1));
        assert_eq!(table.get(&Itemset::new(["milk"])), Some(0.75));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_sorted_orders_by_size_then_items() {
        let table: SupportTable = vec![
            (Itemset::new(["bread", "milk"]), 0.5),
            (Itemset::new(["milk"]), 0.75),
            (Itemset::new(["bread"]), 0.75),
        ]
        .into_iter()
        .collect();

        let labels: Vec<String> = table
            .sorted()
            .iter()
            .map(|row| row.itemset.to_string())
            .collect();
        assert_eq!(labels, vec!["{bread}", "{milk}", "{bread, milk}"]);

        let counts = table.count_by_size();
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(table.max_itemset_len(), 2);
        assert_eq!(table.by_support()[0].support, 0.75);
    }

    #[test]
    fn test_agrees_with_tolerance() {
        let a: SupportTable = vec![(Itemset::new(["milk"]), 0.75)].into_iter().collect();
        let b: SupportTable = vec![(Itemset::new(["milk"]), 0.75 + 1e-12)]
            .into_iter()
            .collect();
        let c: SupportTable = vec![(Itemset::new(["eggs"]), 0.75)].into_iter().collect();

        assert!(a.agrees_with(&b, SUPPORT_TOLERANCE));
        assert!(!a.agrees_with(&c, SUPPORT_TOLERANCE));
        assert!(!a.agrees_with(&SupportTable::new(), SUPPORT_TOLERANCE));
    }
}
