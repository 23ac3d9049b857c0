//! Depth-first frequent itemset mining over a vertical index

use crate::corpus::{support_ratio, Corpus};
use crate::error::MiningError;
use crate::itemset::{Item, Itemset};
use crate::miner::ItemsetMiner;
use crate::support::SupportTable;
use crate::threshold::MinSupport;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

/// Sorted, duplicate-free transaction ids
pub type TidSet = Vec<usize>;

/// Item -> ids of the transactions containing it, in canonical item order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerticalIndex {
    tids: BTreeMap<Item, TidSet>,
}

impl VerticalIndex {
    /// Build the index in one pass over all item occurrences.
    pub fn build(corpus: &Corpus) -> Self {
        let mut tids: BTreeMap<Item, TidSet> = BTreeMap::new();
        for (tid, transaction) in corpus.transactions().iter().enumerate() {
            for item in transaction {
                tids.entry(item.clone()).or_default().push(tid);
            }
        }
        Self { tids }
    }

    pub fn tids(&self, item: &str) -> Option<&[usize]> {
        self.tids.get(item).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.tids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Item, &TidSet)> {
        self.tids.iter()
    }
}

/// Eclat miner: extend a prefix with lexicographically later items,
/// deriving each support from a tid-set intersection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eclat;

/// An extension candidate and the tids of `prefix ∪ {item}`
type Extension = (Item, TidSet);

impl ItemsetMiner for Eclat {
    fn name(&self) -> &'static str {
        "Eclat"
    }

    fn mine(&self, corpus: &Corpus, min_support: MinSupport) -> SupportTable {
        let start_time = Instant::now();
        let mut table = SupportTable::new();
        if corpus.is_empty() {
            return table;
        }

        let n = corpus.len();
        let min_count = min_support.min_count(n);
        let index = VerticalIndex::build(corpus);

        let roots: Vec<Extension> = index
            .tids
            .into_iter()
            .filter(|(_, tids)| tids.len() >= min_count)
            .collect();
        debug!(
            items = corpus.distinct_items(),
            frequent_items = roots.len(),
            min_count,
            "eclat vertical index built"
        );

        let mut search = Search {
            min_count,
            n,
            table: &mut table,
        };
        let found = search.extend(&Itemset::new(Vec::<Item>::new()), &roots);
        debug_assert_eq!(found, table.len());

        info!(
            itemsets = table.len(),
            elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
            "eclat finished"
        );
        table
    }
}

/// Mine frequent itemsets depth-first with tid-set intersections
///
/// # Arguments
/// * `corpus` - Cleaned transactions
/// * `min_support` - Minimum support fraction in `(0, 1]`
///
/// # Returns
/// * Every frequent itemset with its support, or an error for an invalid threshold
pub fn mine_eclat(corpus: &Corpus, min_support: f64) -> Result<SupportTable, MiningError> {
    let min_support = MinSupport::new(min_support)?;
    Ok(Eclat.mine(corpus, min_support))
}

struct Search<'a> {
    min_count: usize,
    n: usize,
    table: &'a mut SupportTable,
}

impl Search<'_> {
    /// Record every frequent extension of `prefix`; returns how many were found.
    ///
    /// Every entry of `candidates` already meets the threshold.
    fn extend(&mut self, prefix: &Itemset, candidates: &[Extension]) -> usize {
        let mut found = 0;
        for (i, (item, tids)) in candidates.iter().enumerate() {
            let itemset = prefix.extended(item.clone());

            let suffix: Vec<Extension> = candidates[i + 1..]
                .iter()
                .filter_map(|(later, later_tids)| {
                    let shared = intersect(tids, later_tids);
                    (shared.len() >= self.min_count).then(|| (later.clone(), shared))
                })
                .collect();

            self.table
                .insert(itemset.clone(), support_ratio(tids.len(), self.n));

            let mut branch = 1;
            if !suffix.is_empty() {
                branch += self.extend(&itemset, &suffix);
            }
            if prefix.is_empty() {
                debug!(root = %item, itemsets = branch, "eclat branch");
            }
            found += branch;
        }
        found
    }
}

/// Intersection of two sorted tid-sets
fn intersect(left: &[usize], right: &[usize]) -> TidSet {
    let mut shared = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
    shared
}
