//! Association rule generation and ranking

use crate::error::MiningError;
use crate::itemset::{Item, Itemset};
use crate::support::SupportTable;
use crate::threshold::MinConfidence;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Support substituted for an antecedent or consequent missing from the table.
///
/// Only reachable with hand-built tables that break downward closure; rules
/// that used it carry `missing_support = true`.
pub const MISSING_SUPPORT_FLOOR: f64 = 1e-12;

/// An association rule `antecedent -> consequent`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    /// Support of `antecedent ∪ consequent`
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    /// A support lookup fell back to [`MISSING_SUPPORT_FLOOR`]
    pub missing_support: bool,
}

impl Rule {
    /// The frequent itemset this rule splits
    pub fn itemset(&self) -> Itemset {
        self.antecedent.union(&self.consequent)
    }

    /// Ranking: confidence desc, support desc, then smaller and
    /// lexicographically earlier antecedents, then consequent order.
    pub fn rank(&self, other: &Rule) -> Ordering {
        other
            .confidence
            .total_cmp(&self.confidence)
            .then_with(|| other.support.total_cmp(&self.support))
            .then_with(|| self.antecedent.len().cmp(&other.antecedent.len()))
            .then_with(|| self.antecedent.cmp(&other.antecedent))
            .then_with(|| self.consequent.cmp(&other.consequent))
    }
}

/// A "customers who bought X also bought" entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Consequent items joined by ", "
    pub item: String,
    pub confidence: f64,
    pub support: f64,
    pub lift: f64,
}

/// Ranked rules plus how many support lookups had to be filled in
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
    missing_support_lookups: usize,
}

impl RuleSet {
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// The `n` strongest rules
    pub fn top(&self, n: usize) -> &[Rule] {
        &self.rules[..n.min(self.rules.len())]
    }

    /// Lookups that fell back to [`MISSING_SUPPORT_FLOOR`]; zero for miner output.
    pub fn missing_support_lookups(&self) -> usize {
        self.missing_support_lookups
    }

    pub fn single_antecedent(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.antecedent.len() == 1)
    }

    /// Single-antecedent rules grouped by antecedent item, strongest first
    pub fn recommendations(&self) -> BTreeMap<Item, Vec<Recommendation>> {
        let mut map: BTreeMap<Item, Vec<Recommendation>> = BTreeMap::new();
        for rule in self.single_antecedent() {
            let Some(item) = rule.antecedent.items().first() else {
                continue;
            };
            map.entry(item.clone()).or_default().push(Recommendation {
                item: rule.consequent.label(),
                confidence: rule.confidence,
                support: rule.support,
                lift: rule.lift,
            });
        }
        for recommendations in map.values_mut() {
            recommendations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        }
        map
    }

    /// Up to `limit` recommendations for one item
    pub fn recommend_for(&self, item: &str, limit: usize) -> Vec<Recommendation> {
        self.recommendations()
            .remove(item)
            .map(|mut recommendations| {
                recommendations.truncate(limit);
                recommendations
            })
            .unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Generate ranked association rules from a support table
///
/// # Arguments
/// * `table` - Frequent itemsets from either miner, or built by hand
/// * `min_confidence` - Minimum confidence in `(0, 1]`
///
/// # Returns
/// * Ranked rules, or an error for an invalid threshold
pub fn generate_rules(table: &SupportTable, min_confidence: f64) -> Result<RuleSet, MiningError> {
    let min_confidence = MinConfidence::new(min_confidence)?;
    Ok(derive_rules(table, min_confidence))
}

/// Rule generation with an already validated threshold
pub fn derive_rules(table: &SupportTable, min_confidence: MinConfidence) -> RuleSet {
    let mut rules = Vec::new();
    let mut missing_support_lookups = 0;

    for row in table.sorted() {
        if row.itemset.len() < 2 {
            continue;
        }
        for (antecedent, consequent) in row.itemset.splits() {
            let (antecedent_support, antecedent_missing) = lookup(table, &antecedent);
            let (consequent_support, consequent_missing) = lookup(table, &consequent);
            missing_support_lookups +=
                usize::from(antecedent_missing) + usize::from(consequent_missing);

            let confidence = row.support / antecedent_support;
            let lift = confidence / consequent_support;
            if confidence >= min_confidence.value() {
                rules.push(Rule {
                    antecedent,
                    consequent,
                    support: row.support,
                    confidence,
                    lift,
                    missing_support: antecedent_missing || consequent_missing,
                });
            }
        }
    }

    rules.sort_by(Rule::rank);

    if missing_support_lookups > 0 {
        warn!(
            missing_support_lookups,
            floor = MISSING_SUPPORT_FLOOR,
            "support table is not downward closed; some rule scores use a filled-in support"
        );
    }
    debug!(
        itemsets = table.len(),
        rules = rules.len(),
        min_confidence = min_confidence.value(),
        "rules generated"
    );

    RuleSet {
        rules,
        missing_support_lookups,
    }
}

fn lookup(table: &SupportTable, itemset: &Itemset) -> (f64, bool) {
    match table.get(itemset) {
        Some(support) if support > 0.0 => (support, false),
        _ => (MISSING_SUPPORT_FLOOR, true),
    }
}
