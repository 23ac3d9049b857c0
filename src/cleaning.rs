//! Transaction cleaning ahead of mining
//!
//! Produces the invariants the miners rely on: canonical tokens, no
//! duplicate items inside a transaction, and at least two items per
//! transaction.

use serde::Serialize;
use std::collections::HashSet;

/// What cleaning removed, for display next to the mining results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreprocessReport {
    pub total_transactions_before: usize,
    pub empty_transactions: usize,
    /// Transactions left with zero or one item after filtering
    pub single_item_transactions: usize,
    pub duplicate_item_instances: usize,
    pub invalid_item_instances: usize,
    pub total_transactions_after: usize,
    pub total_items_after: usize,
    pub unique_products_after: usize,
}

/// Trim, collapse inner whitespace and lowercase a raw token
pub fn standardize_item(item: &str) -> String {
    item.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Clean raw transactions
///
/// # Arguments
/// * `transactions` - Raw transactions as read from the source
/// * `valid_products` - Optional catalog of canonical tokens; items outside it are dropped
///
/// # Returns
/// * Cleaned transactions (each with at least two distinct items) and a report
pub fn clean_transactions<S: AsRef<str>>(
    transactions: &[Vec<S>],
    valid_products: Option<&HashSet<String>>,
) -> (Vec<Vec<String>>, PreprocessReport) {
    let mut report = PreprocessReport {
        total_transactions_before: transactions.len(),
        ..PreprocessReport::default()
    };
    let mut cleaned = Vec::new();

    for transaction in transactions {
        let items: Vec<String> = transaction
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|raw| !raw.trim().is_empty())
            .map(standardize_item)
            .collect();
        if items.is_empty() {
            report.empty_transactions += 1;
            continue;
        }

        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.clone()) {
                unique.push(item);
            } else {
                report.duplicate_item_instances += 1;
            }
        }

        if let Some(catalog) = valid_products {
            let before = unique.len();
            unique.retain(|item| catalog.contains(item));
            report.invalid_item_instances += before - unique.len();
        }

        if unique.len() <= 1 {
            report.single_item_transactions += 1;
            continue;
        }
        cleaned.push(unique);
    }

    report.total_transactions_after = cleaned.len();
    report.total_items_after = cleaned.iter().map(Vec::len).sum();
    report.unique_products_after = cleaned
        .iter()
        .flatten()
        .collect::<HashSet<_>>()
        .len();

    (cleaned, report)
}
