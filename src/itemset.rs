//! Item and itemset value types
//!
//! An [`Itemset`] keeps its items sorted and deduplicated, so structural
//! equality and hashing do not depend on the order items were discovered in.

use serde::Serialize;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A canonical item token, cheap to clone
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Item(Arc<str>);

impl Item {
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(Arc::from(token.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Item {
    fn from(token: String) -> Self {
        Self(Arc::from(token))
    }
}

impl From<&String> for Item {
    fn from(token: &String) -> Self {
        Self::new(token)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable set of distinct items, stored sorted
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Itemset(Box<[Item]>);

impl Itemset {
    /// Build an itemset from any items; order and duplicates are irrelevant.
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        let mut items: Vec<Item> = items.into_iter().map(Into::into).collect();
        items.sort_unstable();
        items.dedup();
        Self(items.into_boxed_slice())
    }

    pub fn single(item: Item) -> Self {
        Self(vec![item].into_boxed_slice())
    }

    fn from_sorted(items: Vec<Item>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self(items.into_boxed_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.0.iter()
    }

    /// Last item in canonical order
    pub fn last(&self) -> Option<&Item> {
        self.0.last()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.binary_search_by(|probe| probe.as_str().cmp(item)).is_ok()
    }

    /// Subset test by a single merge walk over both sorted slices
    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut theirs = other.iter();
        'outer: for mine in self.iter() {
            for candidate in theirs.by_ref() {
                match candidate.cmp(mine) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);
        while i < self.len() && j < other.len() {
            match self.0[i].cmp(&other.0[j]) {
                Ordering::Less => {
                    merged.push(self.0[i].clone());
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(other.0[j].clone());
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(self.0[i].clone());
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.0[i..]);
        merged.extend_from_slice(&other.0[j..]);
        Self::from_sorted(merged)
    }

    /// Copy of this itemset with the item at `index` removed
    pub fn without(&self, index: usize) -> Itemset {
        let mut items = self.0.to_vec();
        items.remove(index);
        Self::from_sorted(items)
    }

    /// Append an item that sorts after every current member.
    pub fn extended(&self, item: Item) -> Itemset {
        debug_assert!(self.last().map_or(true, |last| *last < item));
        let mut items = Vec::with_capacity(self.len() + 1);
        items.extend_from_slice(&self.0);
        items.push(item);
        Self::from_sorted(items)
    }

    /// Every split into a non-empty proper subset and its complement.
    ///
    /// Yields `2^len - 2` pairs, so callers only use it on frequent itemsets.
    pub fn splits(&self) -> impl Iterator<Item = (Itemset, Itemset)> + '_ {
        assert!(self.len() < 64, "itemset too large to enumerate splits");
        let full: u64 = (1u64 << self.len()) - 1;
        (1..full).map(move |mask| {
            let mut taken = Vec::new();
            let mut rest = Vec::new();
            for (bit, item) in self.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    taken.push(item.clone());
                } else {
                    rest.push(item.clone());
                }
            }
            (Self::from_sorted(taken), Self::from_sorted(rest))
        })
    }

    /// Items joined by ", " in canonical order
    pub fn label(&self) -> String {
        self.iter()
            .map(Item::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a Itemset {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itemset_equality_ignores_order_and_duplicates() {
        let a = Itemset::new(["milk", "bread", "milk"]);
        let b = Itemset::new(["bread", "milk"]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.to_string(), "{bread, milk}");
    }

    #[test]
    fn test_subset_and_contains() {
        let small = Itemset::new(["bread", "eggs"]);
        let large = Itemset::new(["bread", "eggs", "milk"]);
        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert!(!Itemset::new(["butter"]).is_subset_of(&large));
        assert!(Itemset::new(Vec::<Item>::new()).is_subset_of(&large));
        assert!(large.contains("milk"));
        assert!(!large.contains("butter"));
    }

    #[test]
    fn test_union_and_without() {
        let a = Itemset::new(["a", "c"]);
        let b = Itemset::new(["b", "c"]);
        let union = a.union(&b);
        assert_eq!(union, Itemset::new(["a", "b", "c"]));
        assert_eq!(union.without(1), Itemset::new(["a", "c"]));
    }

    #[test]
    fn test_extended_appends_in_order() {
        let prefix = Itemset::new(["a", "b"]);
        let extended = prefix.extended(Item::new("d"));
        assert_eq!(extended.items().last().map(Item::as_str), Some("d"));
        assert_eq!(extended.len(), 3);
    }

    #[test]
    fn test_splits_cover_all_proper_subsets() {
        let itemset = Itemset::new(["a", "b", "c"]);
        let splits: Vec<_> = itemset.splits().collect();
        assert_eq!(splits.len(), 6);
        for (antecedent, consequent) in &splits {
            assert!(!antecedent.is_empty());
            assert!(!consequent.is_empty());
            assert_eq!(antecedent.union(consequent), itemset);
            assert!(antecedent.iter().all(|item| !consequent.contains(item.as_str())));
        }
    }
}
