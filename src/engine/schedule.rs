use std::collections::HashMap;
use std::hash::Hash;

use super::types::PermutationEntry;

/// Split `items` into groups by `key`, keeping first-seen group order and
/// the original order inside each group. Groups hold original indices.
pub fn partition<T, K, F>(items: &[T], key: F) -> Vec<Vec<usize>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let slot = *slots.entry(key(item)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(i);
    }

    groups
}

/// Merge groups by taking one index from each group in turn, skipping
/// groups that ran out.
pub fn interleave(groups: &[Vec<usize>]) -> Vec<usize> {
    let total = groups.iter().map(Vec::len).sum();
    let longest = groups.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = Vec::with_capacity(total);
    for round in 0..longest {
        out.extend(groups.iter().filter_map(|g| g.get(round).copied()));
    }
    out
}

/// Compute the fair round-robin order of `items` across `key` as
/// permutation entries, sorted by destination.
pub fn schedule<T, K, F>(items: &[T], key: F) -> Vec<PermutationEntry>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let groups = partition(items, key);
    interleave(&groups)
        .into_iter()
        .enumerate()
        .map(|(d, o)| PermutationEntry::new(o, d))
        .collect()
}

/// Original indices listed in destination order.
///
/// Entries are expected to form a valid permutation.
pub fn desired_order(entries: &[PermutationEntry]) -> Vec<usize> {
    let mut order = vec![0; entries.len()];
    for e in entries {
        if let Some(slot) = order.get_mut(e.destination) {
            *slot = e.origin;
        }
    }
    order
}
