//! Grouping and reduction helpers over in-memory record slices.
//!
//! Groups keep first-appearance order. Numeric reductions skip `NaN`, so a
//! record with a broken field never poisons its whole group.

use std::hash::Hash;

use indexmap::IndexMap;

/// Partitions `items` by `key`, preserving the order in which keys first appear.
pub fn group_by<'a, T, K, F>(items: &'a [T], key: F) -> IndexMap<K, Vec<&'a T>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Groups `items` by `key` and reduces every group with `reduce`.
pub fn rollup<'a, T, K, V, F, R>(items: &'a [T], key: F, reduce: R) -> IndexMap<K, V>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    R: Fn(&[&'a T]) -> V,
{
    group_by(items, key)
        .into_iter()
        .map(|(key, members)| {
            let reduced = reduce(&members);
            (key, reduced)
        })
        .collect()
}

/// Number of records per key.
pub fn count_by<T, K, F>(items: &[T], key: F) -> IndexMap<K, usize>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    rollup(items, key, |members: &[&T]| members.len())
}

pub fn sum<T>(items: &[&T], value: impl Fn(&T) -> f64) -> f64 {
    items
        .iter()
        .map(|item| value(item))
        .filter(|v| !v.is_nan())
        .sum()
}

/// Arithmetic mean over the non-`NaN` values; `None` when there are none.
pub fn mean<T>(items: &[&T], value: impl Fn(&T) -> f64) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0usize;
    for item in items {
        let v = value(item);
        if !v.is_nan() {
            total += v;
            count += 1;
        }
    }
    (count > 0).then(|| total / count as f64)
}

pub fn max<T>(items: &[&T], value: impl Fn(&T) -> f64) -> Option<f64> {
    items
        .iter()
        .map(|item| value(item))
        .filter(|v| !v.is_nan())
        .fold(None, |best, v| match best {
            Some(b) if b >= v => Some(b),
            _ => Some(v),
        })
}

/// Smallest and largest non-`NaN` value of a slice.
pub fn extent<T>(items: &[T], value: impl Fn(&T) -> f64) -> Option<(f64, f64)> {
    items
        .iter()
        .map(value)
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// The first record, in iteration order, whose value equals the group maximum.
pub fn max_by_first<'a, T>(items: &[&'a T], value: impl Fn(&T) -> f64) -> Option<&'a T> {
    let best = max(items, &value)?;
    items.iter().copied().find(|item| value(item) == best)
}
