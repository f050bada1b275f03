//! Key-by-key prop comparison.

use super::Props;

/// True when both bags hold the same keys and every value is
/// [`same`](super::PropValue::same).
pub fn shallow_equal(a: &Props, b: &Props) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| value.same(other)))
}

/// Keys that were added, removed or changed between `prev` and `next`,
/// in key order.
pub fn changed_keys(prev: &Props, next: &Props) -> Vec<String> {
    let mut changed: Vec<String> = prev
        .iter()
        .filter(|(key, value)| !next.get(key).is_some_and(|other| value.same(other)))
        .map(|(key, _)| key.to_string())
        .collect();
    changed.extend(
        next.keys()
            .filter(|key| !prev.contains_key(key))
            .map(str::to_string),
    );
    changed.sort();
    changed
}
