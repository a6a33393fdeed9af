//! Collection types used throughout the parser.

/// A set that uses FxHash for fast hashing, suitable for parser internals
/// where DoS resistance is not needed.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;

/// Collect the contents of a set into a sorted `Vec`.
///
/// Hash sets carry no meaningful order; callers that need a stable order
/// (tests, printers) go through this.
pub fn sorted<T: Ord + Clone>(set: &FxHashSet<T>) -> Vec<T> {
    let mut items: Vec<T> = set.iter().cloned().collect();
    items.sort();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_snapshot() {
        let mut set = FxHashSet::default();
        set.insert(3);
        set.insert(1);
        set.insert(2);
        set.insert(1);
        assert_eq!(sorted(&set), vec![1, 2, 3]);
    }
}
