//! Run counting over a label sequence.
//!
//! A run is a maximal contiguous stretch of identical labels, so
//! `A A B B A` has three runs: `[A A]`, `[B B]` and `[A]`.

/// Counts maximal runs in `labels`. An empty sequence has zero runs.
pub fn count_runs<T: PartialEq>(labels: &[T]) -> usize {
    if labels.is_empty() {
        return 0;
    }
    1 + labels.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Lengths of each run in order; they sum to `labels.len()`.
pub fn run_lengths<T: PartialEq>(labels: &[T]) -> Vec<usize> {
    let mut lengths = Vec::new();
    let mut iter = labels.iter();
    let Some(mut previous) = iter.next() else {
        return lengths;
    };

    let mut current = 1;
    for label in iter {
        if label == previous {
            current += 1;
        } else {
            lengths.push(current);
            current = 1;
            previous = label;
        }
    }
    lengths.push(current);
    lengths
}
