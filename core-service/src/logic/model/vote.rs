//! Vote tallying helpers shared by the voting strategies and the dataset
//! fallback. All of them break ties by first-encountered order.

use std::collections::HashMap;
use std::hash::Hash;

/// Index of the largest value; the first one wins on ties, NaN never wins.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, current)| v > current) {
            best = Some((i, v));
        }
    }

    best.map(|(i, _)| i)
}

/// Most common item and its count.
///
/// Counts are kept in first-seen order and the scan keeps the first item
/// that reaches the maximum.
pub fn majority<T, I>(items: I) -> Option<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut slots: HashMap<T, usize> = HashMap::new();
    let mut tally: Vec<(T, usize)> = Vec::new();

    for item in items {
        match slots.get(&item) {
            Some(&slot) => tally[slot].1 += 1,
            None => {
                slots.insert(item.clone(), tally.len());
                tally.push((item, 1));
            }
        }
    }

    let mut winner: Option<(T, usize)> = None;
    for (item, count) in tally {
        if winner.as_ref().map_or(true, |(_, best)| count > *best) {
            winner = Some((item, count));
        }
    }
    winner
}
