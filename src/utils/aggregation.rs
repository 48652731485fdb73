use std::collections::HashMap;
use std::hash::Hash;

/// Sum `entries` into the given ordered `buckets`.
///
/// The result has one value per bucket; entries whose key is not a bucket are
/// dropped.
pub fn bucket_sums<K, I>(buckets: &[K], entries: I) -> Vec<f64>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, f64)>,
{
    let index: HashMap<&K, usize> = buckets.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let mut sums = vec![0.0; buckets.len()];

    for (key, value) in entries {
        if let Some(&i) = index.get(&key) {
            sums[i] += value;
        }
    }

    sums
}

/// Running total of `values`.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}
