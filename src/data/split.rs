use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::model::{Dataset, Split, Subset};

/// Number of training rows for `n` samples: `floor(n * fraction)` clamped to `0..=n`.
///
/// NaN and negative fractions give `0`; anything above `1.0` gives `n`.
pub fn train_size(n: usize, fraction: f64) -> usize {
    let raw = (n as f64 * fraction).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= n as f64 {
        n
    } else {
        raw as usize
    }
}

/// Random train/test partition using the thread-local RNG.
///
/// Every call draws a fresh permutation, so results differ between runs.
/// Use [`split_seeded`] for a reproducible split.
pub fn split(dataset: &Dataset, train_fraction: f64) -> Split {
    split_with_rng(dataset, train_fraction, &mut rand::thread_rng())
}

/// Reproducible train/test partition: the same seed always yields the same split.
pub fn split_seeded(dataset: &Dataset, train_fraction: f64, seed: u64) -> Split {
    split_with_rng(dataset, train_fraction, &mut StdRng::seed_from_u64(seed))
}

/// Shuffle row indices with `rng` and deal the first `train_size` rows to
/// `train`, the rest to `test`. An unloaded dataset gives an empty split.
pub fn split_with_rng<R>(dataset: &Dataset, train_fraction: f64, rng: &mut R) -> Split
where
    R: Rng + ?Sized,
{
    if !dataset.is_loaded() {
        debug!("Split requested before a dataset was loaded");
        return Split::default();
    }

    let n = dataset.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let n_train = train_size(n, train_fraction);
    let mut train = Subset::with_capacity(n_train);
    let mut test = Subset::with_capacity(n - n_train);

    for (pos, &row) in indices.iter().enumerate() {
        let target = if pos < n_train { &mut train } else { &mut test };
        target.push(dataset.features()[row].clone(), dataset.labels()[row]);
    }

    debug!(
        "Dataset split: {} train, {} test (fraction {train_fraction})",
        train.len(),
        test.len()
    );
    Split { train, test }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load, LoadOptions};
    use crate::selector::FixedColumn;

    /// Rows whose single feature is the row number, so they can be
    /// identified after shuffling.
    fn numbered(rows: usize) -> Dataset {
        let mut text = String::from("id,class\n");
        for i in 0..rows {
            text.push_str(&format!("{i},c{}\n", i % 3));
        }
        load(text.as_bytes(), &mut FixedColumn(1), &LoadOptions::default()).unwrap()
    }

    fn row_ids(subset: &Subset) -> Vec<usize> {
        subset.features.iter().map(|r| r[0] as usize).collect()
    }

    #[test]
    fn train_size_clamps() {
        assert_eq!(train_size(10, 0.8), 8);
        assert_eq!(train_size(10, 0.0), 0);
        assert_eq!(train_size(10, 1.0), 10);
        assert_eq!(train_size(10, 1.5), 10);
        assert_eq!(train_size(10, -0.5), 0);
        assert_eq!(train_size(10, f64::NAN), 0);
        assert_eq!(train_size(10, f64::INFINITY), 10);
        assert_eq!(train_size(7, 0.5), 3);
        assert_eq!(train_size(0, 0.8), 0);
    }

    #[test]
    fn partitions_every_row_exactly_once() {
        let ds = numbered(10);
        for _ in 0..20 {
            let s = split(&ds, 0.8);
            assert_eq!(s.train.len(), 8);
            assert_eq!(s.test.len(), 2);

            let mut ids = row_ids(&s.train);
            ids.extend(row_ids(&s.test));
            ids.sort_unstable();
            assert_eq!(ids, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn rows_keep_their_labels() {
        let ds = numbered(30);
        let s = split(&ds, 0.6);
        for subset in [&s.train, &s.test] {
            for (row, &label) in subset.features.iter().zip(&subset.labels) {
                let id = row[0] as usize;
                assert_eq!(label, ds.labels()[id]);
            }
        }
    }

    #[test]
    fn oversized_fraction_puts_everything_in_train() {
        let ds = numbered(10);
        let s = split(&ds, 1.5);
        assert_eq!(s.train.len(), 10);
        assert!(s.test.is_empty());
    }

    #[test]
    fn nan_fraction_puts_everything_in_test() {
        let ds = numbered(5);
        let s = split(&ds, f64::NAN);
        assert!(s.train.is_empty());
        assert_eq!(s.test.len(), 5);
    }

    #[test]
    fn same_seed_same_split() {
        let ds = numbered(50);
        let a = split_seeded(&ds, 0.8, 42);
        let b = split_seeded(&ds, 0.8, 42);
        assert_eq!(a, b);

        let c = split_seeded(&ds, 0.8, 7);
        assert_eq!(c.train.len(), a.train.len());
    }

    #[test]
    fn unloaded_dataset_is_a_no_op() {
        let s = split(&Dataset::default(), 0.8);
        assert_eq!(s, Split::default());
    }
}
