use log::debug;
use serde::Serialize;

use super::model::Split;

/// Standard deviations below this are treated as a constant column.
const MIN_STD: f64 = 1e-10;

/// Per-column z-score scaling: `(x - mean) / std`.
///
/// Rows may have different lengths; each column's statistics use only the
/// rows that reach that column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standardizer {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl Standardizer {
    /// Compute means and population standard deviations. `None` for no rows.
    pub fn fit(rows: &[Vec<f64>]) -> Option<Self> {
        let width = rows.iter().map(Vec::len).max()?;

        let mut sums = vec![0.0; width];
        let mut counts = vec![0usize; width];
        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                sums[j] += v;
                counts[j] += 1;
            }
        }
        let means: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(&s, &c)| s / c as f64)
            .collect();

        let mut sq = vec![0.0; width];
        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                let d = v - means[j];
                sq[j] += d * d;
            }
        }
        let stds = sq
            .iter()
            .zip(&counts)
            .map(|(&s, &c)| {
                let std = (s / c as f64).sqrt();
                if std < MIN_STD { 1.0 } else { std }
            })
            .collect();

        Some(Standardizer { means, stds })
    }

    /// Scale `rows` in place. Values past the fitted width are left untouched.
    pub fn transform_in_place(&self, rows: &mut [Vec<f64>]) {
        for row in rows {
            for ((v, &mean), &std) in row.iter_mut().zip(&self.means).zip(&self.stds) {
                *v = (*v - mean) / std;
            }
        }
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let mut out = rows.to_vec();
        self.transform_in_place(&mut out);
        out
    }
}

impl Split {
    /// Fit on the training rows and scale both subsets with those statistics.
    ///
    /// Returns `None` (and leaves the split unchanged) when `train` is empty.
    pub fn standardize(&mut self) -> Option<Standardizer> {
        let scaler = Standardizer::fit(&self.train.features)?;
        scaler.transform_in_place(&mut self.train.features);
        scaler.transform_in_place(&mut self.test.features);
        debug!("Standardized {} feature columns", scaler.means.len());
        Some(scaler)
    }
}
