use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// LabelMapping – raw target string → class label
// ---------------------------------------------------------------------------

/// Assigns small integer labels to raw target strings in first-seen order.
///
/// The first distinct string gets `0`, the next new one `1`, and so on, so the
/// mapping is always a bijection onto `0..len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMapping {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelMapping {
    /// Look up `raw`, assigning the next free label if it has not been seen.
    pub fn assign(&mut self, raw: &str) -> usize {
        if let Some(&label) = self.index.get(raw) {
            return label;
        }
        let label = self.classes.len();
        self.classes.push(raw.to_string());
        self.index.insert(raw.to_string(), label);
        label
    }

    pub fn label_of(&self, raw: &str) -> Option<usize> {
        self.index.get(raw).copied()
    }

    pub fn class_name(&self, label: usize) -> Option<&str> {
        self.classes.get(label).map(String::as_str)
    }

    /// Class names indexed by label.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the loaded table
// ---------------------------------------------------------------------------

/// A fully parsed table: numeric features, encoded target and header names.
///
/// Only the loader produces a loaded dataset; `Dataset::default()` is the
/// reset state and splits of it are empty. Fields are read-only so that
/// `features` and `labels` stay parallel.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Normalized header names, one per header column.
    headers: Vec<String>,
    /// Index of the column whose values became labels.
    target_column: usize,
    /// Feature rows (X), target column excluded.
    features: Vec<Vec<f64>>,
    /// Class labels (y), parallel to `features`.
    labels: Vec<usize>,
    /// Raw target string ↔ label.
    mapping: LabelMapping,
    loaded: bool,
}

impl Dataset {
    /// Assemble a dataset that passed every load-time check.
    pub(super) fn loaded(
        headers: Vec<String>,
        target_column: usize,
        features: Vec<Vec<f64>>,
        labels: Vec<usize>,
        mapping: LabelMapping,
    ) -> Self {
        debug_assert_eq!(features.len(), labels.len());
        debug_assert!(!features.is_empty());
        Dataset {
            headers,
            target_column,
            features,
            labels,
            mapping,
            loaded: true,
        }
    }

    /// True for a successful load whose rows are non-empty and parallel.
    pub fn is_loaded(&self) -> bool {
        self.loaded && !self.features.is_empty() && self.features.len() == self.labels.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn target_column(&self) -> usize {
        self.target_column
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn mapping(&self) -> &LabelMapping {
        &self.mapping
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Width of the first feature row (rows may be ragged on irregular input).
    pub fn num_features(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    pub fn target_name(&self) -> Option<&str> {
        self.headers.get(self.target_column).map(String::as_str)
    }

    /// Build the per-class summary shown after loading.
    pub fn summary(&self) -> DatasetSummary {
        let mut counts = vec![0usize; self.mapping.len()];
        for &label in &self.labels {
            if let Some(c) = counts.get_mut(label) {
                *c += 1;
            }
        }
        let classes = self
            .mapping
            .classes()
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(label, (name, count))| ClassCount {
                name: name.clone(),
                label,
                count,
            })
            .collect();

        DatasetSummary {
            samples: self.len(),
            features: self.num_features(),
            headers: self.headers.clone(),
            target: self.target_name().unwrap_or_default().to_string(),
            classes,
        }
    }
}

// ---------------------------------------------------------------------------
// Subset / Split – result of the train/test partition
// ---------------------------------------------------------------------------

/// Rows taken from a dataset; `features[i]` belongs with `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Subset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
}

impl Subset {
    pub fn with_capacity(n: usize) -> Self {
        Subset {
            features: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, features: Vec<f64>, label: usize) {
        self.features.push(features);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Split {
    pub train: Subset,
    pub test: Subset,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCount {
    pub name: String,
    pub label: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub samples: usize,
    pub features: usize,
    pub headers: Vec<String>,
    pub target: String,
    pub classes: Vec<ClassCount>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Loaded {} samples with {} features.",
            self.samples, self.features
        )?;
        writeln!(f, "Target: {} ({} classes)", self.target, self.classes.len())?;
        for class in &self.classes {
            writeln!(f, "  [{}] {}: {}", class.label, class.name, class.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_assigns_in_first_seen_order() {
        let mut mapping = LabelMapping::default();
        assert_eq!(mapping.assign("dog"), 0);
        assert_eq!(mapping.assign("cat"), 1);
        assert_eq!(mapping.assign("dog"), 0);
        assert_eq!(mapping.assign("bird"), 2);

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.classes(), ["dog", "cat", "bird"]);
        assert_eq!(mapping.label_of("cat"), Some(1));
        assert_eq!(mapping.label_of("fish"), None);
        assert_eq!(mapping.class_name(2), Some("bird"));
        assert_eq!(mapping.class_name(3), None);
    }

    #[test]
    fn default_dataset_is_not_loaded() {
        let ds = Dataset::default();
        assert!(!ds.is_loaded());
        assert!(ds.is_empty());
        assert_eq!(ds.num_features(), 0);
    }

    #[test]
    fn summary_counts_each_class() {
        let mut mapping = LabelMapping::default();
        let labels: Vec<usize> = ["a", "b", "a", "a"]
            .iter()
            .map(|s| mapping.assign(s))
            .collect();
        let ds = Dataset::loaded(
            vec!["x".into(), "y".into()],
            1,
            vec![vec![1.0]; 4],
            labels,
            mapping,
        );

        let summary = ds.summary();
        assert_eq!(summary.samples, 4);
        assert_eq!(summary.features, 1);
        assert_eq!(summary.target, "y");
        assert_eq!(summary.classes[0].count, 3);
        assert_eq!(summary.classes[1].count, 1);
        assert!(summary.to_string().starts_with("Loaded 4 samples with 1 features."));
    }

    #[test]
    fn misaligned_rows_are_not_loaded() {
        let mut ds = Dataset::loaded(
            vec!["x".into(), "y".into()],
            1,
            vec![vec![1.0], vec![2.0], vec![3.0]],
            vec![0, 1, 0],
            LabelMapping::default(),
        );
        assert!(ds.is_loaded());

        ds.labels.pop();
        assert!(!ds.is_loaded());
        assert_eq!(crate::data::split::split(&ds, 0.5), Split::default());
    }
}
