/// Data layer: core types, loading, splitting and scaling.
///
/// Architecture:
/// ```text
///   header + rows (comma-delimited text)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  normalize headers, partition rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  headers, X, y, label mapping
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split    │  shuffled indices → Split { train, test }
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ standardize │  optional z-score fitted on train
///   └─────────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod split;
pub mod standardize;
