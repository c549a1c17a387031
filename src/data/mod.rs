/// Data layer: gradient types, loading, and matching.
///
/// Architecture:
/// ```text
///  grad / .b / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GradientTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ GradientTable │  Vec<GradientRecord>, split into halves
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ matcher   │  grads_match on each (i, i + half) pair
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod matcher;
