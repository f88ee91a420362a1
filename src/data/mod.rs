/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Record>, column names
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  finite x / y only → Vec<Point>
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
