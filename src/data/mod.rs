/// Data layer: the session pipeline behind every page.
///
/// Architecture:
/// ```text
///   CSV bytes (upload)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse → Dataset (all-or-nothing)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ session   │  Empty | Loaded(Dataset), guarded access
///   └──────────┘
///      │      │
///      ▼      ▼
///  ┌────────┐ ┌───────┐
///  │summary │ │ chart │  describe / value counts → bar | pie
///  └────────┘ └───────┘
/// ```

pub mod chart;
pub mod loader;
pub mod model;
pub mod session;
pub mod summary;
pub mod value_counts;
