/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  day.csv / hour.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<DailyRecord>, Vec<HourlyRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  keep rows inside the picked date range
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  group, sum, label, reshape → chart tables
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
