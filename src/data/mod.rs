//! Data layer: core types, loading, filtering, aggregation and export.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐     ┌──────────────┐
//!   │  loader   │ ◄── │ DatasetCache │  one load per path, shared Arc<Dataset>
//!   └──────────┘     └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Title>, year index
//!   └──────────┘
//!        │  FilterParams
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  conjunction of predicates → FilteredView (indices)
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌───────────┐  ┌──────────┐
//!   │ aggregate  │  │  export   │  Summary for charts / CSV bytes
//!   └───────────┘  └──────────┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
