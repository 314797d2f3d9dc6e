//! Data layer: the datastream container and the numeric and tabular layers it
//! delegates to.
//!
//! Architecture:
//! ```text
//!   Array2<f64> + rate + sensor
//!        │
//!        ▼
//!   ┌────────────┐   unit / columns   ┌──────────┐
//!   │ Datastream │ ─────────────────▶ │ sensors  │  sensor → unit, legend
//!   └────────────┘                    └──────────┘
//!        │
//!        ├── cut ─────────▶ slice    (start / stop / step rows)
//!        ├── downsample ──▶ filter   (decimate: Chebyshev I + filtfilt)
//!        ├── filter_butterworth ▶ filter (butter + filtfilt, padlen 150)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export  │  Arrow table → CSV / Parquet / pretty text
//!   └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod model;
pub mod sensors;
pub mod slice;
