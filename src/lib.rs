//! Single-sensor time series: a sample matrix with its sampling rate, unit
//! and channel names, plus slicing, zero-phase filtering, decimation and
//! tabular export.
//!
//! ```no_run
//! use ndarray::Array2;
//! use nilspod_datastream::{Datastream, FilterType};
//!
//! # fn main() -> nilspod_datastream::Result<()> {
//! let acc = Datastream::new(Array2::zeros((1000, 3)))
//!     .with_sampling_rate(204.8)
//!     .with_sensor("acc");
//! let slow = acc.downsample(4)?;
//! let smooth = acc.filter_butterworth(10.0, 4, FilterType::Lowpass)?;
//! let table = slow.data_as_df(true)?;
//! # let _ = (smooth, table);
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;

pub use data::export::DataTable;
pub use data::filter::{Cutoff, FilterType};
pub use data::model::{Column, Datastream, BUTTERWORTH_PADLEN};
pub use data::sensors::{default_registry, SensorRegistry, ARBITRARY_UNITS};
pub use data::slice::RowSlice;
pub use error::{Error, Result};
