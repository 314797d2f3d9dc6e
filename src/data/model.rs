use std::fmt;

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::export::DataTable;
use super::filter::{self, Cutoff, FilterType};
use super::sensors::{default_registry, SensorRegistry, ARBITRARY_UNITS};
use super::slice::RowSlice;
use crate::error::Result;

/// Edge padding (samples) used by [`Datastream::filter_butterworth`].
pub const BUTTERWORTH_PADLEN: usize = 150;

// ---------------------------------------------------------------------------
// Column – one channel label
// ---------------------------------------------------------------------------

/// Label of a single channel: a name from explicit columns or a sensor
/// legend, or the channel position when neither is available.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Name(String),
    Index(usize),
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Name(name) => write!(f, "{name}"),
            Column::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Name(name.to_string())
    }
}

impl From<usize> for Column {
    fn from(i: usize) -> Self {
        Column::Index(i)
    }
}

// ---------------------------------------------------------------------------
// Datastream – one sensor's samples plus metadata
// ---------------------------------------------------------------------------

/// Samples of a single sensor, `N` rows (samples) by `M` columns (channels),
/// with the rate they were recorded at.
///
/// Transforms come in two flavours: the plain method returns an independent
/// copy and leaves `self` untouched, the `_inplace` variant rewrites `self`.
/// `Clone` is a deep copy; no two streams ever share a sample buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datastream {
    pub data: Array2<f64>,
    pub sampling_rate_hz: f64,
    /// Whether `data` holds physical values rather than raw counts. Flipped by
    /// the calibration step, only read here.
    #[serde(default)]
    pub is_calibrated: bool,
    pub sensor: Option<String>,
    unit: Option<String>,
    columns: Option<Vec<String>>,
}

impl Datastream {
    /// Wrap `data` recorded at 1 Hz, uncalibrated, without sensor metadata.
    pub fn new(data: Array2<f64>) -> Self {
        Self {
            data,
            sampling_rate_hz: 1.0,
            is_calibrated: false,
            sensor: None,
            unit: None,
            columns: None,
        }
    }

    pub fn with_sampling_rate(mut self, sampling_rate_hz: impl Into<f64>) -> Self {
        self.sampling_rate_hz = sampling_rate_hz.into();
        self
    }

    /// Explicit channel names. An empty list counts as "not given".
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_sensor(mut self, sensor: impl Into<String>) -> Self {
        self.sensor = Some(sensor.into());
        self
    }

    /// Unit reported once the stream is calibrated, overriding the sensor
    /// table.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn calibrated(mut self, is_calibrated: bool) -> Self {
        self.is_calibrated = is_calibrated;
        self
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.data.ncols()
    }

    /// Physical unit of `data`, resolved against the built-in sensor tables.
    pub fn unit(&self) -> &str {
        self.unit_in(default_registry())
    }

    /// Physical unit of `data`.
    ///
    /// Uncalibrated data is always in arbitrary units. Calibrated data uses
    /// the explicit override, then the sensor's table entry, then arbitrary
    /// units.
    pub fn unit_in<'a>(&'a self, registry: &'a SensorRegistry) -> &'a str {
        if !self.is_calibrated {
            return ARBITRARY_UNITS;
        }
        if let Some(unit) = self.unit.as_deref().filter(|u| !u.is_empty()) {
            return unit;
        }
        self.sensor
            .as_deref()
            .and_then(|s| registry.unit(s))
            .filter(|u| !u.is_empty())
            .unwrap_or(ARBITRARY_UNITS)
    }

    /// Channel labels, resolved against the built-in sensor tables.
    pub fn columns(&self) -> Vec<Column> {
        self.columns_in(default_registry())
    }

    /// Channel labels: explicit columns, else the sensor legend, else the
    /// positions `0..M`. Computed on every call since the shape of `data`
    /// may have changed.
    pub fn columns_in(&self, registry: &SensorRegistry) -> Vec<Column> {
        if let Some(cols) = self.columns.as_ref().filter(|c| !c.is_empty()) {
            return cols.iter().map(|c| Column::Name(c.clone())).collect();
        }
        if let Some(legend) = self
            .sensor
            .as_deref()
            .and_then(|s| registry.legend(s))
            .filter(|l| !l.is_empty())
        {
            return legend.iter().map(|c| Column::Name(c.clone())).collect();
        }
        (0..self.channels()).map(Column::Index).collect()
    }

    /// Euclidean norm of every sample across channels.
    pub fn norm(&self) -> Array1<f64> {
        self.data.map_axis(Axis(1), |row| row.dot(&row).sqrt())
    }

    /// Copy with every channel divided by its maximum.
    ///
    /// A channel whose maximum is zero turns into `inf`/`NaN`. The values are
    /// kept as they are, only a warning is logged. A `NaN` sample makes the
    /// whole channel `NaN`.
    pub fn normalize(&self) -> Datastream {
        let max = self
            .data
            .fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| {
                // NaN anywhere in a channel poisons its maximum
                if acc.is_nan() || v.is_nan() {
                    f64::NAN
                } else {
                    acc.max(v)
                }
            });
        if max.iter().any(|&m| m == 0.0) {
            log::warn!("normalize: channel with zero maximum, result contains non-finite values");
        }
        let mut ds = self.clone();
        ds.data /= &max;
        ds
    }

    /// Copy holding only the rows selected by `slice`. Sampling rate and
    /// metadata are kept as they are.
    pub fn cut(&self, slice: impl Into<RowSlice>) -> Result<Datastream> {
        let mut ds = self.clone();
        ds.cut_inplace(slice)?;
        Ok(ds)
    }

    /// Keep only the rows selected by `slice`.
    pub fn cut_inplace(&mut self, slice: impl Into<RowSlice>) -> Result<&mut Self> {
        let slice = slice.into();
        let rows = slice.indices(self.len())?;
        log::debug!("cut {slice:?}: {} -> {} samples", self.len(), rows.len());
        self.data = self.data.select(Axis(0), &rows);
        Ok(self)
    }

    /// Copy decimated by `factor`, see [`Datastream::downsample_inplace`].
    pub fn downsample(&self, factor: usize) -> Result<Datastream> {
        let mut ds = self.clone();
        ds.downsample_inplace(factor)?;
        Ok(ds)
    }

    /// Anti-alias filter and keep every `factor`th sample, dividing the
    /// sampling rate by `factor`.
    pub fn downsample_inplace(&mut self, factor: usize) -> Result<&mut Self> {
        let decimated = filter::decimate(self.data.view(), factor)?;
        log::debug!(
            "downsample x{factor}: {} -> {} samples, {} Hz -> {} Hz",
            self.len(),
            decimated.nrows(),
            self.sampling_rate_hz,
            self.sampling_rate_hz / factor as f64
        );
        self.data = decimated;
        self.sampling_rate_hz /= factor as f64;
        Ok(self)
    }

    /// Zero-phase Butterworth filter of every channel.
    ///
    /// `cutoff_hz` is given in Hz (a pair for band filters) and normalised
    /// against the Nyquist frequency. Returns the filtered samples and leaves
    /// the stream untouched. Needs more than [`BUTTERWORTH_PADLEN`] samples.
    pub fn filter_butterworth(
        &self,
        cutoff_hz: impl Into<Cutoff>,
        order: usize,
        filter_type: FilterType,
    ) -> Result<Array2<f64>> {
        let cutoff = cutoff_hz.into().scaled(1.0 / (self.sampling_rate_hz / 2.0));
        log::debug!(
            "butterworth {filter_type} order {order}, normalised cutoff {cutoff:?} at {} Hz",
            self.sampling_rate_hz
        );
        let tf = filter::butter(order, cutoff, filter_type)?;
        filter::filtfilt_axis0(&tf, self.data.view(), BUTTERWORTH_PADLEN)
    }

    /// Tabular view of `data` labelled with [`Datastream::columns`]. With
    /// `index_as_time` the index is elapsed time in seconds (`t`), otherwise
    /// the row position.
    pub fn data_as_df(&self, index_as_time: bool) -> Result<DataTable> {
        DataTable::from_datastream(self, index_as_time)
    }
}

impl fmt::Display for Datastream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Datastream(sensor={}, sampling_rate_hz={}, is_calibrated={}, data={})",
            self.sensor.as_deref().unwrap_or("None"),
            self.sampling_rate_hz,
            self.is_calibrated,
            self.data
        )
    }
}
