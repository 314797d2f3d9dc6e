use std::fmt;
use std::io::Write;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Float64Type, Schema, UInt64Type};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

use super::model::Datastream;
use crate::error::{Error, Result};

/// Index label when the index holds elapsed time in seconds.
pub const TIME_INDEX: &str = "t";
/// Index label when the index holds the row position.
pub const ROW_INDEX: &str = "index";

// ---------------------------------------------------------------------------
// DataTable – labelled tabular view of a Datastream
// ---------------------------------------------------------------------------

/// Samples of a [`Datastream`] as an Arrow [`RecordBatch`].
///
/// Layout:
/// ```text
///  t (Float64) | acc_x (Float64) | acc_y (Float64) | ...
///  index (UInt64) | 0 (Float64) | 1 (Float64) | ...
/// ```
/// The first field is always the index, one `Float64` field per channel
/// follows.
#[derive(Debug, Clone)]
pub struct DataTable {
    batch: RecordBatch,
}

impl DataTable {
    pub(crate) fn from_datastream(ds: &Datastream, index_as_time: bool) -> Result<Self> {
        let labels: Vec<String> = ds.columns().iter().map(|c| c.to_string()).collect();
        if labels.len() != ds.channels() {
            return Err(Error::ColumnMismatch {
                labels: labels.len(),
                channels: ds.channels(),
            });
        }

        let rows = ds.len();
        let (index_field, index): (Field, ArrayRef) = if index_as_time {
            let t = (0..rows).map(|i| i as f64 / ds.sampling_rate_hz);
            (
                Field::new(TIME_INDEX, DataType::Float64, false),
                Arc::new(Float64Array::from_iter_values(t)),
            )
        } else {
            (
                Field::new(ROW_INDEX, DataType::UInt64, false),
                Arc::new(UInt64Array::from_iter_values(0..rows as u64)),
            )
        };

        let mut fields = vec![index_field];
        let mut arrays = vec![index];
        for (label, column) in labels.iter().zip(ds.data.columns()) {
            fields.push(Field::new(label, DataType::Float64, false));
            arrays.push(Arc::new(Float64Array::from_iter_values(column.iter().copied())));
        }

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Ok(Self { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// `t` for a time index, `index` for row positions.
    pub fn index_name(&self) -> &str {
        self.batch.schema_ref().field(0).name()
    }

    /// Index values as floats (seconds or row positions).
    pub fn index_values(&self) -> Vec<f64> {
        let index = self.batch.column(0);
        match index.data_type() {
            DataType::UInt64 => index
                .as_primitive::<UInt64Type>()
                .values()
                .iter()
                .map(|&v| v as f64)
                .collect(),
            _ => index.as_primitive::<Float64Type>().values().to_vec(),
        }
    }

    /// Channel labels, excluding the index.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .skip(1)
            .map(|f| f.name().clone())
            .collect()
    }

    /// Values of the first channel labelled `name`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let position = self
            .batch
            .schema_ref()
            .fields()
            .iter()
            .skip(1)
            .position(|f| f.name() == name)?;
        let array = self.batch.column(position + 1);
        Some(array.as_primitive::<Float64Type>().values().to_vec())
    }

    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_record_batch(self) -> RecordBatch {
        self.batch
    }

    /// Write a header row followed by one record per sample.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        let schema = self.batch.schema_ref();
        out.write_record(schema.fields().iter().map(|f| f.name().as_str()))?;

        let index = self.batch.column(0);
        let channels: Vec<&Float64Array> = self
            .batch
            .columns()
            .iter()
            .skip(1)
            .map(|c| c.as_primitive::<Float64Type>())
            .collect();

        for row in 0..self.num_rows() {
            let mut record = Vec::with_capacity(channels.len() + 1);
            record.push(format_index(index, row));
            record.extend(channels.iter().map(|c| c.value(row).to_string()));
            out.write_record(&record)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write the table as a single Parquet row group.
    pub fn write_parquet<W: Write + Send>(&self, writer: W) -> Result<()> {
        let mut out = ArrowWriter::try_new(writer, self.batch.schema(), None)?;
        out.write(&self.batch)?;
        out.close()?;
        Ok(())
    }
}

fn format_index(index: &ArrayRef, row: usize) -> String {
    match index.data_type() {
        DataType::UInt64 => index.as_primitive::<UInt64Type>().value(row).to_string(),
        _ => index.as_primitive::<Float64Type>().value(row).to_string(),
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = pretty_format_batches(std::slice::from_ref(&self.batch)).map_err(|_| fmt::Error)?;
        write!(f, "{table}")
    }
}
