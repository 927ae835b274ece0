use std::fmt;

use duckdb::arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, LargeStringArray, StringArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use duckdb::arrow::datatypes::DataType;
use duckdb::arrow::record_batch::RecordBatch;
use duckdb::arrow::util::display::array_value_to_string;

/// One value of a result table.
///
/// The engine returns arrow batches; they are flattened into this owned
/// representation at the submission boundary so nothing downstream depends
/// on the engine's column formats.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(v) => write!(f, "{v}"),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// An owned tabular query result: ordered column names plus row-major cells.
///
/// Ephemeral by contract: built per submission, discarded after
/// presentation, never cached across filter changes.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_batches(batches: &[RecordBatch]) -> Self {
        let Some(first) = batches.first() else {
            return Self::empty();
        };
        let columns = first
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for batch in batches {
            for row in 0..batch.num_rows() {
                let cells = batch
                    .columns()
                    .iter()
                    .map(|col| cell_at(col, row))
                    .collect::<Vec<_>>();
                rows.push(cells);
            }
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Integer accessor; `None` for NULL, missing, or non-integer cells.
    pub fn i64_at(&self, row: usize, column: &str) -> Option<i64> {
        match self.cell(row, column)? {
            CellValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float accessor; integers widen, `None` for NULL or missing cells.
    pub fn f64_at(&self, row: usize, column: &str) -> Option<f64> {
        match self.cell(row, column)? {
            CellValue::Float(v) => Some(*v),
            CellValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn text_at(&self, row: usize, column: &str) -> Option<&str> {
        match self.cell(row, column)? {
            CellValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

fn cell_at(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Boolean => downcast::<BooleanArray>(col, |a| CellValue::Bool(a.value(row))),
        DataType::Int8 => downcast::<Int8Array>(col, |a| CellValue::Int(a.value(row) as i64)),
        DataType::Int16 => downcast::<Int16Array>(col, |a| CellValue::Int(a.value(row) as i64)),
        DataType::Int32 => downcast::<Int32Array>(col, |a| CellValue::Int(a.value(row) as i64)),
        DataType::Int64 => downcast::<Int64Array>(col, |a| CellValue::Int(a.value(row))),
        DataType::UInt8 => downcast::<UInt8Array>(col, |a| CellValue::Int(a.value(row) as i64)),
        DataType::UInt16 => downcast::<UInt16Array>(col, |a| CellValue::Int(a.value(row) as i64)),
        DataType::UInt32 => downcast::<UInt32Array>(col, |a| CellValue::Int(a.value(row) as i64)),
        DataType::UInt64 => downcast::<UInt64Array>(col, |a| {
            i64::try_from(a.value(row))
                .map(CellValue::Int)
                .unwrap_or_else(|_| CellValue::Text(a.value(row).to_string()))
        }),
        DataType::Float32 => downcast::<Float32Array>(col, |a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => downcast::<Float64Array>(col, |a| CellValue::Float(a.value(row))),
        DataType::Utf8 => downcast::<StringArray>(col, |a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => {
            downcast::<LargeStringArray>(col, |a| CellValue::Text(a.value(row).to_string()))
        }
        // Timestamps, dates, decimals, and anything more exotic render
        // through arrow's own display path.
        _ => array_value_to_string(col, row)
            .map(CellValue::Text)
            .unwrap_or(CellValue::Null),
    }
}

fn downcast<T: 'static>(col: &ArrayRef, f: impl FnOnce(&T) -> CellValue) -> CellValue {
    match col.as_any().downcast_ref::<T>() {
        Some(a) => f(a),
        None => CellValue::Null,
    }
}
