use super::record::Column;
use super::types::Dtype;

/// Column-major storage for one snapshot column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    F64(Vec<f64>),
    I64(Vec<i64>),
}

impl ColumnData {
    pub fn with_capacity(dtype: Dtype, capacity: usize) -> Self {
        match dtype {
            Dtype::F64 => ColumnData::F64(Vec::with_capacity(capacity)),
            Dtype::I64 => ColumnData::I64(Vec::with_capacity(capacity)),
        }
    }

    pub fn dtype(&self) -> Dtype {
        match self {
            ColumnData::F64(_) => Dtype::F64,
            ColumnData::I64(_) => Dtype::I64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::F64(values) => values.len(),
            ColumnData::I64(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row`, widened to `f64`. Identifier columns lose precision
    /// above 2^53, the same way the text format does.
    pub fn get_f64(&self, row: usize) -> f64 {
        match self {
            ColumnData::F64(values) => values[row],
            ColumnData::I64(values) => values[row] as f64,
        }
    }

    /// Append a value, casting into the column dtype (truncation toward
    /// zero for integer columns, matching array-library float-to-int casts).
    pub fn push_f64(&mut self, value: f64) {
        match self {
            ColumnData::F64(values) => values.push(value),
            ColumnData::I64(values) => values.push(value as i64),
        }
    }
}

/// An in-memory snapshot: a column layout plus the loaded row data.
///
/// A snapshot is produced by exactly one load call and consumed by save
/// calls; it is never mutated in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    schema: Vec<Column>,
    columns: Vec<ColumnData>,
}

impl Snapshot {
    pub fn new(schema: Vec<Column>) -> Self {
        Self::with_capacity(schema, 0)
    }

    pub fn with_capacity(schema: Vec<Column>, rows: usize) -> Self {
        let columns = schema
            .iter()
            .map(|column| ColumnData::with_capacity(column.dtype, rows))
            .collect();
        Self { schema, columns }
    }

    pub fn schema(&self) -> &[Column] {
        &self.schema
    }

    pub fn columns(&self) -> &[ColumnData] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [ColumnData] {
        &mut self.columns
    }

    pub fn n_cols(&self) -> usize {
        self.schema.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, ColumnData::len)
    }

    /// Packed on-disk size of one row.
    pub fn row_size(&self) -> usize {
        self.n_cols() * Dtype::SIZE
    }

    /// Append one row of values, cast into each column's dtype.
    ///
    /// `values` must provide exactly one value per column.
    pub fn push_row_f64(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.columns.len());
        for (column, &value) in self.columns.iter_mut().zip(values) {
            column.push_f64(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_schema() -> Vec<Column> {
        vec![Column::i64("id"), Column::f64("mass")]
    }

    #[test]
    fn push_rows_and_counts() {
        let mut snapshot = Snapshot::new(two_column_schema());
        assert_eq!(snapshot.n_rows(), 0);
        assert_eq!(snapshot.n_cols(), 2);
        assert_eq!(snapshot.row_size(), 16);

        snapshot.push_row_f64(&[1.0, 0.5]);
        snapshot.push_row_f64(&[2.0, 0.25]);
        assert_eq!(snapshot.n_rows(), 2);
        assert_eq!(snapshot.columns()[0], ColumnData::I64(vec![1, 2]));
        assert_eq!(snapshot.columns()[1], ColumnData::F64(vec![0.5, 0.25]));
    }

    #[test]
    fn integer_columns_truncate_toward_zero() {
        let mut column = ColumnData::with_capacity(Dtype::I64, 2);
        column.push_f64(3.9);
        column.push_f64(-3.9);
        assert_eq!(column, ColumnData::I64(vec![3, -3]));
    }

    #[test]
    fn get_f64_widens_identifiers() {
        let column = ColumnData::I64(vec![42]);
        assert_eq!(column.get_f64(0), 42.0);
        assert_eq!(column.dtype(), Dtype::I64);
    }
}
