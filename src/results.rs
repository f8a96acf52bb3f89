//! Where the suites send their numbers.
//!
//! Internally a measurement is a [`Measurement`]: either a mean duration or an
//! explicit "not applicable" marker. A [`ResultsSink`] only understands plain
//! signed nanosecond counts, so the marker becomes [`NOT_APPLICABLE`] (`-1`)
//! at that boundary.

use std::{fmt, time::Duration};

use tracing::{debug, warn};

use crate::{
    map::{MapKind, MapOp},
    sequence::{SequenceKind, SequenceOp},
};

/// Cell value meaning "this operation is not applicable to this structure".
pub const NOT_APPLICABLE: i64 = -1;

// ////////////////////////////////////////////////////////////////////////////
// Measurement
// ////////////////////////////////////////////////////////////////////////////

/// The outcome of timing one operation against one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Mean duration over all repetitions.
    Mean(Duration),
    /// The structure does not offer the operation.
    NotApplicable,
}

impl Measurement {
    /// The value stored in a results cell: whole nanoseconds (saturating at
    /// `i64::MAX`) or [`NOT_APPLICABLE`].
    #[inline]
    #[must_use]
    pub fn to_cell(self) -> i64 {
        match self {
            Measurement::Mean(d) => i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
            Measurement::NotApplicable => NOT_APPLICABLE,
        }
    }

    /// The mean duration, if the operation was measured.
    #[inline]
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Measurement::Mean(d) => Some(d),
            Measurement::NotApplicable => None,
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Results Sink
// ////////////////////////////////////////////////////////////////////////////

/// A tabular recorder receiving one value per (operation, structure) cell.
///
/// Rows identify operations and columns identify structures. Column `0` is
/// reserved for row labels, so structures start at column `1`. Recording
/// cannot fail, and a second write to the same cell replaces the first.
pub trait ResultsSink {
    /// Store `value` (nanoseconds, or [`NOT_APPLICABLE`]) at `(row, column)`.
    fn record(&mut self, row: usize, column: usize, value: i64);

    /// Record a typed measurement, mapping it to its cell value.
    #[inline]
    fn record_measurement(&mut self, row: usize, column: usize, measurement: Measurement) {
        let value = measurement.to_cell();
        debug!(row, column, value, "recorded");
        self.record(row, column, value);
    }
}

impl<S: ResultsSink + ?Sized> ResultsSink for &mut S {
    #[inline]
    fn record(&mut self, row: usize, column: usize, value: i64) {
        (**self).record(row, column, value);
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Results Table
// ////////////////////////////////////////////////////////////////////////////

/// An in-memory [`ResultsSink`] which renders as a plain-text table.
///
/// Every cell starts out as [`NOT_APPLICABLE`] and is shown as `n/a` until a
/// duration is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsTable {
    title: String,
    rows: Vec<String>,
    columns: Vec<String>,
    // Row-major, `rows.len() * columns.len()` cells; column `c` of the sink is
    // stored at offset `c - 1`.
    cells: Vec<i64>,
}

impl ResultsTable {
    /// Create an empty table with the given row and column labels.
    #[inline]
    pub fn new(
        title: impl Into<String>,
        rows: impl IntoIterator<Item: Into<String>>,
        columns: impl IntoIterator<Item: Into<String>>,
    ) -> Self {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        ResultsTable {
            title: title.into(),
            cells: vec![NOT_APPLICABLE; rows.len() * columns.len()],
            rows,
            columns,
        }
    }

    /// A table laid out for the map suite.
    #[inline]
    #[must_use]
    pub fn maps() -> Self {
        Self::new(
            "Maps (mean ns)",
            MapOp::ALL.iter().map(|op| op.label()),
            MapKind::ALL.iter().map(|kind| kind.label()),
        )
    }

    /// A table laid out for the sequence suite.
    #[inline]
    #[must_use]
    pub fn sequences() -> Self {
        Self::new(
            "Sequences (mean ns)",
            SequenceOp::ALL.iter().map(|op| op.label()),
            SequenceKind::ALL.iter().map(|kind| kind.label()),
        )
    }

    fn offset(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows.len() && (1..=self.columns.len()).contains(&column))
            .then(|| row * self.columns.len() + column - 1)
    }

    /// The value at `(row, column)`, or `None` outside the table.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<i64> {
        self.offset(row, column)
            .and_then(|i| self.cells.get(i).copied())
    }

    /// Number of operation rows.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of structure columns, excluding the label column.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns.len()
    }
}

impl ResultsSink for ResultsTable {
    #[inline]
    fn record(&mut self, row: usize, column: usize, value: i64) {
        match self.offset(row, column).and_then(|i| self.cells.get_mut(i)) {
            Some(cell) => *cell = value,
            None => warn!(row, column, value, "dropped write outside the results table"),
        }
    }
}

impl fmt::Display for ResultsTable {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEADER: &str = "Operation";

        let rendered: Vec<Vec<String>> = (0..self.rows.len())
            .map(|row| {
                (1..=self.columns.len())
                    .map(|column| match self.get(row, column) {
                        Some(v) if v >= 0 => v.to_string(),
                        _ => "n/a".to_owned(),
                    })
                    .collect()
            })
            .collect();

        let label_width = self
            .rows
            .iter()
            .map(String::len)
            .chain([HEADER.len()])
            .max()
            .unwrap_or_default();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, label)| {
                rendered
                    .iter()
                    .filter_map(|row| row.get(c).map(String::len))
                    .chain([label.len()])
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        writeln!(f, "{}", self.title)?;
        write!(f, "{:<label_width$}", HEADER)?;
        for (label, &width) in self.columns.iter().zip(&widths) {
            write!(f, " | {label:>width$}")?;
        }
        write!(f, "\n{}", "-".repeat(label_width))?;
        for width in &widths {
            write!(f, "-+-{}", "-".repeat(*width))?;
        }
        for (label, values) in self.rows.iter().zip(&rendered) {
            write!(f, "\n{label:<label_width$}")?;
            for (value, &width) in values.iter().zip(&widths) {
                write!(f, " | {value:>width$}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::{Measurement, NOT_APPLICABLE, ResultsSink, ResultsTable};

    fn demo() -> ResultsTable {
        ResultsTable::new("Demo", ["Load", "Find"], ["Hash", "Ordered"])
    }

    #[test]
    fn measurement_cells() {
        assert_eq!(Measurement::Mean(Duration::from_nanos(42)).to_cell(), 42);
        assert_eq!(Measurement::Mean(Duration::ZERO).to_cell(), 0);
        assert_eq!(Measurement::Mean(Duration::MAX).to_cell(), i64::MAX);
        assert_eq!(Measurement::NotApplicable.to_cell(), NOT_APPLICABLE);
        assert_eq!(Measurement::NotApplicable.duration(), None);
    }

    #[test]
    fn starts_not_applicable() {
        let table = demo();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.columns(), 2);
        for row in 0..2 {
            for column in 1..=2 {
                assert_eq!(table.get(row, column), Some(NOT_APPLICABLE));
            }
        }
    }

    #[test]
    fn last_write_wins() {
        let mut table = demo();
        table.record(1, 2, 10);
        table.record(1, 2, 20);
        assert_eq!(table.get(1, 2), Some(20));
        assert_eq!(table.get(0, 2), Some(NOT_APPLICABLE));
    }

    #[test]
    fn out_of_bounds_is_dropped() {
        let mut table = demo();
        let before = table.clone();
        table.record(0, 0, 1);
        table.record(2, 1, 1);
        table.record(0, 3, 1);
        assert_eq!(table, before);
        assert_eq!(table.get(0, 0), None);
        assert_eq!(table.get(2, 1), None);
    }

    fn fill(mut sink: impl ResultsSink) {
        sink.record_measurement(0, 1, Measurement::Mean(Duration::from_nanos(5)));
        sink.record_measurement(1, 1, Measurement::NotApplicable);
    }

    #[test]
    fn record_through_reference() {
        let mut table = demo();
        table.record(1, 1, 99);
        fill(&mut table);
        assert_eq!(table.get(0, 1), Some(5));
        assert_eq!(table.get(1, 1), Some(NOT_APPLICABLE));
    }

    #[test]
    fn render() {
        let mut table = demo();
        table.record(0, 1, 120);
        table.record(0, 2, 34_567);
        table.record(1, 2, 8);
        insta::assert_snapshot!(table.to_string(), @r"
        Demo
        Operation | Hash | Ordered
        ----------+------+--------
        Load      |  120 |   34567
        Find      |  n/a |       8
        ");
    }
}
