// stats.rs — Function-length summary statistics

use serde::Serialize;

use crate::models::FunctionRecord;

/// Min/max/mean/median over a set of function lengths. All fields are zero
/// when no functions were found; nothing here can divide by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LengthStats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
}

impl LengthStats {
    pub fn from_lengths(mut lengths: Vec<usize>) -> Self {
        if lengths.is_empty() {
            return Self::default();
        }
        lengths.sort_unstable();

        let count = lengths.len();
        let sum: usize = lengths.iter().sum();
        let median = if count % 2 == 0 {
            (lengths[count / 2 - 1] + lengths[count / 2]) as f64 / 2.0
        } else {
            lengths[count / 2] as f64
        };

        Self {
            count,
            min: lengths[0],
            max: lengths[count - 1],
            mean: sum as f64 / count as f64,
            median,
        }
    }

    pub fn of(functions: &[FunctionRecord]) -> Self {
        Self::from_lengths(functions.iter().map(|f| f.total_lines()).collect())
    }
}

/// The shortest and longest functions in a set. Ties keep the first seen,
/// matching discovery order.
pub fn extremes(functions: &[FunctionRecord]) -> Option<(&FunctionRecord, &FunctionRecord)> {
    let mut iter = functions.iter();
    let first = iter.next()?;
    let mut shortest = first;
    let mut longest = first;
    for f in iter {
        if f.total_lines() < shortest.total_lines() {
            shortest = f;
        }
        if f.total_lines() > longest.total_lines() {
            longest = f;
        }
    }
    Some((shortest, longest))
}
