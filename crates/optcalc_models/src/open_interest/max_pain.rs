//! Max pain over a table of strikes and open interest.
//!
//! For a candidate settlement price `s`, the pain is the total intrinsic
//! value that option holders would collect:
//!
//! pain(s) = Σ_{k > s} (k - s)·put_oiₖ + Σ_{k < s} (s - k)·call_oiₖ
//!
//! Candidates are restricted to the listed strikes.

use super::error::OpenInterestError;

/// One line of an open-interest table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OpenInterestRow {
    /// Strike price
    pub strike: f64,
    /// Open call contracts at this strike
    pub call_open_interest: f64,
    /// Open put contracts at this strike
    pub put_open_interest: f64,
}

impl OpenInterestRow {
    /// Creates a row.
    pub fn new(strike: f64, call_open_interest: f64, put_open_interest: f64) -> Self {
        Self {
            strike,
            call_open_interest,
            put_open_interest,
        }
    }
}

/// Pain evaluated at one strike.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikePain {
    /// Candidate settlement strike
    pub strike: f64,
    /// Total holder payout if the underlying settles at `strike`
    pub pain: f64,
}

/// Which end of the pain curve identifies the max-pain strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaxPainConvention {
    /// Strike with the largest aggregate pain (the calculators' behaviour).
    #[default]
    MaximumPain,
    /// Strike with the smallest aggregate payout (the textbook definition).
    MinimumPayout,
}

/// Validated open-interest table.
///
/// Non-empty, every strike positive and finite, every open interest finite
/// and non-negative. Row order is kept and decides ties.
///
/// # Examples
/// ```
/// use optcalc_models::open_interest::{MaxPainConvention, MaxPainTable, OpenInterestRow};
///
/// let table = MaxPainTable::new(vec![
///     OpenInterestRow::new(100.0, 5000.0, 7000.0),
///     OpenInterestRow::new(105.0, 6500.0, 5500.0),
///     OpenInterestRow::new(110.0, 8000.0, 3000.0),
///     OpenInterestRow::new(115.0, 3500.0, 4500.0),
///     OpenInterestRow::new(120.0, 2000.0, 9000.0),
/// ])
/// .unwrap();
///
/// assert_eq!(table.max_pain_strike(MaxPainConvention::MaximumPain), 100.0);
/// assert_eq!(table.max_pain_strike(MaxPainConvention::MinimumPayout), 110.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MaxPainTable {
    rows: Vec<OpenInterestRow>,
}

impl MaxPainTable {
    /// Validates and wraps the rows.
    ///
    /// # Errors
    /// The first offending row, or `EmptyTable`.
    pub fn new(rows: Vec<OpenInterestRow>) -> Result<Self, OpenInterestError> {
        if rows.is_empty() {
            return Err(OpenInterestError::EmptyTable);
        }

        for (index, row) in rows.iter().enumerate() {
            if !(row.strike > 0.0) || !row.strike.is_finite() {
                return Err(OpenInterestError::InvalidStrike {
                    index,
                    strike: row.strike,
                });
            }
            for value in [row.call_open_interest, row.put_open_interest] {
                if !value.is_finite() {
                    return Err(OpenInterestError::NonFiniteOpenInterest { index });
                }
                if value < 0.0 {
                    return Err(OpenInterestError::NegativeOpenInterest { index, value });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Returns the rows in input order.
    pub fn rows(&self) -> &[OpenInterestRow] {
        &self.rows
    }

    /// Number of rows (always at least one).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept alongside `len` for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Aggregate holder payout if the underlying settles at `settlement`.
    pub fn pain_at(&self, settlement: f64) -> f64 {
        self.rows
            .iter()
            .map(|row| {
                if row.strike > settlement {
                    (row.strike - settlement) * row.put_open_interest
                } else if row.strike < settlement {
                    (settlement - row.strike) * row.call_open_interest
                } else {
                    0.0
                }
            })
            .sum()
    }

    /// Pain at every listed strike, in row order.
    pub fn pain_profile(&self) -> Vec<StrikePain> {
        self.rows
            .iter()
            .map(|row| StrikePain {
                strike: row.strike,
                pain: self.pain_at(row.strike),
            })
            .collect()
    }

    /// The strike selected by `convention`.
    ///
    /// Comparison is strict, so the first row wins a tie.
    pub fn max_pain_strike(&self, convention: MaxPainConvention) -> f64 {
        let profile = self.pain_profile();
        let mut best = profile[0];
        for candidate in &profile[1..] {
            let better = match convention {
                MaxPainConvention::MaximumPain => candidate.pain > best.pain,
                MaxPainConvention::MinimumPayout => candidate.pain < best.pain,
            };
            if better {
                best = *candidate;
            }
        }
        best.strike
    }
}

impl TryFrom<Vec<OpenInterestRow>> for MaxPainTable {
    type Error = OpenInterestError;

    fn try_from(rows: Vec<OpenInterestRow>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example_table() -> MaxPainTable {
        MaxPainTable::new(vec![
            OpenInterestRow::new(100.0, 5000.0, 7000.0),
            OpenInterestRow::new(105.0, 6500.0, 5500.0),
            OpenInterestRow::new(110.0, 8000.0, 3000.0),
            OpenInterestRow::new(115.0, 3500.0, 4500.0),
            OpenInterestRow::new(120.0, 2000.0, 9000.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_pain_profile_example() {
        let profile = example_table().pain_profile();
        let pains: Vec<f64> = profile.iter().map(|p| p.pain).collect();
        let expected = [305_000.0, 220_000.0, 195_000.0, 225_000.0, 295_000.0];
        for (pain, want) in pains.iter().zip(expected) {
            assert_relative_eq!(*pain, want);
        }
        assert_eq!(profile[2].strike, 110.0);
    }

    #[test]
    fn test_conventions_on_example() {
        let table = example_table();
        assert_eq!(table.max_pain_strike(MaxPainConvention::default()), 100.0);
        assert_eq!(table.max_pain_strike(MaxPainConvention::MinimumPayout), 110.0);
    }

    #[test]
    fn test_single_row() {
        let table = MaxPainTable::new(vec![OpenInterestRow::new(50.0, 10.0, 10.0)]).unwrap();
        assert_eq!(table.pain_at(50.0), 0.0);
        assert_eq!(table.max_pain_strike(MaxPainConvention::MaximumPain), 50.0);
        assert_eq!(table.max_pain_strike(MaxPainConvention::MinimumPayout), 50.0);
    }

    #[test]
    fn test_first_row_wins_ties() {
        let rows = vec![
            OpenInterestRow::new(90.0, 100.0, 100.0),
            OpenInterestRow::new(110.0, 100.0, 100.0),
        ];
        let table = MaxPainTable::new(rows.clone()).unwrap();
        assert_eq!(table.pain_at(90.0), 2000.0);
        assert_eq!(table.pain_at(110.0), 2000.0);
        assert_eq!(table.max_pain_strike(MaxPainConvention::MaximumPain), 90.0);
        assert_eq!(table.max_pain_strike(MaxPainConvention::MinimumPayout), 90.0);

        let reversed = MaxPainTable::new(rows.into_iter().rev().collect()).unwrap();
        assert_eq!(reversed.max_pain_strike(MaxPainConvention::MaximumPain), 110.0);
        assert_eq!(reversed.max_pain_strike(MaxPainConvention::MinimumPayout), 110.0);
    }

    #[test]
    fn test_unsorted_rows() {
        let table = MaxPainTable::new(vec![
            OpenInterestRow::new(120.0, 2000.0, 9000.0),
            OpenInterestRow::new(100.0, 5000.0, 7000.0),
            OpenInterestRow::new(110.0, 8000.0, 3000.0),
            OpenInterestRow::new(105.0, 6500.0, 5500.0),
            OpenInterestRow::new(115.0, 3500.0, 4500.0),
        ])
        .unwrap();
        assert_eq!(table.max_pain_strike(MaxPainConvention::MaximumPain), 100.0);
        assert_eq!(table.max_pain_strike(MaxPainConvention::MinimumPayout), 110.0);
    }

    #[test]
    fn test_validation() {
        assert_eq!(MaxPainTable::new(vec![]), Err(OpenInterestError::EmptyTable));
        assert!(matches!(
            MaxPainTable::new(vec![OpenInterestRow::new(f64::NAN, 1.0, 1.0)]),
            Err(OpenInterestError::InvalidStrike { index: 0, .. })
        ));
        assert!(matches!(
            MaxPainTable::new(vec![
                OpenInterestRow::new(100.0, 1.0, 1.0),
                OpenInterestRow::new(105.0, f64::INFINITY, 1.0),
            ]),
            Err(OpenInterestError::NonFiniteOpenInterest { index: 1 })
        ));
        assert_eq!(
            MaxPainTable::new(vec![OpenInterestRow::new(100.0, 1.0, -2.0)]),
            Err(OpenInterestError::NegativeOpenInterest {
                index: 0,
                value: -2.0
            })
        );
    }

    #[test]
    fn test_zero_open_interest_allowed() {
        let table = MaxPainTable::try_from(vec![OpenInterestRow::new(100.0, 0.0, 0.0)]).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}
