//! Truth tables over fixed-width rows.
//!
//! [`TruthTable::new`] enumerates all `2^n` rows of width `n`. The enumeration
//! walks the cartesian product `{0,1}^n` in ascending order (most significant
//! position first) and reverses every tuple before storing it, so for `n = 2`
//! the rows are:
//!
//! ```text
//! [0, 0]
//! [1, 0]
//! [0, 1]
//! [1, 1]
//! ```
//!
//! Equivalently, row `i` holds the binary expansion of `i`, least significant
//! bit first, which is what makes a table usable as a permutation of its
//! inputs (see [`TruthTable::is_reversible`]).

use std::fmt::{Display, Formatter};
use std::ops::Index;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::bit::Bit;
use crate::error::{Error, Result};
use crate::row::Row;

/// Row-count rule applied by [`TruthTable::set_to_table`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RowCountCheck {
    /// A table of width `w` must have `2^w` rows.
    #[default]
    Canonical,
    /// A table of width `w` must have `w^2` rows.
    ///
    /// Kept for compatibility with tables produced by older tooling; the two
    /// rules only agree for `w = 2` and `w = 4`.
    Legacy,
}

impl RowCountCheck {
    /// Expected number of rows for the given width (saturating).
    pub fn expected_rows(self, width: usize) -> usize {
        match self {
            RowCountCheck::Canonical => full_length(width).unwrap_or(usize::MAX),
            RowCountCheck::Legacy => width.checked_mul(width).unwrap_or(usize::MAX),
        }
    }
}

/// `2^width`, if it fits in a `usize`.
fn full_length(width: usize) -> Option<usize> {
    u32::try_from(width).ok().and_then(|w| 1usize.checked_shl(w))
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TruthTable {
    width: usize,
    rows: Vec<Row>,
}

impl TruthTable {
    /// Largest width accepted by [`TruthTable::new`].
    pub const MAX_WIDTH: usize = 31;

    /// Creates the canonical table of the given width.
    ///
    /// # Panics
    ///
    /// Panics if `width > MAX_WIDTH`.
    pub fn new(width: usize) -> Self {
        assert!(
            width <= Self::MAX_WIDTH,
            "Truth table width should be in the range 0..=31"
        );

        let rows = (0..1u64 << width).map(|i| Row::from_value(width, i)).collect();

        Self { width, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width shared by every row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    fn check_row_index(&self, row_index: usize) -> Result<()> {
        if row_index < self.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: row_index,
                len: self.len(),
            })
        }
    }

    pub fn get(&self, row_index: usize) -> Result<&Row> {
        self.check_row_index(row_index)?;
        Ok(&self.rows[row_index])
    }

    /// Rows handed out mutably must never be replaced wholesale: every row
    /// keeps the table width.
    pub(crate) fn row_mut(&mut self, row_index: usize) -> Result<&mut Row> {
        self.check_row_index(row_index)?;
        Ok(&mut self.rows[row_index])
    }

    /// Sets a single bit of one row.
    pub fn set_bit(&mut self, row_index: usize, col_index: usize, bit: Bit) -> Result<()> {
        self.row_mut(row_index)?.set_bit(col_index, bit)
    }

    /// Replaces the row at `row_index`.
    ///
    /// Fails with [`Error::SizeMismatch`] if `row` is not as wide as the row it replaces.
    pub fn set(&mut self, row_index: usize, row: Row) -> Result<()> {
        self.check_row_index(row_index)?;
        let existing = self.rows[row_index].len();
        if row.len() != existing {
            return Err(Error::SizeMismatch {
                expected: existing,
                actual: row.len(),
            });
        }
        self.rows[row_index] = row;
        Ok(())
    }

    /// Replaces the whole table with `table`.
    ///
    /// Every row must have the same width `w`, every value must be a bit, and
    /// the number of rows must satisfy `check`. Nothing is modified on error.
    ///
    /// ```
    /// use rev_rs::table::{RowCountCheck, TruthTable};
    ///
    /// let mut tt = TruthTable::new(2);
    /// tt.set_to_table([[0u8, 1], [1, 1], [1, 0], [0, 0]], RowCountCheck::Canonical)
    ///     .unwrap();
    /// assert_eq!(tt.to_string(), "[0, 1]\n[1, 1]\n[1, 0]\n[0, 0]");
    /// ```
    pub fn set_to_table<I, R>(&mut self, table: I, check: RowCountCheck) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let table: Vec<R> = table.into_iter().collect();

        let Some(first) = table.first() else {
            return Err(Error::RowCountMismatch {
                expected: check.expected_rows(0).max(1),
                actual: 0,
            });
        };
        let width = first.as_ref().len();

        if let Some(bad) = table.iter().find(|r| r.as_ref().len() != width) {
            return Err(Error::SizeMismatch {
                expected: width,
                actual: bad.as_ref().len(),
            });
        }

        let expected = check.expected_rows(width);
        if table.len() != expected {
            return Err(Error::RowCountMismatch {
                expected,
                actual: table.len(),
            });
        }

        let rows = table
            .iter()
            .map(|r| Row::new(r.as_ref().iter().copied()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "set_to_table: replacing {}x{} table with {}x{} ({:?})",
            self.len(),
            self.width,
            rows.len(),
            width,
            check
        );
        self.width = width;
        self.rows = rows;
        Ok(())
    }

    /// Complements every bit of one row.
    pub fn negate_row(&mut self, row_index: usize) -> Result<()> {
        self.row_mut(row_index)?.negate_all();
        Ok(())
    }

    /// Complements one position in every row.
    pub fn negate_column(&mut self, col_index: usize) -> Result<()> {
        if col_index >= self.width {
            return Err(Error::IndexOutOfRange {
                index: col_index,
                len: self.width,
            });
        }
        for row in &mut self.rows {
            row.flip(col_index);
        }
        Ok(())
    }

    /// Exchanges two rows.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row_index(a)?;
        self.check_row_index(b)?;
        self.rows.swap(a, b);
        Ok(())
    }

    /// Shuffles the rows uniformly at random.
    ///
    /// A reversible table stays reversible: only the order of the outputs changes.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rows.shuffle(rng);
    }

    /// Returns true if the table has `2^width` rows, i.e. one per input.
    pub fn is_complete(&self) -> bool {
        full_length(self.width) == Some(self.len())
    }

    /// Returns true if the table is a bijection on `{0,1}^width`:
    /// complete, with every row value occurring exactly once.
    pub fn is_reversible(&self) -> bool {
        if !self.is_complete() {
            return false;
        }
        let mut seen = vec![false; self.len()];
        for row in &self.rows {
            // Complete: `value() < 2^width == len()`, so `v` indexes `seen`.
            let v = row.value() as usize;
            if seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    /// Returns true if the table equals the canonical table of its width.
    pub fn is_identity(&self) -> bool {
        self.is_complete()
            && self
                .rows
                .iter()
                .enumerate()
                .all(|(i, row)| row.value() == i as u64)
    }

    /// Returns the inverse permutation: `inv[self[i]] = i`.
    pub fn inverse(&self) -> Result<TruthTable> {
        if !self.is_reversible() {
            return Err(Error::NotReversible);
        }
        let mut rows = vec![Row::default(); self.len()];
        for (input, output) in self.rows.iter().enumerate() {
            rows[output.value() as usize] = Row::from_value(self.width, input as u64);
        }
        Ok(Self {
            width: self.width,
            rows,
        })
    }

    /// Sequential composition: the function of `self` followed by that of `rhs`.
    ///
    /// `result[i] = rhs[self[i]]`. Both tables must be complete and of equal width.
    pub fn compose(&self, rhs: &TruthTable) -> Result<TruthTable> {
        if self.width != rhs.width {
            return Err(Error::SizeMismatch {
                expected: self.width,
                actual: rhs.width,
            });
        }
        for t in [self, rhs] {
            if !t.is_complete() {
                return Err(Error::RowCountMismatch {
                    expected: RowCountCheck::Canonical.expected_rows(t.width),
                    actual: t.len(),
                });
            }
        }
        let rows = self
            .rows
            .iter()
            .map(|row| rhs.rows[row.value() as usize].clone())
            .collect();
        Ok(Self {
            width: self.width,
            rows,
        })
    }

    /// Value of the output bit `col_index` for every input, as a column.
    pub fn column(&self, col_index: usize) -> Result<Vec<Bit>> {
        if col_index >= self.width {
            return Err(Error::IndexOutOfRange {
                index: col_index,
                len: self.width,
            });
        }
        Ok(self.rows.iter().map(|row| row[col_index]).collect())
    }
}

impl Index<usize> for TruthTable {
    type Output = Row;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a TruthTable {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_log::test;

    use super::*;
    use crate::gate::{Gate, Side};

    fn rows_of(tt: &TruthTable) -> Vec<String> {
        tt.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_canonical_order() {
        let tt = TruthTable::new(2);
        assert_eq!(rows_of(&tt), ["[0, 0]", "[1, 0]", "[0, 1]", "[1, 1]"]);
    }

    #[test]
    fn test_canonical_row_is_reversed_product_tuple() {
        let tt = TruthTable::new(3);
        for (i, row) in tt.iter().enumerate() {
            // Most-significant-first tuple for index i, then reversed.
            let mut tuple: Vec<u8> = (0..3).rev().map(|j| ((i >> j) & 1) as u8).collect();
            tuple.reverse();
            assert_eq!(row, &Row::new(tuple).unwrap());
        }
    }

    #[test]
    fn test_width_zero() {
        let tt = TruthTable::new(0);
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.width(), 0);
        assert_eq!(tt.to_string(), "[]");
    }

    #[test]
    #[should_panic(expected = "Truth table width should be in the range 0..=31")]
    fn test_too_wide() {
        TruthTable::new(32);
    }

    #[test]
    fn test_display() {
        let tt = TruthTable::new(1);
        assert_eq!(tt.to_string(), "[0]\n[1]");
    }

    #[test]
    fn test_get_set() {
        let mut tt = TruthTable::new(2);
        tt.set(0, Row::new([1, 1]).unwrap()).unwrap();
        assert_eq!(tt.get(0).unwrap().to_string(), "[1, 1]");
        assert_eq!(tt.get(4), Err(Error::IndexOutOfRange { index: 4, len: 4 }));
    }

    #[test]
    fn test_set_size_mismatch() {
        let mut tt = TruthTable::new(2);
        let before = tt.clone();
        assert_eq!(
            tt.set(1, Row::new([1, 1, 1]).unwrap()),
            Err(Error::SizeMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(
            tt.set(9, Row::zeros(2)),
            Err(Error::IndexOutOfRange { index: 9, len: 4 })
        );
        assert_eq!(tt, before);
    }

    #[test]
    fn test_set_to_table_canonical() {
        let mut tt = TruthTable::new(4);
        tt.set_to_table([[0u8, 1], [1, 1], [1, 0], [0, 0]], RowCountCheck::Canonical)
            .unwrap();
        assert_eq!(tt.len(), 4);
        assert_eq!(tt.width(), 2);
        assert_eq!(tt.to_string(), "[0, 1]\n[1, 1]\n[1, 0]\n[0, 0]");
    }

    #[test]
    fn test_set_to_table_ragged() {
        let mut tt = TruthTable::new(2);
        let before = tt.clone();
        let res = tt.set_to_table(
            vec![vec![0u8, 1], vec![1], vec![1, 0], vec![0, 0]],
            RowCountCheck::Canonical,
        );
        assert_eq!(
            res,
            Err(Error::SizeMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(tt, before);
    }

    #[test]
    fn test_set_to_table_row_count() {
        let mut tt = TruthTable::new(3);
        let before = tt.clone();

        // 9 rows of width 3: legacy accepts, canonical does not.
        let nine = vec![[0u8, 0, 0]; 9];
        assert_eq!(
            tt.set_to_table(&nine, RowCountCheck::Canonical),
            Err(Error::RowCountMismatch {
                expected: 8,
                actual: 9
            })
        );
        assert_eq!(tt, before);

        tt.set_to_table(&nine, RowCountCheck::Legacy).unwrap();
        assert_eq!(tt.len(), 9);
        assert_eq!(tt.width(), 3);
    }

    #[test]
    fn test_set_to_table_modes_agree_on_width_two() {
        let table = [[1u8, 1], [0, 1], [1, 0], [0, 0]];
        let mut a = TruthTable::new(2);
        let mut b = TruthTable::new(2);
        a.set_to_table(table, RowCountCheck::Canonical).unwrap();
        b.set_to_table(table, RowCountCheck::Legacy).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_to_table_invalid_bit() {
        let mut tt = TruthTable::new(1);
        assert_eq!(
            tt.set_to_table([[0u8], [5]], RowCountCheck::Canonical),
            Err(Error::InvalidBit { value: 5 })
        );
        assert!(tt.is_identity());
    }

    #[test]
    fn test_set_to_table_empty() {
        let mut tt = TruthTable::new(1);
        let empty: [[u8; 0]; 0] = [];
        assert!(matches!(
            tt.set_to_table(empty, RowCountCheck::Legacy),
            Err(Error::RowCountMismatch { actual: 0, .. })
        ));
    }

    #[test]
    fn test_negate_row() {
        let mut tt = TruthTable::new(2);
        tt.negate_row(3).unwrap();
        assert_eq!(tt[3].to_string(), "[0, 0]");
        assert_eq!(
            tt.negate_row(4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_negate_column() {
        let mut tt = TruthTable::new(2);
        tt.negate_column(0).unwrap();
        assert_eq!(rows_of(&tt), ["[1, 0]", "[0, 0]", "[1, 1]", "[0, 1]"]);
        assert_eq!(
            tt.negate_column(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_swap_and_reversible() {
        let mut tt = TruthTable::new(2);
        assert!(tt.is_identity());
        tt.swap(0, 3).unwrap();
        assert!(!tt.is_identity());
        assert!(tt.is_reversible());

        tt.set(1, Row::new([1, 1]).unwrap()).unwrap();
        assert!(!tt.is_reversible());
        assert_eq!(tt.inverse(), Err(Error::NotReversible));
    }

    #[test]
    fn test_set_bit() {
        let mut tt = TruthTable::new(2);
        tt.set_bit(0, 1, Bit::One).unwrap();
        assert_eq!(tt[0].to_string(), "[0, 1]");
        assert_eq!(tt.width(), 2);
        assert_eq!(
            tt.set_bit(0, 2, Bit::One),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            tt.set_bit(4, 0, Bit::One),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
        assert!(!tt.is_reversible());
    }

    #[test]
    fn test_rows_keep_table_width() {
        let mut tt = TruthTable::new(2);
        tt.set_bit(0, 1, Bit::One).unwrap();
        tt.negate_row(1).unwrap();
        assert!(tt.set(2, Row::zeros(5)).is_err());
        assert!(tt.iter().all(|row| row.len() == tt.width()));

        tt.negate_column(1).unwrap();
        assert!(!tt.is_reversible());
        Gate::cnot(2, 1, 0)
            .unwrap()
            .apply_to_table(&mut tt, Side::Output)
            .unwrap();
    }

    #[test]
    fn test_shuffle() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut tt = TruthTable::new(4);
        tt.shuffle(&mut rng);
        assert_eq!(tt.len(), 16);
        assert_eq!(tt.width(), 4);
        assert!(tt.is_reversible());
        assert!(tt.inverse().unwrap().compose(&tt).unwrap().is_identity());
    }

    #[test]
    fn test_inverse() {
        let mut tt = TruthTable::new(3);
        tt.swap(1, 6).unwrap();
        tt.swap(2, 6).unwrap();
        let inv = tt.inverse().unwrap();
        assert!(tt.compose(&inv).unwrap().is_identity());
        assert!(inv.compose(&tt).unwrap().is_identity());
    }

    #[test]
    fn test_compose() {
        let mut f = TruthTable::new(2);
        f.swap(0, 1).unwrap(); // 0 <-> 1
        let mut g = TruthTable::new(2);
        g.swap(1, 2).unwrap(); // 1 <-> 2

        // f then g: 0 -> 1 -> 2
        let h = f.compose(&g).unwrap();
        assert_eq!(h[0].value(), 2);
        assert_eq!(h[1].value(), 0);
        assert_eq!(h[2].value(), 1);
        assert_eq!(h[3].value(), 3);

        assert_eq!(
            f.compose(&TruthTable::new(3)),
            Err(Error::SizeMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_column() {
        let tt = TruthTable::new(2);
        let col: Vec<u8> = tt.column(1).unwrap().into_iter().map(u8::from).collect();
        assert_eq!(col, vec![0, 0, 1, 1]);
    }
}
