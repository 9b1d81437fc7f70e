//! Fixed-width bit vector.
//!
//! A [`Row`] is a single line of a truth table. Its width is set at
//! construction and never changes; every element is a [`Bit`], so the
//! binary-value invariant cannot be broken once a row exists.
//!
//! Bit `j` of a row corresponds to bit `j` of its integer encoding
//! (least significant first), see [`Row::from_value`] and [`Row::value`].

use std::fmt::{Display, Formatter};
use std::ops::Index;

use crate::bit::Bit;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Row {
    bits: Vec<Bit>,
}

impl Row {
    /// Maximum width for the integer encoding.
    pub const MAX_VALUE_WIDTH: usize = u64::BITS as usize;

    /// Creates a row from raw integers.
    ///
    /// Fails with [`Error::InvalidBit`] if any element is neither 0 nor 1.
    ///
    /// ```
    /// use rev_rs::row::Row;
    ///
    /// let row = Row::new([0, 1, 1, 0]).unwrap();
    /// assert_eq!(row.len(), 4);
    /// assert_eq!(row.to_string(), "[0, 1, 1, 0]");
    /// assert!(Row::new([0, 2]).is_err());
    /// ```
    pub fn new(bits: impl IntoIterator<Item = u8>) -> Result<Self> {
        let bits = bits
            .into_iter()
            .map(Bit::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }

    /// Creates an all-zero row of the given width.
    pub fn zeros(width: usize) -> Self {
        Self {
            bits: vec![Bit::Zero; width],
        }
    }

    /// Creates a row holding the `width` low bits of `value`, least significant first.
    pub fn from_value(width: usize, value: u64) -> Self {
        assert!(
            width <= Self::MAX_VALUE_WIDTH,
            "Row width should be in the range 0..=64"
        );
        let bits = (0..width)
            .map(|j| Bit::from_u8_lossy((value >> j) as u8))
            .collect();
        Self { bits }
    }

    /// Returns the width of the row.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true for the zero-width row.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<Bit> {
        self.check_index(index)?;
        Ok(self.bits[index])
    }

    /// Sets the bit at `index` from a raw integer.
    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        self.check_index(index)?;
        let bit = Bit::try_from(value)?;
        self.bits[index] = bit;
        Ok(())
    }

    pub fn set_bit(&mut self, index: usize, bit: Bit) -> Result<()> {
        self.check_index(index)?;
        self.bits[index] = bit;
        Ok(())
    }

    /// Flips the bit at `index`, or every bit when `index` is `None`.
    ///
    /// ```
    /// use rev_rs::row::Row;
    ///
    /// let mut row = Row::new([1, 1, 1, 1]).unwrap();
    /// row.negate(Some(2)).unwrap();
    /// assert_eq!(row.to_string(), "[1, 1, 0, 1]");
    /// row.negate(None).unwrap();
    /// assert_eq!(row.to_string(), "[0, 0, 1, 0]");
    /// ```
    pub fn negate(&mut self, index: Option<usize>) -> Result<()> {
        match index {
            Some(index) => self.negate_bit(index),
            None => {
                self.negate_all();
                Ok(())
            }
        }
    }

    pub fn negate_bit(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.flip(index);
        Ok(())
    }

    pub fn negate_all(&mut self) {
        for bit in &mut self.bits {
            *bit = bit.negate();
        }
    }

    /// Flips a bit the caller has already bounds-checked.
    #[inline]
    pub(crate) fn flip(&mut self, index: usize) {
        self.bits[index] = self.bits[index].negate();
    }

    /// Returns the integer encoding of the row (bit `j` is `(value >> j) & 1`).
    pub fn value(&self) -> u64 {
        assert!(
            self.len() <= Self::MAX_VALUE_WIDTH,
            "Row width should be in the range 0..=64"
        );
        self.bits
            .iter()
            .enumerate()
            .fold(0, |acc, (j, bit)| acc | (bit.as_u8() as u64) << j)
    }

    /// Positions holding 1, in increasing order.
    pub fn ones(&self) -> Vec<usize> {
        self.positions(Bit::One)
    }

    /// Positions holding 0, in increasing order.
    pub fn zeros_positions(&self) -> Vec<usize> {
        self.positions(Bit::Zero)
    }

    fn positions(&self, which: Bit) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|&(_, bit)| bit == which)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns an iterator over the bits.
    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }
}

impl From<Vec<Bit>> for Row {
    fn from(bits: Vec<Bit>) -> Self {
        Self { bits }
    }
}

impl FromIterator<Bit> for Row {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Row {
    type Output = Bit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, bit) in self.bits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", bit)?;
        }
        write!(f, "]")
    }
}
