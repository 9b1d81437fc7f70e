use std::fmt::{Display, Formatter};
use std::sync::Arc;

use log::debug;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::table::{RowCountCheck, TruthTable};

/// Where a gate is composed with the function held by a truth table.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Side {
    /// Gate after the table: every output row is transformed.
    #[default]
    Output,
    /// Gate before the table: the rows are permuted by the gate's input mapping.
    Input,
}

/// Controlled-NOT gate on `width` wires: flips `target` iff every control is 1.
///
/// Gates are immutable and cheap to clone; clones share their control list.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Gate {
    width: usize,
    controls: Arc<[usize]>,
    target: usize,
}

// Constructors
impl Gate {
    /// Creates a gate, checking its geometry.
    ///
    /// Controls are a set: their order is irrelevant and duplicates collapse.
    ///
    /// ```
    /// use rev_rs::gate::Gate;
    ///
    /// assert!(Gate::new(4, [0, 1], 2).is_ok());
    /// assert!(Gate::new(4, [2], 2).is_err()); // target is a control
    /// assert!(Gate::new(4, [0], 4).is_err()); // target out of range
    /// ```
    pub fn new(width: usize, controls: impl IntoIterator<Item = usize>, target: usize) -> Result<Gate> {
        let mut controls: Vec<usize> = controls.into_iter().collect();
        controls.sort_unstable();
        controls.dedup();

        if target >= width || controls.iter().any(|&c| c >= width) || controls.contains(&target) {
            return Err(Error::InvalidGateGeometry {
                width,
                controls,
                target,
            });
        }

        Ok(Gate {
            width,
            controls: controls.into(),
            target,
        })
    }

    /// Uncontrolled NOT on `target`.
    pub fn not(width: usize, target: usize) -> Result<Gate> {
        Gate::new(width, [], target)
    }

    pub fn cnot(width: usize, control: usize, target: usize) -> Result<Gate> {
        Gate::new(width, [control], target)
    }

    pub fn toffoli(width: usize, c1: usize, c2: usize, target: usize) -> Result<Gate> {
        Gate::new(width, [c1, c2], target)
    }
}

// Getters
impl Gate {
    pub fn width(&self) -> usize {
        self.width
    }

    /// Control positions, sorted ascending.
    pub fn controls(&self) -> &[usize] {
        &self.controls
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn controls_num(&self) -> usize {
        self.controls.len()
    }

    pub fn control_mask(&self) -> u64 {
        self.check_value_width();
        self.controls.iter().fold(0, |mask, &c| mask | 1u64 << c)
    }

    pub fn target_mask(&self) -> u64 {
        self.check_value_width();
        1u64 << self.target
    }

    fn check_value_width(&self) {
        assert!(
            self.width <= Row::MAX_VALUE_WIDTH,
            "Gate width should be in the range 0..=64 for integer encoding"
        );
    }
}

// Application
impl Gate {
    fn fires(&self, row: &Row) -> bool {
        self.controls.iter().all(|&c| row[c].is_one())
    }

    /// Applies the gate to `row` in place.
    ///
    /// Fails with [`Error::SizeMismatch`] if the row width differs from the gate width.
    /// Applying the same gate twice restores the row.
    ///
    /// ```
    /// use rev_rs::gate::Gate;
    /// use rev_rs::row::Row;
    ///
    /// let gate = Gate::new(4, [0, 1], 2).unwrap();
    /// let mut row = Row::new([1, 1, 1, 1]).unwrap();
    /// gate.apply(&mut row).unwrap();
    /// assert_eq!(row.to_string(), "[1, 1, 0, 1]");
    /// gate.apply(&mut row).unwrap();
    /// assert_eq!(row.to_string(), "[1, 1, 1, 1]");
    /// ```
    pub fn apply(&self, row: &mut Row) -> Result<()> {
        if row.len() != self.width {
            return Err(Error::SizeMismatch {
                expected: self.width,
                actual: row.len(),
            });
        }
        if self.fires(row) {
            row.flip(self.target);
        }
        Ok(())
    }

    /// Applies the gate to an integer-encoded row.
    pub fn apply_value(&self, value: u64) -> u64 {
        let control_mask = self.control_mask();
        if value & control_mask == control_mask {
            value ^ self.target_mask()
        } else {
            value
        }
    }

    /// Composes the gate with the function held by `tt`.
    ///
    /// With [`Side::Output`] every row goes through the gate. With [`Side::Input`]
    /// the table must be complete; row `i` is replaced by row `gate(i)`.
    pub fn apply_to_table(&self, tt: &mut TruthTable, side: Side) -> Result<()> {
        if tt.width() != self.width {
            return Err(Error::SizeMismatch {
                expected: self.width,
                actual: tt.width(),
            });
        }
        debug!("apply_to_table: {} on {:?} side of {} rows", self, side, tt.len());

        match side {
            Side::Output => {
                for i in 0..tt.len() {
                    let row = tt.row_mut(i)?;
                    if self.fires(row) {
                        row.flip(self.target);
                    }
                }
            }
            Side::Input => {
                if !tt.is_complete() {
                    return Err(Error::RowCountMismatch {
                        expected: RowCountCheck::Canonical.expected_rows(self.width),
                        actual: tt.len(),
                    });
                }
                let control_mask = self.control_mask() as usize;
                let target_mask = self.target_mask() as usize;
                for index in 0..tt.len() {
                    // Each pair is visited once: from the member with the target set.
                    if index & control_mask == control_mask && index & target_mask != 0 {
                        tt.swap(index, index ^ target_mask)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gate(width={}, controls={:?}, target={})", self.width, self.controls, self.target)
    }
}
