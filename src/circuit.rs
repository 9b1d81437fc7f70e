//! Reversible circuits: ordered sequences of controlled-NOT gates.
//!
//! A [`Circuit`] applies its gates left to right. Every [`Gate`] is an
//! involution, so running a circuit and then its [`reversed`][Circuit::reversed]
//! copy is the identity on every row.
//!
//! ```
//! use rev_rs::circuit::Circuit;
//! use rev_rs::gate::Gate;
//! use rev_rs::row::Row;
//!
//! let mut circuit = Circuit::new();
//! circuit.push(Gate::cnot(3, 0, 1)?)?;
//! circuit.push(Gate::toffoli(3, 0, 1, 2)?)?;
//!
//! let mut row = Row::new([1, 0, 0])?;
//! circuit.apply(&mut row)?;
//! assert_eq!(row.to_string(), "[1, 1, 1]");
//!
//! circuit.reversed().apply(&mut row)?;
//! assert_eq!(row.to_string(), "[1, 0, 0]");
//! # Ok::<(), rev_rs::error::Error>(())
//! ```

use std::collections::VecDeque;
use std::fmt::{Display, Formatter, Write};

use log::debug;

use crate::error::{Error, Result};
use crate::gate::{Gate, Side};
use crate::row::Row;
use crate::table::TruthTable;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Circuit {
    gates: VecDeque<Gate>,
}

impl Circuit {
    /// Creates an empty circuit. Its width is fixed by the first gate added.
    pub fn new() -> Self {
        Self {
            gates: VecDeque::new(),
        }
    }

    /// Creates a circuit from a sequence of gates, which must all share one width.
    pub fn from_gates(gates: impl IntoIterator<Item = Gate>) -> Result<Self> {
        let mut circuit = Self::new();
        for gate in gates {
            circuit.push(gate)?;
        }
        debug!(
            "from_gates: {} gates of width {:?}",
            circuit.len(),
            circuit.width()
        );
        Ok(circuit)
    }
}

impl Circuit {
    /// Width shared by all gates, or `None` for an empty circuit.
    pub fn width(&self) -> Option<usize> {
        self.gates.front().map(Gate::width)
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn gates(&self) -> impl DoubleEndedIterator<Item = &Gate> + ExactSizeIterator {
        self.gates.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Total number of control taps over all gates.
    pub fn controls_num(&self) -> usize {
        self.gates.iter().map(Gate::controls_num).sum()
    }

    fn check_width(&self, gate: &Gate) -> Result<()> {
        match self.width() {
            Some(width) if width != gate.width() => Err(Error::WidthMismatch {
                expected: width,
                actual: gate.width(),
            }),
            _ => Ok(()),
        }
    }

    /// Appends a gate at the end of the circuit.
    pub fn push(&mut self, gate: Gate) -> Result<()> {
        self.check_width(&gate)?;
        self.gates.push_back(gate);
        Ok(())
    }

    /// Prepends a gate at the start of the circuit.
    pub fn push_front(&mut self, gate: Gate) -> Result<()> {
        self.check_width(&gate)?;
        self.gates.push_front(gate);
        Ok(())
    }

    /// Appends all gates of `other`, keeping their order.
    pub fn extend(&mut self, other: &Circuit) -> Result<()> {
        if let Some(gate) = other.gates.front() {
            self.check_width(gate)?;
        }
        self.gates.extend(other.gates.iter().cloned());
        Ok(())
    }

    /// Prepends all gates of `other`, keeping their order.
    pub fn extend_front(&mut self, other: &Circuit) -> Result<()> {
        if let Some(gate) = other.gates.front() {
            self.check_width(gate)?;
        }
        for gate in other.gates.iter().rev() {
            self.gates.push_front(gate.clone());
        }
        Ok(())
    }

    /// The same gates in opposite order: the inverse circuit.
    pub fn reversed(&self) -> Circuit {
        Circuit {
            gates: self.gates.iter().rev().cloned().collect(),
        }
    }
}

// Application
impl Circuit {
    /// Applies every gate to `row`, first to last.
    ///
    /// The width is checked up front, so a failing call leaves `row` untouched.
    pub fn apply(&self, row: &mut Row) -> Result<()> {
        if let Some(width) = self.width() {
            if row.len() != width {
                return Err(Error::SizeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        for gate in &self.gates {
            gate.apply(row)?;
        }
        Ok(())
    }

    pub fn apply_value(&self, value: u64) -> u64 {
        self.gates.iter().fold(value, |v, gate| gate.apply_value(v))
    }

    /// Composes the circuit with the function held by `tt` (see [`Gate::apply_to_table`]).
    pub fn apply_to_table(&self, tt: &mut TruthTable, side: Side) -> Result<()> {
        if let Some(width) = self.width() {
            if tt.width() != width {
                return Err(Error::SizeMismatch {
                    expected: width,
                    actual: tt.width(),
                });
            }
        }
        debug!(
            "apply_to_table: {} gates on {:?} side of {} rows",
            self.len(),
            side,
            tt.len()
        );
        match side {
            Side::Output => {
                for gate in &self.gates {
                    gate.apply_to_table(tt, side)?;
                }
            }
            Side::Input => {
                // The last gate sees the table's inputs first.
                for gate in self.gates.iter().rev() {
                    gate.apply_to_table(tt, side)?;
                }
            }
        }
        Ok(())
    }

    /// Output truth table of the circuit, or `None` if the circuit is empty.
    ///
    /// # Panics
    ///
    /// Panics if the circuit is wider than [`TruthTable::MAX_WIDTH`].
    pub fn truth_table(&self) -> Option<TruthTable> {
        let mut tt = TruthTable::new(self.width()?);
        // Output side on a canonical table of the circuit's own width never fails.
        self.apply_to_table(&mut tt, Side::Output).ok()?;
        Some(tt)
    }

    /// Wire diagram: one line per wire, one column per gate.
    ///
    /// `O` marks a control, `X` the target, `-` an untouched wire.
    pub fn diagram(&self) -> String {
        self.to_string()
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for wire in 0..self.width().unwrap_or(0) {
            if wire > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: ", wire)?;
            for gate in &self.gates {
                let symbol = if gate.controls().contains(&wire) {
                    'O'
                } else if gate.target() == wire {
                    'X'
                } else {
                    '-'
                };
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = std::collections::vec_deque::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn sample() -> Circuit {
        Circuit::from_gates([
            Gate::cnot(3, 0, 1).unwrap(),
            Gate::toffoli(3, 0, 1, 2).unwrap(),
            Gate::not(3, 0).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty() {
        let circuit = Circuit::new();
        assert!(circuit.is_empty());
        assert_eq!(circuit.width(), None);
        assert_eq!(circuit.truth_table(), None);
        assert_eq!(circuit.diagram(), "");

        // An empty circuit is the identity on rows of any width.
        let mut row = Row::new([1, 0]).unwrap();
        circuit.apply(&mut row).unwrap();
        assert_eq!(row, Row::new([1, 0]).unwrap());
    }

    #[test]
    fn test_independent_construction() {
        let mut a = Circuit::new();
        let b = Circuit::new();
        a.push(Gate::not(2, 0).unwrap()).unwrap();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());

        let mut c = Circuit::default();
        c.push(Gate::not(5, 4).unwrap()).unwrap();
        assert_eq!(c.width(), Some(5));
        assert_eq!(Circuit::default().len(), 0);
    }

    #[test]
    fn test_width_mismatch() {
        let mut circuit = Circuit::new();
        circuit.push(Gate::not(3, 0).unwrap()).unwrap();
        assert_eq!(
            circuit.push(Gate::not(4, 0).unwrap()),
            Err(Error::WidthMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert_eq!(
            circuit.push_front(Gate::not(2, 0).unwrap()),
            Err(Error::WidthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(circuit.len(), 1);

        let res = Circuit::from_gates([Gate::not(2, 0).unwrap(), Gate::not(3, 0).unwrap()]);
        assert!(matches!(res, Err(Error::WidthMismatch { .. })));
    }

    #[test]
    fn test_apply_in_order() {
        let circuit = sample();
        let mut row = Row::new([1, 0, 0]).unwrap();
        circuit.apply(&mut row).unwrap();
        // cnot: [1,1,0], toffoli: [1,1,1], not: [0,1,1]
        assert_eq!(row, Row::new([0, 1, 1]).unwrap());
    }

    #[test]
    fn test_apply_size_mismatch() {
        let circuit = sample();
        let mut row = Row::new([1, 1]).unwrap();
        assert!(matches!(circuit.apply(&mut row), Err(Error::SizeMismatch { .. })));
        assert_eq!(row, Row::new([1, 1]).unwrap());
    }

    #[test]
    fn test_reversed_is_inverse() {
        let circuit = sample();
        let inverse = circuit.reversed();
        for v in 0..8 {
            let original = Row::from_value(3, v);
            let mut row = original.clone();
            circuit.apply(&mut row).unwrap();
            inverse.apply(&mut row).unwrap();
            assert_eq!(row, original);
        }
    }

    #[test]
    fn test_push_front_and_extend() {
        let g0 = Gate::cnot(2, 0, 1).unwrap();
        let g1 = Gate::cnot(2, 1, 0).unwrap();
        let g2 = Gate::not(2, 1).unwrap();

        let mut circuit = Circuit::new();
        circuit.push(g1.clone()).unwrap();
        circuit.push_front(g0.clone()).unwrap();
        assert_eq!(circuit.get(0), Some(&g0));
        assert_eq!(circuit.get(1), Some(&g1));

        let tail = Circuit::from_gates([g2.clone()]).unwrap();
        circuit.extend(&tail).unwrap();
        circuit.extend_front(&tail).unwrap();
        let order: Vec<&Gate> = circuit.gates().collect();
        assert_eq!(order, vec![&g2, &g0, &g1, &g2]);
        assert_eq!(circuit.controls_num(), 2);
    }

    #[test]
    fn test_truth_table() {
        let circuit = sample();
        let tt = circuit.truth_table().unwrap();
        assert!(tt.is_reversible());
        for (input, output) in tt.iter().enumerate() {
            assert_eq!(output.value(), circuit.apply_value(input as u64));
        }

        let inverse = circuit.reversed().truth_table().unwrap();
        assert_eq!(tt.inverse().unwrap(), inverse);
    }

    #[test]
    fn test_apply_to_table_sides() {
        let circuit = sample();

        let mut back = TruthTable::new(3);
        circuit.apply_to_table(&mut back, Side::Output).unwrap();
        let mut front = TruthTable::new(3);
        circuit.apply_to_table(&mut front, Side::Input).unwrap();

        assert_eq!(back, front);
        assert_eq!(Some(back), circuit.truth_table());
    }

    #[test]
    fn test_diagram() {
        let circuit = sample();
        assert_eq!(circuit.diagram(), "0: OOX\n1: XO-\n2: -X-");
        assert_eq!(circuit.to_string(), circuit.diagram());
    }
}
