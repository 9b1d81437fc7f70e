//! # rev-rs: truth tables and reversible gates in Rust
//!
//! **`rev-rs`** is a small library for the data model behind reversible-circuit
//! design tools: fixed-width bit rows, truth tables enumerating every row of a
//! given width, and controlled-NOT gates that flip one bit of a row when all
//! of their control bits are set.
//!
//! ## Key Features
//!
//! - **Checked everywhere**: every index, bit value and gate geometry is validated before anything is mutated; failures are reported as [`Error`][crate::error::Error].
//! - **Canonical order**: [`TruthTable::new`][crate::table::TruthTable::new] lists the rows of width `n` so that row `i` is the binary expansion of `i`, least significant bit first.
//! - **Reversible by construction**: every [`Gate`][crate::gate::Gate] is its own inverse, so a [`Circuit`][crate::circuit::Circuit] followed by its reversed copy is the identity.
//!
//! ## Basic Usage
//!
//! ```rust
//! use rev_rs::gate::Gate;
//! use rev_rs::row::Row;
//! use rev_rs::table::TruthTable;
//!
//! // 1. Enumerate all rows of width 2
//! let tt = TruthTable::new(2);
//! assert_eq!(tt.to_string(), "[0, 0]\n[1, 0]\n[0, 1]\n[1, 1]");
//!
//! // 2. Flip bit 2 whenever bits 0 and 1 are both set
//! let gate = Gate::new(4, [0, 1], 2).unwrap();
//! let mut row = Row::new([1, 1, 1, 1]).unwrap();
//! gate.apply(&mut row).unwrap();
//! assert_eq!(row.to_string(), "[1, 1, 0, 1]");
//!
//! // 3. The gate is an involution
//! gate.apply(&mut row).unwrap();
//! assert_eq!(row.to_string(), "[1, 1, 1, 1]");
//! ```
//!
//! ## Core Components
//!
//! - **[`row`]**: the fixed-width bit vector.
//! - **[`table`]**: truth tables, wholesale replacement and row/column negation.
//! - **[`gate`]**: controlled-NOT gates applied to rows and tables.
//! - **[`circuit`]**: ordered gate sequences and their inverses.

pub mod bit;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod row;
pub mod table;
