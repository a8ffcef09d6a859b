// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`acton::operations::GateOperation`).
//!
//! This module provides the `Circuit` structure, an ordered list of operations
//! that `Simulator::run` dispatches one by one.

use crate::core::Qid;
use crate::operations::{Gate, GateOperation};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Represents an ordered sequence of operations applied to a set of qubits.
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    /// The unique qubits touched by the circuit, sorted.
    qubits: BTreeSet<Qid>,

    /// The ordered sequence of operations. Order is dispatch order.
    operations: Vec<GateOperation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single operation to the end of the circuit's sequence.
    ///
    /// The qubits of `op` are added to the circuit's qubit set.
    pub fn add_operation(&mut self, op: GateOperation) {
        self.qubits.extend(op.qubits().iter().copied());
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the circuit's sequence.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = GateOperation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The sorted unique qubits involved in this circuit.
    pub fn qubits(&self) -> Vec<Qid> {
        self.qubits.iter().copied().collect()
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[GateOperation] {
        &self.operations
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: GateOperation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = GateOperation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

/// Per-qubit symbols of `op`, in the operation's qubit order.
fn wire_symbols(op: &GateOperation) -> Vec<String> {
    let n = op.qubits().len();
    let fixed: &[&str] = match op.gate() {
        Gate::CNOT => &["@", "X"],
        Gate::CZ => &["@", "@"],
        Gate::Swap => &["×", "×"],
        Gate::CCX => &["@", "@", "X"],
        Gate::CSwap => &["@", "×", "×"],
        Gate::Measure { .. } => return vec!["M".to_string(); n],
        other => return vec![other.symbol(); n],
    };
    fixed.iter().map(|s| s.to_string()).collect()
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "acton::Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let sorted_qubits = self.qubits();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<Qid, usize> = sorted_qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = sorted_qubits.iter().map(|q| q.to_string().len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // Label + ": "

        const GATE_WIDTH: usize = 9; // e.g., "────H────"
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';
        let wire: String = H_WIRE.to_string().repeat(GATE_WIDTH);

        // op_grid[row][time] holds the segment; v_connect[row][time] the connector below it
        let mut op_grid: Vec<Vec<String>> = vec![vec![wire.clone(); num_ops]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        for (t, op) in ops.iter().enumerate() {
            if op.gate().is_identity() {
                continue; // leave the wire
            }
            let rows: Vec<usize> = op.qubits().iter().filter_map(|q| qubit_to_row.get(q).copied()).collect();
            for (row, symbol) in rows.iter().zip(wire_symbols(op)) {
                op_grid[*row][t] = format_gate(&symbol);
            }
            if let (Some(r_min), Some(r_max)) = (rows.iter().min(), rows.iter().max()) {
                for row_vec in v_connect.iter_mut().take(*r_max).skip(*r_min) {
                    row_vec[t] = V_WIRE;
                }
            }
        }

        writeln!(f, "acton::Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let padding_needed = GATE_WIDTH - 1;
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActOnError;

    #[test]
    fn test_qubits_are_sorted_and_unique() -> Result<(), ActOnError> {
        let circuit = CircuitBuilder::new()
            .add_op(Gate::CNOT.on(&[Qid::line(3), Qid::line(1)])?)
            .add_op(Gate::H.on(&[Qid::line(1)])?)
            .build();
        assert_eq!(circuit.qubits(), vec![Qid::line(1), Qid::line(3)]);
        assert_eq!(circuit.len(), 2);
        assert!(!circuit.is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_display() {
        assert_eq!(Circuit::new().to_string(), "acton::Circuit[0 operations on 0 qubits]\n");
    }

    #[test]
    fn test_display_draws_controls_and_connectors() -> Result<(), ActOnError> {
        let (q0, q1) = (Qid::line(0), Qid::line(1));
        let circuit = CircuitBuilder::new()
            .add_op(Gate::H.on(&[q0])?)
            .add_op(Gate::CNOT.on(&[q0, q1])?)
            .add_op(Gate::measure("m", 2)?.on(&[q0, q1])?)
            .build();
        let text = circuit.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "acton::Circuit[3 operations on 2 qubits]");

        let wire = "─".repeat(9);
        let cell = |sym: &str| format!("────{}────", sym);
        let connector = "    │    ";
        assert_eq!(lines[1], format!("q(0): {}{}{}", cell("H"), cell("@"), cell("M")));
        assert_eq!(lines[2], format!("{}{}{}{}", " ".repeat(6), " ".repeat(9), connector, connector));
        assert_eq!(lines[3], format!("q(1): {}{}{}", wire, cell("X"), cell("M")));
        Ok(())
    }
}
