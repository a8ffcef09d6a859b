// src/operations/operation.rs

use super::Gate;
use crate::core::{ActOnError, Qid};
use crate::protocols::Action;
use crate::validation;
use std::fmt;

/// A gate bound to the ordered qubits it acts on.
///
/// Operations carry their own qubits, so `act_on` must be called without
/// explicit qubits for them.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOperation {
    gate: Gate,
    qubits: Vec<Qid>,
}

impl GateOperation {
    /// Binds `gate` to `qubits`.
    ///
    /// # Errors
    /// `InvalidGate` if the qubit count does not match the gate, if a qubit
    /// appears twice, or if the gate data fails validation.
    pub fn new(gate: Gate, qubits: Vec<Qid>) -> Result<Self, ActOnError> {
        validation::validate_gate(&gate)?;
        if qubits.len() != gate.num_qubits() {
            return Err(ActOnError::invalid_gate(format!(
                "Gate {} acts on {} qubit(s) but was given {}",
                gate,
                gate.num_qubits(),
                qubits.len()
            )));
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(ActOnError::invalid_gate(format!("Duplicate qubit {} in operation {}", q, gate)));
            }
        }
        Ok(Self { gate, qubits })
    }

    /// Builds without checks; callers guarantee the arity.
    pub(crate) fn from_parts(gate: Gate, qubits: Vec<Qid>) -> Self {
        Self { gate, qubits }
    }

    /// The gate of this operation.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// The ordered qubits of this operation.
    pub fn qubits(&self) -> &[Qid] {
        &self.qubits
    }

    /// The same gate on different qubits.
    pub fn with_qubits(&self, qubits: &[Qid]) -> Result<Self, ActOnError> {
        Self::new(self.gate.clone(), qubits.to_vec())
    }
}

impl fmt::Display for GateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.qubits.iter().map(|q| q.to_string()).collect();
        write!(f, "{}({})", self.gate, names.join(", "))
    }
}

impl Action for GateOperation {
    fn qubits(&self) -> Option<&[Qid]> {
        Some(&self.qubits)
    }

    fn gate(&self) -> Option<&Gate> {
        Some(&self.gate)
    }

    fn decompose(&self, _qubits: &[Qid]) -> Option<Vec<GateOperation>> {
        self.gate.decompose(&self.qubits)
    }
}
