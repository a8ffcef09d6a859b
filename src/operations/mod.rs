// src/operations/mod.rs

//! Defines the gate vocabulary that actions are built from.
//!
//! A [`Gate`] is a bare gate-like value with no qubits of its own; dispatching
//! it requires the caller to name the qubits. Binding a gate to qubits with
//! [`Gate::on`] yields a [`GateOperation`], which carries its qubits and is
//! dispatched without them.

pub mod matrices;
mod operation;

pub use matrices::Matrix;
pub use operation::GateOperation;

use crate::core::{ActOnError, Qid};
use crate::protocols::Action;
use crate::validation;
use std::fmt;

/// Widest identity [`Gate::unitary`] expands into a dense matrix.
pub const MAX_DENSE_QUBITS: usize = 10;

/// A gate or channel that can be applied to qubits.
///
/// Unitary gates expose their matrix through [`Gate::unitary`]; channels
/// expose Kraus operators through [`Gate::kraus`]. Measurement and reset are
/// non-unitary effects that states recognize by variant.
#[derive(Debug, Clone, PartialEq)] // f64 payloads rule out Eq
pub enum Gate {
    /// Identity over `num_qubits` qubits. Acting with it never changes a state.
    Identity {
        /// Number of qubits the identity spans.
        num_qubits: usize,
    },
    /// Pauli X (bit flip).
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z (phase flip).
    Z,
    /// Hadamard.
    H,
    /// Phase gate, `diag(1, i)`.
    S,
    /// π/8 gate, `diag(1, e^(iπ/4))`.
    T,
    /// Phase shift `diag(1, e^(iθ))`.
    PhaseShift {
        /// The phase angle in radians.
        theta: f64,
    },
    /// Controlled X. Qubit order is `[control, target]`.
    CNOT,
    /// Controlled Z.
    CZ,
    /// Exchanges two qubits.
    Swap,
    /// Toffoli. Qubit order is `[control, control, target]`.
    CCX,
    /// Fredkin. Qubit order is `[control, a, b]`.
    CSwap,
    /// Computational-basis measurement recorded under `key`.
    Measure {
        /// Key the outcome bits are recorded under.
        key: String,
        /// Number of measured qubits.
        num_qubits: usize,
    },
    /// Resets a qubit to |0>.
    Reset,
    /// Flips the qubit with probability `p`. Build with [`Gate::bit_flip`].
    BitFlip {
        /// Flip probability in `[0, 1]`.
        p: f64,
    },
    /// A general channel given by its Kraus operators.
    /// Build with [`Gate::kraus_channel`] so completeness is checked.
    KrausChannel {
        /// Kraus operators, all of the same power-of-two dimension.
        operators: Vec<Matrix>,
    },
}

impl Gate {
    /// Identity over `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Gate::Identity { num_qubits }
    }

    /// Measurement of `num_qubits` qubits recorded under `key`.
    /// Fails with `InvalidGate` for an empty key or zero qubits.
    pub fn measure(key: impl Into<String>, num_qubits: usize) -> Result<Self, ActOnError> {
        let gate = Gate::Measure { key: key.into(), num_qubits };
        validation::validate_gate(&gate)?;
        Ok(gate)
    }

    /// Bit-flip channel. Fails with `InvalidGate` unless `0 <= p <= 1`.
    pub fn bit_flip(p: f64) -> Result<Self, ActOnError> {
        let gate = Gate::BitFlip { p };
        validation::validate_gate(&gate)?;
        Ok(gate)
    }

    /// Kraus channel. Fails with `InvalidGate` if the operators do not share
    /// one power-of-two dimension or do not satisfy `Σ K†K = I`.
    pub fn kraus_channel(operators: Vec<Matrix>) -> Result<Self, ActOnError> {
        let gate = Gate::KrausChannel { operators };
        validation::validate_gate(&gate)?;
        Ok(gate)
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::Identity { num_qubits } | Gate::Measure { num_qubits, .. } => *num_qubits,
            Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::S
            | Gate::T
            | Gate::PhaseShift { .. }
            | Gate::Reset
            | Gate::BitFlip { .. } => 1,
            Gate::CNOT | Gate::CZ | Gate::Swap => 2,
            Gate::CCX | Gate::CSwap => 3,
            Gate::KrausChannel { operators } => operators
                .first()
                .and_then(matrices::qubit_count)
                .unwrap_or(0),
        }
    }

    /// Short symbol used in circuit diagrams.
    pub fn symbol(&self) -> String {
        match self {
            Gate::Identity { .. } => "I".to_string(),
            Gate::X => "X".to_string(),
            Gate::Y => "Y".to_string(),
            Gate::Z => "Z".to_string(),
            Gate::H => "H".to_string(),
            Gate::S => "S".to_string(),
            Gate::T => "T".to_string(),
            Gate::PhaseShift { theta } => format!("P({:.2})", theta),
            Gate::CNOT => "CNOT".to_string(),
            Gate::CZ => "CZ".to_string(),
            Gate::Swap => "SWAP".to_string(),
            Gate::CCX => "CCX".to_string(),
            Gate::CSwap => "CSWAP".to_string(),
            Gate::Measure { key, .. } => format!("M('{}')", key),
            Gate::Reset => "R".to_string(),
            Gate::BitFlip { p } => format!("BF({})", p),
            Gate::KrausChannel { .. } => "K".to_string(),
        }
    }

    /// The unitary matrix of the gate, or `None` for measurements and channels.
    ///
    /// Identities wider than [`MAX_DENSE_QUBITS`] have no dense matrix.
    pub fn unitary(&self) -> Option<Matrix> {
        let m = match self {
            Gate::Identity { num_qubits } if *num_qubits > MAX_DENSE_QUBITS => return None,
            Gate::Identity { num_qubits } => matrices::identity(1usize << num_qubits),
            Gate::X => matrices::pauli_x(),
            Gate::Y => matrices::pauli_y(),
            Gate::Z => matrices::pauli_z(),
            Gate::H => matrices::hadamard(),
            Gate::S => matrices::phase(std::f64::consts::FRAC_PI_2),
            Gate::T => matrices::phase(std::f64::consts::FRAC_PI_4),
            Gate::PhaseShift { theta } => matrices::phase(*theta),
            Gate::CNOT => matrices::controlled(&matrices::pauli_x()),
            Gate::CZ => matrices::controlled(&matrices::pauli_z()),
            Gate::Swap => matrices::swap(),
            Gate::CCX => matrices::controlled(&matrices::controlled(&matrices::pauli_x())),
            Gate::CSwap => matrices::controlled(&matrices::swap()),
            Gate::Measure { .. } | Gate::Reset | Gate::BitFlip { .. } | Gate::KrausChannel { .. } => {
                return None;
            }
        };
        Some(m)
    }

    /// Kraus operators of the gate viewed as a channel.
    /// Unitary gates yield their single unitary; measurement yields `None`.
    pub fn kraus(&self) -> Option<Vec<Matrix>> {
        match self {
            Gate::KrausChannel { operators } => Some(operators.clone()),
            Gate::BitFlip { p } => Some(vec![
                matrices::scale(&matrices::identity(2), (1.0 - p).sqrt()),
                matrices::scale(&matrices::pauli_x(), p.sqrt()),
            ]),
            Gate::Reset => {
                // |0><0| and |0><1|
                let mut k0 = matrices::zeros(2);
                k0[0][0] = num_complex::Complex64::new(1.0, 0.0);
                let mut k1 = matrices::zeros(2);
                k1[0][1] = num_complex::Complex64::new(1.0, 0.0);
                Some(vec![k0, k1])
            }
            Gate::Measure { .. } => None,
            unitary => unitary.unitary().map(|u| vec![u]),
        }
    }

    /// Whether the gate is unitary.
    pub fn is_unitary(&self) -> bool {
        !matches!(self, Gate::Measure { .. } | Gate::Reset | Gate::BitFlip { .. } | Gate::KrausChannel { .. })
    }

    /// Whether the gate is the identity.
    pub fn is_identity(&self) -> bool {
        matches!(self, Gate::Identity { .. })
    }

    /// Whether the gate is a measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }

    /// Whether the gate is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self, Gate::Reset)
    }

    /// Binds the gate to `qubits`, producing an operation.
    ///
    /// Fails with `InvalidGate` if the qubit count does not match
    /// [`Gate::num_qubits`] or a qubit repeats.
    pub fn on(&self, qubits: &[Qid]) -> Result<GateOperation, ActOnError> {
        GateOperation::new(self.clone(), qubits.to_vec())
    }

    /// Decomposes the gate, applied to `qubits`, into simpler operations.
    ///
    /// Returns `None` when the gate has no decomposition or `qubits` has the
    /// wrong length. The identity decomposes into nothing.
    pub fn decompose(&self, qubits: &[Qid]) -> Option<Vec<GateOperation>> {
        if qubits.len() != self.num_qubits() {
            return None;
        }
        let ops = match (self, qubits) {
            (Gate::Identity { .. }, _) => Vec::new(),
            (Gate::Swap, &[a, b]) => vec![
                GateOperation::from_parts(Gate::CNOT, vec![a, b]),
                GateOperation::from_parts(Gate::CNOT, vec![b, a]),
                GateOperation::from_parts(Gate::CNOT, vec![a, b]),
            ],
            (Gate::CZ, &[a, b]) => vec![
                GateOperation::from_parts(Gate::H, vec![b]),
                GateOperation::from_parts(Gate::CNOT, vec![a, b]),
                GateOperation::from_parts(Gate::H, vec![b]),
            ],
            (Gate::CSwap, &[c, a, b]) => vec![
                GateOperation::from_parts(Gate::CNOT, vec![b, a]),
                GateOperation::from_parts(Gate::CCX, vec![c, a, b]),
                GateOperation::from_parts(Gate::CNOT, vec![b, a]),
            ],
            _ => return None,
        };
        Some(ops)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// A bare gate names no qubits, so the caller must supply them to `act_on`.
impl Action for Gate {
    fn qubits(&self) -> Option<&[Qid]> {
        None
    }

    fn gate(&self) -> Option<&Gate> {
        Some(self)
    }

    fn decompose(&self, qubits: &[Qid]) -> Option<Vec<GateOperation>> {
        Gate::decompose(self, qubits)
    }
}
