// src/validation/mod.rs

//! Contract checks on gate data.
//!
//! Gates handed to a backend must be internally consistent: unitary matrices
//! must be unitary, Kraus sets must be complete and probabilities must lie in
//! `[0, 1]`. Checks return `ActOnError::InvalidGate` on failure.

use crate::core::ActOnError;
use crate::operations::matrices::{self, Matrix};
use crate::operations::Gate;

// Default tolerance (can be overridden by caller)
const DEFAULT_TOLERANCE: f64 = 1e-9;

// --- Helper Functions ---

/// Largest entry-wise distance between two equally shaped matrices.
fn max_deviation(a: &Matrix, b: &Matrix) -> f64 {
    a.iter()
        .zip(b)
        .flat_map(|(ra, rb)| ra.iter().zip(rb).map(|(x, y)| (x - y).norm()))
        .fold(0.0, f64::max)
}

// --- Public Validation Functions ---

/// Checks that `matrix` is square with a power-of-two side and `U†U ≈ I`.
///
/// # Arguments
/// * `matrix` - The matrix to check.
/// * `tolerance` - Allowed entry-wise deviation from the identity (default 1e-9).
///
/// # Returns
/// * `Ok(qubits)` with the number of qubits the matrix acts on.
/// * `Err(ActOnError::InvalidGate)` otherwise.
pub fn check_unitary(matrix: &Matrix, tolerance: Option<f64>) -> Result<usize, ActOnError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let qubits = matrices::qubit_count(matrix).ok_or_else(|| {
        ActOnError::invalid_gate(format!("Matrix of {} row(s) is not a square power-of-two matrix", matrix.len()))
    })?;
    let product = matrices::matmul(&matrices::dagger(matrix), matrix);
    let deviation = max_deviation(&product, &matrices::identity(matrix.len()));
    if deviation > tolerance {
        return Err(ActOnError::invalid_gate(format!(
            "Matrix is not unitary: |U†U - I| = {:.3e} (> {})",
            deviation, tolerance
        )));
    }
    Ok(qubits)
}

/// Checks that `operators` share one power-of-two dimension and `Σ K†K ≈ I`.
///
/// # Returns
/// * `Ok(qubits)` with the number of qubits the channel acts on.
/// * `Err(ActOnError::InvalidGate)` otherwise.
pub fn check_kraus_completeness(operators: &[Matrix], tolerance: Option<f64>) -> Result<usize, ActOnError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let first = operators
        .first()
        .ok_or_else(|| ActOnError::invalid_gate("A Kraus channel needs at least one operator"))?;
    let qubits = matrices::qubit_count(first).ok_or_else(|| {
        ActOnError::invalid_gate("Kraus operators must be square power-of-two matrices")
    })?;
    let dim = first.len();
    if operators.iter().any(|k| matrices::qubit_count(k) != Some(qubits)) {
        return Err(ActOnError::invalid_gate("Kraus operators must all have the same dimension"));
    }

    let mut sum = matrices::zeros(dim);
    for k in operators {
        let term = matrices::matmul(&matrices::dagger(k), k);
        for (row_sum, row_term) in sum.iter_mut().zip(term) {
            for (s, t) in row_sum.iter_mut().zip(row_term) {
                *s += t;
            }
        }
    }
    let deviation = max_deviation(&sum, &matrices::identity(dim));
    if deviation > tolerance {
        return Err(ActOnError::invalid_gate(format!(
            "Kraus operators are not complete: |ΣK†K - I| = {:.3e} (> {})",
            deviation, tolerance
        )));
    }
    Ok(qubits)
}

/// Performs the checks that apply to `gate` with default tolerances.
///
/// # Returns
/// * `Ok(())` if the gate data is consistent.
/// * `Err(ActOnError::InvalidGate)` describing the first failed check.
pub fn validate_gate(gate: &Gate) -> Result<(), ActOnError> {
    match gate {
        Gate::BitFlip { p } => {
            if !(0.0..=1.0).contains(p) {
                return Err(ActOnError::invalid_gate(format!("Bit-flip probability {} is outside [0, 1]", p)));
            }
            Ok(())
        }
        Gate::KrausChannel { operators } => check_kraus_completeness(operators, None).map(|_| ()),
        // Unitary by construction, at any width
        Gate::Identity { .. } => Ok(()),
        Gate::Measure { key, num_qubits } => {
            if key.is_empty() {
                return Err(ActOnError::invalid_gate("Measurement key cannot be empty"));
            }
            if *num_qubits == 0 {
                return Err(ActOnError::invalid_gate(format!("Measurement '{}' must measure at least one qubit", key)));
            }
            Ok(())
        }
        other => match other.unitary() {
            Some(u) => check_unitary(&u, None).map(|_| ()),
            None => Ok(()),
        },
    }
}
