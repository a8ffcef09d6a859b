// src/operations/matrices.rs

//! Matrix data for the built-in gates.
//!
//! Matrices are dense, row-major `Vec<Vec<Complex64>>` acting on the
//! computational basis of the gate's qubits, with the first qubit as the most
//! significant bit (`|q0 q1 ...>`).

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense row-major complex matrix.
pub type Matrix = Vec<Vec<Complex64>>;

/// `dim x dim` identity.
pub fn identity(dim: usize) -> Matrix {
    let mut m = zeros(dim);
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = Complex64::one();
    }
    m
}

/// `dim x dim` zero matrix.
pub fn zeros(dim: usize) -> Matrix {
    vec![vec![Complex64::zero(); dim]; dim]
}

pub(crate) fn pauli_x() -> Matrix {
    vec![
        vec![Complex64::zero(), Complex64::one()],
        vec![Complex64::one(), Complex64::zero()],
    ]
}

pub(crate) fn pauli_y() -> Matrix {
    let i = Complex64::i();
    vec![
        vec![Complex64::zero(), -i],
        vec![i, Complex64::zero()],
    ]
}

pub(crate) fn pauli_z() -> Matrix {
    vec![
        vec![Complex64::one(), Complex64::zero()],
        vec![Complex64::zero(), -Complex64::one()],
    ]
}

pub(crate) fn hadamard() -> Matrix {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    vec![vec![h, h], vec![h, -h]]
}

/// `diag(1, e^(i*theta))`
pub(crate) fn phase(theta: f64) -> Matrix {
    vec![
        vec![Complex64::one(), Complex64::zero()],
        vec![Complex64::zero(), Complex64::from_polar(1.0, theta)],
    ]
}

pub(crate) fn swap() -> Matrix {
    let mut m = zeros(4);
    m[0][0] = Complex64::one();
    m[1][2] = Complex64::one(); // |01> -> |10>
    m[2][1] = Complex64::one(); // |10> -> |01>
    m[3][3] = Complex64::one();
    m
}

/// Adds one control qubit in front of `u`: `|0><0| ⊗ I + |1><1| ⊗ u`.
pub(crate) fn controlled(u: &Matrix) -> Matrix {
    let n = u.len();
    let mut m = identity(2 * n);
    for (r, row) in u.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            m[n + r][n + c] = *value;
        }
    }
    m
}

/// Conjugate transpose.
pub fn dagger(m: &Matrix) -> Matrix {
    let rows = m.len();
    let cols = m.first().map_or(0, Vec::len);
    let mut out = vec![vec![Complex64::zero(); rows]; cols];
    for (r, row) in m.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            out[c][r] = value.conj();
        }
    }
    out
}

/// Matrix product `a * b`. Shapes are assumed compatible.
pub fn matmul(a: &Matrix, b: &Matrix) -> Matrix {
    let inner = b.len();
    let cols = b.first().map_or(0, Vec::len);
    a.iter()
        .map(|row| {
            (0..cols)
                .map(|c| (0..inner).map(|k| row[k] * b[k][c]).sum())
                .collect()
        })
        .collect()
}

/// Multiplies every entry by `factor`.
pub(crate) fn scale(m: &Matrix, factor: f64) -> Matrix {
    m.iter().map(|row| row.iter().map(|v| *v * factor).collect()).collect()
}

/// Whether `m` is square with a power-of-two side, returning the qubit count.
pub(crate) fn qubit_count(m: &Matrix) -> Option<usize> {
    let dim = m.len();
    if dim == 0 || !dim.is_power_of_two() || m.iter().any(|row| row.len() != dim) {
        return None;
    }
    Some(dim.trailing_zeros() as usize)
}
