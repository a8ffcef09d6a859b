//! Shared test states for acton integration tests.

use acton::{
    act_on_from_decomposition, Action, ActOnError, ActResult, ClassicalDataStore, Gate, ProductStateMember, Qid,
    SharedClassicalData, SimulationProductState, SimulationState,
};
use rand::rngs::StdRng;
use rand::Rng;

// ==================== Scripted State ====================

/// A state whose fallback answers with a fixed result and records each call.
#[derive(Debug)]
#[allow(dead_code)]
pub struct DummySimulationState {
    pub fallback_result: ActResult,
    pub calls: Vec<(Vec<Qid>, bool)>,
}

#[allow(dead_code)]
impl DummySimulationState {
    pub fn new(fallback_result: ActResult) -> Self {
        Self { fallback_result, calls: Vec::new() }
    }
}

impl SimulationState for DummySimulationState {
    fn qubits(&self) -> &[Qid] {
        &[]
    }

    fn act_on_fallback(
        &mut self,
        _action: &dyn Action,
        qubits: &[Qid],
        allow_decompose: bool,
    ) -> Result<ActResult, ActOnError> {
        self.calls.push((qubits.to_vec(), allow_decompose));
        Ok(self.fallback_result)
    }
}

// ==================== Classical Bit Register ====================

/// A computational-basis state: one classical bit per qubit.
///
/// Handles permutation gates, phase gates (no-ops on basis states),
/// measurement and reset. Other gates are decomposed when allowed.
#[derive(Debug, Clone)]
pub struct BitRegister {
    qubits: Vec<Qid>,
    bits: Vec<bool>,
    classical: SharedClassicalData,
    readout_error: f64,
    factorable: bool,
}

#[allow(dead_code)]
impl BitRegister {
    /// All qubits start in |0>.
    pub fn new(qubits: Vec<Qid>, classical: SharedClassicalData) -> Self {
        let bits = vec![false; qubits.len()];
        Self { qubits, bits, classical, readout_error: 0.0, factorable: true }
    }

    /// Sampling flips each bit with probability `p`.
    pub fn with_readout_error(mut self, p: f64) -> Self {
        self.readout_error = p;
        self
    }

    pub fn without_factoring(mut self) -> Self {
        self.factorable = false;
        self
    }

    pub fn bit(&self, qubit: &Qid) -> Option<bool> {
        self.index(qubit).map(|i| self.bits[i])
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    fn index(&self, qubit: &Qid) -> Option<usize> {
        self.qubits.iter().position(|q| q == qubit)
    }

    /// `Ok(None)` when the gate is not native to the register.
    fn apply_gate(&mut self, gate: &Gate, idx: &[usize]) -> Result<Option<ActResult>, ActOnError> {
        match (gate, idx) {
            (Gate::Identity { .. }, _)
            | (Gate::Z | Gate::S | Gate::T | Gate::PhaseShift { .. }, [_])
            | (Gate::CZ, [_, _]) => {}
            (Gate::X, &[t]) => self.bits[t] = !self.bits[t],
            (Gate::CNOT, &[c, t]) => {
                if self.bits[c] {
                    self.bits[t] = !self.bits[t];
                }
            }
            (Gate::CCX, &[c0, c1, t]) => {
                if self.bits[c0] && self.bits[c1] {
                    self.bits[t] = !self.bits[t];
                }
            }
            (Gate::Swap, &[a, b]) => self.bits.swap(a, b),
            (Gate::Reset, &[t]) => self.bits[t] = false,
            (Gate::Measure { key, .. }, _) => {
                let outcome: Vec<bool> = idx.iter().map(|&i| self.bits[i]).collect();
                let qubits: Vec<Qid> = idx.iter().map(|&i| self.qubits[i]).collect();
                self.classical.borrow_mut().record(key, &qubits, outcome)?;
            }
            _ => return Ok(None),
        }
        Ok(Some(ActResult::Applied))
    }
}

impl SimulationState for BitRegister {
    fn qubits(&self) -> &[Qid] {
        &self.qubits
    }

    fn act_on_fallback(
        &mut self,
        action: &dyn Action,
        qubits: &[Qid],
        allow_decompose: bool,
    ) -> Result<ActResult, ActOnError> {
        let Some(gate) = action.gate() else {
            return Ok(ActResult::NotApplicable);
        };
        let Some(idx) = qubits.iter().map(|q| self.index(q)).collect::<Option<Vec<usize>>>() else {
            return Ok(ActResult::NotApplicable);
        };
        if let Some(result) = self.apply_gate(gate, &idx)? {
            return Ok(result);
        }
        act_on_from_decomposition(action, self, qubits, allow_decompose)
    }
}

impl ProductStateMember for BitRegister {
    fn kronecker_product(mut self, other: Self) -> Self {
        self.qubits.extend(other.qubits);
        self.bits.extend(other.bits);
        self.factorable &= other.factorable;
        self
    }

    fn factor(&mut self, qubits: &[Qid]) -> Option<Self> {
        let idx: Vec<usize> = qubits.iter().map(|q| self.index(q)).collect::<Option<_>>()?;
        let bits: Vec<bool> = idx.iter().map(|&i| self.bits[i]).collect();
        let (kept_qubits, kept_bits): (Vec<Qid>, Vec<bool>) = self
            .qubits
            .iter()
            .zip(&self.bits)
            .filter(|(q, _)| !qubits.contains(q))
            .map(|(q, b)| (*q, *b))
            .unzip();
        self.qubits = kept_qubits;
        self.bits = kept_bits;
        Some(Self {
            qubits: qubits.to_vec(),
            bits,
            classical: self.classical.clone(),
            readout_error: self.readout_error,
            factorable: self.factorable,
        })
    }

    fn allows_factoring(&self) -> bool {
        self.factorable
    }

    fn swap(&mut self, q0: Qid, q1: Qid) {
        if let (Some(a), Some(b)) = (self.index(&q0), self.index(&q1)) {
            self.bits.swap(a, b);
        }
    }

    fn rename(&mut self, from: Qid, to: Qid) {
        if let Some(i) = self.index(&from) {
            self.qubits[i] = to;
        }
    }

    fn transpose_to_qubit_order(mut self, qubits: &[Qid]) -> Self {
        let bits: Vec<bool> = qubits.iter().filter_map(|q| self.bit(q)).collect();
        self.qubits = qubits.iter().filter(|q| self.index(q).is_some()).copied().collect();
        self.bits = bits;
        self
    }

    fn sample(&mut self, qubits: &[Qid], repetitions: usize, rng: &mut StdRng) -> Vec<Vec<bool>> {
        (0..repetitions)
            .map(|_| {
                qubits
                    .iter()
                    .map(|q| {
                        let bit = self.bit(q).unwrap_or(false);
                        bit ^ (rng.random::<f64>() < self.readout_error)
                    })
                    .collect()
            })
            .collect()
    }
}

// ==================== Helpers ====================

#[allow(dead_code)]
pub fn q(x: i64) -> Qid {
    Qid::line(x)
}

/// A product state with one single-qubit member per qubit.
#[allow(dead_code)]
pub fn bit_product_state(
    qubits: &[Qid],
    classical: &SharedClassicalData,
    split_untangled_states: bool,
) -> Result<SimulationProductState<BitRegister>, ActOnError> {
    let members = qubits.iter().map(|qb| BitRegister::new(vec![*qb], classical.clone())).collect();
    let vacuum = BitRegister::new(Vec::new(), classical.clone());
    SimulationProductState::new(members, vacuum, qubits.to_vec(), split_untangled_states)
}

#[allow(dead_code)]
pub fn new_classical() -> SharedClassicalData {
    ClassicalDataStore::shared()
}
