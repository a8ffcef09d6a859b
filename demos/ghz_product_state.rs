//! Example running a GHZ-style preparation on a product state.
//! Shows members merging on CNOTs and splitting again after measurement.

use acton::{
    Action, ActOnError, ActResult, CircuitBuilder, ClassicalDataStore, Gate, ProductStateMember, Qid,
    SharedClassicalData, SimulationProductState, SimulationState, Simulator,
};
use rand::rngs::StdRng;

/// Classical backend: every qubit holds a definite bit.
#[derive(Debug, Clone)]
struct Bits {
    qubits: Vec<Qid>,
    values: Vec<bool>,
    classical: SharedClassicalData,
}

impl Bits {
    fn new(qubits: Vec<Qid>, classical: &SharedClassicalData) -> Self {
        let values = vec![false; qubits.len()];
        Self { qubits, values, classical: classical.clone() }
    }

    fn index(&self, qubit: &Qid) -> Option<usize> {
        self.qubits.iter().position(|q| q == qubit)
    }
}

impl SimulationState for Bits {
    fn qubits(&self) -> &[Qid] {
        &self.qubits
    }

    fn act_on_fallback(
        &mut self,
        action: &dyn Action,
        qubits: &[Qid],
        _allow_decompose: bool,
    ) -> Result<ActResult, ActOnError> {
        let Some(idx) = qubits.iter().map(|q| self.index(q)).collect::<Option<Vec<usize>>>() else {
            return Ok(ActResult::NotApplicable);
        };
        match (action.gate(), idx.as_slice()) {
            (Some(Gate::X), &[t]) => self.values[t] = !self.values[t],
            (Some(Gate::CNOT), &[c, t]) => self.values[t] ^= self.values[c],
            (Some(Gate::Measure { key, .. }), _) => {
                let bits = idx.iter().map(|&i| self.values[i]).collect();
                self.classical.borrow_mut().record(key, qubits, bits)?;
            }
            _ => return Ok(ActResult::NotApplicable),
        }
        Ok(ActResult::Applied)
    }
}

impl ProductStateMember for Bits {
    fn kronecker_product(mut self, other: Self) -> Self {
        self.qubits.extend(other.qubits);
        self.values.extend(other.values);
        self
    }

    fn factor(&mut self, qubits: &[Qid]) -> Option<Self> {
        let values: Vec<bool> = qubits.iter().map(|q| self.index(q).map(|i| self.values[i])).collect::<Option<_>>()?;
        let (kept_qubits, kept_values) = self
            .qubits
            .iter()
            .zip(&self.values)
            .filter(|(q, _)| !qubits.contains(q))
            .map(|(q, v)| (*q, *v))
            .unzip();
        self.qubits = kept_qubits;
        self.values = kept_values;
        Some(Self { qubits: qubits.to_vec(), values, classical: self.classical.clone() })
    }

    fn allows_factoring(&self) -> bool {
        true
    }

    fn swap(&mut self, q0: Qid, q1: Qid) {
        if let (Some(a), Some(b)) = (self.index(&q0), self.index(&q1)) {
            self.values.swap(a, b);
        }
    }

    fn rename(&mut self, from: Qid, to: Qid) {
        if let Some(i) = self.index(&from) {
            self.qubits[i] = to;
        }
    }

    fn transpose_to_qubit_order(mut self, qubits: &[Qid]) -> Self {
        let order: Vec<usize> = qubits.iter().filter_map(|q| self.index(q)).collect();
        self.values = order.iter().map(|&i| self.values[i]).collect();
        self.qubits = order.iter().map(|&i| self.qubits[i]).collect();
        self
    }

    fn sample(&mut self, qubits: &[Qid], repetitions: usize, _rng: &mut StdRng) -> Vec<Vec<bool>> {
        let row: Vec<bool> = qubits.iter().map(|q| self.index(q).is_some_and(|i| self.values[i])).collect();
        vec![row; repetitions]
    }
}

fn main() -> Result<(), ActOnError> {
    println!("--- acton Example: GHZ preparation on a product state ---");

    let qubits = Qid::line_range(0, 4);
    let classical = ClassicalDataStore::shared();

    // One member per qubit; measurement splits merged members again.
    let members = qubits.iter().map(|q| Bits::new(vec![*q], &classical)).collect();
    let vacuum = Bits::new(Vec::new(), &classical);
    let mut state = SimulationProductState::new(members, vacuum, qubits.clone(), true)?;

    // --- Build Circuit ---
    let mut builder = CircuitBuilder::new().add_op(Gate::X.on(&qubits[..1])?);
    for pair in qubits.windows(2) {
        builder = builder.add_op(Gate::CNOT.on(pair)?);
    }
    let circuit = builder.add_op(Gate::measure("ghz", qubits.len())?.on(&qubits)?).build();
    println!("\nCircuit Definition:\n{}", circuit);

    // --- Run Simulation ---
    println!("Members before: {}", state.num_members());
    Simulator::new().run(&circuit, &mut state)?;
    println!("Members after measurement: {}", state.num_members());

    println!("\n{}", classical.borrow());
    let samples = state.sample(&[qubits[3], qubits[0]], 3, Some(7))?;
    println!("Samples of [{}, {}]: {:?}", qubits[3], qubits[0], samples);

    println!("\n--- Example Finished ---");
    Ok(())
}
