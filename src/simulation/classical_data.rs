// src/simulation/classical_data.rs
use crate::core::{ActOnError, Qid};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Handle to a classical data store shared by the sub-states of one simulation.
pub type SharedClassicalData = Rc<RefCell<ClassicalDataStore>>;

/// Measurement records written while acting on a simulation state.
///
/// Each key maps to the qubits it measures and the list of outcomes, in the
/// order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassicalDataStore {
    records: BTreeMap<String, MeasurementRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MeasurementRecord {
    qubits: Vec<Qid>,
    outcomes: Vec<Vec<bool>>,
}

impl ClassicalDataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store behind a shared handle.
    pub fn shared() -> SharedClassicalData {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Records the outcome `bits` of measuring `qubits` under `key`.
    ///
    /// # Errors
    /// `Configuration` if `bits` and `qubits` differ in length, or if `key`
    /// was previously recorded for a different number of qubits.
    pub fn record(&mut self, key: &str, qubits: &[Qid], bits: Vec<bool>) -> Result<(), ActOnError> {
        if bits.len() != qubits.len() {
            return Err(ActOnError::configuration(format!(
                "Measurement '{}' produced {} bit(s) for {} qubit(s)",
                key,
                bits.len(),
                qubits.len()
            )));
        }
        match self.records.get_mut(key) {
            Some(record) if record.qubits.len() != qubits.len() => Err(ActOnError::configuration(format!(
                "Measurement key '{}' was recorded for {} qubit(s) before, now {}",
                key,
                record.qubits.len(),
                qubits.len()
            ))),
            Some(record) => {
                record.outcomes.push(bits);
                Ok(())
            }
            None => {
                self.records.insert(key.to_string(), MeasurementRecord {
                    qubits: qubits.to_vec(),
                    outcomes: vec![bits],
                });
                Ok(())
            }
        }
    }

    /// All outcomes recorded under `key`, oldest first.
    pub fn records(&self, key: &str) -> Option<&[Vec<bool>]> {
        self.records.get(key).map(|r| r.outcomes.as_slice())
    }

    /// The most recent outcome recorded under `key`.
    pub fn last(&self, key: &str) -> Option<&[bool]> {
        self.records.get(key).and_then(|r| r.outcomes.last()).map(Vec::as_slice)
    }

    /// Qubits measured under `key`, as first recorded.
    pub fn measured_qubits(&self, key: &str) -> Option<&[Qid]> {
        self.records.get(key).map(|r| r.qubits.as_slice())
    }

    /// Recorded keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for ClassicalDataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Records:")?;
        if self.records.is_empty() {
            return writeln!(f, "  No measurements were recorded.");
        }
        for (key, record) in &self.records {
            let outcomes: Vec<String> = record
                .outcomes
                .iter()
                .map(|bits| bits.iter().map(|b| if *b { '1' } else { '0' }).collect())
                .collect();
            writeln!(f, "  {}: [{}]", key, outcomes.join(", "))?;
        }
        Ok(())
    }
}
