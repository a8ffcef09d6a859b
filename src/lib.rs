// src/lib.rs

//! `acton` - Dispatching gates and operations onto simulation states
//!
//! This library implements the act-on protocol: an [`Action`] (a bare
//! [`Gate`] or a [`GateOperation`] bound to qubits) is applied to a
//! [`SimulationState`] by first asking the action to act by itself and then
//! falling back to the state's generic handler. The crate ships no state
//! representation of its own; backends implement [`SimulationState`].
//!
//! # Example: a backend that only understands `X`
//! ```
//! use acton::{act_on, Action, ActResult, ActOnError, Gate, Qid, SimulationState};
//!
//! #[derive(Debug)]
//! struct Bits {
//!     qubits: Vec<Qid>,
//!     bits: Vec<bool>,
//! }
//!
//! impl SimulationState for Bits {
//!     fn qubits(&self) -> &[Qid] {
//!         &self.qubits
//!     }
//!
//!     fn act_on_fallback(
//!         &mut self,
//!         action: &dyn Action,
//!         qubits: &[Qid],
//!         _allow_decompose: bool,
//!     ) -> Result<ActResult, ActOnError> {
//!         match (action.gate(), qubits) {
//!             (Some(Gate::X), [q]) => match self.qubits.iter().position(|x| x == q) {
//!                 Some(i) => {
//!                     self.bits[i] = !self.bits[i];
//!                     Ok(ActResult::Applied)
//!                 }
//!                 None => Err(ActOnError::QubitNotFound { qubit: *q, message: "not in this register".to_string() }),
//!             },
//!             _ => Ok(ActResult::NotApplicable),
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), ActOnError> {
//! let (q0, q1) = (Qid::line(0), Qid::line(1));
//! let mut state = Bits { qubits: vec![q0, q1], bits: vec![false, false] };
//!
//! // Operations carry their qubits...
//! act_on(&Gate::X.on(&[q1])?, &mut state, None, true)?;
//! // ...bare gates need them supplied.
//! act_on(&Gate::X, &mut state, Some(&[q0]), true)?;
//! assert_eq!(state.bits, vec![true, true]);
//!
//! // Nothing handles H.
//! let err = act_on(&Gate::H, &mut state, Some(&[q0]), true).unwrap_err();
//! assert!(err.is_unsupported());
//!
//! // Errors raised by the state reach the caller unchanged.
//! let err = act_on(&Gate::X, &mut state, Some(&[Qid::line(7)]), true).unwrap_err();
//! assert!(matches!(err, ActOnError::QubitNotFound { .. }));
//!
//! // Supplying qubits for an operation is a contract violation.
//! let err = act_on(&Gate::X.on(&[q0])?, &mut state, Some(&[q0]), true).unwrap_err();
//! assert!(err.is_configuration());
//! # Ok(())
//! # }
//! ```
//!
//! # Example: running a circuit
//! ```
//! use acton::{Action, ActResult, ActOnError, CircuitBuilder, Gate, Qid, SimulationState, Simulator};
//!
//! /// Records the symbol of every gate it sees.
//! #[derive(Debug, Default)]
//! struct Trace(Vec<String>);
//!
//! impl SimulationState for Trace {
//!     fn qubits(&self) -> &[Qid] {
//!         &[]
//!     }
//!
//!     fn act_on_fallback(
//!         &mut self,
//!         action: &dyn Action,
//!         _qubits: &[Qid],
//!         _allow_decompose: bool,
//!     ) -> Result<ActResult, ActOnError> {
//!         match action.gate() {
//!             Some(gate) => {
//!                 self.0.push(gate.symbol());
//!                 Ok(ActResult::Applied)
//!             }
//!             None => Ok(ActResult::NotApplicable),
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), ActOnError> {
//! let (q0, q1) = (Qid::line(0), Qid::line(1));
//! let circuit = CircuitBuilder::new()
//!     .add_op(Gate::H.on(&[q0])?)
//!     .add_op(Gate::CNOT.on(&[q0, q1])?)
//!     .build();
//! println!("{}", circuit);
//!
//! let mut trace = Trace::default();
//! Simulator::new().run(&circuit, &mut trace)?;
//! assert_eq!(trace.0, vec!["H", "CNOT"]);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod operations;
pub mod protocols;
pub mod circuits;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{ActOnError, Qid};
pub use operations::{Gate, GateOperation, Matrix};
pub use protocols::{act_on, act_on_from_decomposition, Action, ActResult};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{
    ClassicalDataStore, ProductStateMember, SharedClassicalData, SimulationProductState, SimulationState, Simulator,
};
pub use validation::{check_kraus_completeness, check_unitary, validate_gate};
