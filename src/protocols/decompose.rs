// src/protocols/decompose.rs

use super::act_on::{act_on, Action, ActResult};
use crate::core::{ActOnError, Qid};
use crate::simulation::SimulationState;
use log::trace;

/// Acts on `state` by dispatching each operation of `action`'s decomposition.
///
/// Intended for fallback handlers that cannot act with an action directly.
/// Returns `NotApplicable` when `allow_decompose` is false or the action has
/// no decomposition, and `Applied` once every sub-operation was dispatched.
/// Sub-operations are dispatched with the same `allow_decompose`, so nested
/// decompositions unfold recursively.
///
/// # Errors
/// The first error raised while dispatching a sub-operation. Sub-operations
/// that already acted are not rolled back.
pub fn act_on_from_decomposition(
    action: &dyn Action,
    state: &mut dyn SimulationState,
    qubits: &[Qid],
    allow_decompose: bool,
) -> Result<ActResult, ActOnError> {
    if !allow_decompose {
        return Ok(ActResult::NotApplicable);
    }
    let Some(ops) = action.decompose(qubits) else {
        return Ok(ActResult::NotApplicable);
    };
    trace!("act_on: decomposed {:?} into {} operation(s)", action, ops.len());
    for op in &ops {
        act_on(op, state, None, allow_decompose)?;
    }
    Ok(ActResult::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Gate;

    /// Accepts only CNOT and remembers the qubits of each one.
    #[derive(Debug, Default)]
    struct CnotOnly {
        applied: Vec<Vec<Qid>>,
    }

    impl SimulationState for CnotOnly {
        fn qubits(&self) -> &[Qid] {
            &[]
        }

        fn act_on_fallback(
            &mut self,
            action: &dyn Action,
            qubits: &[Qid],
            allow_decompose: bool,
        ) -> Result<ActResult, ActOnError> {
            if action.gate() == Some(&Gate::CNOT) {
                self.applied.push(qubits.to_vec());
                return Ok(ActResult::Applied);
            }
            act_on_from_decomposition(action, self, qubits, allow_decompose)
        }
    }

    #[test]
    fn test_swap_unfolds_into_three_cnots() -> Result<(), ActOnError> {
        let (a, b) = (Qid::line(0), Qid::line(1));
        let mut state = CnotOnly::default();
        act_on(&Gate::Swap, &mut state, Some(&[a, b]), true)?;
        assert_eq!(state.applied, vec![vec![a, b], vec![b, a], vec![a, b]]);
        Ok(())
    }

    #[test]
    fn test_decomposition_disabled() {
        let mut state = CnotOnly::default();
        let result = act_on_from_decomposition(&Gate::Swap, &mut state, &[Qid::line(0), Qid::line(1)], false);
        assert_eq!(result, Ok(ActResult::NotApplicable));
        assert!(state.applied.is_empty());
    }

    #[test]
    fn test_no_decomposition_is_not_applicable() {
        let mut state = CnotOnly::default();
        let result = act_on_from_decomposition(&Gate::H, &mut state, &[Qid::line(0)], true);
        assert_eq!(result, Ok(ActResult::NotApplicable));
    }

    #[test]
    fn test_sub_operation_failure_propagates() {
        // CZ unfolds into H, CNOT, H; H is unsupported and stops the sequence.
        let mut state = CnotOnly::default();
        let result = act_on_from_decomposition(&Gate::CZ, &mut state, &[Qid::line(0), Qid::line(1)], true);
        let err = result.unwrap_err();
        assert!(err.is_unsupported());
        assert!(state.applied.is_empty());
    }
}
