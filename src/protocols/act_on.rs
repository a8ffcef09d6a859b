// src/protocols/act_on.rs

use crate::core::{ActOnError, Qid};
use crate::operations::{Gate, GateOperation};
use crate::simulation::SimulationState;
use log::trace;
use std::fmt;

/// Answer of a handler asked to act on a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActResult {
    /// The handler mutated the state; dispatch is complete.
    Applied,
    /// The handler declines; dispatch moves on to the next handler.
    NotApplicable,
    /// The handler answered `false`. This is never a valid answer and the
    /// dispatcher reports it as a configuration error.
    Declined,
}

impl ActResult {
    /// Whether the answer is one of the two the protocol accepts.
    pub fn is_valid(self) -> bool {
        !matches!(self, ActResult::Declined)
    }
}

/// `true` maps to `Applied`, `false` to `Declined`.
impl From<bool> for ActResult {
    fn from(applied: bool) -> Self {
        if applied { ActResult::Applied } else { ActResult::Declined }
    }
}

impl fmt::Display for ActResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActResult::Applied => write!(f, "Applied"),
            ActResult::NotApplicable => write!(f, "NotApplicable"),
            ActResult::Declined => write!(f, "Declined"),
        }
    }
}

/// Something that can be applied to a simulation state.
///
/// Operations return their qubits from [`Action::qubits`]; bare gate-like
/// values return `None` and rely on the caller to name the qubits.
pub trait Action: fmt::Debug {
    /// The action's own qubits, or `None` if it has none.
    ///
    /// Returning `Some` (even an empty slice) makes the action an operation.
    fn qubits(&self) -> Option<&[Qid]>;

    /// Direct handler. Acts on `state` over `qubits` if the action knows how.
    ///
    /// The default declines, which leaves the work to the state's fallback.
    fn act_on(&self, _state: &mut dyn SimulationState, _qubits: &[Qid]) -> ActResult {
        ActResult::NotApplicable
    }

    /// The gate behind this action, if there is one.
    fn gate(&self) -> Option<&Gate> {
        None
    }

    /// Simpler operations equivalent to acting with this action on `qubits`.
    fn decompose(&self, _qubits: &[Qid]) -> Option<Vec<GateOperation>> {
        None
    }
}

/// Applies `action` to `state`.
///
/// `qubits` must be `None` when the action is an operation and `Some` (even
/// if empty) otherwise. The action's own handler is tried first; if it
/// declines, the state's fallback handler is invoked with `allow_decompose`.
///
/// # Errors
/// * `ActOnError::Configuration` if the qubit-supply pattern is wrong or a
///   handler answers `Declined`.
/// * `ActOnError::UnsupportedAction` if both handlers answer `NotApplicable`.
/// * Any error the fallback handler returns, unchanged.
pub fn act_on(
    action: &dyn Action,
    state: &mut dyn SimulationState,
    qubits: Option<&[Qid]>,
    allow_decompose: bool,
) -> Result<(), ActOnError> {
    let action_qubits = action.qubits();
    let qubits = match (action_qubits, qubits) {
        (Some(_), Some(_)) => {
            return Err(ActOnError::configuration(
                "Calls to act_on should not supply qubits if the action is an Operation.",
            ));
        }
        (None, None) => {
            return Err(ActOnError::configuration(
                "Calls to act_on should supply qubits if the action is not an Operation.",
            ));
        }
        (Some(own), None) => own,
        (None, Some(supplied)) => supplied,
    };

    trace!("act_on: trying direct handler of {:?} on {} qubit(s)", action, qubits.len());
    match action.act_on(state, qubits) {
        ActResult::Applied => return Ok(()),
        ActResult::NotApplicable => {}
        ActResult::Declined => {
            return Err(ActOnError::configuration(format!(
                "act_on handler of {:?} must return Applied or NotApplicable, got Declined.",
                action
            )));
        }
    }

    trace!("act_on: falling back to state handler (allow_decompose={})", allow_decompose);
    match state.act_on_fallback(action, qubits, allow_decompose)? {
        ActResult::Applied => Ok(()),
        ActResult::NotApplicable => Err(ActOnError::unsupported(format!(
            "Failed to act action {:?} on state: no handler could act on it.",
            action
        ))),
        ActResult::Declined => Err(ActOnError::configuration(
            "act_on_fallback must return Applied or NotApplicable, got Declined.",
        )),
    }
}
