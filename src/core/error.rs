//! Error handling logic

use super::qid::Qid;
use thiserror::Error;

/// Error types raised while dispatching actions onto simulation states.
///
/// `Configuration` and `UnsupportedAction` are the two terminal failures of
/// the act-on protocol. The remaining variants come from the collaborators
/// around it (gate construction, product-state routing, circuit execution).
#[derive(Debug, Clone, PartialEq, Eq, Error)] // Eq useful for testing error variants
pub enum ActOnError {
    /// The caller or a handler violated the calling contract: the wrong
    /// qubit-supply pattern, or a handler answered outside
    /// `{Applied, NotApplicable}`. Always a programming error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Configuration failure message
        message: String,
    },

    /// Neither the action's own handler nor the state's fallback could act.
    #[error("Unsupported action: {message}")]
    UnsupportedAction {
        /// UnsupportedAction failure message
        message: String,
    },

    /// Gate data is inconsistent (non-unitary matrix, incomplete Kraus set,
    /// wrong number of qubits for the gate).
    #[error("Invalid gate: {message}")]
    InvalidGate {
        /// InvalidGate failure message
        message: String,
    },

    /// A qubit is not known to the state it was routed to.
    #[error("Qubit {qubit} not found: {message}")]
    QubitNotFound {
        /// The missing qubit
        qubit: Qid,
        /// QubitNotFound failure message
        message: String,
    },

    /// An operation inside a circuit failed to dispatch.
    #[error("Circuit failed at moment {moment}: {source}")]
    CircuitFailure {
        /// Index of the failing operation in the circuit
        moment: usize,
        /// The dispatch error of that operation
        source: Box<ActOnError>,
    },
}

impl ActOnError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        ActOnError::Configuration { message: message.into() }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        ActOnError::UnsupportedAction { message: message.into() }
    }

    pub(crate) fn invalid_gate(message: impl Into<String>) -> Self {
        ActOnError::InvalidGate { message: message.into() }
    }

    /// Returns `true` for contract violations.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ActOnError::Configuration { .. })
    }

    /// Returns `true` when no handler could act.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ActOnError::UnsupportedAction { .. })
    }

    /// Strips any `CircuitFailure` wrapping and returns the underlying error.
    pub fn root_cause(&self) -> &ActOnError {
        match self {
            ActOnError::CircuitFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
