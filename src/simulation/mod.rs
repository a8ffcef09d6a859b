// src/simulation/mod.rs

//! Simulation states and the driver that applies circuits to them.
//!
//! Backends implement [`SimulationState`]; the crate itself ships no state
//! representation. [`SimulationProductState`] composes backends that can be
//! split and merged, and [`Simulator`] runs a [`Circuit`] against any state by
//! dispatching each operation through [`act_on`].

mod classical_data;
mod product_state;

// Re-export the main public interface types
pub use classical_data::{ClassicalDataStore, SharedClassicalData};
pub use product_state::{ProductStateMember, SimulationProductState};

use crate::circuits::Circuit;
use crate::core::{ActOnError, Qid};
use crate::protocols::{act_on, Action, ActResult};
use log::debug;
use std::any::Any;

/// Upcast helper so direct handlers can recover the concrete backend.
pub trait AsAny: Any {
    /// `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A mutable simulation state that actions are applied to.
///
/// The state is opaque to the dispatcher. Its only obligation is the fallback
/// handler, which acts with any action the action itself did not handle.
pub trait SimulationState: AsAny + 'static {
    /// Qubits this state simulates, in canonical order.
    fn qubits(&self) -> &[Qid];

    /// Generic handler invoked when the action declined to act by itself.
    ///
    /// Must answer `Applied` after mutating the state, or `NotApplicable`
    /// (leaving the state consistent) when it cannot act. `Declined` is a
    /// contract violation and surfaces as a configuration error.
    ///
    /// # Errors
    /// Failures raised while acting (an unknown qubit, a failed
    /// sub-dispatch) are returned as is and reach the caller of `act_on`
    /// unchanged.
    fn act_on_fallback(
        &mut self,
        action: &dyn Action,
        qubits: &[Qid],
        allow_decompose: bool,
    ) -> Result<ActResult, ActOnError>;
}

impl dyn SimulationState {
    /// The concrete state, if it is a `T`.
    pub fn downcast_ref<T: SimulationState>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// The concrete state, mutably, if it is a `T`.
    pub fn downcast_mut<T: SimulationState>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Runs circuits against simulation states.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    allow_decompose: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { allow_decompose: true }
    }
}

impl Simulator {
    /// Creates a new Simulator with default settings (decomposition allowed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether fallback handlers may decompose operations.
    pub fn with_decomposition(mut self, allow_decompose: bool) -> Self {
        self.allow_decompose = allow_decompose;
        self
    }

    /// Whether fallback handlers may decompose operations.
    pub fn allow_decompose(&self) -> bool {
        self.allow_decompose
    }

    /// Applies every operation of `circuit` to `state`, in order.
    ///
    /// # Returns
    /// * `Ok(())` once all operations were applied.
    /// * `Err(ActOnError::CircuitFailure)` naming the first operation that
    ///   failed to dispatch. Operations before it remain applied.
    pub fn run(&self, circuit: &Circuit, state: &mut dyn SimulationState) -> Result<(), ActOnError> {
        for (moment, op) in circuit.operations().iter().enumerate() {
            debug!("simulator: moment {}: {}", moment, op);
            act_on(op, state, None, self.allow_decompose).map_err(|err| ActOnError::CircuitFailure {
                moment,
                source: Box::new(err),
            })?;
        }
        Ok(())
    }
}
