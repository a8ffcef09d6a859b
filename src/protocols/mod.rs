// src/protocols/mod.rs

//! Protocols that decide how actions mutate simulation states.
//!
//! The central entry point is [`act_on`]. An [`Action`] may handle itself
//! against a state; otherwise the state's
//! [`SimulationState::act_on_fallback`](crate::simulation::SimulationState::act_on_fallback)
//! gets a chance. Handlers answer with an [`ActResult`].

mod act_on;
mod decompose;

pub use act_on::{act_on, Action, ActResult};
pub use decompose::act_on_from_decomposition;
