// tests/simulation_tests.rs

mod common;

use acton::{ActOnError, ActResult, Circuit, CircuitBuilder, Gate, Qid, SimulationState, Simulator};
use common::{bit_product_state, new_classical, q, BitRegister, DummySimulationState};

// Helper to read a single bit out of a product-state member
fn bit_of(state: &acton::SimulationProductState<BitRegister>, qubit: Qid) -> Option<bool> {
    state.get(&qubit).and_then(|m| m.bit(&qubit))
}

#[test]
fn test_empty_circuit() -> Result<(), ActOnError> {
    let circuit = Circuit::new();
    let mut state = DummySimulationState::new(ActResult::Declined);
    Simulator::new().run(&circuit, &mut state)?;
    assert!(state.calls.is_empty(), "Empty circuit must not dispatch anything");
    Ok(())
}

#[test]
fn test_ghz_like_preparation_and_measurement() -> Result<(), ActOnError> {
    // X on q0 followed by a CNOT chain sets every bit.
    let qs = Qid::line_range(0, 4);
    let classical = new_classical();
    let mut state = bit_product_state(&qs, &classical, true)?;

    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.on(&[qs[0]])?)
        .add_ops(
            qs.windows(2)
                .map(|pair| Gate::CNOT.on(pair))
                .collect::<Result<Vec<_>, _>>()?,
        )
        .add_op(Gate::measure("ghz", 4)?.on(&qs)?)
        .build();
    assert_eq!(circuit.qubits(), qs);

    Simulator::new().run(&circuit, &mut state)?;
    assert_eq!(classical.borrow().last("ghz"), Some(&[true, true, true, true][..]));
    // The measurement split every qubit back into its own member.
    assert_eq!(state.num_members(), 4);
    Ok(())
}

#[test]
fn test_repeated_measurements_accumulate() -> Result<(), ActOnError> {
    let classical = new_classical();
    let mut state = bit_product_state(&[q(0)], &classical, true)?;
    let circuit = CircuitBuilder::new()
        .add_op(Gate::measure("m", 1)?.on(&[q(0)])?)
        .add_op(Gate::X.on(&[q(0)])?)
        .add_op(Gate::measure("m", 1)?.on(&[q(0)])?)
        .add_op(Gate::Reset.on(&[q(0)])?)
        .add_op(Gate::measure("m", 1)?.on(&[q(0)])?)
        .build();
    Simulator::new().run(&circuit, &mut state)?;

    let store = classical.borrow();
    assert_eq!(store.records("m"), Some(&[vec![false], vec![true], vec![false]][..]));
    assert!(store.to_string().contains("m: [0, 1, 0]"));
    Ok(())
}

#[test]
fn test_decomposition_toggle() -> Result<(), ActOnError> {
    let qs = Qid::line_range(0, 3);
    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.on(&[qs[0]])?)
        .add_op(Gate::X.on(&[qs[1]])?)
        .add_op(Gate::CSwap.on(&qs)?)
        .build();

    let classical = new_classical();
    let mut state = bit_product_state(&qs, &classical, true)?;
    Simulator::new().run(&circuit, &mut state)?;
    assert_eq!(bit_of(&state, qs[1]), Some(false));
    assert_eq!(bit_of(&state, qs[2]), Some(true));

    let mut state = bit_product_state(&qs, &classical, true)?;
    let err = Simulator::new().with_decomposition(false).run(&circuit, &mut state).unwrap_err();
    assert!(matches!(err, ActOnError::CircuitFailure { moment: 2, .. }), "{}", err);
    assert!(err.root_cause().is_unsupported());
    // Moments before the failure stay applied.
    assert_eq!(bit_of(&state, qs[0]), Some(true));
    assert_eq!(bit_of(&state, qs[1]), Some(true));
    Ok(())
}

#[test]
fn test_swap_network_moves_bits_without_merging() -> Result<(), ActOnError> {
    let qs = Qid::line_range(0, 3);
    let classical = new_classical();
    let mut state = bit_product_state(&qs, &classical, true)?;
    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.on(&[qs[0]])?)
        .add_op(Gate::Swap.on(&[qs[0], qs[1]])?)
        .add_op(Gate::Swap.on(&[qs[1], qs[2]])?)
        .build();
    Simulator::new().run(&circuit, &mut state)?;
    assert_eq!(state.num_members(), 3);
    assert_eq!(bit_of(&state, qs[0]), Some(false));
    assert_eq!(bit_of(&state, qs[2]), Some(true));
    assert_eq!(state.sample(&qs, 2, Some(3))?, vec![vec![false, false, true]; 2]);
    Ok(())
}

#[test]
fn test_run_on_plain_register() -> Result<(), ActOnError> {
    let qs = Qid::grid_rect(1, 2);
    let mut register = BitRegister::new(qs.clone(), new_classical());
    let circuit = CircuitBuilder::new()
        .add_op(Gate::X.on(&[qs[1]])?)
        .add_op(Gate::CZ.on(&qs)?)
        .add_op(Gate::identity(2).on(&qs)?)
        .build();
    Simulator::default().run(&circuit, &mut register)?;
    assert_eq!(register.bits(), &[false, true]);
    assert_eq!(SimulationState::qubits(&register), &qs[..]);
    Ok(())
}

#[test]
fn test_failure_reports_configuration_errors() -> Result<(), ActOnError> {
    let circuit = CircuitBuilder::new().add_op(Gate::H.on(&[q(0)])?).build();
    let mut state = DummySimulationState::new(ActResult::Declined);
    let err = Simulator::new().run(&circuit, &mut state).unwrap_err();
    assert!(err.root_cause().is_configuration());
    assert!(err.to_string().starts_with("Circuit failed at moment 0"));
    Ok(())
}
