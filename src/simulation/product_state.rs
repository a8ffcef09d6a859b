// src/simulation/product_state.rs

//! A simulation state made of independent sub-states.
//!
//! Qubits that have never interacted can be simulated separately. The
//! [`SimulationProductState`] maps every qubit to the sub-state that currently
//! owns it, merges sub-states when an action spans several of them, and (when
//! splitting is enabled) factors qubits back out after measurements and
//! resets.

use super::SimulationState;
use crate::core::{ActOnError, Qid};
use crate::operations::Gate;
use crate::protocols::{act_on, Action, ActResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashSet};

/// Operations a backend must provide to live inside a product state.
pub trait ProductStateMember: SimulationState + Sized {
    /// The joint state of `self` and `other`, with `self`'s qubits first.
    fn kronecker_product(self, other: Self) -> Self;

    /// Removes `qubits` into a new state and returns it, or `None` if they
    /// are entangled with the rest.
    fn factor(&mut self, qubits: &[Qid]) -> Option<Self>;

    /// Whether [`ProductStateMember::factor`] may be attempted at all.
    fn allows_factoring(&self) -> bool;

    /// Exchanges the roles of two qubits of this state.
    fn swap(&mut self, q0: Qid, q1: Qid);

    /// Renames qubit `from` to `to`.
    fn rename(&mut self, from: Qid, to: Qid);

    /// Reorders the state's qubits to follow `qubits`.
    fn transpose_to_qubit_order(self, qubits: &[Qid]) -> Self;

    /// Samples `repetitions` measurement outcomes of `qubits` without
    /// disturbing the state. Row `r` holds repetition `r`, one bit per qubit.
    fn sample(&mut self, qubits: &[Qid], repetitions: usize, rng: &mut StdRng) -> Vec<Vec<bool>>;
}

/// A qubit-to-sub-state map that acts as a single simulation state.
#[derive(Debug)]
pub struct SimulationProductState<S> {
    members: BTreeMap<usize, S>,
    owners: BTreeMap<Qid, usize>,
    /// Zero-qubit member; seeds merges and absorbs qubit-less actions.
    vacuum: S,
    qubits: Vec<Qid>,
    split_untangled_states: bool,
    next_slot: usize,
}

impl<S: ProductStateMember> SimulationProductState<S> {
    /// Creates a product state from disjoint `members`.
    ///
    /// `qubits` is the canonical qubit order. Every listed qubit must be
    /// owned by exactly one member, members may not own unlisted qubits and
    /// `vacuum` must own none.
    ///
    /// # Errors
    /// `Configuration` if ownership is inconsistent.
    pub fn new(
        members: Vec<S>,
        vacuum: S,
        qubits: Vec<Qid>,
        split_untangled_states: bool,
    ) -> Result<Self, ActOnError> {
        if !vacuum.qubits().is_empty() {
            return Err(ActOnError::configuration("The vacuum state of a product state must own no qubits"));
        }
        let listed: HashSet<Qid> = qubits.iter().copied().collect();
        if listed.len() != qubits.len() {
            return Err(ActOnError::configuration("Product state qubit order contains duplicates"));
        }

        let mut product = Self {
            members: BTreeMap::new(),
            owners: BTreeMap::new(),
            vacuum,
            qubits,
            split_untangled_states,
            next_slot: 0,
        };
        for member in members {
            for q in member.qubits() {
                if !listed.contains(q) {
                    return Err(ActOnError::configuration(format!(
                        "Member qubit {} is not part of the product state's qubit order",
                        q
                    )));
                }
                if product.owners.contains_key(q) {
                    return Err(ActOnError::configuration(format!("Qubit {} is owned by two members", q)));
                }
            }
            product.insert_member(member);
        }
        if let Some(orphan) = product.qubits.iter().find(|q| !product.owners.contains_key(q)) {
            return Err(ActOnError::configuration(format!("Qubit {} is not owned by any member", orphan)));
        }
        Ok(product)
    }

    /// Whether unentangled qubit groups are kept in separate members.
    pub fn split_untangled_states(&self) -> bool {
        self.split_untangled_states
    }

    /// The member currently owning `qubit`.
    pub fn get(&self, qubit: &Qid) -> Option<&S> {
        self.owners.get(qubit).and_then(|slot| self.members.get(slot))
    }

    /// Mutable access to the member currently owning `qubit`.
    pub fn get_mut(&mut self, qubit: &Qid) -> Option<&mut S> {
        let slot = *self.owners.get(qubit)?;
        self.members.get_mut(&slot)
    }

    /// Number of qubits mapped to a member.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if the product state holds no qubits.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// The zero-qubit member.
    pub fn vacuum(&self) -> &S {
        &self.vacuum
    }

    /// Distinct members, in creation order.
    pub fn members(&self) -> impl Iterator<Item = &S> {
        self.members.values()
    }

    /// Number of distinct members (the vacuum excluded).
    pub fn num_members(&self) -> usize {
        self.members.len()
    }

    /// Whether `a` and `b` currently live in the same member.
    pub fn shares_member(&self, a: &Qid, b: &Qid) -> bool {
        match (self.owners.get(a), self.owners.get(b)) {
            (Some(sa), Some(sb)) => sa == sb,
            _ => false,
        }
    }

    /// One state holding every qubit, in canonical order.
    pub fn create_merged_state(&self) -> S
    where
        S: Clone,
    {
        let merged = self
            .members
            .values()
            .cloned()
            .fold(self.vacuum.clone(), |acc, member| acc.kronecker_product(member));
        merged.transpose_to_qubit_order(&self.qubits)
    }

    /// Samples `repetitions` outcomes of `qubits`, columns in the order given.
    ///
    /// Each member is sampled over the requested qubits it owns, all from one
    /// generator seeded with `seed` (OS entropy when `None`).
    ///
    /// # Errors
    /// `QubitNotFound` for an unknown qubit; `Configuration` if a member
    /// returns samples of the wrong shape.
    pub fn sample(&mut self, qubits: &[Qid], repetitions: usize, seed: Option<u64>) -> Result<Vec<Vec<bool>>, ActOnError> {
        for q in qubits {
            self.slot_of(q)?;
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let requested: HashSet<Qid> = qubits.iter().copied().collect();

        let mut rows: Vec<Vec<bool>> = vec![Vec::with_capacity(qubits.len()); repetitions];
        let mut selected_order: Vec<Qid> = Vec::with_capacity(qubits.len());
        for member in self.members.values_mut() {
            let member_qubits: Vec<Qid> = member.qubits().iter().filter(|q| requested.contains(q)).copied().collect();
            if member_qubits.is_empty() {
                continue;
            }
            let samples = member.sample(&member_qubits, repetitions, &mut rng);
            if samples.len() != repetitions || samples.iter().any(|row| row.len() != member_qubits.len()) {
                return Err(ActOnError::configuration(format!(
                    "Member sampled a {}-row result for {} repetition(s) of {} qubit(s)",
                    samples.len(),
                    repetitions,
                    member_qubits.len()
                )));
            }
            for (row, sample) in rows.iter_mut().zip(samples) {
                row.extend(sample);
            }
            selected_order.extend(member_qubits);
        }

        let index_order: Vec<usize> = qubits
            .iter()
            .map(|q| selected_order.iter().position(|s| s == q))
            .collect::<Option<_>>()
            .ok_or_else(|| ActOnError::configuration("Sampled columns do not cover the requested qubits"))?;
        Ok(rows
            .into_iter()
            .map(|row| index_order.iter().map(|&i| row[i]).collect())
            .collect())
    }

    /// Routes `action` to the member owning `qubits`, merging and factoring
    /// members around it.
    fn route(
        &mut self,
        action: &dyn Action,
        qubits: &[Qid],
        allow_decompose: bool,
    ) -> Result<ActResult, ActOnError> {
        let gate = action.gate();

        if gate.is_some_and(|g| g.is_identity()) {
            return Ok(ActResult::Applied);
        }

        if let (Some(Gate::Swap), &[q0, q1]) = (gate, qubits) {
            self.swap_qubits(q0, q1)?;
            return Ok(ActResult::Applied);
        }

        let slot = self.merge_members(qubits)?;

        // Operations carry their own qubits; bare gates need them passed on.
        let act_on_qubits = if action.qubits().is_none() { Some(qubits) } else { None };
        let target: &mut dyn SimulationState = match slot {
            Some(slot) => self.member_mut(slot)?,
            None => &mut self.vacuum,
        };
        act_on(action, target, act_on_qubits, allow_decompose)?;

        if let Some(slot) = slot {
            if self.split_untangled_states && gate.is_some_and(|g| g.is_measurement() || g.is_reset()) {
                self.factor_out(slot, qubits)?;
            }
        }
        Ok(ActResult::Applied)
    }

    fn insert_member(&mut self, member: S) -> usize {
        let slot = self.next_slot;
        self.next_slot += 1;
        for q in member.qubits() {
            self.owners.insert(*q, slot);
        }
        self.members.insert(slot, member);
        slot
    }

    fn slot_of(&self, qubit: &Qid) -> Result<usize, ActOnError> {
        self.owners.get(qubit).copied().ok_or_else(|| ActOnError::QubitNotFound {
            qubit: *qubit,
            message: "not part of this product state".to_string(),
        })
    }

    fn member_mut(&mut self, slot: usize) -> Result<&mut S, ActOnError> {
        self.members
            .get_mut(&slot)
            .ok_or_else(|| ActOnError::configuration(format!("Product state member slot {} is missing", slot)))
    }

    fn take_member(&mut self, slot: usize) -> Result<S, ActOnError> {
        self.members
            .remove(&slot)
            .ok_or_else(|| ActOnError::configuration(format!("Product state member slot {} is missing", slot)))
    }

    fn swap_qubits(&mut self, q0: Qid, q1: Qid) -> Result<(), ActOnError> {
        let s0 = self.slot_of(&q0)?;
        let s1 = self.slot_of(&q1)?;
        if s0 == s1 {
            debug!("product state: swapping {} and {} inside one member", q0, q1);
            self.member_mut(s0)?.swap(q0, q1);
        } else {
            debug!("product state: exchanging members of {} and {}", q0, q1);
            self.member_mut(s1)?.rename(q1, q0);
            self.member_mut(s0)?.rename(q0, q1);
            self.owners.insert(q0, s1);
            self.owners.insert(q1, s0);
        }
        Ok(())
    }

    /// Joins the members owning `qubits` into one, in qubit order.
    /// Returns its slot, or `None` when `qubits` is empty.
    fn merge_members(&mut self, qubits: &[Qid]) -> Result<Option<usize>, ActOnError> {
        let mut slots: Vec<usize> = Vec::new();
        for q in qubits {
            let slot = self.slot_of(q)?;
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        match slots.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            _ => {
                debug!("product state: merging {} members for {} qubit(s)", slots.len(), qubits.len());
                let mut merged = self.take_member(slots[0])?;
                for slot in &slots[1..] {
                    let next = self.take_member(*slot)?;
                    merged = merged.kronecker_product(next);
                }
                Ok(Some(self.insert_member(merged)))
            }
        }
    }

    /// Splits each of `qubits` out of the member at `slot` where possible.
    fn factor_out(&mut self, slot: usize, qubits: &[Qid]) -> Result<(), ActOnError> {
        for q in qubits {
            let member = self.member_mut(slot)?;
            if member.qubits().len() <= 1 || !member.allows_factoring() {
                continue;
            }
            if let Some(extracted) = member.factor(&[*q]) {
                debug!("product state: factored {} into its own member", q);
                self.insert_member(extracted);
            }
        }
        // Backfill: the remainder keeps whatever qubits were not split off.
        let remaining: Vec<Qid> = self.member_mut(slot)?.qubits().to_vec();
        for q in remaining {
            self.owners.insert(q, slot);
        }
        Ok(())
    }
}

impl<S: ProductStateMember> SimulationState for SimulationProductState<S> {
    fn qubits(&self) -> &[Qid] {
        &self.qubits
    }

    /// Inner dispatch errors (an unknown qubit, an unsupported action on the
    /// owning member) are returned unchanged.
    fn act_on_fallback(
        &mut self,
        action: &dyn Action,
        qubits: &[Qid],
        allow_decompose: bool,
    ) -> Result<ActResult, ActOnError> {
        self.route(action, qubits, allow_decompose).inspect_err(|err| {
            if !err.is_unsupported() {
                warn!("product state: acting with {:?} failed: {}", action, err);
            }
        })
    }
}
