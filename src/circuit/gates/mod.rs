//! A [`Gate`] is a deterministic Clifford push-forward on Pauli strings,
//! optionally convolved with a noise channel. Kept as a closed tag (no
//! function-pointer operation field) so a gate's action can be pattern
//! matched rather than compared by pointer identity.

use std::collections::BTreeMap;

use rayon::prelude::*;
use symplectic::combinatorics::binomial_coefficient;
use symplectic::{PauliIterator, SymplecticMatrix};

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};
use crate::error_model::ErrorModel;
use crate::table::ErrorTable;

/// Greedily assigns entries to `n_buckets` worker buckets, walking weight
/// classes from heaviest to lightest and each time dropping the class into
/// the currently lightest-loaded bucket (by binomial weight-class size, a
/// proxy for per-entry cost when depth truncation makes low weights dense
/// and high weights sparse).
fn balance_by_weight(entries: &[(usize, f64)], bits: usize, n_buckets: usize) -> Vec<Vec<(usize, f64)>> {
    let mut by_weight: BTreeMap<u32, Vec<(usize, f64)>> = BTreeMap::new();
    for &(index, prob) in entries {
        by_weight.entry((index as u64).count_ones()).or_default().push((index, prob));
    }
    let mut buckets = vec![Vec::new(); n_buckets];
    let mut bucket_cost = vec![0u128; n_buckets];
    let mut weights: Vec<u32> = by_weight.keys().copied().collect();
    weights.sort_unstable_by(|a, b| b.cmp(a));
    for w in weights {
        let Some(members) = by_weight.remove(&w) else { continue };
        if members.is_empty() {
            continue;
        }
        let cost = binomial_coefficient(bits, w as usize).max(1);
        let (lightest, _) = bucket_cost.iter().enumerate().min_by_key(|&(_, &c)| c).unwrap();
        bucket_cost[lightest] += cost;
        buckets[lightest].extend(members);
    }
    buckets.retain(|b| !b.is_empty());
    if buckets.is_empty() {
        buckets.push(Vec::new());
    }
    buckets
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    Identity,
    Cnot,
    Hadamard,
    Phase,
    PauliX,
    PauliZ,
    PrepareX(bool),
    PrepareY(bool),
    PrepareZ(bool),
}

impl GateKind {
    fn n_targets(&self) -> usize {
        match self {
            GateKind::Cnot => 2,
            _ => 1,
        }
    }

    fn push_forward(&self, p: &mut SymplecticMatrix, targets: &[usize]) {
        match *self {
            GateKind::Identity => {}
            GateKind::Cnot => p.apply_cnot_row(0, targets[0], targets[1]),
            GateKind::Hadamard => p.apply_h_row(0, targets[0]),
            GateKind::Phase => p.apply_s_row(0, targets[0]),
            GateKind::PauliX => p.apply_pauli_x_row(0, targets[0]),
            GateKind::PauliZ => p.apply_pauli_z_row(0, targets[0]),
            GateKind::PrepareX(v) => {
                p.set(0, targets[0], v as u8);
                p.set(0, targets[0] + p.n_qubits(), 0);
            }
            GateKind::PrepareY(v) => {
                p.set(0, targets[0], 1);
                p.set(0, targets[0] + p.n_qubits(), v as u8);
            }
            GateKind::PrepareZ(v) => {
                p.set(0, targets[0], 0);
                p.set(0, targets[0] + p.n_qubits(), v as u8);
            }
        }
    }
}

/// Operation-plus-noise acting on an [`ErrorTable`] distribution. `None`
/// operation with a single-qubit error model is the "wire noise" gate
/// [`crate::circuit::Circuit`] applies to idle qubits each step.
#[derive(Debug, Clone)]
pub struct Gate {
    n_qubits: usize,
    operation: Option<GateKind>,
    error_model: Option<ErrorModel>,
}

impl Gate {
    pub fn new(n_qubits: usize, operation: Option<GateKind>, error_model: Option<ErrorModel>) -> Self {
        Self {
            n_qubits,
            operation,
            error_model,
        }
    }

    pub fn cnot() -> Self {
        Self::new(2, Some(GateKind::Cnot), None)
    }

    pub fn hadamard() -> Self {
        Self::new(1, Some(GateKind::Hadamard), None)
    }

    pub fn phase() -> Self {
        Self::new(1, Some(GateKind::Phase), None)
    }

    pub fn pauli_x() -> Self {
        Self::new(1, Some(GateKind::PauliX), None)
    }

    pub fn pauli_z() -> Self {
        Self::new(1, Some(GateKind::PauliZ), None)
    }

    pub fn prepare_x(value: bool) -> Self {
        Self::new(1, Some(GateKind::PrepareX(value)), None)
    }

    pub fn prepare_y(value: bool) -> Self {
        Self::new(1, Some(GateKind::PrepareY(value)), None)
    }

    pub fn prepare_z(value: bool) -> Self {
        Self::new(1, Some(GateKind::PrepareZ(value)), None)
    }

    pub fn identity(n_qubits: usize) -> Self {
        Self::new(n_qubits, Some(GateKind::Identity), None)
    }

    /// A wire-noise gate: no push-forward, single-qubit error model only.
    pub fn wire_noise(model: ErrorModel) -> Self {
        Self::new(1, None, Some(model))
    }

    pub fn with_error_model(mut self, model: ErrorModel) -> Self {
        self.error_model = Some(model);
        self
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn is_clifford(&self) -> bool {
        self.operation.is_some()
    }

    fn validate_targets(&self, n: usize, targets: &[usize]) -> Result<()> {
        if targets.len() != self.n_qubits {
            return Err(Error::InvalidTarget {
                gate_qubits: self.n_qubits,
                given: targets.len(),
            });
        }
        if n < self.n_qubits {
            return Err(Error::InvalidTarget {
                gate_qubits: self.n_qubits,
                given: n,
            });
        }
        for &t in targets {
            if t >= n {
                return Err(Error::InvalidTarget {
                    gate_qubits: self.n_qubits,
                    given: t,
                });
            }
        }
        Ok(())
    }

    /// Applies the deterministic push-forward followed by error convolution
    /// to `input`, an `n`-qubit distribution, acting on `targets`.
    pub fn apply(&self, input: &ErrorTable, targets: &[usize], cfg: &RuntimeConfig) -> Result<ErrorTable> {
        let n = input.n_qubits();
        self.validate_targets(n, targets)?;

        let depth = cfg.depth_ceiling(2 * n);
        let entries: Vec<(usize, f64)> = input
            .iter_nonzero()
            .filter(|(index, _)| (*index as u64).count_ones() as usize <= depth)
            .collect();

        let pushed = self.push_forward_table(n, &entries, targets, cfg)?;

        match &self.error_model {
            None => Ok(pushed),
            Some(model) => self.convolve(&pushed, targets, model),
        }
    }

    fn push_forward_table(
        &self,
        n: usize,
        entries: &[(usize, f64)],
        targets: &[usize],
        cfg: &RuntimeConfig,
    ) -> Result<ErrorTable> {
        let Some(kind) = self.operation else {
            // No operation: pass input through unchanged (only noise, if any, applies).
            let mut out = ErrorTable::zeros(n)?;
            for &(index, prob) in entries {
                out.add(index, prob);
            }
            return Ok(out);
        };
        if kind.n_targets() != self.n_qubits {
            return Err(Error::InvalidTarget {
                gate_qubits: self.n_qubits,
                given: targets.len(),
            });
        }

        let chunk_count = if cfg.threads == 0 { rayon::current_num_threads() } else { cfg.threads };
        let buckets = balance_by_weight(entries, 2 * n, chunk_count.max(1));

        let merged = buckets
            .par_iter()
            .map(|chunk| -> Result<ErrorTable> {
                let mut local = ErrorTable::zeros(n)?;
                for &(index, prob) in chunk {
                    let mut p = SymplecticMatrix::from_int(n, index as u64);
                    kind.push_forward(&mut p, targets);
                    local.add(p.to_int(0) as usize, prob);
                }
                Ok(local)
            })
            .try_reduce(
                || ErrorTable::zeros(n).unwrap(),
                |mut acc, local| {
                    for (index, prob) in local.iter_nonzero() {
                        acc.add(index, prob);
                    }
                    Ok(acc)
                },
            )?;
        Ok(merged)
    }

    fn convolve(&self, pushed: &ErrorTable, targets: &[usize], model: &ErrorModel) -> Result<ErrorTable> {
        let n = pushed.n_qubits();
        let m = model.n_qubits();
        if n < m {
            return Err(Error::InvalidTarget {
                gate_qubits: m,
                given: n,
            });
        }
        let mut out = ErrorTable::zeros(n)?;
        for (s_index, s_prob) in pushed.iter_nonzero() {
            let s = SymplecticMatrix::from_int(n, s_index as u64);
            for e in PauliIterator::full(m) {
                let ep = model.call(&e);
                if ep == 0.0 {
                    continue;
                }
                let mut combined = s.clone();
                combined.partial_add(&e, targets)?;
                out.add(combined.to_int(0) as usize, s_prob * ep);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_model::ErrorModel;
    use approx::assert_relative_eq;

    #[test]
    fn cnot_push_forward_preserves_mass() {
        let mut input = ErrorTable::zeros(2).unwrap();
        input.set(SymplecticMatrix::zeros(2, 1).to_int(0) as usize, 0.4);
        let mut x0 = SymplecticMatrix::zeros(2, 1);
        x0.set(0, 0, 1);
        input.set(x0.to_int(0) as usize, 0.6);

        let gate = Gate::cnot();
        let out = gate.apply(&input, &[0, 1], &RuntimeConfig::default()).unwrap();
        assert_relative_eq!(out.total_mass(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn hadamard_swaps_x_and_z() {
        let mut input = ErrorTable::zeros(1).unwrap();
        let mut x = SymplecticMatrix::zeros(1, 1);
        x.set(0, 0, 1);
        input.set(x.to_int(0) as usize, 1.0);

        let gate = Gate::hadamard();
        let out = gate.apply(&input, &[0], &RuntimeConfig::sequential()).unwrap();
        let mut z = SymplecticMatrix::zeros(1, 1);
        z.set(0, 1, 1);
        assert_relative_eq!(out.get(z.to_int(0) as usize), 1.0);
    }

    #[test]
    fn wire_noise_convolves_without_pushing_forward() {
        let input = ErrorTable::identity(1).unwrap();
        let model = ErrorModel::iid(1, 0.1);
        let gate = Gate::wire_noise(model.clone());
        let out = gate.apply(&input, &[0], &RuntimeConfig::sequential()).unwrap();
        let identity = SymplecticMatrix::zeros(1, 1);
        assert_relative_eq!(out.get(identity.to_int(0) as usize), model.call(&identity), epsilon = 1e-12);
    }

    #[test]
    fn mismatched_target_count_is_invalid_target() {
        let input = ErrorTable::identity(2).unwrap();
        let gate = Gate::cnot();
        assert!(gate.apply(&input, &[0], &RuntimeConfig::default()).is_err());
    }
}
