//! A circuit is an ordered list of `(gate, target qubits)` pairs (not a
//! linked list of heap nodes) run against a distribution over Pauli strings.

pub mod gates;

pub use gates::{Gate, GateKind};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::error_model::ErrorModel;
use crate::table::ErrorTable;

#[derive(Debug, Clone)]
struct Element {
    gate: Gate,
    targets: Vec<usize>,
}

/// An ordered sequence of gates acting on a fixed-size register, plus an
/// optional background wire-noise model applied to idle qubits every step.
#[derive(Debug, Clone)]
pub struct Circuit {
    n_qubits: usize,
    elements: Vec<Element>,
    wire_noise: Option<ErrorModel>,
}

impl Circuit {
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            elements: Vec::new(),
            wire_noise: None,
        }
    }

    pub fn with_wire_noise(mut self, model: ErrorModel) -> Self {
        self.wire_noise = Some(model);
        self
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Appends a gate acting on `targets` to the end of the circuit.
    pub fn push(&mut self, gate: Gate, targets: Vec<usize>) {
        self.elements.push(Element { gate, targets });
    }

    /// Prepends a gate to the front of the circuit; used when building a
    /// circuit's inverse by reversing gate order (`circuit_add_gate_start`).
    pub fn prepend(&mut self, gate: Gate, targets: Vec<usize>) {
        self.elements.insert(0, Element { gate, targets });
    }

    /// Builds the inverse of a Clifford-only circuit by reversing element
    /// order; every generator here (H, CNOT, Phase-cubed for Phase) is
    /// self-inverse or appears in the triple that is.
    pub fn reversed(&self) -> Circuit {
        let mut out = Circuit::new(self.n_qubits);
        out.wire_noise = self.wire_noise.clone();
        for element in self.elements.iter().rev() {
            out.elements.push(element.clone());
        }
        out
    }

    fn untouched(&self, touched: &[usize]) -> Vec<usize> {
        (0..self.n_qubits).filter(|q| !touched.contains(q)).collect()
    }

    fn run_with(&self, input: &ErrorTable, cfg: &RuntimeConfig, apply_wire_noise: bool) -> Result<ErrorTable> {
        let mut dist = input.clone();
        for element in &self.elements {
            dist = element.gate.apply(&dist, &element.targets, cfg)?;
            if apply_wire_noise {
                if let Some(model) = &self.wire_noise {
                    let wire_gate = Gate::wire_noise(model.clone());
                    for q in self.untouched(&element.targets) {
                        dist = wire_gate.apply(&dist, &[q], cfg)?;
                    }
                }
            }
        }
        Ok(dist)
    }

    /// Default dispatcher: each gate's operation-plus-noise, then wire noise
    /// on every qubit that gate didn't touch.
    pub fn run(&self, input: &ErrorTable, cfg: &RuntimeConfig) -> Result<ErrorTable> {
        self.run_with(input, cfg, true)
    }

    /// Suppresses wire noise; gate-local error models (if any) still apply.
    pub fn run_noiseless(&self, input: &ErrorTable, cfg: &RuntimeConfig) -> Result<ErrorTable> {
        self.run_with(input, cfg, false)
    }

    /// Steps the input distribution up from `n_code` to `n_code + n_ancilla`
    /// qubits, then runs the default dispatcher over the joint register.
    pub fn run_syndrome_measurement(&self, input: &ErrorTable, n_ancilla: usize, cfg: &RuntimeConfig) -> Result<ErrorTable> {
        let stepped = input.step_up(n_ancilla)?;
        self.run(&stepped, cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symplectic::SymplecticMatrix;

    #[test]
    fn bell_pair_push_forward_preserves_mass() {
        let mut circuit = Circuit::new(2);
        circuit.push(Gate::hadamard(), vec![0]);
        circuit.push(Gate::cnot(), vec![0, 1]);
        let input = ErrorTable::identity(2).unwrap();
        let out = circuit.run_noiseless(&input, &RuntimeConfig::sequential()).unwrap();
        assert!((out.total_mass() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_undoes_a_self_inverse_circuit() {
        let mut circuit = Circuit::new(2);
        circuit.push(Gate::hadamard(), vec![0]);
        circuit.push(Gate::cnot(), vec![0, 1]);
        let inverse = circuit.reversed();
        let input = ErrorTable::identity(2).unwrap();
        let cfg = RuntimeConfig::sequential();
        let forward = circuit.run_noiseless(&input, &cfg).unwrap();
        let back = inverse.run_noiseless(&forward, &cfg).unwrap();
        let identity = SymplecticMatrix::zeros(2, 1);
        assert!((back.get(identity.to_int(0) as usize) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn wire_noise_only_touches_idle_qubits() {
        let model = ErrorModel::iid(1, 0.2);
        let mut circuit = Circuit::new(2).with_wire_noise(model);
        circuit.push(Gate::identity(1), vec![0]);
        let input = ErrorTable::identity(2).unwrap();
        let out = circuit.run(&input, &RuntimeConfig::sequential()).unwrap();
        assert!((out.total_mass() - 1.0).abs() < 1e-9);
    }
}
