//! Builds the (non-fault-tolerant) syndrome-measurement circuit: one ancilla
//! per stabiliser, CNOT fan-in with basis-change wrappers for X/Y stabiliser
//! factors.

use symplectic::SymplecticMatrix;

use crate::circuit::{Circuit, Gate};

/// Constructs a circuit on `n_code + h` qubits measuring every stabiliser
/// row of `code` onto its own ancilla (qubit `n_code + j` for stabiliser `j`).
pub fn build(code: &SymplecticMatrix) -> Circuit {
    let n_code = code.n_qubits();
    let h = code.height();
    let mut circuit = Circuit::new(n_code + h);

    for j in 0..h {
        let ancilla = n_code + j;
        for i in 0..n_code {
            if code.is_i(j, i) {
                continue;
            }
            if code.is_x(j, i) {
                circuit.push(Gate::hadamard(), vec![i]);
                circuit.push(Gate::cnot(), vec![i, ancilla]);
                circuit.push(Gate::hadamard(), vec![i]);
            } else if code.is_z(j, i) {
                circuit.push(Gate::cnot(), vec![i, ancilla]);
            } else {
                // Y: S^3, H, CNOT, H, S.
                circuit.push(Gate::phase(), vec![i]);
                circuit.push(Gate::phase(), vec![i]);
                circuit.push(Gate::phase(), vec![i]);
                circuit.push(Gate::hadamard(), vec![i]);
                circuit.push(Gate::cnot(), vec![i, ancilla]);
                circuit.push(Gate::hadamard(), vec![i]);
                circuit.push(Gate::phase(), vec![i]);
            }
        }
    }
    circuit
}
