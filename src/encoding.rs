//! Maps a [`symplectic::TableauOp`] sequence onto a runnable
//! [`crate::circuit::Circuit`], so a code's encoding circuit (synthesised
//! from its tableau reduction) can actually be executed against a
//! distribution rather than just inspected as a list of ops.

use symplectic::{SymplecticMatrix, Tableau, TableauOp};

use crate::circuit::{Circuit, Gate};
use crate::error::Result;

fn op_to_gate(op: TableauOp) -> (Gate, Vec<usize>) {
    match op {
        TableauOp::H(q) => (Gate::hadamard(), vec![q]),
        TableauOp::S(q) => (Gate::phase(), vec![q]),
        TableauOp::Cnot(c, t) => (Gate::cnot(), vec![c, t]),
    }
}

/// Assembles a runnable circuit from a tableau op sequence.
pub fn circuit_from_ops(n: usize, ops: &[TableauOp]) -> Circuit {
    let mut circuit = Circuit::new(n);
    for &op in ops {
        let (gate, targets) = op_to_gate(op);
        circuit.push(gate, targets);
    }
    circuit
}

/// Synthesises and runs the encoding circuit for a code's tableau, against
/// the all-identity input distribution. The result is the code's output
/// distribution: every Pauli in its support should have zero syndrome.
pub fn encode_from_tableau(tableau: &mut Tableau, cfg: &crate::config::RuntimeConfig) -> Result<crate::table::ErrorTable> {
    let n = tableau.n_qubits();
    let ops = tableau.synthesise_encoding_circuit()?;
    let circuit = circuit_from_ops(n, &ops);
    let input = crate::table::ErrorTable::identity(n)?;
    circuit.run_noiseless(&input, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;

    fn standard_x_basis(n: usize) -> SymplecticMatrix {
        let mut m = SymplecticMatrix::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1);
        }
        m
    }

    #[test]
    fn encoding_circuit_output_lands_in_the_code_space() {
        // Code = X0 X1, with an independent logical Z0 filling the second row.
        let mut code = SymplecticMatrix::zeros(2, 1);
        code.set(0, 0, 1);
        code.set(0, 1, 1);
        let mut logical_z = SymplecticMatrix::zeros(2, 1);
        logical_z.set(0, 0 + 2, 1);
        let stab_block = {
            let mut m = SymplecticMatrix::zeros(2, 2);
            m.row_xor_from(0, &code, 0);
            m.row_xor_from(1, &logical_z, 0);
            m
        };
        let destab = standard_x_basis(2);
        let mut tableau = Tableau::from_rows(2, &destab, &stab_block).unwrap();

        let out = encode_from_tableau(&mut tableau, &RuntimeConfig::sequential()).unwrap();
        for (index, prob) in out.iter_nonzero() {
            if prob <= 0.0 {
                continue;
            }
            let e = SymplecticMatrix::from_int(2, index as u64);
            let syndrome = code.syndrome(&e);
            assert!(syndrome.iter().all(|&b| b == 0), "nonzero syndrome in encoder output: {syndrome:?}");
        }
    }
}
