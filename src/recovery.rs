//! Recovery: decode an ancilla syndrome, apply the recovery Pauli to the
//! data block, and trace the ancilla qubits out by accumulating into a
//! `4^n_code`-sized table.

use symplectic::SymplecticMatrix;

use crate::error::Result;
use crate::table::ErrorTable;

fn extract_syndrome(p: &SymplecticMatrix, n_code: usize, n_ancilla: usize) -> Vec<u8> {
    (0..n_ancilla).map(|j| p.get(0, n_code + j)).collect()
}

fn extract_data_block(p: &SymplecticMatrix, n_code: usize, n: usize) -> SymplecticMatrix {
    let mut data = SymplecticMatrix::zeros(n_code, 1);
    for q in 0..n_code {
        data.set(0, q, p.get(0, q));
        data.set(0, q + n_code, p.get(0, q + n));
    }
    data
}

/// Runs the recovery dispatcher over `input`, a distribution on
/// `n_code + n_ancilla` qubits: for every non-zero branch, decode its
/// ancilla syndrome, XOR the recovery Pauli into the data block, and fold
/// the result into a `4^n_code`-sized output table (the ancilla is
/// implicitly discarded).
pub fn run(
    input: &ErrorTable,
    n_code: usize,
    n_ancilla: usize,
    decode: impl Fn(&[u8]) -> SymplecticMatrix,
) -> Result<ErrorTable> {
    let n = n_code + n_ancilla;
    let mut out = ErrorTable::zeros(n_code)?;
    for (index, prob) in input.iter_nonzero() {
        let p = SymplecticMatrix::from_int(n, index as u64);
        let syndrome = extract_syndrome(&p, n_code, n_ancilla);
        let recovery = decode(&syndrome);
        let mut data = extract_data_block(&p, n_code, n);
        data.row_xor_from(0, &recovery, 0);
        out.add(data.to_int(0) as usize, prob);
    }
    Ok(out)
}
