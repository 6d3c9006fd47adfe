//! Destabiliser construction: given a code's stabiliser generators and a
//! choice of logical operators, finds a Pauli per generator that
//! anticommutes with it alone and commutes with everything else.

use crate::error::{Error, Result};
use crate::matrix::SymplecticMatrix;
use crate::pauli_iter::PauliIterator;
use crate::tableau::Tableau;

/// An ordered set of destabilisers, one row per stabiliser generator, with
/// `destabilisers.row(i)` paired against `code.row(i)`.
#[derive(Debug, Clone)]
pub struct DestabiliserSet {
    rows: SymplecticMatrix,
}

impl DestabiliserSet {
    pub fn rows(&self) -> &SymplecticMatrix {
        &self.rows
    }

    /// Wraps an already-computed destabiliser row block. Used by
    /// [`crate::tableau::Tableau::destabilisers_from_code`], which derives
    /// the rows algebraically rather than via the backtracking search below.
    pub(crate) fn from_rows_unchecked(rows: SymplecticMatrix) -> Self {
        Self { rows }
    }
}

fn is_valid_destabiliser(
    candidate: &SymplecticMatrix,
    code: &SymplecticMatrix,
    logicals: &SymplecticMatrix,
    chosen: &[SymplecticMatrix],
    target: usize,
) -> bool {
    for l in 0..logicals.height() {
        if candidate.row_commutes(logicals, 0, l) != 0 {
            return false;
        }
    }
    for j in 0..code.height() {
        let expected = if j == target { 1 } else { 0 };
        if candidate.row_commutes(code, 0, j) != expected {
            return false;
        }
    }
    for d in chosen {
        if candidate.row_commutes(d, 0, 0) != 0 {
            return false;
        }
    }
    true
}

fn search(
    code: &SymplecticMatrix,
    logicals: &SymplecticMatrix,
    chosen: &mut Vec<SymplecticMatrix>,
    target: usize,
    n: usize,
) -> Result<()> {
    if target == code.height() {
        return Ok(());
    }
    let mut it = PauliIterator::full(n);
    while let Some(candidate) = it.next_pauli() {
        if !is_valid_destabiliser(&candidate, code, logicals, chosen, target) {
            continue;
        }
        chosen.push(candidate);
        if search(code, logicals, chosen, target + 1, n).is_ok() {
            return Ok(());
        }
        chosen.pop();
    }
    Err(Error::NoDestabilisersFound)
}

/// Exhaustive backtracking search in ascending Pauli weight. Always finds a
/// valid destabiliser set when one exists, but its cost grows with `4^n`;
/// prefer [`find_via_tableau`] once a code exceeds roughly eight qubits.
pub fn find_backtracking(code: &SymplecticMatrix, logicals: &SymplecticMatrix) -> Result<DestabiliserSet> {
    let n = code.n_qubits();
    let h = code.height();
    let mut chosen = Vec::with_capacity(h);
    search(code, logicals, &mut chosen, 0, n)?;
    let mut rows = SymplecticMatrix::zeros(n, h);
    for (i, row) in chosen.iter().enumerate() {
        rows.row_xor_from(i, row, 0);
    }
    Ok(DestabiliserSet { rows })
}

/// Gaussian-elimination construction: builds the Clifford that sends the
/// code's stabiliser-and-logical-Z generators to the standard `Z_1..Z_n`
/// basis, then reads the destabilisers off as the image of `X_1..X_n` under
/// the inverse Clifford. Runs in `O(n^3)` instead of searching the Pauli
/// group, at the cost of needing a full-rank `(code, logicals)` pair.
pub fn find_via_tableau(code: &SymplecticMatrix, logicals: &SymplecticMatrix) -> Result<DestabiliserSet> {
    let n = code.n_qubits();
    let h = code.height();
    Tableau::destabilisers_from_code(n, h, code, logicals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_qubit_bit_flip_code() -> SymplecticMatrix {
        // Z0 Z1, Z1 Z2
        let mut code = SymplecticMatrix::zeros(3, 2);
        code.set(0, 0 + 3, 1);
        code.set(0, 1 + 3, 1);
        code.set(1, 1 + 3, 1);
        code.set(1, 2 + 3, 1);
        code
    }

    fn three_qubit_bit_flip_logicals() -> SymplecticMatrix {
        // X-bar = X0 X1 X2, Z-bar = Z0 Z1 Z2
        let mut logicals = SymplecticMatrix::zeros(3, 2);
        logicals.set(0, 0, 1);
        logicals.set(0, 1, 1);
        logicals.set(0, 2, 1);
        logicals.set(1, 0 + 3, 1);
        logicals.set(1, 1 + 3, 1);
        logicals.set(1, 2 + 3, 1);
        logicals
    }

    fn assert_valid(destab: &DestabiliserSet, code: &SymplecticMatrix, logicals: &SymplecticMatrix) {
        let rows = destab.rows();
        for i in 0..code.height() {
            for l in 0..logicals.height() {
                assert_eq!(rows.row_commutes(logicals, i, l), 0);
            }
            for j in 0..code.height() {
                let expected = if i == j { 1 } else { 0 };
                assert_eq!(rows.row_commutes(code, i, j), expected);
            }
            for k in 0..code.height() {
                if k != i {
                    assert_eq!(rows.row_commutes(rows, i, k), 0);
                }
            }
        }
    }

    #[test]
    fn backtracking_finds_valid_destabilisers_for_bit_flip_code() {
        let code = three_qubit_bit_flip_code();
        let logicals = three_qubit_bit_flip_logicals();
        let destab = find_backtracking(&code, &logicals).unwrap();
        assert_valid(&destab, &code, &logicals);
    }

    #[test]
    fn tableau_construction_agrees_with_backtracking() {
        let code = three_qubit_bit_flip_code();
        let logicals = three_qubit_bit_flip_logicals();
        let destab = find_via_tableau(&code, &logicals).unwrap();
        assert_valid(&destab, &code, &logicals);
    }
}
