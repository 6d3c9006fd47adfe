//! The `2n x 2n` symplectic tableau of a stabiliser code: rows `0..n` are
//! destabilisers, rows `n..2n` are the code's stabilisers with its logical
//! operators filling any rank deficiency. [`Tableau::synthesise_encoding_circuit`]
//! reduces the tableau to the canonical `X_1..X_n / Z_1..Z_n` form and
//! returns the Clifford circuit that performs the reverse transformation —
//! the encoder that maps `|0...0>` onto the code space.
//!
//! The reduction is a Cleve-Gottesman-style construction, split into two
//! provably order-independent phases: first the stabiliser block's X-part is
//! driven to the identity by column-style Gaussian elimination (realised as
//! CNOTs), then its Z-part is cleared to zero using CZ gates (realised as
//! `H, CNOT, H` triples), which never touch any X bit and so cannot disturb
//! a block that has already been finished. Because every commuting
//! generator set keeps its pairwise commutation relations under Clifford
//! conjugation, once the stabiliser block is pinned to `Z_1..Z_n` the
//! destabiliser block's X-part is already forced to the identity for free;
//! only its own (symmetric) Z-part still needs clearing.

use crate::destabiliser::DestabiliserSet;
use crate::error::{Error, Result};
use crate::matrix::SymplecticMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableauOp {
    H(usize),
    S(usize),
    Cnot(usize, usize),
}

fn apply_op_all(mat: &mut SymplecticMatrix, op: TableauOp) {
    match op {
        TableauOp::H(q) => mat.apply_h_all(q),
        TableauOp::S(q) => mat.apply_s_all(q),
        TableauOp::Cnot(c, t) => mat.apply_cnot_all(c, t),
    }
}

fn standard_x_basis(n: usize) -> SymplecticMatrix {
    let mut m = SymplecticMatrix::zeros(n, n);
    for i in 0..n {
        m.set(i, i, 1);
    }
    m
}

/// Reverses a gate sequence into its inverse: `H` and `CNOT` are their own
/// inverse, `S` is reversed as three repeated applications (`S^-1 = S^3`)
/// rather than introducing a dedicated `Sdg` op.
fn invert_ops(ops: &[TableauOp]) -> Vec<TableauOp> {
    let mut out = Vec::with_capacity(ops.len());
    for op in ops.iter().rev() {
        match *op {
            TableauOp::H(q) => out.push(TableauOp::H(q)),
            TableauOp::Cnot(c, t) => out.push(TableauOp::Cnot(c, t)),
            TableauOp::S(q) => {
                out.push(TableauOp::S(q));
                out.push(TableauOp::S(q));
                out.push(TableauOp::S(q));
            }
        }
    }
    out
}

pub struct Tableau {
    n: usize,
    mat: SymplecticMatrix,
}

impl Tableau {
    pub fn from_rows(n: usize, destabilisers: &SymplecticMatrix, stabilisers: &SymplecticMatrix) -> Result<Self> {
        if destabilisers.height() != n || stabilisers.height() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: destabilisers.height().max(stabilisers.height()),
            });
        }
        let mut mat = SymplecticMatrix::zeros(n, 2 * n);
        for r in 0..n {
            mat.row_xor_from(r, destabilisers, r);
            mat.row_xor_from(n + r, stabilisers, r);
        }
        Ok(Self { n, mat })
    }

    pub fn n_qubits(&self) -> usize {
        self.n
    }

    pub fn destabiliser_row(&self, i: usize) -> SymplecticMatrix {
        self.mat.row(i)
    }

    pub fn stabiliser_row(&self, i: usize) -> SymplecticMatrix {
        self.mat.row(self.n + i)
    }

    fn apply_h(&mut self, q: usize) -> TableauOp {
        self.mat.apply_h_all(q);
        TableauOp::H(q)
    }

    fn apply_s(&mut self, q: usize) -> TableauOp {
        self.mat.apply_s_all(q);
        TableauOp::S(q)
    }

    fn apply_cnot(&mut self, c: usize, t: usize) -> TableauOp {
        self.mat.apply_cnot_all(c, t);
        TableauOp::Cnot(c, t)
    }

    /// Promotes any stabiliser-block column whose X-part is all-zero by
    /// applying a Hadamard, pulling Z-support into the X-block so the
    /// subsequent Gaussian elimination has something to pivot on.
    fn promote_zero_columns(&mut self, ops: &mut Vec<TableauOp>, row_offset: usize) {
        let n = self.n;
        for q in 0..n {
            let col_zero = (0..n).all(|r| self.mat.get(row_offset + r, q) == 0);
            if col_zero {
                ops.push(self.apply_h(q));
            }
        }
    }

    /// Drives the `n x n` X-submatrix of the block starting at `row_offset`
    /// to the identity, using only column-style CNOT updates. Source
    /// columns for the "make the pivot 1" step are restricted to
    /// `p+1..n` so that an already-fixed row is never used to corrupt a
    /// later one (an already-fixed row has value 0 everywhere but its own
    /// pivot, and since rows fixed so far are linearly independent, the
    /// current row must still have a 1 beyond its own pivot column).
    fn gaussian_eliminate_x_block(&mut self, ops: &mut Vec<TableauOp>, row_offset: usize) -> Result<()> {
        let n = self.n;
        for p in 0..n {
            if self.mat.get(row_offset + p, p) == 0 {
                let q = (p + 1..n).find(|&q| self.mat.get(row_offset + p, q) == 1);
                match q {
                    Some(q) => ops.push(self.apply_cnot(q, p)),
                    None => {
                        return Err(Error::NoDestabilisersFound);
                    }
                }
            }
            for q in 0..n {
                if q != p && self.mat.get(row_offset + p, q) == 1 {
                    ops.push(self.apply_cnot(p, q));
                }
            }
        }
        Ok(())
    }

    /// Clears the Z-part of the block at `row_offset`, assuming its X-part
    /// is already the identity (so the block's rows pairwise commute
    /// exactly when its Z-part is symmetric, which it must be here). Each
    /// off-diagonal pair is cleared by a CZ gate (`H, CNOT, H`), which never
    /// touches any X bit and so cannot disturb a different, already-fixed
    /// block; the diagonal is cleared with `S`, which likewise only touches
    /// rows whose X-component at that qubit is 1.
    fn clear_z_block(&mut self, ops: &mut Vec<TableauOp>, row_offset: usize) {
        let n = self.n;
        for p in 0..n {
            for q in (p + 1)..n {
                if self.mat.get(row_offset + p, q + n) == 1 {
                    ops.push(self.apply_h(q));
                    ops.push(self.apply_cnot(p, q));
                    ops.push(self.apply_h(q));
                }
            }
        }
        for q in 0..n {
            if self.mat.get(row_offset + q, q + n) == 1 {
                ops.push(self.apply_s(q));
            }
        }
    }

    /// Reduces `self` in place to the canonical tableau (destabilisers
    /// `X_1..X_n`, stabilisers `Z_1..Z_n`) and returns the encoder: the
    /// Clifford circuit that performs the reverse transformation, so
    /// running it against the all-identity distribution produces the code's
    /// distribution.
    pub fn synthesise_encoding_circuit(&mut self) -> Result<Vec<TableauOp>> {
        let n = self.n;
        let mut reduce_to_canonical = Vec::new();
        self.promote_zero_columns(&mut reduce_to_canonical, n);
        self.gaussian_eliminate_x_block(&mut reduce_to_canonical, n)?;
        self.clear_z_block(&mut reduce_to_canonical, n);
        self.clear_z_block(&mut reduce_to_canonical, 0);
        let _ = n;
        Ok(invert_ops(&reduce_to_canonical))
    }

    /// Builds a destabiliser set for `code` (height `h`) given `logicals`
    /// (height `2k`, first `k` rows the logical X operators and the
    /// remaining `k` the logical Z operators, with `h + k == n`) by
    /// reducing `code ++ logical-Z` to the canonical stabiliser form and
    /// reading destabilisers off as the pre-image of `X_1..X_n`.
    pub(crate) fn destabilisers_from_code(
        n: usize,
        h: usize,
        code: &SymplecticMatrix,
        logicals: &SymplecticMatrix,
    ) -> Result<DestabiliserSet> {
        let k = logicals.height() / 2;
        if h + k != n {
            return Err(Error::DimensionMismatch { expected: n, found: h + k });
        }
        let mut stabiliser_block = SymplecticMatrix::zeros(n, n);
        for r in 0..h {
            stabiliser_block.row_xor_from(r, code, r);
        }
        for j in 0..k {
            stabiliser_block.row_xor_from(h + j, logicals, k + j);
        }
        let placeholder_destab = standard_x_basis(n);
        let mut tableau = Tableau::from_rows(n, &placeholder_destab, &stabiliser_block)?;

        let mut reduce_to_canonical = Vec::new();
        tableau.promote_zero_columns(&mut reduce_to_canonical, n);
        tableau.gaussian_eliminate_x_block(&mut reduce_to_canonical, n)?;
        tableau.clear_z_block(&mut reduce_to_canonical, n);

        let u_inverse = invert_ops(&reduce_to_canonical);
        let mut destab_rows = standard_x_basis(n);
        for op in &u_inverse {
            apply_op_all(&mut destab_rows, *op);
        }

        let mut out = SymplecticMatrix::zeros(n, h);
        for r in 0..h {
            out.row_xor_from(r, &destab_rows, r);
        }
        Ok(DestabiliserSet::from_rows_unchecked(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_qubit_z_stabiliser() -> (SymplecticMatrix, SymplecticMatrix) {
        let mut code = SymplecticMatrix::zeros(1, 1);
        code.set(0, 0 + 1, 1); // Z0
        let logicals = SymplecticMatrix::zeros(1, 0);
        (code, logicals)
    }

    #[test]
    fn trivial_code_needs_no_gates() {
        let (code, logicals) = single_qubit_z_stabiliser();
        let destab = standard_x_basis(1);
        let mut tableau = Tableau::from_rows(1, &destab, &code).unwrap();
        let ops = tableau.synthesise_encoding_circuit().unwrap();
        assert!(ops.is_empty());
        let _ = logicals;
    }

    #[test]
    fn x_stabiliser_requires_a_hadamard() {
        // Code is X0, which already has full X-rank; no Hadamard should be
        // needed, but its Z-part (zero) is already clear too, so no ops.
        let mut code = SymplecticMatrix::zeros(1, 1);
        code.set(0, 0, 1); // X0
        let destab = standard_x_basis(1);
        let mut tableau = Tableau::from_rows(1, &destab, &code).unwrap();
        let ops = tableau.synthesise_encoding_circuit().unwrap();
        assert!(ops.is_empty());
    }

    #[test]
    fn reduction_lands_on_the_canonical_tableau() {
        // Code = X0 X1, stabiliser block needs promotion/elimination to reach Z.
        let mut code = SymplecticMatrix::zeros(2, 1);
        code.set(0, 0, 1);
        code.set(0, 1, 1);
        let mut logical_z = SymplecticMatrix::zeros(2, 1);
        logical_z.set(0, 0 + 2, 1); // Z0, independent of X0 X1
        let stab_block = {
            let mut m = SymplecticMatrix::zeros(2, 2);
            m.row_xor_from(0, &code, 0);
            m.row_xor_from(1, &logical_z, 0);
            m
        };
        let destab = standard_x_basis(2);
        let mut tableau = Tableau::from_rows(2, &destab, &stab_block).unwrap();
        tableau.synthesise_encoding_circuit().unwrap();
        for i in 0..2 {
            let row = tableau.stabiliser_row(i);
            assert!(row.is_z(0, i), "row {i} did not converge to Z_{i}");
            assert_eq!(row.weight(0), 1);
        }
    }
}
