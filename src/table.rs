//! Error-probability table: a dense distribution over the `4^n` Pauli
//! strings on an n-qubit register, indexed by the string's big-endian
//! integer encoding (see [`symplectic::SymplecticMatrix::to_int`]).

use ndarray::Array1;
use symplectic::SymplecticMatrix;

use crate::error::{Error, Result};

/// `8 * 4^n` bytes, the resident size of an n-qubit [`ErrorTable`].
pub fn bytes_in_table(n: usize) -> Result<usize> {
    size(n).map(|len| len * std::mem::size_of::<f64>())
}

fn size(n: usize) -> Result<usize> {
    2usize
        .checked_pow(2 * n as u32)
        .ok_or(Error::OutOfCapacity(1u128 << (2 * n as u32)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorTable {
    n: usize,
    probs: Array1<f64>,
}

impl ErrorTable {
    pub fn zeros(n: usize) -> Result<Self> {
        let len = size(n)?;
        Ok(Self {
            n,
            probs: Array1::zeros(len),
        })
    }

    /// All mass on the identity Pauli.
    pub fn identity(n: usize) -> Result<Self> {
        let mut table = Self::zeros(n)?;
        table.probs[0] = 1.0;
        Ok(table)
    }

    pub fn n_qubits(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.probs[index]
    }

    pub fn get_pauli(&self, p: &SymplecticMatrix) -> f64 {
        self.get(p.to_int(0) as usize)
    }

    pub fn set(&mut self, index: usize, value: f64) {
        self.probs[index] = value;
    }

    pub fn add(&mut self, index: usize, value: f64) {
        self.probs[index] += value;
    }

    pub fn add_pauli(&mut self, p: &SymplecticMatrix, value: f64) {
        self.add(p.to_int(0) as usize, value);
    }

    pub fn total_mass(&self) -> f64 {
        self.probs.sum()
    }

    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.probs
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != 0.0)
            .map(|(i, &p)| (i, p))
    }

    /// Embeds `self` (on `n` qubits) into a fresh table on `n + k` qubits,
    /// placing every mass point in the low-`n`-qubit subspace (the new
    /// qubits are appended as identity). Each `n`-bit X/Z field keeps its
    /// column order (column 0 is the field's MSB) and is shifted left by
    /// `k` bits so the appended columns land at the low end.
    pub fn step_up(&self, k: usize) -> Result<Self> {
        let n = self.n;
        let mask_n = if n == 0 { 0 } else { (1usize << n) - 1 };
        let mut out = Self::zeros(n + k)?;
        for (index, prob) in self.iter_nonzero() {
            let x_field = (index >> n) & mask_n;
            let z_field = index & mask_n;
            let new_index = (x_field << (n + 2 * k)) | (z_field << k);
            out.add(new_index, prob);
        }
        Ok(out)
    }

    /// Marginalises out the top `k` qubits (columns `n-k..n`), summing mass
    /// over every value they could take.
    pub fn step_down(&self, k: usize) -> Result<Self> {
        if k > self.n {
            return Err(Error::DimensionMismatch {
                expected: self.n,
                found: k,
            });
        }
        let n = self.n;
        let keep = n - k;
        let mask_k = if k == 0 { 0 } else { (1usize << k) - 1 };
        let mut out = Self::zeros(keep)?;
        for (index, prob) in self.iter_nonzero() {
            let x_field = index >> n;
            let z_field = index & ((1usize << n) - 1);
            let x_keep = x_field >> k;
            let z_keep = z_field >> k;
            let _x_extra = x_field & mask_k;
            let _z_extra = z_field & mask_k;
            let folded = (x_keep << keep) | z_keep;
            out.add(folded, prob);
        }
        Ok(out)
    }
}
