//! Error models: a closure `Pauli -> probability` plus the owned parameters
//! it closes over. Kept as a closed enum (rather than a trait object with a
//! destructor table) per the tagged-variant redesign of the noise layer.

use symplectic::{PauliIterator, SymplecticMatrix};

use crate::table::ErrorTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone)]
pub enum ErrorModel {
    /// `(p/3)^wt * (1-p)^(n-wt)`.
    Iid { n: usize, p: f64 },
    /// Biased towards `basis`: `p_b^wt_b * p_nb^(wt-wt_b) * (1-p)^(n-wt)`,
    /// with `p_b = p/(1 + 2/eta)`, `p_nb = p/(2+eta)`.
    BiasedIid {
        n: usize,
        p: f64,
        eta: f64,
        basis: Basis,
    },
    /// Only identity and weight-one strings carry mass; weight-one mass is
    /// spread uniformly over the `3n` weight-one strings.
    WeightOne { n: usize, p: f64 },
    /// Queries a precomputed table directly.
    Lookup { table: ErrorTable },
}

impl ErrorModel {
    pub fn iid(n: usize, p: f64) -> Self {
        Self::Iid { n, p }
    }

    pub fn biased_iid(n: usize, p: f64, eta: f64, basis: Basis) -> Self {
        Self::BiasedIid { n, p, eta, basis }
    }

    pub fn weight_one(n: usize, p: f64) -> Self {
        Self::WeightOne { n, p }
    }

    pub fn lookup(table: ErrorTable) -> Self {
        Self::Lookup { table }
    }

    pub fn n_qubits(&self) -> usize {
        match self {
            Self::Iid { n, .. } => *n,
            Self::BiasedIid { n, .. } => *n,
            Self::WeightOne { n, .. } => *n,
            Self::Lookup { table } => table.n_qubits(),
        }
    }

    /// `call(Pauli) -> probability`.
    pub fn call(&self, p: &SymplecticMatrix) -> f64 {
        match self {
            Self::Iid { n, p: prob } => {
                let wt = p.weight(0);
                (prob / 3.0).powi(wt as i32) * (1.0 - prob).powi((n - wt) as i32)
            }
            Self::BiasedIid { n, p: prob, eta, basis } => {
                let wt = p.weight(0);
                let wt_b = match basis {
                    Basis::X => p.weight_x(0),
                    Basis::Y => p.weight_y(0),
                    Basis::Z => p.weight_z(0),
                };
                let p_b = prob / (1.0 + 2.0 / eta);
                let p_nb = prob / (2.0 + eta);
                p_b.powi(wt_b as i32) * p_nb.powi((wt - wt_b) as i32) * (1.0 - prob).powi((n - wt) as i32)
            }
            Self::WeightOne { n, p: prob } => {
                let wt = p.weight(0);
                match wt {
                    0 => 1.0 - prob,
                    1 => prob / (3.0 * *n as f64),
                    _ => 0.0,
                }
            }
            Self::Lookup { table } => table.get_pauli(p),
        }
    }

    /// Materialises the model into a dense [`ErrorTable`] by iterating every
    /// Pauli string on its native qubit count.
    pub fn to_table(&self) -> crate::error::Result<ErrorTable> {
        let n = self.n_qubits();
        let mut table = ErrorTable::zeros(n)?;
        for p in PauliIterator::full(n) {
            table.add_pauli(&p, self.call(&p));
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn iid_model_sums_to_one() {
        let model = ErrorModel::iid(4, 0.1);
        let total: f64 = PauliIterator::full(4).map(|p| model.call(&p)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn biased_iid_model_sums_to_one() {
        let model = ErrorModel::biased_iid(3, 0.01, 2.0, Basis::Z);
        let total: f64 = PauliIterator::full(3).map(|p| model.call(&p)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn weight_one_model_ignores_higher_weights() {
        let model = ErrorModel::weight_one(3, 0.03);
        for p in PauliIterator::new(3, 2, 6) {
            assert_eq!(model.call(&p), 0.0);
        }
    }

    #[test]
    fn three_qubit_bit_flip_matches_spec_example() {
        // IID p=0.05 on 3 qubits: identity + single-bit-flip mass = (1-p)^3 + 3p(1-p)^2.
        let model = ErrorModel::iid(3, 0.05);
        let identity = SymplecticMatrix::zeros(3, 1);
        let mut single = 0.0;
        for q in 0..3 {
            let mut e = SymplecticMatrix::zeros(3, 1);
            e.set(0, q, 1);
            single += model.call(&e);
        }
        let total = model.call(&identity) + single;
        assert_relative_eq!(total, 0.992750, epsilon = 1e-6);
    }
}
