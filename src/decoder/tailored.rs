//! The tailored decoder: a syndrome-indexed recovery table built by
//! marginalising the probability mass of every physical error into its
//! logical coset, then picking the most probable coset per syndrome.

use symplectic::{PauliIterator, SymplecticMatrix};

use crate::decoder::{destabiliser::DestabiliserDecoder, index_to_syndrome, syndrome_to_index};
use crate::error::Result;
use crate::error_model::ErrorModel;

fn xor_rows(a: &SymplecticMatrix, b: &SymplecticMatrix) -> SymplecticMatrix {
    let mut out = a.clone();
    out.row_xor_from(0, b, 0);
    out
}

#[derive(Debug, Clone)]
pub struct TailoredDecoder {
    n: usize,
    h: usize,
    optimal_recovery: Vec<SymplecticMatrix>,
}

impl TailoredDecoder {
    /// Builds the decoder from a code's stabilisers, its logical operators,
    /// and the noise model it should be optimal against.
    pub fn build(code: &SymplecticMatrix, logicals: &SymplecticMatrix, noise: &ErrorModel) -> Result<Self> {
        let n = code.n_qubits();
        let h = code.height();
        let k2 = logicals.height();

        let destab = symplectic::find_via_tableau(code, logicals)?;
        let destab_decoder = DestabiliserDecoder::new(n, destab);
        // "Logical destabilisers": the same construction with logicals playing
        // the role of stabilisers, and the code's own stabilisers as the
        // commutation constraint the result must respect.
        let destab_logical_set = symplectic::find_via_tableau(logicals, code)?;
        let destab_logical = DestabiliserDecoder::new(n, destab_logical_set);

        let n_syndromes = 1usize << h;
        let n_cosets = 1usize << k2;
        let mut table_prob = vec![vec![0.0f64; n_cosets]; n_syndromes];

        for e in PauliIterator::full(n) {
            let syndrome = code.syndrome(&e);
            let s_index = syndrome_to_index(&syndrome) as usize;
            let r0 = destab_decoder.call(&syndrome);
            let residual = xor_rows(&r0, &e);
            let logical_syndrome = logicals.syndrome(&residual);
            let l_index = syndrome_to_index(&logical_syndrome) as usize;
            table_prob[s_index][l_index] += noise.call(&e);
        }

        let mut optimal_recovery = Vec::with_capacity(n_syndromes);
        for s_index in 0..n_syndromes {
            let syndrome = index_to_syndrome(s_index as u64, h);
            let r0 = destab_decoder.call(&syndrome);
            let mut best_l = 0usize;
            let mut best_mass = -1.0f64;
            for (l_index, &mass) in table_prob[s_index].iter().enumerate() {
                if mass > best_mass {
                    best_mass = mass;
                    best_l = l_index;
                }
                // ties keep the earlier (smaller) l_index: strict `>` above already does this.
            }
            let logical_syndrome = index_to_syndrome(best_l as u64, k2);
            let logical_recovery = destab_logical.call(&logical_syndrome);
            optimal_recovery.push(xor_rows(&r0, &logical_recovery));
        }

        Ok(Self {
            n,
            h,
            optimal_recovery,
        })
    }

    pub fn n_qubits(&self) -> usize {
        self.n
    }

    pub fn call(&self, syndrome: &[u8]) -> SymplecticMatrix {
        debug_assert_eq!(syndrome.len(), self.h);
        let index = syndrome_to_index(syndrome) as usize;
        self.optimal_recovery[index].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_model::ErrorModel;

    fn three_qubit_bit_flip_code() -> SymplecticMatrix {
        let mut code = SymplecticMatrix::zeros(3, 2);
        code.set(0, 0 + 3, 1);
        code.set(0, 1 + 3, 1);
        code.set(1, 1 + 3, 1);
        code.set(1, 2 + 3, 1);
        code
    }

    fn three_qubit_bit_flip_logicals() -> SymplecticMatrix {
        let mut logicals = SymplecticMatrix::zeros(3, 2);
        logicals.set(0, 0, 1);
        logicals.set(0, 1, 1);
        logicals.set(0, 2, 1);
        logicals.set(1, 0 + 3, 1);
        logicals.set(1, 1 + 3, 1);
        logicals.set(1, 2 + 3, 1);
        logicals
    }

    #[test]
    fn recovers_single_bit_flips_exactly() {
        let code = three_qubit_bit_flip_code();
        let logicals = three_qubit_bit_flip_logicals();
        let noise = ErrorModel::iid(3, 0.05);
        let decoder = TailoredDecoder::build(&code, &logicals, &noise).unwrap();

        for q in 0..3 {
            let mut e = SymplecticMatrix::zeros(3, 1);
            e.set(0, q, 1);
            let syndrome = code.syndrome(&e);
            let recovery = decoder.call(&syndrome);
            let residual = xor_rows(&recovery, &e);
            let logical_syndrome = logicals.syndrome(&residual);
            assert!(logical_syndrome.iter().all(|&b| b == 0));
        }
    }
}
