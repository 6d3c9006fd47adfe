use symplectic::{DestabiliserSet, SymplecticMatrix};

/// `recovery = XOR of destabiliser[i] for every syndrome bit i set`.
#[derive(Debug, Clone)]
pub struct DestabiliserDecoder {
    n: usize,
    destabilisers: DestabiliserSet,
}

impl DestabiliserDecoder {
    pub fn new(n: usize, destabilisers: DestabiliserSet) -> Self {
        Self { n, destabilisers }
    }

    pub fn call(&self, syndrome: &[u8]) -> SymplecticMatrix {
        let mut recovery = SymplecticMatrix::zeros(self.n, 1);
        let rows = self.destabilisers.rows();
        for (i, &bit) in syndrome.iter().enumerate() {
            if bit == 1 {
                recovery.row_xor_from(0, rows, i);
            }
        }
        recovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn xor_lookup_reproduces_a_single_bit_flip() {
        let code = three_qubit_bit_flip_code();
        let logicals = three_qubit_bit_flip_logicals();
        let destab = symplectic::find_via_tableau(&code, &logicals).unwrap();
        let decoder = DestabiliserDecoder::new(3, destab);

        let mut x0 = SymplecticMatrix::zeros(3, 1);
        x0.set(0, 0, 1);
        let syndrome = code.syndrome(&x0);
        let recovery = decoder.call(&syndrome);
        assert_eq!(code.syndrome(&recovery), syndrome);
    }
}
