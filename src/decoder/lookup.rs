use std::collections::HashMap;

use symplectic::SymplecticMatrix;

use crate::decoder::syndrome_to_index;
use crate::error::{Error, Result};

/// A sparse syndrome-to-recovery map. `call` defaults unknown syndromes to
/// the identity Pauli (the current-code behaviour described by the recovery
/// algorithm); `try_call` is the strict variant that surfaces `UnknownSyndrome`.
#[derive(Debug, Clone)]
pub struct LookupDecoder {
    n: usize,
    map: HashMap<u64, SymplecticMatrix>,
}

impl LookupDecoder {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            map: HashMap::new(),
        }
    }

    pub fn insert(&mut self, syndrome: &[u8], recovery: SymplecticMatrix) {
        self.map.insert(syndrome_to_index(syndrome), recovery);
    }

    pub fn call(&self, syndrome: &[u8]) -> SymplecticMatrix {
        let index = syndrome_to_index(syndrome);
        self.map
            .get(&index)
            .cloned()
            .unwrap_or_else(|| SymplecticMatrix::zeros(self.n, 1))
    }

    pub fn try_call(&self, syndrome: &[u8]) -> Result<SymplecticMatrix> {
        let index = syndrome_to_index(syndrome);
        self.map
            .get(&index)
            .cloned()
            .ok_or(Error::UnknownSyndrome(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_syndrome_defaults_to_identity_via_call() {
        let decoder = LookupDecoder::new(2);
        let recovery = decoder.call(&[1, 0]);
        assert_eq!(recovery.weight(0), 0);
    }

    #[test]
    fn unknown_syndrome_errors_via_try_call() {
        let decoder = LookupDecoder::new(2);
        assert!(decoder.try_call(&[1, 0]).is_err());
    }

    #[test]
    fn known_syndrome_returns_inserted_recovery() {
        let mut decoder = LookupDecoder::new(2);
        let mut recovery = SymplecticMatrix::zeros(2, 1);
        recovery.set(0, 0, 1);
        decoder.insert(&[1, 0], recovery.clone());
        assert_eq!(decoder.call(&[1, 0]), recovery);
        assert_eq!(decoder.try_call(&[1, 0]).unwrap(), recovery);
    }
}
