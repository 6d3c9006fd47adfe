//! Flag-fault-tolerant syndrome measurement: flag qubits interleaved with
//! the data-ancilla CNOTs of each stabiliser so a fault that would spread
//! across the stabiliser's support flips a flag instead of silently
//! escaping. The hardest subsystem in this simulator: it builds one
//! sub-circuit per stabiliser, derives a flag-outcome recovery table by
//! symbolically propagating CNOT faults forward, and runs a two-pass
//! measurement (flagged branches get remeasured).

use symplectic::SymplecticMatrix;

use crate::circuit::{Circuit, Gate};
use crate::config::RuntimeConfig;
use crate::decoder::LookupDecoder;
use crate::error::Result;
use crate::table::ErrorTable;

#[derive(Debug, Clone, Copy)]
enum CnotRole {
    /// CNOT(data qubit, ancilla) — the stabiliser-measurement CNOT itself.
    DataAncilla(usize),
    /// CNOT(ancilla, flag) — a flag-tracking CNOT.
    FlagAncilla(usize),
}

fn flag_count(max_stab_weight: usize) -> usize {
    if max_stab_weight <= 1 {
        return 0;
    }
    let target = max_stab_weight - 1;
    let mut k = 0;
    while (1usize << k) < target {
        k += 1;
    }
    k
}

struct SubCircuitBuild {
    circuit: Circuit,
    events: Vec<CnotRole>,
    ancilla: usize,
}

fn build_sub_circuit(code: &SymplecticMatrix, j: usize, n_total: usize, n_code: usize, h: usize, n_flag: usize) -> SubCircuitBuild {
    let ancilla = n_code + j;
    let flag_base = n_code + h;
    let mut circuit = Circuit::new(n_total);
    let mut events = Vec::new();

    if n_flag > 0 {
        for f in 0..n_flag {
            circuit.push(Gate::prepare_x(true), vec![flag_base + f]);
        }
    }

    let targets: Vec<usize> = (0..n_code).filter(|&i| !code.is_i(j, i)).collect();
    for (c, &i) in targets.iter().enumerate() {
        let is_x = code.is_x(j, i);
        let is_y = code.is_y(j, i);
        if is_x {
            circuit.push(Gate::hadamard(), vec![i]);
        } else if is_y {
            circuit.push(Gate::phase(), vec![i]);
            circuit.push(Gate::phase(), vec![i]);
            circuit.push(Gate::phase(), vec![i]);
            circuit.push(Gate::hadamard(), vec![i]);
        }

        if n_flag > 0 {
            let f = c % n_flag;
            circuit.push(Gate::cnot(), vec![ancilla, flag_base + f]);
            events.push(CnotRole::FlagAncilla(f));
        }

        circuit.push(Gate::cnot(), vec![i, ancilla]);
        events.push(CnotRole::DataAncilla(i));

        if is_x {
            circuit.push(Gate::hadamard(), vec![i]);
        } else if is_y {
            circuit.push(Gate::hadamard(), vec![i]);
            circuit.push(Gate::phase(), vec![i]);
        }
    }

    if n_flag > 0 {
        for f in 0..n_flag {
            circuit.push(Gate::hadamard(), vec![flag_base + f]);
        }
    }

    SubCircuitBuild { circuit, events, ancilla }
}

/// Symbolically propagates each data-ancilla CNOT fault forward through the
/// remaining events of its own sub-circuit, populating a flag-outcome to
/// propagated-error table.
fn build_flag_recovery(events: &[CnotRole], ancilla: usize, n_code: usize, h: usize, n_flag: usize) -> LookupDecoder {
    let width = n_code + h;
    let mut decoder = LookupDecoder::new(width);
    for (pos, event) in events.iter().enumerate() {
        let CnotRole::DataAncilla(_origin) = event else {
            continue;
        };
        let mut err = SymplecticMatrix::zeros(width, 1);
        err.set(0, ancilla + width, 1);
        let mut flag_bits = vec![0u8; n_flag];
        for later in &events[pos + 1..] {
            match *later {
                CnotRole::FlagAncilla(f) => {
                    flag_bits[f] ^= 1;
                    err.set(0, ancilla + width, 1);
                }
                CnotRole::DataAncilla(i2) => {
                    err.xor(0, i2 + width, 1);
                }
            }
        }
        if flag_bits.iter().any(|&b| b == 1) {
            decoder.insert(&flag_bits, err);
        }
    }
    decoder
}

/// The flag-FT syndrome-measurement circuit for a single code: one
/// sub-circuit per stabiliser plus a cleanup pass, each with its own
/// flag-recovery decoder.
pub struct FlagFtCircuit {
    code: SymplecticMatrix,
    n_code: usize,
    n_ancilla: usize,
    n_flag: usize,
    sub_circuits: Vec<Circuit>,
    flag_recovery: Vec<LookupDecoder>,
    cleanup: Circuit,
}

impl FlagFtCircuit {
    pub fn build(code: &SymplecticMatrix) -> Self {
        let n_code = code.n_qubits();
        let h = code.height();
        let max_weight = (0..h).map(|j| code.weight(j)).max().unwrap_or(0);
        let n_flag = flag_count(max_weight);
        let n_total = n_code + h + n_flag;

        let mut sub_circuits = Vec::with_capacity(h);
        let mut flag_recovery = Vec::with_capacity(h);
        for j in 0..h {
            let built = build_sub_circuit(code, j, n_total, n_code, h, n_flag);
            flag_recovery.push(build_flag_recovery(&built.events, built.ancilla, n_code, h, n_flag));
            sub_circuits.push(built.circuit);
        }

        // Cleanup sub-circuit: this construction never leaves a basis change
        // open past a single stabiliser's block, so cleanup is a no-op circuit
        // kept for symmetry with the specified dispatcher shape.
        let cleanup = Circuit::new(n_total);

        Self {
            code: code.clone(),
            n_code,
            n_ancilla: h,
            n_flag,
            sub_circuits,
            flag_recovery,
            cleanup,
        }
    }

    pub fn n_flag(&self) -> usize {
        self.n_flag
    }

    fn clear_flags_and_apply_recovery(&self, dist: &ErrorTable, j: usize, pre_flag_width: usize) -> Result<(ErrorTable, ErrorTable)> {
        let width = pre_flag_width + self.n_flag;
        let mut cleared = ErrorTable::zeros(width)?;
        let mut flagged_folded = ErrorTable::zeros(pre_flag_width)?;
        for (index, prob) in dist.iter_nonzero() {
            let p = SymplecticMatrix::from_int(width, index as u64);
            let flag_bits: Vec<u8> = (0..self.n_flag).map(|f| p.get(0, pre_flag_width + f + width)).collect();
            let flagged = flag_bits.iter().any(|&b| b == 1);

            let mut body = SymplecticMatrix::zeros(pre_flag_width, 1);
            for q in 0..pre_flag_width {
                body.set(0, q, p.get(0, q));
                body.set(0, q + pre_flag_width, p.get(0, q + width));
            }
            if flagged {
                let recovery = self.flag_recovery[j].call(&flag_bits);
                body.row_xor_from(0, &recovery, 0);
                flagged_folded.add(body.to_int(0) as usize, prob);
            } else {
                let mut full = SymplecticMatrix::zeros(width, 1);
                for q in 0..pre_flag_width {
                    full.set(0, q, body.get(0, q));
                    full.set(0, q + width, body.get(0, q + pre_flag_width));
                }
                cleared.add(full.to_int(0) as usize, prob);
            }
        }
        Ok((cleared, flagged_folded))
    }

    /// Runs the two-pass flag-FT syndrome measurement over a data-only
    /// input distribution (`n_code` qubits), returning a joint distribution
    /// on `n_code + n_ancilla` qubits. Not guaranteed normalised (the
    /// remeasurement pass may add mass); renormalise at call sites that need it.
    pub fn run(&self, input: &ErrorTable, cfg: &RuntimeConfig) -> Result<ErrorTable> {
        let pre_flag_width = self.n_code + self.n_ancilla;
        let mut dist = input.step_up(self.n_ancilla + self.n_flag)?;
        let mut flagged_accum = ErrorTable::zeros(pre_flag_width)?;

        for (j, sub) in self.sub_circuits.iter().enumerate() {
            dist = sub.run(&dist, cfg)?;
            let (cleared, folded) = self.clear_flags_and_apply_recovery(&dist, j, pre_flag_width)?;
            dist = cleared;
            for (index, prob) in folded.iter_nonzero() {
                flagged_accum.add(index, prob);
            }
        }

        dist = self.cleanup.run(&dist, cfg)?;
        let pass1 = dist.step_down(self.n_flag)?;

        let flagged_data_only = flagged_accum.step_down(self.n_ancilla)?;
        let plain = crate::syndrome_circuit::build(&self.code);
        let second_pass = plain.run_syndrome_measurement(&flagged_data_only, self.n_ancilla, cfg)?;

        let mut combined = ErrorTable::zeros(pre_flag_width)?;
        for (index, prob) in pass1.iter_nonzero() {
            combined.add(index, prob);
        }
        for (index, prob) in second_pass.iter_nonzero() {
            combined.add(index, prob);
        }
        Ok(combined)
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

    #[test]
    fn weight_two_stabilisers_need_no_flags() {
        let code = three_qubit_bit_flip_code();
        let flag_circuit = FlagFtCircuit::build(&code);
        assert_eq!(flag_circuit.n_flag(), 0);
    }

    #[test]
    fn no_input_error_preserves_most_mass() {
        let code = three_qubit_bit_flip_code();
        let flag_circuit = FlagFtCircuit::build(&code);
        let input = ErrorTable::identity(3).unwrap();
        let out = flag_circuit.run(&input, &RuntimeConfig::sequential()).unwrap();
        assert!(out.total_mass() > 0.0);
    }
}
