//! # qec-sim: a stabiliser quantum error-correction simulator
//!
//! Simulates stabiliser codes under Pauli noise channels by propagating a
//! probability distribution over Pauli error strings (rather than a state
//! vector) through a Clifford circuit, then tailoring and running a decoder
//! against the resulting distribution to report residual logical error
//! rates.
//!
//! # Features
//!
//! * **Symplectic Pauli representation**: n-qubit Pauli operators modulo
//!   phase as bit-packed `(X|Z)` vectors, with a weight-ordered iterator
//!   used by every other subsystem (see [`symplectic`]).
//! * **Distribution-propagating gate engine**: gates act on a distribution
//!   over Pauli strings by composing a deterministic Clifford push-forward
//!   with a probabilistic error channel ([`circuit::Gate`]).
//! * **Decoder family**: destabiliser, tailored (optimal against a given
//!   noise model) and sparse lookup decoders ([`decoder`]).
//! * **Fault-tolerant syndrome measurement**: a flag-qubit construction that
//!   detects spreading faults during stabiliser measurement
//!   ([`flag_ft`]).

pub mod circuit;
pub mod config;
pub mod decoder;
pub mod encoding;
pub mod error;
pub mod error_model;
pub mod flag_ft;
pub mod recovery;
pub mod syndrome_circuit;
pub mod table;

pub mod prelude {
    pub use crate::circuit::{Circuit, Gate, GateKind};
    pub use crate::config::RuntimeConfig;
    pub use crate::decoder::{DestabiliserDecoder, LookupDecoder, TailoredDecoder};
    pub use crate::error::*;
    pub use crate::error_model::{Basis, ErrorModel};
    pub use crate::flag_ft::FlagFtCircuit;
    pub use crate::table::ErrorTable;
}
