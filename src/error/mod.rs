use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A decoder saw a syndrome it has no entry for.
    #[error("no recovery registered for syndrome {0:#x}")]
    UnknownSyndrome(u64),

    /// Requested more qubits of table capacity than fit in memory.
    #[error("error table would need {0} entries, which exceeds usize capacity")]
    OutOfCapacity(u128),

    /// A table/circuit operation mixed incompatible qubit counts.
    #[error("expected {expected} qubits, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A gate was asked to act on more targets than its qubit count allows.
    #[error("gate acting on {gate_qubits} qubits given {given} targets")]
    InvalidTarget { gate_qubits: usize, given: usize },

    #[error(transparent)]
    Symplectic(#[from] symplectic::Error),
}
