use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A multi-operand operation saw operands of incompatible shape.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A qubit index was out of range, or a set of target qubits contained a
    /// duplicate where distinct indices were required.
    #[error("target qubit {0} is out of range for a {1}-qubit register")]
    InvalidTarget(usize, usize),

    #[error("duplicate target qubit {0} in operand list")]
    DuplicateTarget(usize),

    /// The code is not full rank modulo its logical operators, so no
    /// destabiliser set exists.
    #[error("no destabilisers found: code is not full rank modulo logicals")]
    NoDestabilisersFound,

    /// A `4^n`-entry (or `2^h`-entry) table was requested that does not fit
    /// in an addressable `usize`.
    #[error("requested table of {0} entries exceeds addressable capacity")]
    OutOfCapacity(u128),
}
