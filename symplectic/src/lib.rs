//! Bit-packed symplectic representation of multi-qubit Pauli operators:
//! weight-ordered enumeration, destabiliser construction and the
//! Cleve-Gottesman encoding-circuit tableau that the rest of the workspace
//! builds its stabiliser-code simulation on.

pub mod clifford;
pub mod combinatorics;
pub mod destabiliser;
pub mod error;
pub mod matrix;
pub mod pauli_iter;
pub mod tableau;

pub use destabiliser::{find_backtracking, find_via_tableau, DestabiliserSet};
pub use error::{Error, Result};
pub use matrix::SymplecticMatrix;
pub use pauli_iter::PauliIterator;
pub use tableau::{Tableau, TableauOp};

pub mod prelude {
    pub use crate::destabiliser::{find_backtracking, find_via_tableau, DestabiliserSet};
    pub use crate::error::{Error, Result};
    pub use crate::matrix::SymplecticMatrix;
    pub use crate::pauli_iter::PauliIterator;
    pub use crate::tableau::{Tableau, TableauOp};
}
