use nalgebra::RealField;
use thiserror::Error;

use super::state::State;

/// The base trait for [`Function`](super::function::Function) and its
/// differentiable extensions.
pub trait Problem {
    /// Type of the scalar, usually f32 or f64.
    type Field: RealField + Copy;

    /// Type of the variables. Either a scalar or a vector, see [`State`].
    type State: State<Self::Field>;
}

impl<P: Problem + ?Sized> Problem for &P {
    type Field = P::Field;
    type State = P::State;
}

/// Error encountered while computing a step or a solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Shapes of vectors or matrices do not match.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    Dimension {
        /// What was being checked.
        context: &'static str,
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        found: usize,
    },
    /// The problem has no variables.
    #[error("problem has no variables")]
    Empty,
    /// Numerical failure.
    #[error("{0}")]
    Numerical(#[from] NumericalError),
}

/// Numerical failures that are surfaced to the caller without retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericalError {
    /// Hessian is singular in the current point.
    #[error("Hessian is singular in the current point")]
    SingularHessian,
    /// Root finding on the secular equation did not converge.
    #[error("secular equation did not converge in {iters} iterations")]
    SecularEquation {
        /// Number of iterations performed.
        iters: usize,
    },
    /// Matrix decomposition did not converge.
    #[error("matrix decomposition did not converge")]
    Decomposition,
}

impl Error {
    pub(crate) fn dimension(context: &'static str, expected: usize, found: usize) -> Self {
        Self::Dimension {
            context,
            expected,
            found,
        }
    }
}
