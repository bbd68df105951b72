//! Direct solvers for linear least squares problems.
//!
//! Unlike the optimizers in [`algo`](crate::algo), the functions here return
//! the solution directly without producing a sequence of iterates.
//!
//! * [`lstsq`] and its shortcut [`linear_least_square`] minimize `|| A x - b
//!   ||^2`. Rank-deficient and underdetermined systems yield the minimum-norm
//!   solution.
//! * [`unit_norm_least_squares`] and its shortcut
//!   [`constrained_linear_least_square`] minimize `1/2 || A x - b ||^2`
//!   subject to `|| x || = 1`.
//!
//! ```rust
//! use stepwise::{constrained_linear_least_square, linear_least_square, residual_cost};
//! use stepwise::nalgebra::{dmatrix, dvector};
//!
//! let a = dmatrix![0.1f64, 0.9; 0.2, 0.8];
//! let b = dvector![0.3f64, 0.7];
//!
//! let x = linear_least_square(&a, &b).unwrap();
//! let y = constrained_linear_least_square(&a, &b).unwrap();
//!
//! assert!((y.norm() - 1.0).abs() < 1e-10);
//! assert!(residual_cost(&a, &x, &b).unwrap() < residual_cost(&a, &y, &b).unwrap());
//! ```

pub mod least_squares;
pub mod unit_norm;

pub use least_squares::*;
pub use unit_norm::*;

use nalgebra::{convert, DMatrix, DVector, RealField};

use crate::core::Error;

/// Computes the least squares cost `1/2 || A x - b ||^2`.
pub fn residual_cost<T: RealField + Copy>(
    a: &DMatrix<T>,
    x: &DVector<T>,
    b: &DVector<T>,
) -> Result<T, Error> {
    check_rhs(a, b)?;

    if a.ncols() != x.len() {
        return Err(Error::dimension("solution", a.ncols(), x.len()));
    }

    Ok(half_norm_squared(a, x, b))
}

fn check_rhs<T: RealField + Copy>(a: &DMatrix<T>, b: &DVector<T>) -> Result<(), Error> {
    if a.nrows() != b.len() {
        Err(Error::dimension("right-hand side", a.nrows(), b.len()))
    } else {
        Ok(())
    }
}

// Shapes must be already checked.
fn half_norm_squared<T: RealField + Copy>(a: &DMatrix<T>, x: &DVector<T>, b: &DVector<T>) -> T {
    let r = a * x - b;
    r.norm_squared() * convert(0.5)
}
