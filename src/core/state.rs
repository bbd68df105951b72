//! Uniform treatment of scalar and vector variables.
//!
//! Algorithms in this crate are written once against the [`State`] trait and
//! work for both one-dimensional problems given by a plain scalar (`f64`,
//! `f32`) and multidimensional problems given by a [`DVector`].

use std::fmt::Debug;

use log::debug;
use nalgebra::{convert, DMatrix, DVector, RealField};
use num_traits::Zero;

use super::base::{Error, NumericalError};

/// Variables of a problem.
///
/// Updates never mutate the state in place, a new value is produced instead.
pub trait State<T: RealField + Copy>: Clone + Debug {
    /// Type of the second derivative. A scalar for scalar states, a square
    /// matrix for vector states.
    type Curvature: Clone + Debug;

    /// Number of variables.
    fn dim(&self) -> usize;

    /// Euclidean norm (absolute value for scalars).
    fn norm(&self) -> T;

    /// Euclidean distance between two states of the same dimension.
    fn distance(&self, other: &Self) -> T;

    /// Computes `self - step * direction`.
    fn descend(&self, direction: &Self, step: T) -> Result<Self, Error>;

    /// Solves `curvature * d = rhs` for `d` without forming the inverse.
    fn solve_curvature(curvature: &Self::Curvature, rhs: &Self) -> Result<Self, Error>;
}

macro_rules! impl_scalar_state {
    ($($t:ty),*) => {
        $(
            impl State<$t> for $t {
                type Curvature = $t;

                fn dim(&self) -> usize {
                    1
                }

                fn norm(&self) -> $t {
                    self.abs()
                }

                fn distance(&self, other: &Self) -> $t {
                    (self - other).abs()
                }

                fn descend(&self, direction: &Self, step: $t) -> Result<Self, Error> {
                    Ok(self - step * direction)
                }

                fn solve_curvature(curvature: &Self::Curvature, rhs: &Self) -> Result<Self, Error> {
                    if curvature.is_zero() || !curvature.is_finite() {
                        debug!("second derivative is {}", curvature);
                        return Err(NumericalError::SingularHessian.into());
                    }

                    let d = rhs / curvature;

                    if d.is_finite() {
                        Ok(d)
                    } else {
                        Err(NumericalError::SingularHessian.into())
                    }
                }
            }
        )*
    };
}

impl_scalar_state!(f32, f64);

impl<T: RealField + Copy> State<T> for DVector<T> {
    type Curvature = DMatrix<T>;

    fn dim(&self) -> usize {
        self.len()
    }

    fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    fn distance(&self, other: &Self) -> T {
        debug_assert_eq!(self.len(), other.len());

        self.iter()
            .zip(other.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b))
            .sqrt()
    }

    fn descend(&self, direction: &Self, step: T) -> Result<Self, Error> {
        if direction.len() != self.len() {
            return Err(Error::dimension("direction", self.len(), direction.len()));
        }

        Ok(self - direction.scale(step))
    }

    fn solve_curvature(curvature: &Self::Curvature, rhs: &Self) -> Result<Self, Error> {
        let n = rhs.len();

        if curvature.nrows() != n {
            return Err(Error::dimension("Hessian rows", n, curvature.nrows()));
        }

        if curvature.ncols() != n {
            return Err(Error::dimension("Hessian columns", n, curvature.ncols()));
        }

        if n == 0 {
            return Ok(rhs.clone());
        }

        let (qr_q, qr_r) = curvature.clone().qr().unpack();

        // Pivots negligible relative to the largest one make the solution
        // meaningless even if they are not exactly zero.
        let diag = qr_r.diagonal();
        let pivot_max = diag.iter().fold(T::zero(), |acc, &r| acc.max(r.abs()));
        let pivot_min = diag.iter().fold(pivot_max, |acc, &r| acc.min(r.abs()));
        let threshold = pivot_max * T::default_epsilon() * convert(n as f64);

        if pivot_max.is_zero() || pivot_min <= threshold {
            debug!(
                "Hessian is singular (pivots: min = {}, max = {})",
                pivot_min, pivot_max
            );
            return Err(NumericalError::SingularHessian.into());
        }

        // Solve R d = Q^T rhs.
        let mut d = qr_q.tr_mul(rhs);

        if !qr_r.solve_upper_triangular_mut(&mut d) || d.iter().any(|di| !di.is_finite()) {
            return Err(NumericalError::SingularHessian.into());
        }

        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn scalar_descend() {
        assert_eq!(10.0f64.descend(&20.0, 0.1).unwrap(), 8.0);
        assert_eq!(State::<f64>::distance(&3.0f64, &-1.0), 4.0);
    }

    #[test]
    fn scalar_singular_curvature() {
        assert_eq!(
            <f64 as State<f64>>::solve_curvature(&0.0, &1.0),
            Err(Error::Numerical(NumericalError::SingularHessian))
        );
        assert_eq!(<f32 as State<f32>>::solve_curvature(&2.0, &1.0), Ok(0.5));
    }

    #[test]
    fn vector_descend() {
        let x = dvector![10.0, 0.0];
        let next = x.descend(&dvector![20.0, 0.0], 0.1).unwrap();

        assert_abs_diff_eq!(next, dvector![8.0, 0.0]);
        // Input is not modified.
        assert_eq!(x, dvector![10.0, 0.0]);
    }

    #[test]
    fn vector_descend_dimension_mismatch() {
        let x = dvector![1.0, 2.0];

        assert_eq!(
            x.descend(&dvector![1.0, 2.0, 3.0], 1.0),
            Err(Error::Dimension {
                context: "direction",
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn vector_distance() {
        let x = dvector![3.0, 0.0];
        let y = dvector![0.0, 4.0];

        assert_abs_diff_eq!(x.distance(&y), 5.0);
    }

    #[test]
    fn vector_solve_curvature() {
        let h = dmatrix![2.0, 1.0; 1.0, 3.0];
        let g = dvector![3.0, 4.0];
        let d = DVector::solve_curvature(&h, &g).unwrap();

        assert_abs_diff_eq!(&h * d, g, epsilon = 1e-12);
    }

    #[test]
    fn vector_singular_curvature() {
        let h = dmatrix![1.0, 1.0; 1.0, 1.0];
        let g = dvector![1.0, 2.0];

        assert_eq!(
            DVector::solve_curvature(&h, &g),
            Err(Error::Numerical(NumericalError::SingularHessian))
        );
    }

    #[test]
    fn vector_curvature_shape() {
        let h = dmatrix![1.0, 0.0, 0.0; 0.0, 1.0, 0.0];
        let g = dvector![1.0, 2.0];

        assert!(matches!(
            DVector::solve_curvature(&h, &g),
            Err(Error::Dimension { .. })
        ));
    }
}
