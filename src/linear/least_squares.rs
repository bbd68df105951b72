//! Unconstrained linear least squares.

use getset::{CopyGetters, Getters};
use log::debug;
use nalgebra::{convert, DMatrix, DVector, RealField};

use super::{check_rhs, half_norm_squared};
use crate::core::{Error, NumericalError};

/// Solution of an unconstrained linear least squares problem.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct LeastSquaresSolution<T: RealField + Copy> {
    /// Minimum-norm minimizer of `|| A x - b ||^2`.
    #[getset(get = "pub")]
    x: DVector<T>,
    /// Numerical rank of `A`.
    #[getset(get_copy = "pub")]
    rank: usize,
    /// Singular values of `A` in the order returned by the decomposition.
    #[getset(get = "pub")]
    singular_values: DVector<T>,
    /// The cost `1/2 || A x - b ||^2` in the solution.
    #[getset(get_copy = "pub")]
    residual_cost: T,
}

impl<T: RealField + Copy> LeastSquaresSolution<T> {
    /// Takes the solution vector.
    pub fn into_x(self) -> DVector<T> {
        self.x
    }

    /// Returns `true` if `A` has full column rank, so the solution is unique.
    pub fn is_unique(&self) -> bool {
        self.rank == self.x.len()
    }
}

/// Solves `A x = b` in the least squares sense using singular value
/// decomposition.
///
/// Singular values not greater than `max(m, n) * eps * sigma_max` are treated
/// as zero. For rank-deficient or underdetermined systems, the minimum-norm
/// solution among all minimizers is returned instead of failing.
///
/// The only failures are a mismatch between the number of rows of `A` and the
/// length of `b`, and a decomposition that does not converge.
pub fn lstsq<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<LeastSquaresSolution<T>, Error> {
    check_rhs(a, b)?;

    let (m, n) = a.shape();

    if m == 0 || n == 0 {
        // Any x gives the same residual, zero is the one with minimum norm.
        let x = DVector::zeros(n);
        let residual_cost = half_norm_squared(a, &x, b);

        return Ok(LeastSquaresSolution {
            x,
            rank: 0,
            singular_values: DVector::zeros(0),
            residual_cost,
        });
    }

    let svd = a
        .clone()
        .try_svd(true, true, T::default_epsilon(), 0)
        .ok_or(NumericalError::Decomposition)?;

    let sigma_max = svd
        .singular_values
        .iter()
        .fold(T::zero(), |acc, &s| acc.max(s));
    let cutoff = sigma_max * T::default_epsilon() * convert(m.max(n) as f64);

    let rank = if sigma_max.is_zero() {
        0
    } else {
        svd.rank(cutoff)
    };

    if rank < n {
        debug!(
            "rank-deficient system (rank = {}, columns = {}), using minimum-norm solution",
            rank, n
        );
    }

    let x = svd.solve(b, cutoff).map_err(|error| {
        debug!("least squares solve failed: {}", error);
        NumericalError::Decomposition
    })?;
    let residual_cost = half_norm_squared(a, &x, b);

    Ok(LeastSquaresSolution {
        x,
        rank,
        singular_values: svd.singular_values,
        residual_cost,
    })
}

/// Returns the vector `x` minimizing `|| A x - b ||^2`.
///
/// Shortcut for [`lstsq`] which discards everything but the solution. When `A`
/// is square and invertible, the result equals the solution of `A x = b`.
pub fn linear_least_square<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<DVector<T>, Error> {
    lstsq(a, b).map(LeastSquaresSolution::into_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn square_matches_exact_solve() {
        let a: DMatrix<f64> = dmatrix![0.1, 0.9; 0.2, 0.8];
        let b = dvector![0.3, 0.7];

        let x = linear_least_square(&a, &b).unwrap();
        let exact = a.clone().lu().solve(&b).unwrap();

        assert_abs_diff_eq!(x, exact, epsilon = 1e-10);
        assert_abs_diff_eq!(x, dvector![3.9, -0.1], epsilon = 1e-10);
    }

    #[test]
    fn overdetermined() {
        // Line fit through (0, 1), (1, 2), (2, 2).
        let a: DMatrix<f64> = dmatrix![1.0, 0.0; 1.0, 1.0; 1.0, 2.0];
        let b = dvector![1.0, 2.0, 2.0];

        let solution = lstsq(&a, &b).unwrap();

        assert_abs_diff_eq!(*solution.x(), dvector![7.0 / 6.0, 0.5], epsilon = 1e-10);
        assert_abs_diff_eq!(solution.residual_cost(), 1.0 / 12.0, epsilon = 1e-10);
        assert_eq!(solution.rank(), 2);
        assert!(solution.is_unique());
    }

    #[test]
    fn overdetermined_matches_normal_equations() {
        let a: DMatrix<f64> = dmatrix![
            2.0, -1.0, 0.5;
            1.0, 3.0, -2.0;
            0.0, 1.0, 1.0;
            4.0, 0.0, -1.0;
            -1.0, 2.0, 3.0
        ];
        let b = dvector![1.0, -2.0, 0.5, 3.0, 1.5];

        let x = linear_least_square(&a, &b).unwrap();
        let normal = a.tr_mul(&a).lu().solve(&a.tr_mul(&b)).unwrap();

        assert_abs_diff_eq!(x, normal, epsilon = 1e-10);
    }

    #[test]
    fn rank_deficient_minimum_norm() {
        let a: DMatrix<f64> = dmatrix![1.0, 1.0; 1.0, 1.0];
        let b = dvector![2.0, 2.0];

        let solution = lstsq(&a, &b).unwrap();

        assert_eq!(solution.rank(), 1);
        assert!(!solution.is_unique());
        assert_abs_diff_eq!(*solution.x(), dvector![1.0, 1.0], epsilon = 1e-10);
        assert_abs_diff_eq!(solution.residual_cost(), 0.0, epsilon = 1e-20);
    }

    #[test]
    fn underdetermined_minimum_norm() {
        let a: DMatrix<f64> = dmatrix![1.0, 1.0];
        let b = dvector![2.0];

        let solution = lstsq(&a, &b).unwrap();

        assert_eq!(solution.rank(), 1);
        assert_abs_diff_eq!(*solution.x(), dvector![1.0, 1.0], epsilon = 1e-10);
    }

    #[test]
    fn zero_matrix() {
        let a = DMatrix::<f64>::zeros(3, 2);
        let b = dvector![1.0, 2.0, 2.0];

        let solution = lstsq(&a, &b).unwrap();

        assert_eq!(solution.rank(), 0);
        assert_eq!(*solution.x(), DVector::zeros(2));
        assert_abs_diff_eq!(solution.residual_cost(), 4.5);
    }

    #[test]
    fn empty() {
        let a = DMatrix::<f64>::zeros(2, 0);
        let b = dvector![1.0, 1.0];

        let solution = lstsq(&a, &b).unwrap();

        assert_eq!(solution.x().len(), 0);
        assert_eq!(solution.rank(), 0);
        assert_abs_diff_eq!(solution.residual_cost(), 1.0);

        let a = DMatrix::<f64>::zeros(0, 3);
        let b = DVector::<f64>::zeros(0);

        assert_eq!(linear_least_square(&a, &b).unwrap(), DVector::zeros(3));
    }

    #[test]
    fn dimension_mismatch() {
        let a: DMatrix<f64> = dmatrix![0.1, 0.9; 0.2, 0.8];
        let b = dvector![0.3, 0.7, 1.0];

        assert_eq!(
            linear_least_square(&a, &b),
            Err(Error::Dimension {
                context: "right-hand side",
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn deterministic() {
        let a: DMatrix<f64> = dmatrix![1.0, 2.0; 3.0, 4.0; 5.0, 6.0];
        let b = dvector![1.0, 0.0, -1.0];

        assert_eq!(lstsq(&a, &b), lstsq(&a, &b));
    }
}
