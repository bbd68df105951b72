//! Least squares on the unit sphere.
//!
//! Minimizes `1/2 || A x - b ||^2` subject to `|| x || = 1`. With the
//! eigendecomposition `A^T A = Q diag(mu) Q^T` and `g = Q^T A^T b`, the
//! stationary points satisfy `(A^T A + lambda I) x = A^T b`, so in the
//! eigenbasis `y_i = g_i / (mu_i + lambda)`. The global minimum is given by the
//! unique root of the secular equation
//!
//! ```text
//! sum_i g_i^2 / (mu_i + lambda)^2 = 1
//! ```
//!
//! with `lambda > -mu_min`. The root is found by Newton's method applied to
//! `1 / ||y(lambda)|| - 1`, which is nearly linear in `lambda`, safeguarded by
//! bisection on a bracket that is known to contain it.
//!
//! If `g` has no component in the eigenspace of `mu_min` and the remaining
//! components do not reach the unit norm even for `lambda = -mu_min` (the
//! so-called hard case, which includes `b = 0`), the solution is completed by
//! the eigenvector of `mu_min`.
//!
//! Since the eigendecomposition is computed for `A^T A` of size `n x n`, the
//! method works for square, overdetermined, underdetermined and rank-deficient
//! `A` alike.

use getset::{CopyGetters, Getters, Setters};
use log::debug;
use nalgebra::{convert, DMatrix, DVector, RealField, SymmetricEigen};

use super::{check_rhs, half_norm_squared};
use crate::core::{Error, NumericalError};

/// Options for [`unit_norm_least_squares`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct UnitNormOptions<T: RealField + Copy> {
    /// Maximum number of iterations of the root finding. Default: `100`.
    max_iters: usize,
    /// Tolerance for `| || y || - 1 |`. Default: `1e-12`.
    tolerance: T,
}

impl<T: RealField + Copy> Default for UnitNormOptions<T> {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: convert(1e-12),
        }
    }
}

/// Solution of the unit-norm constrained least squares problem.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct UnitNormSolution<T: RealField + Copy> {
    /// The minimizer with unit norm.
    #[getset(get = "pub")]
    x: DVector<T>,
    /// Lagrange multiplier `lambda` of the constraint.
    #[getset(get_copy = "pub")]
    multiplier: T,
    /// The cost `1/2 || A x - b ||^2` in the solution.
    #[getset(get_copy = "pub")]
    cost: T,
}

impl<T: RealField + Copy> UnitNormSolution<T> {
    /// Takes the solution vector.
    pub fn into_x(self) -> DVector<T> {
        self.x
    }
}

/// Minimizes `1/2 || A x - b ||^2` subject to `|| x || = 1`.
///
/// See [module](self) documentation for the method.
///
/// # Errors
///
/// * [`Error::Dimension`] if the number of rows of `A` differs from the length
///   of `b`.
/// * [`Error::Empty`] if `A` has no columns.
/// * [`NumericalError::Decomposition`] if the eigendecomposition does not
///   converge.
/// * [`NumericalError::SecularEquation`] if the root finding does not converge
///   in [`UnitNormOptions::max_iters`] iterations.
pub fn unit_norm_least_squares<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
    options: &UnitNormOptions<T>,
) -> Result<UnitNormSolution<T>, Error> {
    check_rhs(a, b)?;

    let n = a.ncols();

    if n == 0 {
        return Err(Error::Empty);
    }

    let eps = T::default_epsilon();
    let sqrt_eps = eps.sqrt();

    let eigen = SymmetricEigen::try_new(a.tr_mul(a), eps, 0)
        .ok_or(NumericalError::Decomposition)?;
    let q = eigen.eigenvectors;
    let mu = eigen.eigenvalues;
    let mut g = q.tr_mul(&a.tr_mul(b));

    let (imin, mu_min) = mu
        .iter()
        .enumerate()
        .fold((0, mu[0]), |(imin, mu_min), (i, &mu_i)| {
            if mu_i < mu_min {
                (i, mu_i)
            } else {
                (imin, mu_min)
            }
        });

    // Eigenvalues this close to the smallest one span a single eigenspace.
    // Zero scale means that all eigenvalues are zero.
    let mu_scale = mu.iter().fold(T::zero(), |acc, &mu_i| acc.max(mu_i.abs()));
    let is_smallest = |mu_i: T| mu_i - mu_min <= sqrt_eps * mu_scale;

    let g_norm = g.norm();
    let g_smallest = mu
        .iter()
        .zip(g.iter())
        .filter(|&(&mu_i, _)| is_smallest(mu_i))
        .fold(T::zero(), |acc, (_, &g_i)| acc + g_i * g_i)
        .sqrt();

    if g_norm.is_zero() || g_smallest <= sqrt_eps * g_norm {
        let mut y = DVector::zeros(n);

        for i in 0..n {
            if is_smallest(mu[i]) {
                g[i] = T::zero();
            } else {
                y[i] = g[i] / (mu[i] - mu_min);
            }
        }

        let y_norm_squared = y.norm_squared();

        if y_norm_squared <= T::one() {
            debug!(
                "hard case (|| y || = {}), completing along the smallest eigenvector",
                y_norm_squared.sqrt()
            );

            y[imin] = (T::one() - y_norm_squared).sqrt();
            return Ok(solution(a, b, &q * y, -mu_min));
        }
    }

    // Bracket of the root. Below `lo` some term of the sum alone exceeds one,
    // above `hi` every denominator is at least || g ||.
    let mut lo = mu
        .iter()
        .zip(g.iter())
        .fold(-mu_min, |acc, (&mu_i, &g_i)| acc.max(g_i.abs() - mu_i));
    let mut hi = g.norm() - mu_min;
    let mut lambda = hi;

    for iter in 0..options.max_iters {
        let (s, ds) = secular(&mu, &g, lambda);
        let y_norm = s.sqrt();

        debug!(
            "iter = {}\tlambda = {}\t|| y || = {}\tbracket = [{}, {}]",
            iter, lambda, y_norm, lo, hi
        );

        let mut done = (y_norm - T::one()).abs() <= options.tolerance;

        if !done {
            if y_norm > T::one() {
                lo = lambda;
            } else {
                hi = lambda;
            }

            let psi = T::one() / y_norm - T::one();
            let dpsi = -ds / (convert::<_, T>(2.0) * s * y_norm);
            let next = lambda - psi / dpsi;

            lambda = if next.is_finite() && next > lo && next < hi {
                next
            } else {
                (lo + hi) * convert(0.5)
            };

            done = hi - lo <= eps * (lambda.abs() + mu_scale);
        }

        if done {
            let y = DVector::from_fn(n, |i, _| {
                if g[i].is_zero() {
                    T::zero()
                } else {
                    g[i] / (mu[i] + lambda)
                }
            });

            let mut x = &q * y;
            let x_norm = x.norm();

            if x_norm.is_zero() || !x_norm.is_finite() {
                return Err(NumericalError::SecularEquation { iters: iter + 1 }.into());
            }

            x.unscale_mut(x_norm);
            return Ok(solution(a, b, x, lambda));
        }
    }

    debug!(
        "secular equation did not converge in {} iterations",
        options.max_iters
    );

    Err(NumericalError::SecularEquation {
        iters: options.max_iters,
    }
    .into())
}

/// Returns the vector `x` with unit norm minimizing `1/2 || A x - b ||^2`.
///
/// Shortcut for [`unit_norm_least_squares`] with default options.
pub fn constrained_linear_least_square<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
) -> Result<DVector<T>, Error> {
    unit_norm_least_squares(a, b, &UnitNormOptions::default()).map(UnitNormSolution::into_x)
}

// Value of || y(lambda) ||^2 and its derivative with respect to lambda.
fn secular<T: RealField + Copy>(mu: &DVector<T>, g: &DVector<T>, lambda: T) -> (T, T) {
    mu.iter()
        .zip(g.iter())
        .filter(|(_, g_i)| !g_i.is_zero())
        .fold((T::zero(), T::zero()), |(s, ds), (&mu_i, &g_i)| {
            let d = mu_i + lambda;
            let t = g_i * g_i / (d * d);
            (s + t, ds - convert::<_, T>(2.0) * t / d)
        })
}

fn solution<T: RealField + Copy>(
    a: &DMatrix<T>,
    b: &DVector<T>,
    x: DVector<T>,
    multiplier: T,
) -> UnitNormSolution<T> {
    let cost = half_norm_squared(a, &x, b);

    UnitNormSolution {
        x,
        multiplier,
        cost,
    }
}
