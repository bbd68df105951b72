//! Newton's method.
//!
//! [Newton's
//! method](https://en.wikipedia.org/wiki/Newton%27s_method_in_optimization) is a
//! second-order method which rescales the gradient by the inverse of the
//! Hessian:
//!
//! ```text
//! x_{k+1} = x_k - lr * H(x_k)^-1 f'(x_k)
//! ```
//!
//! The inverse is never formed. For scalar problems the gradient is divided by
//! the second derivative, for vector problems a linear system with the Hessian
//! is solved using QR decomposition. A singular Hessian in any visited point
//! is an error.
//!
//! With learning rate equal to one (default), the method reaches the minimum of
//! a quadratic function in exactly one step.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{convert, RealField};

use crate::{
    core::{Error, Objective, Optimizer, Problem, State, TwiceDifferentiable},
    driver::Iterations,
};

/// Options for [`Newton`] optimizer.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct NewtonOptions<T: RealField + Copy> {
    /// Damping multiplier of the Newton step. Default: `1.0`.
    learning_rate: T,
}

impl<T: RealField + Copy> Default for NewtonOptions<T> {
    fn default() -> Self {
        Self {
            learning_rate: convert(1.0),
        }
    }
}

/// Newton optimizer. See [module](self) documentation for more details.
#[derive(Debug, Clone)]
pub struct Newton<T: RealField + Copy> {
    options: NewtonOptions<T>,
}

impl<T: RealField + Copy> Newton<T> {
    /// Initializes Newton optimizer with default options.
    pub fn new<P: Problem<Field = T>>(_p: &P) -> Self {
        Self::with_options(NewtonOptions::default())
    }

    /// Initializes Newton optimizer with given options.
    pub fn with_options(options: NewtonOptions<T>) -> Self {
        Self { options }
    }

    /// Returns the options of the optimizer.
    pub fn options(&self) -> &NewtonOptions<T> {
        &self.options
    }
}

impl<F: TwiceDifferentiable> Optimizer<F> for Newton<F::Field> {
    const NAME: &'static str = "Newton";

    type Error = Error;

    fn opt_next(&self, f: &F, x: &F::State) -> Result<F::State, Self::Error> {
        let NewtonOptions { learning_rate } = self.options;

        let grad = f.gradient(x);
        let hes = f.hessian(x);

        // Find the Newton direction by solving H(x) p = f'(x).
        let p = <F::State as State<F::Field>>::solve_curvature(&hes, &grad).map_err(|error| {
            debug!("Newton direction cannot be computed: {}", error);
            error
        })?;

        debug!("|| grad || = {}\t|| p || = {}", grad.norm(), p.norm());

        x.descend(&p, learning_rate)
    }
}

/// Creates the lazy sequence of Newton iterates for given cost, derivative and
/// second derivative functions, starting in `x0`.
///
/// ```rust
/// use stepwise::{newtons_method, run_iterations};
///
/// let iterations = newtons_method(
///     |x: &f64| x * x,
///     |x: &f64| 2.0 * x,
///     |_: &f64| 2.0,
///     10.0,
///     1.0,
/// );
/// let result = run_iterations(iterations, 1000).unwrap();
///
/// assert_eq!(result.index(), 1);
/// ```
pub fn newtons_method<T, X, C, D, H>(
    cost: C,
    derivative: D,
    hessian: H,
    x0: X,
    learning_rate: T,
) -> Iterations<Objective<T, X, C, D, H>, Newton<T>>
where
    T: RealField + Copy,
    X: State<T>,
    C: Fn(&X) -> T,
    D: Fn(&X) -> X,
    H: Fn(&X) -> X::Curvature,
{
    let mut options = NewtonOptions::default();
    options.set_learning_rate(learning_rate);

    Iterations::builder(Objective::new(cost, derivative).with_hessian(hessian), x0)
        .with_algo(|_| Newton::with_options(options))
        .build()
}
