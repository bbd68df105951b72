//! Gradient descent.
//!
//! [Gradient descent](https://en.wikipedia.org/wiki/Gradient_descent) is a
//! first-order method which follows the negative gradient scaled by a fixed
//! step size (learning rate):
//!
//! ```text
//! x_{k+1} = x_k - lr * f'(x_k)
//! ```
//!
//! The learning rate is not validated. A too large value makes the process
//! diverge, which is not considered an error. The sequence just does not
//! converge within the step budget.
//!
//! # References
//!
//! \[1\] [Numerical
//! Optimization](https://link.springer.com/book/10.1007/978-0-387-40065-5)

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{convert, RealField};

use crate::{
    core::{Differentiable, Error, Objective, Optimizer, Problem, State},
    driver::Iterations,
};

/// Options for [`GradientDescent`] optimizer.
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct GradientDescentOptions<T: RealField + Copy> {
    /// Step size multiplying the gradient. Default: `0.1`.
    learning_rate: T,
}

impl<T: RealField + Copy> Default for GradientDescentOptions<T> {
    fn default() -> Self {
        Self {
            learning_rate: convert(0.1),
        }
    }
}

/// Gradient descent optimizer. See [module](self) documentation for more
/// details.
#[derive(Debug, Clone)]
pub struct GradientDescent<T: RealField + Copy> {
    options: GradientDescentOptions<T>,
}

impl<T: RealField + Copy> GradientDescent<T> {
    /// Initializes gradient descent optimizer with default options.
    pub fn new<P: Problem<Field = T>>(_p: &P) -> Self {
        Self::with_options(GradientDescentOptions::default())
    }

    /// Initializes gradient descent optimizer with given options.
    pub fn with_options(options: GradientDescentOptions<T>) -> Self {
        Self { options }
    }

    /// Returns the options of the optimizer.
    pub fn options(&self) -> &GradientDescentOptions<T> {
        &self.options
    }
}

impl<F: Differentiable> Optimizer<F> for GradientDescent<F::Field> {
    const NAME: &'static str = "Gradient descent";

    type Error = Error;

    fn opt_next(&self, f: &F, x: &F::State) -> Result<F::State, Self::Error> {
        let GradientDescentOptions { learning_rate } = self.options;

        let grad = f.gradient(x);
        debug!("|| grad || = {}", grad.norm());

        x.descend(&grad, learning_rate)
    }
}

/// Creates the lazy sequence of gradient descent iterates for given cost and
/// derivative functions, starting in `x0`.
///
/// ```rust
/// use stepwise::{gradient_descent, run_iterations};
///
/// let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);
/// let result = run_iterations(iterations, 1000).unwrap();
///
/// assert!(result.x().abs() < 1e-6);
/// ```
pub fn gradient_descent<T, X, C, D>(
    cost: C,
    derivative: D,
    x0: X,
    learning_rate: T,
) -> Iterations<Objective<T, X, C, D>, GradientDescent<T>>
where
    T: RealField + Copy,
    X: State<T>,
    C: Fn(&X) -> T,
    D: Fn(&X) -> X,
{
    let mut options = GradientDescentOptions::default();
    options.set_learning_rate(learning_rate);

    Iterations::builder(Objective::new(cost, derivative), x0)
        .with_algo(|_| GradientDescent::with_options(options))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{driver::run_iterations, testing::*};

    use approx::assert_abs_diff_eq;
    use nalgebra::{dvector, DVector};

    #[test]
    fn scalar_quadratic() {
        let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);
        let result = run_iterations(iterations, 1000).unwrap();

        assert_abs_diff_eq!(*result.x(), 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(result.cost(), 0.0, epsilon = 1e-7);
        assert!(result.index() > 1);
        assert!(result.index() < 200);
    }

    #[test]
    fn vector_quadratic() {
        let iterations = gradient_descent(
            |x: &DVector<f64>| x.norm_squared(),
            |x: &DVector<f64>| x * 2.0,
            dvector![10.0, 0.0],
            0.1,
        );
        let result = run_iterations(iterations, 1000).unwrap();

        assert_abs_diff_eq!(*result.x(), dvector![0.0, 0.0], epsilon = 1e-7);
        assert_abs_diff_eq!(result.cost(), 0.0, epsilon = 1e-7);
        assert!(result.index() > 1);
        assert!(result.index() < 200);
    }

    #[test]
    fn divergence_is_not_an_error() {
        // The update is x <- -2x, which oscillates with growing magnitude.
        let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 1.0, 1.5);
        let result = run_iterations(iterations, 10).unwrap();

        assert_eq!(result.index(), 10);
        assert_eq!(*result.x(), 1024.0);
    }

    #[test]
    fn deterministic() {
        let run = || {
            let iterations = gradient_descent(
                |x: &DVector<f64>| x.norm_squared(),
                |x: &DVector<f64>| x * 2.0,
                dvector![3.0, -4.0],
                0.05,
            );
            run_iterations(iterations, 1000).unwrap()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn sphere() {
        let f = Sphere::new(4);

        for x in f.initials() {
            let mut iterations = Iterations::builder(&f, x).build();
            let result = iterations.run(1000).unwrap();

            assert!(f.is_optimum(result.x(), 1e-6));
        }
    }

    #[test]
    fn learning_rate_option() {
        let f = Sphere::new(2);
        let mut options = GradientDescentOptions::default();
        options.set_learning_rate(0.5);

        // Learning rate of 0.5 jumps to the minimum of the sphere in one step.
        let mut iterations = Iterations::builder(&f, dvector![1.0, -1.0])
            .with_algo(|_| GradientDescent::with_options(options))
            .build();

        assert_eq!(iterations.run(100).unwrap().index(), 1);
        assert_eq!(iterations.name(), "Gradient descent");
    }
}
