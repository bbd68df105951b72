//! High-level API for running the iterative minimization.
//!
//! The iterative optimizers are driven by [`Iterations`], a lazy and
//! restartable sequence of [`Iterate`] records (index, point, cost). Index zero
//! is the initial point, each subsequent index corresponds to one application
//! of the [optimizer](crate::Optimizer) update rule.
//!
//! The simplest way of getting the sequence is to use one of the convenience
//! constructors:
//!
//! ```rust
//! use stepwise::{gradient_descent, run_iterations};
//!
//! let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);
//! let result = run_iterations(iterations, 1000).unwrap();
//!
//! println!("iter = {}\tx = {}\tcost = {}", result.index(), result.x(), result.cost());
//! ```
//!
//! If you need to specify additional settings, use the builder:
//!
//! ```rust
//! use stepwise::{algo::Newton, driver::Tolerance, Iterations, Objective};
//!
//! let f = Objective::new(|x: &f64| x * x, |x: &f64| 2.0 * x).with_hessian(|_: &f64| 2.0);
//!
//! let mut iterations = Iterations::builder(&f, 10.0)
//!     .with_algo(Newton::new)
//!     .with_tolerance(Tolerance::new(1e-12, 0.0))
//!     .build();
//!
//! let result = iterations.run(100).unwrap();
//! assert_eq!(result.index(), 1);
//! ```
//!
//! The sequence is an [`Iterator`], so it is possible to do the iterations
//! manually and use any stopping criterion:
//!
//! ```rust
//! use stepwise::gradient_descent;
//!
//! let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);
//!
//! for iterate in iterations.take(10) {
//!     let iterate = iterate.expect("no optimizer error");
//!     // ...
//! #   assert!(iterate.cost() <= 100.0);
//! }
//! ```

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{convert, RealField};

use crate::{
    algo::GradientDescent,
    core::{Function, Optimizer, Problem, State},
};

/// One record of the iterative process.
#[derive(Debug, Clone, PartialEq)]
pub struct Iterate<T, X> {
    index: usize,
    x: X,
    cost: T,
}

impl<T: Copy, X> Iterate<T, X> {
    /// Returns the iteration index. The initial point has index zero.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns reference to the point.
    pub fn x(&self) -> &X {
        &self.x
    }

    /// Returns the cost function value in the point.
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Decomposes the record into (index, point, cost) triple.
    pub fn into_parts(self) -> (usize, X, T) {
        (self.index, self.x, self.cost)
    }
}

/// Tolerance for deciding that two consecutive points are indistinguishable.
///
/// Points `x` and `y` are considered the same when `|| x - y || <= abs + rel *
/// || x ||`.
#[derive(Debug, Clone, Copy, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct Tolerance<T: RealField + Copy> {
    /// Absolute tolerance. Default: `1e-8`.
    abs: T,
    /// Relative tolerance. Default: `0`.
    rel: T,
}

impl<T: RealField + Copy> Tolerance<T> {
    /// Creates the tolerance with given absolute and relative parts.
    pub fn new(abs: T, rel: T) -> Self {
        Self { abs, rel }
    }

    /// Determines whether the step from `prev` to `next` is negligible.
    pub fn is_converged<X: State<T>>(&self, prev: &X, next: &X) -> bool {
        prev.distance(next) <= self.abs + self.rel * prev.norm()
    }
}

impl<T: RealField + Copy> Default for Tolerance<T> {
    fn default() -> Self {
        Self {
            abs: convert(1e-8),
            rel: convert(0.0),
        }
    }
}

/// Builder for the [`Iterations`].
pub struct IterationsBuilder<F: Problem, A> {
    f: F,
    algo: A,
    x0: F::State,
    tolerance: Tolerance<F::Field>,
}

impl<F: Problem, A> IterationsBuilder<F, A> {
    /// Sets specific algorithm to be used.
    ///
    /// This builder method accepts a closure that takes the reference to the
    /// problem. For the algorithms in stepwise, you can simply pass the `new`
    /// constructor directly (e.g., `Newton::new`).
    pub fn with_algo<A2, FA>(self, factory: FA) -> IterationsBuilder<F, A2>
    where
        FA: FnOnce(&F) -> A2,
    {
        let algo = factory(&self.f);

        IterationsBuilder {
            f: self.f,
            algo,
            x0: self.x0,
            tolerance: self.tolerance,
        }
    }

    /// Sets the tolerance used by [`Iterations::run`].
    pub fn with_tolerance(mut self, tolerance: Tolerance<F::Field>) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builds the [`Iterations`].
    pub fn build(self) -> Iterations<F, A> {
        let Self {
            f,
            algo,
            x0,
            tolerance,
        } = self;

        Iterations {
            f,
            algo,
            x0,
            tolerance,
            last: None,
            failed: false,
        }
    }
}

/// Lazy sequence of iterates produced by an optimizer from the initial point.
///
/// The sequence is infinite unless the optimizer fails. After an error, the
/// iterator yields `None`. For the usage, see [module](self) documentation.
pub struct Iterations<F: Problem, A> {
    f: F,
    algo: A,
    x0: F::State,
    tolerance: Tolerance<F::Field>,
    last: Option<Iterate<F::Field, F::State>>,
    failed: bool,
}

impl<F: Problem> Iterations<F, GradientDescent<F::Field>> {
    /// Returns the builder for specifying additional settings. The default
    /// algorithm is [`GradientDescent`].
    pub fn builder(f: F, x0: F::State) -> IterationsBuilder<F, GradientDescent<F::Field>> {
        let algo = GradientDescent::new(&f);

        IterationsBuilder {
            f,
            algo,
            x0,
            tolerance: Tolerance::default(),
        }
    }

    /// Initializes the sequence with the default settings.
    pub fn new(f: F, x0: F::State) -> Self {
        Self::builder(f, x0).build()
    }
}

impl<F: Problem, A> Iterations<F, A> {
    /// Returns reference to the initial point.
    pub fn x0(&self) -> &F::State {
        &self.x0
    }

    /// Returns the tolerance used by [`Iterations::run`].
    pub fn tolerance(&self) -> Tolerance<F::Field> {
        self.tolerance
    }

    /// Sets the tolerance used by [`Iterations::run`].
    pub fn set_tolerance(&mut self, tolerance: Tolerance<F::Field>) -> &mut Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the most recently produced iterate, if any.
    pub fn current(&self) -> Option<&Iterate<F::Field, F::State>> {
        self.last.as_ref()
    }

    /// Starts the sequence again from the initial point.
    pub fn restart(&mut self) {
        self.last = None;
        self.failed = false;
    }
}

impl<F: Function, A: Optimizer<F>> Iterations<F, A> {
    fn advance(&mut self) -> Result<Iterate<F::Field, F::State>, A::Error> {
        let iterate = match &self.last {
            None => Iterate {
                index: 0,
                cost: self.f.apply(&self.x0),
                x: self.x0.clone(),
            },
            Some(last) => match self.algo.opt_next(&self.f, &last.x) {
                Ok(x) => Iterate {
                    index: last.index + 1,
                    cost: self.f.apply(&x),
                    x,
                },
                Err(error) => {
                    debug!("{} failed in iteration {}", A::NAME, last.index + 1);
                    self.failed = true;
                    return Err(error);
                }
            },
        };

        debug!(
            "iter = {}\tcost = {}\tx = {:?}",
            iterate.index, iterate.cost, iterate.x
        );

        self.last = Some(iterate.clone());
        Ok(iterate)
    }

    /// Runs the sequence from the initial point until two consecutive points
    /// are indistinguishable or `max_steps` updates have been taken.
    ///
    /// On convergence, the returned iterate is the first one which the update
    /// rule leaves (within the tolerance) unchanged. Not converging within the
    /// budget is not an error, the iterate with index `max_steps` is returned
    /// and it is up to the caller to assess it.
    pub fn run(&mut self, max_steps: usize) -> Result<Iterate<F::Field, F::State>, A::Error> {
        self.restart();

        let mut current = self.advance()?;

        loop {
            if current.index >= max_steps {
                debug!("maximum number of steps ({}) reached", max_steps);
                return Ok(current);
            }

            let next = self.advance()?;

            if self.tolerance.is_converged(&current.x, &next.x) {
                debug!("converged in iteration {}", current.index);
                return Ok(current);
            }

            current = next;
        }
    }

    /// Returns the name of the used optimizer.
    pub fn name(&self) -> &str {
        A::NAME
    }
}

impl<F: Function, A: Optimizer<F>> Iterator for Iterations<F, A> {
    type Item = Result<Iterate<F::Field, F::State>, A::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            None
        } else {
            Some(self.advance())
        }
    }
}

/// Consumes the sequence until convergence or until `max_steps` updates have
/// been taken, using the tolerance set in the sequence. See
/// [`Iterations::run`].
pub fn run_iterations<F, A>(
    mut iterations: Iterations<F, A>,
    max_steps: usize,
) -> Result<Iterate<F::Field, F::State>, A::Error>
where
    F: Function,
    A: Optimizer<F>,
{
    iterations.run(max_steps)
}

/// Same as [`run_iterations`], but with explicit tolerance.
pub fn run_iterations_with<F, A>(
    mut iterations: Iterations<F, A>,
    max_steps: usize,
    tolerance: Tolerance<F::Field>,
) -> Result<Iterate<F::Field, F::State>, A::Error>
where
    F: Function,
    A: Optimizer<F>,
{
    iterations.set_tolerance(tolerance);
    iterations.run(max_steps)
}

#[cfg(test)]
mod tests {
    use crate::{
        algo::{gradient_descent, newtons_method, Newton},
        core::{Error, NumericalError, Objective},
        testing::Sphere,
    };

    use super::*;

    use nalgebra::{dvector, DVector};

    #[test]
    fn zero_budget() {
        let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);
        let result = run_iterations(iterations, 0).unwrap();

        assert_eq!(result.into_parts(), (0, 10.0, 100.0));
    }

    #[test]
    fn indices_are_consecutive() {
        let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);

        let indices = iterations
            .take(5)
            .map(|iterate| iterate.unwrap().index())
            .collect::<Vec<_>>();

        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn restart() {
        let mut iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);

        let first = iterations.by_ref().take(3).collect::<Result<Vec<_>, _>>();
        iterations.restart();
        let second = iterations.by_ref().take(3).collect::<Result<Vec<_>, _>>();

        assert_eq!(first, second);
        assert_eq!(iterations.current().map(Iterate::index), Some(2));
    }

    #[test]
    fn run_restarts() {
        let mut iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);

        iterations.by_ref().take(50).for_each(drop);
        let budget = iterations.run(3).unwrap();

        assert_eq!(budget.index(), 3);
        assert_eq!(*iterations.x0(), 10.0);
    }

    #[test]
    fn budget_exhausted() {
        let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.001);
        let result = run_iterations(iterations, 5).unwrap();

        assert_eq!(result.index(), 5);
        assert!(*result.x() > 9.0);
    }

    #[test]
    fn coarse_tolerance_stops_earlier() {
        let fine = run_iterations(
            gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1),
            1000,
        )
        .unwrap();

        let coarse = run_iterations_with(
            gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1),
            1000,
            Tolerance::new(1e-2, 0.0),
        )
        .unwrap();

        assert!(coarse.index() < fine.index());
    }

    #[test]
    fn relative_tolerance() {
        let tolerance = Tolerance::new(0.0f64, 0.1);

        assert!(tolerance.is_converged(&100.0, &95.0));
        assert!(!tolerance.is_converged(&1.0, &0.5));
        assert!(tolerance.is_converged(&dvector![3.0, 4.0], &dvector![3.0, 4.4]));
    }

    #[test]
    fn fused_after_error() {
        let mut iterations = newtons_method(
            |x: &f64| x * x * x,
            |x: &f64| 3.0 * x * x,
            |x: &f64| 6.0 * x,
            0.0,
            1.0,
        );

        assert!(matches!(iterations.next(), Some(Ok(_))));
        assert_eq!(
            iterations.next(),
            Some(Err(Error::Numerical(NumericalError::SingularHessian)))
        );
        assert_eq!(iterations.next(), None);

        iterations.restart();
        assert!(matches!(iterations.next(), Some(Ok(_))));
    }

    #[test]
    fn builder() {
        let f = Sphere::new(2);
        let iterations = Iterations::builder(&f, dvector![1.0, 2.0])
            .with_algo(Newton::new)
            .with_tolerance(Tolerance::new(1e-4, 1e-6))
            .build();

        assert_eq!(iterations.name(), "Newton");
        assert_eq!(iterations.tolerance().abs(), 1e-4);
        assert_eq!(iterations.tolerance().rel(), 1e-6);
        assert_eq!(iterations.x0(), &dvector![1.0, 2.0]);
    }

    #[test]
    fn default_algorithm() {
        let f = Objective::new(
            |x: &DVector<f64>| x.norm_squared(),
            |x: &DVector<f64>| x * 2.0,
        );
        let mut iterations = Iterations::new(&f, dvector![1.0, 1.0]);

        assert_eq!(iterations.name(), "Gradient descent");
        assert!(iterations.run(1000).unwrap().cost() < 1e-12);
    }
}
