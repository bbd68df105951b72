use super::function::Function;

/// Interface of an optimizer.
///
/// An optimizer is an update rule which takes a point _x_ and computes the next
/// point in the minimization process. Repeated application of the rule should
/// eventually converge into a minimum _x'_ in successful cases. The lazy
/// sequence of points is produced by [`Iterations`](crate::driver::Iterations).
///
/// ## Implementing an optimizer
///
/// Here is an implementation of an optimizer that halves the point in every
/// step, which is the right thing to do for functions with the minimum in zero
/// and nothing else.
///
/// ```rust
/// use stepwise::{Function, Optimizer, State};
///
/// struct Halving;
///
/// impl<F: Function> Optimizer<F> for Halving {
///     const NAME: &'static str = "Halving";
///     type Error = stepwise::Error;
///
///     fn opt_next(&self, _f: &F, x: &F::State) -> Result<F::State, Self::Error> {
///         x.descend(x, stepwise::nalgebra::convert(0.5))
///     }
/// }
/// ```
pub trait Optimizer<F: Function> {
    /// Name of the optimizer.
    const NAME: &'static str;

    /// Error while computing the next step.
    type Error;

    /// Computes the next point in the optimization process.
    ///
    /// The implementations must not depend on any state other than `x` so
    /// that the sequence of points can be restarted from the beginning.
    fn opt_next(&self, f: &F, x: &F::State) -> Result<F::State, Self::Error>;
}
