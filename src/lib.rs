#![allow(clippy::many_single_char_names)]
#![allow(clippy::type_complexity)]
#![warn(missing_docs)]

//! # Stepwise
//!
//! A small pure Rust toolkit for iterative unconstrained minimization and
//! direct linear least squares.
//!
//! The iterative methods produce a lazy, restartable sequence of iterates
//! (index, point, cost). The caller decides how many of them to consume and
//! when to stop, or uses the [driver](driver) which stops when two consecutive
//! points become indistinguishable or a step budget is exhausted.
//!
//! The same algorithm code works for one-dimensional problems with a plain
//! scalar variable (`f64`, `f32`) and multidimensional problems with a vector
//! variable ([`DVector`](nalgebra::DVector)), see [`State`].
//!
//! ## Algorithms
//!
//! * [Gradient descent](mod@algo::gradient_descent) -- First-order method with a
//!   fixed learning rate.
//! * [Newton's method](algo::newton) -- Second-order method, exact in one step
//!   for quadratic functions.
//! * [Linear least squares](linear::lstsq) -- Minimum-norm solution of `A x =
//!   b` in the least squares sense.
//! * [Unit-norm least squares](linear::unit_norm_least_squares) -- Least
//!   squares on the unit sphere `|| x || = 1`.
//!
//! ## Problem
//!
//! For quick experiments, the cost function and its derivatives can be given
//! as closures.
//!
//! ```rust
//! use stepwise::{gradient_descent, run_iterations};
//!
//! let iterations = gradient_descent(
//!     |x: &f64| (x - 3.0).powi(2),
//!     |x: &f64| 2.0 * (x - 3.0),
//!     10.0,
//!     0.1,
//! );
//!
//! let result = run_iterations(iterations, 1000).expect("no error in gradient descent");
//! assert!((result.x() - 3.0).abs() < 1e-6);
//! ```
//!
//! Otherwise, the problem is any type that implements the [`Function`] and
//! [`Problem`] traits, with [`Differentiable`] and [`TwiceDifferentiable`]
//! extensions required by the algorithms.
//!
//! ```rust
//! // Stepwise is based on `nalgebra` crate.
//! use stepwise::nalgebra as na;
//! use stepwise::{Differentiable, Function, Problem, TwiceDifferentiable};
//! use na::{DMatrix, DVector};
//!
//! // A problem is represented by a type.
//! struct Rosenbrock {
//!     a: f64,
//!     b: f64,
//! }
//!
//! impl Problem for Rosenbrock {
//!     // The numeric type. Usually f64 or f32.
//!     type Field = f64;
//!     // The type of variables. A scalar or a vector.
//!     type State = DVector<f64>;
//! }
//!
//! impl Function for Rosenbrock {
//!     fn apply(&self, x: &DVector<f64>) -> f64 {
//!         (self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2)
//!     }
//! }
//!
//! impl Differentiable for Rosenbrock {
//!     fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
//!         let r = x[1] - x[0].powi(2);
//!         na::dvector![
//!             -2.0 * (self.a - x[0]) - 4.0 * self.b * x[0] * r,
//!             2.0 * self.b * r
//!         ]
//!     }
//! }
//!
//! impl TwiceDifferentiable for Rosenbrock {
//!     fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64> {
//!         let h12 = -4.0 * self.b * x[0];
//!         na::dmatrix![
//!             2.0 - 4.0 * self.b * x[1] + 12.0 * self.b * x[0].powi(2), h12;
//!             h12, 2.0 * self.b
//!         ]
//!     }
//! }
//! ```
//!
//! ## Iterating
//!
//! When you have your function available, you can use [`Iterations`] to
//! produce the sequence of iterates and consume it as any other iterator.
//!
//! ```rust
//! use stepwise::{algo::Newton, Iterations};
//! # use stepwise::nalgebra as na;
//! # use stepwise::{Differentiable, Function, Problem, TwiceDifferentiable};
//! # use na::{DMatrix, DVector};
//! #
//! # struct Rosenbrock {
//! #     a: f64,
//! #     b: f64,
//! # }
//! #
//! # impl Problem for Rosenbrock {
//! #     type Field = f64;
//! #     type State = DVector<f64>;
//! # }
//! #
//! # impl Function for Rosenbrock {
//! #     fn apply(&self, x: &DVector<f64>) -> f64 {
//! #         (self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2)
//! #     }
//! # }
//! #
//! # impl Differentiable for Rosenbrock {
//! #     fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
//! #         let r = x[1] - x[0].powi(2);
//! #         na::dvector![
//! #             -2.0 * (self.a - x[0]) - 4.0 * self.b * x[0] * r,
//! #             2.0 * self.b * r
//! #         ]
//! #     }
//! # }
//! #
//! # impl TwiceDifferentiable for Rosenbrock {
//! #     fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64> {
//! #         let h12 = -4.0 * self.b * x[0];
//! #         na::dmatrix![
//! #             2.0 - 4.0 * self.b * x[1] + 12.0 * self.b * x[0].powi(2), h12;
//! #             h12, 2.0 * self.b
//! #         ]
//! #     }
//! # }
//!
//! let f = Rosenbrock { a: 1.0, b: 100.0 };
//! let mut iterations = Iterations::builder(&f, na::dvector![-1.2, 1.0])
//!     .with_algo(Newton::new)
//!     .build();
//!
//! for iterate in iterations.by_ref().take(10) {
//!     let iterate = iterate.expect("optimizer encountered an error");
//!     println!(
//!         "iter = {}\tcost = {}\tx = {:?}",
//!         iterate.index(),
//!         iterate.cost(),
//!         iterate.x().as_slice()
//!     );
//! }
//!
//! // Or let the driver decide when to stop.
//! let result = iterations.run(100).expect("optimizer encountered an error");
//! assert!((result.x()[0] - 1.0).abs() < 1e-6);
//! ```
//!
//! ## License
//!
//! Licensed under MIT.

pub mod algo;
mod core;
pub mod driver;
pub mod linear;

pub use algo::{gradient_descent, newtons_method};
pub use core::*;
pub use driver::{run_iterations, run_iterations_with, Iterate, Iterations, Tolerance};
pub use linear::{
    constrained_linear_least_square, linear_least_square, lstsq, residual_cost,
    unit_norm_least_squares,
};

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
