//! Testing functions and utilities useful for benchmarking, debugging and smoke
//! testing.
//!
//! [`Sphere`] and [`Rosenbrock`] are recommended for first tests, [`Parabola`]
//! covers the scalar case.
//!
//! # References
//!
//! \[1\] [A Literature Survey of Benchmark Functions For Global Optimization
//! Problems](https://arxiv.org/abs/1308.4008)
//!
//! \[2\] [Numerical Methods for Unconstrained Optimization and Nonlinear
//! Equations](https://epubs.siam.org/doi/book/10.1137/1.9781611971200)

#![allow(unused)]

use nalgebra::{dmatrix, dvector, DMatrix, DVector};

use crate::core::{
    Curvature, Differentiable, Function, Problem, State, TwiceDifferentiable,
};

/// Extension of the [`TwiceDifferentiable`] trait that provides additional
/// information that is useful for testing optimizers.
pub trait TestFunction: TwiceDifferentiable {
    /// Standard initial values for the problem. Using the same initial values
    /// is essential for fair comparison of methods.
    fn initials(&self) -> Vec<Self::State>;

    /// A set of global optima. This is mostly just for information, for
    /// testing if a given point is optimum, [`TestFunction::is_optimum`]
    /// should be used.
    fn optima(&self) -> Vec<Self::State>;

    /// Test if given point is a global optimum, given the tolerance `eps` for
    /// the distance to the closest one.
    fn is_optimum(&self, x: &Self::State, eps: Self::Field) -> bool {
        self.optima()
            .iter()
            .any(|optimum| optimum.distance(x) <= eps)
    }
}

/// [Sphere function](https://en.wikipedia.org/wiki/Test_functions_for_optimization)
/// \[1\]: `f(x) = sum x_i^2`.
///
/// The simplest convex quadratic function with the minimum in zero.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    n: usize,
}

impl Sphere {
    /// Initializes the function with given dimension.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "n must be greater than zero");
        Self { n }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Problem for Sphere {
    type Field = f64;
    type State = DVector<f64>;
}

impl Function for Sphere {
    fn apply(&self, x: &DVector<f64>) -> f64 {
        x.norm_squared()
    }
}

impl Differentiable for Sphere {
    fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
        x * 2.0
    }
}

impl TwiceDifferentiable for Sphere {
    fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        DMatrix::identity(x.len(), x.len()) * 2.0
    }
}

impl TestFunction for Sphere {
    fn initials(&self) -> Vec<DVector<f64>> {
        let init1 = DVector::from_element(self.n, 10.0);
        let init2 = DVector::from_fn(self.n, |i, _| if i % 2 == 0 { -5.0 } else { 3.0 });

        vec![init1, init2]
    }

    fn optima(&self) -> Vec<DVector<f64>> {
        vec![DVector::zeros(self.n)]
    }
}

/// [Rosenbrock function](https://en.wikipedia.org/wiki/Rosenbrock_function)
/// \[1,2\] (also known as Rosenbrock's valley or banana function):
/// `f(x, y) = (a - x)^2 + b (y - x^2)^2`.
///
/// The global minimum `(a, a^2)` is inside a long, narrow, parabolic shaped
/// flat valley.
#[derive(Debug, Clone, Copy)]
pub struct Rosenbrock {
    a: f64,
    b: f64,
}

impl Rosenbrock {
    /// Initializes the function with given parameters.
    pub fn new(a: f64, b: f64) -> Self {
        assert!(b > 0.0, "b must be greater than zero");
        Self { a, b }
    }
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self::new(1.0, 100.0)
    }
}

impl Problem for Rosenbrock {
    type Field = f64;
    type State = DVector<f64>;
}

impl Function for Rosenbrock {
    fn apply(&self, x: &DVector<f64>) -> f64 {
        (self.a - x[0]).powi(2) + self.b * (x[1] - x[0].powi(2)).powi(2)
    }
}

impl Differentiable for Rosenbrock {
    fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
        let r = x[1] - x[0].powi(2);

        dvector![
            -2.0 * (self.a - x[0]) - 4.0 * self.b * x[0] * r,
            2.0 * self.b * r
        ]
    }
}

impl TwiceDifferentiable for Rosenbrock {
    fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        let h11 = 2.0 - 4.0 * self.b * x[1] + 12.0 * self.b * x[0].powi(2);
        let h12 = -4.0 * self.b * x[0];

        dmatrix![
            h11, h12;
            h12, 2.0 * self.b
        ]
    }
}

impl TestFunction for Rosenbrock {
    fn initials(&self) -> Vec<DVector<f64>> {
        vec![dvector![-1.2, 1.0], dvector![2.0, 2.0], dvector![0.0, 0.0]]
    }

    fn optima(&self) -> Vec<DVector<f64>> {
        vec![dvector![self.a, self.a * self.a]]
    }
}

/// Scalar parabola `f(x) = (x - c)^2`.
#[derive(Debug, Clone, Copy)]
pub struct Parabola {
    c: f64,
}

impl Parabola {
    /// Initializes the function with the minimum in `c`.
    pub fn new(c: f64) -> Self {
        Self { c }
    }
}

impl Default for Parabola {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Problem for Parabola {
    type Field = f64;
    type State = f64;
}

impl Function for Parabola {
    fn apply(&self, x: &f64) -> f64 {
        (x - self.c).powi(2)
    }
}

impl Differentiable for Parabola {
    fn gradient(&self, x: &f64) -> f64 {
        2.0 * (x - self.c)
    }
}

impl TwiceDifferentiable for Parabola {
    fn hessian(&self, _x: &f64) -> f64 {
        2.0
    }
}

impl TestFunction for Parabola {
    fn initials(&self) -> Vec<f64> {
        vec![self.c + 10.0, self.c - 3.0]
    }

    fn optima(&self) -> Vec<f64> {
        vec![self.c]
    }
}
