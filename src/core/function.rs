use super::{base::Problem, state::State};

/// Shorthand for the curvature (Hessian) type of a problem.
pub type Curvature<P> = <<P as Problem>::State as State<<P as Problem>::Field>>::Curvature;

/// Definition of a cost function.
///
/// ## Defining a function
///
/// A function is any type that implements [`Function`] and [`Problem`] traits.
///
/// ```rust
/// use stepwise::nalgebra as na;
/// use stepwise::{Function, Problem};
///
/// struct Sphere;
///
/// impl Problem for Sphere {
///     type Field = f64;
///     type State = na::DVector<f64>;
/// }
///
/// impl Function for Sphere {
///     fn apply(&self, x: &Self::State) -> Self::Field {
///         x.norm_squared()
///     }
/// }
/// ```
///
/// For functions given by closures, use [`Objective`](super::Objective).
pub trait Function: Problem {
    /// Calculates the function value in given point.
    fn apply(&self, x: &Self::State) -> Self::Field;
}

/// A function with known first derivative.
pub trait Differentiable: Function {
    /// Calculates the gradient in given point. The gradient has the same shape
    /// as the point.
    fn gradient(&self, x: &Self::State) -> Self::State;
}

/// A function with known second derivative.
pub trait TwiceDifferentiable: Differentiable {
    /// Calculates the Hessian in given point. It is a scalar for scalar
    /// problems and a square matrix for vector problems.
    fn hessian(&self, x: &Self::State) -> Curvature<Self>;
}

impl<F: Function + ?Sized> Function for &F {
    fn apply(&self, x: &Self::State) -> Self::Field {
        (**self).apply(x)
    }
}

impl<F: Differentiable + ?Sized> Differentiable for &F {
    fn gradient(&self, x: &Self::State) -> Self::State {
        (**self).gradient(x)
    }
}

impl<F: TwiceDifferentiable + ?Sized> TwiceDifferentiable for &F {
    fn hessian(&self, x: &Self::State) -> Curvature<Self> {
        (**self).hessian(x)
    }
}
