use std::marker::PhantomData;

use nalgebra::RealField;

use super::{
    base::Problem,
    function::{Curvature, Differentiable, Function, TwiceDifferentiable},
    state::State,
};

/// Marker for an [`Objective`] without second derivative.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHessian;

/// Function given by closures for the cost and its derivatives.
///
/// ```rust
/// use stepwise::{Differentiable, Function, Objective, TwiceDifferentiable};
///
/// let f = Objective::new(|x: &f64| x * x, |x: &f64| 2.0 * x).with_hessian(|_: &f64| 2.0);
///
/// assert_eq!(f.apply(&3.0), 9.0);
/// assert_eq!(f.gradient(&3.0), 6.0);
/// assert_eq!(f.hessian(&3.0), 2.0);
/// ```
#[derive(Clone, Copy)]
pub struct Objective<T, X, C, D, H = NoHessian> {
    cost: C,
    derivative: D,
    hessian: H,
    _phantom: PhantomData<fn(&X) -> T>,
}

impl<T, X, C, D> Objective<T, X, C, D>
where
    T: RealField + Copy,
    X: State<T>,
    C: Fn(&X) -> T,
    D: Fn(&X) -> X,
{
    /// Creates the function from the cost and its derivative (gradient).
    pub fn new(cost: C, derivative: D) -> Self {
        Self {
            cost,
            derivative,
            hessian: NoHessian,
            _phantom: PhantomData,
        }
    }

    /// Adds the second derivative (Hessian) to the function.
    pub fn with_hessian<H>(self, hessian: H) -> Objective<T, X, C, D, H>
    where
        H: Fn(&X) -> X::Curvature,
    {
        Objective {
            cost: self.cost,
            derivative: self.derivative,
            hessian,
            _phantom: PhantomData,
        }
    }
}

impl<T: RealField + Copy, X: State<T>, C, D, H> Problem for Objective<T, X, C, D, H> {
    type Field = T;
    type State = X;
}

impl<T, X, C, D, H> Function for Objective<T, X, C, D, H>
where
    T: RealField + Copy,
    X: State<T>,
    C: Fn(&X) -> T,
{
    fn apply(&self, x: &X) -> T {
        (self.cost)(x)
    }
}

impl<T, X, C, D, H> Differentiable for Objective<T, X, C, D, H>
where
    T: RealField + Copy,
    X: State<T>,
    C: Fn(&X) -> T,
    D: Fn(&X) -> X,
{
    fn gradient(&self, x: &X) -> X {
        (self.derivative)(x)
    }
}

impl<T, X, C, D, H> TwiceDifferentiable for Objective<T, X, C, D, H>
where
    T: RealField + Copy,
    X: State<T>,
    C: Fn(&X) -> T,
    D: Fn(&X) -> X,
    H: Fn(&X) -> X::Curvature,
{
    fn hessian(&self, x: &X) -> Curvature<Self> {
        (self.hessian)(x)
    }
}
