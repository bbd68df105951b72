//! The collection of implemented algorithms.

pub mod gradient_descent;
pub mod newton;

pub use gradient_descent::{gradient_descent, GradientDescent, GradientDescentOptions};
pub use newton::{newtons_method, Newton, NewtonOptions};
